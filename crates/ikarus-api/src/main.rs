//! Ikarus relay server and terminal client.
//!
//! Binary name: `ikarus`
//!
//! Parses CLI arguments, sets up tracing, loads `ikarus.toml`, then either
//! starts the HTTP relay or talks to one as a client.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use ikarus_infra::client::ClientRelay;
use ikarus_infra::config::load_config;
use ikarus_observe::tracing_setup::{init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_filter(), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need configuration
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "ikarus", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = load_config(&cli.config).await;

    match cli.command {
        Commands::Serve {
            port,
            host,
            no_cors,
        } => {
            cli::apply_serve_overrides(&mut config.server, host, port, no_cors);

            let state = AppState::init(&config);
            let configured = state.relay.is_configured();

            let addr = format!("{}:{}", config.server.host, config.server.port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Ikarus relay listening on {}",
                console::style("☀").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            if !configured {
                println!(
                    "  {} {} is not set; chat requests will fail",
                    console::style("!").yellow().bold(),
                    config.upstream.api_key_env
                );
            }
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state, &config.server);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }

        Commands::Ask { text, target } => {
            target.apply(&mut config.client);
            let relay = ClientRelay::new(&config.client);
            cli::ask::ask(&relay, &text.join(" ")).await?;
        }

        Commands::Terminal { target } => {
            target.apply(&mut config.client);
            let relay = ClientRelay::new(&config.client);
            cli::terminal::run_terminal(&relay).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
