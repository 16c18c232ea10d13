//! CLI command definitions for the `ikarus` binary.

pub mod ask;
pub mod terminal;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use ikarus_infra::config::DEFAULT_CONFIG_FILE;
use ikarus_types::config::{ClientConfig, ServerConfig};

/// Speak with Ikarus, the one who flew too close to the sun.
#[derive(Parser)]
#[command(name = "ikarus", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file.
    #[arg(long, global = true, env = "IKARUS_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,ikarus_api=debug,ikarus_core=debug,ikarus_infra=debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat relay server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, env = "IKARUS_PORT")]
        port: Option<u16>,

        /// Host to bind to.
        #[arg(long, env = "IKARUS_HOST")]
        host: Option<String>,

        /// Do not send CORS headers or answer pre-flight requests.
        #[arg(long)]
        no_cors: bool,
    },

    /// Ask Ikarus a single question and print the answer.
    Ask {
        /// The question.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Open the interactive Ikarus terminal.
    Terminal {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Which relay the client talks to.
#[derive(Args, Debug, Default)]
pub struct TargetArgs {
    /// Public host of a deployed relay (https is assumed).
    #[arg(long, env = "IKARUS_DEPLOYMENT_HOST")]
    pub deployment_host: Option<String>,

    /// Origin of a local relay, used when no deployment host is set.
    #[arg(long)]
    pub origin: Option<String>,
}

impl TargetArgs {
    pub fn apply(self, client: &mut ClientConfig) {
        if let Some(host) = self.deployment_host {
            client.deployment_host = Some(host);
        }
        if let Some(origin) = self.origin {
            client.local_origin = origin;
        }
    }
}

/// Overlay `serve` flags on the file configuration.
pub fn apply_serve_overrides(
    server: &mut ServerConfig,
    host: Option<String>,
    port: Option<u16>,
    no_cors: bool,
) {
    if let Some(host) = host {
        server.host = host;
    }
    if let Some(port) = port {
        server.port = port;
    }
    if no_cors {
        server.cors = false;
    }
}
