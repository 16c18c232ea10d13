//! Interactive Ikarus terminal.
//!
//! Wires the dialogue state machine to rustyline input, an indicatif
//! spinner and the Client Relay.

pub mod banner;
pub mod input;
pub mod session;

use std::io::Write;
use std::time::Duration;

use console::style;
use rustyline_async::SharedWriter;

use ikarus_infra::client::ClientRelay;

use self::banner::print_welcome_banner;
use self::input::{InputEvent, TerminalInput};
use self::session::{Action, CONTEMPLATING, Entry, Phase, TerminalSession};

/// Run the terminal until the user leaves.
pub async fn run_terminal(relay: &ClientRelay) -> anyhow::Result<()> {
    print_welcome_banner(relay.endpoint());

    let mut session = TerminalSession::new();
    let (mut input, mut out) = TerminalInput::new(format!("{} ", style(">").red().bold()))?;
    let mut printed = print_new_entries(&mut out, &session, 0);

    loop {
        match input.read_line().await {
            InputEvent::Line(line) => {
                let action = session.submit(&line);

                if let Action::Ask(text) = &action {
                    let spinner = contemplating_spinner();
                    let reply = relay.send(text).await;
                    spinner.finish_and_clear();
                    session.record_exchange(text, &reply);
                }

                printed = print_new_entries(&mut out, &session, printed);

                if session.phase() == Phase::Closed {
                    break;
                }
            }
            InputEvent::Eof | InputEvent::Interrupted => {
                tracing::debug!("terminal input closed");
                break;
            }
        }
    }

    input.finish();
    println!();
    Ok(())
}

/// Print transcript entries from `from` on and return the new high-water
/// mark. Echoes are skipped; readline already shows them.
fn print_new_entries(out: &mut SharedWriter, session: &TerminalSession, from: usize) -> usize {
    let entries = session.transcript();
    for entry in &entries[from..] {
        let line = match entry {
            Entry::Echo(_) => continue,
            Entry::System(text) => format!("  {}", style(text).dim()),
            Entry::You(text) => format!("  {} {text}", style("You:").bold()),
            Entry::Ikarus(text) => format!("  {} {text}\n", style("Ikarus:").red().bold()),
        };
        let _ = writeln!(out, "{line}");
    }
    entries.len()
}

/// Spinner shown while a reply is in flight.
pub fn contemplating_spinner() -> indicatif::ProgressBar {
    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.red} {msg}")
            .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner()),
    );
    spinner.set_message(CONTEMPLATING);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
