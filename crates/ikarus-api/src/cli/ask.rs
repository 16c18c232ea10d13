//! `ikarus ask`: one question, one answer, no dialogue.

use console::style;

use ikarus_infra::client::ClientRelay;

use super::terminal::contemplating_spinner;

/// Send `text` through the Client Relay and print what comes back.
///
/// Failures are already rendered in the persona's voice, so this only
/// fails if there was nothing to send.
pub async fn ask(relay: &ClientRelay, text: &str) -> anyhow::Result<()> {
    let text = text.trim();
    anyhow::ensure!(!text.is_empty(), "nothing to ask");

    let spinner = contemplating_spinner();
    let reply = relay.send(text).await;
    spinner.finish_and_clear();

    println!("{} {reply}", style("Ikarus:").red().bold());
    Ok(())
}
