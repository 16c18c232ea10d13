//! Async line input for the terminal.
//!
//! Wraps `rustyline_async::Readline` so Ctrl+D and Ctrl+C surface as
//! events instead of errors.

use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

#[derive(Debug)]
pub enum InputEvent {
    Line(String),
    /// Ctrl+D.
    Eof,
    /// Ctrl+C.
    Interrupted,
}

pub struct TerminalInput {
    rl: Readline,
}

impl TerminalInput {
    /// Returns the input handler and a `SharedWriter` that prints without
    /// clobbering the prompt.
    pub fn new(prompt: String) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, stdout) = Readline::new(prompt)?;
        Ok((Self { rl }, stdout))
    }

    pub async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                if !line.trim().is_empty() {
                    self.rl.add_history_entry(line.clone());
                }
                InputEvent::Line(line)
            }
            Ok(ReadlineEvent::Eof) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
            Err(_) => InputEvent::Eof,
        }
    }

    /// Restore the terminal before the process prints anything else.
    pub fn finish(mut self) {
        let _ = self.rl.flush();
    }
}
