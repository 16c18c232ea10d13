//! Dialogue state for the Ikarus terminal.
//!
//! Pure and synchronous: the loop feeds submitted lines in and performs the
//! returned [`Action`]. Nothing here touches the network or the screen.

use std::fmt;

pub const CONSENT_PROMPT: &str = "Would you like to interact with Ikarus? (yes/no)";
pub const CONSENT_GRANTED: &str = "You may now speak with Ikarus. What would you like to ask?";
pub const EXIT_HINT: &str = "Type 'exit' to end the conversation.";
pub const CONSENT_DECLINED: &str = "Returning to home page...";
pub const FAREWELL: &str = "Farewell, seeker of wisdom.";
pub const CONTEMPLATING: &str = "Ikarus is contemplating...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingConsent,
    Conversing,
    Closed,
}

/// One line of the session transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A submitted line, as typed.
    Echo(String),
    /// Narration from the terminal itself.
    System(String),
    You(String),
    Ikarus(String),
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Echo(line) => write!(f, "> {line}"),
            Entry::System(line) => write!(f, "{line}"),
            Entry::You(line) => write!(f, "You: {line}"),
            Entry::Ikarus(line) => write!(f, "Ikarus: {line}"),
        }
    }
}

/// What the loop should do after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing beyond printing new transcript entries.
    Continue,
    /// Send this text through the Client Relay, then call
    /// [`TerminalSession::record_exchange`].
    Ask(String),
    /// The session is over.
    Close,
}

#[derive(Debug)]
pub struct TerminalSession {
    phase: Phase,
    transcript: Vec<Entry>,
}

impl TerminalSession {
    pub fn new() -> Self {
        Self {
            phase: Phase::AwaitingConsent,
            transcript: vec![Entry::System(CONSENT_PROMPT.to_string())],
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn transcript(&self) -> &[Entry] {
        &self.transcript
    }

    /// Process one submitted line.
    ///
    /// Trimming applies to command matching only; the echo and anything
    /// sent to Ikarus keep the line as typed.
    pub fn submit(&mut self, line: &str) -> Action {
        let text = line.trim();
        if text.is_empty() || self.phase == Phase::Closed {
            return Action::Continue;
        }

        self.transcript.push(Entry::Echo(line.to_string()));
        let command = text.to_lowercase();

        match self.phase {
            Phase::AwaitingConsent => match command.as_str() {
                "yes" => {
                    self.phase = Phase::Conversing;
                    self.say(CONSENT_GRANTED);
                    self.say(EXIT_HINT);
                    Action::Continue
                }
                "no" => {
                    self.phase = Phase::Closed;
                    self.say(CONSENT_DECLINED);
                    Action::Close
                }
                _ => Action::Continue,
            },
            Phase::Conversing if command == "exit" => {
                self.phase = Phase::Closed;
                self.say(FAREWELL);
                Action::Close
            }
            Phase::Conversing => Action::Ask(line.to_string()),
            Phase::Closed => Action::Continue,
        }
    }

    /// Append one completed exchange.
    pub fn record_exchange(&mut self, input: &str, reply: &str) {
        self.transcript.push(Entry::You(input.to_string()));
        self.transcript.push(Entry::Ikarus(reply.to_string()));
    }

    fn say(&mut self, line: &str) {
        self.transcript.push(Entry::System(line.to_string()));
    }
}

impl Default for TerminalSession {
    fn default() -> Self {
        Self::new()
    }
}
