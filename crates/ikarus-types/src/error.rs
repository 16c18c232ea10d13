use std::fmt;

use thiserror::Error;

use crate::chat::ErrorBody;

/// Coarse classification shared by server and client failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing input; the user can fix it.
    Validation,
    /// Deployment misconfiguration; only the operator can fix it.
    Configuration,
    /// The upstream rejected the credential.
    Authentication,
    /// The upstream is throttling.
    RateLimit,
    /// Any other upstream failure.
    Upstream,
    /// The client could not reach the server at all.
    Network,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::Configuration => write!(f, "configuration"),
            ErrorKind::Authentication => write!(f, "authentication"),
            ErrorKind::RateLimit => write!(f, "rate_limit"),
            ErrorKind::Upstream => write!(f, "upstream"),
            ErrorKind::Network => write!(f, "network"),
        }
    }
}

/// Errors produced by the Server Relay.
///
/// The `Display` text is the short `error` summary sent to the client;
/// the longer explanation is in [`RelayError::details`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("No input provided")]
    MissingInput,

    #[error("Invalid request body")]
    InvalidBody(String),

    #[error("OpenAI API key is missing")]
    MissingCredential,

    #[error("Authentication error")]
    Authentication,

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Failed to process request")]
    Upstream(String),
}

impl RelayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RelayError::MissingInput | RelayError::InvalidBody(_) => ErrorKind::Validation,
            RelayError::MissingCredential => ErrorKind::Configuration,
            RelayError::Authentication => ErrorKind::Authentication,
            RelayError::RateLimited => ErrorKind::RateLimit,
            RelayError::Upstream(_) => ErrorKind::Upstream,
        }
    }

    /// HTTP status code for this failure.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation => 400,
            ErrorKind::Authentication => 401,
            ErrorKind::RateLimit => 429,
            ErrorKind::Configuration | ErrorKind::Upstream | ErrorKind::Network => 500,
        }
    }

    pub fn details(&self) -> String {
        match self {
            RelayError::MissingInput => "Request must include 'userInput' field".to_string(),
            RelayError::InvalidBody(reason) => reason.clone(),
            RelayError::MissingCredential => "Server configuration error".to_string(),
            RelayError::Authentication => "Invalid API key configuration".to_string(),
            RelayError::RateLimited => "Please try again in a moment".to_string(),
            RelayError::Upstream(message) => message.clone(),
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
            details: Some(self.details()),
        }
    }
}

/// Failures seen by the Client Relay before they are turned into
/// displayable text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with an error, either through a non-2xx status or
    /// an `error` field on a 2xx body.
    #[error("{reason}")]
    Rejected { status: u16, reason: String },

    #[error("response did not contain a message")]
    MissingMessage,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Network(_) => ErrorKind::Network,
            ClientError::Rejected { status, .. } => match status {
                400 => ErrorKind::Validation,
                401 => ErrorKind::Authentication,
                429 => ErrorKind::RateLimit,
                _ => ErrorKind::Upstream,
            },
            ClientError::MissingMessage => ErrorKind::Upstream,
        }
    }
}
