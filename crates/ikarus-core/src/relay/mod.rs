//! The Server Relay: validates a submission, forwards it to the completion
//! API under the Ikarus persona and normalizes the outcome.

pub mod classify;
pub mod service;

pub use classify::classify_upstream_error;
pub use service::RelayService;
