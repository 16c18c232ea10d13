//! Credential lookup.
//!
//! - `env`: environment variable provider (read once at start-up)

pub mod env;
