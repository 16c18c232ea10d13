//! Shared domain types for the Ikarus relay.
//!
//! Wire shapes exchanged between the Client Relay and the Server Relay,
//! the error taxonomy both sides speak, LLM request/response types and
//! configuration.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
