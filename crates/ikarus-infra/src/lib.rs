//! Infrastructure layer for the Ikarus relay.
//!
//! Implements the `LlmProvider` port from `ikarus-core` against an
//! OpenAI-compatible API, reads the credential from the environment, loads
//! `ikarus.toml`, and provides the Client Relay that talks to the server.

pub mod client;
pub mod config;
pub mod llm;
pub mod secret;
