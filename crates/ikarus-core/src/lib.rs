//! Business logic and port definitions for the Ikarus relay.
//!
//! This crate defines the `LlmProvider` port that the infrastructure layer
//! implements and the Server Relay that drives it. It depends only on
//! `ikarus-types` -- never on `ikarus-infra` or any network crate.

pub mod llm;
pub mod persona;
pub mod relay;
