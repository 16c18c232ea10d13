//! HTTP layer for the Server Relay.
//!
//! Axum router exposing `POST /api/chat` and `GET /health`, with
//! permissive CORS, request tracing and a request ceiling.

pub mod error;
pub mod handlers;
pub mod router;
