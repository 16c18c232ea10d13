//! Observability for the Ikarus relay: subscriber setup and the attribute
//! names used on completion spans.

pub mod genai_attrs;
pub mod tracing_setup;
