//! Observability module
//!
//! Structured logging for the `huskpack` CLI.

pub mod logging;

pub use logging::{LogFormat, init_logging};
