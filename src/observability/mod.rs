//! # Observability
//!
//! Structured logging for the controller process.

pub mod logging;

pub use logging::{init_logging, LogFormat, LoggingOptions};
