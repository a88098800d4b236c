//! cert-manager controller library
//!
//! Option handling for the cert-manager controller process: defaults,
//! command-line binding, validation and the frozen configuration the
//! controllers read.

pub mod config;
pub mod constants;
pub mod observability;
pub mod runtime;

pub use config::{ConfigError, ControllerConfig, ControllerOptions, FlagError, IssuerKind};
