//! # Configuration
//!
//! Controller options: defaults, command-line binding, validation and the
//! frozen configuration handed to the rest of the process.
//!
//! ```text
//! ControllerOptions::new() -> flags::bind() -> validate() -> into_config() -> ControllerConfig
//! ```

pub mod controller;
pub mod error;
pub mod flags;
pub mod names;
pub mod options;
pub mod secret;
pub mod validation;

pub use controller::{
    AmbientCredentialsConfig, ChallengeSolverConfig, ConnectionConfig, ControllerConfig,
    Dns01SelfCheckConfig, IngressShimConfig, IssuerKind, KeystoreConfig, LeaderElectionConfig,
    ScopeConfig,
};
pub use error::{ConfigError, FlagError};
pub use flags::{BoundFlags, DeprecatedFlag};
pub use options::ControllerOptions;
pub use secret::KeystorePassword;
