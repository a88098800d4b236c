//! # Configuration Errors
//!
//! Every error here is an operator error detected at startup. None of them is
//! retried; the process reports the message and exits.

use std::time::Duration;

use thiserror::Error;

use super::validation::{format_duration, EndpointError, QuantityError};

/// A bound option set failed validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field restricted to a fixed set of values received something else
    #[error("invalid --{field} {value:?}: must be one of {allowed}")]
    InvalidEnum {
        field: &'static str,
        value: String,
        allowed: &'static str,
    },

    /// A DNS01 nameserver is not a `host:port` endpoint
    #[error("invalid DNS server ({value}): {source}")]
    InvalidEndpoint {
        value: String,
        #[source]
        source: EndpointError,
    },

    /// A feature toggle is enabled without its companion value
    #[error("--{requires} must be specified if --{toggle} is enabled")]
    MissingDependentOption {
        toggle: &'static str,
        requires: &'static str,
    },

    /// A value is outside the range its field accepts
    #[error("invalid --{field} {value:?}: {reason}")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    /// Two leader-election timings are not strictly ordered
    #[error(
        "--{field} ({}) must be less than --{bound} ({})",
        format_duration(.value),
        format_duration(.bound_value)
    )]
    DurationOrdering {
        field: &'static str,
        value: Duration,
        bound: &'static str,
        bound_value: Duration,
    },

    /// A solver resource request or limit is not a Kubernetes quantity
    #[error("invalid --{field} {value:?}: {source}")]
    InvalidQuantity {
        field: &'static str,
        value: String,
        #[source]
        source: QuantityError,
    },
}

/// Reading switches off the command line failed.
#[derive(Debug, Error)]
pub enum FlagError {
    #[error(transparent)]
    Parse(#[from] clap::Error),

    #[error("failed to read --{flag}: {source}")]
    Read {
        flag: &'static str,
        #[source]
        source: clap::parser::MatchesError,
    },
}
