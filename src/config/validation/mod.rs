//! # Validation
//!
//! Validates bound controller options and the value formats their switches
//! accept.

mod duration;
mod endpoint;
mod options;
mod quantity;

pub use duration::{format_duration, parse_duration, DurationError};
pub use endpoint::{split_host_port, EndpointError};
pub use options::{parse_issuer_kind, validate_controller_options, validate_nameservers};
pub use quantity::{parse_quantity, QuantityError};
