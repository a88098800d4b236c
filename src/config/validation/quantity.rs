//! # Quantity Validation
//!
//! Checks the solver resource requests and limits before they are handed to the
//! challenge controller as Kubernetes quantities.

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuantityError {
    #[error("must be a non-negative Kubernetes quantity such as \"100m\", \"64Mi\" or \"1\"")]
    Malformed,

    #[error("failed to compile quantity pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Parse a resource quantity (`10m`, `64Mi`, `1.5`, `1e3`).
/// Negative values are rejected since they are never valid requests or limits.
pub fn parse_quantity(value: &str) -> Result<Quantity, QuantityError> {
    // <number><binary SI | decimal SI | decimal exponent>
    let quantity_regex = Regex::new(
        r"^\+?(?:\d+(?:\.\d*)?|\.\d+)(?:Ki|Mi|Gi|Ti|Pi|Ei|n|u|m|k|M|G|T|P|E|[eE][+-]?\d+)?$",
    )?;

    if !quantity_regex.is_match(value) {
        return Err(QuantityError::Malformed);
    }

    Ok(Quantity(value.to_string()))
}
