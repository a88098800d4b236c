//! # Controller Options Validation
//!
//! Cross-field rules that must hold before any controller is started.
//! Validation never corrects a value; it accepts the set or names the first
//! field that is wrong.

use std::time::Duration;

use crate::config::controller::IssuerKind;
use crate::config::error::ConfigError;
use crate::config::names;
use crate::config::options::ControllerOptions;
use crate::config::secret::KeystorePassword;

use super::duration::format_duration;
use super::endpoint::split_host_port;
use super::quantity::parse_quantity;

/// Validate a bound option set
pub fn validate_controller_options(options: &ControllerOptions) -> Result<(), ConfigError> {
    parse_issuer_kind(&options.default_issuer_kind)?;
    validate_nameservers(&options.dns01_recursive_nameservers)?;

    validate_dependent_password(
        options.experimental_issue_pkcs12,
        &options.experimental_pkcs12_keystore_password,
        names::EXPERIMENTAL_ISSUE_PKCS12,
        names::EXPERIMENTAL_PKCS12_KEYSTORE_PASSWORD,
    )?;
    validate_dependent_password(
        options.experimental_issue_jks,
        &options.experimental_jks_password,
        names::EXPERIMENTAL_ISSUE_JKS,
        names::EXPERIMENTAL_JKS_PASSWORD,
    )?;

    if options.cluster_resource_namespace.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: names::CLUSTER_RESOURCE_NAMESPACE,
            value: options.cluster_resource_namespace.clone(),
            reason: "must not be empty",
        });
    }

    if options.max_concurrent_challenges == 0 {
        return Err(ConfigError::InvalidValue {
            field: names::MAX_CONCURRENT_CHALLENGES,
            value: options.max_concurrent_challenges.to_string(),
            reason: "must be greater than zero",
        });
    }

    validate_positive_duration(
        options.renew_before_expiry_duration,
        names::RENEW_BEFORE_EXPIRY_DURATION,
    )?;
    validate_leader_election(options)?;
    validate_solver_resources(options)?;

    Ok(())
}

/// Parse the default issuer kind. Matching is case-sensitive.
pub fn parse_issuer_kind(value: &str) -> Result<IssuerKind, ConfigError> {
    IssuerKind::from_name(value).ok_or_else(|| ConfigError::InvalidEnum {
        field: names::DEFAULT_ISSUER_KIND,
        value: value.to_string(),
        allowed: IssuerKind::ALLOWED,
    })
}

/// Every nameserver must carry a port. The first bad entry is reported.
pub fn validate_nameservers(nameservers: &[String]) -> Result<(), ConfigError> {
    for server in nameservers {
        split_host_port(server).map_err(|source| ConfigError::InvalidEndpoint {
            value: server.clone(),
            source,
        })?;
    }
    Ok(())
}

fn validate_dependent_password(
    enabled: bool,
    password: &KeystorePassword,
    toggle: &'static str,
    requires: &'static str,
) -> Result<(), ConfigError> {
    if enabled && password.is_empty() {
        return Err(ConfigError::MissingDependentOption { toggle, requires });
    }
    Ok(())
}

fn validate_positive_duration(value: Duration, field: &'static str) -> Result<(), ConfigError> {
    if value.is_zero() {
        return Err(ConfigError::InvalidValue {
            field,
            value: format_duration(&value),
            reason: "must be greater than zero",
        });
    }
    Ok(())
}

/// Leader-election timings must be positive, and while leader election is
/// enabled: retry period < renew deadline < lease duration.
fn validate_leader_election(options: &ControllerOptions) -> Result<(), ConfigError> {
    let lease = options.leader_election_lease_duration;
    let renew = options.leader_election_renew_deadline;
    let retry = options.leader_election_retry_period;

    validate_positive_duration(lease, names::LEADER_ELECTION_LEASE_DURATION)?;
    validate_positive_duration(renew, names::LEADER_ELECTION_RENEW_DEADLINE)?;
    validate_positive_duration(retry, names::LEADER_ELECTION_RETRY_PERIOD)?;

    if !options.leader_elect {
        return Ok(());
    }

    if renew >= lease {
        return Err(ConfigError::DurationOrdering {
            field: names::LEADER_ELECTION_RENEW_DEADLINE,
            value: renew,
            bound: names::LEADER_ELECTION_LEASE_DURATION,
            bound_value: lease,
        });
    }
    if retry >= renew {
        return Err(ConfigError::DurationOrdering {
            field: names::LEADER_ELECTION_RETRY_PERIOD,
            value: retry,
            bound: names::LEADER_ELECTION_RENEW_DEADLINE,
            bound_value: renew,
        });
    }

    Ok(())
}

fn validate_solver_resources(options: &ControllerOptions) -> Result<(), ConfigError> {
    let resources = [
        (
            names::ACME_HTTP01_SOLVER_RESOURCE_REQUEST_CPU,
            &options.acme_http01_solver_resource_request_cpu,
        ),
        (
            names::ACME_HTTP01_SOLVER_RESOURCE_REQUEST_MEMORY,
            &options.acme_http01_solver_resource_request_memory,
        ),
        (
            names::ACME_HTTP01_SOLVER_RESOURCE_LIMITS_CPU,
            &options.acme_http01_solver_resource_limits_cpu,
        ),
        (
            names::ACME_HTTP01_SOLVER_RESOURCE_LIMITS_MEMORY,
            &options.acme_http01_solver_resource_limits_memory,
        ),
    ];

    for (field, value) in resources {
        parse_quantity(value).map_err(|source| ConfigError::InvalidQuantity {
            field,
            value: value.clone(),
            source,
        })?;
    }
    Ok(())
}
