//! # Initialization
//!
//! Controller startup: bind the command line, set up logging, then validate
//! and freeze the configuration. Any failure here is fatal.

use std::ffi::OsString;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::{flags, BoundFlags, ControllerConfig};
use crate::constants::{APP_VERSION, BUILD_DATETIME, BUILD_GIT_HASH};
use crate::observability;

/// Initialize from the process arguments and environment.
///
/// Help and version requests print and exit the process, as clap does.
pub fn initialize() -> Result<ControllerConfig> {
    let matches = flags::command().get_matches();
    let bound = flags::bind(&matches).context("Failed to read command-line flags")?;
    observability::init_logging(&bound.logging)?;
    finish(bound)
}

/// Initialize from an explicit argument list, without installing a log subscriber.
pub fn initialize_from<I, T>(args: I) -> Result<ControllerConfig>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let bound = flags::parse_from(args).context("Failed to parse command-line flags")?;
    finish(bound)
}

fn finish(bound: BoundFlags) -> Result<ControllerConfig> {
    info!("Starting cert-manager controller {APP_VERSION}");
    info!("Build info: datetime={BUILD_DATETIME}, git_hash={BUILD_GIT_HASH}");

    for flag in &bound.deprecated {
        warn!(flag = flag.name, "Flag --{} is deprecated: {}", flag.name, flag.message);
    }

    let config = bound
        .options
        .into_config()
        .context("Invalid controller configuration")?;

    let unknown = config.unknown_controllers();
    if !unknown.is_empty() {
        warn!(
            controllers = ?unknown,
            "Ignoring unknown controller names in --controllers"
        );
    }

    log_summary(&config);
    Ok(config)
}

fn log_summary(config: &ControllerConfig) {
    let scope = config.scope();
    let leader_election = config.leader_election();

    info!(
        namespace = scope.namespace.as_deref().unwrap_or("<all>"),
        cluster_resource_namespace = %scope.cluster_resource_namespace,
        cluster_issuers = scope.cluster_issuers_enabled(),
        "Watch scope"
    );
    info!(
        enabled = leader_election.enabled,
        namespace = %leader_election.namespace,
        "Leader election"
    );
    info!(
        controllers = ?config.enabled_controllers(),
        "Enabled controllers"
    );

    if config.keystores().pkcs12_enabled() {
        info!("PKCS#12 keystores will be written to certificate Secrets");
    }
    if config.keystores().jks_enabled() {
        info!("JKS keystores will be written to certificate Secrets");
    }

    match serde_json::to_string(config) {
        Ok(json) => debug!(config = %json, "Effective configuration"),
        Err(e) => warn!("Failed to serialize effective configuration: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_from_defaults() {
        let config = initialize_from(["cert-manager-controller"]).unwrap();
        assert!(config.leader_election().enabled);
        assert!(config.unknown_controllers().is_empty());
    }

    #[test]
    fn test_initialize_from_rejects_invalid_kind() {
        let err = initialize_from(["cert-manager-controller", "--default-issuer-kind=Role"])
            .unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("Invalid controller configuration"), "{message}");
        assert!(message.contains("default-issuer-kind"), "{message}");
    }

    #[test]
    fn test_initialize_from_reports_parse_errors() {
        let err = initialize_from(["cert-manager-controller", "--no-such-flag"]).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse command-line flags"));
    }
}
