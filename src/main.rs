//! cert-manager controller
//!
//! Validates the controller configuration and logs the effective settings.
//! Exits non-zero if any option is invalid.

use anyhow::Result;
use cert_manager_controller::runtime;
use tracing::info;

fn main() -> Result<()> {
    let config = runtime::initialize()?;
    info!(
        controllers = config.enabled_controllers().len(),
        "Configuration is valid"
    );
    Ok(())
}
