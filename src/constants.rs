//! # Constants
//!
//! Default values for every controller option.
//!
//! These are the values a freshly constructed [`ControllerOptions`] carries
//! before any flag or environment variable is applied.
//!
//! [`ControllerOptions`]: crate::config::ControllerOptions

use std::time::Duration;

/// Version identifier of the running build (e.g. `v0.1.0`), set by `build.rs`
pub const APP_VERSION: &str = env!("APP_VERSION");

/// Git commit the binary was built from
pub const BUILD_GIT_HASH: &str = env!("BUILD_GIT_HASH");

/// Build timestamp
pub const BUILD_DATETIME: &str = env!("BUILD_DATETIME");

/// API group of the certificate resources
pub const GROUP_NAME: &str = "cert-manager.io";

/// Prefix for environment variables that mirror command-line switches
pub const ENV_PREFIX: &str = "CERT_MANAGER_";

pub const DEFAULT_API_SERVER_HOST: &str = "";
pub const DEFAULT_KUBECONFIG: &str = "";
pub const DEFAULT_CLUSTER_RESOURCE_NAMESPACE: &str = "kube-system";
pub const DEFAULT_NAMESPACE: &str = "";

pub const DEFAULT_LEADER_ELECT: bool = true;
pub const DEFAULT_LEADER_ELECTION_NAMESPACE: &str = "kube-system";
pub const DEFAULT_LEADER_ELECTION_LEASE_DURATION: Duration = Duration::from_secs(60);
pub const DEFAULT_LEADER_ELECTION_RENEW_DEADLINE: Duration = Duration::from_secs(40);
pub const DEFAULT_LEADER_ELECTION_RETRY_PERIOD: Duration = Duration::from_secs(15);

pub const DEFAULT_CLUSTER_ISSUER_AMBIENT_CREDENTIALS: bool = true;
pub const DEFAULT_ISSUER_AMBIENT_CREDENTIALS: bool = false;

/// Certificates are renewed 30 days before they expire
pub const DEFAULT_RENEW_BEFORE_EXPIRY_DURATION: Duration = Duration::from_secs(30 * 24 * 3600);

pub const DEFAULT_ISSUER_NAME: &str = "";
pub const DEFAULT_ISSUER_KIND: &str = "Issuer";
pub const DEFAULT_ISSUER_GROUP: &str = GROUP_NAME;

pub const DEFAULT_AUTO_CERTIFICATE_ANNOTATIONS: &[&str] = &["kubernetes.io/tls-acme"];

pub const DEFAULT_DNS01_RECURSIVE_NAMESERVERS_ONLY: bool = false;
pub const DEFAULT_ENABLE_CERTIFICATE_OWNER_REF: bool = false;
pub const DEFAULT_MAX_CONCURRENT_CHALLENGES: usize = 60;

/// Registry path of the HTTP01 solver image; the tag is always [`APP_VERSION`]
pub const ACME_HTTP01_SOLVER_IMAGE_REPOSITORY: &str = "quay.io/jetstack/cert-manager-acmesolver";
pub const DEFAULT_ACME_HTTP01_SOLVER_RESOURCE_REQUEST_CPU: &str = "10m";
pub const DEFAULT_ACME_HTTP01_SOLVER_RESOURCE_REQUEST_MEMORY: &str = "64Mi";
pub const DEFAULT_ACME_HTTP01_SOLVER_RESOURCE_LIMITS_CPU: &str = "100m";
pub const DEFAULT_ACME_HTTP01_SOLVER_RESOURCE_LIMITS_MEMORY: &str = "64Mi";

pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const ISSUERS_CONTROLLER: &str = "issuers";
pub const CLUSTER_ISSUERS_CONTROLLER: &str = "clusterissuers";
pub const CERTIFICATES_CONTROLLER: &str = "certificates";
pub const INGRESS_SHIM_CONTROLLER: &str = "ingress-shim";
pub const ORDERS_CONTROLLER: &str = "orders";
pub const CHALLENGES_CONTROLLER: &str = "challenges";
pub const CR_ACME_CONTROLLER: &str = "certificaterequests-issuer-acme";
pub const CR_CA_CONTROLLER: &str = "certificaterequests-issuer-ca";
pub const CR_SELFSIGNED_CONTROLLER: &str = "certificaterequests-issuer-selfsigned";
pub const CR_VAULT_CONTROLLER: &str = "certificaterequests-issuer-vault";
pub const CR_VENAFI_CONTROLLER: &str = "certificaterequests-issuer-venafi";

/// Every controller this process knows how to start, each listed once.
/// This is also the default value of `--controllers`.
pub const KNOWN_CONTROLLERS: &[&str] = &[
    ISSUERS_CONTROLLER,
    CLUSTER_ISSUERS_CONTROLLER,
    CERTIFICATES_CONTROLLER,
    INGRESS_SHIM_CONTROLLER,
    ORDERS_CONTROLLER,
    CHALLENGES_CONTROLLER,
    CR_ACME_CONTROLLER,
    CR_CA_CONTROLLER,
    CR_SELFSIGNED_CONTROLLER,
    CR_VAULT_CONTROLLER,
    CR_VENAFI_CONTROLLER,
];

/// Default solver image, `<registry>/<component>:<version>`
pub fn default_acme_http01_solver_image() -> String {
    format!("{ACME_HTTP01_SOLVER_IMAGE_REPOSITORY}:{APP_VERSION}")
}
