//! # Controller Options
//!
//! The staging option set. It starts out populated with defaults, is written
//! by the flag binder, and is then validated and frozen into a
//! [`ControllerConfig`] which the rest of the process reads.

use std::time::Duration;

use crate::constants::{
    default_acme_http01_solver_image, DEFAULT_ACME_HTTP01_SOLVER_RESOURCE_LIMITS_CPU,
    DEFAULT_ACME_HTTP01_SOLVER_RESOURCE_LIMITS_MEMORY,
    DEFAULT_ACME_HTTP01_SOLVER_RESOURCE_REQUEST_CPU,
    DEFAULT_ACME_HTTP01_SOLVER_RESOURCE_REQUEST_MEMORY, DEFAULT_API_SERVER_HOST,
    DEFAULT_AUTO_CERTIFICATE_ANNOTATIONS, DEFAULT_CLUSTER_ISSUER_AMBIENT_CREDENTIALS,
    DEFAULT_CLUSTER_RESOURCE_NAMESPACE, DEFAULT_DNS01_RECURSIVE_NAMESERVERS_ONLY,
    DEFAULT_ENABLE_CERTIFICATE_OWNER_REF, DEFAULT_ISSUER_AMBIENT_CREDENTIALS,
    DEFAULT_ISSUER_GROUP, DEFAULT_ISSUER_KIND, DEFAULT_ISSUER_NAME, DEFAULT_KUBECONFIG,
    DEFAULT_LEADER_ELECT, DEFAULT_LEADER_ELECTION_LEASE_DURATION,
    DEFAULT_LEADER_ELECTION_NAMESPACE, DEFAULT_LEADER_ELECTION_RENEW_DEADLINE,
    DEFAULT_LEADER_ELECTION_RETRY_PERIOD, DEFAULT_MAX_CONCURRENT_CHALLENGES, DEFAULT_NAMESPACE,
    DEFAULT_RENEW_BEFORE_EXPIRY_DURATION, KNOWN_CONTROLLERS,
};

use super::controller::ControllerConfig;
use super::error::ConfigError;
use super::secret::KeystorePassword;
use super::validation::validate_controller_options;

/// Every option the controller process accepts.
///
/// Fields are public so the flag binder (and tests) can write them directly.
/// Nothing outside startup should hold one of these; collaborators receive the
/// frozen [`ControllerConfig`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    /// API server address; empty means autoconfigure
    pub api_server_host: String,
    /// Path to a kubeconfig; empty means in-cluster
    pub kubeconfig: String,
    /// Namespace for resources owned by cluster-scoped issuers
    pub cluster_resource_namespace: String,
    /// Restricts the controller to one namespace; empty watches all
    pub namespace: String,

    pub leader_elect: bool,
    pub leader_election_namespace: String,
    pub leader_election_lease_duration: Duration,
    pub leader_election_renew_deadline: Duration,
    pub leader_election_retry_period: Duration,

    /// Controllers to start. Duplicates are tolerated and order does not matter.
    pub enabled_controllers: Vec<String>,

    pub acme_http01_solver_image: String,
    pub acme_http01_solver_resource_request_cpu: String,
    pub acme_http01_solver_resource_request_memory: String,
    pub acme_http01_solver_resource_limits_cpu: String,
    pub acme_http01_solver_resource_limits_memory: String,

    pub cluster_issuer_ambient_credentials: bool,
    pub issuer_ambient_credentials: bool,

    /// How long before expiry a certificate is renewed
    pub renew_before_expiry_duration: Duration,

    /// Default issuer for ingress-shim; empty means no default
    pub default_issuer_name: String,
    /// `Issuer` or `ClusterIssuer`, checked by validation
    pub default_issuer_kind: String,
    pub default_issuer_group: String,
    pub default_auto_certificate_annotations: Vec<String>,

    /// `host:port` resolvers used for the DNS01 self check
    pub dns01_recursive_nameservers: Vec<String>,
    /// Only use `dns01_recursive_nameservers`, never the authoritative servers
    pub dns01_recursive_nameservers_only: bool,

    pub enable_certificate_owner_ref: bool,

    /// Upper bound on challenges in the processing state
    pub max_concurrent_challenges: usize,

    pub experimental_issue_pkcs12: bool,
    pub experimental_pkcs12_keystore_password: KeystorePassword,
    pub experimental_issue_jks: bool,
    pub experimental_jks_password: KeystorePassword,
}

impl ControllerOptions {
    /// Option set with every field at its default
    pub fn new() -> Self {
        Self {
            api_server_host: DEFAULT_API_SERVER_HOST.to_string(),
            kubeconfig: DEFAULT_KUBECONFIG.to_string(),
            cluster_resource_namespace: DEFAULT_CLUSTER_RESOURCE_NAMESPACE.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            leader_elect: DEFAULT_LEADER_ELECT,
            leader_election_namespace: DEFAULT_LEADER_ELECTION_NAMESPACE.to_string(),
            leader_election_lease_duration: DEFAULT_LEADER_ELECTION_LEASE_DURATION,
            leader_election_renew_deadline: DEFAULT_LEADER_ELECTION_RENEW_DEADLINE,
            leader_election_retry_period: DEFAULT_LEADER_ELECTION_RETRY_PERIOD,
            enabled_controllers: to_strings(KNOWN_CONTROLLERS),
            acme_http01_solver_image: default_acme_http01_solver_image(),
            acme_http01_solver_resource_request_cpu:
                DEFAULT_ACME_HTTP01_SOLVER_RESOURCE_REQUEST_CPU.to_string(),
            acme_http01_solver_resource_request_memory:
                DEFAULT_ACME_HTTP01_SOLVER_RESOURCE_REQUEST_MEMORY.to_string(),
            acme_http01_solver_resource_limits_cpu: DEFAULT_ACME_HTTP01_SOLVER_RESOURCE_LIMITS_CPU
                .to_string(),
            acme_http01_solver_resource_limits_memory:
                DEFAULT_ACME_HTTP01_SOLVER_RESOURCE_LIMITS_MEMORY.to_string(),
            cluster_issuer_ambient_credentials: DEFAULT_CLUSTER_ISSUER_AMBIENT_CREDENTIALS,
            issuer_ambient_credentials: DEFAULT_ISSUER_AMBIENT_CREDENTIALS,
            renew_before_expiry_duration: DEFAULT_RENEW_BEFORE_EXPIRY_DURATION,
            default_issuer_name: DEFAULT_ISSUER_NAME.to_string(),
            default_issuer_kind: DEFAULT_ISSUER_KIND.to_string(),
            default_issuer_group: DEFAULT_ISSUER_GROUP.to_string(),
            default_auto_certificate_annotations: to_strings(DEFAULT_AUTO_CERTIFICATE_ANNOTATIONS),
            dns01_recursive_nameservers: Vec::new(),
            dns01_recursive_nameservers_only: DEFAULT_DNS01_RECURSIVE_NAMESERVERS_ONLY,
            enable_certificate_owner_ref: DEFAULT_ENABLE_CERTIFICATE_OWNER_REF,
            max_concurrent_challenges: DEFAULT_MAX_CONCURRENT_CHALLENGES,
            experimental_issue_pkcs12: false,
            experimental_pkcs12_keystore_password: KeystorePassword::default(),
            experimental_issue_jks: false,
            experimental_jks_password: KeystorePassword::default(),
        }
    }

    /// Check every cross-field rule. Returns the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_controller_options(self)
    }

    /// Validate and freeze into the read-only configuration
    pub fn into_config(self) -> Result<ControllerConfig, ConfigError> {
        self.validate()?;
        ControllerConfig::freeze(self)
    }
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self::new()
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}
