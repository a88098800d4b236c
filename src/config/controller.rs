//! # Controller Configuration
//!
//! The validated, read-only configuration handed to every collaborating
//! controller. Each collaborator borrows only the view it needs.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use k8s_openapi::api::core::v1::ResourceRequirements;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use serde::{Serialize, Serializer};

use crate::constants::KNOWN_CONTROLLERS;

use super::error::ConfigError;
use super::names;
use super::options::ControllerOptions;
use super::secret::KeystorePassword;
use super::validation::{format_duration, parse_issuer_kind, parse_quantity};

/// Kind of the default issuer used by ingress-shim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IssuerKind {
    Issuer,
    ClusterIssuer,
}

impl IssuerKind {
    /// Accepted spellings, for error messages
    pub const ALLOWED: &'static str = "Issuer, ClusterIssuer";

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Issuer" => Some(Self::Issuer),
            "ClusterIssuer" => Some(Self::ClusterIssuer),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Issuer => "Issuer",
            Self::ClusterIssuer => "ClusterIssuer",
        }
    }
}

impl fmt::Display for IssuerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionConfig {
    /// `None` means the API server is discovered automatically
    pub api_server_host: Option<String>,
    /// `None` means in-cluster credentials
    pub kubeconfig: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeConfig {
    /// `None` watches every namespace
    pub namespace: Option<String>,
    pub cluster_resource_namespace: String,
}

impl ScopeConfig {
    /// ClusterIssuers are only served when the controller is cluster-wide
    pub fn cluster_issuers_enabled(&self) -> bool {
        self.namespace.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderElectionConfig {
    pub enabled: bool,
    pub namespace: String,
    #[serde(serialize_with = "serialize_duration")]
    pub lease_duration: Duration,
    #[serde(serialize_with = "serialize_duration")]
    pub renew_deadline: Duration,
    #[serde(serialize_with = "serialize_duration")]
    pub retry_period: Duration,
}

/// Everything the challenge controller needs to schedule HTTP01 solver pods
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeSolverConfig {
    pub image: String,
    pub request_cpu: Quantity,
    pub request_memory: Quantity,
    pub limits_cpu: Quantity,
    pub limits_memory: Quantity,
    pub max_concurrent_challenges: usize,
}

impl ChallengeSolverConfig {
    /// Resource block for the solver container
    pub fn resource_requirements(&self) -> ResourceRequirements {
        ResourceRequirements {
            requests: Some(BTreeMap::from([
                ("cpu".to_string(), self.request_cpu.clone()),
                ("memory".to_string(), self.request_memory.clone()),
            ])),
            limits: Some(BTreeMap::from([
                ("cpu".to_string(), self.limits_cpu.clone()),
                ("memory".to_string(), self.limits_memory.clone()),
            ])),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmbientCredentialsConfig {
    pub cluster_issuers: bool,
    pub issuers: bool,
}

impl AmbientCredentialsConfig {
    /// Whether an issuer of `kind` may fall back to environment or metadata credentials
    pub fn allowed_for(&self, kind: IssuerKind) -> bool {
        match kind {
            IssuerKind::ClusterIssuer => self.cluster_issuers,
            IssuerKind::Issuer => self.issuers,
        }
    }
}

/// Defaults consumed by ingress-shim
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressShimConfig {
    /// `None` when no default issuer is configured
    pub default_issuer_name: Option<String>,
    pub default_issuer_kind: IssuerKind,
    pub default_issuer_group: String,
    pub auto_certificate_annotations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dns01SelfCheckConfig {
    pub nameservers: Vec<String>,
    pub nameservers_only: bool,
}

/// Experimental keystores. A password is present exactly when its keystore is enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeystoreConfig {
    pub pkcs12_password: Option<KeystorePassword>,
    pub jks_password: Option<KeystorePassword>,
}

impl KeystoreConfig {
    pub fn pkcs12_enabled(&self) -> bool {
        self.pkcs12_password.is_some()
    }

    pub fn jks_enabled(&self) -> bool {
        self.jks_password.is_some()
    }
}

/// Validated controller configuration.
///
/// Only obtainable through [`ControllerOptions::into_config`]; there is no way
/// to change it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerConfig {
    connection: ConnectionConfig,
    scope: ScopeConfig,
    leader_election: LeaderElectionConfig,
    enabled_controllers: BTreeSet<String>,
    challenge_solver: ChallengeSolverConfig,
    ambient_credentials: AmbientCredentialsConfig,
    #[serde(serialize_with = "serialize_duration")]
    renew_before_expiry: Duration,
    ingress_shim: IngressShimConfig,
    dns01_self_check: Dns01SelfCheckConfig,
    certificate_owner_ref: bool,
    keystores: KeystoreConfig,
}

impl ControllerConfig {
    /// Convert validated options. Callers go through [`ControllerOptions::into_config`].
    pub(crate) fn freeze(options: ControllerOptions) -> Result<Self, ConfigError> {
        let ControllerOptions {
            api_server_host,
            kubeconfig,
            cluster_resource_namespace,
            namespace,
            leader_elect,
            leader_election_namespace,
            leader_election_lease_duration,
            leader_election_renew_deadline,
            leader_election_retry_period,
            enabled_controllers,
            acme_http01_solver_image,
            acme_http01_solver_resource_request_cpu,
            acme_http01_solver_resource_request_memory,
            acme_http01_solver_resource_limits_cpu,
            acme_http01_solver_resource_limits_memory,
            cluster_issuer_ambient_credentials,
            issuer_ambient_credentials,
            renew_before_expiry_duration,
            default_issuer_name,
            default_issuer_kind,
            default_issuer_group,
            default_auto_certificate_annotations,
            dns01_recursive_nameservers,
            dns01_recursive_nameservers_only,
            enable_certificate_owner_ref,
            max_concurrent_challenges,
            experimental_issue_pkcs12,
            experimental_pkcs12_keystore_password,
            experimental_issue_jks,
            experimental_jks_password,
        } = options;

        let challenge_solver = ChallengeSolverConfig {
            image: acme_http01_solver_image,
            request_cpu: quantity(
                names::ACME_HTTP01_SOLVER_RESOURCE_REQUEST_CPU,
                acme_http01_solver_resource_request_cpu,
            )?,
            request_memory: quantity(
                names::ACME_HTTP01_SOLVER_RESOURCE_REQUEST_MEMORY,
                acme_http01_solver_resource_request_memory,
            )?,
            limits_cpu: quantity(
                names::ACME_HTTP01_SOLVER_RESOURCE_LIMITS_CPU,
                acme_http01_solver_resource_limits_cpu,
            )?,
            limits_memory: quantity(
                names::ACME_HTTP01_SOLVER_RESOURCE_LIMITS_MEMORY,
                acme_http01_solver_resource_limits_memory,
            )?,
            max_concurrent_challenges,
        };

        Ok(Self {
            connection: ConnectionConfig {
                api_server_host: non_empty(api_server_host),
                kubeconfig: non_empty(kubeconfig).map(PathBuf::from),
            },
            scope: ScopeConfig {
                namespace: non_empty(namespace),
                cluster_resource_namespace,
            },
            leader_election: LeaderElectionConfig {
                enabled: leader_elect,
                namespace: leader_election_namespace,
                lease_duration: leader_election_lease_duration,
                renew_deadline: leader_election_renew_deadline,
                retry_period: leader_election_retry_period,
            },
            enabled_controllers: enabled_controllers
                .into_iter()
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect(),
            challenge_solver,
            ambient_credentials: AmbientCredentialsConfig {
                cluster_issuers: cluster_issuer_ambient_credentials,
                issuers: issuer_ambient_credentials,
            },
            renew_before_expiry: renew_before_expiry_duration,
            ingress_shim: IngressShimConfig {
                default_issuer_name: non_empty(default_issuer_name),
                default_issuer_kind: parse_issuer_kind(&default_issuer_kind)?,
                default_issuer_group,
                auto_certificate_annotations: default_auto_certificate_annotations,
            },
            dns01_self_check: Dns01SelfCheckConfig {
                nameservers: dns01_recursive_nameservers,
                nameservers_only: dns01_recursive_nameservers_only,
            },
            certificate_owner_ref: enable_certificate_owner_ref,
            keystores: KeystoreConfig {
                pkcs12_password: experimental_issue_pkcs12
                    .then_some(experimental_pkcs12_keystore_password),
                jks_password: experimental_issue_jks.then_some(experimental_jks_password),
            },
        })
    }

    pub fn connection(&self) -> &ConnectionConfig {
        &self.connection
    }

    pub fn scope(&self) -> &ScopeConfig {
        &self.scope
    }

    pub fn leader_election(&self) -> &LeaderElectionConfig {
        &self.leader_election
    }

    /// Controllers to start, de-duplicated and sorted
    pub fn enabled_controllers(&self) -> &BTreeSet<String> {
        &self.enabled_controllers
    }

    pub fn controller_enabled(&self, name: &str) -> bool {
        self.enabled_controllers.contains(name)
    }

    /// Enabled names that match no known controller. Startup warns about these.
    pub fn unknown_controllers(&self) -> Vec<&str> {
        self.enabled_controllers
            .iter()
            .map(String::as_str)
            .filter(|name| !KNOWN_CONTROLLERS.contains(name))
            .collect()
    }

    pub fn challenge_solver(&self) -> &ChallengeSolverConfig {
        &self.challenge_solver
    }

    pub fn ambient_credentials(&self) -> &AmbientCredentialsConfig {
        &self.ambient_credentials
    }

    pub fn renew_before_expiry(&self) -> Duration {
        self.renew_before_expiry
    }

    pub fn ingress_shim(&self) -> &IngressShimConfig {
        &self.ingress_shim
    }

    pub fn dns01_self_check(&self) -> &Dns01SelfCheckConfig {
        &self.dns01_self_check
    }

    /// Whether issued Secrets are owned by their Certificate
    pub fn certificate_owner_ref(&self) -> bool {
        self.certificate_owner_ref
    }

    pub fn keystores(&self) -> &KeystoreConfig {
        &self.keystores
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn quantity(field: &'static str, value: String) -> Result<Quantity, ConfigError> {
    parse_quantity(&value).map_err(|source| ConfigError::InvalidQuantity {
        field,
        value,
        source,
    })
}

#[allow(clippy::trivially_copy_pass_by_ref, reason = "signature required by serde")]
fn serialize_duration<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_duration(duration))
}
