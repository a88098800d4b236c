//! Command-line switch names, in registration order.

pub const MASTER: &str = "master";
pub const KUBECONFIG: &str = "kubeconfig";
pub const CLUSTER_RESOURCE_NAMESPACE: &str = "cluster-resource-namespace";
pub const NAMESPACE: &str = "namespace";
pub const LEADER_ELECT: &str = "leader-elect";
pub const LEADER_ELECTION_NAMESPACE: &str = "leader-election-namespace";
pub const LEADER_ELECTION_LEASE_DURATION: &str = "leader-election-lease-duration";
pub const LEADER_ELECTION_RENEW_DEADLINE: &str = "leader-election-renew-deadline";
pub const LEADER_ELECTION_RETRY_PERIOD: &str = "leader-election-retry-period";
pub const CONTROLLERS: &str = "controllers";
pub const ACME_HTTP01_SOLVER_IMAGE: &str = "acme-http01-solver-image";
pub const ACME_HTTP01_SOLVER_RESOURCE_REQUEST_CPU: &str = "acme-http01-solver-resource-request-cpu";
pub const ACME_HTTP01_SOLVER_RESOURCE_REQUEST_MEMORY: &str =
    "acme-http01-solver-resource-request-memory";
pub const ACME_HTTP01_SOLVER_RESOURCE_LIMITS_CPU: &str = "acme-http01-solver-resource-limits-cpu";
pub const ACME_HTTP01_SOLVER_RESOURCE_LIMITS_MEMORY: &str =
    "acme-http01-solver-resource-limits-memory";
pub const CLUSTER_ISSUER_AMBIENT_CREDENTIALS: &str = "cluster-issuer-ambient-credentials";
pub const ISSUER_AMBIENT_CREDENTIALS: &str = "issuer-ambient-credentials";
pub const RENEW_BEFORE_EXPIRY_DURATION: &str = "renew-before-expiry-duration";
pub const AUTO_CERTIFICATE_ANNOTATIONS: &str = "auto-certificate-annotations";
pub const DEFAULT_ISSUER_NAME: &str = "default-issuer-name";
pub const DEFAULT_ISSUER_KIND: &str = "default-issuer-kind";
pub const DEFAULT_ISSUER_GROUP: &str = "default-issuer-group";
pub const DNS01_RECURSIVE_NAMESERVERS: &str = "dns01-recursive-nameservers";
pub const DNS01_RECURSIVE_NAMESERVERS_ONLY: &str = "dns01-recursive-nameservers-only";
/// Deprecated alias of [`DNS01_RECURSIVE_NAMESERVERS`]
pub const DNS01_SELF_CHECK_NAMESERVERS: &str = "dns01-self-check-nameservers";
pub const ENABLE_CERTIFICATE_OWNER_REF: &str = "enable-certificate-owner-ref";
pub const MAX_CONCURRENT_CHALLENGES: &str = "max-concurrent-challenges";
pub const EXPERIMENTAL_ISSUE_PKCS12: &str = "experimental-issue-pkcs12";
pub const EXPERIMENTAL_PKCS12_KEYSTORE_PASSWORD: &str = "experimental-pkcs12-keystore-password";
pub const EXPERIMENTAL_ISSUE_JKS: &str = "experimental-issue-jks";
pub const EXPERIMENTAL_JKS_PASSWORD: &str = "experimental-jks-password";

pub const LOG_LEVEL: &str = "log-level";
pub const LOG_FORMAT: &str = "log-format";
