//! # Command-Line Flags
//!
//! Registers one switch per controller option and binds explicitly supplied
//! values into a fresh [`ControllerOptions`].
//!
//! Every switch except the deprecated nameserver alias can also be set through
//! an environment variable named `CERT_MANAGER_<SWITCH_NAME>` (upper case,
//! dashes replaced by underscores). A value on the command line wins over the
//! environment.
//!
//! Values are applied in registration order, so when two switches write the
//! same field the later registered one wins. This only matters for
//! `--dns01-self-check-nameservers`, which is registered after
//! `--dns01-recursive-nameservers`.

use std::ffi::OsString;
use std::time::Duration;

use clap::builder::{BoolishValueParser, EnumValueParser};
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::constants::{APP_VERSION, DEFAULT_LOG_LEVEL, ENV_PREFIX};
use crate::observability::{LogFormat, LoggingOptions};

use super::error::FlagError;
use super::names;
use super::options::ControllerOptions;
use super::secret::KeystorePassword;
use super::validation::{format_duration, parse_duration};

/// A deprecated switch that was used on this invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeprecatedFlag {
    pub name: &'static str,
    pub message: &'static str,
}

const DNS01_SELF_CHECK_NAMESERVERS_DEPRECATION: DeprecatedFlag = DeprecatedFlag {
    name: names::DNS01_SELF_CHECK_NAMESERVERS,
    message: "Deprecated in favour of dns01-recursive-nameservers",
};

/// Result of binding the command line
#[derive(Debug)]
pub struct BoundFlags {
    /// Staging options, not yet validated
    pub options: ControllerOptions,
    pub logging: LoggingOptions,
    /// Deprecated switches that were supplied, to be reported once logging is up
    pub deprecated: Vec<DeprecatedFlag>,
}

/// The controller command with every switch registered
pub fn command() -> Command {
    let command = Command::new("cert-manager-controller")
        .version(APP_VERSION)
        .about("Automated TLS certificate management controller for Kubernetes");
    register(command, &ControllerOptions::new())
}

/// Register all switches on `command`, showing `defaults` in the help output.
pub fn register(command: Command, defaults: &ControllerOptions) -> Command {
    command
        .arg(string_flag(
            names::MASTER,
            &defaults.api_server_host,
            "Optional apiserver host address to connect to. If not specified, \
             autoconfiguration will be attempted.",
        ))
        .arg(string_flag(
            names::KUBECONFIG,
            &defaults.kubeconfig,
            "Path to a kubeconfig. Only required if out-of-cluster.",
        ))
        .arg(string_flag(
            names::CLUSTER_RESOURCE_NAMESPACE,
            &defaults.cluster_resource_namespace,
            "Namespace to store resources owned by cluster scoped resources such as \
             ClusterIssuer in. This must be specified if ClusterIssuers are enabled.",
        ))
        .arg(string_flag(
            names::NAMESPACE,
            &defaults.namespace,
            "If set, limits the controller to a single namespace and disables \
             ClusterIssuers. If not specified, all namespaces are watched.",
        ))
        .arg(bool_flag(
            names::LEADER_ELECT,
            defaults.leader_elect,
            "If true, perform leader election between instances so that no more than \
             one instance operates at a time.",
        ))
        .arg(string_flag(
            names::LEADER_ELECTION_NAMESPACE,
            &defaults.leader_election_namespace,
            "Namespace used to perform leader election. Only used if leader election is enabled.",
        ))
        .arg(duration_flag(
            names::LEADER_ELECTION_LEASE_DURATION,
            defaults.leader_election_lease_duration,
            "How long non-leader candidates wait after observing a leadership renewal \
             before attempting to acquire leadership of a led but unrenewed slot. This is \
             the longest a stopped leader can go unreplaced.",
        ))
        .arg(duration_flag(
            names::LEADER_ELECTION_RENEW_DEADLINE,
            defaults.leader_election_renew_deadline,
            "How long the acting leader keeps retrying to renew its slot before it stops \
             leading. Must be less than the lease duration.",
        ))
        .arg(duration_flag(
            names::LEADER_ELECTION_RETRY_PERIOD,
            defaults.leader_election_retry_period,
            "How long clients wait between attempts to acquire or renew leadership. \
             Must be less than the renew deadline.",
        ))
        .arg(list_flag(
            names::CONTROLLERS,
            &defaults.enabled_controllers,
            "The set of controllers to enable.",
        ))
        .arg(string_flag(
            names::ACME_HTTP01_SOLVER_IMAGE,
            &defaults.acme_http01_solver_image,
            "The container image used to solve ACME HTTP01 challenges. Only change this \
             when testing a new solver build.",
        ))
        .arg(string_flag(
            names::ACME_HTTP01_SOLVER_RESOURCE_REQUEST_CPU,
            &defaults.acme_http01_solver_resource_request_cpu,
            "CPU request for ACME HTTP01 challenge solver pods.",
        ))
        .arg(string_flag(
            names::ACME_HTTP01_SOLVER_RESOURCE_REQUEST_MEMORY,
            &defaults.acme_http01_solver_resource_request_memory,
            "Memory request for ACME HTTP01 challenge solver pods.",
        ))
        .arg(string_flag(
            names::ACME_HTTP01_SOLVER_RESOURCE_LIMITS_CPU,
            &defaults.acme_http01_solver_resource_limits_cpu,
            "CPU limit for ACME HTTP01 challenge solver pods.",
        ))
        .arg(string_flag(
            names::ACME_HTTP01_SOLVER_RESOURCE_LIMITS_MEMORY,
            &defaults.acme_http01_solver_resource_limits_memory,
            "Memory limit for ACME HTTP01 challenge solver pods.",
        ))
        .arg(bool_flag(
            names::CLUSTER_ISSUER_AMBIENT_CREDENTIALS,
            defaults.cluster_issuer_ambient_credentials,
            "Whether a ClusterIssuer may use ambient credentials: credentials drawn from \
             the environment, metadata services or local files rather than the \
             ClusterIssuer object itself.",
        ))
        .arg(bool_flag(
            names::ISSUER_AMBIENT_CREDENTIALS,
            defaults.issuer_ambient_credentials,
            "Whether an Issuer may use ambient credentials: credentials drawn from the \
             environment, metadata services or local files rather than the Issuer \
             object itself.",
        ))
        .arg(duration_flag(
            names::RENEW_BEFORE_EXPIRY_DURATION,
            defaults.renew_before_expiry_duration,
            "Default 'renew before expiry' time for Certificates. Once a certificate is \
             within this duration of expiry a new one is issued.",
        ))
        .arg(list_flag(
            names::AUTO_CERTIFICATE_ANNOTATIONS,
            &defaults.default_auto_certificate_annotations,
            "Annotations that mark an ingress as requesting a certificate from ingress-shim.",
        ))
        .arg(string_flag(
            names::DEFAULT_ISSUER_NAME,
            &defaults.default_issuer_name,
            "Name of the issuer used when TLS is requested but the ingress does not name one.",
        ))
        .arg(string_flag(
            names::DEFAULT_ISSUER_KIND,
            &defaults.default_issuer_kind,
            "Kind of the issuer used when TLS is requested but the ingress does not name \
             one (Issuer or ClusterIssuer).",
        ))
        .arg(string_flag(
            names::DEFAULT_ISSUER_GROUP,
            &defaults.default_issuer_group,
            "Group of the issuer used when TLS is requested but the ingress does not name one.",
        ))
        .arg(list_flag(
            names::DNS01_RECURSIVE_NAMESERVERS,
            &defaults.dns01_recursive_nameservers,
            "Comma separated host:port DNS servers used for DNS01 self check requests, \
             for example 8.8.8.8:53,8.8.4.4:53",
        ))
        .arg(bool_flag(
            names::DNS01_RECURSIVE_NAMESERVERS_ONLY,
            defaults.dns01_recursive_nameservers_only,
            "Only ever query the configured DNS resolvers for the DNS01 self check. Useful \
             where authoritative nameservers are unreachable, at the cost of slower checks \
             due to resolver caching.",
        ))
        .arg(
            Arg::new(names::DNS01_SELF_CHECK_NAMESERVERS)
                .long(names::DNS01_SELF_CHECK_NAMESERVERS)
                .help(DNS01_SELF_CHECK_NAMESERVERS_DEPRECATION.message)
                .value_name("LIST")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .hide(true),
        )
        .arg(bool_flag(
            names::ENABLE_CERTIFICATE_OWNER_REF,
            defaults.enable_certificate_owner_ref,
            "Make each Certificate the owner of the Secret holding its key pair, so the \
             Secret is deleted together with the Certificate.",
        ))
        .arg(
            flag(
                names::MAX_CONCURRENT_CHALLENGES,
                "The maximum number of challenges that can be scheduled as 'processing' at once.",
            )
            .value_name("INT")
            .action(ArgAction::Set)
            .value_parser(clap::value_parser!(usize))
            .default_value(defaults.max_concurrent_challenges.to_string()),
        )
        .arg(bool_flag(
            names::EXPERIMENTAL_ISSUE_PKCS12,
            defaults.experimental_issue_pkcs12,
            "Also store a 'keystore.p12' in managed Secrets, encrypted with \
             --experimental-pkcs12-keystore-password, which is then required.",
        ))
        .arg(password_flag(
            names::EXPERIMENTAL_PKCS12_KEYSTORE_PASSWORD,
            "Password protecting PKCS#12 bundles in Secrets. Required if \
             --experimental-issue-pkcs12 is enabled.",
        ))
        .arg(bool_flag(
            names::EXPERIMENTAL_ISSUE_JKS,
            defaults.experimental_issue_jks,
            "Also store a 'keystore.jks' in managed Secrets, encrypted with \
             --experimental-jks-password, which is then required.",
        ))
        .arg(password_flag(
            names::EXPERIMENTAL_JKS_PASSWORD,
            "Password protecting JKS bundles in Secrets. Required if \
             --experimental-issue-jks is enabled.",
        ))
        .arg(string_flag(
            names::LOG_LEVEL,
            DEFAULT_LOG_LEVEL,
            "Log filter directive (e.g. 'info' or 'cert_manager_controller=debug'). \
             RUST_LOG takes precedence when set.",
        ))
        .arg(
            flag(names::LOG_FORMAT, "Log output format.")
                .value_name("FORMAT")
                .action(ArgAction::Set)
                .value_parser(EnumValueParser::<LogFormat>::new())
                .default_value("text"),
        )
}

/// Copy every explicitly supplied value into a fresh option set.
pub fn bind(matches: &ArgMatches) -> Result<BoundFlags, FlagError> {
    let mut options = ControllerOptions::new();
    let mut deprecated = Vec::new();

    set(matches, names::MASTER, &mut options.api_server_host)?;
    set(matches, names::KUBECONFIG, &mut options.kubeconfig)?;
    set(
        matches,
        names::CLUSTER_RESOURCE_NAMESPACE,
        &mut options.cluster_resource_namespace,
    )?;
    set(matches, names::NAMESPACE, &mut options.namespace)?;
    set(matches, names::LEADER_ELECT, &mut options.leader_elect)?;
    set(
        matches,
        names::LEADER_ELECTION_NAMESPACE,
        &mut options.leader_election_namespace,
    )?;
    set(
        matches,
        names::LEADER_ELECTION_LEASE_DURATION,
        &mut options.leader_election_lease_duration,
    )?;
    set(
        matches,
        names::LEADER_ELECTION_RENEW_DEADLINE,
        &mut options.leader_election_renew_deadline,
    )?;
    set(
        matches,
        names::LEADER_ELECTION_RETRY_PERIOD,
        &mut options.leader_election_retry_period,
    )?;
    set_list(matches, names::CONTROLLERS, &mut options.enabled_controllers)?;
    set(
        matches,
        names::ACME_HTTP01_SOLVER_IMAGE,
        &mut options.acme_http01_solver_image,
    )?;
    set(
        matches,
        names::ACME_HTTP01_SOLVER_RESOURCE_REQUEST_CPU,
        &mut options.acme_http01_solver_resource_request_cpu,
    )?;
    set(
        matches,
        names::ACME_HTTP01_SOLVER_RESOURCE_REQUEST_MEMORY,
        &mut options.acme_http01_solver_resource_request_memory,
    )?;
    set(
        matches,
        names::ACME_HTTP01_SOLVER_RESOURCE_LIMITS_CPU,
        &mut options.acme_http01_solver_resource_limits_cpu,
    )?;
    set(
        matches,
        names::ACME_HTTP01_SOLVER_RESOURCE_LIMITS_MEMORY,
        &mut options.acme_http01_solver_resource_limits_memory,
    )?;
    set(
        matches,
        names::CLUSTER_ISSUER_AMBIENT_CREDENTIALS,
        &mut options.cluster_issuer_ambient_credentials,
    )?;
    set(
        matches,
        names::ISSUER_AMBIENT_CREDENTIALS,
        &mut options.issuer_ambient_credentials,
    )?;
    set(
        matches,
        names::RENEW_BEFORE_EXPIRY_DURATION,
        &mut options.renew_before_expiry_duration,
    )?;
    set_list(
        matches,
        names::AUTO_CERTIFICATE_ANNOTATIONS,
        &mut options.default_auto_certificate_annotations,
    )?;
    set(matches, names::DEFAULT_ISSUER_NAME, &mut options.default_issuer_name)?;
    set(matches, names::DEFAULT_ISSUER_KIND, &mut options.default_issuer_kind)?;
    set(matches, names::DEFAULT_ISSUER_GROUP, &mut options.default_issuer_group)?;
    set_list(
        matches,
        names::DNS01_RECURSIVE_NAMESERVERS,
        &mut options.dns01_recursive_nameservers,
    )?;
    set(
        matches,
        names::DNS01_RECURSIVE_NAMESERVERS_ONLY,
        &mut options.dns01_recursive_nameservers_only,
    )?;
    if set_list(
        matches,
        names::DNS01_SELF_CHECK_NAMESERVERS,
        &mut options.dns01_recursive_nameservers,
    )? {
        deprecated.push(DNS01_SELF_CHECK_NAMESERVERS_DEPRECATION);
    }
    set(
        matches,
        names::ENABLE_CERTIFICATE_OWNER_REF,
        &mut options.enable_certificate_owner_ref,
    )?;
    set(
        matches,
        names::MAX_CONCURRENT_CHALLENGES,
        &mut options.max_concurrent_challenges,
    )?;
    set(
        matches,
        names::EXPERIMENTAL_ISSUE_PKCS12,
        &mut options.experimental_issue_pkcs12,
    )?;
    set_password(
        matches,
        names::EXPERIMENTAL_PKCS12_KEYSTORE_PASSWORD,
        &mut options.experimental_pkcs12_keystore_password,
    )?;
    set(matches, names::EXPERIMENTAL_ISSUE_JKS, &mut options.experimental_issue_jks)?;
    set_password(
        matches,
        names::EXPERIMENTAL_JKS_PASSWORD,
        &mut options.experimental_jks_password,
    )?;

    let mut logging = LoggingOptions::default();
    set(matches, names::LOG_LEVEL, &mut logging.level)?;
    set(matches, names::LOG_FORMAT, &mut logging.format)?;

    Ok(BoundFlags {
        options,
        logging,
        deprecated,
    })
}

/// Parse `args` (including the program name) and bind them
pub fn parse_from<I, T>(args: I) -> Result<BoundFlags, FlagError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command().try_get_matches_from(args)?;
    bind(&matches)
}

/// Environment variable mirroring a switch
pub fn env_var_name(flag_name: &str) -> String {
    format!("{ENV_PREFIX}{}", flag_name.to_uppercase().replace('-', "_"))
}

fn flag(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help).env(env_var_name(name))
}

fn with_default(arg: Arg, default: &str) -> Arg {
    if default.is_empty() {
        arg
    } else {
        arg.default_value(default.to_string())
    }
}

fn string_flag(name: &'static str, default: &str, help: &'static str) -> Arg {
    with_default(
        flag(name, help).value_name("STRING").action(ArgAction::Set),
        default,
    )
}

fn password_flag(name: &'static str, help: &'static str) -> Arg {
    flag(name, help)
        .value_name("PASSWORD")
        .action(ArgAction::Set)
        .hide_env_values(true)
}

/// `--flag` means true; `--flag=false` is needed to switch a default-true option off
fn bool_flag(name: &'static str, default: bool, help: &'static str) -> Arg {
    flag(name, help)
        .value_name("BOOL")
        .action(ArgAction::Set)
        .num_args(0..=1)
        .require_equals(true)
        .default_missing_value("true")
        .default_value(if default { "true" } else { "false" })
        .value_parser(BoolishValueParser::new())
}

fn duration_flag(name: &'static str, default: Duration, help: &'static str) -> Arg {
    flag(name, help)
        .value_name("DURATION")
        .action(ArgAction::Set)
        .value_parser(parse_duration)
        .default_value(format_duration(&default))
}

fn list_flag(name: &'static str, defaults: &[String], help: &'static str) -> Arg {
    let arg = flag(name, help)
        .value_name("LIST")
        .action(ArgAction::Append)
        .value_delimiter(',');
    if defaults.is_empty() {
        arg
    } else {
        arg.default_values(defaults.to_vec())
    }
}

fn supplied(matches: &ArgMatches, id: &str) -> bool {
    matches!(
        matches.value_source(id),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

/// Write the switch's value into `target` if it was supplied. Returns whether it was.
fn set<T>(matches: &ArgMatches, id: &'static str, target: &mut T) -> Result<bool, FlagError>
where
    T: Clone + Send + Sync + 'static,
{
    if !supplied(matches, id) {
        return Ok(false);
    }
    let value = matches
        .try_get_one::<T>(id)
        .map_err(|source| FlagError::Read { flag: id, source })?;
    match value {
        Some(value) => {
            *target = value.clone();
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Lists replace the default wholesale; blank entries are dropped.
fn set_list(
    matches: &ArgMatches,
    id: &'static str,
    target: &mut Vec<String>,
) -> Result<bool, FlagError> {
    if !supplied(matches, id) {
        return Ok(false);
    }
    let values = matches
        .try_get_many::<String>(id)
        .map_err(|source| FlagError::Read { flag: id, source })?;
    *target = values
        .map(|values| {
            values
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    Ok(true)
}

fn set_password(
    matches: &ArgMatches,
    id: &'static str,
    target: &mut KeystorePassword,
) -> Result<bool, FlagError> {
    let mut value = String::new();
    let supplied = set(matches, id, &mut value)?;
    if supplied {
        *target = KeystorePassword::from(value);
    }
    Ok(supplied)
}
