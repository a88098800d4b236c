//! # Flag Binding Tests
//!
//! Command-line binding into `ControllerOptions`, including the deprecated
//! nameserver alias.

use std::time::Duration;

use cert_manager_controller::config::flags::{self, BoundFlags};
use cert_manager_controller::config::{ConfigError, ControllerOptions, FlagError};

fn parse(args: &[&str]) -> BoundFlags {
    let argv = std::iter::once("cert-manager-controller").chain(args.iter().copied());
    flags::parse_from(argv).unwrap()
}

#[test]
fn test_deprecated_nameserver_flag_populates_current_field() {
    let bound = parse(&["--dns01-self-check-nameservers=1.1.1.1:53"]);

    assert_eq!(bound.options.dns01_recursive_nameservers, vec!["1.1.1.1:53"]);
    assert_eq!(bound.deprecated.len(), 1);
    assert_eq!(bound.deprecated[0].name, "dns01-self-check-nameservers");
    assert!(bound.deprecated[0].message.contains("dns01-recursive-nameservers"));
}

#[test]
fn test_deprecated_nameserver_flag_is_applied_last() {
    // Command-line position does not matter; registration order does.
    let bound = parse(&[
        "--dns01-self-check-nameservers=1.1.1.1:53",
        "--dns01-recursive-nameservers=8.8.8.8:53,8.8.4.4:53",
    ]);

    assert_eq!(bound.options.dns01_recursive_nameservers, vec!["1.1.1.1:53"]);
}

#[test]
fn test_current_nameserver_flag_is_not_deprecated() {
    let bound = parse(&["--dns01-recursive-nameservers=8.8.8.8:53, 8.8.4.4:53"]);

    assert_eq!(
        bound.options.dns01_recursive_nameservers,
        vec!["8.8.8.8:53", "8.8.4.4:53"]
    );
    assert!(bound.deprecated.is_empty());
}

#[test]
fn test_deprecated_flag_is_hidden_from_help() {
    let help = flags::command().render_long_help().to_string();
    assert!(help.contains("--dns01-recursive-nameservers"));
    assert!(!help.contains("--dns01-self-check-nameservers"));
}

#[test]
fn test_supplied_values_override_defaults() {
    let bound = parse(&[
        "--namespace=team-a",
        "--leader-elect=false",
        "--leader-election-namespace=cert-manager",
        "--max-concurrent-challenges=5",
        "--default-issuer-name=letsencrypt",
        "--default-issuer-kind=ClusterIssuer",
        "--auto-certificate-annotations=example.com/tls,kubernetes.io/tls-acme",
        "--renew-before-expiry-duration=48h",
        "--acme-http01-solver-image=example.com/solver:dev",
    ]);
    let options = &bound.options;

    assert_eq!(options.namespace, "team-a");
    assert!(!options.leader_elect);
    assert_eq!(options.leader_election_namespace, "cert-manager");
    assert_eq!(options.max_concurrent_challenges, 5);
    assert_eq!(options.default_issuer_name, "letsencrypt");
    assert_eq!(options.default_issuer_kind, "ClusterIssuer");
    assert_eq!(
        options.default_auto_certificate_annotations,
        vec!["example.com/tls", "kubernetes.io/tls-acme"]
    );
    assert_eq!(options.renew_before_expiry_duration, Duration::from_secs(48 * 3600));
    assert_eq!(options.acme_http01_solver_image, "example.com/solver:dev");

    let defaults = ControllerOptions::new();
    assert_eq!(options.cluster_resource_namespace, defaults.cluster_resource_namespace);
    assert_eq!(options.enabled_controllers, defaults.enabled_controllers);
}

#[test]
fn test_fractional_and_sub_second_durations() {
    let bound = parse(&[
        "--renew-before-expiry-duration=0.5h",
        "--leader-election-lease-duration=1m30.5s",
        "--leader-election-retry-period=500us",
    ]);

    assert_eq!(
        bound.options.renew_before_expiry_duration,
        Duration::from_secs(1800)
    );
    assert_eq!(
        bound.options.leader_election_lease_duration,
        Duration::from_millis(90_500)
    );
    assert_eq!(
        bound.options.leader_election_retry_period,
        Duration::from_micros(500)
    );
}

#[test]
fn test_explicit_empty_list_clears_default() {
    let bound = parse(&["--auto-certificate-annotations="]);
    assert!(bound.options.default_auto_certificate_annotations.is_empty());
}

#[test]
fn test_binding_does_not_validate() {
    let bound = parse(&["--default-issuer-kind=Role"]);
    assert_eq!(bound.options.default_issuer_kind, "Role");
    assert!(matches!(
        bound.options.validate(),
        Err(ConfigError::InvalidEnum { .. })
    ));
}

#[test]
fn test_malformed_values_fail_at_parse_time() {
    for arg in [
        "--max-concurrent-challenges=many",
        "--leader-election-lease-duration=15",
        "--leader-elect=perhaps",
        "--not-a-flag",
    ] {
        let result = flags::parse_from(["cert-manager-controller", arg]);
        assert!(
            matches!(result, Err(FlagError::Parse(_))),
            "'{arg}' should fail to parse"
        );
    }
}

#[test]
fn test_bound_flags_freeze_into_config() {
    let bound = parse(&[
        "--controllers=issuers,clusterissuers,certificates-issuing,issuers",
        "--dns01-recursive-nameservers-only",
        "--dns01-recursive-nameservers=8.8.8.8:53",
    ]);
    let config = bound.options.into_config().unwrap();

    assert_eq!(config.enabled_controllers().len(), 3);
    assert!(config.controller_enabled("issuers"));
    assert!(!config.controller_enabled("challenges"));
    assert!(config.dns01_self_check().nameservers_only);
    assert_eq!(config.dns01_self_check().nameservers, vec!["8.8.8.8:53"]);
}
