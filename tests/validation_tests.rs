//! # Validation Tests
//!
//! End-to-end checks of `ControllerOptions::validate` and `into_config`.

use std::time::Duration;

use cert_manager_controller::config::validation::EndpointError;
use cert_manager_controller::config::{ConfigError, ControllerOptions, IssuerKind, KeystorePassword};

#[test]
fn test_defaults_validate() {
    let options = ControllerOptions::new();
    assert!(options.validate().is_ok());

    let config = options.into_config().unwrap();
    assert_eq!(config.ingress_shim().default_issuer_kind, IssuerKind::Issuer);
    assert_eq!(config.renew_before_expiry(), Duration::from_secs(30 * 24 * 3600));
}

#[test]
fn test_unknown_issuer_kind_is_rejected() {
    let mut options = ControllerOptions::new();
    options.default_issuer_kind = "Role".to_string();

    match options.validate() {
        Err(ConfigError::InvalidEnum { field, value, .. }) => {
            assert_eq!(field, "default-issuer-kind");
            assert_eq!(value, "Role");
        }
        other => panic!("Expected InvalidEnum, got {other:?}"),
    }
}

#[test]
fn test_every_kind_outside_the_allowed_set_is_rejected() {
    for kind in ["", "issuer", "CLUSTERISSUER", "Issuer ", "ClusterRole", "cert-manager.io/Issuer"] {
        let mut options = ControllerOptions::new();
        options.default_issuer_kind = kind.to_string();
        assert!(
            matches!(options.validate(), Err(ConfigError::InvalidEnum { .. })),
            "Kind '{kind}' should be rejected"
        );
    }

    let mut options = ControllerOptions::new();
    options.default_issuer_kind = "ClusterIssuer".to_string();
    assert!(options.validate().is_ok());
}

#[test]
fn test_well_formed_nameservers_are_accepted() {
    let mut options = ControllerOptions::new();
    options.dns01_recursive_nameservers = vec![
        "8.8.8.8:53".to_string(),
        "[2001:4860:4860::8888]:53".to_string(),
        "dns.example.com:5353".to_string(),
    ];
    assert!(options.validate().is_ok());
}

#[test]
fn test_nameserver_without_port_is_rejected() {
    let mut options = ControllerOptions::new();
    options.dns01_recursive_nameservers = vec!["8.8.8.8".to_string()];

    match options.validate() {
        Err(ConfigError::InvalidEndpoint { value, source }) => {
            assert_eq!(value, "8.8.8.8");
            assert_eq!(source, EndpointError::MissingPort);
        }
        other => panic!("Expected InvalidEndpoint, got {other:?}"),
    }
}

#[test]
fn test_first_bad_nameserver_is_reported() {
    let mut options = ControllerOptions::new();
    options.dns01_recursive_nameservers = vec!["8.8.8.8:53".to_string(), "bad-entry".to_string()];

    let err = options.validate().unwrap_err();
    assert!(matches!(
        &err,
        ConfigError::InvalidEndpoint { value, .. } if value == "bad-entry"
    ));
    assert!(err.to_string().contains("bad-entry"));
}

#[test]
fn test_pkcs12_requires_password() {
    let mut options = ControllerOptions::new();
    options.experimental_issue_pkcs12 = true;

    match options.clone().validate() {
        Err(ConfigError::MissingDependentOption { toggle, requires }) => {
            assert_eq!(toggle, "experimental-issue-pkcs12");
            assert_eq!(requires, "experimental-pkcs12-keystore-password");
        }
        other => panic!("Expected MissingDependentOption, got {other:?}"),
    }

    options.experimental_pkcs12_keystore_password = KeystorePassword::from("s3cr3t");
    let config = options.into_config().unwrap();
    assert!(config.keystores().pkcs12_enabled());
    assert_eq!(
        config.keystores().pkcs12_password.as_ref().map(KeystorePassword::expose),
        Some("s3cr3t")
    );
}

#[test]
fn test_jks_requires_password() {
    let mut options = ControllerOptions::new();
    options.experimental_issue_jks = true;
    assert!(matches!(
        options.validate(),
        Err(ConfigError::MissingDependentOption {
            toggle: "experimental-issue-jks",
            ..
        })
    ));

    options.experimental_jks_password = KeystorePassword::from("changeit");
    assert!(options.validate().is_ok());
}

#[test]
fn test_password_without_toggle_is_not_kept() {
    let mut options = ControllerOptions::new();
    options.experimental_pkcs12_keystore_password = KeystorePassword::from("unused");

    let config = options.into_config().unwrap();
    assert!(!config.keystores().pkcs12_enabled());
    assert!(config.keystores().pkcs12_password.is_none());
}

#[test]
fn test_invalid_solver_quantity_is_rejected() {
    let mut options = ControllerOptions::new();
    options.acme_http01_solver_resource_limits_memory = "lots".to_string();

    assert!(matches!(
        options.validate(),
        Err(ConfigError::InvalidQuantity {
            field: "acme-http01-solver-resource-limits-memory",
            ..
        })
    ));
}

#[test]
fn test_zero_max_concurrent_challenges_is_rejected() {
    let mut options = ControllerOptions::new();
    options.max_concurrent_challenges = 0;

    assert!(matches!(
        options.validate(),
        Err(ConfigError::InvalidValue {
            field: "max-concurrent-challenges",
            ..
        })
    ));
}

#[test]
fn test_empty_cluster_resource_namespace_is_rejected() {
    let mut options = ControllerOptions::new();
    options.cluster_resource_namespace = String::new();

    assert!(matches!(
        options.validate(),
        Err(ConfigError::InvalidValue {
            field: "cluster-resource-namespace",
            ..
        })
    ));
}

#[test]
fn test_namespace_scope_disables_cluster_issuers() {
    let mut options = ControllerOptions::new();
    options.namespace = "team-a".to_string();

    let config = options.into_config().unwrap();
    assert_eq!(config.scope().namespace.as_deref(), Some("team-a"));
    assert!(!config.scope().cluster_issuers_enabled());
}

#[test]
fn test_error_messages_name_the_flag() {
    let mut options = ControllerOptions::new();
    options.leader_election_retry_period = Duration::from_secs(45);

    let message = options.validate().unwrap_err().to_string();
    assert!(message.contains("--leader-election-retry-period"), "{message}");
    assert!(message.contains("45s"), "{message}");
    assert!(message.contains("40s"), "{message}");
}

#[test]
fn test_default_factory_is_idempotent() {
    let first = ControllerOptions::new();
    let second = ControllerOptions::new();
    assert_eq!(first, second);
    assert_eq!(first.into_config().unwrap(), second.into_config().unwrap());
}
