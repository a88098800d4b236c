//! # CLI Tests
//!
//! Exit codes and output of the controller binary.

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cert-manager-controller"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run cert-manager-controller")
}

#[test]
fn test_defaults_exit_successfully() {
    let output = run(&[]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_invalid_issuer_kind_exits_non_zero() {
    let output = run(&["--default-issuer-kind=Role"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("default-issuer-kind"), "stderr: {stderr}");
    assert!(stderr.contains("Role"), "stderr: {stderr}");
}

#[test]
fn test_missing_keystore_password_exits_non_zero() {
    let output = run(&["--experimental-issue-pkcs12"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("experimental-pkcs12-keystore-password"),
        "stderr: {stderr}"
    );
}

#[test]
fn test_deprecated_flag_logs_warning() {
    let output = run(&["--dns01-self-check-nameservers=1.1.1.1:53"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("deprecated"), "stdout: {stdout}");
}

#[test]
fn test_environment_variables_bind_flags() {
    let output = Command::new(env!("CARGO_BIN_EXE_cert-manager-controller"))
        .env_remove("RUST_LOG")
        .env("CERT_MANAGER_DEFAULT_ISSUER_KIND", "Role")
        .output()
        .expect("failed to run cert-manager-controller");
    assert!(!output.status.success());

    let output = Command::new(env!("CARGO_BIN_EXE_cert-manager-controller"))
        .args(["--default-issuer-kind=ClusterIssuer"])
        .env_remove("RUST_LOG")
        .env("CERT_MANAGER_DEFAULT_ISSUER_KIND", "Role")
        .output()
        .expect("failed to run cert-manager-controller");
    assert!(output.status.success(), "command line should win over environment");
}

#[test]
fn test_malformed_rust_log_exits_non_zero() {
    let output = Command::new(env!("CARGO_BIN_EXE_cert-manager-controller"))
        .env("RUST_LOG", "cert_manager_controller=loud")
        .output()
        .expect("failed to run cert-manager-controller");
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("RUST_LOG"), "stderr: {stderr}");
}

#[test]
fn test_json_log_format() {
    let output = run(&["--log-format=json"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first = stdout.lines().next().expect("no log output");
    let line: serde_json::Value = serde_json::from_str(first).unwrap();
    assert_eq!(line["level"], "INFO");
}

#[test]
fn test_version_flag() {
    let output = run(&["--version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("cert-manager-controller"));
}
