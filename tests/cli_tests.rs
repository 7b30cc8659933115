//! CLI Integration Tests for GreenAyu
//!
//! Every test runs the binary inside its own temp directory, so the default
//! `greenayu.toml` and `./data/session.json` paths stay isolated.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn greenayu(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("greenayu").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("GREENAYU_BASE_URL")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

fn login(dir: &TempDir) {
    greenayu(dir).arg("login").assert().success();
}

// =============================================================================
// Help and Version
// =============================================================================

#[test]
fn test_help_command() {
    let dir = TempDir::new().unwrap();
    greenayu(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("GreenAyu"))
        .stdout(predicate::str::contains("identify"))
        .stdout(predicate::str::contains("shelf-life"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_version_command() {
    let dir = TempDir::new().unwrap();
    greenayu(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("greenayu"));
}

// =============================================================================
// Init and Config
// =============================================================================

#[test]
fn test_init_creates_files() {
    let dir = TempDir::new().unwrap();

    greenayu(&dir)
        .args(["init", "--backend-url", "http://10.0.0.9:8000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("greenayu.toml"));

    let toml = fs::read_to_string(dir.path().join("greenayu.toml")).unwrap();
    assert!(toml.contains("http://10.0.0.9:8000"));
    assert!(dir.path().join(".env.example").exists());
    assert!(dir.path().join("data").is_dir());

    greenayu(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_config_validate_defaults() {
    let dir = TempDir::new().unwrap();
    greenayu(&dir)
        .args(["config", "--validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_config_rejects_bad_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("greenayu.toml"), "[backend]\ntimeout_secs = 0\n").unwrap();

    greenayu(&dir)
        .args(["config", "--validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout_secs must be greater than 0"));
}

#[test]
fn test_env_overrides_base_url() {
    let dir = TempDir::new().unwrap();
    greenayu(&dir)
        .env("GREENAYU_BASE_URL", "https://api.example.lk")
        .args(["config", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://api.example.lk"));
}

// =============================================================================
// Sessions
// =============================================================================

#[test]
fn test_login_whoami_logout() {
    let dir = TempDir::new().unwrap();

    greenayu(&dir)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in"));

    greenayu(&dir)
        .arg("login")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as Demo User"));

    greenayu(&dir)
        .args(["whoami", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("demo@agricultor.lk"));

    greenayu(&dir)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out"));

    greenayu(&dir)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in"));
}

#[test]
fn test_login_with_wrong_password() {
    let dir = TempDir::new().unwrap();
    greenayu(&dir)
        .args(["login", "--password", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Invalid demo credentials. Try demo@agricultor.lk / Demo@123",
        ));
    assert!(!dir.path().join("data/session.json").exists());
}

// =============================================================================
// Route guard
// =============================================================================

#[test]
fn test_route_redirects_without_session() {
    let dir = TempDir::new().unwrap();
    greenayu(&dir)
        .args(["route", "/features/yield"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Redirects to /login"));

    login(&dir);

    greenayu(&dir)
        .args(["route", "/features/yield"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Access allowed"));
}

#[test]
fn test_route_list_json() {
    let dir = TempDir::new().unwrap();
    greenayu(&dir)
        .args(["route", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/features/parts-quality"));
}

#[test]
fn test_feature_requires_sign_in() {
    let dir = TempDir::new().unwrap();
    greenayu(&dir)
        .arg("shelf-life")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Sign in required"));
}

// =============================================================================
// Features against a mocked backend
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_shelf_life_command() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shelf-life"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"shelf_life_days": 12.4})))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    login(&dir);

    greenayu(&dir)
        .env("GREENAYU_BASE_URL", server.uri())
        .args(["shelf-life", "--storage", "refrigerated"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12.4 days"))
        .stdout(predicate::str::contains("Low"))
        .stdout(predicate::str::contains("0°C - 8°C"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_parts_command_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/plant-part"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"plant_part": "root", "confidence": 0.7})),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("root.jpg"), b"jpeg").unwrap();
    login(&dir);

    greenayu(&dir)
        .env("GREENAYU_BASE_URL", server.uri())
        .args(["parts", "root.jpg", "--part", "root", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""detected_part": "root""#))
        .stdout(predicate::str::contains(r#""confidence": 70"#));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_backend_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/fertilizer"))
        .respond_with(ResponseTemplate::new(422).set_body_string("Unknown crop"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    login(&dir);

    greenayu(&dir)
        .env("GREENAYU_BASE_URL", server.uri())
        .arg("fertilizer")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown crop"));
}

#[test]
fn test_identify_rejects_text_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("notes.txt"), "hello").unwrap();
    login(&dir);

    greenayu(&dir)
        .args(["identify", "notes.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file type"));
}
