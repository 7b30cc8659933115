//! Session persistence and configuration files on disk.

use greenayu::utils::toml_config::{GreenAyuConfig, SessionConfig};
use greenayu::{open_store, FileStorage};
use greenayu_core::{AuthError, SessionStorage, SESSION_KEY};
use rstest::rstest;
use std::fs;
use tempfile::TempDir;

fn session_config(dir: &TempDir) -> SessionConfig {
    SessionConfig {
        path: dir.path().join("data").join("session.json"),
    }
}

#[tokio::test]
async fn login_survives_restart() {
    let dir = TempDir::new().unwrap();
    let config = session_config(&dir);

    let store = open_store(&config);
    assert!(!store.is_authenticated());
    store.login("  Demo@Agricultor.LK ", "Demo@123").await.unwrap();

    let reopened = open_store(&config);
    let session = reopened.current().expect("restored session");
    assert_eq!(session.name, "Demo User");
    assert_eq!(session.email, "demo@agricultor.lk");

    let raw = fs::read_to_string(&config.path).unwrap();
    let map: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let stored: serde_json::Value =
        serde_json::from_str(map[SESSION_KEY].as_str().unwrap()).unwrap();
    assert_eq!(
        stored,
        serde_json::json!({"name": "Demo User", "email": "demo@agricultor.lk"})
    );
}

#[tokio::test]
async fn logout_clears_disk_and_memory() {
    let dir = TempDir::new().unwrap();
    let config = session_config(&dir);
    let store = open_store(&config);
    store.login("demo@agricultor.lk", "Demo@123").await.unwrap();

    store.logout();

    assert!(!store.is_authenticated());
    assert!(!open_store(&config).is_authenticated());
}

#[rstest]
#[case("demo@agricultor.lk", "demo@123")]
#[case("demo@agricultor.lk", "")]
#[case("someone@agricultor.lk", "Demo@123")]
#[tokio::test]
async fn wrong_credentials_leave_storage_untouched(#[case] email: &str, #[case] password: &str) {
    let dir = TempDir::new().unwrap();
    let config = session_config(&dir);
    let store = open_store(&config);

    let err = store.login(email, password).await.unwrap_err();

    assert_eq!(
        err,
        AuthError::InvalidCredentials(
            "Invalid demo credentials. Try demo@agricultor.lk / Demo@123".to_string()
        )
    );
    assert!(!config.path.exists());
}

#[rstest]
#[case::garbage("this is not json")]
#[case::wrong_shape(r#"{"ap_user": "{\"name\": 42}"}"#)]
#[case::not_a_map("[1, 2, 3]")]
fn corrupt_session_reads_as_signed_out(#[case] content: &str) {
    let dir = TempDir::new().unwrap();
    let config = session_config(&dir);
    fs::create_dir_all(config.path.parent().unwrap()).unwrap();
    fs::write(&config.path, content).unwrap();

    assert!(open_store(&config).current().is_none());
}

#[tokio::test]
async fn login_repairs_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let config = session_config(&dir);
    fs::create_dir_all(config.path.parent().unwrap()).unwrap();
    fs::write(&config.path, "{{{").unwrap();

    open_store(&config)
        .login("demo@agricultor.lk", "Demo@123")
        .await
        .unwrap();

    assert!(open_store(&config).is_authenticated());
}

#[test]
fn file_storage_is_shared_between_handles() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    let a = FileStorage::new(&path);
    let b = FileStorage::new(&path);

    a.set("theme", "light").unwrap();

    assert_eq!(b.get("theme").unwrap().as_deref(), Some("light"));
}

#[test]
fn config_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("greenayu.toml");
    fs::write(
        &path,
        r#"
[backend]
base_url = "http://192.168.1.20:8000"

[guard]
preserve_destination = true
"#,
    )
    .unwrap();

    let config = GreenAyuConfig::load_file(&path).unwrap();

    assert_eq!(config.backend.base_url, "http://192.168.1.20:8000");
    assert_eq!(config.backend.timeout_secs, 30);
    assert!(config.guard.preserve_destination);
    assert!(config.validate().is_ok());
}

#[test]
fn invalid_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("greenayu.toml");
    fs::write(&path, "[backend]\nbase_url = \"localhost:8000\"\n").unwrap();

    let err = GreenAyuConfig::load(&path).unwrap_err();

    assert!(err.to_string().contains("base_url must start with http"));
}
