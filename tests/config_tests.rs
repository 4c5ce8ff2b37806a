//! Config loading from env, JSON files, and .env files.

use once_cell::sync::Lazy;
use std::sync::Mutex;
use tempfile::TempDir;
use walletcard::config::{load_dotenv, CardConfig, DEFAULT_EXPLORER_URL, ENV_EXPLORER_URL, ENV_TOAST_CAPACITY};
use walletcard::CardError;

static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

fn lock_env() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner())
}

fn clear_env() {
    std::env::remove_var(ENV_EXPLORER_URL);
    std::env::remove_var(ENV_TOAST_CAPACITY);
}

#[test]
fn env_overrides_defaults() {
    let _guard = lock_env();
    clear_env();
    assert_eq!(CardConfig::from_env().unwrap(), CardConfig::default());

    std::env::set_var(ENV_EXPLORER_URL, "https://blockstream.info");
    std::env::set_var(ENV_TOAST_CAPACITY, "4");
    let config = CardConfig::from_env().unwrap();
    assert_eq!(config.explorer_url, "https://blockstream.info");
    assert_eq!(config.toast_capacity, 4);
    clear_env();
}

#[test]
fn bad_capacity_is_config_error() {
    let _guard = lock_env();
    clear_env();
    std::env::set_var(ENV_TOAST_CAPACITY, "lots");
    assert!(matches!(CardConfig::from_env(), Err(CardError::Config(_))));

    for raw in ["0", "4097", "18446744073709551615"] {
        std::env::set_var(ENV_TOAST_CAPACITY, raw);
        assert!(matches!(CardConfig::from_env(), Err(CardError::Config(_))), "{} accepted", raw);
    }
    std::env::set_var(ENV_TOAST_CAPACITY, "4096");
    assert_eq!(CardConfig::from_env().unwrap().toast_capacity, 4096);
    clear_env();
}

#[test]
fn file_fills_missing_fields_with_defaults() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("card.json");
    std::fs::write(&path, r#"{"toast_capacity": 8}"#).unwrap();

    let config = CardConfig::from_file(&path).unwrap();
    assert_eq!(config.toast_capacity, 8);
    assert_eq!(config.explorer_url, DEFAULT_EXPLORER_URL);

    std::fs::write(&path, r#"{"toast_capacity": 1000000000}"#).unwrap();
    assert!(matches!(CardConfig::from_file(&path), Err(CardError::Config(_))));

    std::fs::write(&path, "not json").unwrap();
    assert!(matches!(CardConfig::from_file(&path), Err(CardError::Config(_))));
    assert!(matches!(CardConfig::from_file(&dir.path().join("missing.json")), Err(CardError::Config(_))));
}

#[test]
fn dotenv_does_not_override_existing_vars() {
    let _guard = lock_env();
    clear_env();
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join(".env");
    std::fs::write(
        &path,
        format!("# comment\n{}=\"https://from-dotenv.example\"\n{}=16\n", ENV_EXPLORER_URL, ENV_TOAST_CAPACITY),
    )
    .unwrap();
    std::env::set_var(ENV_TOAST_CAPACITY, "2");

    load_dotenv(&path);
    assert_eq!(std::env::var(ENV_EXPLORER_URL).unwrap(), "https://from-dotenv.example");
    assert_eq!(std::env::var(ENV_TOAST_CAPACITY).unwrap(), "2");
    clear_env();
}
