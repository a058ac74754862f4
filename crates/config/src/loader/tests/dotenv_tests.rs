//! Tests for dotenv loading behavior.
//!
//! Responsibilities:
//! - Test the layered file precedence and the live environment on top.
//! - Test that missing `.env` files are silently ignored.
//! - Test that invalid `.env` files return errors without leaking secrets.
//! - Test that `DOTENV_DISABLED=1`/`true` skips dotenv loading.
//!
//! Invariants / Assumptions:
//! - Tests use `env_lock()` to prevent cross-test contamination.
//! - Files are read from an explicit directory; the cwd is never changed.
//! - Error messages must never contain secret values from `.env` files.

use std::fs;
use tempfile::TempDir;

use super::env_lock;
use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;

fn loader_for(dir: &TempDir, environment: &str) -> ConfigLoader {
    ConfigLoader::new()
        .with_env_dir(dir.path().to_path_buf())
        .with_environment(environment.to_string())
}

/// Run `f` with `DOTENV_DISABLED` set to `value` (or removed).
fn with_dotenv_disabled<R>(value: Option<&str>, f: impl FnOnce() -> R) -> R {
    let _lock = env_lock().lock().unwrap_or_else(|e| e.into_inner());
    temp_env::with_vars([("DOTENV_DISABLED", value)], f)
}

#[test]
fn test_missing_dotenv_is_ok() {
    let temp_dir = TempDir::new().unwrap();

    let result = with_dotenv_disabled(None, || loader_for(&temp_dir, "dev").load_dotenv());

    let loader = result.expect("missing .env files should be ignored");
    assert!(loader.raw().is_empty());
}

#[test]
fn test_environment_file_overrides_base_and_live_wins() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), "FOO=1\nBASE_ONLY=base\n").unwrap();
    fs::write(temp_dir.path().join(".env.dev"), "FOO=2\n").unwrap();

    let loader = with_dotenv_disabled(None, || loader_for(&temp_dir, "dev").load_dotenv())
        .unwrap();

    let raw = loader.raw();
    assert_eq!(raw.get("FOO"), Some("2"));
    assert_eq!(raw.get("BASE_ONLY"), Some("base"));

    let raw = loader.with_vars([("FOO", "3")]).raw();
    assert_eq!(raw.get("FOO"), Some("3"));
}

#[test]
fn test_local_files_take_precedence() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), "A=base\nB=base\nC=base\n").unwrap();
    fs::write(temp_dir.path().join(".env.prod"), "A=prod\nB=prod\nC=prod\n").unwrap();
    fs::write(temp_dir.path().join(".env.local"), "B=local\nC=local\n").unwrap();
    fs::write(temp_dir.path().join(".env.prod.local"), "C=prod-local\n").unwrap();

    let raw = with_dotenv_disabled(None, || loader_for(&temp_dir, "prod").load_dotenv())
        .unwrap()
        .raw();

    assert_eq!(raw.get("A"), Some("prod"));
    assert_eq!(raw.get("B"), Some("local"));
    assert_eq!(raw.get("C"), Some("prod-local"));
}

#[test]
fn test_other_environment_files_are_not_read() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env.prod"), "FOO=prod\n").unwrap();

    let raw = with_dotenv_disabled(None, || loader_for(&temp_dir, "dev").load_dotenv())
        .unwrap()
        .raw();

    assert_eq!(raw.get("FOO"), None);
}

#[test]
fn test_invalid_dotenv_returns_error_without_leaking_secrets() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".env"),
        "GOOD=1\nSECRET_TOKEN should-not-appear-in-errors\n",
    )
    .unwrap();

    let result = with_dotenv_disabled(None, || loader_for(&temp_dir, "dev").load_dotenv());

    match result {
        Err(err @ ConfigError::Parse { .. }) => {
            let message = err.to_string();
            assert!(message.contains(".env"), "error should name the file: {message}");
            assert!(message.contains("line 2"), "error should name the line: {message}");
            assert!(
                !message.contains("should-not-appear-in-errors"),
                "error leaked .env contents: {message}"
            );
            assert!(message.contains("DOTENV_DISABLED"));
        }
        Err(other) => panic!("expected Parse error, got {other}"),
        Ok(_) => panic!("expected error for invalid .env file, got Ok"),
    }
}

#[test]
fn test_dotenv_disabled_with_value_1() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), "INVALID_LINE_WITHOUT_EQUALS").unwrap();

    let result = with_dotenv_disabled(Some("1"), || loader_for(&temp_dir, "dev").load_dotenv());

    assert!(
        result.is_ok(),
        "DOTENV_DISABLED=1 should skip .env loading even if file is invalid"
    );
}

#[test]
fn test_dotenv_disabled_with_value_true() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), "INVALID_LINE_WITHOUT_EQUALS").unwrap();

    let result =
        with_dotenv_disabled(Some("true"), || loader_for(&temp_dir, "dev").load_dotenv());

    assert!(
        result.is_ok(),
        "DOTENV_DISABLED=true should skip .env loading even if file is invalid"
    );
}

#[test]
fn test_dotenv_disabled_other_values_not_disabled() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), "INVALID_LINE_WITHOUT_EQUALS").unwrap();

    let result =
        with_dotenv_disabled(Some("false"), || loader_for(&temp_dir, "dev").load_dotenv());

    match result {
        Err(ConfigError::Parse { line, .. }) => assert_eq!(line, 1),
        Err(other) => panic!("DOTENV_DISABLED=false should NOT disable dotenv loading, got {other}"),
        Ok(_) => panic!("DOTENV_DISABLED=false should NOT disable dotenv loading, got Ok"),
    }
}

#[cfg(unix)]
#[test]
fn test_dotenv_io_error_on_permission_denied() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let env_path = temp_dir.path().join(".env");
    fs::write(&env_path, "FOO=1\n").unwrap();

    let mut permissions = fs::metadata(&env_path).unwrap().permissions();
    permissions.set_mode(0o000);
    fs::set_permissions(&env_path, permissions).unwrap();

    let result = with_dotenv_disabled(None, || loader_for(&temp_dir, "dev").load_dotenv());

    let mut permissions = fs::metadata(&env_path).unwrap().permissions();
    permissions.set_mode(0o644);
    fs::set_permissions(&env_path, permissions).unwrap();

    match &result {
        Err(ConfigError::DotenvIo { path, kind }) => {
            assert_eq!(path, &env_path);
            assert!(
                matches!(
                    kind,
                    std::io::ErrorKind::PermissionDenied | std::io::ErrorKind::Other
                ),
                "Expected PermissionDenied or Other, got {:?}",
                kind
            );
        }
        Ok(_) => {
            // Running as root can still read the file.
        }
        Err(other) => panic!("Expected DotenvIo error, got {}", other),
    }
}
