//! Tests for secret validation

use super::config::ExpectedSecret;
use super::error::{LicenseError, DIAGNOSTIC, LICENSE_EXIT_CODE};
use super::validator::validate;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn key_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp key file");
    file.write_all(contents.as_bytes())
        .expect("write temp key file");
    file
}

fn file_policy(file: &NamedTempFile) -> ExpectedSecret {
    ExpectedSecret::File(file.path().to_path_buf())
}

/// File contains "abc123\n", environment "abc123" -> accepted
#[test]
fn test_file_mode_trims_expected_secret() {
    let file = key_file("abc123\n");

    assert!(validate(&file_policy(&file), Some("abc123")).is_ok());
}

/// File contains "abc123", environment "wrong" -> exit code 1
#[test]
fn test_file_mode_rejects_wrong_secret() {
    let file = key_file("abc123");

    let err = validate(&file_policy(&file), Some("wrong")).unwrap_err();
    assert!(matches!(err, LicenseError::Mismatch));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(err.diagnostic(), "GONKA_SECRET value is wrong");
}

#[test]
fn test_file_mode_does_not_trim_actual_secret() {
    let file = key_file("abc123");

    let result = validate(&file_policy(&file), Some(" abc123 "));
    assert!(matches!(result, Err(LicenseError::Mismatch)));
}

#[test]
fn test_file_mode_is_case_sensitive() {
    let file = key_file("AbC123");

    assert!(matches!(
        validate(&file_policy(&file), Some("abc123")),
        Err(LicenseError::Mismatch)
    ));
}

#[test]
fn test_file_mode_rejects_unset_secret() {
    let file = key_file("abc123");

    assert!(matches!(
        validate(&file_policy(&file), None),
        Err(LicenseError::Missing)
    ));
}

#[test]
fn test_file_mode_empty_key_file_never_matches() {
    let file = key_file("  \n");

    assert!(validate(&file_policy(&file), None).is_err());
    assert!(validate(&file_policy(&file), Some("")).is_err());
}

/// No key file present, environment "" -> exit code 1
#[test]
fn test_missing_file_rejects_empty_secret() {
    let dir = TempDir::new().expect("create temp dir");
    let policy = ExpectedSecret::File(dir.path().join("license.key"));

    let err = validate(&policy, Some("")).unwrap_err();
    assert!(matches!(err, LicenseError::Missing));
    assert_eq!(err.exit_code(), LICENSE_EXIT_CODE);
}

#[test]
fn test_missing_file_accepts_any_non_empty_secret() {
    let dir = TempDir::new().expect("create temp dir");
    let policy = ExpectedSecret::File(dir.path().join("license.key"));

    assert!(validate(&policy, Some("anything")).is_ok());
    assert!(validate(&policy, Some(" padded ")).is_ok());
}

#[test]
fn test_missing_file_rejects_whitespace_and_unset() {
    let dir = TempDir::new().expect("create temp dir");
    let policy = ExpectedSecret::File(dir.path().join("license.key"));

    assert!(matches!(
        validate(&policy, Some(" \t\n")),
        Err(LicenseError::Missing)
    ));
    assert!(matches!(validate(&policy, None), Err(LicenseError::Missing)));
}

/// A path that exists but is not a readable file fails closed
#[test]
fn test_unreadable_key_file_is_fatal() {
    let dir = TempDir::new().expect("create temp dir");
    let policy = ExpectedSecret::File(dir.path().to_path_buf());

    let err = validate(&policy, Some("abc123")).unwrap_err();
    match &err {
        LicenseError::Unreadable { path, .. } => assert_eq!(path, &dir.path().to_path_buf()),
        other => panic!("expected Unreadable, got {:?}", other),
    }
    assert_eq!(err.exit_code(), 1);
    assert_eq!(err.diagnostic(), DIAGNOSTIC);
}

#[test]
fn test_non_utf8_key_file_is_fatal() {
    let mut file = NamedTempFile::new().expect("create temp key file");
    file.write_all(&[0xff, 0xfe, 0xfd]).expect("write bytes");

    assert!(matches!(
        validate(&file_policy(&file), Some("abc123")),
        Err(LicenseError::Unreadable { .. })
    ));
}

/// Environment exactly equals the constant -> accepted
#[test]
fn test_constant_mode_accepts_exact_match() {
    let policy = ExpectedSecret::Constant("gonka-2024".to_string());

    assert!(validate(&policy, Some("gonka-2024")).is_ok());
}

#[test]
fn test_constant_mode_rejects_everything_else() {
    let policy = ExpectedSecret::Constant("gonka-2024".to_string());

    for actual in [Some("gonka-2025"), Some("GONKA-2024"), Some("gonka-2024\n"), Some(""), None] {
        let result = validate(&policy, actual);
        assert!(result.is_err(), "{:?} should be rejected", actual);
        assert_eq!(result.unwrap_err().exit_code(), 1);
    }
}

#[test]
fn test_empty_constant_never_matches() {
    let policy = ExpectedSecret::Constant(String::new());

    assert!(validate(&policy, Some("")).is_err());
    assert!(validate(&policy, None).is_err());

    let policy = ExpectedSecret::Constant("   ".to_string());
    assert!(matches!(
        validate(&policy, Some("   ")),
        Err(LicenseError::Missing)
    ));
    assert!(validate(&policy, None).is_err());
}

/// Whitespace-only secrets are rejected even when they equal the expected value
#[test]
fn test_whitespace_secret_rejected_under_every_policy() {
    let file = key_file("abc123");
    let constant = ExpectedSecret::Constant("abc123".to_string());

    for actual in [" ", "\t", " \n "] {
        assert!(validate(&file_policy(&file), Some(actual)).is_err());
        assert!(validate(&constant, Some(actual)).is_err());
        assert!(validate(&ExpectedSecret::AnyNonEmpty, Some(actual)).is_err());
    }
}

#[test]
fn test_any_non_empty_policy() {
    assert!(validate(&ExpectedSecret::AnyNonEmpty, Some("x")).is_ok());
    assert!(validate(&ExpectedSecret::AnyNonEmpty, Some("   ")).is_err());
    assert!(validate(&ExpectedSecret::AnyNonEmpty, None).is_err());
}

/// Matching secrets are accepted under every policy that has an expected value
#[test]
fn test_equal_secrets_accepted_for_each_policy() {
    for secret in ["a", "abc123", "with space", "ünïcödé", "0"] {
        let file = key_file(secret);
        assert!(validate(&file_policy(&file), Some(secret)).is_ok());
        assert!(validate(&ExpectedSecret::Constant(secret.to_string()), Some(secret)).is_ok());
    }
}

#[test]
fn test_validation_is_idempotent() {
    let file = key_file("abc123");
    let policy = file_policy(&file);

    for _ in 0..5 {
        assert!(validate(&policy, Some("abc123")).is_ok());
        assert!(matches!(
            validate(&policy, Some("nope")),
            Err(LicenseError::Mismatch)
        ));
    }
}

#[test]
fn test_error_messages_do_not_leak_secrets() {
    let file = key_file("expected-value");

    let err = validate(&file_policy(&file), Some("actual-value")).unwrap_err();
    let message = err.to_string();
    assert!(!message.contains("expected-value"));
    assert!(!message.contains("actual-value"));
}

/// Counts every event that reaches the subscriber
struct EventCounter(std::sync::Arc<std::sync::atomic::AtomicUsize>);

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCounter {
    fn on_event(&self, _event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}

/// Rejections are reported once, by the entry point, not by the validator
#[test]
fn test_rejection_is_not_logged_by_validator() {
    use tracing_subscriber::layer::SubscriberExt;

    let events = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(EventCounter(events.clone()));
    let file = key_file("abc123");

    tracing::subscriber::with_default(subscriber, || {
        assert!(validate(&file_policy(&file), Some("wrong")).is_err());
        assert!(validate(&ExpectedSecret::Constant("abc123".to_string()), None).is_err());
        assert!(validate(&ExpectedSecret::AnyNonEmpty, Some(" ")).is_err());
    });

    assert_eq!(events.load(std::sync::atomic::Ordering::SeqCst), 0);
}
