use super::config::ExpectedSecret;
use super::error::LicenseError;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Validate the actual secret against the expected-secret policy
///
/// Pure apart from reading the key file in file mode. The caller supplies
/// the actual secret (normally `GONKA_SECRET`) so the check is deterministic
/// and can be exercised without touching the process environment.
///
/// # Rules
/// - Unset, empty and whitespace-only actual secrets are rejected under
///   every policy
/// - File mode compares against the trimmed file contents; the actual
///   secret is compared as-is
/// - File mode with no file present accepts any non-whitespace value
/// - A key file that exists but cannot be read is fatal
///
/// # Returns
/// * `Ok(())` - License accepted
/// * `Err(LicenseError)` - The caller must terminate with `exit_code()`
pub fn validate(expected: &ExpectedSecret, actual: Option<&str>) -> Result<(), LicenseError> {
    let actual = actual.unwrap_or("");

    match expected {
        ExpectedSecret::File(path) => match read_expected_file(path)? {
            Some(secret) => compare(&secret, actual),
            None => require_non_empty(actual),
        },
        ExpectedSecret::Constant(secret) => compare(secret, actual),
        ExpectedSecret::AnyNonEmpty => require_non_empty(actual),
    }
}

/// Read and trim the expected-secret file
///
/// Returns `Ok(None)` when the file does not exist.
fn read_expected_file(path: &Path) -> Result<Option<String>, LicenseError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents.trim().to_string())),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "No license key file, accepting any non-empty secret");
            Ok(None)
        }
        Err(source) => Err(LicenseError::Unreadable {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn compare(expected: &str, actual: &str) -> Result<(), LicenseError> {
    if actual.trim().is_empty() || expected.trim().is_empty() {
        // A blank expected value would otherwise admit a blank variable
        return Err(LicenseError::Missing);
    }
    if actual != expected {
        return Err(LicenseError::Mismatch);
    }
    Ok(())
}

fn require_non_empty(actual: &str) -> Result<(), LicenseError> {
    if actual.trim().is_empty() {
        return Err(LicenseError::Missing);
    }
    Ok(())
}
