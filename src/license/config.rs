//! License gate configuration
//!
//! Environment variables:
//! - `GONKA_SECRET`: the actual secret under test
//! - `GONKA_LICENSE_MODE`: "file" (default) or "constant"
//! - `GONKA_LICENSE_FILE`: expected-secret file in file mode (default `/etc/vllm/license.key`)
//!
//! Constant mode compares against `GONKA_EMBEDDED_SECRET`, captured at build time.

use super::error::LicenseError;
use std::path::PathBuf;

/// Environment variable holding the actual secret
pub const SECRET_ENV_VAR: &str = "GONKA_SECRET";

/// Environment variable selecting the comparison policy
pub const MODE_ENV_VAR: &str = "GONKA_LICENSE_MODE";

/// Environment variable overriding the expected-secret file
pub const FILE_ENV_VAR: &str = "GONKA_LICENSE_FILE";

/// Expected-secret file written into the image at build time
pub const DEFAULT_LICENSE_FILE: &str = "/etc/vllm/license.key";

/// Secret baked into the binary for constant mode
pub const EMBEDDED_SECRET: Option<&str> = option_env!("GONKA_EMBEDDED_SECRET");

/// Where the expected secret comes from
///
/// Exactly one policy is active per deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectedSecret {
    /// Compare against the trimmed contents of a file.
    /// If the file does not exist, fall back to `AnyNonEmpty`.
    File(PathBuf),

    /// Compare against a fixed literal
    Constant(String),

    /// Accept any value that is non-empty after trimming
    AnyNonEmpty,
}

impl Default for ExpectedSecret {
    fn default() -> Self {
        ExpectedSecret::File(PathBuf::from(DEFAULT_LICENSE_FILE))
    }
}

impl ExpectedSecret {
    /// Resolve the policy from the process environment
    pub fn from_env() -> Result<Self, LicenseError> {
        let mode = std::env::var(MODE_ENV_VAR).ok();
        let file = std::env::var(FILE_ENV_VAR).ok();
        Self::resolve(mode.as_deref(), file.as_deref(), EMBEDDED_SECRET)
    }

    /// Resolve the policy from explicit inputs
    ///
    /// Unknown modes are rejected rather than defaulted.
    pub fn resolve(
        mode: Option<&str>,
        file: Option<&str>,
        embedded: Option<&str>,
    ) -> Result<Self, LicenseError> {
        match mode.map(str::trim).unwrap_or("file") {
            "" | "file" => {
                let path = file
                    .filter(|f| !f.trim().is_empty())
                    .unwrap_or(DEFAULT_LICENSE_FILE);
                Ok(ExpectedSecret::File(PathBuf::from(path)))
            }
            "constant" => match embedded {
                Some(secret) if !secret.trim().is_empty() => {
                    Ok(ExpectedSecret::Constant(secret.to_string()))
                }
                _ => Err(LicenseError::NotEmbedded),
            },
            other => Err(LicenseError::UnknownMode(other.to_string())),
        }
    }
}

/// Read the actual secret from the process environment
///
/// Unset and non-UTF-8 values both read as absent.
pub fn read_actual_secret() -> Option<String> {
    std::env::var(SECRET_ENV_VAR).ok()
}
