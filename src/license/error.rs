use std::path::PathBuf;
use thiserror::Error;

/// Exit status for every license failure
pub const LICENSE_EXIT_CODE: i32 = 1;

/// The single line shown to the user on any license failure
///
/// Every failure kind prints the same text so the output does not reveal
/// whether the secret was missing, wrong, or the key file was unreadable.
pub const DIAGNOSTIC: &str = "GONKA_SECRET value is wrong";

/// Fatal license check failure
///
/// Messages never include the expected or actual secret.
#[derive(Debug, Error)]
pub enum LicenseError {
    #[error("license key file {path} exists but could not be read: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("secret is missing or empty")]
    Missing,

    #[error("secret does not match the expected value")]
    Mismatch,

    #[error("constant mode selected but no secret was embedded at build time")]
    NotEmbedded,

    #[error("unknown license mode {0:?}, expected \"file\" or \"constant\"")]
    UnknownMode(String),
}

impl LicenseError {
    /// Process exit code the entry point should terminate with
    pub fn exit_code(&self) -> i32 {
        LICENSE_EXIT_CODE
    }

    /// User-facing diagnostic, identical for all variants
    pub fn diagnostic(&self) -> &'static str {
        DIAGNOSTIC
    }

    /// Short label for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            LicenseError::Unreadable { .. } => "unreadable",
            LicenseError::Missing => "missing",
            LicenseError::Mismatch => "mismatch",
            LicenseError::NotEmbedded => "not_embedded",
            LicenseError::UnknownMode(_) => "unknown_mode",
        }
    }
}
