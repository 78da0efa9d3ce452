//! Secret validation for the license gate
//!
//! Compares the `GONKA_SECRET` value against the expected secret taken from
//! a key file or a constant embedded at build time. Failures are returned as
//! `LicenseError`; only the entry point turns them into process termination.

pub mod config;
pub mod error;
mod validator;

pub use config::{read_actual_secret, ExpectedSecret, DEFAULT_LICENSE_FILE, SECRET_ENV_VAR};
pub use error::{LicenseError, DIAGNOSTIC, LICENSE_EXIT_CODE};
pub use validator::validate;

#[cfg(test)]
#[path = "validator_test.rs"]
mod validator_tests;
