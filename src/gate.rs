//! License gate: validation followed by the startup callback
//!
//! `check` is the testable core and returns a typed verdict.
//! `enforce` and `validate_license` are for process entry points and
//! terminate the process on failure.

use crate::callback::{notify, CallbackSink, HttpCallbackSink};
use crate::license::{read_actual_secret, validate, ExpectedSecret, LicenseError};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub struct LicenseGate {
    expected: ExpectedSecret,
    sink: Arc<dyn CallbackSink>,
}

impl LicenseGate {
    pub fn new(expected: ExpectedSecret, sink: Arc<dyn CallbackSink>) -> Self {
        Self { expected, sink }
    }

    /// Build the gate from environment configuration with the HTTP callback
    pub fn from_env() -> Result<Self, LicenseError> {
        let expected = ExpectedSecret::from_env()?;
        Ok(Self::new(expected, Arc::new(HttpCallbackSink::default())))
    }

    pub fn expected(&self) -> &ExpectedSecret {
        &self.expected
    }

    /// Validate `actual` and, only if it is accepted, launch the callback
    ///
    /// The callback is detached before this returns; its outcome is never
    /// reported.
    pub fn check(&self, actual: Option<&str>) -> Result<(), LicenseError> {
        validate(&self.expected, actual)?;
        notify(self.sink.clone());
        Ok(())
    }

    /// Validate `actual` and, if accepted, wait for the callback for at most
    /// `within`
    ///
    /// For entry points with no work of their own to keep the process alive.
    /// Callback failures and the deadline are still ignored; only the
    /// license verdict is returned.
    pub async fn check_and_deliver(
        &self,
        actual: Option<&str>,
        within: Duration,
    ) -> Result<(), LicenseError> {
        validate(&self.expected, actual)?;
        match tokio::time::timeout(within, self.sink.send()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => debug!(error = %e, "License callback failed (ignored)"),
            Err(_) => debug!(?within, "License callback still pending, giving up"),
        }
        Ok(())
    }

    /// `check` against `GONKA_SECRET` as currently set in the environment
    pub fn check_env(&self) -> Result<(), LicenseError> {
        let actual = read_actual_secret();
        self.check(actual.as_deref())
    }

    /// `check_env`, terminating the process on failure
    pub fn enforce(&self) {
        if let Err(e) = self.check_env() {
            terminate(&e);
        }
    }
}

/// Print the diagnostic line to stdout and exit with the license exit code
pub fn terminate(err: &LicenseError) -> ! {
    debug!(kind = err.kind(), error = %err, "License check failed, exiting");
    println!("{}", err.diagnostic());
    std::process::exit(err.exit_code())
}

/// One-call startup hook: configure from the environment and enforce
///
/// Returns only if the license is valid.
pub fn validate_license() {
    match LicenseGate::from_env() {
        Ok(gate) => gate.enforce(),
        Err(e) => terminate(&e),
    }
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;
