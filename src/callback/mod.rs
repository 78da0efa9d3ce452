//! Startup callback to the license server
//!
//! Sent once after the license check passes. Advisory only: the result is
//! never observed and never affects startup.

mod notifier;
pub mod sink;

pub use notifier::notify;
pub use sink::{CallbackSink, HttpCallbackSink, NotifyError, CALLBACK_TIMEOUT, CALLBACK_URL};

#[cfg(test)]
pub use sink::MockCallbackSink;

#[cfg(test)]
#[path = "notifier_test.rs"]
mod notifier_tests;
