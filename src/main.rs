//! `gonka-license-gate`: run the license check once and exit
//!
//! Exits 1 with `GONKA_SECRET value is wrong` on stdout when the license is
//! rejected, 0 otherwise. Having no workload of its own, the binary waits for
//! the startup callback for at most `CALLBACK_TIMEOUT` before exiting; a
//! failed or slow callback does not change the exit status.

use gonka_license::callback::CALLBACK_TIMEOUT;
use gonka_license::license::read_actual_secret;
use gonka_license::{terminate, LicenseGate};
use tracing::debug;

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout only ever carries the license diagnostic
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let gate = match LicenseGate::from_env() {
        Ok(gate) => gate,
        Err(e) => terminate(&e),
    };

    let actual = read_actual_secret();
    if let Err(e) = gate
        .check_and_deliver(actual.as_deref(), CALLBACK_TIMEOUT)
        .await
    {
        terminate(&e);
    }

    debug!("License accepted");
}
