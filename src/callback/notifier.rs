//! Fire-and-forget delivery of the startup callback

use super::sink::CallbackSink;
use std::sync::Arc;
use tracing::debug;

/// Launch the callback in the background and return immediately
///
/// Exactly one detached unit is started and no handle is kept:
/// - inside a Tokio runtime: a spawned task on the current runtime
/// - outside any runtime: a named OS thread driving a single-threaded runtime
///
/// Neither keeps the process alive at exit. Every failure is discarded,
/// including failure to start the background unit. The sink bounds the
/// request with its own timeout, so the unit always terminates.
pub fn notify(sink: Arc<dyn CallbackSink>) {
    let task = async move {
        if let Err(e) = sink.send().await {
            debug!(error = %e, "License callback failed (ignored)");
        }
    };

    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            // Dropping the JoinHandle detaches the task
            drop(handle.spawn(task));
        }
        Err(_) => {
            let spawned = std::thread::Builder::new()
                .name("license-callback".to_string())
                .spawn(move || {
                    match tokio::runtime::Builder::new_current_thread()
                        .enable_all()
                        .build()
                    {
                        Ok(runtime) => runtime.block_on(task),
                        Err(e) => debug!(error = %e, "Callback runtime unavailable (ignored)"),
                    }
                });
            if let Err(e) = spawned {
                debug!(error = %e, "Callback thread not started (ignored)");
            }
        }
    }
}
