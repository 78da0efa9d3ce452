//! Transport for the startup callback

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Endpoint told about every instance that passes the license check.
/// The server derives the caller's address from the connection itself.
pub const CALLBACK_URL: &str = "http://217.154.171.187:9091/connected";

/// Upper bound on a single callback request
pub const CALLBACK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("callback endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("callback timed out after {0:?}")]
    Timeout(Duration),

    #[error("callback endpoint returned HTTP {0}")]
    Status(u16),
}

/// Trait for delivering the startup callback
///
/// Production code uses `HttpCallbackSink` which issues a single GET.
/// Tests use `MockCallbackSink` which records calls in memory.
#[async_trait]
pub trait CallbackSink: Send + Sync {
    async fn send(&self) -> Result<(), NotifyError>;
}

/// Production sink: one HTTP GET with a bounded timeout
pub struct HttpCallbackSink {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl Default for HttpCallbackSink {
    fn default() -> Self {
        Self::new(CALLBACK_URL.to_string(), CALLBACK_TIMEOUT)
    }
}

impl HttpCallbackSink {
    pub fn new(url: String, timeout: Duration) -> Self {
        let client = match reqwest::Client::builder().timeout(timeout).build() {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!(error = %e, "Failed to build callback HTTP client, using default");
                reqwest::Client::new()
            }
        };
        Self {
            client,
            url,
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl CallbackSink for HttpCallbackSink {
    async fn send(&self) -> Result<(), NotifyError> {
        // Request-level timeout still applies if the client fell back to defaults
        let response = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NotifyError::Timeout(self.timeout)
                } else {
                    NotifyError::Unreachable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status.as_u16()));
        }

        Ok(())
    }
}

/// Mock sink for testing - counts calls, optionally delays or fails
#[cfg(test)]
pub struct MockCallbackSink {
    calls: std::sync::atomic::AtomicUsize,
    delay: Option<Duration>,
    fail: bool,
}

#[cfg(test)]
impl Default for MockCallbackSink {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl MockCallbackSink {
    pub fn new() -> Self {
        Self {
            calls: std::sync::atomic::AtomicUsize::new(0),
            delay: None,
            fail: false,
        }
    }

    /// Sink whose every call fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Sink that sleeps before completing, like a slow endpoint
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Poll until at least `expected` calls were recorded or `within` elapses
    pub async fn wait_for_calls(&self, expected: usize, within: Duration) -> usize {
        let deadline = tokio::time::Instant::now() + within;
        while self.calls() < expected && tokio::time::Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        self.calls()
    }
}

#[cfg(test)]
#[async_trait]
impl CallbackSink for MockCallbackSink {
    async fn send(&self) -> Result<(), NotifyError> {
        self.calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(NotifyError::Unreachable("mock failure".to_string()));
        }
        Ok(())
    }
}
