//! HTTP access for lyrics lookups.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::{Mutex, MutexGuard};

use super::LyricsError;

/// Connection timeout for remote lookups.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches a URL and returns the whole response body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<String, LyricsError>;
}

/// Transport backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, LyricsError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String, LyricsError> {
        let response = self.client.get(url).send().await?;
        tracing::debug!("GET {} -> {}", url, response.status());
        Ok(response.text().await?)
    }
}

/// Lock shared by every network client in the process.
///
/// Holders issue one request and release it right away, so outbound
/// requests are serialized.
#[derive(Debug, Clone, Default)]
pub struct NetworkGate {
    lock: Arc<Mutex<()>>,
}

impl NetworkGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;

    use super::*;

    /// Transport replaying a canned response and recording requested URLs.
    pub(crate) struct ScriptedTransport {
        response: Result<String, String>,
        delay: Duration,
        pub(crate) urls: StdMutex<Vec<String>>,
        pub(crate) calls: AtomicUsize,
    }

    impl ScriptedTransport {
        pub(crate) fn body(body: &str) -> Self {
            Self {
                response: Ok(body.to_string()),
                delay: Duration::ZERO,
                urls: StdMutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn failing(message: &str) -> Self {
            Self {
                response: Err(message.to_string()),
                ..Self::body("")
            }
        }

        pub(crate) fn delayed(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn get(&self, url: &str) -> Result<String, LyricsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.urls.lock().unwrap().push(url.to_string());
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.response.clone().map_err(LyricsError::Transport)
        }
    }

    #[tokio::test]
    async fn test_gate_serializes_holders() {
        let gate = NetworkGate::new();
        let other = gate.clone();

        let guard = gate.acquire().await;
        assert!(other.lock.try_lock().is_err());
        drop(guard);
        assert!(other.lock.try_lock().is_ok());
    }

    #[test]
    fn test_http_transport_builds() {
        assert!(HttpTransport::new().is_ok());
    }
}
