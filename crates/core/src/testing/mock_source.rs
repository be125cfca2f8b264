//! Mock ticket source for testing.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::source::{SourceError, TicketSource};
use crate::ticket::TicketId;

/// Mock implementation of the TicketSource trait.
///
/// Returns scripted results in order. Once the script runs out every fetch
/// fails with a non-transient error, which ends a poll loop under either
/// failure policy.
///
/// Fetch start times are recorded with tokio's clock so tests can run on a
/// paused runtime.
pub struct MockTicketSource {
    script: Arc<RwLock<VecDeque<Result<TicketId, SourceError>>>>,
    fetch_starts: Arc<RwLock<Vec<Instant>>>,
    latency: Arc<RwLock<Duration>>,
}

impl std::fmt::Debug for MockTicketSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTicketSource")
            .field("script", &"<script>")
            .field("fetch_starts", &"<fetch_starts>")
            .field("latency", &"<latency>")
            .finish()
    }
}

impl Default for MockTicketSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTicketSource {
    pub fn new() -> Self {
        Self {
            script: Arc::new(RwLock::new(VecDeque::new())),
            fetch_starts: Arc::new(RwLock::new(Vec::new())),
            latency: Arc::new(RwLock::new(Duration::ZERO)),
        }
    }

    /// Queue a successful fetch.
    pub async fn push_ticket(&self, ticket_id: impl Into<String>) {
        self.script
            .write()
            .await
            .push_back(Ok(TicketId::new(ticket_id)));
    }

    /// Queue a failed fetch.
    pub async fn push_error(&self, error: SourceError) {
        self.script.write().await.push_back(Err(error));
    }

    /// Simulated round-trip time applied to every fetch.
    pub async fn set_latency(&self, latency: Duration) {
        *self.latency.write().await = latency;
    }

    /// When each fetch started.
    pub async fn fetch_starts(&self) -> Vec<Instant> {
        self.fetch_starts.read().await.clone()
    }

    pub async fn fetch_count(&self) -> usize {
        self.fetch_starts.read().await.len()
    }
}

#[async_trait]
impl TicketSource for MockTicketSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self) -> Result<TicketId, SourceError> {
        self.fetch_starts.write().await.push(Instant::now());

        let latency = *self.latency.read().await;
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        self.script
            .write()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(SourceError::GraphQl("mock source exhausted".to_string())))
    }
}
