//! In-memory ticket sink for testing.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::sink::{SinkError, TicketSink};
use crate::ticket::TicketId;

/// Records every write instead of touching the filesystem.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    writes: Arc<RwLock<Vec<TicketId>>>,
    fail_next: Arc<RwLock<bool>>,
    write_latency: Arc<RwLock<Duration>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next write fail with a permission error.
    pub async fn fail_next_write(&self) {
        *self.fail_next.write().await = true;
    }

    /// Simulated time each write takes before it lands.
    pub async fn set_write_latency(&self, latency: Duration) {
        *self.write_latency.write().await = latency;
    }

    /// Every successful write, oldest first.
    pub async fn writes(&self) -> Vec<TicketId> {
        self.writes.read().await.clone()
    }

    /// The value a file sink would currently hold.
    pub async fn current(&self) -> Option<TicketId> {
        self.writes.read().await.last().cloned()
    }
}

#[async_trait]
impl TicketSink for MemorySink {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    async fn write(&self, ticket: &TicketId) -> Result<(), SinkError> {
        let mut fail_next = self.fail_next.write().await;
        if *fail_next {
            *fail_next = false;
            return Err(SinkError::Io {
                path: "memory".into(),
                source: std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "simulated write failure",
                ),
            });
        }

        drop(fail_next);

        let latency = *self.write_latency.read().await;
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        self.writes.write().await.push(ticket.clone());
        Ok(())
    }
}
