//! Types for the ticket poller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sink::SinkError;
use crate::source::SourceError;
use crate::ticket::TicketId;

/// Errors that end a poll cycle.
#[derive(Debug, Error)]
pub enum PollerError {
    /// Fetching the ticket failed.
    #[error("fetch failed: {0}")]
    Source(#[from] SourceError),

    /// Writing the ticket failed.
    #[error("write failed: {0}")]
    Sink(#[from] SinkError),

    /// `run` was called while the loop was already running.
    #[error("poller is already running")]
    AlreadyRunning,
}

impl PollerError {
    /// Whether the `retry` policy should keep polling after this error.
    pub fn is_transient(&self) -> bool {
        match self {
            PollerError::Source(e) => e.is_transient(),
            PollerError::Sink(_) | PollerError::AlreadyRunning => false,
        }
    }
}

/// Snapshot of the poller's state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PollerStatus {
    /// Whether the poll loop is running.
    pub running: bool,
    /// Cycles that fetched and wrote a ticket.
    pub cycles_completed: u64,
    /// Cycles that failed, retried or not.
    pub failures: u64,
    /// Last ticket written.
    pub last_ticket: Option<TicketId>,
    /// When the last ticket was written.
    pub last_success_at: Option<DateTime<Utc>>,
    /// Message of the most recent failure.
    pub last_error: Option<String>,
}
