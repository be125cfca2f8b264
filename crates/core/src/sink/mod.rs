//! Destinations for the fetched ticket identifier.

mod file;

pub use file::FileSink;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::ticket::TicketId;

/// Errors that can occur while writing a ticket.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Somewhere the latest ticket identifier is published.
#[async_trait]
pub trait TicketSink: Send + Sync {
    /// Human-readable destination for logs.
    fn describe(&self) -> String;

    /// Replace whatever was previously written with `ticket`.
    async fn write(&self, ticket: &TicketId) -> Result<(), SinkError>;
}
