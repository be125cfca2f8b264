use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{SinkError, TicketSink};
use crate::config::OutputConfig;
use crate::ticket::TicketId;

/// Writes the ticket to a flat text file, truncating it each time.
///
/// The file holds exactly the identifier bytes with no trailing newline.
/// Parent directories must already exist.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(config.path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TicketSink for FileSink {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn write(&self, ticket: &TicketId) -> Result<(), SinkError> {
        tokio::fs::write(&self.path, ticket.as_str().as_bytes())
            .await
            .map_err(|source| SinkError::Io {
                path: self.path.clone(),
                source,
            })?;

        debug!("Wrote {} bytes to {:?}", ticket.as_str().len(), self.path);
        Ok(())
    }
}
