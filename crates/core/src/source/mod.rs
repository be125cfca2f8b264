//! Sources of the current ticket identifier.
//!
//! The production source is [`GraphQlTicketSource`], which asks a GraphQL
//! endpoint for `getCurrentTicket`. Tests use
//! [`MockTicketSource`](crate::testing::MockTicketSource).

mod graphql;
mod types;

pub use graphql::GraphQlTicketSource;
pub use types::{
    extract_ticket, CurrentTicket, GraphQlError, GraphQlRequest, GraphQlResponse, TicketData,
    CURRENT_TICKET_QUERY,
};

use async_trait::async_trait;
use thiserror::Error;

use crate::ticket::TicketId;

/// Errors that can occur while fetching the current ticket.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed before a response was received.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status.
    #[error("Endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body is not the expected JSON.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Endpoint reported GraphQL errors and no ticket.
    #[error("GraphQL errors: {0}")]
    GraphQl(String),

    /// Response is valid JSON but a required field is absent or null.
    #[error("Missing field in response: {0}")]
    MissingField(String),
}

impl SourceError {
    /// Whether the failure is worth retrying on the next cycle.
    ///
    /// Transport problems, 5xx and 429 are transient. Anything that means the
    /// endpoint answered but broke its contract is not.
    pub fn is_transient(&self) -> bool {
        match self {
            SourceError::Http(e) => !e.is_builder(),
            SourceError::Status { status, .. } => *status >= 500 || *status == 429,
            SourceError::Decode(_) | SourceError::GraphQl(_) | SourceError::MissingField(_) => {
                false
            }
        }
    }
}

/// Something that can report the current ticket identifier.
#[async_trait]
pub trait TicketSource: Send + Sync {
    /// Human-readable name for logs.
    fn name(&self) -> &str;

    /// Fetch the current ticket identifier.
    async fn fetch(&self) -> Result<TicketId, SourceError>;
}
