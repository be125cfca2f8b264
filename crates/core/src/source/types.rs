//! GraphQL wire types for the `getCurrentTicket` query.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::SourceError;
use crate::ticket::TicketId;

/// The only query the poller sends.
pub const CURRENT_TICKET_QUERY: &str = "{ getCurrentTicket { ticketID } }";

/// Request body. Serializes to `{"query": "..."}` with no variables.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
}

impl GraphQlRequest<'static> {
    pub fn current_ticket() -> Self {
        Self {
            query: CURRENT_TICKET_QUERY,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<TicketData>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TicketData {
    #[serde(rename = "getCurrentTicket", default)]
    pub get_current_ticket: Option<CurrentTicket>,
}

/// The `Ticket` object. The server also exposes `validity`, which is not requested.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentTicket {
    #[serde(rename = "ticketID", default)]
    pub ticket_id: Option<String>,
}

/// Decode a response body and pull out `data.getCurrentTicket.ticketID`.
pub fn extract_ticket(body: &[u8]) -> Result<TicketId, SourceError> {
    let response: GraphQlResponse =
        serde_json::from_slice(body).map_err(|e| SourceError::Decode(e.to_string()))?;

    let errors = response.errors.unwrap_or_default();
    let missing = |path: &str| {
        if errors.is_empty() {
            SourceError::MissingField(path.to_string())
        } else {
            SourceError::GraphQl(join_messages(&errors))
        }
    };

    let ticket_id = response
        .data
        .ok_or_else(|| missing("data"))?
        .get_current_ticket
        .ok_or_else(|| missing("data.getCurrentTicket"))?
        .ticket_id
        .ok_or_else(|| missing("data.getCurrentTicket.ticketID"))?;

    if !errors.is_empty() {
        warn!(
            "Ticket returned alongside GraphQL errors: {}",
            join_messages(&errors)
        );
    }

    Ok(TicketId::new(ticket_id))
}

fn join_messages(errors: &[GraphQlError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
