//! GraphQL ticket source.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::types::{extract_ticket, GraphQlRequest};
use super::{SourceError, TicketSource};
use crate::config::EndpointConfig;
use crate::ticket::TicketId;

/// Fetches the current ticket with a `POST` of the `getCurrentTicket` query.
pub struct GraphQlTicketSource {
    client: Client,
    url: String,
}

impl GraphQlTicketSource {
    /// Create a new source for the configured endpoint.
    pub fn new(config: &EndpointConfig) -> Result<Self, SourceError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TicketSource for GraphQlTicketSource {
    fn name(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<TicketId, SourceError> {
        debug!("POST {} query='{}'", self.url, GraphQlRequest::current_ticket().query);

        let response = self
            .client
            .post(&self.url)
            .json(&GraphQlRequest::current_ticket())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        debug!("Received {} byte response ({})", body.len(), status);

        extract_ticket(&body)
    }
}
