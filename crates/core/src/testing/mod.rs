//! Testing utilities and mock implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use ticket_poller_core::testing::{MemorySink, MockTicketSource};
//!
//! let source = Arc::new(MockTicketSource::new());
//! let sink = Arc::new(MemorySink::new());
//!
//! source.push_ticket("T1").await;
//! source.push_ticket("T2").await;
//!
//! let poller = TicketPoller::new(config, source.clone(), sink.clone());
//! poller.run().await.unwrap_err(); // mock exhausted after T2
//! assert_eq!(sink.current().await, Some(TicketId::new("T2")));
//! ```

mod memory_sink;
mod mock_source;

pub use memory_sink::MemorySink;
pub use mock_source::MockTicketSource;

/// Test fixtures and helper functions.
pub mod fixtures {
    use serde_json::{json, Value};

    /// A well-formed `getCurrentTicket` response body.
    pub fn ticket_response(ticket_id: &str) -> Value {
        json!({
            "data": {
                "getCurrentTicket": {
                    "ticketID": ticket_id,
                    "validity": true
                }
            }
        })
    }

    /// A GraphQL error response with no data.
    pub fn error_response(message: &str) -> Value {
        json!({
            "data": null,
            "errors": [{ "message": message }]
        })
    }
}
