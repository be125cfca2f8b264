//! The poll loop.
//!
//! Each cycle fetches the current ticket from a [`TicketSource`](crate::source::TicketSource),
//! writes it to a [`TicketSink`](crate::sink::TicketSink), then sleeps for the
//! configured interval. Cycles never overlap.

mod runner;
mod types;

pub use runner::TicketPoller;
pub use types::{PollerError, PollerStatus};
