pub mod config;
pub mod poller;
pub mod sink;
pub mod source;
pub mod testing;
pub mod ticket;

pub use config::{
    load_config, load_config_from_str, load_default_config, validate_config, Config,
    ConfigError, EndpointConfig, FailurePolicy, LoggingConfig, OutputConfig, PollerConfig,
};
pub use poller::{PollerError, PollerStatus, TicketPoller};
pub use sink::{FileSink, SinkError, TicketSink};
pub use source::{GraphQlTicketSource, SourceError, TicketSource};
pub use ticket::TicketId;
