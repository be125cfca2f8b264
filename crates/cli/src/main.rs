use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ticket_poller_core::{
    load_config, load_default_config, validate_config, Config, FileSink, GraphQlTicketSource,
    TicketPoller,
};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable naming the config file
const CONFIG_ENV: &str = "TICKET_POLLER_CONFIG";

/// Config file picked up from the working directory when present
const DEFAULT_CONFIG_FILE: &str = "ticket-poller.toml";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config_path = config_path();
    let config = match &config_path {
        Some(path) => load_config(path),
        None => load_default_config(),
    };

    // Logging format comes from config, so a broken config logs in the default format
    init_logging(config.as_ref().map(|c| c.logging.json).unwrap_or(false));
    info!("ticket-poller {} starting", VERSION);

    let config = config.with_context(|| match &config_path {
        Some(path) => format!("Failed to load config from {:?}", path),
        None => "Failed to load config from environment".to_string(),
    })?;
    match &config_path {
        Some(path) => info!("Configuration loaded from {:?}", path),
        None => info!("No config file, using defaults and environment overrides"),
    }

    validate_config(&config).context("Configuration validation failed")?;
    log_config(&config);

    let source = GraphQlTicketSource::new(&config.endpoint)
        .context("Failed to create GraphQL client")?;
    let sink = FileSink::from_config(&config.output);

    let poller = Arc::new(TicketPoller::new(
        config.poller.clone(),
        Arc::new(source),
        Arc::new(sink),
    ));

    // Stop the poller on Ctrl+C or SIGTERM
    let shutdown = shutdown_signal()?;
    let poller_handle = poller.spawn();

    let stopper = Arc::clone(&poller);
    tokio::spawn(async move {
        shutdown.await;
        info!("Shutdown signal received, stopping poller...");
        stopper.stop();
    });

    poller_handle
        .await
        .context("Poller task panicked")?
        .context("Poller stopped on error")?;

    let status = poller.status().await;
    info!(
        "Poller stopped after {} successful cycles ({} failures)",
        status.cycles_completed, status.failures
    );

    Ok(())
}

fn config_path() -> Option<PathBuf> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => Some(PathBuf::from(path)),
        Err(_) => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            path.exists().then_some(path)
        }
    }
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn log_config(config: &Config) {
    info!("Endpoint: {}", config.endpoint.url);
    match config.endpoint.timeout() {
        Some(timeout) => info!("Request timeout: {:?}", timeout),
        None => info!("Request timeout: none"),
    }
    info!("Output file: {:?}", config.output.path);
    info!(
        "Poll interval: {:?}, on error: {:?}",
        config.poller.interval(),
        config.poller.on_error
    );
}

/// Install Ctrl+C and SIGTERM handlers, returning a future that resolves on either.
///
/// Handlers are registered before this returns, so a signal that arrives while the
/// poller is starting is not lost.
fn shutdown_signal() -> Result<impl Future<Output = ()>> {
    #[cfg(unix)]
    let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())
        .context("Failed to install SIGTERM handler")?;

    Ok(async move {
        let ctrl_c = async {
            if let Err(e) = signal::ctrl_c().await {
                error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async move {
            terminate.recv().await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {},
            _ = terminate => {},
        }
    })
}
