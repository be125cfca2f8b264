//! Ticket poller implementation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::{FailurePolicy, PollerConfig};
use crate::sink::TicketSink;
use crate::source::TicketSource;
use crate::ticket::TicketId;

use super::types::{PollerError, PollerStatus};

/// Clears the running flag when `run` finishes or its future is dropped.
struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Mirrors the current ticket from a source into a sink on a fixed interval.
pub struct TicketPoller {
    config: PollerConfig,
    source: Arc<dyn TicketSource>,
    sink: Arc<dyn TicketSink>,

    // Runtime state
    running: AtomicBool,
    status: RwLock<PollerStatus>,
    shutdown_tx: watch::Sender<bool>,
}

impl TicketPoller {
    /// Create a new poller.
    pub fn new(
        config: PollerConfig,
        source: Arc<dyn TicketSource>,
        sink: Arc<dyn TicketSink>,
    ) -> Self {
        let (shutdown_tx, _) = watch::channel(false);

        Self {
            config,
            source,
            sink,
            running: AtomicBool::new(false),
            status: RwLock::new(PollerStatus::default()),
            shutdown_tx,
        }
    }

    /// Run one fetch + write cycle without sleeping.
    pub async fn poll_once(&self) -> Result<TicketId, PollerError> {
        let result = match self.source.fetch().await {
            Ok(ticket) => self.publish(ticket).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = &result {
            self.record_failure(e).await;
        }
        result
    }

    /// Run the poll loop until [`stop`](Self::stop) is called or a cycle fails fatally.
    ///
    /// The first cycle starts immediately. A pending fetch or sleep is abandoned
    /// on stop; a write that has started always completes.
    pub async fn run(&self) -> Result<(), PollerError> {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Poller already running");
            return Err(PollerError::AlreadyRunning);
        }
        let _running = RunningGuard(&self.running);

        self.run_loop().await
    }

    async fn run_loop(&self) -> Result<(), PollerError> {
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let interval = self.config.interval();

        info!(
            "Poll loop started (source: {}, sink: {}, interval: {:?}, on_error: {:?})",
            self.source.name(),
            self.sink.describe(),
            interval,
            self.config.on_error
        );

        loop {
            let fetched = tokio::select! {
                biased;
                _ = shutdown_rx.wait_for(|stopped| *stopped) => {
                    info!("Poll loop received shutdown signal");
                    break;
                }
                fetched = self.source.fetch() => fetched,
            };

            let result = match fetched {
                Ok(ticket) => self.publish(ticket).await,
                Err(e) => Err(e.into()),
            };

            match result {
                Ok(ticket) => info!("Current ticket: {}", ticket),
                Err(e) => {
                    self.record_failure(&e).await;
                    if self.config.on_error == FailurePolicy::Retry && e.is_transient() {
                        warn!("Poll failed, retrying in {:?}: {}", interval, e);
                    } else {
                        error!("Poll failed: {}", e);
                        return Err(e);
                    }
                }
            }

            tokio::select! {
                biased;
                _ = shutdown_rx.wait_for(|stopped| *stopped) => {
                    info!("Poll loop received shutdown signal");
                    break;
                }
                _ = tokio::time::sleep(interval) => {}
            }
        }

        info!("Poll loop stopped");
        Ok(())
    }

    /// Spawn [`run`](Self::run) on the tokio runtime.
    pub fn spawn(self: &Arc<Self>) -> JoinHandle<Result<(), PollerError>> {
        let poller = Arc::clone(self);
        tokio::spawn(async move { poller.run().await })
    }

    /// Ask the poll loop to stop. Takes effect even if called before `run`.
    pub fn stop(&self) {
        debug!("Poller stop requested");
        self.shutdown_tx.send_replace(true);
    }

    /// Whether the poll loop is currently running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Get current poller status.
    pub async fn status(&self) -> PollerStatus {
        let mut status = self.status.read().await.clone();
        status.running = self.is_running();
        status
    }

    async fn publish(&self, ticket: TicketId) -> Result<TicketId, PollerError> {
        self.sink.write(&ticket).await?;

        let mut status = self.status.write().await;
        status.cycles_completed += 1;
        status.last_ticket = Some(ticket.clone());
        status.last_success_at = Some(Utc::now());
        Ok(ticket)
    }

    async fn record_failure(&self, error: &PollerError) {
        let mut status = self.status.write().await;
        status.failures += 1;
        status.last_error = Some(error.to_string());
    }
}
