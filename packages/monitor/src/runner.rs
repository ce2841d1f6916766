//! Tick loop: extract, gate, deliver.
//!
//! One tick runs to completion before the next becomes eligible; shutdown is
//! observed between ticks, never mid-parse. Tick failures are logged at a
//! level matching their class and never stop the loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use quake_core::{Extractor, FileMarkerStore, GateOutcome, NoveltyGate};
use tracing::{debug, error, info, warn};

use crate::notifier::Notifier;

/// Shutdown poll granularity while sleeping between ticks.
const SHUTDOWN_POLL: Duration = Duration::from_millis(250);

pub struct Monitor {
    extractor: Extractor,
    gate: NoveltyGate<FileMarkerStore>,
    notifier: Notifier,
    poll_interval: Duration,
    shutdown: Arc<AtomicBool>,
}

impl Monitor {
    pub fn new(
        extractor: Extractor,
        gate: NoveltyGate<FileMarkerStore>,
        notifier: Notifier,
        poll_interval: Duration,
    ) -> Self {
        Self {
            extractor,
            gate,
            notifier,
            poll_interval,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a shutdown handle. Store `true` to stop the loop after the
    /// current tick.
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        self.shutdown.clone()
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Run ticks until shutdown is requested.
    pub async fn run(mut self) -> Result<()> {
        info!(
            poll_interval_secs = self.poll_interval.as_secs(),
            "monitor starting"
        );

        loop {
            if self.is_shutdown_requested() {
                break;
            }

            self.tick().await;

            // Sleep in slices so a shutdown request does not wait out the
            // whole poll interval.
            let mut remaining = self.poll_interval;
            while !remaining.is_zero() && !self.is_shutdown_requested() {
                let slice = remaining.min(SHUTDOWN_POLL);
                tokio::time::sleep(slice).await;
                remaining -= slice;
            }
        }

        info!("monitor stopped");
        Ok(())
    }

    /// Run until Ctrl+C.
    pub async fn run_until_shutdown(self) -> Result<()> {
        let shutdown = self.shutdown_handle();
        let loop_task = tokio::spawn(self.run());

        tokio::signal::ctrl_c().await?;
        info!("shutdown signal received");
        shutdown.store(true, Ordering::SeqCst);

        loop_task.await??;
        Ok(())
    }

    /// One full extract → evaluate → deliver pass. All failures are logged
    /// and absorbed here.
    async fn tick(&mut self) {
        debug!("tick: checking for new events");

        let candidate = match self.extractor.extract().await {
            Ok(event) => event,
            Err(e) if e.is_structural() => {
                // Markup drift is an operator problem, not a transient one.
                error!(error = %e, "page structure not recognized, skipping tick");
                return;
            }
            Err(e) => {
                warn!(error = %e, "extraction failed, skipping tick");
                return;
            }
        };

        let accepted = match self.gate.evaluate(candidate).await {
            Ok(GateOutcome::Accepted(event)) => event,
            Ok(GateOutcome::Suppressed) => {
                debug!("no new event");
                return;
            }
            Err(e) => {
                // Marker write failed; the event will be re-evaluated next
                // tick, which may duplicate a notification but never drops
                // one.
                error!(error = %e, "could not persist marker, skipping delivery");
                return;
            }
        };

        info!(
            local = %accepted.local_date_time,
            magnitude = accepted.magnitude,
            "new earthquake detected"
        );

        // The marker is already persisted; a delivery failure leaves the
        // event marked as seen.
        match self.notifier.notify(&accepted).await {
            Ok(true) => {}
            Ok(false) => debug!("event recorded but below delivery threshold"),
            Err(e) => error!(error = %e, "notification delivery failed"),
        }
    }
}
