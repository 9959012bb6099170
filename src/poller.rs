use crate::client::StatsSource;
use crate::display::StatsDisplay;
use crate::error::StatsError;
use crate::stats::StatsField;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, error, info};

/// Fixed delay between poll cycles. Matches the refresh cadence of the
/// dashboard page; not a tunable.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Polls the stats endpoint on a fixed interval and renders each snapshot
/// into the display.
pub struct StatsPoller<S, D> {
    source: S,
    display: D,
}

impl<S, D> StatsPoller<S, D>
where
    S: StatsSource,
    D: StatsDisplay,
{
    pub fn new(source: S, display: D) -> Self {
        Self { source, display }
    }

    /// Perform one fetch-and-render cycle.
    ///
    /// On success the four display slots are written in sequence and the
    /// display is refreshed. On failure nothing is written; the previously
    /// rendered values stay on screen and the caller decides what to do with
    /// the error (the poll loop logs and continues).
    pub async fn poll_once(&mut self) -> Result<(), StatsError> {
        let snapshot = self.source.fetch_stats().await?;

        debug!("Rendering stats snapshot: {:?}", snapshot);

        for field in StatsField::ALL {
            self.display.set_text(field, &snapshot.field_text(field));
        }
        self.display.refresh();

        Ok(())
    }

    /// Run the poll loop: one immediate cycle, then one cycle per interval
    /// tick, indefinitely. Each cycle is awaited in place, so cycles never
    /// overlap; a slow fetch delays the following tick.
    pub async fn run(mut self) {
        info!(
            "Starting stats polling every {} seconds",
            POLL_INTERVAL.as_secs()
        );

        let mut ticker = interval(POLL_INTERVAL);
        loop {
            // First tick completes immediately
            ticker.tick().await;

            if let Err(e) = self.poll_once().await {
                error!("Error updating stats: {}", e);
                // Keep polling; the next tick retries naturally
            }
        }
    }
}

/// Owned handle to a running poll loop.
///
/// The loop itself never terminates; the handle is the one place that can
/// end it, by aborting the task.
pub struct PollerHandle {
    task: JoinHandle<()>,
}

impl PollerHandle {
    pub fn new(task: JoinHandle<()>) -> Self {
        Self { task }
    }

    /// Stop the poll loop and wait for the task to wind down.
    pub async fn stop(self) {
        debug!("Stopping stats poller");
        self.task.abort();
        let _ = self.task.await;
    }
}
