//! Periodic progress line for a running scan.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use fsized_core::FileCountHandle;

/// Periodic status line while a scan runs.
///
/// Runs as a tokio task that only reads the shared file count, logging
/// `Running for Ns, scanned M files.` once per period until stopped.
#[derive(Debug)]
pub struct ProgressTicker {
    task: JoinHandle<()>,
    ticks: Arc<AtomicU64>,
}

impl ProgressTicker {
    /// Start ticking. Must be called from within a tokio runtime.
    pub fn spawn(files: FileCountHandle, period: Duration) -> Self {
        let ticks = Arc::new(AtomicU64::new(0));
        let task_ticks = Arc::clone(&ticks);

        let task = tokio::spawn(async move {
            let start = Instant::now();
            let mut interval = tokio::time::interval_at(start + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                task_ticks.fetch_add(1, Ordering::Relaxed);
                tracing::info!(
                    "Running for {}s, scanned {} files.",
                    start.elapsed().as_secs(),
                    files.get()
                );
            }
        });

        Self { task, ticks }
    }

    /// Number of status lines emitted so far.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Stop the ticker, returning the number of status lines emitted.
    pub fn stop(self) -> u64 {
        self.task.abort();
        self.ticks()
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.task.abort();
    }
}
