//! Periodic progress output while workers run.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::counters::SharedCounters;
use crate::metrics::ProgressSnapshot;
use crate::report::{format_progress_line, format_summary};

/// Period between progress lines unless configured otherwise.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

/// What the reporter saw by the time it stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReporterOutcome {
    /// Counters read once after the last worker finished.
    pub final_snapshot: ProgressSnapshot,
    pub progress_ticks: u64,
}

/// Prints a progress line every interval until no workers remain active,
/// then prints the summary exactly once.
pub struct ProgressReporter<W> {
    counters: Arc<SharedCounters>,
    interval: Duration,
    out: W,
}

impl<W> ProgressReporter<W>
where
    W: Write + Send + 'static,
{
    pub fn new(counters: Arc<SharedCounters>, interval: Duration, out: W) -> Self {
        Self {
            counters,
            interval,
            out,
        }
    }

    /// Run on a background task. `start` is the instant rates are measured from.
    pub fn spawn(self, start: Instant) -> JoinHandle<io::Result<ReporterOutcome>> {
        tokio::spawn(self.run(start))
    }

    pub async fn run(mut self, start: Instant) -> io::Result<ReporterOutcome> {
        // A zero period would make `interval_at` panic.
        let period = self.interval.max(Duration::from_millis(1));
        let mut ticker = interval_at(start + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut progress_ticks = 0u64;

        while self.counters.active_workers() > 0 {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = self.counters.wait_all_finished() => {}
            }
            if self.counters.active_workers() == 0 {
                break;
            }

            let snapshot = self.counters.snapshot(start.elapsed());
            writeln!(self.out, "{}", format_progress_line(&snapshot))?;
            self.out.flush()?;
            progress_ticks += 1;
            debug!(
                inserted = snapshot.total_inserted,
                active = self.counters.active_workers(),
                "Progress tick"
            );
        }

        let final_snapshot = self.counters.snapshot(start.elapsed());
        write!(self.out, "{}", format_summary(&final_snapshot))?;
        self.out.flush()?;

        Ok(ReporterOutcome {
            final_snapshot,
            progress_ticks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SharedBuffer;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_until_workers_finish() {
        let counters = Arc::new(SharedCounters::new(1));
        let buffer = SharedBuffer::default();
        let start = Instant::now();
        let handle =
            ProgressReporter::new(counters.clone(), Duration::from_secs(1), buffer.clone())
                .spawn(start);

        counters.record_inserted();
        counters.add_cost(0, 5.0);
        tokio::time::sleep(Duration::from_millis(3_500)).await;
        counters.worker_finished();

        let outcome = handle.await.unwrap().unwrap();
        assert_eq!(outcome.progress_ticks, 3);
        assert_eq!(outcome.final_snapshot.total_inserted, 1);
        assert_eq!(outcome.final_snapshot.total_cost, 5.0);
        assert_eq!(outcome.final_snapshot.elapsed, Duration::from_millis(3_500));

        let output = buffer.contents();
        assert_eq!(output.lines().filter(|l| l.starts_with("Inserted")).count(), 4);
        assert_eq!(output.matches("Summary:").count(), 1);
        assert!(output.contains("Total Time Elapsed:\t00:00:03.500"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_ticks_after_finish() {
        let counters = Arc::new(SharedCounters::new(2));
        let buffer = SharedBuffer::default();
        let handle =
            ProgressReporter::new(counters.clone(), Duration::from_secs(1), buffer.clone())
                .spawn(Instant::now());

        counters.worker_finished();
        counters.worker_finished();

        let outcome = handle.await.unwrap().unwrap();
        assert_eq!(outcome.progress_ticks, 0);
        assert_eq!(outcome.final_snapshot.elapsed, Duration::ZERO);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(buffer.contents().matches("Inserted").count(), 1);
    }

    #[tokio::test]
    async fn test_no_workers_reports_summary_only() {
        let counters = Arc::new(SharedCounters::new(0));
        let buffer = SharedBuffer::default();

        let outcome = ProgressReporter::new(counters, Duration::from_secs(1), buffer.clone())
            .run(Instant::now())
            .await
            .unwrap();

        assert_eq!(outcome.progress_ticks, 0);
        assert_eq!(outcome.final_snapshot.total_inserted, 0);
        assert!(buffer.contents().contains("Summary:"));
    }
}
