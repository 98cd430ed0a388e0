//! Fixed-rate scheduler: run `n` of a job starts at `initial_delay + n * period`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

/// A recurring job.
pub trait ScheduledJob: Send + Sync + 'static {
    fn name(&self) -> &str;

    fn initial_delay(&self) -> Duration;

    fn period(&self) -> Duration;

    fn run(&self);
}

/// Runs completed per job, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct SchedulerStats {
    pub runs: Vec<(String, u64)>,
}

struct RunningJob {
    name: String,
    runs: Arc<AtomicU64>,
    shutdown: mpsc::Sender<()>,
    join: Option<thread::JoinHandle<()>>,
}

/// Handle to the running job threads.
pub struct SchedulerHandle {
    jobs: Vec<RunningJob>,
}

impl SchedulerHandle {
    /// Signal every job thread and wait for all of them to stop.
    pub fn shutdown(mut self) {
        for job in &self.jobs {
            let _ = job.shutdown.send(());
        }
        for job in &mut self.jobs {
            if let Some(j) = job.join.take() {
                let _ = j.join();
            }
        }
    }

    pub fn stats(&self) -> SchedulerStats {
        SchedulerStats {
            runs: self
                .jobs
                .iter()
                .map(|job| (job.name.clone(), job.runs.load(Ordering::Relaxed)))
                .collect(),
        }
    }
}

/// Starts each registered job on its own thread.
///
/// A run that takes longer than the period delays the next run, which then
/// starts immediately. A panicking job ends its own thread only.
#[derive(Default)]
pub struct FixedRateScheduler {
    jobs: Vec<Arc<dyn ScheduledJob>>,
}

impl FixedRateScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, job: Arc<dyn ScheduledJob>) -> Self {
        self.jobs.push(job);
        self
    }

    pub fn spawn(self) -> SchedulerHandle {
        let jobs = self
            .jobs
            .into_iter()
            .map(|job| {
                let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
                let runs = Arc::new(AtomicU64::new(0));
                let name = job.name().to_string();

                let counter = runs.clone();
                let join = thread::Builder::new()
                    .name(name.clone())
                    .spawn(move || job_loop(job, shutdown_rx, counter))
                    .expect("failed to spawn scheduled job thread");

                RunningJob {
                    name,
                    runs,
                    shutdown: shutdown_tx,
                    join: Some(join),
                }
            })
            .collect();

        SchedulerHandle { jobs }
    }
}

fn job_loop(job: Arc<dyn ScheduledJob>, shutdown_rx: mpsc::Receiver<()>, runs: Arc<AtomicU64>) {
    info!(job = job.name(), period_ms = job.period().as_millis() as u64, "scheduled job started");

    let mut next = Instant::now() + job.initial_delay();
    loop {
        let wait = next.saturating_duration_since(Instant::now());
        match shutdown_rx.recv_timeout(wait) {
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }

        debug!(job = job.name(), "job starting");
        job.run();
        runs.fetch_add(1, Ordering::Relaxed);

        next += job.period();
    }

    info!(job = job.name(), "scheduled job stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ticker {
        period: Duration,
        delay: Duration,
        ticks: AtomicU64,
    }

    impl ScheduledJob for Ticker {
        fn name(&self) -> &str {
            "ticker"
        }

        fn initial_delay(&self) -> Duration {
            self.delay
        }

        fn period(&self) -> Duration {
            self.period
        }

        fn run(&self) {
            self.ticks.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn ticker(delay_ms: u64, period_ms: u64) -> Arc<Ticker> {
        Arc::new(Ticker {
            period: Duration::from_millis(period_ms),
            delay: Duration::from_millis(delay_ms),
            ticks: AtomicU64::new(0),
        })
    }

    #[test]
    fn runs_repeatedly_until_shutdown() {
        let job = ticker(0, 10);
        let handle = FixedRateScheduler::new().register(job.clone()).spawn();

        thread::sleep(Duration::from_millis(120));
        let stats = handle.stats();
        handle.shutdown();

        let ticks = job.ticks.load(Ordering::Relaxed);
        assert!(ticks >= 3, "expected several runs, got {ticks}");
        assert_eq!(stats.runs[0].0, "ticker");
        assert!(stats.runs[0].1 <= ticks);
    }

    #[test]
    fn initial_delay_postpones_first_run() {
        let job = ticker(10_000, 10);
        let handle = FixedRateScheduler::new().register(job.clone()).spawn();

        thread::sleep(Duration::from_millis(50));
        handle.shutdown();

        assert_eq!(job.ticks.load(Ordering::Relaxed), 0);
    }
}
