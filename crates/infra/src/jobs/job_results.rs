use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use blueprint_devices::ReconciliationResults;

/// Success/failure tally for one run of a job. Counting never blocks.
#[derive(Debug, Default)]
pub struct JobResultsCount {
    successes: AtomicU64,
    failures: AtomicU64,
}

impl JobResultsCount {
    pub fn successes(&self) -> u64 {
        self.successes.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}

impl ReconciliationResults for JobResultsCount {
    fn success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    fn failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct JobRunRecord {
    pub job: String,
    pub successes: u64,
    pub failures: u64,
    pub finished_at: DateTime<Utc>,
}

/// Audit trail of finished job runs, most recent last.
#[derive(Debug)]
pub struct JobResults {
    history: Mutex<Vec<JobRunRecord>>,
    capacity: usize,
}

impl Default for JobResults {
    fn default() -> Self {
        Self::with_capacity(256)
    }
}

impl JobResults {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            history: Mutex::new(Vec::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn create_count(&self) -> JobResultsCount {
        JobResultsCount::default()
    }

    pub fn record(&self, job_name: &str, count: &JobResultsCount) -> JobRunRecord {
        let record = JobRunRecord {
            job: job_name.to_string(),
            successes: count.successes(),
            failures: count.failures(),
            finished_at: Utc::now(),
        };
        info!(
            job = job_name,
            successes = record.successes,
            failures = record.failures,
            "{} finished, recording results: {} successes, {} failures",
            job_name,
            record.successes,
            record.failures
        );

        match self.history.lock() {
            Ok(mut history) => {
                if history.len() == self.capacity {
                    history.remove(0);
                }
                history.push(record.clone());
            }
            Err(_) => warn!(job = job_name, "job results history lock poisoned; run not kept"),
        }
        record
    }

    pub fn history(&self) -> Vec<JobRunRecord> {
        self.history.lock().map(|h| h.clone()).unwrap_or_default()
    }
}
