//! Fixed-rate background jobs.
//!
//! - `ScheduledJob`: name, timing and body of a recurring job
//! - `FixedRateScheduler`: one named thread per job
//! - `JobResults`: audit of success/failure counts per run
//! - `ReconcileBroadbandAccessDeviceJob`: device serial-number reconciliation

pub mod job_results;
pub mod reconcile_job;
pub mod scheduler;

pub use job_results::{JobResults, JobResultsCount, JobRunRecord};
pub use reconcile_job::ReconcileBroadbandAccessDeviceJob;
pub use scheduler::{FixedRateScheduler, ScheduledJob, SchedulerHandle, SchedulerStats};
