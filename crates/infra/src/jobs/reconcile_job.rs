use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use blueprint_core::Repository;
use blueprint_devices::{BroadbandAccessDevice, ReconcileBroadbandAccessDevices, SerialNumberSource};

use super::job_results::{JobResults, JobRunRecord};
use super::scheduler::ScheduledJob;

pub const RECONCILE_JOB_NAME: &str = "ReconcileBroadbandAccessDeviceJob";

/// Periodically reconciles stored device serial numbers against the network.
pub struct ReconcileBroadbandAccessDeviceJob<D, S> {
    reconcile: ReconcileBroadbandAccessDevices<D, S>,
    results: Arc<JobResults>,
    initial_delay: Duration,
    period: Duration,
}

impl<D, S> ReconcileBroadbandAccessDeviceJob<D, S>
where
    D: Repository<BroadbandAccessDevice>,
    S: SerialNumberSource,
{
    pub fn new(reconcile: ReconcileBroadbandAccessDevices<D, S>, results: Arc<JobResults>) -> Self {
        Self {
            reconcile,
            results,
            initial_delay: Duration::ZERO,
            period: Duration::from_secs(5),
        }
    }

    pub fn with_timing(mut self, initial_delay: Duration, period: Duration) -> Self {
        self.initial_delay = initial_delay;
        self.period = period;
        self
    }

    /// One reconciliation pass; storage errors end the pass early but the
    /// counts gathered so far are still recorded.
    pub fn run_once(&self) -> JobRunRecord {
        info!(job = RECONCILE_JOB_NAME, "job starting");
        let count = self.results.create_count();
        if let Err(err) = self.reconcile.reconcile(&count) {
            error!(job = RECONCILE_JOB_NAME, error = %err, "reconciliation aborted");
        }
        let record = self.results.record(RECONCILE_JOB_NAME, &count);
        info!(job = RECONCILE_JOB_NAME, "job completed");
        record
    }
}

impl<D, S> ScheduledJob for ReconcileBroadbandAccessDeviceJob<D, S>
where
    D: Repository<BroadbandAccessDevice> + 'static,
    S: SerialNumberSource + 'static,
{
    fn name(&self) -> &str {
        RECONCILE_JOB_NAME
    }

    fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    fn period(&self) -> Duration {
        self.period
    }

    fn run(&self) {
        self.run_once();
    }
}
