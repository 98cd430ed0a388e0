//! Background side of the process: the integration worker and the scheduled
//! jobs, started together and stopped together.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use blueprint_events::IntegrationEnvelope;

use crate::config::AppConfig;
use crate::demo;
use crate::jobs::{FixedRateScheduler, JobResults, ReconcileBroadbandAccessDeviceJob, SchedulerHandle};
use crate::reactions::Reactor;
use crate::services::AppServices;
use crate::simulated_devices::SimulatedDeviceNetwork;
use crate::workers::{IntegrationWorker, WorkerHandle};

pub struct Runtime {
    worker: WorkerHandle,
    scheduler: SchedulerHandle,
    job_results: Arc<JobResults>,
}

impl Runtime {
    /// Subscribe the integration worker and start the reconcile job.
    pub fn start(services: Arc<AppServices>, config: &AppConfig) -> Self {
        let mut reactor = Reactor::new(services.clone());
        let worker = IntegrationWorker::spawn(
            "integration-worker",
            &services.bus,
            move |envelope: IntegrationEnvelope| reactor.handle(envelope),
        );

        let job_results = Arc::new(JobResults::default());
        let reconcile = ReconcileBroadbandAccessDeviceJob::new(services.reconcile_devices(), job_results.clone())
            .with_timing(config.reconcile_initial_delay, config.reconcile_period);
        let scheduler = FixedRateScheduler::new().register(Arc::new(reconcile)).spawn();

        info!("background runtime started");
        Self {
            worker,
            scheduler,
            job_results,
        }
    }

    pub fn job_results(&self) -> &Arc<JobResults> {
        &self.job_results
    }

    pub fn scheduler(&self) -> &SchedulerHandle {
        &self.scheduler
    }

    pub fn shutdown(self) {
        self.scheduler.shutdown();
        self.worker.shutdown();
        info!("background runtime stopped");
    }
}

/// Wire services over the simulated device network, seed demo data when
/// configured, and start the runtime.
pub fn bootstrap(config: &AppConfig) -> Result<(Arc<AppServices>, Runtime)> {
    let network = Arc::new(SimulatedDeviceNetwork::new());
    let services = Arc::new(AppServices::new(config, network.clone()));

    if config.seed_demo_data {
        demo::seed(&services, &network)?;
    }

    let runtime = Runtime::start(services.clone(), config);
    Ok((services, runtime))
}
