pub mod integration_worker;

pub use integration_worker::{IntegrationWorker, WorkerHandle};
