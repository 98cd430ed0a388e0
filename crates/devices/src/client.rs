use std::sync::Arc;

use thiserror::Error;
use tracing::{error, warn};

use crate::device::Hostname;
use crate::reconcile::SerialNumberSource;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceClientError {
    #[error("connection to {hostname} timed out")]
    ConnectionTimeout { hostname: String },

    #[error("device {hostname} returned an unreadable response: {reason}")]
    Malformed { hostname: String, reason: String },
}

/// Talks to a device over the management network.
pub trait DeviceClient: Send + Sync {
    fn serial_number(&self, hostname: &str) -> Result<String, DeviceClientError>;
}

impl<C: DeviceClient + ?Sized> DeviceClient for Arc<C> {
    fn serial_number(&self, hostname: &str) -> Result<String, DeviceClientError> {
        (**self).serial_number(hostname)
    }
}

/// Serial numbers read live from the devices.
///
/// Client errors never reach the caller: a device that does not answer is
/// reported as having no serial number, which reconciliation counts as a
/// failure.
pub struct NetworkSerialNumberSource<C> {
    client: C,
}

impl<C: DeviceClient> NetworkSerialNumberSource<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

impl<C: DeviceClient> SerialNumberSource for NetworkSerialNumberSource<C> {
    fn serial_number(&self, hostname: &Hostname) -> Option<String> {
        match self.client.serial_number(hostname.as_str()) {
            Ok(serial) => Some(serial),
            Err(err @ DeviceClientError::ConnectionTimeout { .. }) => {
                warn!(%hostname, error = %err, "device did not answer");
                None
            }
            Err(err) => {
                error!(%hostname, error = %err, "device client failed");
                None
            }
        }
    }
}
