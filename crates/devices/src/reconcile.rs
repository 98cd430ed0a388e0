use tracing::{debug, info};

use blueprint_core::{DomainResult, Repository};

use crate::device::{BroadbandAccessDevice, Hostname};

/// Serial numbers longer than this are treated as garbage from the device.
pub const MAX_SERIAL_NUMBER_LENGTH: usize = 25;

/// Where the real serial number of a device comes from.
///
/// `None` means the device did not answer with a serial number.
pub trait SerialNumberSource: Send + Sync {
    fn serial_number(&self, hostname: &Hostname) -> Option<String>;
}

/// Audit sink for one reconciliation pass.
pub trait ReconciliationResults {
    fn success(&self);
    fn failure(&self);
}

/// Compare each stored device with what the device reports and update the
/// stored serial number when they differ.
pub struct ReconcileBroadbandAccessDevices<D, S> {
    devices: D,
    reality: S,
}

impl<D, S> ReconcileBroadbandAccessDevices<D, S>
where
    D: Repository<BroadbandAccessDevice>,
    S: SerialNumberSource,
{
    pub fn new(devices: D, reality: S) -> Self {
        Self { devices, reality }
    }

    pub fn reconcile(&self, results: &impl ReconciliationResults) -> DomainResult<()> {
        for mut device in self.devices.list()? {
            let Some(actual) = self
                .reality
                .serial_number(device.hostname())
                .filter(|serial| serial.chars().count() <= MAX_SERIAL_NUMBER_LENGTH)
            else {
                debug!(hostname = %device.hostname(), "no valid serial number reported");
                results.failure();
                continue;
            };

            if device.serial_number() != Some(actual.as_str()) {
                info!(hostname = %device.hostname(), serial_number = %actual, "serial number updated");
                device.update_serial_number(actual);
                self.devices.save(device)?;
                results.success();
            }
        }
        Ok(())
    }
}
