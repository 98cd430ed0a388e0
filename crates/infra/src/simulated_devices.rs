//! In-process stand-in for the device management network.

use std::collections::HashMap;
use std::sync::RwLock;

use blueprint_devices::{DeviceClient, DeviceClientError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulatedDevice {
    Answers(String),
    TimesOut,
}

#[derive(Debug, Default)]
pub struct SimulatedDeviceNetwork {
    devices: RwLock<HashMap<String, SimulatedDevice>>,
}

impl SimulatedDeviceNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, hostname: impl Into<String>, device: SimulatedDevice) {
        if let Ok(mut devices) = self.devices.write() {
            devices.insert(hostname.into(), device);
        }
    }
}

impl DeviceClient for SimulatedDeviceNetwork {
    fn serial_number(&self, hostname: &str) -> Result<String, DeviceClientError> {
        let device = self
            .devices
            .read()
            .ok()
            .and_then(|devices| devices.get(hostname).cloned());

        match device {
            Some(SimulatedDevice::Answers(serial)) => Ok(serial),
            // Unknown hosts behave like unreachable ones.
            Some(SimulatedDevice::TimesOut) | None => Err(DeviceClientError::ConnectionTimeout {
                hostname: hostname.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_and_silent_hosts_time_out() {
        let network = SimulatedDeviceNetwork::new();
        network.set("a", SimulatedDevice::Answers("SN1".into()));
        network.set("b", SimulatedDevice::TimesOut);

        assert_eq!(network.serial_number("a").unwrap(), "SN1");
        assert!(matches!(
            network.serial_number("b"),
            Err(DeviceClientError::ConnectionTimeout { .. })
        ));
        assert!(network.serial_number("c").is_err());
    }
}
