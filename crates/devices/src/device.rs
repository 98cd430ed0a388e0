use serde::{Deserialize, Serialize};

use blueprint_core::{AggregateRoot, SurrogateId};

use crate::exchange::ExchangeCode;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hostname(String);

impl Hostname {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Hostname {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeviceType {
    Adsl,
    Fibre,
}

/// Aggregate root: BroadbandAccessDevice.
///
/// The stored serial number is the model's view; reconciliation overwrites it
/// with what the device reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadbandAccessDevice {
    surrogate_id: Option<SurrogateId>,
    hostname: Hostname,
    serial_number: Option<String>,
    device_type: DeviceType,
    exchange: ExchangeCode,
    available_ports: u32,
}

impl BroadbandAccessDevice {
    pub fn new(
        hostname: Hostname,
        serial_number: Option<String>,
        device_type: DeviceType,
        exchange: ExchangeCode,
        available_ports: u32,
    ) -> Self {
        Self {
            surrogate_id: None,
            hostname,
            serial_number,
            device_type,
            exchange,
            available_ports,
        }
    }

    pub fn hostname(&self) -> &Hostname {
        &self.hostname
    }

    pub fn serial_number(&self) -> Option<&str> {
        self.serial_number.as_deref()
    }

    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    pub fn exchange(&self) -> &ExchangeCode {
        &self.exchange
    }

    pub fn available_ports(&self) -> u32 {
        self.available_ports
    }

    pub fn update_serial_number(&mut self, serial_number: impl Into<String>) {
        self.serial_number = Some(serial_number.into());
    }
}

impl AggregateRoot for BroadbandAccessDevice {
    type Id = Hostname;

    fn id(&self) -> &Self::Id {
        &self.hostname
    }

    fn surrogate_id(&self) -> Option<SurrogateId> {
        self.surrogate_id
    }

    fn assign_surrogate_id(&mut self, id: SurrogateId) {
        self.surrogate_id = Some(id);
    }
}
