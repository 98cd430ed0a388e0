//! `blueprint-devices`: broadband access devices grouped by exchange.
//!
//! Read models answer capacity and device-detail queries; `reconcile` brings
//! stored serial numbers in line with what the devices themselves report.

pub mod client;
pub mod device;
pub mod exchange;
pub mod queries;
pub mod reconcile;

pub use client::{DeviceClient, DeviceClientError, NetworkSerialNumberSource};
pub use device::{BroadbandAccessDevice, DeviceType, Hostname};
pub use exchange::{Exchange, ExchangeCode};
pub use queries::{
    Capacity, DeviceDetails, DeviceQueryHandler, GetBroadbandAccessDeviceDetails, GetCapacityForExchange,
    MINIMUM_NUMBER_OF_PORTS,
};
pub use reconcile::{
    MAX_SERIAL_NUMBER_LENGTH, ReconcileBroadbandAccessDevices, ReconciliationResults, SerialNumberSource,
};
