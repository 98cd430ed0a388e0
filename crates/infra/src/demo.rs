//! Demo data so a fresh server has exchanges, devices and a device network
//! to reconcile against.

use anyhow::{Context, Result};
use tracing::info;

use blueprint_core::Repository;
use blueprint_devices::{BroadbandAccessDevice, DeviceType, Exchange, ExchangeCode, Hostname};

use crate::services::AppServices;
use crate::simulated_devices::{SimulatedDevice, SimulatedDeviceNetwork};

pub const DEMO_EXCHANGE: &str = "exch1";

struct DemoDevice {
    hostname: &'static str,
    stored_serial: Option<&'static str>,
    device_type: DeviceType,
    available_ports: u32,
    reality: SimulatedDevice,
}

fn demo_devices() -> Vec<DemoDevice> {
    vec![
        DemoDevice {
            hostname: "device1.exlon.com",
            stored_serial: Some("serial1"),
            device_type: DeviceType::Adsl,
            available_ports: 3,
            reality: SimulatedDevice::Answers("serial1".into()),
        },
        DemoDevice {
            hostname: "device2.exlon.com",
            stored_serial: Some("serial2"),
            device_type: DeviceType::Adsl,
            available_ports: 4,
            reality: SimulatedDevice::Answers("serial2-replaced".into()),
        },
        DemoDevice {
            hostname: "device3.exlon.com",
            stored_serial: None,
            device_type: DeviceType::Fibre,
            available_ports: 2,
            reality: SimulatedDevice::Answers("serial3".into()),
        },
        DemoDevice {
            hostname: "device4.exlon.com",
            stored_serial: Some("serial4"),
            device_type: DeviceType::Fibre,
            available_ports: 1,
            reality: SimulatedDevice::TimesOut,
        },
    ]
}

/// Store the demo exchange and devices, and teach `network` how each device
/// answers.
pub fn seed(services: &AppServices, network: &SimulatedDeviceNetwork) -> Result<()> {
    let code = ExchangeCode::new(DEMO_EXCHANGE);
    services
        .exchanges
        .save(Exchange::new(code.clone(), "London Exchange", "EC1A 1BB"))
        .context("seeding demo exchange")?;

    let devices = demo_devices();
    for device in &devices {
        services
            .devices
            .save(BroadbandAccessDevice::new(
                Hostname::new(device.hostname),
                device.stored_serial.map(str::to_string),
                device.device_type,
                code.clone(),
                device.available_ports,
            ))
            .with_context(|| format!("seeding demo device {}", device.hostname))?;
        network.set(device.hostname, device.reality.clone());
    }

    info!(exchange = DEMO_EXCHANGE, devices = devices.len(), "demo data seeded");
    Ok(())
}
