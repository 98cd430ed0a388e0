use serde::Serialize;

use blueprint_auth::Principal;
use blueprint_core::{DomainError, DomainResult, Repository};
use blueprint_events::QueryHandler;

use crate::device::{BroadbandAccessDevice, DeviceType, Hostname};
use crate::exchange::{Exchange, ExchangeCode};

/// Free ports of one type an exchange needs before it reports capacity.
pub const MINIMUM_NUMBER_OF_PORTS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCapacityForExchange {
    pub exchange_code: ExchangeCode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetBroadbandAccessDeviceDetails {
    pub hostname: Hostname,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capacity {
    #[serde(rename = "hasADSLCapacity")]
    pub has_adsl_capacity: bool,
    #[serde(rename = "hasFibreCapacity")]
    pub has_fibre_capacity: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDetails {
    pub exchange_code: ExchangeCode,
    pub hostname: Hostname,
    pub serial_number: Option<String>,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
}

impl From<&BroadbandAccessDevice> for DeviceDetails {
    fn from(device: &BroadbandAccessDevice) -> Self {
        Self {
            exchange_code: device.exchange().clone(),
            hostname: device.hostname().clone(),
            serial_number: device.serial_number().map(str::to_string),
            device_type: device.device_type(),
        }
    }
}

/// Public read side over exchanges and their devices.
pub struct DeviceQueryHandler<E, D> {
    exchanges: E,
    devices: D,
}

impl<E, D> DeviceQueryHandler<E, D> {
    pub fn new(exchanges: E, devices: D) -> Self {
        Self { exchanges, devices }
    }
}

fn has_capacity_for(devices: &[BroadbandAccessDevice], device_type: DeviceType) -> bool {
    let available: u32 = devices
        .iter()
        .filter(|d| d.device_type() == device_type)
        .map(BroadbandAccessDevice::available_ports)
        .sum();
    available >= MINIMUM_NUMBER_OF_PORTS
}

impl<E, D> QueryHandler<GetCapacityForExchange> for DeviceQueryHandler<E, D>
where
    E: Repository<Exchange>,
    D: Repository<BroadbandAccessDevice>,
{
    type Output = Capacity;

    fn handle(&self, _principal: &Principal, query: GetCapacityForExchange) -> DomainResult<Capacity> {
        if !self.exchanges.exists(&query.exchange_code)? {
            return Err(DomainError::not_found("Exchange", &query.exchange_code));
        }

        let devices: Vec<_> = self
            .devices
            .list()?
            .into_iter()
            .filter(|d| d.exchange() == &query.exchange_code)
            .collect();

        Ok(Capacity {
            has_adsl_capacity: has_capacity_for(&devices, DeviceType::Adsl),
            has_fibre_capacity: has_capacity_for(&devices, DeviceType::Fibre),
        })
    }
}

impl<E, D> QueryHandler<GetBroadbandAccessDeviceDetails> for DeviceQueryHandler<E, D>
where
    D: Repository<BroadbandAccessDevice>,
{
    type Output = DeviceDetails;

    fn handle(&self, _principal: &Principal, query: GetBroadbandAccessDeviceDetails) -> DomainResult<DeviceDetails> {
        self.devices
            .find_by_id(&query.hostname)?
            .map(|device| DeviceDetails::from(&device))
            .ok_or_else(|| DomainError::not_found("Broadband Access Device", &query.hostname))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_core::InMemoryRepository;

    type Handler = DeviceQueryHandler<InMemoryRepository<Exchange>, InMemoryRepository<BroadbandAccessDevice>>;

    fn handler(devices: &[(&str, DeviceType, u32)]) -> Handler {
        let exchanges = InMemoryRepository::new();
        exchanges
            .save(Exchange::new(ExchangeCode::new("exch1"), "Exchange 1", "PC1 1AB"))
            .unwrap();
        let repo = InMemoryRepository::new();
        for (hostname, device_type, ports) in devices {
            repo.save(BroadbandAccessDevice::new(
                Hostname::new(*hostname),
                Some(format!("serial-{hostname}")),
                *device_type,
                ExchangeCode::new("exch1"),
                *ports,
            ))
            .unwrap();
        }
        DeviceQueryHandler::new(exchanges, repo)
    }

    fn capacity(h: &Handler, code: &str) -> DomainResult<Capacity> {
        h.handle(
            &Principal::anonymous(),
            GetCapacityForExchange {
                exchange_code: ExchangeCode::new(code),
            },
        )
    }

    #[test]
    fn capacity_sums_ports_per_type() {
        let h = handler(&[
            ("a1", DeviceType::Adsl, 3),
            ("a2", DeviceType::Adsl, 2),
            ("f1", DeviceType::Fibre, 4),
        ]);
        assert_eq!(
            capacity(&h, "exch1").unwrap(),
            Capacity {
                has_adsl_capacity: true,
                has_fibre_capacity: false,
            }
        );
    }

    #[test]
    fn unknown_exchange_is_not_found() {
        let h = handler(&[]);
        assert_eq!(
            capacity(&h, "nope").unwrap_err(),
            DomainError::not_found("Exchange", "nope")
        );
    }

    #[test]
    fn details_use_camel_case_and_type_key() {
        let h = handler(&[("device1.exch1.com", DeviceType::Fibre, 10)]);
        let details = h
            .handle(
                &Principal::anonymous(),
                GetBroadbandAccessDeviceDetails {
                    hostname: Hostname::new("device1.exch1.com"),
                },
            )
            .unwrap();
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "exchangeCode": "exch1",
                "hostname": "device1.exch1.com",
                "serialNumber": "serial-device1.exch1.com",
                "type": "FIBRE"
            })
        );

        let err = h
            .handle(
                &Principal::anonymous(),
                GetBroadbandAccessDeviceDetails {
                    hostname: Hostname::new("missing"),
                },
            )
            .unwrap_err();
        assert_eq!(err.code(), "not_found");
    }
}
