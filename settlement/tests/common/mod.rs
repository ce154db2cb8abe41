//! Shared fixtures for integration tests

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use registry_core::{
    registry::{Entity, Registries, Registry},
    types::{
        Compass, Contract, ContractId, DeviceId, GpsReading, LotId, Participant, ParticipantId,
        PillLot, Role, Shipment, ShipmentId, ShipmentKind, ShipmentStatus, TemperatureReading,
    },
    Error, Result,
};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const MANUFACTURER: &str = "manufacturer7@email.com";
pub const WHOLESALER: &str = "wholesaler7@email.com";
pub const SHIPPER: &str = "shipper7@email.com";
pub const SHIPMENT: &str = "SHIP_001";
pub const LOT: &str = "p7";
pub const CONTRACT: &str = "CON_001";

/// Seed the standard fixture: three parties, contract with 0..20 °C bounds
/// and 0.1/0.2 penalty factors, a 100 × 50 pill lot, and one shipment.
/// The contract deadline is `now + 1 day`.
pub async fn seed(registries: &Registries, now: DateTime<Utc>) {
    registries
        .manufacturers
        .add_all(vec![participant(MANUFACTURER, Role::Manufacturer, 1000)])
        .await
        .unwrap();
    registries
        .wholesalers
        .add_all(vec![participant(WHOLESALER, Role::Wholesaler, 50000)])
        .await
        .unwrap();
    registries
        .shippers
        .add_all(vec![participant(SHIPPER, Role::Shipper, 200)])
        .await
        .unwrap();
    registries
        .contracts
        .add_all(vec![Contract {
            contract_id: ContractId::new(CONTRACT),
            manufacturer: ParticipantId::new(MANUFACTURER),
            shipper: ParticipantId::new(SHIPPER),
            wholesaler: ParticipantId::new(WHOLESALER),
            arrival_deadline: now + Duration::days(1),
            min_temperature: Decimal::ZERO,
            max_temperature: Decimal::from(20),
            min_penalty_factor: Decimal::new(1, 1),
            max_penalty_factor: Decimal::new(2, 1),
        }])
        .await
        .unwrap();
    registries
        .lots
        .add_all(vec![PillLot {
            lot_id: LotId::new(LOT),
            name: "p7_name".to_string(),
            composition: "abc".to_string(),
            unit_price: Decimal::from(100),
            unit_count: 50,
            manufactured_at: now - Duration::days(1),
            expires_at: now + Duration::days(365),
            valid_status: true,
            issue: None,
        }])
        .await
        .unwrap();
    registries
        .shipments
        .add_all(vec![Shipment {
            shipment_id: ShipmentId::new(SHIPMENT),
            kind: ShipmentKind::Antibiotics,
            status: ShipmentStatus::InTransit,
            valid_status: true,
            temperature_readings: vec![],
            gps_readings: vec![],
            lot_id: LotId::new(LOT),
            contract_id: ContractId::new(CONTRACT),
        }])
        .await
        .unwrap();
}

pub fn participant(id: &str, role: Role, balance: i64) -> Participant {
    Participant {
        participant_id: ParticipantId::new(id),
        role,
        country: "USA".to_string(),
        account_balance: Decimal::from(balance),
    }
}

pub fn temperature(centigrade: i64) -> TemperatureReading {
    TemperatureReading {
        centigrade: Decimal::from(centigrade),
        humidity: None,
        device_id: DeviceId::new("sensor-1"),
        recorded_at: Utc::now(),
    }
}

pub fn gps(latitude: &str, longitude: &str) -> GpsReading {
    GpsReading {
        latitude: latitude.to_string(),
        latitude_dir: Compass::N,
        longitude: longitude.to_string(),
        longitude_dir: Compass::W,
        device_id: DeviceId::new("gps-1"),
        recorded_at: Utc::now(),
    }
}

pub async fn balance(
    registry: &Arc<dyn Registry<Participant>>,
    id: &str,
) -> Decimal {
    registry
        .get(&ParticipantId::new(id))
        .await
        .unwrap()
        .account_balance
}

/// Registry wrapper that fails `update` calls after a budget of successes,
/// for exercising the partial-application sharp edge.
pub struct FailingRegistry<T: Entity> {
    inner: Arc<dyn Registry<T>>,
    updates_before_failure: AtomicUsize,
}

impl<T: Entity> FailingRegistry<T> {
    pub fn new(inner: Arc<dyn Registry<T>>, updates_before_failure: usize) -> Self {
        Self {
            inner,
            updates_before_failure: AtomicUsize::new(updates_before_failure),
        }
    }
}

#[async_trait]
impl<T: Entity> Registry<T> for FailingRegistry<T> {
    async fn get(&self, id: &T::Id) -> Result<T> {
        self.inner.get(id).await
    }

    async fn update(&self, entity: T) -> Result<()> {
        let remaining = self.updates_before_failure.load(Ordering::SeqCst);
        if remaining == 0 {
            return Err(Error::Storage("injected update failure".to_string()));
        }
        self.updates_before_failure
            .store(remaining - 1, Ordering::SeqCst);
        self.inner.update(entity).await
    }

    async fn add_all(&self, entities: Vec<T>) -> Result<()> {
        self.inner.add_all(entities).await
    }
}
