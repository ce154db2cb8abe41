//! End-to-end demo against in-memory registries
//!
//! Seeds the three parties, a contract, a pill lot, and a shipment, then
//! drives a full lifecycle: telemetry, status transitions, and a valid
//! receipt that settles the payout.

use chrono::{Duration, Utc};
use registry_core::{
    registry::Registries,
    types::{
        Compass, Contract, ContractId, DeviceId, GpsReading, LotId, Participant, ParticipantId,
        PillLot, Role, Shipment, ShipmentId, ShipmentKind, ShipmentStatus, TemperatureReading,
    },
    LogNotifier,
};
use rust_decimal::Decimal;
use settlement::{Config, ShipmentReceipt, TransactionProcessor};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = Config::default();
    let registries = Registries::in_memory();

    let now = Utc::now();
    seed(&registries, now).await?;

    let processor =
        TransactionProcessor::new(registries.clone(), &config, Arc::new(LogNotifier))?;

    let shipment_id = ShipmentId::new("SHIP_001");

    // In-transit telemetry: one excursion below the contract minimum.
    processor
        .record_temperature(&shipment_id, reading(Decimal::from(4), now))
        .await?;
    processor
        .record_temperature(&shipment_id, reading(Decimal::from(-2), now))
        .await?;

    processor.shipment_packed(&shipment_id).await?;
    processor.shipment_picked_up(&shipment_id).await?;
    processor.shipment_loaded(&shipment_id).await?;

    // GPS reading at the destination port raises the in-port event.
    processor
        .record_gps(
            &shipment_id,
            GpsReading {
                latitude: "40.6840".to_string(),
                latitude_dir: Compass::N,
                longitude: "74.0062".to_string(),
                longitude_dir: Compass::W,
                device_id: DeviceId::new("gps-1"),
                recorded_at: now,
            },
        )
        .await?;
    processor.shipment_in_port(&shipment_id).await?;

    // On-time valid receipt settles the payout.
    processor
        .shipment_received(ShipmentReceipt {
            shipment_id: shipment_id.clone(),
            is_valid: true,
            invalid_lot: None,
            received_at: now + Duration::hours(12),
        })
        .await?;

    for (label, registry, id) in [
        ("manufacturer", &registries.manufacturers, "manufacturer7@email.com"),
        ("wholesaler", &registries.wholesalers, "wholesaler7@email.com"),
        ("shipper", &registries.shippers, "shipper7@email.com"),
    ] {
        let participant = registry.get(&ParticipantId::new(id)).await?;
        tracing::info!(%label, balance = %participant.account_balance, "closing balance");
    }

    Ok(())
}

fn reading(centigrade: Decimal, at: chrono::DateTime<Utc>) -> TemperatureReading {
    TemperatureReading {
        centigrade,
        humidity: Some(Decimal::from(40)),
        device_id: DeviceId::new("sensor-1"),
        recorded_at: at,
    }
}

async fn seed(registries: &Registries, now: chrono::DateTime<Utc>) -> anyhow::Result<()> {
    registries
        .manufacturers
        .add_all(vec![Participant {
            participant_id: ParticipantId::new("manufacturer7@email.com"),
            role: Role::Manufacturer,
            country: "USA".to_string(),
            account_balance: Decimal::from(1000),
        }])
        .await?;

    registries
        .wholesalers
        .add_all(vec![Participant {
            participant_id: ParticipantId::new("wholesaler7@email.com"),
            role: Role::Wholesaler,
            country: "UK".to_string(),
            account_balance: Decimal::from(50000),
        }])
        .await?;

    registries
        .shippers
        .add_all(vec![Participant {
            participant_id: ParticipantId::new("shipper7@email.com"),
            role: Role::Shipper,
            country: "Panama".to_string(),
            account_balance: Decimal::from(200),
        }])
        .await?;

    registries
        .contracts
        .add_all(vec![Contract {
            contract_id: ContractId::new("CON_001"),
            manufacturer: ParticipantId::new("manufacturer7@email.com"),
            shipper: ParticipantId::new("shipper7@email.com"),
            wholesaler: ParticipantId::new("wholesaler7@email.com"),
            arrival_deadline: now + Duration::days(1),
            min_temperature: Decimal::ZERO,
            max_temperature: Decimal::from(20),
            min_penalty_factor: Decimal::new(1, 1),
            max_penalty_factor: Decimal::new(2, 1),
        }])
        .await?;

    registries
        .lots
        .add_all(vec![PillLot {
            lot_id: LotId::new("p7"),
            name: "p7_name".to_string(),
            composition: "abc".to_string(),
            unit_price: Decimal::from(100),
            unit_count: 50,
            manufactured_at: now - Duration::days(1),
            expires_at: now + Duration::days(365),
            valid_status: true,
            issue: None,
        }])
        .await?;

    registries
        .shipments
        .add_all(vec![Shipment {
            shipment_id: ShipmentId::new("SHIP_001"),
            kind: ShipmentKind::Antibiotics,
            status: ShipmentStatus::InTransit,
            valid_status: true,
            temperature_readings: vec![],
            gps_readings: vec![],
            lot_id: LotId::new("p7"),
            contract_id: ContractId::new("CON_001"),
        }])
        .await?;

    Ok(())
}
