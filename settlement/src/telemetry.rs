//! Telemetry ingest
//!
//! Appends temperature and GPS readings to a shipment's history and raises
//! threshold/location events. Readings are kept in insertion order; the
//! payout calculator scans for extremes itself.

use crate::Result;
use registry_core::{
    events::{DomainEvent, EventKind},
    registry::Registries,
    types::{GpsReading, ShipmentId, TemperatureReading},
};

/// Telemetry ingest over the shipment and contract registries
#[derive(Debug, Clone)]
pub struct TelemetryIngest {
    registries: Registries,
    destination_port: String,
}

impl TelemetryIngest {
    /// Create an ingest bound to the configured destination-port literal
    pub fn new(registries: Registries, destination_port: impl Into<String>) -> Self {
        Self {
            registries,
            destination_port: destination_port.into(),
        }
    }

    /// Append a temperature reading to the shipment's history.
    ///
    /// Raises a threshold event when the reading falls outside the
    /// contract's temperature bounds; always persists the shipment.
    pub async fn record_temperature(
        &self,
        shipment_id: &ShipmentId,
        reading: TemperatureReading,
    ) -> Result<Vec<DomainEvent>> {
        let mut shipment = self.registries.shipments.get(shipment_id).await?;
        let contract = self.registries.contracts.get(&shipment.contract_id).await?;

        let centigrade = reading.centigrade;
        let device_id = reading.device_id.clone();

        tracing::debug!(
            shipment_id = %shipment.shipment_id,
            device_id = %device_id,
            %centigrade,
            humidity = ?reading.humidity,
            "temperature reading recorded"
        );

        shipment.temperature_readings.push(reading);

        let mut events = Vec::new();
        if centigrade < contract.min_temperature || centigrade > contract.max_temperature {
            let message = format!(
                "Temperature threshold violated by device {} for shipment {}",
                device_id, shipment.shipment_id
            );
            tracing::warn!(
                shipment_id = %shipment.shipment_id,
                device_id = %device_id,
                %centigrade,
                "temperature threshold violated"
            );
            events.push(
                DomainEvent::new(
                    EventKind::TemperatureThreshold,
                    shipment.shipment_id.clone(),
                    message,
                )
                .with_temperature(centigrade),
            );
        }

        self.registries.shipments.update(shipment).await?;
        Ok(events)
    }

    /// Append a GPS reading to the shipment's history.
    ///
    /// Raises an in-port event when the formatted position exactly equals
    /// the destination-port literal. This is a string match, not a
    /// geodesic radius check; see DESIGN.md.
    pub async fn record_gps(
        &self,
        shipment_id: &ShipmentId,
        reading: GpsReading,
    ) -> Result<Vec<DomainEvent>> {
        let mut shipment = self.registries.shipments.get(shipment_id).await?;

        let position = reading.position();
        shipment.gps_readings.push(reading);

        let mut events = Vec::new();
        if position == self.destination_port {
            let message = format!(
                "Shipment has reached the destination port of {}",
                position
            );
            tracing::info!(shipment_id = %shipment.shipment_id, %position, "shipment in port");
            events.push(DomainEvent::new(
                EventKind::ShipmentInPort,
                shipment.shipment_id.clone(),
                message,
            ));
        }

        self.registries.shipments.update(shipment).await?;
        Ok(events)
    }
}
