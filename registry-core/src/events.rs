//! Domain events and notification dispatch
//!
//! Business logic never emits directly: each operation returns the events
//! it produced, and the hosting layer dispatches them through a [`Notifier`]
//! after the transaction's persistence has committed. Delivery is
//! fire-and-forget; at-least-once is acceptable.

use crate::error::Result;
use crate::types::ShipmentId;
use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// A temperature reading violated the contract bounds
    TemperatureThreshold,
    /// A GPS reading matched the destination port
    ShipmentInPort,
    /// Shipment packed and ready for pickup
    ShipmentPacked,
    /// Shipment picked up by the shipper
    ShipmentPickedUp,
    /// Shipment loaded onto the cargo ship
    ShipmentLoaded,
    /// Shipment received and settled
    ShipmentReceived,
    /// Validity dispute opened on the shipment's pill lot
    DisputeOpened,
}

/// A domain event referencing its subject shipment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID
    pub event_id: Uuid,

    /// Event type tag
    pub kind: EventKind,

    /// Subject shipment
    pub shipment_id: ShipmentId,

    /// Human-readable message
    pub message: String,

    /// Offending temperature (threshold events only)
    pub temperature: Option<Decimal>,
}

impl DomainEvent {
    /// Create a new event
    pub fn new(kind: EventKind, shipment_id: ShipmentId, message: impl Into<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            kind,
            shipment_id,
            message: message.into(),
            temperature: None,
        }
    }

    /// Attach the offending temperature
    pub fn with_temperature(mut self, centigrade: Decimal) -> Self {
        self.temperature = Some(centigrade);
        self
    }
}

/// Event sink for post-commit dispatch
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Emit one event
    async fn emit(&self, event: &DomainEvent) -> Result<()>;
}

/// Notifier that writes events to the structured log
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn emit(&self, event: &DomainEvent) -> Result<()> {
        tracing::info!(
            event_id = %event.event_id,
            kind = ?event.kind,
            shipment_id = %event.shipment_id,
            temperature = ?event.temperature,
            "{}",
            event.message
        );
        Ok(())
    }
}

/// Notifier that buffers events in memory, for tests and offline inspection
#[derive(Debug, Default)]
pub struct BufferingNotifier {
    events: Mutex<Vec<DomainEvent>>,
}

impl BufferingNotifier {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain all buffered events
    pub fn drain(&self) -> Vec<DomainEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Snapshot of buffered events
    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().clone()
    }
}

#[async_trait]
impl Notifier for BufferingNotifier {
    async fn emit(&self, event: &DomainEvent) -> Result<()> {
        self.events.lock().push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_buffering_notifier_collects_events() {
        let notifier = BufferingNotifier::new();
        let event = DomainEvent::new(
            EventKind::ShipmentPacked,
            ShipmentId::new("SHIP_001"),
            "Shipment SHIP_001 packed",
        );

        notifier.emit(&event).await.unwrap();
        let drained = notifier.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].kind, EventKind::ShipmentPacked);
        assert!(notifier.events().is_empty());
    }

    #[test]
    fn test_threshold_event_carries_temperature() {
        let event = DomainEvent::new(
            EventKind::TemperatureThreshold,
            ShipmentId::new("SHIP_001"),
            "Temperature threshold violated",
        )
        .with_temperature(Decimal::from(25));

        assert_eq!(event.temperature, Some(Decimal::from(25)));
    }
}
