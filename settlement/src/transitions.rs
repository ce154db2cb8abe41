//! Shipment status transitions
//!
//! Each intermediate transition records the new status, announces it, and
//! persists the shipment — no payout logic attached. The forward-only
//! guard on [`Shipment::advance_status`] makes repeated or out-of-order
//! transition transactions harmless.
//!
//! [`Shipment::advance_status`]: registry_core::types::Shipment::advance_status

use crate::Result;
use registry_core::{
    events::{DomainEvent, EventKind},
    registry::Registries,
    types::{ShipmentId, ShipmentStatus},
};

/// Status transition handlers over the shipment registry
#[derive(Debug, Clone)]
pub struct ShipmentTransitions {
    registries: Registries,
}

impl ShipmentTransitions {
    /// Create transition handlers
    pub fn new(registries: Registries) -> Self {
        Self { registries }
    }

    /// Shipment packed and ready for pickup
    pub async fn packed(&self, shipment_id: &ShipmentId) -> Result<Vec<DomainEvent>> {
        self.transition(
            shipment_id,
            ShipmentStatus::Packed,
            EventKind::ShipmentPacked,
            "packed",
        )
        .await
    }

    /// Shipment picked up and ready for loading
    pub async fn picked_up(&self, shipment_id: &ShipmentId) -> Result<Vec<DomainEvent>> {
        self.transition(
            shipment_id,
            ShipmentStatus::PickedUp,
            EventKind::ShipmentPickedUp,
            "picked up",
        )
        .await
    }

    /// Shipment loaded onto the cargo ship
    pub async fn loaded(&self, shipment_id: &ShipmentId) -> Result<Vec<DomainEvent>> {
        self.transition(
            shipment_id,
            ShipmentStatus::Loaded,
            EventKind::ShipmentLoaded,
            "loaded",
        )
        .await
    }

    /// Shipment arrived at the destination port
    pub async fn in_port(&self, shipment_id: &ShipmentId) -> Result<Vec<DomainEvent>> {
        self.transition(
            shipment_id,
            ShipmentStatus::InPort,
            EventKind::ShipmentInPort,
            "in port",
        )
        .await
    }

    async fn transition(
        &self,
        shipment_id: &ShipmentId,
        status: ShipmentStatus,
        kind: EventKind,
        verb: &str,
    ) -> Result<Vec<DomainEvent>> {
        let mut shipment = self.registries.shipments.get(shipment_id).await?;

        if shipment.advance_status(status) {
            tracing::info!(shipment_id = %shipment.shipment_id, %status, "status advanced");
        } else {
            tracing::debug!(
                shipment_id = %shipment.shipment_id,
                current = %shipment.status,
                requested = %status,
                "regressive status transition ignored"
            );
        }

        let message = format!("Shipment {} {}", shipment.shipment_id, verb);
        let event = DomainEvent::new(kind, shipment.shipment_id.clone(), message);

        self.registries.shipments.update(shipment).await?;
        Ok(vec![event])
    }
}
