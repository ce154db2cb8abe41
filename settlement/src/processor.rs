//! Transaction processor
//!
//! Hosting-side orchestrator: runs one transaction as a unit of work
//! against the registries, then dispatches the events it produced through
//! the notifier. Dispatch happens strictly after the transaction's
//! persistence has completed; a dispatch failure is logged, not surfaced —
//! delivery is fire-and-forget.

use crate::{
    config::Config,
    dispute::{DisputeResolver, IssueResolution},
    engine::{SettlementEngine, ShipmentReceipt},
    telemetry::TelemetryIngest,
    transitions::ShipmentTransitions,
    Result,
};
use registry_core::{
    events::{DomainEvent, Notifier},
    registry::Registries,
    types::{GpsReading, ShipmentId, TemperatureReading},
};
use std::sync::Arc;

/// Transaction processor bundling the four components and a notifier
pub struct TransactionProcessor {
    ingest: TelemetryIngest,
    transitions: ShipmentTransitions,
    engine: SettlementEngine,
    resolver: DisputeResolver,
    notifier: Arc<dyn Notifier>,
}

impl TransactionProcessor {
    /// Wire the components against one registry bundle
    pub fn new(
        registries: Registries,
        config: &Config,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let engine = SettlementEngine::new(registries.clone(), config.split.clone())?;
        Ok(Self {
            ingest: TelemetryIngest::new(registries.clone(), config.destination_port.clone()),
            transitions: ShipmentTransitions::new(registries),
            resolver: DisputeResolver::new(engine.clone()),
            engine,
            notifier,
        })
    }

    /// Record a temperature reading
    pub async fn record_temperature(
        &self,
        shipment_id: &ShipmentId,
        reading: TemperatureReading,
    ) -> Result<Vec<DomainEvent>> {
        let events = self.ingest.record_temperature(shipment_id, reading).await?;
        self.dispatch(&events).await;
        Ok(events)
    }

    /// Record a GPS reading
    pub async fn record_gps(
        &self,
        shipment_id: &ShipmentId,
        reading: GpsReading,
    ) -> Result<Vec<DomainEvent>> {
        let events = self.ingest.record_gps(shipment_id, reading).await?;
        self.dispatch(&events).await;
        Ok(events)
    }

    /// Shipment packed
    pub async fn shipment_packed(&self, shipment_id: &ShipmentId) -> Result<Vec<DomainEvent>> {
        let events = self.transitions.packed(shipment_id).await?;
        self.dispatch(&events).await;
        Ok(events)
    }

    /// Shipment picked up
    pub async fn shipment_picked_up(&self, shipment_id: &ShipmentId) -> Result<Vec<DomainEvent>> {
        let events = self.transitions.picked_up(shipment_id).await?;
        self.dispatch(&events).await;
        Ok(events)
    }

    /// Shipment loaded
    pub async fn shipment_loaded(&self, shipment_id: &ShipmentId) -> Result<Vec<DomainEvent>> {
        let events = self.transitions.loaded(shipment_id).await?;
        self.dispatch(&events).await;
        Ok(events)
    }

    /// Shipment in port
    pub async fn shipment_in_port(&self, shipment_id: &ShipmentId) -> Result<Vec<DomainEvent>> {
        let events = self.transitions.in_port(shipment_id).await?;
        self.dispatch(&events).await;
        Ok(events)
    }

    /// Shipment received (valid or disputed)
    pub async fn shipment_received(&self, receipt: ShipmentReceipt) -> Result<Vec<DomainEvent>> {
        let events = self.engine.receive_shipment(receipt).await?;
        self.dispatch(&events).await;
        Ok(events)
    }

    /// Dispute resolution approval
    pub async fn issue_resolved(&self, resolution: IssueResolution) -> Result<Vec<DomainEvent>> {
        let events = self.resolver.resolve_issue(resolution).await?;
        self.dispatch(&events).await;
        Ok(events)
    }

    async fn dispatch(&self, events: &[DomainEvent]) {
        for event in events {
            if let Err(e) = self.notifier.emit(event).await {
                tracing::warn!(event_id = %event.event_id, error = %e, "event dispatch failed");
            }
        }
    }
}

impl std::fmt::Debug for TransactionProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionProcessor").finish_non_exhaustive()
    }
}
