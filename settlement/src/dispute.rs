//! Dispute resolution state machine
//!
//! An invalid receipt opens a Pending/Pending issue on the shipment's pill
//! lot. Resolution transactions then advance the two approval fields —
//! manufacturer approves the sender side, wholesaler the receiver side —
//! and the transaction that completes the second approval runs the same
//! payout-and-settle path as a valid receipt, with the resolution timestamp
//! standing in for the arrival time.
//!
//! Guards keep every other resolution transaction a no-op: a lot id that
//! does not match the shipment's lot, a role without an approval seat, or a
//! lot whose issue has already been cleared by a completed resolution.

use crate::{engine::SettlementEngine, payout::compute_payout, Result};
use chrono::{DateTime, Utc};
use registry_core::{
    events::DomainEvent,
    types::{LotId, Role, ShipmentId},
};

/// An issue-resolution transaction
#[derive(Debug, Clone)]
pub struct IssueResolution {
    /// Shipment whose lot is under dispute
    pub shipment_id: ShipmentId,

    /// The lot the caller claims to resolve
    pub resolved_lot: LotId,

    /// Caller role, resolved at the service boundary
    pub role: Role,

    /// Caller-supplied resolution timestamp; used as the arrival time for
    /// the payout computation when this transaction completes the dispute
    pub resolved_at: DateTime<Utc>,
}

/// Dispute resolver
#[derive(Debug, Clone)]
pub struct DisputeResolver {
    engine: SettlementEngine,
}

impl DisputeResolver {
    /// Create a resolver sharing the engine's registries and split
    pub fn new(engine: SettlementEngine) -> Self {
        Self { engine }
    }

    /// Process one resolution transaction.
    ///
    /// Settlement triggers exactly once per lot, on the transaction that
    /// completes the second approval; the issue is cleared at that point,
    /// so later resolutions find no open issue and change nothing.
    pub async fn resolve_issue(&self, resolution: IssueResolution) -> Result<Vec<DomainEvent>> {
        let registries = self.engine.registries();

        let mut shipment = registries.shipments.get(&resolution.shipment_id).await?;
        if shipment.lot_id != resolution.resolved_lot {
            tracing::debug!(
                shipment_id = %shipment.shipment_id,
                resolved_lot = %resolution.resolved_lot,
                "resolution names a lot this shipment does not carry, ignoring"
            );
            return Ok(Vec::new());
        }

        let mut lot = registries.lots.get(&shipment.lot_id).await?;
        let Some(issue) = lot.issue.as_mut() else {
            tracing::debug!(
                lot_id = %lot.lot_id,
                "no open issue on lot, ignoring resolution"
            );
            return Ok(Vec::new());
        };

        if !issue.approve(resolution.role) {
            // Documented permissiveness: a role without an approval seat is
            // silently ignored rather than rejected.
            tracing::debug!(
                lot_id = %lot.lot_id,
                role = %resolution.role,
                "caller role has no approval seat, ignoring resolution"
            );
            return Ok(Vec::new());
        }

        tracing::info!(
            lot_id = %lot.lot_id,
            role = %resolution.role,
            sender = ?issue.sender,
            receiver = ?issue.receiver,
            "dispute approval recorded"
        );

        let resolved = issue.is_resolved();

        // The approval write is persisted before any settlement runs.
        registries.lots.update(lot.clone()).await?;

        if !resolved {
            return Ok(Vec::new());
        }

        let contract = registries.contracts.get(&shipment.contract_id).await?;
        let amount = compute_payout(
            &contract,
            &lot,
            &shipment.temperature_readings,
            resolution.resolved_at,
        );

        tracing::info!(
            shipment_id = %shipment.shipment_id,
            lot_id = %lot.lot_id,
            %amount,
            "dispute resolved by both parties, settling"
        );

        let events = self.engine.settle(&contract, &mut shipment, amount).await?;

        // Restore validity and close the dispute; the issue exists only
        // while the dispute is open.
        lot.valid_status = true;
        shipment.valid_status = true;
        lot.issue = None;
        registries.lots.update(lot).await?;
        registries.shipments.update(shipment).await?;

        Ok(events)
    }
}
