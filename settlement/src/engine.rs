//! Settlement engine
//!
//! Turns a shipment receipt into a three-way balance adjustment, or opens a
//! validity dispute when the receipt declares the lot invalid.
//!
//! A settlement issues four independent persistence calls (manufacturer,
//! wholesaler, shipper, then shipment — balances before shipment state).
//! There is no multi-entity rollback: a failure partway through surfaces as
//! an error and leaves the earlier writes in place. This is a known
//! consistency gap of the registry model, covered by an explicit test.

use crate::{config::SplitConfig, payout::compute_payout, Result};
use chrono::{DateTime, Utc};
use registry_core::{
    events::{DomainEvent, EventKind},
    registry::Registries,
    types::{Contract, LotId, Shipment, ShipmentId, ShipmentStatus},
};
use rust_decimal::Decimal;

/// A shipment-received transaction
#[derive(Debug, Clone)]
pub struct ShipmentReceipt {
    /// Shipment being received
    pub shipment_id: ShipmentId,

    /// Whether the wholesaler accepts the shipment as valid
    pub is_valid: bool,

    /// The lot reported invalid (invalid receipts only)
    pub invalid_lot: Option<LotId>,

    /// Caller-supplied receipt timestamp
    pub received_at: DateTime<Utc>,
}

/// Settlement engine
#[derive(Debug, Clone)]
pub struct SettlementEngine {
    registries: Registries,
    split: SplitConfig,
}

impl SettlementEngine {
    /// Create a new engine; the split must be a valid partition of 1
    pub fn new(registries: Registries, split: SplitConfig) -> Result<Self> {
        split.validate()?;
        Ok(Self { registries, split })
    }

    /// Registry handles shared with the other components
    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    /// Process a shipment receipt.
    ///
    /// A valid receipt computes the payout and settles immediately. An
    /// invalid receipt marks shipment and lot invalid and opens a
    /// Pending/Pending dispute issue on the lot — no balances move until
    /// the dispute is resolved.
    pub async fn receive_shipment(&self, receipt: ShipmentReceipt) -> Result<Vec<DomainEvent>> {
        let mut shipment = self.registries.shipments.get(&receipt.shipment_id).await?;

        if receipt.is_valid {
            // All reads complete before any write; a missing reference
            // rejects the transaction with nothing persisted.
            let contract = self.registries.contracts.get(&shipment.contract_id).await?;
            let lot = self.registries.lots.get(&shipment.lot_id).await?;

            let amount = compute_payout(
                &contract,
                &lot,
                &shipment.temperature_readings,
                receipt.received_at,
            );

            tracing::info!(
                shipment_id = %shipment.shipment_id,
                contract_id = %contract.contract_id,
                %amount,
                "shipment received, settling"
            );

            self.settle(&contract, &mut shipment, amount).await
        } else {
            self.open_dispute(&mut shipment, receipt.invalid_lot.as_ref())
                .await
        }
    }

    /// Apply a computed payout as balance deltas across the three parties.
    ///
    /// The shipper's cut is the remainder after the manufacturer's, so the
    /// amounts credited always sum to the amount debited.
    pub(crate) async fn settle(
        &self,
        contract: &Contract,
        shipment: &mut Shipment,
        amount: Decimal,
    ) -> Result<Vec<DomainEvent>> {
        let mut manufacturer = self.registries.manufacturers.get(&contract.manufacturer).await?;
        let mut wholesaler = self.registries.wholesalers.get(&contract.wholesaler).await?;
        let mut shipper = self.registries.shippers.get(&contract.shipper).await?;

        let manufacturer_cut = amount * self.split.manufacturer_share;
        let shipper_cut = amount - manufacturer_cut;

        manufacturer.account_balance += manufacturer_cut;
        shipper.account_balance += shipper_cut;
        wholesaler.account_balance -= amount;

        shipment.advance_status(ShipmentStatus::Arrived);

        tracing::info!(
            manufacturer = %manufacturer.participant_id,
            manufacturer_balance = %manufacturer.account_balance,
            shipper = %shipper.participant_id,
            shipper_balance = %shipper.account_balance,
            wholesaler = %wholesaler.participant_id,
            wholesaler_balance = %wholesaler.account_balance,
            "balances adjusted"
        );

        // Balances before shipment state; order is significant only for
        // the partial-failure discussion above.
        self.registries.manufacturers.update(manufacturer).await?;
        self.registries.wholesalers.update(wholesaler).await?;
        self.registries.shippers.update(shipper).await?;
        self.registries.shipments.update(shipment.clone()).await?;

        let message = format!("Shipment {} received", shipment.shipment_id);
        Ok(vec![DomainEvent::new(
            EventKind::ShipmentReceived,
            shipment.shipment_id.clone(),
            message,
        )])
    }

    async fn open_dispute(
        &self,
        shipment: &mut Shipment,
        invalid_lot: Option<&LotId>,
    ) -> Result<Vec<DomainEvent>> {
        shipment.advance_status(ShipmentStatus::Arrived);
        shipment.valid_status = false;

        let mut events = Vec::new();

        // The lot-id guard keeps a mis-addressed report from opening a
        // dispute on an unrelated lot.
        if invalid_lot == Some(&shipment.lot_id) {
            let mut lot = self.registries.lots.get(&shipment.lot_id).await?;
            lot.valid_status = false;
            if lot.open_issue() {
                tracing::info!(
                    shipment_id = %shipment.shipment_id,
                    lot_id = %lot.lot_id,
                    "validity dispute opened"
                );
                events.push(DomainEvent::new(
                    EventKind::DisputeOpened,
                    shipment.shipment_id.clone(),
                    format!(
                        "Validity dispute opened for lot {} on shipment {}",
                        lot.lot_id, shipment.shipment_id
                    ),
                ));
            }
            self.registries.lots.update(lot).await?;
        } else {
            tracing::warn!(
                shipment_id = %shipment.shipment_id,
                reported_lot = ?invalid_lot,
                "invalid receipt names a lot this shipment does not carry"
            );
        }

        self.registries.shipments.update(shipment.clone()).await?;
        Ok(events)
    }
}
