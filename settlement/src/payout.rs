//! Payout calculation
//!
//! Pure function of the contract terms, the shipment's temperature history,
//! and the arrival timestamp. Raises nothing and touches no state, which is
//! what makes re-settlement idempotent and testable.

use chrono::{DateTime, Utc};
use registry_core::types::{Contract, PillLot, TemperatureReading};
use rust_decimal::Decimal;

/// Compute the payout owed for a delivered pill lot.
///
/// - Base amount is `unit_price × unit_count`.
/// - Arrival after the contract deadline forfeits the payout entirely.
/// - Otherwise the extreme temperature readings determine a per-unit
///   penalty: degrees below the minimum at `min_penalty_factor`, degrees
///   above the maximum at `max_penalty_factor`.
/// - The result is clamped to `[0, base]`; with no readings the base is
///   paid in full.
pub fn compute_payout(
    contract: &Contract,
    lot: &PillLot,
    readings: &[TemperatureReading],
    arrived_at: DateTime<Utc>,
) -> Decimal {
    let base = lot.base_value();

    if arrived_at > contract.arrival_deadline {
        tracing::debug!(
            contract_id = %contract.contract_id,
            %arrived_at,
            deadline = %contract.arrival_deadline,
            "late shipment, payout forfeited"
        );
        return Decimal::ZERO;
    }

    let Some((lowest, highest)) = temperature_extremes(readings) else {
        return base;
    };

    let mut penalty_per_unit = Decimal::ZERO;

    if lowest < contract.min_temperature {
        penalty_per_unit += (contract.min_temperature - lowest) * contract.min_penalty_factor;
    }

    if highest > contract.max_temperature {
        penalty_per_unit += (highest - contract.max_temperature) * contract.max_penalty_factor;
    }

    let amount = base - penalty_per_unit * Decimal::from(lot.unit_count);
    amount.max(Decimal::ZERO)
}

/// True minimum and maximum over the full reading set, in one pass.
///
/// Readings arrive in insertion order, not sorted; the extremes must come
/// from a scan of every reading.
fn temperature_extremes(readings: &[TemperatureReading]) -> Option<(Decimal, Decimal)> {
    let mut centigrades = readings.iter().map(|r| r.centigrade);
    let first = centigrades.next()?;
    Some(centigrades.fold((first, first), |(lowest, highest), c| {
        (lowest.min(c), highest.max(c))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use registry_core::types::{ContractId, DeviceId, LotId, ParticipantId};

    fn contract(deadline: DateTime<Utc>) -> Contract {
        Contract {
            contract_id: ContractId::new("CON_001"),
            manufacturer: ParticipantId::new("manufacturer7@email.com"),
            shipper: ParticipantId::new("shipper7@email.com"),
            wholesaler: ParticipantId::new("wholesaler7@email.com"),
            arrival_deadline: deadline,
            min_temperature: Decimal::ZERO,
            max_temperature: Decimal::from(20),
            min_penalty_factor: Decimal::new(1, 1),
            max_penalty_factor: Decimal::new(2, 1),
        }
    }

    fn lot() -> PillLot {
        PillLot {
            lot_id: LotId::new("p7"),
            name: "p7_name".to_string(),
            composition: "abc".to_string(),
            unit_price: Decimal::from(100),
            unit_count: 50,
            manufactured_at: Utc::now(),
            expires_at: Utc::now(),
            valid_status: true,
            issue: None,
        }
    }

    fn readings(centigrades: &[i64]) -> Vec<TemperatureReading> {
        centigrades
            .iter()
            .map(|&c| TemperatureReading {
                centigrade: Decimal::from(c),
                humidity: None,
                device_id: DeviceId::new("sensor-1"),
                recorded_at: Utc::now(),
            })
            .collect()
    }

    #[test]
    fn test_both_bounds_violated() {
        // min penalty 2 * 0.1 = 0.2/unit, max penalty 5 * 0.2 = 1.0/unit,
        // deduction 1.2 * 50 = 60, payout 5000 - 60 = 4940
        let now = Utc::now();
        let payout = compute_payout(
            &contract(now + Duration::days(1)),
            &lot(),
            &readings(&[-2, 25]),
            now,
        );
        assert_eq!(payout, Decimal::from(4940));
    }

    #[test]
    fn test_late_arrival_forfeits_payout() {
        let now = Utc::now();
        let payout = compute_payout(
            &contract(now - Duration::hours(1)),
            &lot(),
            &readings(&[-2, 25]),
            now,
        );
        assert_eq!(payout, Decimal::ZERO);
    }

    #[test]
    fn test_no_readings_pays_base() {
        let now = Utc::now();
        let payout = compute_payout(&contract(now + Duration::days(1)), &lot(), &[], now);
        assert_eq!(payout, Decimal::from(5000));
    }

    #[test]
    fn test_in_range_readings_pay_base() {
        let now = Utc::now();
        let payout = compute_payout(
            &contract(now + Duration::days(1)),
            &lot(),
            &readings(&[0, 5, 20]),
            now,
        );
        assert_eq!(payout, Decimal::from(5000));
    }

    #[test]
    fn test_extreme_readings_clamp_to_zero() {
        let now = Utc::now();
        let payout = compute_payout(
            &contract(now + Duration::days(1)),
            &lot(),
            &readings(&[-500, 900]),
            now,
        );
        assert_eq!(payout, Decimal::ZERO);
    }

    #[test]
    fn test_extremes_found_regardless_of_order() {
        let now = Utc::now();
        let scrambled = compute_payout(
            &contract(now + Duration::days(1)),
            &lot(),
            &readings(&[5, 25, 3, -2, 10]),
            now,
        );
        let sorted = compute_payout(
            &contract(now + Duration::days(1)),
            &lot(),
            &readings(&[-2, 3, 5, 10, 25]),
            now,
        );
        assert_eq!(scrambled, sorted);
        assert_eq!(scrambled, Decimal::from(4940));
    }

    #[test]
    fn test_arrival_exactly_on_deadline_is_on_time() {
        let deadline = Utc::now();
        let payout = compute_payout(&contract(deadline), &lot(), &[], deadline);
        assert_eq!(payout, Decimal::from(5000));
    }
}
