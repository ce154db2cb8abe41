//! Core types for the cold-chain registry
//!
//! All types are designed for:
//! - Exact arithmetic (Decimal for money and temperatures)
//! - Value semantics (entities are owned copies, written back via `update`)
//! - Deterministic behavior (timestamps supplied by the caller)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Participant identifier (e-mail style id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Create new participant ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contract identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractId(String);

impl ContractId {
    /// Create new contract ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shipment identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShipmentId(String);

impl ShipmentId {
    /// Create new shipment ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pill lot identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LotId(String);

impl LotId {
    /// Create new lot ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Telemetry device identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceId(String);

impl DeviceId {
    /// Create new device ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contract party role
///
/// Resolved once at the service boundary from the caller's identity and
/// passed into operations as an explicit parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Produces the pill lot and receives 85% of the payout
    Manufacturer,
    /// Receives the shipment and funds the payout
    Wholesaler,
    /// Carries the shipment and receives 15% of the payout
    Shipper,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Manufacturer => write!(f, "manufacturer"),
            Role::Wholesaler => write!(f, "wholesaler"),
            Role::Shipper => write!(f, "shipper"),
        }
    }
}

/// A contract party with a settlement account balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    /// Participant ID
    pub participant_id: ParticipantId,

    /// Role of this party
    pub role: Role,

    /// Country of registration
    pub country: String,

    /// Settlement account balance
    pub account_balance: Decimal,
}

/// Supply contract between the three parties
///
/// Immutable after creation for settlement purposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    /// Contract ID
    pub contract_id: ContractId,

    /// Manufacturer party
    pub manufacturer: ParticipantId,

    /// Shipper party
    pub shipper: ParticipantId,

    /// Wholesaler party
    pub wholesaler: ParticipantId,

    /// Arrival deadline; late delivery forfeits the payout entirely
    pub arrival_deadline: DateTime<Utc>,

    /// Minimum cargo temperature (°C)
    pub min_temperature: Decimal,

    /// Maximum cargo temperature (°C)
    pub max_temperature: Decimal,

    /// Penalty per degree below minimum, per unit
    pub min_penalty_factor: Decimal,

    /// Penalty per degree above maximum, per unit
    pub max_penalty_factor: Decimal,
}

/// Shipment status
///
/// Transitions move only forward:
/// `InTransit → Packed → PickedUp → Loaded → InPort → Arrived`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum ShipmentStatus {
    /// Initial state
    InTransit = 1,
    /// Packed and ready for pickup
    Packed = 2,
    /// Picked up by the shipper
    PickedUp = 3,
    /// Loaded onto the cargo ship
    Loaded = 4,
    /// Arrived at the destination port
    InPort = 5,
    /// Received by the wholesaler (terminal)
    Arrived = 6,
}

impl ShipmentStatus {
    fn rank(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShipmentStatus::InTransit => write!(f, "IN_TRANSIT"),
            ShipmentStatus::Packed => write!(f, "PACKED"),
            ShipmentStatus::PickedUp => write!(f, "PICKED_UP"),
            ShipmentStatus::Loaded => write!(f, "LOADED"),
            ShipmentStatus::InPort => write!(f, "IN_PORT"),
            ShipmentStatus::Arrived => write!(f, "ARRIVED"),
        }
    }
}

/// Kind of pharmaceutical cargo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipmentKind {
    /// Antibiotics
    Antibiotics,
    /// Vaccines
    Vaccines,
    /// Painkillers
    Painkillers,
}

/// A shipment of one pill lot under one contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipment {
    /// Shipment ID
    pub shipment_id: ShipmentId,

    /// Kind of cargo
    pub kind: ShipmentKind,

    /// Current status
    pub status: ShipmentStatus,

    /// False while a validity dispute is open
    pub valid_status: bool,

    /// Temperature readings in insertion order (never sorted in place)
    pub temperature_readings: Vec<TemperatureReading>,

    /// GPS readings in insertion order
    pub gps_readings: Vec<GpsReading>,

    /// The pill lot carried by this shipment
    pub lot_id: LotId,

    /// The governing contract
    pub contract_id: ContractId,
}

impl Shipment {
    /// Advance status if `next` is strictly later in the lifecycle.
    ///
    /// Returns whether the status changed; regressive or repeated
    /// transitions leave the status untouched.
    pub fn advance_status(&mut self, next: ShipmentStatus) -> bool {
        if next.rank() > self.status.rank() {
            self.status = next;
            true
        } else {
            false
        }
    }
}

/// Two-party approval state of an open validity dispute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Approval {
    /// Awaiting approval
    Pending,
    /// Approved
    Approved,
}

/// Validity dispute on a pill lot
///
/// Present on the lot only while the dispute is open; cleared when both
/// parties have approved and settlement has run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Manufacturer-side approval
    pub sender: Approval,

    /// Wholesaler-side approval
    pub receiver: Approval,
}

impl Issue {
    /// Open a new dispute with both approvals pending
    pub fn open() -> Self {
        Self {
            sender: Approval::Pending,
            receiver: Approval::Pending,
        }
    }

    /// Record an approval for `role`.
    ///
    /// The manufacturer approves the sender side, the wholesaler the
    /// receiver side. Any other role has no approval seat and causes no
    /// state change; returns whether the role had a seat.
    pub fn approve(&mut self, role: Role) -> bool {
        match role {
            Role::Manufacturer => {
                self.sender = Approval::Approved;
                true
            }
            Role::Wholesaler => {
                self.receiver = Approval::Approved;
                true
            }
            Role::Shipper => false,
        }
    }

    /// Whether both approvals are present
    pub fn is_resolved(&self) -> bool {
        self.sender == Approval::Approved && self.receiver == Approval::Approved
    }
}

/// A lot of pills
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PillLot {
    /// Lot ID
    pub lot_id: LotId,

    /// Commercial name
    pub name: String,

    /// Chemical composition
    pub composition: String,

    /// Price per unit
    pub unit_price: Decimal,

    /// Number of units in the lot
    pub unit_count: u32,

    /// Manufacturing timestamp
    pub manufactured_at: DateTime<Utc>,

    /// Expiry timestamp
    pub expires_at: DateTime<Utc>,

    /// False while a validity dispute is open
    pub valid_status: bool,

    /// Open validity dispute, if any
    pub issue: Option<Issue>,
}

impl PillLot {
    /// Payout before adjustment: `unit_price × unit_count`
    pub fn base_value(&self) -> Decimal {
        self.unit_price * Decimal::from(self.unit_count)
    }

    /// Open a validity dispute on this lot.
    ///
    /// Returns whether a new issue was created; reopening an already open
    /// dispute is a no-op.
    pub fn open_issue(&mut self) -> bool {
        if self.issue.is_some() {
            return false;
        }
        self.issue = Some(Issue::open());
        true
    }
}

/// A single temperature reading from an in-transit device
///
/// Immutable once recorded; appended, never edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemperatureReading {
    /// Temperature in °C
    pub centigrade: Decimal,

    /// Relative humidity, when the device reports it
    pub humidity: Option<Decimal>,

    /// Reporting device
    pub device_id: DeviceId,

    /// Reading timestamp (device clock)
    pub recorded_at: DateTime<Utc>,
}

/// Compass direction suffix for GPS coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Compass {
    /// North
    N,
    /// South
    S,
    /// East
    E,
    /// West
    W,
}

impl fmt::Display for Compass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compass::N => write!(f, "N"),
            Compass::S => write!(f, "S"),
            Compass::E => write!(f, "E"),
            Compass::W => write!(f, "W"),
        }
    }
}

/// A single GPS reading from an in-transit device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GpsReading {
    /// Latitude, formatted by the device (e.g. "40.6840")
    pub latitude: String,

    /// Latitude hemisphere
    pub latitude_dir: Compass,

    /// Longitude, formatted by the device (e.g. "74.0062")
    pub longitude: String,

    /// Longitude hemisphere
    pub longitude_dir: Compass,

    /// Reporting device
    pub device_id: DeviceId,

    /// Reading timestamp (device clock)
    pub recorded_at: DateTime<Utc>,
}

impl GpsReading {
    /// Position string in the `/LAT:{lat}{dir}/LONG:{long}{dir}` form used
    /// for destination-port matching.
    pub fn position(&self) -> String {
        format!(
            "/LAT:{}{}/LONG:{}{}",
            self.latitude, self.latitude_dir, self.longitude, self.longitude_dir
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_moves_only_forward() {
        let mut shipment = Shipment {
            shipment_id: ShipmentId::new("SHIP_001"),
            kind: ShipmentKind::Antibiotics,
            status: ShipmentStatus::InTransit,
            valid_status: true,
            temperature_readings: vec![],
            gps_readings: vec![],
            lot_id: LotId::new("p7"),
            contract_id: ContractId::new("CON_001"),
        };

        assert!(shipment.advance_status(ShipmentStatus::Packed));
        assert_eq!(shipment.status, ShipmentStatus::Packed);

        // Repeating or regressing is ignored
        assert!(!shipment.advance_status(ShipmentStatus::Packed));
        assert!(!shipment.advance_status(ShipmentStatus::InTransit));
        assert_eq!(shipment.status, ShipmentStatus::Packed);

        // Skipping ahead is allowed (receipt can arrive before port telemetry)
        assert!(shipment.advance_status(ShipmentStatus::Arrived));
        assert!(!shipment.advance_status(ShipmentStatus::InPort));
        assert_eq!(shipment.status, ShipmentStatus::Arrived);
    }

    #[test]
    fn test_issue_approval_state_machine() {
        let mut issue = Issue::open();
        assert!(!issue.is_resolved());

        // The shipper has no approval seat
        assert!(!issue.approve(Role::Shipper));
        assert_eq!(issue.sender, Approval::Pending);
        assert_eq!(issue.receiver, Approval::Pending);

        assert!(issue.approve(Role::Manufacturer));
        assert_eq!(issue.sender, Approval::Approved);
        assert!(!issue.is_resolved());

        assert!(issue.approve(Role::Wholesaler));
        assert!(issue.is_resolved());
    }

    #[test]
    fn test_lot_issue_opens_once() {
        let mut lot = test_lot();
        assert!(lot.open_issue());
        assert!(!lot.open_issue());
        assert_eq!(lot.issue, Some(Issue::open()));
    }

    #[test]
    fn test_base_value() {
        let lot = test_lot();
        assert_eq!(lot.base_value(), Decimal::from(5000));
    }

    #[test]
    fn test_gps_position_format() {
        let reading = GpsReading {
            latitude: "40.6840".to_string(),
            latitude_dir: Compass::N,
            longitude: "74.0062".to_string(),
            longitude_dir: Compass::W,
            device_id: DeviceId::new("gps-1"),
            recorded_at: Utc::now(),
        };

        assert_eq!(reading.position(), "/LAT:40.6840N/LONG:74.0062W");
    }

    fn test_lot() -> PillLot {
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
}
