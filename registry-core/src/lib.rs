//! ColdChain Registry Core
//!
//! Entity model and registry abstraction for the cold-chain settlement
//! engine.
//!
//! # Architecture
//!
//! - **Value semantics**: entities are fetched as owned copies and written
//!   back via explicit `update` calls; no ambient shared state
//! - **Injected repositories**: one registry handle per entity type, passed
//!   into every operation; in-memory fakes make tests deterministic
//! - **Event outbox**: operations return the domain events they produced;
//!   dispatch happens after the transaction commits
//!
//! # Invariants
//!
//! - Shipment status moves only forward
//! - A dispute issue exists only while the dispute is open
//! - Temperature readings are append-only

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod error;
pub mod events;
pub mod registry;
pub mod types;

// Re-exports
pub use error::{Error, Result};
pub use events::{BufferingNotifier, DomainEvent, EventKind, LogNotifier, Notifier};
pub use registry::{Entity, InMemoryRegistry, Registries, Registry};
pub use types::{
    Approval, Compass, Contract, ContractId, DeviceId, GpsReading, Issue, LotId, Participant,
    ParticipantId, PillLot, Role, Shipment, ShipmentId, ShipmentKind, ShipmentStatus,
    TemperatureReading,
};
