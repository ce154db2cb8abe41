//! ColdChain Settlement Engine
//!
//! Settlement and dispute resolution for a pharmaceutical cold-chain
//! supply contract: a shipment of pills moves manufacturer → shipper →
//! wholesaler under temperature and GPS telemetry, and a payout is
//! computed and settled across the three parties from the contract's
//! service-level terms.
//!
//! # Flow
//!
//! 1. **Telemetry**: readings append to the shipment's history; threshold
//!    and in-port events are raised along the way
//! 2. **Receipt**: a valid receipt computes the payout (on-time bonus is
//!    the full lot value; temperature excursions deduct per-unit
//!    penalties; late arrival forfeits everything) and settles 85/15
//!    manufacturer/shipper against the wholesaler
//! 3. **Dispute**: an invalid receipt opens a two-party approval issue on
//!    the pill lot; the transaction that completes the second approval
//!    settles identically to the valid path
//!
//! Every operation executes as a single unit of work against injected
//! registries and returns the domain events it produced; the
//! [`TransactionProcessor`] dispatches them after persistence commits.
//!
//! # Example
//!
//! ```no_run
//! use registry_core::{LogNotifier, Registries};
//! use settlement::{Config, TransactionProcessor};
//! use std::sync::Arc;
//!
//! # fn main() -> settlement::Result<()> {
//! let config = Config::default();
//! let registries = Registries::in_memory();
//! let processor = TransactionProcessor::new(registries, &config, Arc::new(LogNotifier))?;
//! # let _ = processor;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod config;
pub mod dispute;
pub mod engine;
pub mod error;
pub mod payout;
pub mod processor;
pub mod telemetry;
pub mod transitions;

// Re-exports
pub use config::{Config, SplitConfig};
pub use dispute::{DisputeResolver, IssueResolution};
pub use engine::{SettlementEngine, ShipmentReceipt};
pub use error::{Error, Result};
pub use payout::compute_payout;
pub use processor::TransactionProcessor;
pub use telemetry::TelemetryIngest;
pub use transitions::ShipmentTransitions;
