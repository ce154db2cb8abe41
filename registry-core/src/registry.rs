//! Generic entity registries
//!
//! Persistence is an external collaborator: the core logic receives one
//! registry handle per entity type and performs explicit read-modify-write
//! cycles on owned value copies. Registries are assumed durable, strongly
//! consistent, and single-writer-per-call.
//!
//! `InMemoryRegistry` is the in-process implementation used by tests and
//! the demo binary; a durable backend implements the same trait.

use crate::{
    error::{Error, Result},
    types::{Contract, Participant, PillLot, Role, Shipment},
};
use async_trait::async_trait;
use dashmap::DashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// A registry-managed entity
pub trait Entity: Clone + Send + Sync + 'static {
    /// Identifier type
    type Id: Clone + Eq + Hash + fmt::Display + Send + Sync + 'static;

    /// Entity kind name used in error messages
    const KIND: &'static str;

    /// Identifier of this entity
    fn id(&self) -> Self::Id;
}

impl Entity for Participant {
    type Id = crate::types::ParticipantId;

    const KIND: &'static str = "participant";

    fn id(&self) -> Self::Id {
        self.participant_id.clone()
    }
}

impl Entity for Contract {
    type Id = crate::types::ContractId;

    const KIND: &'static str = "contract";

    fn id(&self) -> Self::Id {
        self.contract_id.clone()
    }
}

impl Entity for Shipment {
    type Id = crate::types::ShipmentId;

    const KIND: &'static str = "shipment";

    fn id(&self) -> Self::Id {
        self.shipment_id.clone()
    }
}

impl Entity for PillLot {
    type Id = crate::types::LotId;

    const KIND: &'static str = "pill lot";

    fn id(&self) -> Self::Id {
        self.lot_id.clone()
    }
}

/// Entity registry
#[async_trait]
pub trait Registry<T: Entity>: Send + Sync {
    /// Fetch an owned copy of the entity
    async fn get(&self, id: &T::Id) -> Result<T>;

    /// Write back an updated entity; the id must already be registered
    async fn update(&self, entity: T) -> Result<()>;

    /// Register new entities; duplicate ids are rejected
    async fn add_all(&self, entities: Vec<T>) -> Result<()>;
}

/// In-memory registry backed by a concurrent map
pub struct InMemoryRegistry<T: Entity> {
    entries: DashMap<T::Id, T>,
}

impl<T: Entity> InMemoryRegistry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<T: Entity> Default for InMemoryRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> fmt::Debug for InMemoryRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryRegistry")
            .field("kind", &T::KIND)
            .field("len", &self.entries.len())
            .finish()
    }
}

#[async_trait]
impl<T: Entity> Registry<T> for InMemoryRegistry<T> {
    async fn get(&self, id: &T::Id) -> Result<T> {
        self.entries
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            })
    }

    async fn update(&self, entity: T) -> Result<()> {
        let id = entity.id();
        match self.entries.get_mut(&id) {
            Some(mut slot) => {
                *slot = entity;
                Ok(())
            }
            None => Err(Error::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            }),
        }
    }

    async fn add_all(&self, entities: Vec<T>) -> Result<()> {
        for entity in entities {
            let id = entity.id();
            if self.entries.contains_key(&id) {
                return Err(Error::AlreadyExists {
                    kind: T::KIND,
                    id: id.to_string(),
                });
            }
            self.entries.insert(id, entity);
        }
        Ok(())
    }
}

/// One registry handle per entity type, injected into every operation
#[derive(Clone)]
pub struct Registries {
    /// Manufacturer participants
    pub manufacturers: Arc<dyn Registry<Participant>>,

    /// Wholesaler participants
    pub wholesalers: Arc<dyn Registry<Participant>>,

    /// Shipper participants
    pub shippers: Arc<dyn Registry<Participant>>,

    /// Supply contracts
    pub contracts: Arc<dyn Registry<Contract>>,

    /// Shipments
    pub shipments: Arc<dyn Registry<Shipment>>,

    /// Pill lots
    pub lots: Arc<dyn Registry<PillLot>>,
}

impl Registries {
    /// Build a bundle of fresh in-memory registries
    pub fn in_memory() -> Self {
        Self {
            manufacturers: Arc::new(InMemoryRegistry::new()),
            wholesalers: Arc::new(InMemoryRegistry::new()),
            shippers: Arc::new(InMemoryRegistry::new()),
            contracts: Arc::new(InMemoryRegistry::new()),
            shipments: Arc::new(InMemoryRegistry::new()),
            lots: Arc::new(InMemoryRegistry::new()),
        }
    }

    /// Participant registry for the given role
    pub fn participants(&self, role: Role) -> &Arc<dyn Registry<Participant>> {
        match role {
            Role::Manufacturer => &self.manufacturers,
            Role::Wholesaler => &self.wholesalers,
            Role::Shipper => &self.shippers,
        }
    }
}

impl fmt::Debug for Registries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registries").finish_non_exhaustive()
    }
}
