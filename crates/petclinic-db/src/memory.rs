//! Process-local document store.
//!
//! Each collection is a vector of documents behind a [`tokio::sync::RwLock`].
//! Upserts replace in place, so insertion order is stable across updates,
//! which matches the `seq` ordering of the `PostgreSQL` backend. Nothing
//! survives a restart.

use petclinic_types::{OwnerId, PetId, Vet, VetId, VisitId};
use tokio::sync::RwLock;

use crate::document::{OwnerDocument, PetDocument, VisitDocument};
use crate::repository::{
    OwnerRepository, PetRepository, StoreFuture, VetRepository, VisitRepository,
};

/// A document that can be stored in a [`Collection`].
trait Keyed: Clone {
    type Key: PartialEq + Copy;

    fn key(&self) -> Self::Key;
}

impl Keyed for OwnerDocument {
    type Key = OwnerId;

    fn key(&self) -> OwnerId {
        self.id
    }
}

impl Keyed for PetDocument {
    type Key = PetId;

    fn key(&self) -> PetId {
        self.id
    }
}

impl Keyed for VisitDocument {
    type Key = VisitId;

    fn key(&self) -> VisitId {
        self.id
    }
}

impl Keyed for Vet {
    type Key = VetId;

    fn key(&self) -> VetId {
        self.id
    }
}

/// Insertion-ordered rows with upsert-by-key.
#[derive(Debug)]
struct Collection<T> {
    rows: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T: Keyed> Collection<T> {
    fn upsert(&mut self, row: T) -> T {
        let key = row.key();
        match self.rows.iter_mut().find(|r| r.key() == key) {
            Some(slot) => *slot = row.clone(),
            None => self.rows.push(row.clone()),
        }
        row
    }

    fn get(&self, key: T::Key) -> Option<T> {
        self.rows.iter().find(|r| r.key() == key).cloned()
    }

    fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.iter().filter(|r| predicate(r)).cloned().collect()
    }

    fn remove(&mut self, key: T::Key) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.key() != key);
        self.rows.len() != before
    }

    fn count(&self) -> u64 {
        u64::try_from(self.rows.len()).unwrap_or(u64::MAX)
    }
}

/// In-memory implementation of every repository trait.
#[derive(Debug, Default)]
pub struct MemoryStore {
    owners: RwLock<Collection<OwnerDocument>>,
    pets: RwLock<Collection<PetDocument>>,
    visits: RwLock<Collection<VisitDocument>>,
    vets: RwLock<Collection<Vet>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl OwnerRepository for MemoryStore {
    fn find_all(&self) -> StoreFuture<'_, Vec<OwnerDocument>> {
        Box::pin(async move { Ok(self.owners.read().await.rows.clone()) })
    }

    fn find_by_id(&self, id: OwnerId) -> StoreFuture<'_, Option<OwnerDocument>> {
        Box::pin(async move { Ok(self.owners.read().await.get(id)) })
    }

    fn find_by_last_name_containing<'a>(
        &'a self,
        fragment: &'a str,
    ) -> StoreFuture<'a, Vec<OwnerDocument>> {
        Box::pin(async move {
            let needle = fragment.to_lowercase();
            let owners = self.owners.read().await;
            Ok(owners.filter(|o| o.last_name.to_lowercase().contains(&needle)))
        })
    }

    fn save(&self, owner: OwnerDocument) -> StoreFuture<'_, OwnerDocument> {
        Box::pin(async move { Ok(self.owners.write().await.upsert(owner)) })
    }
}

impl PetRepository for MemoryStore {
    fn find_by_id(&self, id: PetId) -> StoreFuture<'_, Option<PetDocument>> {
        Box::pin(async move { Ok(self.pets.read().await.get(id)) })
    }

    fn find_by_id_and_owner_id(
        &self,
        id: PetId,
        owner_id: OwnerId,
    ) -> StoreFuture<'_, Option<PetDocument>> {
        Box::pin(async move {
            let pet = self.pets.read().await.get(id);
            Ok(pet.filter(|p| p.owner_id == owner_id))
        })
    }

    fn find_by_owner_id(&self, owner_id: OwnerId) -> StoreFuture<'_, Vec<PetDocument>> {
        Box::pin(async move { Ok(self.pets.read().await.filter(|p| p.owner_id == owner_id)) })
    }

    fn save(&self, pet: PetDocument) -> StoreFuture<'_, PetDocument> {
        Box::pin(async move { Ok(self.pets.write().await.upsert(pet)) })
    }

    fn delete(&self, id: PetId) -> StoreFuture<'_, bool> {
        Box::pin(async move { Ok(self.pets.write().await.remove(id)) })
    }
}

impl VisitRepository for MemoryStore {
    fn find_by_id(&self, id: VisitId) -> StoreFuture<'_, Option<VisitDocument>> {
        Box::pin(async move { Ok(self.visits.read().await.get(id)) })
    }

    fn find_by_pet_id(&self, pet_id: PetId) -> StoreFuture<'_, Vec<VisitDocument>> {
        Box::pin(async move { Ok(self.visits.read().await.filter(|v| v.pet_id == pet_id)) })
    }

    fn save(&self, visit: VisitDocument) -> StoreFuture<'_, VisitDocument> {
        Box::pin(async move { Ok(self.visits.write().await.upsert(visit)) })
    }
}

impl VetRepository for MemoryStore {
    fn find_all(&self) -> StoreFuture<'_, Vec<Vet>> {
        Box::pin(async move { Ok(self.vets.read().await.rows.clone()) })
    }

    fn save(&self, vet: Vet) -> StoreFuture<'_, Vet> {
        Box::pin(async move { Ok(self.vets.write().await.upsert(vet)) })
    }

    fn count(&self) -> StoreFuture<'_, u64> {
        Box::pin(async move { Ok(self.vets.read().await.count()) })
    }
}
