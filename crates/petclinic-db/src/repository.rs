//! Collection-level store interfaces.
//!
//! One trait per collection, each exposing key-by-id access plus the
//! back-reference query that collection needs. Methods return boxed
//! futures so the traits stay object-safe and the backend can be picked at
//! runtime behind an `Arc<dyn ...>`.
//!
//! Implementations:
//!
//! - [`MemoryStore`](crate::memory::MemoryStore) -- process-local maps,
//!   used by tests and the `memory` backend
//! - [`PgDocumentStore`](crate::pg_store::PgDocumentStore) -- `PostgreSQL`
//!   tables holding `JSONB` documents
//!
//! All implementations return rows in insertion order. Saving a document
//! whose id already exists replaces it in place and keeps its position.

use futures::future::BoxFuture;
use petclinic_types::{OwnerId, PetId, Vet, VisitId};

use crate::document::{OwnerDocument, PetDocument, VisitDocument};
use crate::error::DbError;

/// Shorthand for the boxed future every store method returns.
pub type StoreFuture<'a, T> = BoxFuture<'a, Result<T, DbError>>;

/// Owner collection.
pub trait OwnerRepository: Send + Sync {
    /// Every owner, in insertion order.
    fn find_all(&self) -> StoreFuture<'_, Vec<OwnerDocument>>;

    /// Look up one owner.
    fn find_by_id(&self, id: OwnerId) -> StoreFuture<'_, Option<OwnerDocument>>;

    /// Owners whose last name contains `fragment`, ignoring case. The
    /// empty fragment matches every owner.
    fn find_by_last_name_containing<'a>(
        &'a self,
        fragment: &'a str,
    ) -> StoreFuture<'a, Vec<OwnerDocument>>;

    /// Insert or replace by id.
    fn save(&self, owner: OwnerDocument) -> StoreFuture<'_, OwnerDocument>;
}

/// Pet collection, keyed by pet id with an `owner_id` back-reference.
pub trait PetRepository: Send + Sync {
    /// Look up one pet.
    fn find_by_id(&self, id: PetId) -> StoreFuture<'_, Option<PetDocument>>;

    /// Look up one pet, only if it belongs to `owner_id`.
    fn find_by_id_and_owner_id(
        &self,
        id: PetId,
        owner_id: OwnerId,
    ) -> StoreFuture<'_, Option<PetDocument>>;

    /// Every pet of one owner, in insertion order.
    fn find_by_owner_id(&self, owner_id: OwnerId) -> StoreFuture<'_, Vec<PetDocument>>;

    /// Insert or replace by id.
    fn save(&self, pet: PetDocument) -> StoreFuture<'_, PetDocument>;

    /// Remove a pet. Returns whether a record existed.
    fn delete(&self, id: PetId) -> StoreFuture<'_, bool>;
}

/// Visit collection, keyed by visit id with a `pet_id` back-reference.
pub trait VisitRepository: Send + Sync {
    /// Look up one visit, whichever pet it belongs to.
    fn find_by_id(&self, id: VisitId) -> StoreFuture<'_, Option<VisitDocument>>;

    /// Every visit of one pet, in insertion order.
    fn find_by_pet_id(&self, pet_id: PetId) -> StoreFuture<'_, Vec<VisitDocument>>;

    /// Insert or replace by id.
    fn save(&self, visit: VisitDocument) -> StoreFuture<'_, VisitDocument>;
}

/// Vet collection. No relationships.
pub trait VetRepository: Send + Sync {
    /// Every vet, in insertion order.
    fn find_all(&self) -> StoreFuture<'_, Vec<Vet>>;

    /// Insert or replace by id.
    fn save(&self, vet: Vet) -> StoreFuture<'_, Vet>;

    /// Number of stored vets.
    fn count(&self) -> StoreFuture<'_, u64>;
}
