//! Error type shared by every store in this crate.

use petclinic_db::DbError;
use petclinic_types::{OwnerId, PetId};
use uuid::Uuid;

/// Errors returned by the owner, pet, visit and vet stores.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// No entity of this kind exists under the given key. Also used when a
    /// child references a parent that does not resolve.
    #[error("{entity} with ID {id} not found")]
    NotFound {
        /// Entity kind, e.g. `"Owner"`.
        entity: &'static str,
        /// The id that failed to resolve.
        id: Uuid,
    },

    /// The underlying document store failed.
    #[error("store error: {0}")]
    Store(#[from] DbError),
}

impl ServiceError {
    /// Not-found for an owner id.
    pub fn owner_not_found(id: OwnerId) -> Self {
        Self::NotFound {
            entity: "Owner",
            id: id.into_inner(),
        }
    }

    /// Not-found for a pet id.
    pub fn pet_not_found(id: PetId) -> Self {
        Self::NotFound {
            entity: "Pet",
            id: id.into_inner(),
        }
    }

    /// Whether this is a not-found signal rather than a store failure.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
