//! Visit store.
//!
//! The visit collection is the single source of truth for a pet's history.
//! Callers are responsible for checking that the pet exists; see
//! [`PetService::add_visit`](crate::pet::PetService::add_visit) for the
//! owner-scoped entry point that does.

use std::sync::Arc;

use petclinic_db::{VisitDocument, VisitRepository};
use petclinic_types::{PetId, Visit, VisitId};

use crate::error::ServiceError;

/// Creates and lists visits by owning pet.
#[derive(Clone)]
pub struct VisitService {
    visits: Arc<dyn VisitRepository>,
}

impl VisitService {
    /// Create a visit store over the given collection.
    pub fn new(visits: Arc<dyn VisitRepository>) -> Self {
        Self { visits }
    }

    /// Stamp `visit` with `pet_id`, persist it, and return the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] if the write fails.
    pub async fn create_visit(&self, pet_id: PetId, visit: Visit) -> Result<Visit, ServiceError> {
        let stored = self
            .visits
            .save(VisitDocument::from_visit(&visit, pet_id))
            .await?;

        tracing::debug!(visit_id = %stored.id, %pet_id, "Created visit");

        Ok(stored.into())
    }

    /// Look up one visit by id.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] if the read fails.
    pub async fn find_by_id(&self, visit_id: VisitId) -> Result<Option<Visit>, ServiceError> {
        Ok(self.visits.find_by_id(visit_id).await?.map(Visit::from))
    }

    /// Every visit recorded for `pet_id`. Empty if there are none.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] if the read fails.
    pub async fn find_by_pet(&self, pet_id: PetId) -> Result<Vec<Visit>, ServiceError> {
        let docs = self.visits.find_by_pet_id(pet_id).await?;
        Ok(docs.into_iter().map(Visit::from).collect())
    }
}
