//! Vet store. Vets are independent of the owner/pet/visit aggregate.

use std::sync::Arc;

use petclinic_db::VetRepository;
use petclinic_types::Vet;

use crate::error::ServiceError;

/// Reads and writes vets.
#[derive(Clone)]
pub struct VetService {
    vets: Arc<dyn VetRepository>,
}

impl VetService {
    /// Create a vet store.
    pub fn new(vets: Arc<dyn VetRepository>) -> Self {
        Self { vets }
    }

    /// Every vet in store order.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] if the read fails.
    pub async fn find_all(&self) -> Result<Vec<Vet>, ServiceError> {
        Ok(self.vets.find_all().await?)
    }

    /// Upsert a vet by id.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] if the write fails.
    pub async fn save(&self, vet: Vet) -> Result<Vet, ServiceError> {
        let vet = self.vets.save(vet).await?;
        tracing::debug!(vet_id = %vet.id, "Saved vet");
        Ok(vet)
    }

    /// Insert the default vets if there are none yet. Returns how many were
    /// inserted.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] if a store call fails.
    pub async fn seed_vets(&self) -> Result<usize, ServiceError> {
        let existing = self.vets.count().await?;
        if existing > 0 {
            tracing::debug!(existing, "Vets already present, skipping seed");
            return Ok(0);
        }

        let defaults = default_vets();
        let inserted = defaults.len();
        for vet in defaults {
            self.vets.save(vet).await?;
        }

        tracing::info!(inserted, "Seeded default vets");
        Ok(inserted)
    }
}

fn default_vets() -> Vec<Vet> {
    vec![
        Vet::new(
            "Frank",
            "Schmitt",
            vec![String::from("Dental"), String::from("Radiology")],
        ),
        Vet::new(
            "Emma",
            "Watson",
            vec![String::from("Oncology"), String::from("Physical Therapy")],
        ),
    ]
}
