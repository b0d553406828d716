//! Wiring of the four stores over one set of collections.

use std::sync::Arc;

use petclinic_db::{MemoryStore, OwnerRepository, PetRepository, VetRepository, VisitRepository};

use crate::owner::OwnerService;
use crate::pet::PetService;
use crate::vet::VetService;
use crate::visit::VisitService;

/// All clinic stores, sharing the same underlying collections.
///
/// Cheap to clone; every field holds `Arc`s.
#[derive(Clone)]
pub struct Clinic {
    /// Owner store.
    pub owners: OwnerService,
    /// Pet store.
    pub pets: PetService,
    /// Visit store.
    pub visits: VisitService,
    /// Vet store.
    pub vets: VetService,
}

impl Clinic {
    /// Build the stores from one repository per collection.
    pub fn new(
        owners: Arc<dyn OwnerRepository>,
        pets: Arc<dyn PetRepository>,
        visits: Arc<dyn VisitRepository>,
        vets: Arc<dyn VetRepository>,
    ) -> Self {
        let visits = VisitService::new(visits);
        let pets = PetService::new(pets, Arc::clone(&owners), visits.clone());
        let owners = OwnerService::new(owners, pets.clone());
        let vets = VetService::new(vets);

        Self {
            owners,
            pets,
            visits,
            vets,
        }
    }

    /// Build the stores over a backend that implements every collection.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: OwnerRepository + PetRepository + VisitRepository + VetRepository + 'static,
    {
        Self::new(store.clone(), store.clone(), store.clone(), store)
    }

    /// Stores over a fresh, empty [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(MemoryStore::new()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use petclinic_types::{Owner, Pet, Visit};

    use super::*;

    #[tokio::test]
    async fn rufus_scenario_end_to_end() {
        let clinic = Clinic::in_memory();
        let owner = clinic
            .owners
            .save(Owner::new("Dominik", "Picker", "Address", "Bielefeld", "1233232"))
            .await
            .unwrap();
        let rufus = clinic
            .pets
            .save(
                owner.id,
                Pet::new("Rufus", NaiveDate::from_ymd_opt(2015, 12, 1).unwrap(), "Dog"),
            )
            .await
            .unwrap();
        let today = chrono::Utc::now().date_naive();
        clinic
            .pets
            .add_visit(owner.id, rufus.id, Visit::new(today, "Doctor visit"))
            .await
            .unwrap();

        let loaded = clinic.owners.get_by_id(owner.id).await.unwrap().unwrap();
        let pet = loaded.pet(rufus.id).unwrap();
        assert_eq!(pet.visits.len(), 1);
        assert_eq!(pet.visits.first().unwrap().description, "Doctor visit");
        assert_eq!(clinic.visits.find_by_pet(rufus.id).await.unwrap(), pet.visits);
    }
}
