//! Pet store.
//!
//! Pets are stored flat, with an `owner_id` back-reference and no visits.
//! Every read fills the visit list from the visit collection, keyed by the
//! pet's own id, so a returned pet always carries its complete history.
//! Saving a pet therefore never has to carry visits forward: an update
//! that omits them loses nothing.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::try_join_all;
use petclinic_db::{OwnerRepository, PetDocument, PetRepository};
use petclinic_types::{OwnerId, Pet, PetId, Visit, VisitId};

use crate::error::ServiceError;
use crate::visit::VisitService;

/// Reads and writes pets, attaching their visits.
#[derive(Clone)]
pub struct PetService {
    pets: Arc<dyn PetRepository>,
    owners: Arc<dyn OwnerRepository>,
    visits: VisitService,
}

impl PetService {
    /// Create a pet store.
    ///
    /// `owners` is only used to check that an owner exists before a pet is
    /// written under it.
    pub fn new(
        pets: Arc<dyn PetRepository>,
        owners: Arc<dyn OwnerRepository>,
        visits: VisitService,
    ) -> Self {
        Self {
            pets,
            owners,
            visits,
        }
    }

    /// Look up a pet and fill its visits.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] if a read fails.
    pub async fn find_by_id(&self, pet_id: PetId) -> Result<Option<Pet>, ServiceError> {
        match self.pets.find_by_id(pet_id).await? {
            Some(doc) => Ok(Some(self.fill_visits(doc).await?)),
            None => Ok(None),
        }
    }

    /// Look up a pet under a specific owner and fill its visits.
    ///
    /// Returns `None` when the pet exists but belongs to someone else.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] if a read fails.
    pub async fn find_by_id_and_owner(
        &self,
        pet_id: PetId,
        owner_id: OwnerId,
    ) -> Result<Option<Pet>, ServiceError> {
        match self.pets.find_by_id_and_owner_id(pet_id, owner_id).await? {
            Some(doc) => Ok(Some(self.fill_visits(doc).await?)),
            None => Ok(None),
        }
    }

    /// Every pet of `owner_id`, each with its visits.
    ///
    /// Visit fills for different pets are independent reads and run
    /// concurrently; the result keeps the store's pet order.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] if any read fails. No partially
    /// filled list is returned.
    pub async fn find_by_owner_id(&self, owner_id: OwnerId) -> Result<Vec<Pet>, ServiceError> {
        let docs = self.pets.find_by_owner_id(owner_id).await?;
        try_join_all(docs.into_iter().map(|doc| self.fill_visits(doc))).await
    }

    /// Upsert `pet` under `owner_id` and return it with its full history.
    ///
    /// The pet's own `owner_id` is overwritten. Visits on the incoming value
    /// that are not stored yet are created; the returned visit list is the
    /// stored history followed by those new visits. An incoming visit whose
    /// id is already recorded under another pet is skipped and stays with
    /// that pet.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] without writing anything if the
    /// owner does not exist, or [`ServiceError::Store`] if a store call
    /// fails.
    pub async fn save(&self, owner_id: OwnerId, pet: Pet) -> Result<Pet, ServiceError> {
        self.require_owner(owner_id).await?;

        let doc = self
            .pets
            .save(PetDocument::from_pet(&pet, owner_id))
            .await?;
        tracing::debug!(pet_id = %doc.id, %owner_id, "Saved pet");

        let stored = self.visits.find_by_pet(doc.id).await?;
        let stored_ids: HashSet<VisitId> = stored.iter().map(|v| v.id).collect();

        let mut created = Vec::new();
        for visit in pet.visits {
            if stored_ids.contains(&visit.id) {
                continue;
            }
            if let Some(existing) = self.visits.find_by_id(visit.id).await? {
                tracing::warn!(
                    visit_id = %visit.id,
                    pet_id = %doc.id,
                    recorded_for = ?existing.pet_id,
                    "Skipping visit recorded under another pet"
                );
                continue;
            }
            created.push(self.visits.create_visit(doc.id, visit).await?);
        }

        Ok(doc.into_pet(merge_visits(stored, created)))
    }

    /// Remove a pet from its owner. The pet's visits are left in place.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if the owner does not exist or the
    /// pet is not one of theirs.
    pub async fn delete(&self, owner_id: OwnerId, pet_id: PetId) -> Result<(), ServiceError> {
        self.require_owner(owner_id).await?;

        if self
            .pets
            .find_by_id_and_owner_id(pet_id, owner_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::pet_not_found(pet_id));
        }

        self.pets.delete(pet_id).await?;
        tracing::info!(%pet_id, %owner_id, "Deleted pet");
        Ok(())
    }

    /// Record a visit for one of `owner_id`'s pets.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] without persisting the visit if
    /// the owner is missing or the pet does not belong to them.
    pub async fn add_visit(
        &self,
        owner_id: OwnerId,
        pet_id: PetId,
        visit: Visit,
    ) -> Result<Visit, ServiceError> {
        self.require_owner(owner_id).await?;

        if self
            .pets
            .find_by_id_and_owner_id(pet_id, owner_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::pet_not_found(pet_id));
        }

        self.visits.create_visit(pet_id, visit).await
    }

    async fn require_owner(&self, owner_id: OwnerId) -> Result<(), ServiceError> {
        match self.owners.find_by_id(owner_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::owner_not_found(owner_id)),
        }
    }

    async fn fill_visits(&self, doc: PetDocument) -> Result<Pet, ServiceError> {
        let visits = self.visits.find_by_pet(doc.id).await?;
        Ok(doc.into_pet(visits))
    }
}

/// Union two visit lists by id.
///
/// Keeps `existing` in order, then appends entries of `incoming` whose id
/// has not been seen. Duplicate ids inside either list collapse to their
/// first occurrence.
pub fn merge_visits(existing: Vec<Visit>, incoming: Vec<Visit>) -> Vec<Visit> {
    let mut seen = HashSet::new();
    existing
        .into_iter()
        .chain(incoming)
        .filter(|v| seen.insert(v.id))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use petclinic_db::{MemoryStore, OwnerDocument};

    use super::*;

    struct Fixture {
        store: Arc<MemoryStore>,
        service: PetService,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let visits = VisitService::new(store.clone());
        let service = PetService::new(store.clone(), store.clone(), visits);
        Fixture { store, service }
    }

    async fn add_owner(store: &MemoryStore) -> OwnerId {
        let doc = OwnerDocument {
            id: OwnerId::new(),
            first_name: String::from("Dominik"),
            last_name: String::from("Picker"),
            address: String::from("Address"),
            city: String::from("Bielefeld"),
            telephone: String::from("1233232"),
        };
        OwnerRepository::save(store, doc).await.unwrap().id
    }

    fn rufus() -> Pet {
        Pet::new("Rufus", NaiveDate::from_ymd_opt(2015, 12, 1).unwrap(), "Dog")
    }

    fn visit(description: &str) -> Visit {
        Visit::new(Utc::now().date_naive(), description)
    }

    #[tokio::test]
    async fn save_under_missing_owner_persists_nothing() {
        let fx = fixture();
        let owner_id = OwnerId::new();
        let pet = rufus();
        let pet_id = pet.id;

        let err = fx.service.save(owner_id, pet).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(fx.service.find_by_id(pet_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_stamps_owner_id() {
        let fx = fixture();
        let owner_id = add_owner(&fx.store).await;
        let mut pet = rufus();
        pet.owner_id = Some(OwnerId::new());

        let saved = fx.service.save(owner_id, pet).await.unwrap();
        assert_eq!(saved.owner_id, Some(owner_id));
    }

    #[tokio::test]
    async fn saving_twice_keeps_one_pet() {
        let fx = fixture();
        let owner_id = add_owner(&fx.store).await;
        let pet = rufus();

        fx.service.save(owner_id, pet.clone()).await.unwrap();
        fx.service.save(owner_id, pet).await.unwrap();

        assert_eq!(fx.service.find_by_owner_id(owner_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_without_visits_keeps_history() {
        let fx = fixture();
        let owner_id = add_owner(&fx.store).await;
        let pet = fx.service.save(owner_id, rufus()).await.unwrap();
        fx.service
            .add_visit(owner_id, pet.id, visit("Vaccination"))
            .await
            .unwrap();
        fx.service
            .add_visit(owner_id, pet.id, visit("Dental"))
            .await
            .unwrap();

        let mut edited = Pet::new("NewPetName", NaiveDate::from_ymd_opt(2015, 2, 9).unwrap(), "Cat");
        edited.id = pet.id;
        let saved = fx.service.save(owner_id, edited).await.unwrap();
        assert_eq!(saved.visits.len(), 2);

        let reloaded = fx.service.find_by_id(pet.id).await.unwrap().unwrap();
        assert_eq!(reloaded.name, "NewPetName");
        assert_eq!(reloaded.pet_type, "Cat");
        assert_eq!(reloaded.visits.len(), 2);
    }

    #[tokio::test]
    async fn save_with_new_visits_persists_them() {
        let fx = fixture();
        let owner_id = add_owner(&fx.store).await;
        let mut pet = fx.service.save(owner_id, rufus()).await.unwrap();
        fx.service
            .add_visit(owner_id, pet.id, visit("Vaccination"))
            .await
            .unwrap();

        pet.visits.push(visit("Checkup"));
        let saved = fx.service.save(owner_id, pet.clone()).await.unwrap();

        let descriptions: Vec<_> = saved.visits.iter().map(|v| v.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Vaccination", "Checkup"]);
        let reloaded = fx.service.find_by_id(pet.id).await.unwrap().unwrap();
        assert_eq!(reloaded.visits, saved.visits);
    }

    #[tokio::test]
    async fn save_leaves_visits_of_other_pets_alone() {
        let fx = fixture();
        let owner_id = add_owner(&fx.store).await;
        let dog = fx.service.save(owner_id, rufus()).await.unwrap();
        let recorded = fx
            .service
            .add_visit(owner_id, dog.id, visit("Vaccination"))
            .await
            .unwrap();

        let mut tom = Pet::new("Tom", NaiveDate::from_ymd_opt(2018, 5, 2).unwrap(), "Cat");
        tom.visits.push(recorded.clone());
        let saved = fx.service.save(owner_id, tom).await.unwrap();
        assert!(saved.visits.is_empty());

        let dog = fx.service.find_by_id(dog.id).await.unwrap().unwrap();
        assert_eq!(dog.visits.len(), 1);
        assert_eq!(dog.visits[0].id, recorded.id);
        assert_eq!(dog.visits[0].pet_id, Some(dog.id));
        let tom = fx.service.find_by_id(saved.id).await.unwrap().unwrap();
        assert!(tom.visits.is_empty());
    }

    #[tokio::test]
    async fn find_by_id_and_owner_rejects_other_owner() {
        let fx = fixture();
        let owner_id = add_owner(&fx.store).await;
        let stranger = add_owner(&fx.store).await;
        let pet = fx.service.save(owner_id, rufus()).await.unwrap();

        assert!(fx
            .service
            .find_by_id_and_owner(pet.id, owner_id)
            .await
            .unwrap()
            .is_some());
        assert!(fx
            .service
            .find_by_id_and_owner(pet.id, stranger)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn created_visit_is_returned_on_reload() {
        let fx = fixture();
        let owner_id = add_owner(&fx.store).await;
        let pet = fx.service.save(owner_id, rufus()).await.unwrap();
        let today = Utc::now().date_naive();

        let created = fx
            .service
            .add_visit(owner_id, pet.id, Visit::new(today, "Doctor visit"))
            .await
            .unwrap();

        let reloaded = fx.service.find_by_id(pet.id).await.unwrap().unwrap();
        assert_eq!(reloaded.visits.len(), 1);
        assert_eq!(reloaded.visits[0].description, "Doctor visit");
        assert_eq!(reloaded.visits[0].date, today);
        assert_eq!(reloaded.visits[0].id, created.id);
    }

    #[tokio::test]
    async fn add_visit_for_missing_pet_is_not_persisted() {
        let fx = fixture();
        let owner_id = add_owner(&fx.store).await;
        let missing = PetId::new();

        let err = fx
            .service
            .add_visit(owner_id, missing, visit("Doctor visit"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let visits = VisitService::new(fx.store.clone());
        assert!(visits.find_by_pet(missing).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_visit_under_wrong_owner_is_not_found() {
        let fx = fixture();
        let owner_id = add_owner(&fx.store).await;
        let stranger = add_owner(&fx.store).await;
        let pet = fx.service.save(owner_id, rufus()).await.unwrap();

        let err = fx
            .service
            .add_visit(stranger, pet.id, visit("Doctor visit"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(fx.service.find_by_id(pet.id).await.unwrap().unwrap().visits.is_empty());
    }

    #[tokio::test]
    async fn delete_removes_pet_from_owner() {
        let fx = fixture();
        let owner_id = add_owner(&fx.store).await;
        let keep = fx.service.save(owner_id, rufus()).await.unwrap();
        let gone = fx.service.save(owner_id, rufus()).await.unwrap();

        fx.service.delete(owner_id, gone.id).await.unwrap();

        let pets = fx.service.find_by_owner_id(owner_id).await.unwrap();
        assert_eq!(pets.len(), 1);
        assert_eq!(pets[0].id, keep.id);
        assert!(fx.service.delete(owner_id, gone.id).await.unwrap_err().is_not_found());
    }

    #[test]
    fn merge_keeps_existing_order_then_new() {
        let a = visit("a");
        let b = visit("b");
        let c = visit("c");

        let merged = merge_visits(
            vec![a.clone(), b.clone()],
            vec![b.clone(), c.clone(), a.clone()],
        );
        let ids: Vec<_> = merged.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);
    }

    #[test]
    fn merge_with_empty_incoming_is_identity() {
        let existing = vec![visit("a"), visit("b")];
        assert_eq!(merge_visits(existing.clone(), Vec::new()), existing);
    }
}
