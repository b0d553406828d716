//! Owner store.
//!
//! Owners are persisted without their pets. Every read rebuilds the owner
//! aggregate by asking the [`PetService`] for the owner's pets, which in
//! turn fills each pet's visits.

use std::sync::Arc;

use petclinic_db::{OwnerDocument, OwnerRepository};
use petclinic_types::{Owner, OwnerId};

use crate::error::ServiceError;
use crate::pet::PetService;

/// Reads and writes owners, attaching their pets.
#[derive(Clone)]
pub struct OwnerService {
    owners: Arc<dyn OwnerRepository>,
    pets: PetService,
}

impl OwnerService {
    /// Create an owner store.
    pub fn new(owners: Arc<dyn OwnerRepository>, pets: PetService) -> Self {
        Self { owners, pets }
    }

    /// Every owner, each with pets and visits filled.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] if any read fails.
    pub async fn find_all(&self) -> Result<Vec<Owner>, ServiceError> {
        let docs = self.owners.find_all().await?;
        self.attach_all(docs).await
    }

    /// One owner with pets and visits filled.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] if any read fails.
    pub async fn get_by_id(&self, id: OwnerId) -> Result<Option<Owner>, ServiceError> {
        match self.owners.find_by_id(id).await? {
            Some(doc) => Ok(Some(self.attach(doc).await?)),
            None => Ok(None),
        }
    }

    /// Owners whose last name contains `fragment`, ignoring case.
    ///
    /// An empty fragment matches every owner.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] if any read fails.
    pub async fn find_by_last_name_fragment(
        &self,
        fragment: &str,
    ) -> Result<Vec<Owner>, ServiceError> {
        let docs = self.owners.find_by_last_name_containing(fragment).await?;
        self.attach_all(docs).await
    }

    /// Upsert `owner` by id and return it with its stored pets.
    ///
    /// The incoming pet list is ignored; pets are written through
    /// [`PetService::save`].
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] if a store call fails.
    pub async fn save(&self, owner: Owner) -> Result<Owner, ServiceError> {
        let doc = self.owners.save(OwnerDocument::from(&owner)).await?;
        tracing::debug!(owner_id = %doc.id, last_name = %doc.last_name, "Saved owner");
        self.attach(doc).await
    }

    async fn attach(&self, doc: OwnerDocument) -> Result<Owner, ServiceError> {
        let pets = self.pets.find_by_owner_id(doc.id).await?;
        Ok(doc.into_owner(pets))
    }

    // TODO: N+1 reads, one pet query per owner plus one visit query per pet.
    // Batch by loading pets for all owner ids in one query and grouping here.
    async fn attach_all(&self, docs: Vec<OwnerDocument>) -> Result<Vec<Owner>, ServiceError> {
        let mut owners = Vec::with_capacity(docs.len());
        for doc in docs {
            owners.push(self.attach(doc).await?);
        }
        Ok(owners)
    }
}
