//! Flat persisted shapes of the clinic entities.
//!
//! Aggregates never reach the store as nested data. An owner document has
//! no pets and a pet document has no visits; children carry a
//! back-reference to their parent instead, and the stores rebuild the
//! nesting on read.

use chrono::NaiveDate;
use petclinic_types::{Owner, OwnerId, Pet, PetId, Visit, VisitId};
use serde::{Deserialize, Serialize};

/// Persisted owner record, without the pet list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerDocument {
    /// Owner identity.
    pub id: OwnerId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Street address.
    pub address: String,
    /// City of residence.
    pub city: String,
    /// Contact telephone number.
    pub telephone: String,
}

impl OwnerDocument {
    /// Attach a pet list, producing the owner aggregate.
    pub fn into_owner(self, pets: Vec<Pet>) -> Owner {
        Owner {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            address: self.address,
            city: self.city,
            telephone: self.telephone,
            pets,
        }
    }
}

impl From<&Owner> for OwnerDocument {
    fn from(owner: &Owner) -> Self {
        Self {
            id: owner.id,
            first_name: owner.first_name.clone(),
            last_name: owner.last_name.clone(),
            address: owner.address.clone(),
            city: owner.city.clone(),
            telephone: owner.telephone.clone(),
        }
    }
}

/// Persisted pet record, without the visit list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetDocument {
    /// Pet identity.
    pub id: PetId,
    /// Pet name.
    pub name: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Pet type label.
    pub pet_type: String,
    /// Owning owner.
    pub owner_id: OwnerId,
}

impl PetDocument {
    /// Build the record for `pet` stored under `owner_id`.
    ///
    /// The owner id argument wins over whatever back-reference the pet
    /// value carries.
    pub fn from_pet(pet: &Pet, owner_id: OwnerId) -> Self {
        Self {
            id: pet.id,
            name: pet.name.clone(),
            birth_date: pet.birth_date,
            pet_type: pet.pet_type.clone(),
            owner_id,
        }
    }

    /// Attach a visit list, producing the pet aggregate.
    pub fn into_pet(self, visits: Vec<Visit>) -> Pet {
        Pet {
            id: self.id,
            name: self.name,
            birth_date: self.birth_date,
            pet_type: self.pet_type,
            owner_id: Some(self.owner_id),
            visits,
        }
    }
}

/// Persisted visit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitDocument {
    /// Visit identity.
    pub id: VisitId,
    /// Day of the visit.
    pub date: NaiveDate,
    /// Free-text notes.
    pub description: String,
    /// Owning pet.
    pub pet_id: PetId,
}

impl VisitDocument {
    /// Build the record for `visit` stored under `pet_id`.
    pub fn from_visit(visit: &Visit, pet_id: PetId) -> Self {
        Self {
            id: visit.id,
            date: visit.date,
            description: visit.description.clone(),
            pet_id,
        }
    }
}

impl From<VisitDocument> for Visit {
    fn from(doc: VisitDocument) -> Self {
        Self {
            id: doc.id,
            date: doc.date,
            description: doc.description,
            pet_id: Some(doc.pet_id),
        }
    }
}
