//! Clinic entities as seen by the application.
//!
//! [`Owner`] and [`Pet`] are aggregates: their child lists (`pets`,
//! `visits`) are never stored inside the parent. The stores rebuild them on
//! every read from the back-references held by the children.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::{OwnerId, PetId, VetId, VisitId};

/// A clinic customer together with their pets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Owner identity.
    pub id: OwnerId,
    /// Given name.
    pub first_name: String,
    /// Family name, the field owner search runs against.
    pub last_name: String,
    /// Street address.
    pub address: String,
    /// City of residence.
    pub city: String,
    /// Contact telephone number.
    pub telephone: String,
    /// Pets whose `owner_id` points at this owner. Filled on read.
    #[serde(default)]
    pub pets: Vec<Pet>,
}

impl Owner {
    /// Create an owner with a fresh id and no pets.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        telephone: impl Into<String>,
    ) -> Self {
        Self {
            id: OwnerId::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            address: address.into(),
            city: city.into(),
            telephone: telephone.into(),
            pets: Vec::new(),
        }
    }

    /// Find one of this owner's pets by id.
    pub fn pet(&self, pet_id: PetId) -> Option<&Pet> {
        self.pets.iter().find(|p| p.id == pet_id)
    }
}

/// An animal belonging to an owner, with its visit history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    /// Pet identity.
    pub id: PetId,
    /// Pet name.
    pub name: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Pet type label, one of the clinic's known types.
    pub pet_type: String,
    /// Back-reference to the owner. Stamped by the store on save.
    pub owner_id: Option<OwnerId>,
    /// Visits whose `pet_id` points at this pet. Filled on read.
    #[serde(default)]
    pub visits: Vec<Visit>,
}

impl Pet {
    /// Create a pet with a fresh id, not yet attached to an owner.
    pub fn new(name: impl Into<String>, birth_date: NaiveDate, pet_type: impl Into<String>) -> Self {
        Self {
            id: PetId::new(),
            name: name.into(),
            birth_date,
            pet_type: pet_type.into(),
            owner_id: None,
            visits: Vec::new(),
        }
    }
}

/// A single clinical encounter for one pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    /// Visit identity.
    pub id: VisitId,
    /// Day of the visit.
    pub date: NaiveDate,
    /// Free-text notes.
    pub description: String,
    /// Back-reference to the pet. Stamped by the store on creation.
    pub pet_id: Option<PetId>,
}

impl Visit {
    /// Create a visit with a fresh id, not yet attached to a pet.
    pub fn new(date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            id: VisitId::new(),
            date,
            description: description.into(),
            pet_id: None,
        }
    }
}

/// A veterinarian. Independent of the owner/pet/visit aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vet {
    /// Vet identity.
    pub id: VetId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Specialty labels, possibly empty.
    #[serde(default)]
    pub specialties: Vec<String>,
}

impl Vet {
    /// Create a vet with a fresh id.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        specialties: Vec<String>,
    ) -> Self {
        Self {
            id: VetId::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            specialties,
        }
    }
}
