//! Shared type definitions for the Petclinic application.
//!
//! Every crate in the workspace speaks in these types: the data layer maps
//! them to flat documents, the stores assemble them into aggregates, and the
//! web layer renders them.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for all entity identifiers
//! - [`model`] -- `Owner`, `Pet`, `Visit` and `Vet`

pub mod ids;
pub mod model;

pub use ids::{OwnerId, PetId, VetId, VisitId};
pub use model::{Owner, Pet, Vet, Visit};
