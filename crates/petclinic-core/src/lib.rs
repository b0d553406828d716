//! Petclinic stores: the composition layer over the document collections.
//!
//! The data layer knows only flat documents. The stores here assemble the
//! nested view the rest of the application works with:
//!
//! ```text
//! OwnerService::get_by_id
//!     +-- owners.find_by_id
//!     +-- PetService::find_by_owner_id
//!             +-- pets.find_by_owner_id
//!             +-- VisitService::find_by_pet   (once per pet, concurrently)
//! ```
//!
//! Any failing read aborts the whole aggregation; no partially filled
//! owner or pet is ever returned.
//!
//! # Modules
//!
//! - [`owner`] -- Owner store
//! - [`pet`] -- Pet store and visit merging
//! - [`visit`] -- Visit store
//! - [`vet`] -- Vet store and default seeding
//! - [`pet_types`] -- Pet type catalogue
//! - [`clinic`] -- Wiring of all stores over one backend
//! - [`config`] -- YAML configuration
//! - [`error`] -- Store error type

pub mod clinic;
pub mod config;
pub mod error;
pub mod owner;
pub mod pet;
pub mod pet_types;
pub mod vet;
pub mod visit;

pub use clinic::Clinic;
pub use config::{ConfigError, PetclinicConfig, StoreBackend};
pub use error::ServiceError;
pub use owner::OwnerService;
pub use pet::{PetService, merge_visits};
pub use pet_types::PetTypes;
pub use vet::VetService;
pub use visit::VisitService;
