//! Document data layer for the Petclinic application.
//!
//! Owners, pets, visits and vets live in four independent collections.
//! Nothing is nested on disk: pets point at their owner and visits point at
//! their pet. Re-assembling the nested view is the job of the stores in
//! `petclinic-core`.
//!
//! # Architecture
//!
//! ```text
//! petclinic-core stores
//!     |
//!     +-- Arc<dyn OwnerRepository / PetRepository / VisitRepository / VetRepository>
//!             |
//!             +-- MemoryStore      (process-local, tests and demos)
//!             +-- PgDocumentStore  (PostgreSQL, JSONB documents)
//! ```
//!
//! # Modules
//!
//! - [`document`] -- Flat persisted shapes of the entities
//! - [`repository`] -- Object-safe collection traits
//! - [`memory`] -- In-memory backend
//! - [`postgres`] -- `PostgreSQL` connection pool and configuration
//! - [`pg_store`] -- `PostgreSQL` backend
//! - [`error`] -- Shared error types

pub mod document;
pub mod error;
pub mod memory;
pub mod pg_store;
pub mod postgres;
pub mod repository;

// Re-export primary types for convenience.
pub use document::{OwnerDocument, PetDocument, VisitDocument};
pub use error::DbError;
pub use memory::MemoryStore;
pub use pg_store::PgDocumentStore;
pub use postgres::{PostgresConfig, PostgresPool};
pub use repository::{OwnerRepository, PetRepository, StoreFuture, VetRepository, VisitRepository};
