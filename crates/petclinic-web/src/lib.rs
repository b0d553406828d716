//! Server-rendered HTTP surface for the Petclinic application.
//!
//! # Modules
//!
//! - [`router`] -- Route table and middleware
//! - [`handlers`] -- Start page, vet list and path helpers
//! - [`owners`] -- Owner search, create, details and edit
//! - [`pets`] -- Pet create and edit
//! - [`visits`] -- Visit create
//! - [`forms`] -- Form bindings and validation
//! - [`views`] -- `minijinja` templates
//! - [`state`] -- Shared handler state
//! - [`server`] -- Listener lifecycle
//! - [`error`] -- Error pages

pub mod error;
pub mod forms;
pub mod handlers;
pub mod owners;
pub mod pets;
pub mod router;
pub mod server;
pub mod state;
pub mod views;
pub mod visits;

pub use error::WebError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, serve_until, start_server};
pub use state::AppState;
pub use views::Views;
