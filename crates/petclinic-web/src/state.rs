//! Shared application state for the web server.

use petclinic_core::Clinic;

use crate::views::Views;

/// State handed to every handler.
pub struct AppState {
    /// The clinic stores.
    pub clinic: Clinic,
    /// Page templates.
    pub views: Views,
}

impl AppState {
    /// Bundle stores and templates.
    pub const fn new(clinic: Clinic, views: Views) -> Self {
        Self { clinic, views }
    }
}
