//! Handlers for the pages outside the owner tree, plus helpers shared by
//! every handler module.

use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, Redirect};
use minijinja::context;
use petclinic_types::{OwnerId, PetId};
use uuid::Uuid;

use crate::error::WebError;
use crate::state::AppState;

/// Greeting on the start page.
pub const WELCOME: &str = "Welcome to Petclinic";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn parse_uuid(raw: &str, entity: &'static str) -> Result<Uuid, WebError> {
    raw.parse::<Uuid>().map_err(|e| {
        tracing::debug!(entity, value = raw, error = %e, "Rejected path id");
        WebError::InvalidId {
            entity,
            value: raw.to_owned(),
        }
    })
}

/// Parse an owner id path segment.
///
/// # Errors
///
/// Returns [`WebError::InvalidId`] if `raw` is not a UUID.
pub fn parse_owner_id(raw: &str) -> Result<OwnerId, WebError> {
    parse_uuid(raw, "Owner").map(OwnerId::from)
}

/// Parse a pet id path segment.
///
/// # Errors
///
/// Returns [`WebError::InvalidId`] if `raw` is not a UUID.
pub fn parse_pet_id(raw: &str) -> Result<PetId, WebError> {
    parse_uuid(raw, "Pet").map(PetId::from)
}

/// 303 to an owner's details page.
pub fn redirect_to_owner(id: OwnerId) -> Redirect {
    Redirect::to(&format!("/owners/{id}"))
}

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

/// Start page.
///
/// # Errors
///
/// Returns [`WebError::Template`] if the page fails to render.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, WebError> {
    state.views.render("index.html", context! { welcome => WELCOME })
}

// ---------------------------------------------------------------------------
// GET /vets.html
// ---------------------------------------------------------------------------

/// List every vet with their specialties.
///
/// # Errors
///
/// Returns [`WebError::Internal`] if the store fails.
pub async fn list_vets(State(state): State<Arc<AppState>>) -> Result<Html<String>, WebError> {
    let vets = state.clinic.vets.find_all().await?;
    state.views.render("vets/list.html", context! { vets })
}
