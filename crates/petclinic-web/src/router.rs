//! Axum router construction for the Petclinic pages.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, owners, pets, visits};

/// Build the complete router.
///
/// The router includes:
/// - `GET /` -- start page
/// - `GET /owners/find` -- owner search form
/// - `GET /owners` -- owner search results
/// - `GET|POST /owners/new` -- create owner
/// - `GET /owners/{owner_id}` -- owner details
/// - `GET|POST /owners/{owner_id}/edit` -- edit owner
/// - `GET|POST /owners/{owner_id}/pets/new` -- add pet
/// - `GET|POST /owners/{owner_id}/pets/{pet_id}/edit` -- edit pet
/// - `GET|POST /owners/{owner_id}/pets/{pet_id}/visits/new` -- add visit
/// - `GET /vets.html` -- vet list
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/vets.html", get(handlers::list_vets))
        // Owners
        .route("/owners", get(owners::list))
        .route("/owners/find", get(owners::find_form))
        .route("/owners/new", get(owners::new_form).post(owners::create))
        .route("/owners/{owner_id}", get(owners::details))
        .route(
            "/owners/{owner_id}/edit",
            get(owners::edit_form).post(owners::update),
        )
        // Pets
        .route(
            "/owners/{owner_id}/pets/new",
            get(pets::new_form).post(pets::create),
        )
        .route(
            "/owners/{owner_id}/pets/{pet_id}/edit",
            get(pets::edit_form).post(pets::update),
        )
        // Visits
        .route(
            "/owners/{owner_id}/pets/{pet_id}/visits/new",
            get(visits::new_form).post(visits::create),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
