//! New-visit page under `/owners/{owner_id}/pets/{pet_id}/visits/new`.

use std::sync::Arc;

use axum::Form;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Response};
use minijinja::context;
use petclinic_types::{Owner, Pet};

use crate::error::WebError;
use crate::forms::{FormErrors, VisitForm};
use crate::handlers::redirect_to_owner;
use crate::pets::{load_owner, load_pet};
use crate::state::AppState;

fn render_form(
    state: &AppState,
    owner: &Owner,
    pet: &Pet,
    form: &VisitForm,
    errors: &FormErrors,
) -> Result<Html<String>, WebError> {
    state.views.render(
        "pets/visit_form.html",
        context! { owner, pet, form, errors },
    )
}

/// Visit form showing the pet and its previous visits.
///
/// # Errors
///
/// Returns [`WebError::InvalidId`] or [`WebError::NotFound`] if the owner
/// or the pet under that owner cannot be resolved.
pub async fn new_form(
    State(state): State<Arc<AppState>>,
    Path((owner_id, pet_id)): Path<(String, String)>,
) -> Result<Html<String>, WebError> {
    let owner = load_owner(&state, &owner_id).await?;
    let pet = load_pet(&state, &owner, &pet_id).await?;

    render_form(&state, &owner, &pet, &VisitForm::dated_today(), &FormErrors::default())
}

/// Record a visit, or re-render the form with its errors.
///
/// # Errors
///
/// Returns [`WebError::InvalidId`] or [`WebError::NotFound`] if the owner
/// or the pet under that owner cannot be resolved. Nothing is stored in
/// that case.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Path((owner_id, pet_id)): Path<(String, String)>,
    Form(form): Form<VisitForm>,
) -> Result<Response, WebError> {
    let owner = load_owner(&state, &owner_id).await?;
    let pet = load_pet(&state, &owner, &pet_id).await?;

    let visit = match form.to_visit() {
        Ok(visit) => visit,
        Err(errors) => {
            return Ok(render_form(&state, &owner, &pet, &form, &errors)?.into_response());
        }
    };

    let visit = state.clinic.pets.add_visit(owner.id, pet.id, visit).await?;
    tracing::info!(visit_id = %visit.id, pet_id = %pet.id, "Recorded visit");
    Ok(redirect_to_owner(owner.id).into_response())
}
