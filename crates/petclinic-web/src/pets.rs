//! Pet pages under `/owners/{owner_id}/pets`.

use std::sync::Arc;

use axum::Form;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Response};
use minijinja::context;
use petclinic_core::{PetTypes, ServiceError};
use petclinic_types::{Owner, Pet, PetId};

use crate::error::WebError;
use crate::forms::{FormErrors, PetForm};
use crate::handlers::{parse_owner_id, parse_pet_id, redirect_to_owner};
use crate::state::AppState;

const FORM_VIEW: &str = "pets/form.html";

/// Resolve the owner named by a raw path segment.
pub(crate) async fn load_owner(state: &AppState, raw_id: &str) -> Result<Owner, WebError> {
    let id = parse_owner_id(raw_id)?;
    Ok(state
        .clinic
        .owners
        .get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::owner_not_found(id))?)
}

/// Resolve a pet of `owner` named by a raw path segment.
pub(crate) async fn load_pet(state: &AppState, owner: &Owner, raw_id: &str) -> Result<Pet, WebError> {
    let id = parse_pet_id(raw_id)?;
    Ok(state
        .clinic
        .pets
        .find_by_id_and_owner(id, owner.id)
        .await?
        .ok_or_else(|| ServiceError::pet_not_found(id))?)
}

fn render_form(
    state: &AppState,
    owner: &Owner,
    form: &PetForm,
    errors: &FormErrors,
    pet_id: Option<PetId>,
) -> Result<Html<String>, WebError> {
    state.views.render(
        FORM_VIEW,
        context! {
            owner,
            form,
            errors,
            pet_id,
            is_new => pet_id.is_none(),
            types => PetTypes::find_all(),
        },
    )
}

/// Empty pet form for an owner.
///
/// # Errors
///
/// Returns [`WebError::InvalidId`] or [`WebError::NotFound`] for a bad
/// owner.
pub async fn new_form(
    State(state): State<Arc<AppState>>,
    Path(owner_id): Path<String>,
) -> Result<Html<String>, WebError> {
    let owner = load_owner(&state, &owner_id).await?;
    render_form(&state, &owner, &PetForm::default(), &FormErrors::default(), None)
}

/// Add a pet to an owner, or re-render the form with its errors.
///
/// # Errors
///
/// Returns [`WebError::InvalidId`] or [`WebError::NotFound`] for a bad
/// owner.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Path(owner_id): Path<String>,
    Form(form): Form<PetForm>,
) -> Result<Response, WebError> {
    let owner = load_owner(&state, &owner_id).await?;

    let pet = match form.to_pet(None) {
        Ok(pet) => pet,
        Err(errors) => {
            return Ok(render_form(&state, &owner, &form, &errors, None)?.into_response());
        }
    };

    let pet = state.clinic.pets.save(owner.id, pet).await?;
    tracing::info!(pet_id = %pet.id, owner_id = %owner.id, "Added pet");
    Ok(redirect_to_owner(owner.id).into_response())
}

/// Edit form prefilled with the stored pet.
///
/// # Errors
///
/// Returns [`WebError::InvalidId`] or [`WebError::NotFound`] if the owner
/// or the pet under that owner cannot be resolved.
pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Path((owner_id, pet_id)): Path<(String, String)>,
) -> Result<Html<String>, WebError> {
    let owner = load_owner(&state, &owner_id).await?;
    let pet = load_pet(&state, &owner, &pet_id).await?;

    render_form(
        &state,
        &owner,
        &PetForm::from_pet(&pet),
        &FormErrors::default(),
        Some(pet.id),
    )
}

/// Update a pet, keeping its id and visit history.
///
/// # Errors
///
/// Returns [`WebError::InvalidId`] or [`WebError::NotFound`] if the owner
/// or the pet under that owner cannot be resolved.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path((owner_id, pet_id)): Path<(String, String)>,
    Form(form): Form<PetForm>,
) -> Result<Response, WebError> {
    let owner = load_owner(&state, &owner_id).await?;
    let stored = load_pet(&state, &owner, &pet_id).await?;

    let pet = match form.to_pet(Some(stored.id)) {
        Ok(pet) => pet,
        Err(errors) => {
            return Ok(render_form(&state, &owner, &form, &errors, Some(stored.id))?.into_response());
        }
    };

    state.clinic.pets.save(owner.id, pet).await?;
    tracing::info!(pet_id = %stored.id, owner_id = %owner.id, "Updated pet");
    Ok(redirect_to_owner(owner.id).into_response())
}
