//! Owner pages: search, create, details and edit.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/owners/find` | Search form |
//! | `GET` | `/owners?lastName=` | Search results |
//! | `GET`/`POST` | `/owners/new` | Create form |
//! | `GET` | `/owners/{owner_id}` | Owner with pets and visits |
//! | `GET`/`POST` | `/owners/{owner_id}/edit` | Edit form |

use std::sync::Arc;

use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use minijinja::context;
use petclinic_core::ServiceError;
use serde::Deserialize;

use crate::error::WebError;
use crate::forms::{FormErrors, OwnerForm};
use crate::handlers::{parse_owner_id, redirect_to_owner};
use crate::state::AppState;

const FORM_VIEW: &str = "owners/form.html";

/// Query parameters for `GET /owners`.
#[derive(Debug, Deserialize)]
pub struct FindOwnersQuery {
    /// Last-name fragment. Absent means the search form was skipped.
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
}

fn render_form(
    state: &AppState,
    form: &OwnerForm,
    errors: &FormErrors,
    is_new: bool,
) -> Result<Html<String>, WebError> {
    state
        .views
        .render(FORM_VIEW, context! { form, errors, is_new })
}

/// Search form.
///
/// # Errors
///
/// Returns [`WebError::Template`] if the page fails to render.
pub async fn find_form(State(state): State<Arc<AppState>>) -> Result<Html<String>, WebError> {
    state.views.render("owners/find.html", context! { last_name => "" })
}

/// Search by last-name fragment. A blank fragment lists every owner; a
/// missing parameter redirects to the search form.
///
/// # Errors
///
/// Returns [`WebError::Internal`] if the store fails.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FindOwnersQuery>,
) -> Result<Response, WebError> {
    let Some(last_name) = query.last_name else {
        return Ok(Redirect::to("/owners/find").into_response());
    };

    let owners = if last_name.trim().is_empty() {
        state.clinic.owners.find_all().await?
    } else {
        state
            .clinic
            .owners
            .find_by_last_name_fragment(&last_name)
            .await?
    };

    tracing::debug!(fragment = %last_name, found = owners.len(), "Owner search");

    let page = state
        .views
        .render("owners/list.html", context! { owners, last_name })?;
    Ok(page.into_response())
}

/// Empty create form.
///
/// # Errors
///
/// Returns [`WebError::Template`] if the page fails to render.
pub async fn new_form(State(state): State<Arc<AppState>>) -> Result<Html<String>, WebError> {
    render_form(&state, &OwnerForm::default(), &FormErrors::default(), true)
}

/// Create an owner, or re-render the form with its errors.
///
/// # Errors
///
/// Returns [`WebError::Internal`] if the store fails.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Form(form): Form<OwnerForm>,
) -> Result<Response, WebError> {
    let owner = match form.to_owner(None) {
        Ok(owner) => owner,
        Err(errors) => return Ok(render_form(&state, &form, &errors, true)?.into_response()),
    };

    let owner = state.clinic.owners.save(owner).await?;
    tracing::info!(owner_id = %owner.id, "Created owner");
    Ok(redirect_to_owner(owner.id).into_response())
}

/// Owner details with pets and their visits.
///
/// # Errors
///
/// Returns [`WebError::InvalidId`] for a malformed id and
/// [`WebError::NotFound`] for an unknown owner.
pub async fn details(
    State(state): State<Arc<AppState>>,
    Path(owner_id): Path<String>,
) -> Result<Html<String>, WebError> {
    let id = parse_owner_id(&owner_id)?;
    let owner = state
        .clinic
        .owners
        .get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::owner_not_found(id))?;

    state.views.render("owners/details.html", context! { owner })
}

/// Edit form prefilled with the stored owner.
///
/// # Errors
///
/// Returns [`WebError::InvalidId`] for a malformed id and
/// [`WebError::NotFound`] for an unknown owner.
pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Path(owner_id): Path<String>,
) -> Result<Html<String>, WebError> {
    let id = parse_owner_id(&owner_id)?;
    let owner = state
        .clinic
        .owners
        .get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::owner_not_found(id))?;

    render_form(&state, &OwnerForm::from_owner(&owner), &FormErrors::default(), false)
}

/// Update an owner under the id from the path, or re-render the form.
///
/// # Errors
///
/// Returns [`WebError::InvalidId`] for a malformed id and
/// [`WebError::NotFound`] for an unknown owner.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(owner_id): Path<String>,
    Form(form): Form<OwnerForm>,
) -> Result<Response, WebError> {
    let id = parse_owner_id(&owner_id)?;
    if state.clinic.owners.get_by_id(id).await?.is_none() {
        return Err(ServiceError::owner_not_found(id).into());
    }

    let owner = match form.to_owner(Some(id)) {
        Ok(owner) => owner,
        Err(errors) => return Ok(render_form(&state, &form, &errors, false)?.into_response()),
    };

    state.clinic.owners.save(owner).await?;
    tracing::info!(owner_id = %id, "Updated owner");
    Ok(redirect_to_owner(id).into_response())
}
