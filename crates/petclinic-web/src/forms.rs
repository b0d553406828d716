//! Form bindings for owner, pet and visit submissions.
//!
//! Forms carry only the user-editable fields, all as raw strings, so a
//! half-filled submission still deserializes and can be re-rendered with
//! its errors. Ids, the owner back-reference and visit lists are never
//! read from form data; the handlers take them from the path instead.

use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use petclinic_core::PetTypes;
use petclinic_types::{Owner, OwnerId, Pet, PetId, Visit};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// Date format accepted by the date fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// First validation message per field, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, String>);

impl FormErrors {
    /// Message for `field`, if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::default();
        errors.0.insert(field.to_owned(), message.to_owned());
        errors
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                errs.first().map(|e| {
                    let message = e
                        .message
                        .as_ref()
                        .map_or_else(|| e.code.to_string(), ToString::to_string);
                    (field.to_string(), message)
                })
            })
            .collect();
        Self(fields)
    }
}

// ---------------------------------------------------------------------------
// Field validators
// ---------------------------------------------------------------------------

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

fn date_in_past(value: &str, missing: &'static str, future: &'static str) -> Result<(), ValidationError> {
    let Some(date) = parse_date(value) else {
        return Err(ValidationError::new("date").with_message(Cow::Borrowed(missing)));
    };
    if date > Utc::now().date_naive() {
        return Err(ValidationError::new("past_or_present").with_message(Cow::Borrowed(future)));
    }
    Ok(())
}

fn birth_date_in_past(value: &str) -> Result<(), ValidationError> {
    date_in_past(value, "Birth date must be entered", "Birth date must be in the past")
}

fn visit_date_in_past(value: &str) -> Result<(), ValidationError> {
    date_in_past(value, "Date must be entered", "Date must be in the past")
}

fn known_pet_type(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("Pet type must be chosen")));
    }
    if !PetTypes::contains(value) {
        return Err(ValidationError::new("unknown").with_message(Cow::Borrowed("Unknown pet type")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Owner
// ---------------------------------------------------------------------------

/// Owner create/edit form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct OwnerForm {
    /// First name.
    #[validate(
        custom(function = "not_blank", message = "First name may not be blank"),
        length(max = 200, message = "First name length must be between 1 and 200")
    )]
    pub first_name: String,

    /// Last name.
    #[validate(
        custom(function = "not_blank", message = "Last name may not be blank"),
        length(max = 200, message = "Last name length must be between 1 and 200")
    )]
    pub last_name: String,

    /// Street address.
    #[validate(
        custom(function = "not_blank", message = "Address may not be blank"),
        length(max = 200, message = "Address length must be between 1 and 200")
    )]
    pub address: String,

    /// City.
    #[validate(
        custom(function = "not_blank", message = "City may not be blank"),
        length(max = 200, message = "City length must be between 1 and 200")
    )]
    pub city: String,

    /// Telephone number.
    #[validate(
        custom(function = "not_blank", message = "Telephone number may not be blank"),
        length(max = 200, message = "Telephone number length must be between 1 and 200")
    )]
    pub telephone: String,
}

impl OwnerForm {
    /// Prefill from a stored owner.
    pub fn from_owner(owner: &Owner) -> Self {
        Self {
            first_name: owner.first_name.clone(),
            last_name: owner.last_name.clone(),
            address: owner.address.clone(),
            city: owner.city.clone(),
            telephone: owner.telephone.clone(),
        }
    }

    /// Validate and build an owner. `id` keeps an existing identity; `None`
    /// creates a new one.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages if any field is invalid.
    pub fn to_owner(&self, id: Option<OwnerId>) -> Result<Owner, FormErrors> {
        self.validate()?;

        let mut owner = Owner::new(
            self.first_name.trim(),
            self.last_name.trim(),
            self.address.trim(),
            self.city.trim(),
            self.telephone.trim(),
        );
        if let Some(id) = id {
            owner.id = id;
        }
        Ok(owner)
    }
}

// ---------------------------------------------------------------------------
// Pet
// ---------------------------------------------------------------------------

/// Pet create/edit form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PetForm {
    /// Pet name.
    #[validate(
        custom(function = "not_blank", message = "Name may not be blank"),
        length(max = 200, message = "Name length must be between 1 and 200")
    )]
    pub name: String,

    /// Birth date as `YYYY-MM-DD`.
    #[validate(custom(function = "birth_date_in_past"))]
    pub birth_date: String,

    /// One of the [`PetTypes`] labels.
    #[validate(custom(function = "known_pet_type"))]
    pub pet_type: String,
}

impl PetForm {
    /// Prefill from a stored pet.
    pub fn from_pet(pet: &Pet) -> Self {
        Self {
            name: pet.name.clone(),
            birth_date: pet.birth_date.format(DATE_FORMAT).to_string(),
            pet_type: pet.pet_type.clone(),
        }
    }

    /// Validate and build a pet without visits. `id` keeps an existing
    /// identity; `None` creates a new one.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages if any field is invalid.
    pub fn to_pet(&self, id: Option<PetId>) -> Result<Pet, FormErrors> {
        self.validate()?;
        let birth_date = parse_date(&self.birth_date)
            .ok_or_else(|| FormErrors::single("birth_date", "Birth date must be entered"))?;

        let mut pet = Pet::new(self.name.trim(), birth_date, self.pet_type.trim());
        if let Some(id) = id {
            pet.id = id;
        }
        Ok(pet)
    }
}

// ---------------------------------------------------------------------------
// Visit
// ---------------------------------------------------------------------------

/// New-visit form. Fields absent from a submission stay empty, so a missing
/// date fails validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct VisitForm {
    /// Visit date as `YYYY-MM-DD`.
    #[validate(custom(function = "visit_date_in_past"))]
    pub date: String,

    /// What happened.
    #[validate(
        custom(function = "not_blank", message = "Description may not be blank"),
        length(max = 500, message = "Description length must be between 1 and 500")
    )]
    pub description: String,
}

impl VisitForm {
    /// Blank form prefilled with today's date.
    pub fn dated_today() -> Self {
        Self {
            date: Utc::now().date_naive().format(DATE_FORMAT).to_string(),
            ..Self::default()
        }
    }

    /// Validate and build a new visit.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages if any field is invalid.
    pub fn to_visit(&self) -> Result<Visit, FormErrors> {
        self.validate()?;
        let date = parse_date(&self.date)
            .ok_or_else(|| FormErrors::single("date", "Date must be entered"))?;
        Ok(Visit::new(date, self.description.trim()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn owner_form() -> OwnerForm {
        OwnerForm {
            first_name: String::from("Dominik"),
            last_name: String::from("Picker"),
            address: String::from("Address"),
            city: String::from("Bielefeld"),
            telephone: String::from("1233232"),
        }
    }

    #[test]
    fn valid_owner_form_builds_owner() {
        let owner = owner_form().to_owner(None).unwrap();
        assert_eq!(owner.last_name, "Picker");
        assert!(owner.pets.is_empty());
    }

    #[test]
    fn owner_form_keeps_given_id() {
        let id = OwnerId::new();
        assert_eq!(owner_form().to_owner(Some(id)).unwrap().id, id);
    }

    #[test]
    fn blank_owner_fields_are_reported() {
        let mut form = owner_form();
        form.city = String::from("   ");
        form.telephone = String::new();

        let errors = form.to_owner(None).unwrap_err();
        assert_eq!(errors.get("city"), Some("City may not be blank"));
        assert_eq!(errors.get("telephone"), Some("Telephone number may not be blank"));
        assert!(errors.get("first_name").is_none());
    }

    #[test]
    fn overlong_name_is_reported() {
        let mut form = owner_form();
        form.last_name = "x".repeat(201);

        let errors = form.to_owner(None).unwrap_err();
        assert_eq!(
            errors.get("last_name"),
            Some("Last name length must be between 1 and 200")
        );
    }

    #[test]
    fn pet_form_parses_date_and_type() {
        let form = PetForm {
            name: String::from("Rufus"),
            birth_date: String::from("2015-12-01"),
            pet_type: String::from("Dog"),
        };
        let pet = form.to_pet(None).unwrap();
        assert_eq!(pet.birth_date, NaiveDate::from_ymd_opt(2015, 12, 1).unwrap());
        assert_eq!(pet.pet_type, "Dog");
        assert!(pet.visits.is_empty());
        assert!(pet.owner_id.is_none());
    }

    #[test]
    fn pet_form_rejects_future_birth_date() {
        let tomorrow = Utc::now().date_naive().succ_opt().unwrap();
        let form = PetForm {
            name: String::from("Rufus"),
            birth_date: tomorrow.format(DATE_FORMAT).to_string(),
            pet_type: String::from("Dog"),
        };
        let errors = form.to_pet(None).unwrap_err();
        assert_eq!(errors.get("birth_date"), Some("Birth date must be in the past"));
    }

    #[test]
    fn pet_form_rejects_missing_fields() {
        let errors = PetForm::default().to_pet(None).unwrap_err();
        assert_eq!(errors.get("name"), Some("Name may not be blank"));
        assert_eq!(errors.get("birth_date"), Some("Birth date must be entered"));
        assert_eq!(errors.get("pet_type"), Some("Pet type must be chosen"));
    }

    #[test]
    fn pet_form_rejects_unknown_type() {
        let form = PetForm {
            name: String::from("Rufus"),
            birth_date: String::from("2015-12-01"),
            pet_type: String::from("Dragon"),
        };
        assert_eq!(
            form.to_pet(None).unwrap_err().get("pet_type"),
            Some("Unknown pet type")
        );
    }

    #[test]
    fn pet_form_round_trips_stored_pet() {
        let pet = Pet::new("Tom", NaiveDate::from_ymd_opt(2018, 5, 2).unwrap(), "Cat");
        let rebuilt = PetForm::from_pet(&pet).to_pet(Some(pet.id)).unwrap();
        assert_eq!(rebuilt, pet);
    }

    #[test]
    fn visit_form_dated_today_is_valid_once_described() {
        let mut form = VisitForm::dated_today();
        form.description = String::from("Doctor visit");

        let visit = form.to_visit().unwrap();
        assert_eq!(visit.date, Utc::now().date_naive());
        assert_eq!(visit.description, "Doctor visit");
    }

    #[test]
    fn visit_without_date_is_rejected() {
        let form = VisitForm {
            description: String::from("Doctor visit"),
            ..VisitForm::default()
        };
        assert_eq!(
            form.to_visit().unwrap_err().get("date"),
            Some("Date must be entered")
        );
    }

    #[test]
    fn visit_description_limit_is_500() {
        let mut form = VisitForm::dated_today();
        form.description = "x".repeat(501);
        assert_eq!(
            form.to_visit().unwrap_err().get("description"),
            Some("Description length must be between 1 and 500")
        );

        form.description = "x".repeat(500);
        assert!(form.to_visit().is_ok());
    }
}
