//! Create-payload validation for apartments.
//!
//! Unlike listing parameters, every violation is collected so the client gets
//! the full list in one response.

use serde::de::IgnoredAny;
use serde::Deserialize;

use crate::apartment::{ApartmentStatus, MAX_AREA, MAX_PRICE, MIN_AMOUNT};
use crate::error::CoreError;

/// A numeric field that may arrive as a JSON number or as a numeric string.
/// Any other JSON value is kept as `Invalid` and reported by the validator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
    Invalid(IgnoredAny),
}

impl NumericInput {
    /// The finite value, if this input holds one.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            NumericInput::Number(n) => *n,
            NumericInput::Text(s) => s.trim().parse().ok()?,
            NumericInput::Invalid(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

/// A text field. Non-string JSON values decode to `Invalid`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TextInput {
    Text(String),
    Invalid(IgnoredAny),
}

impl TextInput {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TextInput::Text(s) => Some(s),
            TextInput::Invalid(_) => None,
        }
    }
}

impl From<&str> for TextInput {
    fn from(value: &str) -> Self {
        TextInput::Text(value.to_string())
    }
}

/// Body of `POST /apartments`. Everything is optional and loosely typed here
/// so that missing or mistyped fields are reported by
/// [`validate_new_apartment`], not by the decoder.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateApartmentInput {
    pub project: Option<TextInput>,
    pub unit_name: Option<TextInput>,
    pub unit_number: Option<TextInput>,
    pub price: Option<NumericInput>,
    pub area: Option<NumericInput>,
    pub city: Option<TextInput>,
    pub description: Option<TextInput>,
    pub status: Option<TextInput>,
}

/// A validated apartment ready for insertion. Text fields are trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewApartment {
    pub project: String,
    pub unit_name: String,
    pub unit_number: String,
    pub price: f64,
    pub area: f64,
    pub city: String,
    pub description: Option<String>,
    pub status: ApartmentStatus,
}

/// Validate a create payload, reporting all violations together.
pub fn validate_new_apartment(input: &CreateApartmentInput) -> Result<NewApartment, CoreError> {
    let mut errors = Vec::new();

    let project = required_text(&input.project, "project", &mut errors);
    let unit_name = required_text(&input.unit_name, "unit_name", &mut errors);
    let unit_number = required_text(&input.unit_number, "unit_number", &mut errors);
    let price = required_amount(&input.price, "price", MAX_PRICE, &mut errors);
    let area = required_amount(&input.area, "area", MAX_AREA, &mut errors);
    let city = required_text(&input.city, "city", &mut errors);

    let status = match input.status.as_ref().map(|s| s.as_str().map(str::trim)) {
        None | Some(Some("")) => Some(ApartmentStatus::default()),
        Some(raw) => match raw.and_then(|s| s.parse::<ApartmentStatus>().ok()) {
            Some(status) => Some(status),
            None => {
                errors.push(format!(
                    "status must be one of: {}",
                    ApartmentStatus::ALL.map(ApartmentStatus::as_str).join(", ")
                ));
                None
            }
        },
    };
    let description = optional_text(&input.description, "description", &mut errors);

    match (project, unit_name, unit_number, price, area, city, status) {
        (
            Some(project),
            Some(unit_name),
            Some(unit_number),
            Some(price),
            Some(area),
            Some(city),
            Some(status),
        ) if errors.is_empty() => Ok(NewApartment {
            project,
            unit_name,
            unit_number,
            price,
            area,
            city,
            description,
            status,
        }),
        _ => Err(CoreError::RecordValidation(errors)),
    }
}

fn required_text(
    value: &Option<TextInput>,
    field: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    match value.as_ref().map(TextInput::as_str) {
        Some(Some(text)) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Some(None) => {
            errors.push(format!("{field} must be a string"));
            None
        }
        _ => {
            errors.push(format!("{field} is required"));
            None
        }
    }
}

/// Blank text becomes `None`. Only a non-string value is a violation.
fn optional_text(
    value: &Option<TextInput>,
    field: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    match value.as_ref().map(TextInput::as_str) {
        Some(Some(text)) => Some(text.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string),
        Some(None) => {
            errors.push(format!("{field} must be a string"));
            None
        }
        None => None,
    }
}

fn required_amount(
    value: &Option<NumericInput>,
    field: &str,
    max: f64,
    errors: &mut Vec<String>,
) -> Option<f64> {
    let Some(input) = value else {
        errors.push(format!("{field} is required"));
        return None;
    };
    if matches!(input, NumericInput::Text(s) if s.trim().is_empty()) {
        errors.push(format!("{field} is required"));
        return None;
    }
    match input.as_f64() {
        Some(amount) if amount >= MIN_AMOUNT && amount <= max => Some(amount),
        Some(amount) if amount > max => {
            errors.push(format!("{field} must not exceed {max:.2}"));
            None
        }
        _ => {
            errors.push(format!("{field} must be a positive number"));
            None
        }
    }
}
