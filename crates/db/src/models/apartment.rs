//! Apartment row model.

use nawy_core::apartment::ApartmentStatus;
use nawy_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `apartments` table.
///
/// `price` and `area` are stored as `NUMERIC` and selected as `float8`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Apartment {
    pub id: DbId,
    pub project: String,
    pub unit_name: String,
    pub unit_number: String,
    pub price: f64,
    pub area: f64,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ApartmentStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
