//! Apartment listing status and storage limits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Entity name used in not-found errors and log fields.
pub const ENTITY_APARTMENT: &str = "Apartment";

/// Reported when a create collides with an existing (project, unit_number).
pub const DUPLICATE_UNIT_MESSAGE: &str =
    "An apartment with this project and unit number already exists";

/// Smallest accepted price or area. Both columns keep two decimal places.
pub const MIN_AMOUNT: f64 = 0.01;

/// Upper bound of the `price` column (`NUMERIC(12,2)`).
pub const MAX_PRICE: f64 = 9_999_999_999.99;

/// Upper bound of the `area` column (`NUMERIC(10,2)`).
pub const MAX_AREA: f64 = 99_999_999.99;

/// Sales status of a listed unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApartmentStatus {
    #[default]
    Available,
    Sold,
    Reserved,
}

impl ApartmentStatus {
    pub const ALL: [ApartmentStatus; 3] = [
        ApartmentStatus::Available,
        ApartmentStatus::Sold,
        ApartmentStatus::Reserved,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ApartmentStatus::Available => "available",
            ApartmentStatus::Sold => "sold",
            ApartmentStatus::Reserved => "reserved",
        }
    }
}

impl fmt::Display for ApartmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the known statuses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown apartment status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for ApartmentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApartmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Lets row decoders map the `status` TEXT column straight into the enum.
impl TryFrom<String> for ApartmentStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
