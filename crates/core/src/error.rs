use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A list-query parameter that failed to parse. Reported one at a time.
    #[error("Invalid {field} parameter. Must be {expected}.")]
    InvalidParameter {
        field: &'static str,
        expected: &'static str,
    },

    /// Every violation found in a create payload, in field order.
    #[error("Validation failed: {}", .0.join("; "))]
    RecordValidation(Vec<String>),

    #[error("{0}")]
    Conflict(String),
}

impl CoreError {
    /// Name of the offending query parameter, if this is a parameter error.
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            CoreError::InvalidParameter { field, .. } => Some(*field),
            _ => None,
        }
    }
}
