//! Domain logic for the apartment listing service.
//!
//! Pure types and validation with no database or HTTP dependencies, shared
//! by the repository layer and the API server.

pub mod apartment;
pub mod apartment_input;
pub mod error;
pub mod listing;
pub mod types;
