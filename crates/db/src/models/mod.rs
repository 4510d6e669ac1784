//! Row models.
//!
//! Each submodule holds a `FromRow` + `Serialize` struct matching a table row.
//! Create payloads are validated in `nawy_core` before they reach this layer.

pub mod apartment;
