//! Catalog validation.

mod validate;

pub use validate::{ensure_valid, validate_catalog, validate_item, ValidationResult};
