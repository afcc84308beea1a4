//! Validation and filtering system
//!
//! Raw form values pass through field filters, then field validators. The
//! card form assembles its schema from these pieces in [`crate::core::form`].

pub mod filters;
pub mod schema;
pub mod validators;

pub use schema::{FieldRules, FormSchema};
pub use validators::UnknownTypePolicy;
