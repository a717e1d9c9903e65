//! Shared domain types for the LabStock platform
//!
//! Role and state enums, the solicitud state machine, pagination helpers
//! and quantity validation used across the backend and its test suites.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
