//! HTTP middleware for the LabStock platform

pub mod auth;

pub use auth::{auth_middleware, AuthUser, CurrentUser};
