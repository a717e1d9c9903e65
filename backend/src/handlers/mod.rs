//! HTTP handlers for the LabStock API

pub mod adeudo;
pub mod auth;
pub mod chat;
pub mod health;
pub mod inventory;
pub mod material;
pub mod notificacion;
pub mod solicitud;

pub use adeudo::*;
pub use auth::*;
pub use chat::*;
pub use health::*;
pub use inventory::*;
pub use material::*;
pub use notificacion::*;
pub use solicitud::*;
