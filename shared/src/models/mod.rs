//! Domain types for the LabStock platform

mod inventory;
mod material;
mod notificacion;
mod solicitud;
mod user;

pub use inventory::*;
pub use material::*;
pub use notificacion::*;
pub use solicitud::*;
pub use user::*;
