//! Business logic services for the LabStock platform

pub mod adeudo;
pub mod auth;
pub mod chat;
pub mod inventory;
pub mod material;
pub mod notificacion;
pub mod solicitud;

pub use adeudo::AdeudoService;
pub use auth::AuthService;
pub use chat::ChatService;
pub use inventory::InventoryService;
pub use material::MaterialService;
pub use notificacion::NotificacionService;
pub use solicitud::SolicitudService;
