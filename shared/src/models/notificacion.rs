//! Notification types

use serde::{Deserialize, Serialize};

/// Category of a user-facing notice created on state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificacionTipo {
    Solicitud,
    Entrega,
    Adeudo,
    Sistema,
}

impl NotificacionTipo {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificacionTipo::Solicitud => "solicitud",
            NotificacionTipo::Entrega => "entrega",
            NotificacionTipo::Adeudo => "adeudo",
            NotificacionTipo::Sistema => "sistema",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "solicitud" => Some(NotificacionTipo::Solicitud),
            "entrega" => Some(NotificacionTipo::Entrega),
            "adeudo" => Some(NotificacionTipo::Adeudo),
            "sistema" => Some(NotificacionTipo::Sistema),
            _ => None,
        }
    }
}
