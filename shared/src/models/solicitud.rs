//! Solicitud (material request) state machine

use serde::{Deserialize, Serialize};

/// Lifecycle states of a Solicitud
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoSolicitud {
    Pendiente,
    Aprobada,
    EntregaPendiente,
    Entregada,
    Rechazada,
    Cancelado,
    SinRecoleccion,
}

impl EstadoSolicitud {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoSolicitud::Pendiente => "pendiente",
            EstadoSolicitud::Aprobada => "aprobada",
            EstadoSolicitud::EntregaPendiente => "entrega_pendiente",
            EstadoSolicitud::Entregada => "entregada",
            EstadoSolicitud::Rechazada => "rechazada",
            EstadoSolicitud::Cancelado => "cancelado",
            EstadoSolicitud::SinRecoleccion => "sin_recoleccion",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pendiente" => Some(EstadoSolicitud::Pendiente),
            "aprobada" => Some(EstadoSolicitud::Aprobada),
            "entrega_pendiente" => Some(EstadoSolicitud::EntregaPendiente),
            "entregada" => Some(EstadoSolicitud::Entregada),
            "rechazada" => Some(EstadoSolicitud::Rechazada),
            "cancelado" => Some(EstadoSolicitud::Cancelado),
            "sin_recoleccion" => Some(EstadoSolicitud::SinRecoleccion),
            _ => None,
        }
    }

    /// Terminal states admit no further transition
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EstadoSolicitud::Entregada
                | EstadoSolicitud::Rechazada
                | EstadoSolicitud::Cancelado
                | EstadoSolicitud::SinRecoleccion
        )
    }

    /// The legal edge set of the request lifecycle. Everything not listed
    /// here is a conflict.
    pub fn can_transition_to(&self, to: EstadoSolicitud) -> bool {
        use EstadoSolicitud::*;
        matches!(
            (*self, to),
            (Pendiente, Aprobada)
                | (Pendiente, Rechazada)
                | (Pendiente, Cancelado)
                | (Aprobada, EntregaPendiente)
                | (Aprobada, Rechazada)
                | (EntregaPendiente, Entregada)
                | (EntregaPendiente, Cancelado)
                | (EntregaPendiente, SinRecoleccion)
        )
    }
}
