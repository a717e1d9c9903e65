//! Inventory ledger types

use serde::{Deserialize, Serialize};

/// Reason tag for a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovimientoMotivo {
    Entrada,
    Salida,
    Ajuste,
}

impl MovimientoMotivo {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovimientoMotivo::Entrada => "entrada",
            MovimientoMotivo::Salida => "salida",
            MovimientoMotivo::Ajuste => "ajuste",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "entrada" => Some(MovimientoMotivo::Entrada),
            "salida" => Some(MovimientoMotivo::Salida),
            "ajuste" => Some(MovimientoMotivo::Ajuste),
            _ => None,
        }
    }
}
