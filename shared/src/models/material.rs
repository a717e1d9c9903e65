//! Material catalog types

use serde::{Deserialize, Serialize};

/// The four material subtypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialTipo {
    Liquido,
    Solido,
    Equipo,
    Laboratorio,
}

impl MaterialTipo {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialTipo::Liquido => "liquido",
            MaterialTipo::Solido => "solido",
            MaterialTipo::Equipo => "equipo",
            MaterialTipo::Laboratorio => "laboratorio",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "liquido" => Some(MaterialTipo::Liquido),
            "solido" => Some(MaterialTipo::Solido),
            "equipo" => Some(MaterialTipo::Equipo),
            "laboratorio" => Some(MaterialTipo::Laboratorio),
            _ => None,
        }
    }
}
