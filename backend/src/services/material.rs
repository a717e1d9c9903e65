//! Material catalog service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::{validate_cantidad, MaterialTipo};

/// Material catalog service
#[derive(Clone)]
pub struct MaterialService {
    db: PgPool,
}

/// A catalog material row
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Material {
    pub id: Uuid,
    pub nombre: String,
    pub categoria: String,
    pub unidad: String,
    pub stock: Decimal,
    pub tipo: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a material
#[derive(Debug, Deserialize)]
pub struct CreateMaterialInput {
    pub nombre: String,
    pub categoria: String,
    pub unidad: String,
    pub stock_inicial: Decimal,
    pub tipo: MaterialTipo,
}

/// Input for updating a material (stock is ledger-only)
#[derive(Debug, Deserialize)]
pub struct UpdateMaterialInput {
    pub nombre: Option<String>,
    pub categoria: Option<String>,
    pub unidad: Option<String>,
}

/// Catalog listing filters
#[derive(Debug, Default, Deserialize)]
pub struct MaterialFilter {
    pub tipo: Option<MaterialTipo>,
    pub categoria: Option<String>,
}

impl MaterialService {
    /// Create a new MaterialService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a catalog material
    pub async fn create(&self, input: CreateMaterialInput) -> AppResult<Material> {
        if input.nombre.trim().is_empty() {
            return Err(AppError::Validation {
                field: "nombre".to_string(),
                message: "Material name is required".to_string(),
                message_es: "El nombre del material es obligatorio".to_string(),
            });
        }

        if input.stock_inicial < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "stock_inicial".to_string(),
                message: "Initial stock cannot be negative".to_string(),
                message_es: "Las existencias iniciales no pueden ser negativas".to_string(),
            });
        }

        let material = sqlx::query_as::<_, Material>(
            r#"
            INSERT INTO materiales (nombre, categoria, unidad, stock, tipo)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, nombre, categoria, unidad, stock, tipo, created_at, updated_at
            "#,
        )
        .bind(&input.nombre)
        .bind(&input.categoria)
        .bind(&input.unidad)
        .bind(input.stock_inicial)
        .bind(input.tipo.as_str())
        .fetch_one(&self.db)
        .await?;

        Ok(material)
    }

    /// Update catalog fields of a material
    pub async fn update(&self, material_id: Uuid, input: UpdateMaterialInput) -> AppResult<Material> {
        if let Some(nombre) = &input.nombre {
            if nombre.trim().is_empty() {
                return Err(AppError::Validation {
                    field: "nombre".to_string(),
                    message: "Material name cannot be empty".to_string(),
                    message_es: "El nombre del material no puede quedar vacío".to_string(),
                });
            }
        }

        let material = sqlx::query_as::<_, Material>(
            r#"
            UPDATE materiales
            SET nombre = COALESCE($2, nombre),
                categoria = COALESCE($3, categoria),
                unidad = COALESCE($4, unidad),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, nombre, categoria, unidad, stock, tipo, created_at, updated_at
            "#,
        )
        .bind(material_id)
        .bind(&input.nombre)
        .bind(&input.categoria)
        .bind(&input.unidad)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Material".to_string()))?;

        Ok(material)
    }

    /// Delete a material; refuses while a live request still references it
    pub async fn delete(&self, material_id: Uuid) -> AppResult<()> {
        let referenced = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1
                FROM solicitud_items si
                JOIN solicitudes s ON s.id = si.solicitud_id
                WHERE si.material_id = $1
                  AND s.estado IN ('pendiente', 'aprobada', 'entrega_pendiente')
            )
            "#,
        )
        .bind(material_id)
        .fetch_one(&self.db)
        .await?;

        if referenced {
            return Err(AppError::Conflict {
                resource: "material".to_string(),
                message: "Material is referenced by an active request".to_string(),
                message_es: "El material está referenciado por una solicitud activa".to_string(),
            });
        }

        let result = sqlx::query("DELETE FROM materiales WHERE id = $1")
            .bind(material_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Material".to_string()));
        }

        Ok(())
    }

    /// Get a material by ID
    pub async fn get(&self, material_id: Uuid) -> AppResult<Material> {
        let material = sqlx::query_as::<_, Material>(
            r#"
            SELECT id, nombre, categoria, unidad, stock, tipo, created_at, updated_at
            FROM materiales
            WHERE id = $1
            "#,
        )
        .bind(material_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Material".to_string()))?;

        Ok(material)
    }

    /// List the catalog, optionally filtered by tipo/categoria
    pub async fn list(&self, filter: MaterialFilter) -> AppResult<Vec<Material>> {
        let tipo = filter.tipo.map(|t| t.as_str().to_string());

        let materials = sqlx::query_as::<_, Material>(
            r#"
            SELECT id, nombre, categoria, unidad, stock, tipo, created_at, updated_at
            FROM materiales
            WHERE ($1::text IS NULL OR tipo = $1)
              AND ($2::text IS NULL OR categoria = $2)
            ORDER BY nombre
            "#,
        )
        .bind(tipo)
        .bind(filter.categoria)
        .fetch_all(&self.db)
        .await?;

        Ok(materials)
    }

}

/// Shared quantity validation lifted into the AppError taxonomy
pub fn require_positive(field: &str, cantidad: Decimal) -> AppResult<()> {
    validate_cantidad(cantidad).map_err(|msg| AppError::Validation {
        field: field.to_string(),
        message: msg.to_string(),
        message_es: "La cantidad debe ser positiva".to_string(),
    })
}
