//! Inventory ledger service
//!
//! Every stock change goes through here: one signed delta applied with an
//! atomic conditional update, plus one append-only movement row. Concurrent
//! deliveries against the same material therefore cannot drive stock
//! negative, even if both passed an earlier read-time check.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::{MovimientoMotivo, PaginatedResponse, Pagination, PaginationMeta};

/// Inventory ledger service
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

/// An append-only ledger entry
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Movement {
    pub id: Uuid,
    pub material_id: Uuid,
    pub delta: Decimal,
    pub stock_resultante: Decimal,
    pub motivo: String,
    pub actor_id: Uuid,
    pub referencia: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One line of a bulk adjustment
#[derive(Debug, Clone, Deserialize)]
pub struct AdjustmentLine {
    pub material_id: Uuid,
    pub delta: Decimal,
    pub motivo: MovimientoMotivo,
    pub referencia: Option<String>,
}

/// Movement history filters
#[derive(Debug, Default, Deserialize)]
pub struct MovementFilter {
    pub material_id: Option<Uuid>,
    pub motivo: Option<MovimientoMotivo>,
    pub desde: Option<DateTime<Utc>>,
    pub hasta: Option<DateTime<Utc>>,
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Apply a single signed delta to a material's stock
    pub async fn adjust(
        &self,
        material_id: Uuid,
        delta: Decimal,
        motivo: MovimientoMotivo,
        actor_id: Uuid,
        referencia: Option<String>,
    ) -> AppResult<Movement> {
        let mut tx = self.db.begin().await?;
        let movement =
            Self::adjust_in_tx(&mut tx, material_id, delta, motivo, actor_id, referencia).await?;
        tx.commit().await?;
        Ok(movement)
    }

    /// Apply a delta inside an existing transaction. The conditional update
    /// is the non-negative-stock guard: it refuses rather than clamping.
    pub async fn adjust_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        material_id: Uuid,
        delta: Decimal,
        motivo: MovimientoMotivo,
        actor_id: Uuid,
        referencia: Option<String>,
    ) -> AppResult<Movement> {
        if delta.is_zero() {
            return Err(AppError::ValidationError(
                "Adjustment delta cannot be zero".to_string(),
            ));
        }

        let new_stock = sqlx::query_scalar::<_, Decimal>(
            r#"
            UPDATE materiales
            SET stock = stock + $2, updated_at = NOW()
            WHERE id = $1 AND stock + $2 >= 0
            RETURNING stock
            "#,
        )
        .bind(material_id)
        .bind(delta)
        .fetch_optional(&mut **tx)
        .await?;

        let new_stock = match new_stock {
            Some(stock) => stock,
            None => {
                // Distinguish a missing material from an insufficient balance
                let current = sqlx::query_scalar::<_, Decimal>(
                    "SELECT stock FROM materiales WHERE id = $1",
                )
                .bind(material_id)
                .fetch_optional(&mut **tx)
                .await?;

                return match current {
                    None => Err(AppError::NotFound("Material".to_string())),
                    Some(stock) => Err(AppError::InsufficientStock(format!(
                        "material {} has {} in stock, cannot apply delta {}",
                        material_id, stock, delta
                    ))),
                };
            }
        };

        let movement = sqlx::query_as::<_, Movement>(
            r#"
            INSERT INTO movimientos_inventario (material_id, delta, stock_resultante, motivo, actor_id, referencia)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, material_id, delta, stock_resultante, motivo, actor_id, referencia, created_at
            "#,
        )
        .bind(material_id)
        .bind(delta)
        .bind(new_stock)
        .bind(motivo.as_str())
        .bind(actor_id)
        .bind(&referencia)
        .fetch_one(&mut **tx)
        .await?;

        Ok(movement)
    }

    /// Apply a list of adjustments as a single all-or-nothing unit
    pub async fn bulk_adjust(
        &self,
        actor_id: Uuid,
        lines: Vec<AdjustmentLine>,
    ) -> AppResult<Vec<Movement>> {
        if lines.is_empty() {
            return Err(AppError::ValidationError(
                "Bulk adjustment requires at least one line".to_string(),
            ));
        }

        let mut tx = self.db.begin().await?;
        let mut movements = Vec::with_capacity(lines.len());

        for line in lines {
            let movement = Self::adjust_in_tx(
                &mut tx,
                line.material_id,
                line.delta,
                line.motivo,
                actor_id,
                line.referencia,
            )
            .await?;
            movements.push(movement);
        }

        tx.commit().await?;
        Ok(movements)
    }

    /// Set a material's stock to an absolute value, recorded as an `ajuste`
    pub async fn set_stock(
        &self,
        material_id: Uuid,
        nuevo_stock: Decimal,
        actor_id: Uuid,
    ) -> AppResult<Movement> {
        if nuevo_stock < Decimal::ZERO {
            return Err(AppError::ValidationError(
                "Stock cannot be set to a negative value".to_string(),
            ));
        }

        let mut tx = self.db.begin().await?;

        // Row lock so the delta is computed against a stable balance
        let current = sqlx::query_scalar::<_, Decimal>(
            "SELECT stock FROM materiales WHERE id = $1 FOR UPDATE",
        )
        .bind(material_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Material".to_string()))?;

        let delta = nuevo_stock - current;
        if delta.is_zero() {
            return Err(AppError::ValidationError(
                "Stock already at the requested value".to_string(),
            ));
        }

        let movement = Self::adjust_in_tx(
            &mut tx,
            material_id,
            delta,
            MovimientoMotivo::Ajuste,
            actor_id,
            None,
        )
        .await?;

        tx.commit().await?;
        Ok(movement)
    }

    /// Paginated movement history, filterable by material/date/reason
    pub async fn list_movements(
        &self,
        filter: MovementFilter,
        pagination: Pagination,
    ) -> AppResult<PaginatedResponse<Movement>> {
        let motivo = filter.motivo.map(|m| m.as_str().to_string());

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM movimientos_inventario
            WHERE ($1::uuid IS NULL OR material_id = $1)
              AND ($2::text IS NULL OR motivo = $2)
              AND ($3::timestamptz IS NULL OR created_at >= $3)
              AND ($4::timestamptz IS NULL OR created_at <= $4)
            "#,
        )
        .bind(filter.material_id)
        .bind(&motivo)
        .bind(filter.desde)
        .bind(filter.hasta)
        .fetch_one(&self.db)
        .await?;

        let movements = sqlx::query_as::<_, Movement>(
            r#"
            SELECT id, material_id, delta, stock_resultante, motivo, actor_id, referencia, created_at
            FROM movimientos_inventario
            WHERE ($1::uuid IS NULL OR material_id = $1)
              AND ($2::text IS NULL OR motivo = $2)
              AND ($3::timestamptz IS NULL OR created_at >= $3)
              AND ($4::timestamptz IS NULL OR created_at <= $4)
            ORDER BY created_at DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(filter.material_id)
        .bind(&motivo)
        .bind(filter.desde)
        .bind(filter.hasta)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        Ok(PaginatedResponse {
            pagination: PaginationMeta::new(&pagination, total as u64),
            data: movements,
        })
    }

    /// Render the filtered movement history as CSV
    pub async fn export_movements_csv(&self, filter: MovementFilter) -> AppResult<String> {
        let movements = sqlx::query_as::<_, Movement>(
            r#"
            SELECT id, material_id, delta, stock_resultante, motivo, actor_id, referencia, created_at
            FROM movimientos_inventario
            WHERE ($1::uuid IS NULL OR material_id = $1)
              AND ($2::text IS NULL OR motivo = $2)
              AND ($3::timestamptz IS NULL OR created_at >= $3)
              AND ($4::timestamptz IS NULL OR created_at <= $4)
            ORDER BY created_at
            "#,
        )
        .bind(filter.material_id)
        .bind(filter.motivo.map(|m| m.as_str().to_string()))
        .bind(filter.desde)
        .bind(filter.hasta)
        .fetch_all(&self.db)
        .await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record([
                "id",
                "material_id",
                "delta",
                "stock_resultante",
                "motivo",
                "actor_id",
                "referencia",
                "created_at",
            ])
            .map_err(|e| AppError::Internal(e.to_string()))?;

        for m in &movements {
            writer
                .write_record([
                    m.id.to_string(),
                    m.material_id.to_string(),
                    m.delta.to_string(),
                    m.stock_resultante.to_string(),
                    m.motivo.clone(),
                    m.actor_id.to_string(),
                    m.referencia.clone().unwrap_or_default(),
                    m.created_at.to_rfc3339(),
                ])
                .map_err(|e| AppError::Internal(e.to_string()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Internal(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| AppError::Internal(e.to_string()))
    }
}
