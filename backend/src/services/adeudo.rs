//! Adeudo (material debt) tracking service
//!
//! Debts are created by delivery shortfalls and shrink as returns come in.
//! A row reaching zero is deleted, not flagged.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::policy::{self, Operation};
use crate::services::notificacion::NotificacionService;
use shared::{validate_devolucion, NotificacionTipo};

/// Material debt service
#[derive(Clone)]
pub struct AdeudoService {
    db: PgPool,
}

/// An adeudo row joined with requester and material names for listings
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AdeudoRow {
    pub id: Uuid,
    pub solicitud_item_id: Uuid,
    pub usuario_id: Uuid,
    pub usuario_nombre: String,
    pub material_id: Uuid,
    pub material_nombre: String,
    pub cantidad_pendiente: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of the return endpoint
#[derive(Debug, Deserialize)]
pub struct DevolucionInput {
    pub cantidad: Decimal,
}

impl AdeudoService {
    /// Create a new AdeudoService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Whether a user still owes material from past deliveries
    pub async fn has_open_debts(&self, usuario_id: Uuid) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM adeudos WHERE usuario_id = $1)",
        )
        .bind(usuario_id)
        .fetch_one(&self.db)
        .await?;

        Ok(exists)
    }

    /// Record a delivery shortfall inside the delivery transaction. A repeat
    /// delivery for the same item replaces the previous shortfall.
    pub async fn record_shortfall_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        solicitud_item_id: Uuid,
        usuario_id: Uuid,
        material_id: Uuid,
        cantidad: Decimal,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO adeudos (solicitud_item_id, usuario_id, material_id, cantidad_pendiente)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (solicitud_item_id)
            DO UPDATE SET cantidad_pendiente = EXCLUDED.cantidad_pendiente, updated_at = NOW()
            "#,
        )
        .bind(solicitud_item_id)
        .bind(usuario_id)
        .bind(material_id)
        .bind(cantidad)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Register a partial or full return against a debt. Returned material
    /// is assumed consumed or damaged and never goes back into stock.
    pub async fn apply_return(
        &self,
        user: &AuthUser,
        adeudo_id: Uuid,
        input: DevolucionInput,
    ) -> AppResult<Option<AdeudoRow>> {
        policy::check(user, Operation::RegisterReturn)?;

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, (Uuid, Decimal, String)>(
            r#"
            SELECT a.usuario_id, a.cantidad_pendiente, s.folio
            FROM adeudos a
            JOIN solicitud_items i ON i.id = a.solicitud_item_id
            JOIN solicitudes s ON s.id = i.solicitud_id
            WHERE a.id = $1
            FOR UPDATE OF a
            "#,
        )
        .bind(adeudo_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Adeudo".to_string()))?;

        let (usuario_id, pendiente, folio) = row;

        validate_devolucion(input.cantidad, pendiente)
            .map_err(|m| AppError::ValidationError(m.to_string()))?;

        let restante = pendiente - input.cantidad;
        let settled = restante == Decimal::ZERO;

        let remaining = if settled {
            sqlx::query("DELETE FROM adeudos WHERE id = $1")
                .bind(adeudo_id)
                .execute(&mut *tx)
                .await?;
            None
        } else {
            sqlx::query("UPDATE adeudos SET cantidad_pendiente = $2, updated_at = NOW() WHERE id = $1")
                .bind(adeudo_id)
                .bind(restante)
                .execute(&mut *tx)
                .await?;
            Some(self.get_in_tx(&mut tx, adeudo_id).await?)
        };

        tx.commit().await?;

        let mensaje = if settled {
            format!("Tu adeudo de la solicitud {} quedó liquidado", folio)
        } else {
            format!(
                "Devolución registrada en la solicitud {}, quedan {} pendientes",
                folio, restante
            )
        };
        NotificacionService::new(self.db.clone())
            .notify(usuario_id, NotificacionTipo::Adeudo, mensaje)
            .await?;

        Ok(remaining)
    }

    /// A user's own open debts
    pub async fn list_by_user(&self, usuario_id: Uuid) -> AppResult<Vec<AdeudoRow>> {
        let adeudos = sqlx::query_as::<_, AdeudoRow>(
            r#"
            SELECT a.id, a.solicitud_item_id, a.usuario_id, u.nombre AS usuario_nombre,
                   a.material_id, m.nombre AS material_nombre, a.cantidad_pendiente,
                   a.created_at, a.updated_at
            FROM adeudos a
            JOIN usuarios u ON u.id = a.usuario_id
            JOIN materiales m ON m.id = a.material_id
            WHERE a.usuario_id = $1
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(usuario_id)
        .fetch_all(&self.db)
        .await?;

        Ok(adeudos)
    }

    /// Every open debt, for storekeepers and admins
    pub async fn list_all(&self, user: &AuthUser) -> AppResult<Vec<AdeudoRow>> {
        policy::check(user, Operation::ListAllAdeudos)?;

        let adeudos = sqlx::query_as::<_, AdeudoRow>(
            r#"
            SELECT a.id, a.solicitud_item_id, a.usuario_id, u.nombre AS usuario_nombre,
                   a.material_id, m.nombre AS material_nombre, a.cantidad_pendiente,
                   a.created_at, a.updated_at
            FROM adeudos a
            JOIN usuarios u ON u.id = a.usuario_id
            JOIN materiales m ON m.id = a.material_id
            ORDER BY a.created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(adeudos)
    }

    async fn get_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        adeudo_id: Uuid,
    ) -> AppResult<AdeudoRow> {
        let adeudo = sqlx::query_as::<_, AdeudoRow>(
            r#"
            SELECT a.id, a.solicitud_item_id, a.usuario_id, u.nombre AS usuario_nombre,
                   a.material_id, m.nombre AS material_nombre, a.cantidad_pendiente,
                   a.created_at, a.updated_at
            FROM adeudos a
            JOIN usuarios u ON u.id = a.usuario_id
            JOIN materiales m ON m.id = a.material_id
            WHERE a.id = $1
            "#,
        )
        .bind(adeudo_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(adeudo)
    }
}
