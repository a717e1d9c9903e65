//! In-application notification service
//!
//! Fire-and-store: other services call `notify` after their own work
//! commits; readers poll their list and unread count.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::NotificacionTipo;

/// Notification service
#[derive(Clone)]
pub struct NotificacionService {
    db: PgPool,
}

/// A notification row
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct NotificacionRow {
    pub id: Uuid,
    pub usuario_id: Uuid,
    pub tipo: String,
    pub mensaje: String,
    pub leida: bool,
    pub created_at: DateTime<Utc>,
}

impl NotificacionService {
    /// Create a new NotificacionService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Store a notification for a user
    pub async fn notify(
        &self,
        usuario_id: Uuid,
        tipo: NotificacionTipo,
        mensaje: String,
    ) -> AppResult<NotificacionRow> {
        let notificacion = sqlx::query_as::<_, NotificacionRow>(
            r#"
            INSERT INTO notificaciones (usuario_id, tipo, mensaje)
            VALUES ($1, $2, $3)
            RETURNING id, usuario_id, tipo, mensaje, leida, created_at
            "#,
        )
        .bind(usuario_id)
        .bind(tipo.as_str())
        .bind(&mensaje)
        .fetch_one(&self.db)
        .await?;

        Ok(notificacion)
    }

    /// Store a notification inside a caller-owned transaction. For notices
    /// that must land atomically with the state change they report.
    pub async fn notify_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        usuario_id: Uuid,
        tipo: NotificacionTipo,
        mensaje: String,
    ) -> AppResult<()> {
        sqlx::query("INSERT INTO notificaciones (usuario_id, tipo, mensaje) VALUES ($1, $2, $3)")
            .bind(usuario_id)
            .bind(tipo.as_str())
            .bind(&mensaje)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// A user's notifications, newest first
    pub async fn list(
        &self,
        usuario_id: Uuid,
        unread_only: bool,
        limit: i64,
    ) -> AppResult<Vec<NotificacionRow>> {
        let notificaciones = sqlx::query_as::<_, NotificacionRow>(
            r#"
            SELECT id, usuario_id, tipo, mensaje, leida, created_at
            FROM notificaciones
            WHERE usuario_id = $1 AND ($2 = false OR leida = false)
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(usuario_id)
        .bind(unread_only)
        .bind(limit.clamp(1, 200))
        .fetch_all(&self.db)
        .await?;

        Ok(notificaciones)
    }

    pub async fn unread_count(&self, usuario_id: Uuid) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notificaciones WHERE usuario_id = $1 AND leida = false",
        )
        .bind(usuario_id)
        .fetch_one(&self.db)
        .await?;

        Ok(count)
    }

    /// Mark all of a user's notifications read, returning how many changed
    pub async fn mark_all_read(&self, usuario_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notificaciones SET leida = true WHERE usuario_id = $1 AND leida = false",
        )
        .bind(usuario_id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete one notification. Deleting someone else's is forbidden, not
    /// silently ignored.
    pub async fn delete(&self, usuario_id: Uuid, notificacion_id: Uuid) -> AppResult<()> {
        let owner = sqlx::query_scalar::<_, Uuid>(
            "SELECT usuario_id FROM notificaciones WHERE id = $1",
        )
        .bind(notificacion_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Notificacion".to_string()))?;

        if owner != usuario_id {
            return Err(AppError::Forbidden(
                "you may only delete your own notifications".to_string(),
            ));
        }

        sqlx::query("DELETE FROM notificaciones WHERE id = $1")
            .bind(notificacion_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Clear a user's notification inbox
    pub async fn delete_all(&self, usuario_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM notificaciones WHERE usuario_id = $1")
            .bind(usuario_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected())
    }
}
