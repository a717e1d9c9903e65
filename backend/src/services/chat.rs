//! Internal staff chat service
//!
//! A single shared channel for admins and chat-enabled storekeepers.
//! Messages are short-lived; the janitor purges old ones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::policy::{self, Operation};

const MAX_MESSAGE_LEN: usize = 2000;

/// Staff chat service
#[derive(Clone)]
pub struct ChatService {
    db: PgPool,
}

/// A chat message joined with the sender's display name
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ChatMessageRow {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub sender_nombre: String,
    pub cuerpo: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageInput {
    pub cuerpo: String,
}

impl ChatService {
    /// Create a new ChatService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Post a message to the shared channel
    pub async fn send(&self, user: &AuthUser, input: SendMessageInput) -> AppResult<ChatMessageRow> {
        policy::check(user, Operation::UseChat)?;

        let cuerpo = input.cuerpo.trim();
        if cuerpo.is_empty() {
            return Err(AppError::ValidationError(
                "Message body cannot be empty".to_string(),
            ));
        }
        if cuerpo.chars().count() > MAX_MESSAGE_LEN {
            return Err(AppError::ValidationError(format!(
                "Message body exceeds {} characters",
                MAX_MESSAGE_LEN
            )));
        }

        let mensaje = sqlx::query_as::<_, ChatMessageRow>(
            r#"
            WITH inserted AS (
                INSERT INTO chat_mensajes (sender_id, cuerpo)
                VALUES ($1, $2)
                RETURNING id, sender_id, cuerpo, created_at
            )
            SELECT i.id, i.sender_id, u.nombre AS sender_nombre, i.cuerpo, i.created_at
            FROM inserted i
            JOIN usuarios u ON u.id = i.sender_id
            "#,
        )
        .bind(user.user_id)
        .bind(cuerpo)
        .fetch_one(&self.db)
        .await?;

        Ok(mensaje)
    }

    /// Recent channel history, oldest first
    pub async fn list(&self, user: &AuthUser, limit: i64) -> AppResult<Vec<ChatMessageRow>> {
        policy::check(user, Operation::UseChat)?;

        let mensajes = sqlx::query_as::<_, ChatMessageRow>(
            r#"
            SELECT c.id, c.sender_id, u.nombre AS sender_nombre, c.cuerpo, c.created_at
            FROM chat_mensajes c
            JOIN usuarios u ON u.id = c.sender_id
            ORDER BY c.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit.clamp(1, 500))
        .fetch_all(&self.db)
        .await?;

        Ok(mensajes.into_iter().rev().collect())
    }

    /// Drop messages older than the retention window. Janitor entry point.
    pub async fn purge_older_than(&self, days: i64) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM chat_mensajes WHERE created_at < NOW() - make_interval(days => $1::int)",
        )
        .bind(days)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected())
    }
}
