//! HTTP handlers for the internal staff chat

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::chat::{ChatMessageRow, ChatService, SendMessageInput};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatQuery {
    pub limit: Option<i64>,
}

/// Post a message to the staff channel
pub async fn send_message(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<SendMessageInput>,
) -> AppResult<Json<ChatMessageRow>> {
    let service = ChatService::new(state.db);
    let mensaje = service.send(&current_user.0, input).await?;
    Ok(Json(mensaje))
}

/// Recent channel history, oldest first
pub async fn list_messages(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ChatQuery>,
) -> AppResult<Json<Vec<ChatMessageRow>>> {
    let service = ChatService::new(state.db);
    let mensajes = service
        .list(&current_user.0, query.limit.unwrap_or(100))
        .await?;
    Ok(Json(mensajes))
}
