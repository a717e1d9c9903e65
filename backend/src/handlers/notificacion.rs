//! HTTP handlers for notification endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::notificacion::{NotificacionRow, NotificacionService};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct NotificacionQuery {
    #[serde(default)]
    pub unread_only: bool,
    pub limit: Option<i64>,
}

/// The caller's notifications, newest first
pub async fn list_notificaciones(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<NotificacionQuery>,
) -> AppResult<Json<Vec<NotificacionRow>>> {
    let service = NotificacionService::new(state.db);
    let notificaciones = service
        .list(
            current_user.0.user_id,
            query.unread_only,
            query.limit.unwrap_or(50),
        )
        .await?;
    Ok(Json(notificaciones))
}

/// Unread notification badge count
pub async fn unread_count(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<serde_json::Value>> {
    let service = NotificacionService::new(state.db);
    let count = service.unread_count(current_user.0.user_id).await?;
    Ok(Json(serde_json::json!({ "unread": count })))
}

/// Mark all of the caller's notifications read
pub async fn mark_all_read(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<serde_json::Value>> {
    let service = NotificacionService::new(state.db);
    let updated = service.mark_all_read(current_user.0.user_id).await?;
    Ok(Json(serde_json::json!({ "updated": updated })))
}

/// Delete one of the caller's notifications
pub async fn delete_notificacion(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(notificacion_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let service = NotificacionService::new(state.db);
    service
        .delete(current_user.0.user_id, notificacion_id)
        .await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Clear the caller's notification inbox
pub async fn delete_all(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<serde_json::Value>> {
    let service = NotificacionService::new(state.db);
    let deleted = service.delete_all(current_user.0.user_id).await?;
    Ok(Json(serde_json::json!({ "deleted": deleted })))
}
