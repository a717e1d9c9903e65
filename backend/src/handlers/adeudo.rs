//! HTTP handlers for material debt endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::adeudo::{AdeudoRow, AdeudoService, DevolucionInput};
use crate::AppState;

/// The caller's own open debts
pub async fn my_adeudos(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<AdeudoRow>>> {
    let service = AdeudoService::new(state.db);
    let adeudos = service.list_by_user(current_user.0.user_id).await?;
    Ok(Json(adeudos))
}

/// Every open debt, storekeeper/admin view
pub async fn list_adeudos(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<AdeudoRow>>> {
    let service = AdeudoService::new(state.db);
    let adeudos = service.list_all(&current_user.0).await?;
    Ok(Json(adeudos))
}

/// Register a return against a debt. Returns the remaining debt, or null
/// when it settles.
pub async fn registrar_devolucion(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(adeudo_id): Path<Uuid>,
    Json(input): Json<DevolucionInput>,
) -> AppResult<Json<Option<AdeudoRow>>> {
    let service = AdeudoService::new(state.db);
    let remaining = service
        .apply_return(&current_user.0, adeudo_id, input)
        .await?;
    Ok(Json(remaining))
}
