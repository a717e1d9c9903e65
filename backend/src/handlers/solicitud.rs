//! HTTP handlers for solicitud lifecycle endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::solicitud::{
    CreateSolicitudInput, EntregaInput, SolicitudDetalle, SolicitudFilter, SolicitudRow,
    SolicitudService,
};
use crate::AppState;

/// Create a grouped material request
pub async fn create_solicitud(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateSolicitudInput>,
) -> AppResult<Json<SolicitudDetalle>> {
    let service = SolicitudService::new(state.db);
    let solicitud = service.create(&current_user.0, input).await?;
    Ok(Json(solicitud))
}

/// List requests visible to the caller
pub async fn list_solicitudes(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(filter): Query<SolicitudFilter>,
) -> AppResult<Json<Vec<SolicitudRow>>> {
    let service = SolicitudService::new(state.db);
    let solicitudes = service.list(&current_user.0, filter).await?;
    Ok(Json(solicitudes))
}

/// Get a request with its items
pub async fn get_solicitud(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(solicitud_id): Path<Uuid>,
) -> AppResult<Json<SolicitudDetalle>> {
    let service = SolicitudService::new(state.db);
    let solicitud = service.get(&current_user.0, solicitud_id).await?;
    Ok(Json(solicitud))
}

/// Approve a pending request
pub async fn aprobar_solicitud(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(solicitud_id): Path<Uuid>,
) -> AppResult<Json<SolicitudRow>> {
    let service = SolicitudService::new(state.db);
    let solicitud = service.aprobar(&current_user.0, solicitud_id).await?;
    Ok(Json(solicitud))
}

/// Reject a request
pub async fn rechazar_solicitud(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(solicitud_id): Path<Uuid>,
) -> AppResult<Json<SolicitudRow>> {
    let service = SolicitudService::new(state.db);
    let solicitud = service.rechazar(&current_user.0, solicitud_id).await?;
    Ok(Json(solicitud))
}

/// Cancel a request
pub async fn cancelar_solicitud(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(solicitud_id): Path<Uuid>,
) -> AppResult<Json<SolicitudRow>> {
    let service = SolicitudService::new(state.db);
    let solicitud = service.cancelar(&current_user.0, solicitud_id).await?;
    Ok(Json(solicitud))
}

/// Record a delivery, debiting stock and registering shortfalls
pub async fn entregar_solicitud(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(solicitud_id): Path<Uuid>,
    Json(input): Json<EntregaInput>,
) -> AppResult<Json<SolicitudDetalle>> {
    let service = SolicitudService::new(state.db);
    let solicitud = service
        .entregar(&current_user.0, solicitud_id, input)
        .await?;
    Ok(Json(solicitud))
}
