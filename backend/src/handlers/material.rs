//! HTTP handlers for the material catalog

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::policy::{self, Operation};
use crate::services::material::{
    CreateMaterialInput, Material, MaterialFilter, MaterialService, UpdateMaterialInput,
};
use crate::AppState;

/// Create a catalog entry
pub async fn create_material(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateMaterialInput>,
) -> AppResult<Json<Material>> {
    policy::check(&current_user.0, Operation::ManageCatalog)?;
    let service = MaterialService::new(state.db);
    let material = service.create(input).await?;
    Ok(Json(material))
}

/// Update a catalog entry (never its stock)
pub async fn update_material(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(material_id): Path<Uuid>,
    Json(input): Json<UpdateMaterialInput>,
) -> AppResult<Json<Material>> {
    policy::check(&current_user.0, Operation::ManageCatalog)?;
    let service = MaterialService::new(state.db);
    let material = service.update(material_id, input).await?;
    Ok(Json(material))
}

/// Remove a catalog entry with no live requests against it
pub async fn delete_material(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(material_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    policy::check(&current_user.0, Operation::ManageCatalog)?;
    let service = MaterialService::new(state.db);
    service.delete(material_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Get one material
pub async fn get_material(
    State(state): State<AppState>,
    Path(material_id): Path<Uuid>,
) -> AppResult<Json<Material>> {
    let service = MaterialService::new(state.db);
    let material = service.get(material_id).await?;
    Ok(Json(material))
}

/// Browse the catalog
pub async fn list_materials(
    State(state): State<AppState>,
    Query(filter): Query<MaterialFilter>,
) -> AppResult<Json<Vec<Material>>> {
    let service = MaterialService::new(state.db);
    let materials = service.list(filter).await?;
    Ok(Json(materials))
}
