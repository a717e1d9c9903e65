//! HTTP handlers for inventory adjustment and movement history

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::policy::{self, Operation};
use crate::services::inventory::{
    AdjustmentLine, InventoryService, Movement, MovementFilter,
};
use crate::AppState;
use shared::{validate_cantidad, MovimientoMotivo, PaginatedResponse, Pagination};

#[derive(Debug, Deserialize)]
pub struct EntradaSalidaInput {
    pub cantidad: Decimal,
    pub referencia: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetStockInput {
    pub stock: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct BulkAdjustInput {
    pub lines: Vec<AdjustmentLine>,
}

#[derive(Debug, Deserialize)]
pub struct MovementQuery {
    pub material_id: Option<Uuid>,
    pub motivo: Option<MovimientoMotivo>,
    pub desde: Option<chrono::DateTime<chrono::Utc>>,
    pub hasta: Option<chrono::DateTime<chrono::Utc>>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl MovementQuery {
    fn split(self) -> (MovementFilter, Pagination) {
        let defaults = Pagination::default();
        (
            MovementFilter {
                material_id: self.material_id,
                motivo: self.motivo,
                desde: self.desde,
                hasta: self.hasta,
            },
            Pagination {
                page: self.page.unwrap_or(defaults.page),
                per_page: self.per_page.unwrap_or(defaults.per_page),
            },
        )
    }
}

/// Credit stock (restock, purchase intake)
pub async fn registrar_entrada(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(material_id): Path<Uuid>,
    Json(input): Json<EntradaSalidaInput>,
) -> AppResult<Json<Movement>> {
    policy::check(&current_user.0, Operation::AdjustStock)?;
    validate_cantidad(input.cantidad)
        .map_err(|m| crate::error::AppError::ValidationError(m.to_string()))?;
    let service = InventoryService::new(state.db);
    let movement = service
        .adjust(
            material_id,
            input.cantidad,
            MovimientoMotivo::Entrada,
            current_user.0.user_id,
            input.referencia,
        )
        .await?;
    Ok(Json(movement))
}

/// Debit stock outside the delivery flow (breakage, waste)
pub async fn registrar_salida(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(material_id): Path<Uuid>,
    Json(input): Json<EntradaSalidaInput>,
) -> AppResult<Json<Movement>> {
    policy::check(&current_user.0, Operation::AdjustStock)?;
    validate_cantidad(input.cantidad)
        .map_err(|m| crate::error::AppError::ValidationError(m.to_string()))?;
    let service = InventoryService::new(state.db);
    let movement = service
        .adjust(
            material_id,
            -input.cantidad,
            MovimientoMotivo::Salida,
            current_user.0.user_id,
            input.referencia,
        )
        .await?;
    Ok(Json(movement))
}

/// Set a material's stock to an absolute value
pub async fn set_stock(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(material_id): Path<Uuid>,
    Json(input): Json<SetStockInput>,
) -> AppResult<Json<Movement>> {
    policy::check(&current_user.0, Operation::AdjustStock)?;
    let service = InventoryService::new(state.db);
    let movement = service
        .set_stock(material_id, input.stock, current_user.0.user_id)
        .await?;
    Ok(Json(movement))
}

/// Apply several adjustments as one all-or-nothing batch
pub async fn bulk_adjust(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<BulkAdjustInput>,
) -> AppResult<Json<Vec<Movement>>> {
    policy::check(&current_user.0, Operation::AdjustStock)?;
    let service = InventoryService::new(state.db);
    let movements = service
        .bulk_adjust(current_user.0.user_id, input.lines)
        .await?;
    Ok(Json(movements))
}

/// Paginated movement history
pub async fn list_movements(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<MovementQuery>,
) -> AppResult<Json<PaginatedResponse<Movement>>> {
    policy::check(&current_user.0, Operation::ViewMovements)?;
    let (filter, pagination) = query.split();
    let service = InventoryService::new(state.db);
    let movements = service.list_movements(filter, pagination).await?;
    Ok(Json(movements))
}

/// Movement history export as CSV
pub async fn export_movements(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(filter): Query<MovementFilter>,
) -> AppResult<impl IntoResponse> {
    policy::check(&current_user.0, Operation::ViewMovements)?;
    let service = InventoryService::new(state.db);
    let csv = service.export_movements_csv(filter).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"movimientos.csv\"",
            ),
        ],
        csv,
    ))
}
