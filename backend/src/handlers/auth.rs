//! HTTP handlers for authentication endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::auth::{
    AuthService, AuthTokens, RegisterInput, RegisterResponse, UpdateFlagsInput,
};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshInput {
    pub refresh_token: String,
}

/// Register a new student or teacher account
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> AppResult<Json<RegisterResponse>> {
    let service = AuthService::new(state.db, &state.config);
    let response = service.register(input).await?;
    Ok(Json(response))
}

/// Authenticate with email and password
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> AppResult<Json<AuthTokens>> {
    let service = AuthService::new(state.db, &state.config);
    let tokens = service.login(&input.email, &input.password).await?;
    Ok(Json(tokens))
}

/// Exchange a refresh token for a new token pair
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshInput>,
) -> AppResult<Json<AuthTokens>> {
    let service = AuthService::new(state.db, &state.config);
    let tokens = service.refresh_token(&input.refresh_token).await?;
    Ok(Json(tokens))
}

/// Admin: update a storekeeper's chat/stock access flags
pub async fn update_flags(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<Uuid>,
    Json(input): Json<UpdateFlagsInput>,
) -> AppResult<Json<serde_json::Value>> {
    let service = AuthService::new(state.db, &state.config);
    service.update_flags(&current_user.0, user_id, input).await?;
    Ok(Json(serde_json::json!({ "updated": true })))
}
