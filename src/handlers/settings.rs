// src/handlers/settings.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{PermSettingsWrite, RequirePermission},
    },
    models::settings::{MapTokenSettings, UpdateMapTokenPayload},
};

// GET /api/settings/map-token
#[utoipa::path(
    get,
    path = "/api/settings/map-token",
    tag = "Settings",
    responses((status = 200, description = "Token do provedor de mapas", body = MapTokenSettings)),
    security(("api_jwt" = []))
)]
pub async fn get_map_token(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let map_token = app_state
        .settings_repo
        .get_map_token()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(MapTokenSettings { map_token })))
}

// PUT /api/settings/map-token
#[utoipa::path(
    put,
    path = "/api/settings/map-token",
    tag = "Settings",
    request_body = UpdateMapTokenPayload,
    responses(
        (status = 200, description = "Token salvo", body = MapTokenSettings),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_map_token(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _guard: RequirePermission<PermSettingsWrite>,
    Json(payload): Json<UpdateMapTokenPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let token = payload.map_token.trim().to_string();
    app_state
        .settings_repo
        .set_map_token(&token)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    // Não grava o token em si na auditoria
    app_state
        .audit_repo
        .log_action(Some(&user.0), "Token de mapa atualizado", json!({}))
        .await;

    Ok((StatusCode::OK, Json(MapTokenSettings { map_token: Some(token) })))
}
