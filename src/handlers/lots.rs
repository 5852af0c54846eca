// src/handlers/lots.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{PermLotsWrite, RequirePermission},
    },
    models::{
        analysis::LotSearch,
        lot::{AddMovementPayload, CreateLotPayload, Lot},
    },
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LotSearchQuery {
    /// Código do lote (ou parte dele)
    #[serde(default)]
    pub code: String,
}

// GET /api/lots
#[utoipa::path(
    get,
    path = "/api/lots",
    tag = "Lots",
    responses((status = 200, description = "Lotes cadastrados", body = Vec<Lot>)),
    security(("api_jwt" = []))
)]
pub async fn list_lots(State(app_state): State<AppState>) -> impl IntoResponse {
    let lots = app_state.registry_service.list_lots().await;
    (StatusCode::OK, Json(lots))
}

// POST /api/lots
#[utoipa::path(
    post,
    path = "/api/lots",
    tag = "Lots",
    request_body = CreateLotPayload,
    responses(
        (status = 201, description = "Lote cadastrado", body = Lot),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Código de lote já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_lot(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _guard: RequirePermission<PermLotsWrite>,
    Json(payload): Json<CreateLotPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    payload.validate_consistency().map_err(|e| {
        // Mantém o formato de resposta da validação padrão
        let mut errors = validator::ValidationErrors::new();
        errors.add("expiryDate", e);
        AppError::ValidationError(errors).to_api_error(&locale, &app_state.i18n_store)
    })?;

    let lot = app_state
        .registry_service
        .create_lot(&user.0, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(lot)))
}

// GET /api/lots/search?code=
#[utoipa::path(
    get,
    path = "/api/lots/search",
    tag = "Lots",
    params(LotSearchQuery),
    responses((status = 200, description = "NOT_SEARCHED, NOT_FOUND ou FOUND com o lote", body = LotSearch)),
    security(("api_jwt" = []))
)]
pub async fn search_lot(
    State(app_state): State<AppState>,
    Query(query): Query<LotSearchQuery>,
) -> impl IntoResponse {
    let result = app_state.traceability_service.search_lot(&query.code).await;
    (StatusCode::OK, Json(result))
}

// POST /api/lots/{id}/movements
#[utoipa::path(
    post,
    path = "/api/lots/{id}/movements",
    tag = "Lots",
    params(("id" = String, Path, description = "ID do lote")),
    request_body = AddMovementPayload,
    responses(
        (status = 201, description = "Movimentação registrada", body = Lot),
        (status = 404, description = "Lote não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_movement(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _guard: RequirePermission<PermLotsWrite>,
    Path(id): Path<String>,
    Json(payload): Json<AddMovementPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let lot = app_state
        .registry_service
        .add_movement(&user.0, &id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(lot)))
}

// GET /api/public/lots/{code}
// Consulta pública (destino do QR code), sem autenticação.
#[utoipa::path(
    get,
    path = "/api/public/lots/{code}",
    tag = "Public",
    params(("code" = String, Path, description = "Código exato do lote")),
    responses(
        (status = 200, description = "Lote e histórico de movimentações", body = Lot),
        (status = 404, description = "Lote não encontrado")
    )
)]
pub async fn public_trace(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let lot = app_state
        .traceability_service
        .trace_lot(&code)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(lot)))
}
