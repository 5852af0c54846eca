// src/handlers/properties.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{PermPropertiesWrite, RequirePermission},
    },
    models::property::{CreateApplicationPayload, CreatePropertyPayload, Property},
};

// GET /api/properties
#[utoipa::path(
    get,
    path = "/api/properties",
    tag = "Properties",
    responses((status = 200, description = "Propriedades cadastradas", body = Vec<Property>)),
    security(("api_jwt" = []))
)]
pub async fn list_properties(State(app_state): State<AppState>) -> impl IntoResponse {
    let properties = app_state.registry_service.list_properties().await;
    (StatusCode::OK, Json(properties))
}

// POST /api/properties
#[utoipa::path(
    post,
    path = "/api/properties",
    tag = "Properties",
    request_body = CreatePropertyPayload,
    responses(
        (status = 201, description = "Propriedade criada", body = Property),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_property(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _guard: RequirePermission<PermPropertiesWrite>,
    Json(payload): Json<CreatePropertyPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let property = app_state
        .registry_service
        .create_property(&user.0, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(property)))
}

// GET /api/properties/{id}
#[utoipa::path(
    get,
    path = "/api/properties/{id}",
    tag = "Properties",
    params(("id" = String, Path, description = "ID da propriedade")),
    responses(
        (status = 200, description = "Propriedade com suas aplicações", body = Property),
        (status = 404, description = "Propriedade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_property(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let property = app_state
        .registry_service
        .get_property(&id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(property)))
}

// POST /api/properties/{id}/applications
#[utoipa::path(
    post,
    path = "/api/properties/{id}/applications",
    tag = "Properties",
    params(("id" = String, Path, description = "ID da propriedade")),
    request_body = CreateApplicationPayload,
    responses(
        (status = 201, description = "Aplicação registrada", body = Property),
        (status = 404, description = "Propriedade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_application(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _guard: RequirePermission<PermPropertiesWrite>,
    Path(id): Path<String>,
    Json(payload): Json<CreateApplicationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let property = app_state
        .registry_service
        .add_application(&user.0, &id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(property)))
}
