// src/handlers/professionals.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{PermProfessionalsWrite, RequirePermission},
    },
    models::professional::{CreateProfessionalPayload, RegisteredProfessional},
};

// GET /api/professionals
#[utoipa::path(
    get,
    path = "/api/professionals",
    tag = "Professionals",
    responses((status = 200, description = "Profissionais cadastrados (CREA)", body = Vec<RegisteredProfessional>)),
    security(("api_jwt" = []))
)]
pub async fn list_professionals(State(app_state): State<AppState>) -> impl IntoResponse {
    let professionals = app_state.registry_service.list_professionals().await;
    (StatusCode::OK, Json(professionals))
}

// POST /api/professionals
#[utoipa::path(
    post,
    path = "/api/professionals",
    tag = "Professionals",
    request_body = CreateProfessionalPayload,
    responses(
        (status = 201, description = "Profissional cadastrado", body = RegisteredProfessional),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_professional(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _guard: RequirePermission<PermProfessionalsWrite>,
    Json(payload): Json<CreateProfessionalPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let professional = app_state
        .registry_service
        .create_professional(&user.0, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(professional)))
}
