// src/handlers/arts.rs

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
        rbac::{PermArtsWrite, RequirePermission},
    },
    models::{
        analysis::RtProfile,
        art::{CreateArtPayload, FullArt},
    },
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ArtFilter {
    /// Nome (ou parte) do responsável técnico
    pub responsible: Option<String>,
}

// GET /api/arts?responsible=
#[utoipa::path(
    get,
    path = "/api/arts",
    tag = "ARTs",
    params(ArtFilter),
    responses((status = 200, description = "ARTs, filtradas pelo responsável quando informado", body = Vec<FullArt>)),
    security(("api_jwt" = []))
)]
pub async fn list_arts(
    State(app_state): State<AppState>,
    Query(filter): Query<ArtFilter>,
) -> impl IntoResponse {
    let arts = app_state
        .traceability_service
        .list_arts(filter.responsible.as_deref())
        .await;
    (StatusCode::OK, Json(arts))
}

// POST /api/arts
#[utoipa::path(
    post,
    path = "/api/arts",
    tag = "ARTs",
    request_body = CreateArtPayload,
    responses(
        (status = 201, description = "ART cadastrada", body = FullArt),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_art(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _guard: RequirePermission<PermArtsWrite>,
    Json(payload): Json<CreateArtPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let art = app_state
        .registry_service
        .create_art(&user.0, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(art)))
}

// GET /api/rts/{name}
#[utoipa::path(
    get,
    path = "/api/rts/{name}",
    tag = "ARTs",
    params(("name" = String, Path, description = "Responsável técnico, como aparece nas ARTs")),
    responses(
        (status = 200, description = "Perfil do responsável técnico", body = RtProfile),
        (status = 404, description = "Nenhuma ART com esse responsável")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_rt_profile(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = app_state
        .traceability_service
        .rt_profile(&name)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(profile)))
}
