// src/handlers/nfe.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{PermNfeImport, RequirePermission},
    },
    models::nfe::NfeData,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct ImportQuery {
    /// Nome do arquivo enviado
    pub file_name: Option<String>,
}

// GET /api/nfe
#[utoipa::path(
    get,
    path = "/api/nfe",
    tag = "NF-e",
    responses((status = 200, description = "Notas importadas", body = Vec<NfeData>)),
    security(("api_jwt" = []))
)]
pub async fn list_invoices(State(app_state): State<AppState>) -> impl IntoResponse {
    let invoices = app_state.nfe_service.list().await;
    (StatusCode::OK, Json(invoices))
}

// POST /api/nfe?fileName=  (corpo: XML da nota)
#[utoipa::path(
    post,
    path = "/api/nfe",
    tag = "NF-e",
    params(ImportQuery),
    request_body(content = String, content_type = "application/xml", description = "XML da NF-e"),
    responses(
        (status = 201, description = "NF-e importada", body = NfeData),
        (status = 422, description = "XML ilegível ou sem número da nota")
    ),
    security(("api_jwt" = []))
)]
pub async fn import_invoice(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _guard: RequirePermission<PermNfeImport>,
    Query(query): Query<ImportQuery>,
    body: String,
) -> Result<impl IntoResponse, ApiError> {
    let file_name = query.file_name.unwrap_or_else(|| "nfe.xml".to_string());

    let invoice = app_state
        .nfe_service
        .import(&user.0, &file_name, &body)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(invoice)))
}
