// src/handlers/analysis.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    config::AppState,
    middleware::rbac::{PermComplianceRead, PermReportsRead, RequirePermission},
    models::analysis::{ActivityReport, ComplianceResult, UsageReport},
};

// GET /api/analysis/compliance
#[utoipa::path(
    get,
    path = "/api/analysis/compliance",
    tag = "Analysis",
    responses(
        (status = 200, description = "Cruzamento CAR x Lote x NF-e por ART", body = Vec<ComplianceResult>),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn compliance(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermComplianceRead>,
) -> impl IntoResponse {
    let results = app_state.compliance_service.analyze().await;
    (StatusCode::OK, Json(results))
}

// GET /api/analysis/activity
#[utoipa::path(
    get,
    path = "/api/analysis/activity",
    tag = "Analysis",
    responses(
        (status = 200, description = "Profissionais ativos, no total e por estado", body = ActivityReport),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn activity(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermReportsRead>,
) -> impl IntoResponse {
    let report = app_state.activity_service.activity().await;
    (StatusCode::OK, Json(report))
}

// GET /api/analysis/usage
#[utoipa::path(
    get,
    path = "/api/analysis/usage",
    tag = "Analysis",
    responses(
        (status = 200, description = "Uso de insumos por cultura e por estado", body = UsageReport),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn usage(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermReportsRead>,
) -> impl IntoResponse {
    let report = app_state.activity_service.usage().await;
    (StatusCode::OK, Json(report))
}
