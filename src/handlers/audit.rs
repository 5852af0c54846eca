// src/handlers/audit.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    config::AppState,
    middleware::rbac::{PermAuditRead, RequirePermission},
    models::audit::AuditLogEntry,
};

// GET /api/audit
#[utoipa::path(
    get,
    path = "/api/audit",
    tag = "Audit",
    responses(
        (status = 200, description = "Log de auditoria, mais recente primeiro", body = Vec<AuditLogEntry>),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_audit_logs(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermAuditRead>,
) -> impl IntoResponse {
    let logs = app_state.audit_repo.list().await;
    (StatusCode::OK, Json(logs))
}
