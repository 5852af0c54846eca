// src/handlers/documents.rs

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    services::document_service::{applications_csv, attachment_disposition, csv_file_name},
};

// GET /api/properties/{id}/applications.csv
#[utoipa::path(
    get,
    path = "/api/properties/{id}/applications.csv",
    tag = "Reports",
    params(("id" = String, Path, description = "ID da propriedade")),
    responses(
        (status = 200, description = "Relatório de aplicações", content_type = "text/csv", body = String),
        (status = 404, description = "Propriedade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn export_applications_csv(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let property = app_state
        .registry_service
        .get_property(&id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let csv = applications_csv(&property.applications)
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    // Nome do arquivo pode ter acentos: vai como bytes UTF-8 no header
    let disposition = attachment_disposition(&csv_file_name(&property.name));
    let disposition = HeaderValue::from_bytes(disposition.as_bytes())
        .map_err(|e| AppError::InternalServerError(e.into()))
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static("text/csv; charset=utf-8")),
        (header::CONTENT_DISPOSITION, disposition),
    ];

    Ok((headers, csv).into_response())
}

// GET /api/lots/{id}/report.pdf
#[utoipa::path(
    get,
    path = "/api/lots/{id}/report.pdf",
    tag = "Reports",
    params(("id" = String, Path, description = "ID do lote")),
    responses(
        (status = 200, description = "Ficha do lote com QR code", content_type = "application/pdf", body = Vec<u8>),
        (status = 404, description = "Lote não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn lot_report_pdf(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let lot = app_state
        .registry_service
        .get_lot(&id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    // Renderização do PDF é CPU-bound
    let document_service = app_state.document_service.clone();
    let file_name = format!("lote_{}.pdf", lot.lot_code);
    let pdf_bytes = tokio::task::spawn_blocking(move || document_service.generate_lot_pdf(&lot))
        .await
        .map_err(|e| AppError::InternalServerError(anyhow::anyhow!("Falha na task do PDF: {}", e)))
        .and_then(|result| result)
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    // Configura os Headers para o navegador baixar o PDF
    let disposition = attachment_disposition(&file_name);
    let disposition = HeaderValue::from_bytes(disposition.as_bytes())
        .map_err(|e| AppError::InternalServerError(e.into()))
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
        (header::CONTENT_DISPOSITION, disposition),
    ];

    Ok((headers, pdf_bytes).into_response())
}
