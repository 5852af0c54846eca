use std::{collections::HashMap, sync::LazyLock};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

static FALLBACK_I18N: LazyLock<I18nStore> = LazyLock::new(I18nStore::builtin);

// Nosso tipo de erro interno, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Permissão '{0}' ausente")]
    Forbidden(&'static str),

    #[error("Propriedade não encontrada: {0}")]
    PropertyNotFound(String),

    #[error("Lote não encontrado: {0}")]
    LotNotFound(String),

    #[error("Código de lote duplicado: {0}")]
    LotCodeAlreadyExists(String),

    #[error("Responsável técnico sem ARTs: {0}")]
    ProfessionalNotFound(String),

    #[error("Falha ao ler NF-e: {0}")]
    NfeParse(String),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("Falha ao gerar documento: {0}")]
    DocumentRender(String),

    #[error("Erro de armazenamento: {0}")]
    StorageError(#[from] std::io::Error),

    #[error("Erro de serialização: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Erro de CSV: {0}")]
    CsvError(#[from] csv::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// O erro que vai para o cliente
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl AppError {
    pub fn to_api_error(self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let lang = locale.0.as_str();
        let (status, error) = match &self {
            AppError::ValidationError(errors) => {
                // Retorna todos os detalhes da validação, campo a campo.
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                return ApiError {
                    status: StatusCode::BAD_REQUEST,
                    error: i18n.translate(lang, "validation", &[]),
                    details: Some(json!(details)),
                };
            }
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, i18n.translate(lang, "email_exists", &[]))
            }
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                i18n.translate(lang, "invalid_credentials", &[]),
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                i18n.translate(lang, "invalid_token", &[]),
            ),
            AppError::UserNotFound => {
                (StatusCode::NOT_FOUND, i18n.translate(lang, "user_not_found", &[]))
            }
            AppError::Forbidden(perm) => (
                StatusCode::FORBIDDEN,
                i18n.translate(lang, "forbidden", &[("perm", *perm)]),
            ),
            AppError::PropertyNotFound(id) => (
                StatusCode::NOT_FOUND,
                i18n.translate(lang, "property_not_found", &[("id", id.as_str())]),
            ),
            AppError::LotNotFound(id) => (
                StatusCode::NOT_FOUND,
                i18n.translate(lang, "lot_not_found", &[("id", id.as_str())]),
            ),
            AppError::LotCodeAlreadyExists(code) => (
                StatusCode::CONFLICT,
                i18n.translate(lang, "lot_code_exists", &[("code", code.as_str())]),
            ),
            AppError::ProfessionalNotFound(name) => (
                StatusCode::NOT_FOUND,
                i18n.translate(lang, "professional_not_found", &[("name", name.as_str())]),
            ),
            AppError::NfeParse(reason) => {
                tracing::warn!("NF-e rejeitada: {}", reason);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    i18n.translate(lang, "nfe_parse", &[]),
                )
            }
            AppError::FontNotFound(dir) => {
                tracing::error!("Fonte não encontrada em {}", dir);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    i18n.translate(lang, "font_not_found", &[]),
                )
            }

            // Todo o resto vira 500. O `tracing` loga a mensagem detalhada do `thiserror`.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    i18n.translate(lang, "internal", &[]),
                )
            }
        };

        ApiError {
            status,
            error,
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

// Usado pelos middlewares, que não têm o Locale em mãos.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default(), &FALLBACK_I18N)
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_variants_map_to_404() {
        let i18n = I18nStore::builtin();
        let locale = Locale("pt".into());

        let err = AppError::LotNotFound("lot-9".into()).to_api_error(&locale, &i18n);
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.error, "Lote 'lot-9' não encontrado.");
    }

    #[test]
    fn nfe_parse_is_unprocessable() {
        let i18n = I18nStore::builtin();
        let err = AppError::NfeParse("eof".into()).to_api_error(&Locale("en".into()), &i18n);
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error, "Could not read the NF-e XML file. Check its format.");
    }

    #[test]
    fn validation_errors_carry_field_details() {
        let mut errors = validator::ValidationErrors::new();
        let mut e = validator::ValidationError::new("length");
        e.message = Some("O nome é obrigatório.".into());
        errors.add("name", e);

        let api = AppError::ValidationError(errors)
            .to_api_error(&Locale::default(), &I18nStore::builtin());

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.details, Some(json!({ "name": ["O nome é obrigatório."] })));
    }
}
