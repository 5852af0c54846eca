// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
};

/// 1. O Trait que define o que é uma Permissão
pub trait PermissionDef: Send + Sync + 'static {
    fn slug() -> &'static str;
}

/// 2. O Extractor (Guardião). Precisa rodar depois do `auth_guard`.
pub struct RequirePermission<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequirePermission<T>
where
    T: PermissionDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let Ok(locale) = Locale::from_request_parts(parts, state).await;

        // A. Extrai Usuário
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::InvalidToken.to_api_error(&locale, &app_state.i18n_store))?;

        // B. O perfil tem a permissão?
        let required_perm = T::slug();
        if !user.0.role.has_permission(required_perm) {
            tracing::warn!(
                "Acesso negado: {} ({:?}) sem '{}'",
                user.0.email,
                user.0.role,
                required_perm
            );
            return Err(AppError::Forbidden(required_perm)
                .to_api_error(&locale, &app_state.i18n_store));
        }

        Ok(RequirePermission(PhantomData))
    }
}

// ---
// DEFINIÇÃO DAS PERMISSÕES (TIPOS)
// ---

pub struct PermLotsWrite;
impl PermissionDef for PermLotsWrite {
    fn slug() -> &'static str { "lots:write" }
}

pub struct PermPropertiesWrite;
impl PermissionDef for PermPropertiesWrite {
    fn slug() -> &'static str { "properties:write" }
}

pub struct PermArtsWrite;
impl PermissionDef for PermArtsWrite {
    fn slug() -> &'static str { "arts:write" }
}

pub struct PermProfessionalsWrite;
impl PermissionDef for PermProfessionalsWrite {
    fn slug() -> &'static str { "professionals:write" }
}

pub struct PermComplianceRead;
impl PermissionDef for PermComplianceRead {
    fn slug() -> &'static str { "compliance:read" }
}

pub struct PermReportsRead;
impl PermissionDef for PermReportsRead {
    fn slug() -> &'static str { "reports:read" }
}

pub struct PermAuditRead;
impl PermissionDef for PermAuditRead {
    fn slug() -> &'static str { "audit:read" }
}

pub struct PermNfeImport;
impl PermissionDef for PermNfeImport {
    fn slug() -> &'static str { "nfe:import" }
}

pub struct PermSettingsWrite;
impl PermissionDef for PermSettingsWrite {
    fn slug() -> &'static str { "settings:write" }
}
