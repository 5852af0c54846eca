// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Perfis de conta (os mesmos da tela de cadastro)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Industria,
    Revenda,
    ResponsavelTecnico,
    ProdutorRural,
    Fiscal,
}

impl Role {
    /// Slugs de permissão concedidos ao perfil.
    pub fn permissions(self) -> &'static [&'static str] {
        match self {
            Role::Industria => &["lots:write", "nfe:import"],
            Role::Revenda => &["lots:write", "nfe:import"],
            Role::ResponsavelTecnico => &["arts:write", "properties:write", "nfe:import"],
            Role::ProdutorRural => &["properties:write"],
            Role::Fiscal => &[
                "compliance:read",
                "reports:read",
                "audit:read",
                "professionals:write",
                "nfe:import",
                "settings:write",
            ],
        }
    }

    pub fn has_permission(self, slug: &str) -> bool {
        self.permissions().contains(&slug)
    }
}

// O que fica gravado no roster (inclui o hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

// Representa um usuário para a API (sem o hash)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,

    #[schema(example = "maria@exemplo.com")]
    pub email: String,

    #[schema(example = "Maria Oliveira")]
    pub full_name: String,

    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            full_name: record.full_name,
            role: record.role,
            created_at: record.created_at,
        }
    }
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,

    #[validate(length(min = 3, message = "O nome deve ter pelo menos 3 caracteres."))]
    pub full_name: String,

    pub role: Role,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time
    pub iat: usize, // Issued At
}
