// src/models/professional.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Cadastro de profissionais (CREA), usado só na análise de atividade.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredProfessional {
    pub id: String,

    #[schema(example = "João da Silva")]
    pub name: String,

    #[schema(example = "CREA-SP 123456")]
    pub registration_number: String,

    #[schema(example = "SP")]
    pub state: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfessionalPayload {
    #[validate(length(min = 3, message = "O nome deve ter no mínimo 3 caracteres."))]
    pub name: String,

    #[validate(length(min = 1, message = "O registro profissional é obrigatório."))]
    pub registration_number: String,

    #[validate(length(equal = 2, message = "Use a sigla da UF (ex: SP)."))]
    pub state: String,
}
