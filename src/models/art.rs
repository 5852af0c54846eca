// src/models/art.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Valor usado quando a propriedade/aplicação referenciada não existe.
pub const NOT_AVAILABLE: &str = "N/A";

// --- ART (Anotação de Responsabilidade Técnica) ---
// As referências (propertyId, applicationId) podem ficar "penduradas".
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Art {
    pub id: String,

    #[schema(example = "2024123456")]
    pub art_number: String,

    pub issue_date: NaiveDate,
    pub property_id: String,
    pub application_id: String,

    /// PDF do receituário
    pub file_url: Option<String>,

    /// Código do lote aplicado. Junção por igualdade de string com Lot.lotCode.
    pub lot_number: Option<String>,

    /// Número da NF-e. Só a presença é verificada.
    pub nf_number: Option<String>,
}

// ART com os dados denormalizados para exibição
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FullArt {
    #[serde(flatten)]
    pub art: Art,

    pub property_name: String,
    pub application_product: String,
    pub application_date: Option<NaiveDate>,
    pub responsible: String,
    pub culture: Option<String>,
    pub dose: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateArtPayload {
    #[validate(length(min = 1, message = "O número da ART é obrigatório."))]
    pub art_number: String,

    pub issue_date: NaiveDate,

    #[validate(length(min = 1, message = "A propriedade é obrigatória."))]
    pub property_id: String,

    #[validate(length(min = 1, message = "A aplicação é obrigatória."))]
    pub application_id: String,

    pub file_url: Option<String>,
    pub lot_number: Option<String>,
    pub nf_number: Option<String>,
}
