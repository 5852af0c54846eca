// src/models/nfe.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// Os cinco campos extraídos do XML. Campo ausente vira string vazia.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NfeFields {
    pub number: String,
    pub issued_at: String,
    pub issuer: String,
    pub recipient: String,
    pub total_value: String,
}

// NF-e importada
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NfeData {
    pub id: String,
    pub file_name: String,

    #[schema(example = "123456")]
    pub number: String,

    #[schema(example = "2024-06-01T10:00:00-03:00")]
    pub issued_at: String,

    pub issuer: String,
    pub recipient: String,

    /// Texto original de vNF
    #[schema(example = "1500.00")]
    pub total_value: String,

    /// vNF convertido, quando for um número válido
    pub total_amount: Option<Decimal>,

    pub imported_at: DateTime<Utc>,
}
