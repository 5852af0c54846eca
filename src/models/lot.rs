// src/models/lot.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementKind {
    Manufacture, // Vira "MANUFACTURE"
    Transport,
    Sale,
    Application,
    Receipt,
    Processing,
}

// --- Movimentação (Histórico) ---
// Append-only. A ordem é a de inserção, o sistema nunca reordena.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub date: NaiveDate,

    #[schema(example = "Transporte para Revenda AgroMax")]
    pub event: String,

    #[schema(example = "AgroMax")]
    pub location: String,

    pub kind: MovementKind,
    pub responsible_party: String,
    pub note: Option<String>,
}

// --- Lote de insumo ---
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lot {
    pub id: String,

    #[schema(example = "LOTE-20240615-001")]
    pub lot_code: String,

    #[schema(example = "Herbicida XZ100")]
    pub input_name: String,

    #[schema(example = "Química Verde S.A.")]
    pub manufacturer: String,

    pub composition: String,
    pub manufacture_date: NaiveDate,
    pub expiry_date: NaiveDate,

    #[serde(default)]
    pub movements: Vec<Movement>,
}

fn validate_not_blank(val: &str) -> Result<(), ValidationError> {
    if val.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("O código do lote é obrigatório.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payloads
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLotPayload {
    #[validate(custom(function = "validate_not_blank"))]
    pub lot_code: String,

    #[validate(length(min = 1, message = "O nome do insumo é obrigatório."))]
    pub input_name: String,

    #[validate(length(min = 1, message = "O fabricante é obrigatório."))]
    pub manufacturer: String,

    #[serde(default)]
    pub composition: String,

    pub manufacture_date: NaiveDate,
    pub expiry_date: NaiveDate,
}

impl CreateLotPayload {
    /// Validade não pode ser anterior à fabricação.
    pub fn validate_consistency(&self) -> Result<(), ValidationError> {
        if self.expiry_date < self.manufacture_date {
            let mut err = ValidationError::new("ExpiryBeforeManufacture");
            err.message = Some("A validade não pode ser anterior à fabricação.".into());
            return Err(err);
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddMovementPayload {
    pub date: NaiveDate,

    #[validate(length(min = 1, message = "O evento é obrigatório."))]
    pub event: String,

    #[validate(length(min = 1, message = "O local é obrigatório."))]
    pub location: String,

    pub kind: MovementKind,

    #[validate(length(min = 1, message = "O responsável é obrigatório."))]
    pub responsible_party: String,

    pub note: Option<String>,
}
