// src/models/property.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

// --- 1. Cadastro Ambiental Rural (CAR) ---
// Registro ambiental da propriedade. Um para um, opcional.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalRegistry {
    /// Código de inscrição no CAR
    #[schema(example = "SP-3515807-ABCDE1234567890FABCDE1234567890F")]
    pub registry_id: String,

    #[schema(example = "Imóvel Rural")]
    pub kind: String,

    /// Só "Ativo" passa no cruzamento de conformidade.
    #[schema(example = "Ativo")]
    pub status: String,

    #[schema(example = "SP")]
    pub state: String,

    #[schema(example = "3515807")]
    pub municipality_id: String,

    pub condition: Option<String>,
    pub area: Option<Decimal>,
    pub fiscal_modules: Option<Decimal>,
    pub extraction_date: Option<NaiveDate>,
    pub car_updated_at: Option<NaiveDate>,
}

// --- 2. Aplicação de insumo ---
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub date: NaiveDate,

    #[schema(example = "Herbicida Z-MAX")]
    pub product: String,

    #[schema(example = "2L/ha")]
    pub dose: String,

    #[schema(example = "Pulverização tratorizada")]
    pub method: String,

    /// Responsável técnico, texto livre (ex: "João da Silva (CREA-SP 123456)")
    pub responsible: String,
    pub culture: String,
}

// --- 3. Propriedade rural ---
// As aplicações ficam embutidas na propriedade.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,

    #[schema(example = "Fazenda Santa Luzia")]
    pub name: String,

    /// CPF/CNPJ do proprietário
    #[schema(example = "123.456.789-00")]
    pub owner_id: String,

    /// Hectares
    pub total_area: Decimal,
    pub latitude: f64,
    pub longitude: f64,
    pub main_culture: String,
    pub address: String,

    /// UF, usada no relatório de uso por estado
    pub state: Option<String>,

    pub registry: Option<EnvironmentalRegistry>,

    #[serde(default)]
    pub applications: Vec<Application>,
}

impl Property {
    pub fn find_application(&self, application_id: &str) -> Option<&Application> {
        self.applications.iter().find(|a| a.id == application_id)
    }
}

fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payloads
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(length(min = 1, message = "O CPF/CNPJ do proprietário é obrigatório."))]
    pub owner_id: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub total_area: Decimal,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude inválida."))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude inválida."))]
    pub longitude: f64,

    #[validate(length(min = 1, message = "A cultura principal é obrigatória."))]
    pub main_culture: String,

    #[serde(default)]
    pub address: String,

    #[validate(length(equal = 2, message = "Use a sigla da UF (ex: SP)."))]
    pub state: Option<String>,

    pub registry: Option<EnvironmentalRegistry>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationPayload {
    pub date: NaiveDate,

    #[validate(length(min = 1, message = "O produto é obrigatório."))]
    pub product: String,

    #[validate(length(min = 1, message = "A dose é obrigatória."))]
    pub dose: String,

    #[validate(length(min = 1, message = "O método é obrigatório."))]
    pub method: String,

    #[validate(length(min = 1, message = "O responsável técnico é obrigatório."))]
    pub responsible: String,

    #[validate(length(min = 1, message = "A cultura é obrigatória."))]
    pub culture: String,
}
