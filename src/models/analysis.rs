// src/models/analysis.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{art::FullArt, lot::Lot, property::Property};

// --- 1. Busca de lote ---
// Três estados: sem busca, sem resultado, encontrado.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "status", content = "lot", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LotSearch {
    NotSearched,
    NotFound,
    Found(Lot),
}

// --- 2. Cruzamento de dados (CAR x NF x Receituário) ---
#[derive(Debug, Clone, Copy, Serialize, ToSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceChecks {
    pub property_found: bool,
    pub registry_found: bool,
    pub registry_status_ok: bool,
    pub lot_found: bool,
    pub invoice_found: bool,
}

impl ComplianceChecks {
    pub fn all_passed(&self) -> bool {
        self.property_found
            && self.registry_found
            && self.registry_status_ok
            && self.lot_found
            && self.invoice_found
    }

    pub fn verdict(&self) -> ComplianceVerdict {
        if self.all_passed() {
            ComplianceVerdict::Compliant
        } else if self.property_found {
            ComplianceVerdict::NonCompliant
        } else {
            ComplianceVerdict::DataError
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceVerdict {
    Compliant,    // "Conforme"
    NonCompliant, // "Inconforme": a propriedade existe, mas algo abaixo falhou
    DataError,    // "Erro de Dados": a junção com a propriedade falhou
}

impl ComplianceVerdict {
    pub fn label(self) -> &'static str {
        match self {
            ComplianceVerdict::Compliant => "Conforme",
            ComplianceVerdict::NonCompliant => "Inconforme",
            ComplianceVerdict::DataError => "Erro de Dados",
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceResult {
    pub art: FullArt,
    pub property_name: Option<String>,
    pub property_owner_id: Option<String>,
    pub registry_id: Option<String>,
    pub registry_status: Option<String>,
    pub lot_code: Option<String>,
    pub checks: ComplianceChecks,
    pub verdict: ComplianceVerdict,
    pub verdict_label: String,
}

// --- 3. Profissionais ativos ---
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StateActivity {
    pub state: String,
    pub registered: usize,
    pub active: usize,
    pub activity_percentage: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityReport {
    pub total_registered: usize,
    pub total_active: usize,
    pub activity_percentage: f64,
    pub by_state: Vec<StateActivity>,
}

// --- 4. Uso de insumos (políticas públicas) ---
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UsageEntry {
    pub name: String,
    pub applications: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    pub by_culture: Vec<UsageEntry>,
    pub by_state: Vec<UsageEntry>,
}

// --- 5. Perfil do Responsável Técnico ---
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RtProfile {
    pub responsible: String,
    pub properties: Vec<Property>,
    pub recommended_products: Vec<String>,
    pub arts: Vec<FullArt>,
}
