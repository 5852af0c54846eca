// src/models/audit.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

// Nome usado quando a ação não tem um usuário por trás
pub const SYSTEM_ACTOR: &str = "Sistema";

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: Uuid,

    #[schema(example = "Maria Oliveira")]
    pub actor: String,

    #[schema(example = "ART cadastrada")]
    pub action: String,

    pub timestamp: DateTime<Utc>,

    #[schema(value_type = Object)]
    pub details: Value,
}
