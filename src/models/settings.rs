// src/models/settings.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Token do provedor de mapas usado pelo frontend
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapTokenSettings {
    pub map_token: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMapTokenPayload {
    #[validate(length(min = 1, message = "O token não pode ser vazio."))]
    pub map_token: String,
}
