// src/db/settings_repo.rs

use crate::{common::error::AppError, db::kv_store::SharedStore};

const MAP_TOKEN_KEY: &str = "map_token";

// Configurações simples guardadas no mesmo KeyValueStore do roster
#[derive(Clone)]
pub struct SettingsRepository {
    store: SharedStore,
}

impl SettingsRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn get_map_token(&self) -> Result<Option<String>, AppError> {
        self.store.get(MAP_TOKEN_KEY).await
    }

    pub async fn set_map_token(&self, token: &str) -> Result<(), AppError> {
        self.store.set(MAP_TOKEN_KEY, token.to_string()).await
    }
}
