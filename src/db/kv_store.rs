// src/db/kv_store.rs

use std::{collections::HashMap, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::common::error::AppError;

/// Persistência chave-valor de blobs de texto (JSON).
/// Usada pelo roster de usuários e pelo token do provedor de mapas.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn set(&self, key: &str, value: String) -> Result<(), AppError>;
}

// ---
// Implementação em memória (testes e modo efêmero)
// ---
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), AppError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

// ---
// Implementação em arquivo: um objeto JSON { chave: blob } no disco.
// Cada `set` lê o arquivo, troca a chave e regrava tudo (last-write-wins).
// ---
pub struct JsonFileStore {
    path: PathBuf,
    // Serializa leitura+escrita dentro do processo
    lock: RwLock<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    async fn load(&self) -> Result<HashMap<String, String>, AppError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(HashMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let _guard = self.lock.read().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), AppError> {
        let _guard = self.lock.write().await;

        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.path, serde_json::to_vec_pretty(&entries)?).await?;

        tracing::debug!("Chave '{}' gravada em {}", key, self.path.display());
        Ok(())
    }
}

pub type SharedStore = Arc<dyn KeyValueStore>;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_round_trips_values() {
        let store = MemoryStore::new();
        assert_eq!(store.get("users").await.unwrap(), None);

        store.set("users", "[]".into()).await.unwrap();
        assert_eq!(store.get("users").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn file_store_keeps_other_keys_on_write() {
        let path = std::env::temp_dir()
            .join(format!("agrort-kv-{}", uuid::Uuid::new_v4()))
            .join("roster.json");
        let store = JsonFileStore::new(&path);

        store.set("users", "[1]".into()).await.unwrap();
        store.set("map_token", "pk.abc".into()).await.unwrap();

        // Uma nova instância enxerga o que foi persistido
        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("users").await.unwrap().as_deref(), Some("[1]"));
        assert_eq!(reopened.get("map_token").await.unwrap().as_deref(), Some("pk.abc"));

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }
}
