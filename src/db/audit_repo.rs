// src/db/audit_repo.rs

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{
    audit::{AuditLogEntry, SYSTEM_ACTOR},
    auth::User,
};

// Log de auditoria em memória, mais recente primeiro.
#[derive(Clone, Default)]
pub struct AuditRepository {
    entries: Arc<RwLock<Vec<AuditLogEntry>>>,
}

impl AuditRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn log_action(&self, actor: Option<&User>, action: &str, details: Value) -> AuditLogEntry {
        let entry = AuditLogEntry {
            id: Uuid::new_v4(),
            actor: actor
                .map(|u| u.full_name.clone())
                .unwrap_or_else(|| SYSTEM_ACTOR.to_string()),
            action: action.to_string(),
            timestamp: Utc::now(),
            details,
        };

        tracing::info!("📝 Auditoria: {} - {}", entry.actor, entry.action);

        self.entries.write().await.insert(0, entry.clone());
        entry
    }

    pub async fn list(&self) -> Vec<AuditLogEntry> {
        self.entries.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn newest_entry_comes_first_and_system_is_default_actor() {
        let repo = AuditRepository::new();
        repo.log_action(None, "Lote cadastrado", json!({ "lotCode": "A" })).await;
        repo.log_action(None, "ART cadastrada", json!({})).await;

        let logs = repo.list().await;
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].action, "ART cadastrada");
        assert_eq!(logs[1].actor, SYSTEM_ACTOR);
    }
}
