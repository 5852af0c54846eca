// src/db/notification_repo.rs

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use tokio::sync::RwLock;
use uuid::Uuid;

// Estado "lida" das notificações, por usuário. Vive só enquanto o processo vive.
#[derive(Clone, Default)]
pub struct NotificationStateRepository {
    read: Arc<RwLock<HashMap<Uuid, HashSet<String>>>>,
}

impl NotificationStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn read_ids(&self, user_id: Uuid) -> HashSet<String> {
        self.read
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn mark_read<I>(&self, user_id: Uuid, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.read
            .write()
            .await
            .entry(user_id)
            .or_default()
            .extend(ids);
    }
}
