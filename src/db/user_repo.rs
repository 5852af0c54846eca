// src/db/user_repo.rs

use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::kv_store::SharedStore,
    models::auth::UserRecord,
};

// Chave do roster de usuários no KeyValueStore
const USERS_KEY: &str = "users";

/// Roster de usuários, persistido como um blob JSON (lista) no KeyValueStore.
/// Leitura e escrita trocam a lista inteira.
#[derive(Clone)]
pub struct UserRepository {
    store: SharedStore,
    // Segura ler-checar-gravar do roster como uma operação só
    write_lock: Arc<Mutex<()>>,
}

impl UserRepository {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    async fn load_all(&self) -> Result<Vec<UserRecord>, AppError> {
        match self.store.get(USERS_KEY).await? {
            Some(blob) => Ok(serde_json::from_str(&blob)?),
            None => Ok(Vec::new()),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let users = self.load_all().await?;
        Ok(users
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email)))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, AppError> {
        let users = self.load_all().await?;
        Ok(users.into_iter().find(|u| u.id == id))
    }

    /// Acrescenta o usuário ao roster. E-mail é único (sem diferenciar maiúsculas).
    pub async fn create_user(&self, user: UserRecord) -> Result<UserRecord, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut users = self.load_all().await?;

        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(AppError::EmailAlreadyExists);
        }

        users.push(user.clone());
        self.store
            .set(USERS_KEY, serde_json::to_string(&users)?)
            .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{JsonFileStore, MemoryStore};
    use crate::models::auth::Role;
    use chrono::Utc;

    fn record(email: &str) -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            email: email.to_string(),
            full_name: "Usuário".into(),
            role: Role::ProdutorRural,
            password_hash: "hash".into(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_registrations_are_all_kept() {
        let dir = std::env::temp_dir().join(format!("agrort-users-{}", Uuid::new_v4()));
        let repo = UserRepository::new(Arc::new(JsonFileStore::new(dir.join("roster.json"))));

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create_user(record(&format!("u{}@exemplo.com", i))).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        for i in 0..20 {
            let email = format!("u{}@exemplo.com", i);
            assert!(repo.find_by_email(&email).await.unwrap().is_some(), "{} perdido", email);
        }
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_duplicate_email_is_accepted_once() {
        let repo = UserRepository::new(Arc::new(MemoryStore::new()));

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create_user(record("mesmo@exemplo.com")).await })
            })
            .collect();

        let mut accepted = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => accepted += 1,
                Err(e) => assert!(matches!(e, AppError::EmailAlreadyExists)),
            }
        }
        assert_eq!(accepted, 1);
    }
}
