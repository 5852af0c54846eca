pub mod kv_store;
pub use kv_store::{JsonFileStore, KeyValueStore, MemoryStore, SharedStore};
pub mod user_repo;
pub use user_repo::UserRepository;
pub mod settings_repo;
pub use settings_repo::SettingsRepository;
pub mod record_repo;
pub use record_repo::{RecordRepository, Records};
pub mod audit_repo;
pub use audit_repo::AuditRepository;
pub mod notification_repo;
pub use notification_repo::NotificationStateRepository;
pub mod seed;
