// src/config.rs

use std::{env, path::PathBuf, sync::Arc};

use anyhow::Context;

use crate::{
    common::i18n::I18nStore,
    db::{
        AuditRepository, NotificationStateRepository, RecordRepository, SettingsRepository,
        SharedStore, UserRepository,
    },
    services::{
        activity_service::ActivityService, auth::AuthService,
        compliance_service::ComplianceService, document_service::DocumentService,
        nfe_service::NfeService, notification_service::NotificationService,
        registry_service::RegistryService, traceability_service::TraceabilityService,
    },
};

// Configuração lida do ambiente (.env)
#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub bind_addr: String,
    pub roster_path: PathBuf,
    pub public_base_url: String,
    pub fonts_dir: PathBuf,
    pub seed_demo_data: bool,
    pub bcrypt_cost: u32,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let seed_demo_data = var_or("SEED_DEMO_DATA", "true")
            .parse::<bool>()
            .context("SEED_DEMO_DATA deve ser true ou false")?;

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(raw) => raw
                .parse::<u32>()
                .context("BCRYPT_COST deve ser um número")?,
            Err(_) => bcrypt::DEFAULT_COST,
        };

        Ok(Self {
            jwt_secret,
            bind_addr: var_or("BIND_ADDR", "0.0.0.0:3000"),
            roster_path: var_or("ROSTER_PATH", "./data/roster.json").into(),
            public_base_url: var_or("PUBLIC_BASE_URL", "http://localhost:3000"),
            fonts_dir: var_or("FONTS_DIR", "./fonts").into(),
            seed_demo_data,
            bcrypt_cost,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub i18n_store: Arc<I18nStore>,

    pub record_repo: RecordRepository,
    pub audit_repo: AuditRepository,
    pub settings_repo: SettingsRepository,

    pub auth_service: AuthService,
    pub traceability_service: TraceabilityService,
    pub compliance_service: ComplianceService,
    pub notification_service: NotificationService,
    pub activity_service: ActivityService,
    pub nfe_service: NfeService,
    pub registry_service: RegistryService,
    pub document_service: DocumentService,
}

impl AppState {
    /// Monta o gráfico de dependências sobre o store do roster.
    pub fn build(config: Config, store: SharedStore) -> Self {
        let record_repo = RecordRepository::new();
        let audit_repo = AuditRepository::new();
        let settings_repo = SettingsRepository::new(store.clone());
        let user_repo = UserRepository::new(store);

        let auth_service =
            AuthService::new(user_repo, config.jwt_secret.clone(), config.bcrypt_cost);
        let document_service =
            DocumentService::new(config.fonts_dir.clone(), config.public_base_url.clone());

        Self {
            i18n_store: Arc::new(I18nStore::builtin()),
            traceability_service: TraceabilityService::new(record_repo.clone()),
            compliance_service: ComplianceService::new(record_repo.clone()),
            notification_service: NotificationService::new(
                record_repo.clone(),
                NotificationStateRepository::new(),
            ),
            activity_service: ActivityService::new(record_repo.clone()),
            nfe_service: NfeService::new(record_repo.clone(), audit_repo.clone()),
            registry_service: RegistryService::new(record_repo.clone(), audit_repo.clone()),
            auth_service,
            document_service,
            record_repo,
            audit_repo,
            settings_repo,
            config: Arc::new(config),
        }
    }
}
