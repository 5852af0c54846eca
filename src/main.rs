//src/main.rs

use std::sync::Arc;

use anyhow::Context;
use chrono::Local;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use agrort::{
    config::{AppState, Config},
    db::{seed, JsonFileStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logger: RUST_LOG controla o nível (padrão: info)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let config = Config::from_env().context("Falha ao carregar a configuração.")?;
    let bind_addr = config.bind_addr.clone();

    tracing::info!("📂 Roster de usuários em {}", config.roster_path.display());
    let store = Arc::new(JsonFileStore::new(config.roster_path.clone()));

    let seed_demo_data = config.seed_demo_data;
    let app_state = AppState::build(config, store);

    if seed_demo_data {
        seed::load_demo_data(&app_state.record_repo, Local::now().date_naive()).await;
    }

    let app = agrort::app(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Falha ao iniciar o listener TCP em {}", bind_addr))?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app)
        .await
        .context("Erro no servidor Axum")?;

    Ok(())
}
