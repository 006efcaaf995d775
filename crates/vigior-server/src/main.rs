use std::env;

use tracing_subscriber::EnvFilter;

use vigior_engine::engine::Engine;
use vigior_server::config;
use vigior_server::state::AppState;
use vigior_storage::records::RecordStore;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json_logs = env::var("VIGIOR_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json_logs {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let config = config::resolve(|key| env::var(key).ok())?;
    let engine = Engine::from_config(&config.engine)?;
    let store = RecordStore::open(config.data_file.clone())?;

    tracing::info!(
        model = engine.model().id(),
        policy = ?engine.policy(),
        data_file = %config.data_file.display(),
        "engine ready"
    );

    let app = vigior_server::app(AppState::new(engine, store));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        return;
    }
    tracing::info!("shutting down");
}
