use ritual::{router, AppConfig, AppState, RitualController, Storage};
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = AppConfig::from_env();
    let storage = Storage::new(config.data_dir.clone());
    storage.prepare().await?;

    let logs = storage.load_logs().await;
    let orbitals = storage.load_orbitals().await;
    info!(days = logs.days.len(), dir = %storage.dir().display(), "loaded ritual data");

    let state = AppState::new(storage, RitualController::new(logs, orbitals));
    let app = router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Err(err) = state.persist_all().await {
        error!("failed to flush ritual data on shutdown: {}", err.message);
    }
    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
