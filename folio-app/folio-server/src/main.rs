use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use folio_api::{build_router, Adapters, AppState};
use folio_security::SessionRegistry;
use folio_shared::config::AppConfig;
use folio_shared::AppError;
use folio_shared::constants::SESSION_SWEEP_SECS;
use folio_infrastructure::{
    remote_repositories, BackendClient, MemorySessionStore, RasterCropper,
    RemoteFileStorage, RemoteIdentityProvider, RemoteMailer,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().map_err(AppError::from)?;

    // Initialize telemetry; the guard flushes the file writer on exit
    let _log_guard = folio_shared::telemetry::init_telemetry(&config.log)?;

    info!("Folio server starting ({})...", config.app.env);
    if config.admin.owner_email.is_empty() {
        error!("admin.owner_email is not set; contact messages cannot be delivered");
    }

    // Backend adapters
    let client = BackendClient::new(&config.backend)?;
    info!("Backend at {} (app {})", config.backend.base_url, config.backend.app_id);

    let adapters = Adapters {
        repositories: remote_repositories(&client),
        identity: Arc::new(RemoteIdentityProvider::new(client.clone())),
        mailer: Arc::new(RemoteMailer::new(client.clone())),
        storage: Arc::new(RemoteFileStorage::new(client)),
        cropper: Arc::new(RasterCropper::new()),
        // Guards live in this process, so their records do too.
        session_store: Arc::new(MemorySessionStore::new()),
    };

    let state = AppState::new(config.clone(), adapters);
    spawn_session_sweeper(Arc::clone(&state.sessions));

    let app = build_router(state);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Folio server stopped");
    Ok(())
}

fn spawn_session_sweeper(sessions: Arc<SessionRegistry>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(SESSION_SWEEP_SECS));
        loop {
            interval.tick().await;
            sessions.sweep();
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
