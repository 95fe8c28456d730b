use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use attendance_db::{Database, DatabaseConfig};
use attendance_server::config::ServerConfig;
use attendance_server::state::AppState;
use attendance_server::{layers, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("attendance=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .with_target(false)
        .init();

    let config = ServerConfig::from_env()?;
    let db = Database::connect(&DatabaseConfig::from_env()?).await?;

    let state = Arc::new(AppState::new(db.student_repo(), config.environment));
    let app = layers::harden(routes::router(state));

    let addr = config.bind_addr();
    tracing::info!(environment = %config.environment, "Starting server on {addr}");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install CTRL+C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
