//! Server binary: reads config, connects and syncs the products table, serves
//! until Ctrl-C / SIGTERM, then closes the pool.

use products_api::{build_app, AppState, Config, PgProductStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("products_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let store = match PgProductStore::connect(&config.database).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!(error = %e, "could not connect to the database");
            return Err(e.into());
        }
    };
    store.sync_schema().await?;

    let app = build_app(AppState::new(store.clone()), &config.frontend_url)?;
    let listener = TcpListener::bind(config.addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutting down");
}
