//! TourHub Server entry point.

use anyhow::Context;
use tokio::net::TcpListener;
use tourhub_db::{DbManager, run_migrations};
use tourhub_server::{AppState, CookieSettings, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("tourhub=info,tower_http=info"),
    };
    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    let config = ServerConfig::load()?;
    info!(environment = ?config.environment, "Starting TourHub server...");

    let db = DbManager::connect(&config.db_config())
        .await
        .context("unable to connect to SurrealDB")?;
    run_migrations(db.client())
        .await
        .context("unable to apply schema migrations")?;

    let state = AppState::new(
        db.client().clone(),
        config.auth_config(),
        CookieSettings {
            name: config.cookie_name.clone(),
            environment: config.environment,
        },
    );
    let app = tourhub_server::app(state, config.cors_origins()?);

    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("unable to bind {}:{}", config.host, config.port))?;
    info!(address = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    drop(db);
    info!("TourHub server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Unable to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Unable to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
