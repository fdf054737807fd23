//! # bustrackd — bustrack daemon
//!
//! Composition root that wires the storage backend and HTTP adapter together
//! and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging
//! - Construct the configured repository (`SQLite` or Supabase)
//! - Construct the application service, injecting the repository via its port
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use bustrack_adapter_http_axum::router;
use bustrack_adapter_http_axum::state::AppState;
use bustrack_adapter_storage_sqlite_sqlx::SqliteBusRepository;
use bustrack_app::ports::BusRepository;
use bustrack_app::services::bus_location_service::BusLocationService;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::config::{Backend, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, backend = ?config.database.backend, "bustrackd listening");

    match config.database.backend {
        Backend::Sqlite => {
            let db = bustrack_adapter_storage_sqlite_sqlx::Config {
                database_url: config.database_url().to_string(),
            }
            .build()
            .await?;
            serve(listener, SqliteBusRepository::new(db.pool().clone())).await?;
        }
        Backend::Supabase => {
            let repo = config.supabase().build()?;
            serve(listener, repo).await?;
        }
    }

    tracing::info!("bustrackd stopped");
    Ok(())
}

async fn serve<R>(listener: TcpListener, repo: R) -> std::io::Result<()>
where
    R: BusRepository + Send + Sync + 'static,
{
    let state = AppState::new(BusLocationService::new(repo));
    let app = router::build(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "cannot listen for SIGTERM");
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

    tracing::info!("shutdown signal received");
}
