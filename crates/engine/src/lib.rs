//! Locatr Engine library.
//!
//! Server-side code for the location directory API.
//!
//! ## Structure
//!
//! - `use_cases/` - Sanitization, validation and delegation to the store
//! - `infrastructure/` - Port traits plus their SQLite, clock and config adapters
//! - `api/` - HTTP entry points, key check and error mapping
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;

use std::sync::Arc;

use infrastructure::{
    clock::SystemClock, config::EngineConfig, locations::SqliteLocationRepo, ports::RepoError,
};

/// Open the configured store and compose the application around it.
pub async fn build_app(config: EngineConfig) -> Result<Arc<App>, RepoError> {
    let clock = Arc::new(SystemClock::new());
    let repo = SqliteLocationRepo::connect(
        &config.database_url,
        config.database_max_connections,
        clock,
    )
    .await?;

    if config.seed_demo_data {
        infrastructure::seed::seed_demo_locations(&repo).await?;
    }

    Ok(Arc::new(App::new(config, Arc::new(repo))))
}

/// Bind the configured `host:port`; the host may be a name such as `localhost`.
pub async fn bind_listener(config: &EngineConfig) -> std::io::Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind(config.bind_address()).await
}

/// Serve `router` on `listener` until Ctrl+C or SIGTERM.
pub async fn serve(listener: tokio::net::TcpListener, router: axum::Router) -> std::io::Result<()> {
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
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
}
