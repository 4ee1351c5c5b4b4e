//! Locatr Engine - Main entry point.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use locatr_engine::{api, bind_listener, build_app, infrastructure::config::EngineConfig, serve};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging before configuration so .env loading is reported
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "locatr_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Locatr Engine");

    let config = EngineConfig::load()?;
    tracing::info!(
        database = %config.database_url,
        debug = config.app_debug,
        seed = config.seed_demo_data,
        "Configuration loaded"
    );

    let listener = bind_listener(&config).await?;
    let app = build_app(config).await?;
    let router = api::router(app);

    // Start server
    tracing::info!("Listening on {}", listener.local_addr()?);
    serve(listener, router).await?;

    Ok(())
}
