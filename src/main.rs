use anyhow::Result;
use tracing::info;

use recserve::api::{create_router, AppState};
use recserve::config::Config;
use recserve::services::loader;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting recserve v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!(data_dir = %config.data_dir.display(), "Loading recommendation tables");

    // Initial load; a service with no data to serve should not come up.
    let snapshot = loader::load_snapshot(&config).await?;

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(config, snapshot);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
