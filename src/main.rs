use anyhow::Context;
use tracing_subscriber::EnvFilter;

use bookvoyage_api::config::Config;
use bookvoyage_api::routes::create_router;
use bookvoyage_api::state::AppState;
use bookvoyage_api::store::ArtifactStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // One-time artifact load; any failure is fatal before the server binds
    let store = ArtifactStore::load(&config.data_dir)
        .with_context(|| format!("loading artifacts from {}", config.data_dir))?;

    tracing::info!(
        titles = store.titles().len(),
        popular_rows = store.popular_len(),
        "Loaded recommendation artifacts"
    );

    let state = AppState::new(store);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("Server running on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
