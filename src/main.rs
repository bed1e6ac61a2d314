use std::sync::Arc;

use skysite::config::ServerConfig;
use skysite::seed::{self, SiteSeed};
use skysite::state::AppState;
use skysite::store::MemoryStore;
use skysite::{registry, routes};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;

    // Build the registry before the first request.
    let components = registry::registry();
    tracing::info!(components = components.len(), "component registry ready");

    let site = match &config.seed_path {
        Some(path) => SiteSeed::from_path(path).await?,
        None => SiteSeed::demo()?,
    };
    let store = MemoryStore::new();
    seed::load_into(&store, &site).await?;

    let port = config.port;
    if config.edit_mode {
        tracing::warn!("edit mode enabled; instance routes accept writes");
    }
    let app = routes::app(AppState::new(Arc::new(store), config));
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!(%port, "skysite listening");
    axum::serve(listener, app).await?;
    Ok(())
}
