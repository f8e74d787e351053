//! Donor registry server binary

use anyhow::{Context, Result};
use donor_registry::config::AppConfig;
use donor_registry::core::DonorStore;
use donor_registry::logging::init_logging;
use donor_registry::server::ServerBuilder;
use donor_registry::storage::InMemoryDonorStore;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_logging(&config.log_level);

    let store = open_store(&config).await?;

    ServerBuilder::new()
        .with_shared_store(store)
        .with_cors_origins(config.server.cors_origins.clone())
        .with_request_timeout(Duration::from_secs(config.server.request_timeout_secs))
        .serve(&config.bind_address())
        .await
}

#[cfg(feature = "postgres")]
async fn open_store(config: &AppConfig) -> Result<Arc<dyn DonorStore>> {
    use donor_registry::storage::PostgresDonorStore;

    if config.database.url.is_none() {
        tracing::warn!("database.url is not set, donors are kept in memory only");
        return Ok(Arc::new(InMemoryDonorStore::new()));
    }

    let store = PostgresDonorStore::connect(&config.database)
        .await
        .context("failed to connect to PostgreSQL")?;

    if config.database.run_migrations {
        store.migrate().await.context("failed to run migrations")?;
        tracing::info!("database migrations applied");
    }

    Ok(Arc::new(store))
}

#[cfg(not(feature = "postgres"))]
async fn open_store(config: &AppConfig) -> Result<Arc<dyn DonorStore>> {
    if config.database.url.is_some() {
        tracing::warn!("built without the postgres feature, ignoring database.url");
    }
    tracing::warn!("donors are kept in memory only");
    Ok(Arc::new(InMemoryDonorStore::new()))
}
