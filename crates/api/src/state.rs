//! Shared application state

use std::sync::Arc;

use crate::{
    config::Config,
    flash::{FlashStore, MemoryFlashStore},
    routing::{CachedVisaCatalog, StaticVisaCatalog, VisaCatalog, VisaRoutes},
};

/// State handed to every handler and extractor
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub visa_routes: VisaRoutes,
    pub flash: Arc<dyn FlashStore>,
}

impl AppState {
    pub fn new(config: Config, catalog: Arc<dyn VisaCatalog>, flash: Arc<dyn FlashStore>) -> Self {
        Self {
            config: Arc::new(config),
            visa_routes: VisaRoutes::new(catalog),
            flash,
        }
    }

    /// State with the catalog loaded from `VISA_CATALOG_PATH` (cached) and
    /// in-memory flash storage
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let catalog = match &config.visa_catalog_path {
            Some(path) => {
                let catalog = StaticVisaCatalog::from_file(path)?;
                tracing::info!(
                    path = %path,
                    countries = catalog.countries_sold.len(),
                    "loaded visa catalog"
                );
                catalog
            }
            None => {
                tracing::warn!("VISA_CATALOG_PATH not set, no countries are on sale");
                StaticVisaCatalog::default()
            }
        };

        let ttl = config.catalog_cache_ttl;
        Ok(Self::new(
            config,
            Arc::new(CachedVisaCatalog::new(catalog, ttl)),
            Arc::new(MemoryFlashStore::new()),
        ))
    }
}
