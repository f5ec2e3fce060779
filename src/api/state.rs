use std::sync::Arc;

use crate::catalog::{load_catalog, CatalogError, CatalogSource, EmbeddedCatalog, FileCatalog};
use crate::config::Config;
use crate::models::Catalog;
use crate::services::ScoringTables;

/// Shared application state
///
/// Both the catalog and the scoring tables are read-only for the lifetime of
/// the process; every request computes its recommendation from scratch.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub tables: Arc<ScoringTables>,
}

impl AppState {
    pub fn new(catalog: Catalog, tables: ScoringTables) -> Self {
        Self {
            catalog: Arc::new(catalog),
            tables: Arc::new(tables),
        }
    }

    /// State backed by the embedded catalog snapshot and default tables
    pub fn with_embedded_catalog() -> Result<Self, CatalogError> {
        Ok(Self::new(load_catalog(&EmbeddedCatalog)?, ScoringTables::default()))
    }

    /// Builds state from the configured catalog and scoring table files
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let source: Box<dyn CatalogSource> = match &config.catalog_path {
            Some(path) => Box::new(FileCatalog::new(path)),
            None => Box::new(EmbeddedCatalog),
        };
        let catalog = load_catalog(source.as_ref())?;

        let tables = match &config.scoring_tables_path {
            Some(path) => {
                tracing::info!(path = %path, "Loading scoring tables override");
                ScoringTables::from_file(path)?
            }
            None => ScoringTables::default(),
        };

        Ok(Self::new(catalog, tables))
    }
}
