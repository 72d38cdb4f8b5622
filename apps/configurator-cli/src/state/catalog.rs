//! # Catalog State
//!
//! The catalog in use, shared read-only.

use std::ops::Deref;
use std::sync::Arc;

use tracing::info;

use configurator_core::Catalog;

use super::ConfigState;
use crate::error::{ApiError, ErrorCode};

#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: Arc<Catalog>,
}

impl CatalogState {
    pub fn new(catalog: Catalog) -> Self {
        CatalogState {
            catalog: Arc::new(catalog),
        }
    }

    /// Loads the configured catalog.
    ///
    /// Reads `catalog_path` when set, else uses the built-in catalog, then
    /// applies the configured default model.
    pub async fn load(config: &ConfigState) -> Result<Self, ApiError> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                let json = tokio::fs::read_to_string(path).await.map_err(|e| {
                    ApiError::new(
                        ErrorCode::IoError,
                        format!("Failed to read catalog {}: {}", path.display(), e),
                    )
                })?;
                let catalog = Catalog::from_json(&json)?;
                info!(path = %path.display(), models = catalog.models().len(), "Loaded catalog file");
                catalog
            }
            None => Catalog::elite_ev()?,
        };

        let catalog = match &config.default_model {
            Some(model_id) => catalog.with_default_model(model_id)?,
            None => catalog,
        };

        Ok(CatalogState::new(catalog))
    }
}

impl Deref for CatalogState {
    type Target = Catalog;

    fn deref(&self) -> &Catalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_builtin_with_default_model() {
        let config = ConfigState {
            default_model: Some("audi-etron".to_string()),
            ..ConfigState::default()
        };

        let catalog = CatalogState::load(&config).await.unwrap();
        assert_eq!(catalog.models().len(), 5);
        assert_eq!(catalog.default_model().id, "audi-etron");
    }

    #[tokio::test]
    async fn test_unknown_default_model_rejected() {
        let config = ConfigState {
            default_model: Some("roadster".to_string()),
            ..ConfigState::default()
        };

        let err = CatalogState::load(&config).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSelection);
    }

    #[tokio::test]
    async fn test_load_catalog_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        tokio::fs::write(
            file.path(),
            r#"{
                "models": [{ "id": "city", "name": "City Hatch", "basePrice": 21000 }],
                "sections": [{
                    "id": "color",
                    "name": "Color",
                    "options": [{ "id": "grey", "name": "Grey", "price": 0 }]
                }]
            }"#,
        )
        .await
        .unwrap();

        let config = ConfigState {
            catalog_path: Some(file.path().to_path_buf()),
            ..ConfigState::default()
        };

        let catalog = CatalogState::load(&config).await.unwrap();
        assert_eq!(catalog.default_model().name, "City Hatch");
        assert_eq!(catalog.sections().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigState {
            catalog_path: Some(dir.path().join("no-such-catalog.json")),
            ..ConfigState::default()
        };

        let err = CatalogState::load(&config).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::IoError);
    }
}
