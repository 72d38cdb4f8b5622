//! # Catalog Commands
//!
//! Read-only views of the catalog: models and their configuration sections.

use serde::Serialize;
use tracing::debug;

use configurator_core::{format_delta, ConfigOption, Money, OptionSection, VehicleModel};

use crate::state::CatalogState;

/// Vehicle model as listed to the customer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelResponse {
    pub id: String,
    pub name: String,
    pub base_price: Money,
    pub description: String,
    /// True for the model a new session starts with.
    pub is_default: bool,
}

/// One option within a section listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Money,
    /// `+$N` or `Included`
    pub price_text: String,
    pub is_default: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionResponse {
    pub id: String,
    pub name: String,
    pub options: Vec<OptionResponse>,
}

impl ModelResponse {
    fn new(model: &VehicleModel, default_id: &str) -> Self {
        ModelResponse {
            id: model.id.clone(),
            name: model.name.clone(),
            base_price: model.base_price,
            description: model.description.clone(),
            is_default: model.id == default_id,
        }
    }
}

impl OptionResponse {
    fn new(option: &ConfigOption, default_id: &str) -> Self {
        OptionResponse {
            id: option.id.clone(),
            name: option.name.clone(),
            description: option.description.clone(),
            price: option.price,
            price_text: format_delta(option.price),
            is_default: option.id == default_id,
        }
    }
}

impl From<&OptionSection> for SectionResponse {
    fn from(section: &OptionSection) -> Self {
        let default_id = section.default_option().id.as_str();
        SectionResponse {
            id: section.id().to_string(),
            name: section.name().to_string(),
            options: section
                .options()
                .iter()
                .map(|option| OptionResponse::new(option, default_id))
                .collect(),
        }
    }
}

/// Lists all models in catalog order.
pub fn list_models(catalog: &CatalogState) -> Vec<ModelResponse> {
    debug!("list_models command");
    let default_id = catalog.default_model().id.as_str();
    catalog
        .models()
        .iter()
        .map(|model| ModelResponse::new(model, default_id))
        .collect()
}

/// Lists all sections and their options in catalog order.
pub fn list_options(catalog: &CatalogState) -> Vec<SectionResponse> {
    debug!("list_options command");
    catalog.sections().iter().map(SectionResponse::from).collect()
}
