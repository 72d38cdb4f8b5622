//! # Catalog
//!
//! Static definitions of vehicle models and configuration sections.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Catalog                                       │
//! │                                                                         │
//! │  models (declared order)        sections (declared order)               │
//! │  ┌──────────────────────┐       ┌──────────────────────────────────┐    │
//! │  │ tesla-model-3 45,000 │       │ color    white* black red ...    │    │
//! │  │ tesla-model-y 52,000 │       │ battery  standard* long-range .. │    │
//! │  │ bmw-i4        56,000 │       │ software basic* premium ...      │    │
//! │  │ ...                  │       │ ...                              │    │
//! │  └──────────────────────┘       └──────────────────────────────────┘    │
//! │                                            * = default option           │
//! │                                                                         │
//! │  Declared order is significant: price breakdowns and quote documents    │
//! │  list sections exactly in this order.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants (checked once, at construction)
//! - at least one model; model ids unique; base prices non-negative
//! - section ids unique
//! - every section has at least one option, option ids unique within the
//!   section, at most one option flagged default
//!
//! A `Catalog` is immutable after construction. Lookups return `Option`;
//! callers decide what absence means.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{
    validate_display_name, validate_identifier, validate_price, ValidationResult, MAX_SECTIONS,
};

// =============================================================================
// Vehicle Model
// =============================================================================

/// A vehicle model that can be configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VehicleModel {
    /// Unique identifier (`tesla-model-3`).
    pub id: String,

    /// Display name shown on quotes.
    pub name: String,

    /// Price before any options.
    pub base_price: Money,

    /// Marketing line ("Starting at $45,000").
    #[serde(default)]
    pub description: String,

    /// Image reference (URL or asset path).
    #[serde(default)]
    pub image: String,
}

impl VehicleModel {
    fn validate(&self) -> ValidationResult<()> {
        validate_identifier("model id", &self.id)?;
        validate_display_name("model name", &self.name)?;
        validate_price("base price", self.base_price)
    }
}

// =============================================================================
// Config Option
// =============================================================================

/// One selectable option within a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ConfigOption {
    /// Identifier, unique within its section only (`standard` appears in
    /// both `battery` and `hardware`).
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Additive cost over the base price. Zero means "Included".
    pub price: Money,

    /// Marks the section's default option.
    #[serde(default)]
    pub is_default: bool,
}

// =============================================================================
// Option Section
// =============================================================================

/// Raw section data, as written in a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDefinition {
    pub id: String,
    pub name: String,
    pub options: Vec<ConfigOption>,
}

/// A validated configuration section.
///
/// Fields are private so the non-empty / unique / single-default invariants
/// can't be broken after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSection {
    id: String,
    name: String,
    options: Vec<ConfigOption>,
}

impl OptionSection {
    /// Creates a section, enforcing section invariants.
    ///
    /// ## Errors
    /// - `Required` when `options` is empty
    /// - `Duplicate` when two options share an id
    /// - `MultipleDefaults` when more than one option has `is_default`
    /// - identifier / name / price validation failures
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        options: Vec<ConfigOption>,
    ) -> ValidationResult<Self> {
        let id = id.into();
        let name = name.into();

        validate_identifier("section id", &id)?;
        validate_display_name("section name", &name)?;

        if options.is_empty() {
            return Err(ValidationError::Required {
                field: format!("options of section {}", id),
            });
        }

        let mut seen = HashSet::new();
        for option in &options {
            validate_identifier("option id", &option.id)?;
            validate_display_name("option name", &option.name)?;
            validate_price("option price", option.price)?;

            if !seen.insert(option.id.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: format!("{} option id", id),
                    value: option.id.clone(),
                });
            }
        }

        if options.iter().filter(|o| o.is_default).count() > 1 {
            return Err(ValidationError::MultipleDefaults { section_id: id });
        }

        Ok(OptionSection { id, name, options })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Options in declared order.
    pub fn options(&self) -> &[ConfigOption] {
        &self.options
    }

    /// Looks up an option of this section.
    pub fn option(&self, option_id: &str) -> Option<&ConfigOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// The option flagged default, or the first option when none is.
    pub fn default_option(&self) -> &ConfigOption {
        // options is non-empty by construction
        self.options
            .iter()
            .find(|o| o.is_default)
            .unwrap_or(&self.options[0])
    }
}

impl TryFrom<SectionDefinition> for OptionSection {
    type Error = ValidationError;

    fn try_from(def: SectionDefinition) -> Result<Self, Self::Error> {
        OptionSection::new(def.id, def.name, def.options)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Raw catalog data, as written in a catalog file.
///
/// ## JSON Layout
/// ```json
/// {
///   "defaultModel": "tesla-model-3",
///   "models": [{ "id": "tesla-model-3", "name": "Tesla Model 3", "basePrice": 45000 }],
///   "sections": [{ "id": "battery", "name": "Battery", "options": [
///     { "id": "standard", "name": "Standard Range", "price": 0, "isDefault": true }
///   ]}]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDefinition {
    #[serde(default)]
    pub default_model: Option<String>,
    pub models: Vec<VehicleModel>,
    pub sections: Vec<SectionDefinition>,
}

/// The read-only product catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    models: Vec<VehicleModel>,
    sections: Vec<OptionSection>,
    default_model_id: Option<String>,
}

impl Catalog {
    /// Creates a catalog, enforcing catalog-level invariants.
    pub fn new(models: Vec<VehicleModel>, sections: Vec<OptionSection>) -> CoreResult<Self> {
        if models.is_empty() {
            return Err(ValidationError::Required {
                field: "vehicle models".to_string(),
            }
            .into());
        }

        let mut model_ids = HashSet::new();
        for model in &models {
            model.validate()?;
            if !model_ids.insert(model.id.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "model id".to_string(),
                    value: model.id.clone(),
                }
                .into());
            }
        }

        if sections.len() > MAX_SECTIONS {
            return Err(ValidationError::OutOfRange {
                field: "option sections".to_string(),
                min: 0,
                max: MAX_SECTIONS as i64,
            }
            .into());
        }

        let mut section_ids = HashSet::new();
        for section in &sections {
            if !section_ids.insert(section.id()) {
                return Err(ValidationError::Duplicate {
                    field: "section id".to_string(),
                    value: section.id().to_string(),
                }
                .into());
            }
        }

        Ok(Catalog {
            models,
            sections,
            default_model_id: None,
        })
    }

    /// Designates the model new selections start from.
    ///
    /// Without this, the first model in declared order is the default.
    pub fn with_default_model(mut self, model_id: &str) -> CoreResult<Self> {
        if self.model(model_id).is_none() {
            return Err(CoreError::InvalidModel {
                model_id: model_id.to_string(),
            });
        }
        self.default_model_id = Some(model_id.to_string());
        Ok(self)
    }

    /// Builds a catalog from its raw definition.
    pub fn from_definition(def: CatalogDefinition) -> CoreResult<Self> {
        let sections = def
            .sections
            .into_iter()
            .map(OptionSection::try_from)
            .collect::<ValidationResult<Vec<_>>>()?;

        let catalog = Catalog::new(def.models, sections)?;

        match def.default_model {
            Some(id) => catalog.with_default_model(&id),
            None => Ok(catalog),
        }
    }

    /// Parses and validates a JSON catalog definition.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let def: CatalogDefinition =
            serde_json::from_str(json).map_err(|e| CoreError::CatalogFormat(e.to_string()))?;
        Catalog::from_definition(def)
    }

    /// Models in declared order.
    pub fn models(&self) -> &[VehicleModel] {
        &self.models
    }

    /// Sections in declared order.
    pub fn sections(&self) -> &[OptionSection] {
        &self.sections
    }

    pub fn model(&self, model_id: &str) -> Option<&VehicleModel> {
        self.models.iter().find(|m| m.id == model_id)
    }

    pub fn section(&self, section_id: &str) -> Option<&OptionSection> {
        self.sections.iter().find(|s| s.id() == section_id)
    }

    pub fn option(&self, section_id: &str, option_id: &str) -> Option<&ConfigOption> {
        self.section(section_id)?.option(option_id)
    }

    /// The starting model: the designated default, else the first model.
    pub fn default_model(&self) -> &VehicleModel {
        self.default_model_id
            .as_deref()
            .and_then(|id| self.model(id))
            .unwrap_or(&self.models[0])
    }

    /// The built-in EliteEV Motors catalog.
    pub fn elite_ev() -> CoreResult<Self> {
        let models = vec![
            vehicle("tesla-model-3", "Tesla Model 3", 45_000, "photo-1617788138017-80ad40651399"),
            vehicle("tesla-model-y", "Tesla Model Y", 52_000, "photo-1609521263047-f8f205293f24"),
            vehicle("bmw-i4", "BMW i4", 56_000, "photo-1555215695-3004980ad54e"),
            vehicle("audi-etron", "Audi e-tron", 65_000, "photo-1544636331-e26879cd4d9b"),
            vehicle("mercedes-eqs", "Mercedes EQS", 75_000, "photo-1563720223185-11003d516935"),
        ];

        let sections = vec![
            OptionSection::new(
                "color",
                "Color",
                vec![
                    default_choice("white", "Pearl White", "Standard paint"),
                    choice("black", "Solid Black", "Premium paint", 1_000),
                    choice("red", "Red Multi-Coat", "Premium paint", 2_000),
                    choice("blue", "Deep Blue Metallic", "Premium paint", 1_500),
                    choice("silver", "Midnight Silver", "Metallic paint", 500),
                ],
            )?,
            OptionSection::new(
                "battery",
                "Battery",
                vec![
                    default_choice("standard", "Standard Range", "272 miles EPA est. range"),
                    choice("long-range", "Long Range", "358 miles EPA est. range", 10_000),
                    choice(
                        "performance",
                        "Performance",
                        "315 miles EPA est. range, 3.1s 0-60 mph",
                        15_000,
                    ),
                ],
            )?,
            OptionSection::new(
                "software",
                "Software",
                vec![
                    default_choice("basic", "Basic Package", "Standard features and connectivity"),
                    choice(
                        "premium",
                        "Premium Connectivity",
                        "Streaming, live traffic, satellite maps",
                        3_000,
                    ),
                    choice(
                        "autopilot",
                        "Full Self-Driving",
                        "Advanced autopilot and self-driving features",
                        8_000,
                    ),
                ],
            )?,
            OptionSection::new(
                "hardware",
                "Hardware",
                vec![
                    default_choice("standard", "Standard Package", "Basic hardware configuration"),
                    choice("sport", "Sport Package", "Enhanced suspension and braking", 2_500),
                    choice("luxury", "Luxury Package", "Premium hardware and components", 5_000),
                ],
            )?,
            OptionSection::new(
                "interior",
                "Interior",
                vec![
                    default_choice("cloth", "Premium Cloth", "High-quality fabric seats"),
                    choice("leather", "Synthetic Leather", "Durable synthetic leather seats", 1_500),
                    choice(
                        "premium-leather",
                        "Premium Leather",
                        "Luxury leather with heated seats",
                        3_000,
                    ),
                ],
            )?,
            OptionSection::new(
                "wheels",
                "Wheels",
                vec![
                    default_choice("18", "18\" Aero Wheels", "Standard efficiency wheels"),
                    choice("19", "19\" Sport Wheels", "Enhanced performance wheels", 1_500),
                    choice("20", "20\" Performance", "High-performance wheels", 2_500),
                    choice("21", "21\" Turbine", "Premium design wheels", 4_000),
                ],
            )?,
        ];

        Catalog::new(models, sections)
    }
}

fn vehicle(id: &str, name: &str, base_price: i64, photo: &str) -> VehicleModel {
    let base_price = Money::from_units(base_price);
    VehicleModel {
        id: id.to_string(),
        name: name.to_string(),
        base_price,
        description: format!("Starting at {}", base_price),
        image: format!(
            "https://images.unsplash.com/{}?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=250",
            photo
        ),
    }
}

fn choice(id: &str, name: &str, description: &str, price: i64) -> ConfigOption {
    ConfigOption {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price: Money::from_units(price),
        is_default: false,
    }
}

fn default_choice(id: &str, name: &str, description: &str) -> ConfigOption {
    ConfigOption {
        is_default: true,
        ..choice(id, name, description, 0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::MAX_PRICE;

    fn opt(id: &str, price: i64, is_default: bool) -> ConfigOption {
        ConfigOption {
            is_default,
            ..choice(id, &format!("Option {}", id), "", price)
        }
    }

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = Catalog::elite_ev().unwrap();

        assert_eq!(catalog.models().len(), 5);
        let section_ids: Vec<&str> = catalog.sections().iter().map(|s| s.id()).collect();
        assert_eq!(
            section_ids,
            vec!["color", "battery", "software", "hardware", "interior", "wheels"]
        );

        let model_3 = catalog.model("tesla-model-3").unwrap();
        assert_eq!(model_3.base_price.units(), 45_000);
        assert_eq!(model_3.description, "Starting at $45,000");
    }

    #[test]
    fn test_lookups_return_none_for_absent_ids() {
        let catalog = Catalog::elite_ev().unwrap();

        assert!(catalog.model("tesla-roadster").is_none());
        assert!(catalog.section("paint").is_none());
        assert!(catalog.option("battery", "turbo").is_none());
        assert!(catalog.option("paint", "white").is_none());
    }

    #[test]
    fn test_option_ids_are_scoped_to_their_section() {
        let catalog = Catalog::elite_ev().unwrap();

        let battery = catalog.option("battery", "standard").unwrap();
        let hardware = catalog.option("hardware", "standard").unwrap();
        assert_eq!(battery.name, "Standard Range");
        assert_eq!(hardware.name, "Standard Package");
    }

    #[test]
    fn test_default_option_flagged() {
        let section = OptionSection::new(
            "battery",
            "Battery",
            vec![opt("a", 100, false), opt("b", 0, true), opt("c", 50, false)],
        )
        .unwrap();
        assert_eq!(section.default_option().id, "b");
    }

    #[test]
    fn test_default_option_falls_back_to_first() {
        let section =
            OptionSection::new("wheels", "Wheels", vec![opt("19", 1_500, false), opt("20", 2_500, false)])
                .unwrap();
        assert_eq!(section.default_option().id, "19");
    }

    #[test]
    fn test_section_rejects_empty_options() {
        let err = OptionSection::new("color", "Color", vec![]).unwrap_err();
        assert!(matches!(err, ValidationError::Required { .. }));
    }

    #[test]
    fn test_section_rejects_duplicate_option_ids() {
        let err = OptionSection::new("color", "Color", vec![opt("red", 0, true), opt("red", 5, false)])
            .unwrap_err();
        assert!(matches!(err, ValidationError::Duplicate { .. }));
    }

    #[test]
    fn test_section_rejects_two_defaults() {
        let err = OptionSection::new("color", "Color", vec![opt("red", 0, true), opt("blue", 5, true)])
            .unwrap_err();
        assert!(matches!(err, ValidationError::MultipleDefaults { .. }));
    }

    #[test]
    fn test_section_rejects_negative_price() {
        let err = OptionSection::new("color", "Color", vec![opt("red", -5, true)]).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
    }

    #[test]
    fn test_catalog_rejects_duplicate_sections_and_models() {
        let section = OptionSection::new("color", "Color", vec![opt("red", 0, true)]).unwrap();
        let model = vehicle("m", "Model", 1_000, "x");

        let err = Catalog::new(vec![model.clone()], vec![section.clone(), section.clone()]).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::Duplicate { .. })));

        let err = Catalog::new(vec![model.clone(), model], vec![section]).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::Duplicate { .. })));
    }

    #[test]
    fn test_catalog_requires_a_model() {
        let err = Catalog::new(vec![], vec![]).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::Required { .. })));
    }

    #[test]
    fn test_default_model() {
        let catalog = Catalog::elite_ev().unwrap();
        assert_eq!(catalog.default_model().id, "tesla-model-3");

        let catalog = catalog.with_default_model("bmw-i4").unwrap();
        assert_eq!(catalog.default_model().id, "bmw-i4");

        let err = Catalog::elite_ev()
            .unwrap()
            .with_default_model("nope")
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidModel { .. }));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "defaultModel": "city",
            "models": [
                { "id": "compact", "name": "Compact", "basePrice": 30000 },
                { "id": "city", "name": "City", "basePrice": 25000 }
            ],
            "sections": [
                { "id": "color", "name": "Color", "options": [
                    { "id": "grey", "name": "Grey", "price": 0 },
                    { "id": "green", "name": "Green", "price": 700 }
                ]}
            ]
        }"#;

        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.default_model().id, "city");
        assert_eq!(catalog.section("color").unwrap().default_option().id, "grey");
        assert_eq!(catalog.option("color", "green").unwrap().price.units(), 700);
    }

    #[test]
    fn test_from_json_rejects_malformed_and_invalid() {
        let err = Catalog::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CoreError::CatalogFormat(_)));

        let json = r#"{
            "models": [{ "id": "compact", "name": "Compact", "basePrice": 30000 }],
            "sections": [{ "id": "color", "name": "Color", "options": [] }]
        }"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::Required { .. })));
    }

    #[test]
    fn test_from_json_rejects_prices_above_cap() {
        let json = r#"{
            "models": [{ "id": "hyper", "name": "Hyper", "basePrice": 9223372036854775807 }],
            "sections": [{ "id": "color", "name": "Color", "options": [
                { "id": "grey", "name": "Grey", "price": 0 }
            ]}]
        }"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { max: MAX_PRICE, .. })
        ));

        let json = r#"{
            "models": [{ "id": "compact", "name": "Compact", "basePrice": 30000 }],
            "sections": [{ "id": "color", "name": "Color", "options": [
                { "id": "gold", "name": "Gold Leaf", "price": 1000000000001 }
            ]}]
        }"#;
        assert!(Catalog::from_json(json).is_err());
    }

    #[test]
    fn test_priciest_allowed_catalog_prices_without_overflow() {
        let sections: Vec<OptionSection> = (0..MAX_SECTIONS)
            .map(|i| {
                let id = format!("s{}", i);
                OptionSection::new(&id, "Section", vec![opt("top", MAX_PRICE, true)]).unwrap()
            })
            .collect();
        let model = vehicle("m", "Model", MAX_PRICE, "x");
        let catalog = Catalog::new(vec![model], sections).unwrap();

        let selection = crate::configuration::Selection::default_for(&catalog);
        let price =
            crate::pricing::price_selection(&catalog, &selection, crate::types::TaxRate::from_bps(10000)).unwrap();
        assert_eq!(price.subtotal.units(), MAX_PRICE * (MAX_SECTIONS as i64 + 1));
        assert_eq!(price.total.units(), price.subtotal.units() * 2);
    }

    #[test]
    fn test_catalog_rejects_too_many_sections() {
        let sections: Vec<OptionSection> = (0..=MAX_SECTIONS)
            .map(|i| OptionSection::new(&format!("s{}", i), "Section", vec![opt("a", 0, true)]).unwrap())
            .collect();
        let err = Catalog::new(vec![vehicle("m", "Model", 1_000, "x")], sections).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::OutOfRange { .. })));
    }
}
