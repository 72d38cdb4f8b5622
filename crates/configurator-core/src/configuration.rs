//! # Configuration Engine
//!
//! Builds default selections, applies validated updates, and resolves a
//! selection into full catalog records.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Selection Lifecycle                                  │
//! │                                                                         │
//! │  Selection::default_for(catalog)                                       │
//! │       │   model = default model, every section = its default option    │
//! │       ▼                                                                 │
//! │  selection.with_option(catalog, "battery", "long-range")               │
//! │  selection.with_model(catalog, "bmw-i4")                               │
//! │       │   each call returns a NEW Selection, or fails and leaves the   │
//! │       │   old one untouched (InvalidSection / InvalidOption /          │
//! │       │   InvalidModel)                                                │
//! │       ▼                                                                 │
//! │  resolve(catalog, &selection)                                          │
//! │       │   every id → full record, in catalog section order             │
//! │       │   mismatch → UnresolvedReference                               │
//! │       ▼                                                                 │
//! │  pricing::compute_breakdown(&resolved)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation happens on write: a Selection built through this module always
//! matches the catalog it was built against. `resolve` exists for the cases
//! where that catalog may have changed since (stored quotes, catalog reloads).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::catalog::{Catalog, ConfigOption, OptionSection, VehicleModel};
use crate::error::{CoreError, CoreResult};

// =============================================================================
// Selection
// =============================================================================

/// A chosen model plus one chosen option per section.
///
/// Entries are keyed by section id. Iteration order of the map carries no
/// meaning; anything order-sensitive walks `catalog.sections()` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Selection {
    model_id: String,
    options: BTreeMap<String, String>,
}

impl Selection {
    /// The default selection for a catalog.
    ///
    /// Deterministic: the same catalog always yields the same selection.
    pub fn default_for(catalog: &Catalog) -> Self {
        let options = catalog
            .sections()
            .iter()
            .map(|section| {
                (
                    section.id().to_string(),
                    section.default_option().id.clone(),
                )
            })
            .collect();

        Selection {
            model_id: catalog.default_model().id.clone(),
            options,
        }
    }

    /// Builds a selection from raw `(section, option)` pairs.
    ///
    /// Starts from the catalog defaults and applies every pair in order, so
    /// sections not mentioned keep their default. Later pairs for the same
    /// section win.
    pub fn from_parts<'a, I>(catalog: &Catalog, model_id: Option<&str>, entries: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut selection = Selection::default_for(catalog);

        if let Some(model_id) = model_id {
            selection = selection.with_model(catalog, model_id)?;
        }

        for (section_id, option_id) in entries {
            selection = selection.with_option(catalog, section_id, option_id)?;
        }

        Ok(selection)
    }

    /// Returns a copy with one section's option replaced.
    ///
    /// ## Errors
    /// - `InvalidSection` if the catalog has no such section
    /// - `InvalidOption` if the section has no such option
    pub fn with_option(&self, catalog: &Catalog, section_id: &str, option_id: &str) -> CoreResult<Self> {
        let section = catalog
            .section(section_id)
            .ok_or_else(|| CoreError::InvalidSection {
                section_id: section_id.to_string(),
            })?;

        if section.option(option_id).is_none() {
            return Err(CoreError::InvalidOption {
                section_id: section_id.to_string(),
                option_id: option_id.to_string(),
            });
        }

        let mut next = self.clone();
        next.options
            .insert(section_id.to_string(), option_id.to_string());
        Ok(next)
    }

    /// Returns a copy with a different model.
    ///
    /// ## Errors
    /// - `InvalidModel` if the catalog has no such model
    pub fn with_model(&self, catalog: &Catalog, model_id: &str) -> CoreResult<Self> {
        if catalog.model(model_id).is_none() {
            return Err(CoreError::InvalidModel {
                model_id: model_id.to_string(),
            });
        }

        Ok(Selection {
            model_id: model_id.to_string(),
            options: self.options.clone(),
        })
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// The chosen option id for a section, if any.
    pub fn option_id(&self, section_id: &str) -> Option<&str> {
        self.options.get(section_id).map(String::as_str)
    }

    /// All `(section id, option id)` entries, ordered by section id.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options.iter().map(|(s, o)| (s.as_str(), o.as_str()))
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// One section of a resolved selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedOption<'a> {
    pub section: &'a OptionSection,
    pub option: &'a ConfigOption,
}

/// A selection with every identifier replaced by its catalog record.
///
/// `options` follows catalog section order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSelection<'a> {
    pub model: &'a VehicleModel,
    pub options: Vec<ResolvedOption<'a>>,
}

/// Resolves a selection against a catalog.
///
/// This is the integrity check everything downstream relies on: pricing and
/// quote documents only ever see a `ResolvedSelection`.
///
/// ## Errors
/// `UnresolvedReference` when:
/// - the model id is not in the catalog
/// - a catalog section has no entry in the selection
/// - an entry names an option the section doesn't have
/// - an entry names a section the catalog doesn't have
pub fn resolve<'a>(catalog: &'a Catalog, selection: &Selection) -> CoreResult<ResolvedSelection<'a>> {
    let model = catalog
        .model(selection.model_id())
        .ok_or_else(|| CoreError::unresolved("model", selection.model_id()))?;

    if let Some(unknown) = selection
        .options
        .keys()
        .find(|section_id| catalog.section(section_id).is_none())
    {
        return Err(CoreError::unresolved("section", unknown.as_str()));
    }

    let options = catalog
        .sections()
        .iter()
        .map(|section| -> CoreResult<ResolvedOption<'a>> {
            let option_id = selection
                .option_id(section.id())
                .ok_or_else(|| CoreError::unresolved("section", section.id()))?;

            let option = section
                .option(option_id)
                .ok_or_else(|| CoreError::unresolved("option", format!("{}/{}", section.id(), option_id)))?;

            Ok(ResolvedOption { section, option })
        })
        .collect::<CoreResult<Vec<_>>>()?;

    Ok(ResolvedSelection { model, options })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogDefinition;

    fn catalog() -> Catalog {
        Catalog::elite_ev().unwrap()
    }

    #[test]
    fn test_default_has_one_default_entry_per_section() {
        let catalog = catalog();
        let selection = Selection::default_for(&catalog);

        assert_eq!(selection.model_id(), "tesla-model-3");
        assert_eq!(selection.entries().count(), catalog.sections().len());

        for section in catalog.sections() {
            let option_id = selection.option_id(section.id()).unwrap();
            let option = section.option(option_id).unwrap();
            assert!(option.is_default, "{} should default", section.id());
        }
    }

    #[test]
    fn test_default_is_deterministic() {
        let catalog = catalog();
        assert_eq!(Selection::default_for(&catalog), Selection::default_for(&catalog));
    }

    #[test]
    fn test_default_uses_first_option_when_none_flagged() {
        let json = r#"{
            "models": [{ "id": "m", "name": "M", "basePrice": 1 }],
            "sections": [{ "id": "color", "name": "Color", "options": [
                { "id": "grey", "name": "Grey", "price": 0 },
                { "id": "green", "name": "Green", "price": 5 }
            ]}]
        }"#;
        let catalog = Catalog::from_json(json).unwrap();
        let selection = Selection::default_for(&catalog);
        assert_eq!(selection.option_id("color"), Some("grey"));
    }

    #[test]
    fn test_every_valid_update_resolves_to_chosen_option() {
        let catalog = catalog();
        let base = Selection::default_for(&catalog);

        for section in catalog.sections() {
            for option in section.options() {
                let updated = base.with_option(&catalog, section.id(), &option.id).unwrap();
                let resolved = resolve(&catalog, &updated).unwrap();

                for entry in &resolved.options {
                    if entry.section.id() == section.id() {
                        assert_eq!(entry.option.id, option.id);
                    } else {
                        assert_eq!(
                            Some(entry.option.id.as_str()),
                            base.option_id(entry.section.id())
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_update_does_not_touch_input() {
        let catalog = catalog();
        let base = Selection::default_for(&catalog);
        let updated = base.with_option(&catalog, "battery", "long-range").unwrap();

        assert_eq!(base.option_id("battery"), Some("standard"));
        assert_eq!(updated.option_id("battery"), Some("long-range"));
    }

    #[test]
    fn test_update_unknown_option() {
        let catalog = catalog();
        let err = Selection::default_for(&catalog)
            .with_option(&catalog, "battery", "turbo")
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidOption { .. }));
    }

    #[test]
    fn test_update_option_from_another_section() {
        // "leather" exists, but only in interior
        let catalog = catalog();
        let err = Selection::default_for(&catalog)
            .with_option(&catalog, "color", "leather")
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidOption { .. }));
    }

    #[test]
    fn test_update_unknown_section() {
        let catalog = catalog();
        let err = Selection::default_for(&catalog)
            .with_option(&catalog, "spoiler", "carbon")
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidSection { .. }));
    }

    #[test]
    fn test_select_model() {
        let catalog = catalog();
        let base = Selection::default_for(&catalog)
            .with_option(&catalog, "wheels", "21")
            .unwrap();

        let updated = base.with_model(&catalog, "audi-etron").unwrap();
        assert_eq!(updated.model_id(), "audi-etron");
        assert_eq!(updated.option_id("wheels"), Some("21"));

        let err = base.with_model(&catalog, "tesla-roadster").unwrap_err();
        assert!(matches!(err, CoreError::InvalidModel { .. }));
    }

    #[test]
    fn test_from_parts() {
        let catalog = catalog();
        let selection = Selection::from_parts(
            &catalog,
            Some("bmw-i4"),
            [("battery", "performance"), ("color", "red")],
        )
        .unwrap();

        assert_eq!(selection.model_id(), "bmw-i4");
        assert_eq!(selection.option_id("battery"), Some("performance"));
        assert_eq!(selection.option_id("color"), Some("red"));
        assert_eq!(selection.option_id("interior"), Some("cloth"));

        let err = Selection::from_parts(&catalog, None, [("battery", "nuclear")]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidOption { .. }));
    }

    #[test]
    fn test_resolve_follows_catalog_order() {
        let catalog = catalog();
        // wheels is chosen first, color last
        let selection = Selection::default_for(&catalog)
            .with_option(&catalog, "wheels", "20")
            .unwrap()
            .with_option(&catalog, "color", "blue")
            .unwrap();

        let resolved = resolve(&catalog, &selection).unwrap();
        let order: Vec<&str> = resolved.options.iter().map(|r| r.section.id()).collect();
        let expected: Vec<&str> = catalog.sections().iter().map(|s| s.id()).collect();
        assert_eq!(order, expected);
        assert_eq!(resolved.model.name, "Tesla Model 3");
    }

    /// A selection built against one catalog, resolved against a reduced one.
    #[test]
    fn test_resolve_detects_catalog_skew() {
        let full = catalog();
        let selection = Selection::default_for(&full)
            .with_option(&full, "battery", "long-range")
            .unwrap();

        let reduced = Catalog::from_json(
            r#"{
                "models": [{ "id": "tesla-model-3", "name": "Tesla Model 3", "basePrice": 45000 }],
                "sections": [{ "id": "battery", "name": "Battery", "options": [
                    { "id": "standard", "name": "Standard Range", "price": 0, "isDefault": true }
                ]}]
            }"#,
        )
        .unwrap();

        // long-range no longer exists, and there are extra sections
        let err = resolve(&reduced, &selection).unwrap_err();
        assert!(matches!(err, CoreError::UnresolvedReference { .. }));
    }

    #[test]
    fn test_resolve_detects_missing_section_entry() {
        let small: CatalogDefinition = serde_json::from_str(
            r#"{
                "models": [{ "id": "m", "name": "M", "basePrice": 1 }],
                "sections": [{ "id": "color", "name": "Color", "options": [
                    { "id": "grey", "name": "Grey", "price": 0 }
                ]}]
            }"#,
        )
        .unwrap();
        let mut bigger = small.clone();
        bigger.sections.push(serde_json::from_str(
            r#"{ "id": "wheels", "name": "Wheels", "options": [{ "id": "18", "name": "18", "price": 0 }] }"#,
        )
        .unwrap());

        let small = Catalog::from_definition(small).unwrap();
        let bigger = Catalog::from_definition(bigger).unwrap();

        let selection = Selection::default_for(&small);
        let err = resolve(&bigger, &selection).unwrap_err();
        match err {
            CoreError::UnresolvedReference { kind, reference } => {
                assert_eq!(kind, "section");
                assert_eq!(reference, "wheels");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_detects_unknown_model() {
        let catalog = catalog();
        let selection: Selection = serde_json::from_str(
            r#"{ "modelId": "tesla-roadster", "options": {} }"#,
        )
        .unwrap();

        let err = resolve(&catalog, &selection).unwrap_err();
        assert!(matches!(err, CoreError::UnresolvedReference { kind: "model", .. }));
    }
}
