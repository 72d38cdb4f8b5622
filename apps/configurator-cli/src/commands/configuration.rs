//! # Configuration Commands
//!
//! Commands that change or price the session's selection.
//!
//! ## Selection Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Selection Lifecycle                                  │
//! │                                                                         │
//! │  ┌──────────┐   select_model    ┌──────────┐   generate_quote          │
//! │  │ Defaults │──────────────────►│ Custom   │──────────────────► Quote  │
//! │  │          │   select_option   │          │   (quote.rs)              │
//! │  └──────────┘   configure       └──────────┘                           │
//! │       ▲                              │                                  │
//! │       └──────── reset_selection ─────┘                                  │
//! │                                                                         │
//! │  Every command answers with the selection and its fresh price.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};

use configurator_core::{price_selection, PriceBreakdown, Selection};

use crate::error::ApiError;
use crate::state::{CatalogState, ConfigState, SessionState};

/// Selection plus its price breakdown.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResponse {
    pub selection: Selection,
    pub price: PriceBreakdown,
}

fn respond(
    catalog: &CatalogState,
    config: &ConfigState,
    selection: Selection,
) -> Result<SelectionResponse, ApiError> {
    let price = price_selection(catalog, &selection, config.tax_rate)?;
    Ok(SelectionResponse { selection, price })
}

/// Current selection and its price.
pub fn get_selection(
    catalog: &CatalogState,
    session: &SessionState,
    config: &ConfigState,
) -> Result<SelectionResponse, ApiError> {
    debug!("get_selection command");
    respond(catalog, config, session.selection())
}

/// Current price breakdown.
pub fn get_price(
    catalog: &CatalogState,
    session: &SessionState,
    config: &ConfigState,
) -> Result<PriceBreakdown, ApiError> {
    debug!("get_price command");
    Ok(price_selection(catalog, &session.selection(), config.tax_rate)?)
}

/// Switches the model. Option choices carry over.
pub fn select_model(
    catalog: &CatalogState,
    session: &SessionState,
    config: &ConfigState,
    model_id: &str,
) -> Result<SelectionResponse, ApiError> {
    debug!(model_id = %model_id, "select_model command");
    let selection = session.update(|current| current.with_model(catalog, model_id))?;
    respond(catalog, config, selection)
}

/// Replaces one section's option.
pub fn select_option(
    catalog: &CatalogState,
    session: &SessionState,
    config: &ConfigState,
    section_id: &str,
    option_id: &str,
) -> Result<SelectionResponse, ApiError> {
    debug!(section_id = %section_id, option_id = %option_id, "select_option command");
    let selection =
        session.update(|current| current.with_option(catalog, section_id, option_id))?;
    respond(catalog, config, selection)
}

/// Replaces the whole selection: catalog defaults, then `model`, then every
/// `(section, option)` pair in order.
///
/// All-or-nothing: one bad pair and the session keeps its previous
/// selection.
pub fn configure(
    catalog: &CatalogState,
    session: &SessionState,
    config: &ConfigState,
    model_id: Option<&str>,
    options: &[(String, String)],
) -> Result<SelectionResponse, ApiError> {
    debug!(?model_id, options = options.len(), "configure command");
    let selection = session.update(|_| {
        Selection::from_parts(
            catalog,
            model_id,
            options.iter().map(|(s, o)| (s.as_str(), o.as_str())),
        )
    })?;
    respond(catalog, config, selection)
}

/// Back to the catalog defaults.
pub fn reset_selection(
    catalog: &CatalogState,
    session: &SessionState,
    config: &ConfigState,
) -> Result<SelectionResponse, ApiError> {
    info!("Selection reset to defaults");
    respond(catalog, config, session.reset(catalog))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use configurator_core::{Catalog, TaxRate};

    fn setup() -> (CatalogState, SessionState, ConfigState) {
        let catalog = CatalogState::new(Catalog::elite_ev().unwrap());
        let session = SessionState::new(&catalog);
        (catalog, session, ConfigState::default())
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(s, o)| (s.to_string(), o.to_string())).collect()
    }

    #[test]
    fn test_default_price() {
        let (catalog, session, config) = setup();
        let price = get_price(&catalog, &session, &config).unwrap();

        assert_eq!(price.subtotal.units(), 45_000);
        assert_eq!(price.tax.units(), 3_600);
        assert_eq!(price.total.units(), 48_600);
    }

    #[test]
    fn test_select_option_reprices() {
        let (catalog, session, config) = setup();
        let response = select_option(&catalog, &session, &config, "battery", "long-range").unwrap();

        assert_eq!(response.selection.option_id("battery"), Some("long-range"));
        assert_eq!(response.price.total.units(), 59_400);
    }

    #[test]
    fn test_select_model_keeps_options() {
        let (catalog, session, config) = setup();
        select_option(&catalog, &session, &config, "interior", "leather").unwrap();

        let response = select_model(&catalog, &session, &config, "bmw-i4").unwrap();
        assert_eq!(response.selection.model_id(), "bmw-i4");
        assert_eq!(response.selection.option_id("interior"), Some("leather"));
        assert_eq!(response.price.base_price.units(), 56_000);
    }

    #[test]
    fn test_invalid_update_is_rejected_and_ignored() {
        let (catalog, session, config) = setup();
        select_option(&catalog, &session, &config, "color", "red").unwrap();
        let before = session.selection();

        let err = select_option(&catalog, &session, &config, "battery", "fusion").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSelection);

        let err = select_option(&catalog, &session, &config, "spoiler", "big").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSelection);

        let err = select_model(&catalog, &session, &config, "roadster").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSelection);

        assert_eq!(session.selection(), before);
    }

    #[test]
    fn test_configure_is_all_or_nothing() {
        let (catalog, session, config) = setup();

        let response = configure(
            &catalog,
            &session,
            &config,
            Some("tesla-model-y"),
            &pairs(&[("battery", "performance"), ("software", "autopilot")]),
        )
        .unwrap();
        assert_eq!(response.price.subtotal.units(), 52_000 + 15_000 + 8_000);
        let before = session.selection();

        let err = configure(
            &catalog,
            &session,
            &config,
            None,
            &pairs(&[("battery", "standard"), ("color", "plaid")]),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSelection);
        assert_eq!(session.selection(), before);
    }

    #[test]
    fn test_configured_tax_rate_applies() {
        let (catalog, session, _) = setup();
        let config = ConfigState {
            tax_rate: TaxRate::from_bps(825),
            ..ConfigState::default()
        };

        let price = get_price(&catalog, &session, &config).unwrap();
        // 45,000 * 8.25% = 3,712.5 → 3,713
        assert_eq!(price.tax.units(), 3_713);
    }

    #[test]
    fn test_reset_selection() {
        let (catalog, session, config) = setup();
        select_model(&catalog, &session, &config, "audi-etron").unwrap();

        let response = reset_selection(&catalog, &session, &config).unwrap();
        assert_eq!(response.selection, Selection::default_for(&catalog));
        assert_eq!(get_selection(&catalog, &session, &config).unwrap().selection, response.selection);
    }
}
