//! # Pricing Calculator
//!
//! Turns a resolved selection into an itemized price breakdown.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    compute_breakdown()                                  │
//! │                                                                         │
//! │  base_price    = model.base_price                         $45,000      │
//! │                                                                         │
//! │  for section in catalog order:                                         │
//! │      line_items.push(option.name, option.price)                         │
//! │        Pearl White ........................ Included                    │
//! │        Long Range ......................... +$10,000                   │
//! │        ...                                                              │
//! │  options_total = Σ option.price                           $10,000      │
//! │                                                                         │
//! │  subtotal      = base_price + options_total               $55,000      │
//! │  tax           = round_half_up(subtotal × 8%)              $4,400      │
//! │  total         = subtotal + tax                           $59,400      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pure and deterministic: same resolved selection in, identical breakdown
//! out. The only failure mode is resolution (`UnresolvedReference`), which
//! happens before this module sees anything.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::configuration::{resolve, ResolvedSelection, Selection};
use crate::error::CoreResult;
use crate::money::Money;
use crate::types::TaxRate;

/// Combined tax & fees rate applied to every quote: 8%.
pub const TAX_RATE: TaxRate = TaxRate::from_bps(800);

// =============================================================================
// Breakdown Types
// =============================================================================

/// One priced option in a breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    pub section_id: String,
    pub section_name: String,
    pub option_id: String,
    /// Option display name, used as the line label.
    pub option_name: String,
    /// Price delta over the base price.
    pub price: Money,
}

impl LineItem {
    /// Zero-priced options are shown as "Included".
    pub fn is_included(&self) -> bool {
        self.price.is_zero()
    }
}

/// Itemized price of a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceBreakdown {
    pub base_price: Money,
    /// One entry per section, in catalog order.
    pub line_items: Vec<LineItem>,
    pub options_total: Money,
    pub subtotal: Money,
    pub tax_rate: TaxRate,
    pub tax: Money,
    pub total: Money,
}

// =============================================================================
// Calculation
// =============================================================================

/// Computes the breakdown at the standard [`TAX_RATE`].
pub fn compute_breakdown(resolved: &ResolvedSelection<'_>) -> PriceBreakdown {
    compute_breakdown_with_rate(resolved, TAX_RATE)
}

/// Computes the breakdown at a configured tax rate.
pub fn compute_breakdown_with_rate(resolved: &ResolvedSelection<'_>, tax_rate: TaxRate) -> PriceBreakdown {
    let base_price = resolved.model.base_price;

    let line_items: Vec<LineItem> = resolved
        .options
        .iter()
        .map(|entry| LineItem {
            section_id: entry.section.id().to_string(),
            section_name: entry.section.name().to_string(),
            option_id: entry.option.id.clone(),
            option_name: entry.option.name.clone(),
            price: entry.option.price,
        })
        .collect();

    let options_total: Money = line_items.iter().map(|item| item.price).sum();
    let subtotal = base_price + options_total;
    let tax = subtotal.calculate_tax(tax_rate);

    PriceBreakdown {
        base_price,
        line_items,
        options_total,
        subtotal,
        tax_rate,
        tax,
        total: subtotal + tax,
    }
}

/// Resolves a selection and prices it in one step.
///
/// ## Errors
/// `UnresolvedReference` from [`resolve`].
pub fn price_selection(catalog: &Catalog, selection: &Selection, tax_rate: TaxRate) -> CoreResult<PriceBreakdown> {
    let resolved = resolve(catalog, selection)?;
    Ok(compute_breakdown_with_rate(&resolved, tax_rate))
}

// =============================================================================
// Unit Tests
// =============================================================================
