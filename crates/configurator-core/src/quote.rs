//! # Quote Assembler
//!
//! Packages a selection and its price breakdown into an immutable,
//! identified quote record.
//!
//! ## Two Ways In
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  assemble_quote(selection, breakdown, customer)                         │
//! │    Trusts the caller: the breakdown must come from compute_breakdown   │
//! │    on the same selection. Nothing is recomputed.                        │
//! │                                                                         │
//! │  assemble_verified_quote(catalog, selection, rate, customer)            │
//! │    Resolves and prices the selection itself, so a mismatched           │
//! │    breakdown can't be passed in at all. The CLI uses this one.          │
//! │                                                                         │
//! │  Both: fresh UUID v4 id, UTC timestamp, no I/O. Handing the quote to    │
//! │  a store or a renderer is the caller's job.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::configuration::Selection;
use crate::error::CoreResult;
use crate::pricing::{price_selection, PriceBreakdown};
use crate::types::{CustomerInfo, QuoteId, TaxRate};

/// An immutable snapshot of a configuration and its price.
///
/// Fields are private: a quote never changes after assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Quote {
    id: QuoteId,
    selection: Selection,
    breakdown: PriceBreakdown,
    customer: Option<CustomerInfo>,
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
}

impl Quote {
    pub fn id(&self) -> &QuoteId {
        &self.id
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn breakdown(&self) -> &PriceBreakdown {
        &self.breakdown
    }

    pub fn customer(&self) -> Option<&CustomerInfo> {
        self.customer.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Re-prices the selection and compares it with the stored breakdown.
    ///
    /// `false` means the quote was assembled from a mismatched breakdown, or
    /// the catalog has changed since (including selections that no longer
    /// resolve).
    pub fn matches_catalog(&self, catalog: &Catalog) -> bool {
        price_selection(catalog, &self.selection, self.breakdown.tax_rate)
            .map(|fresh| fresh == self.breakdown)
            .unwrap_or(false)
    }
}

/// Assembles a quote from a selection and a pre-computed breakdown.
///
/// ## Precondition
/// `breakdown` was produced from `selection`. This is not checked; see
/// [`assemble_verified_quote`] and [`Quote::matches_catalog`].
pub fn assemble_quote(
    selection: Selection,
    breakdown: PriceBreakdown,
    customer: Option<CustomerInfo>,
) -> Quote {
    Quote {
        id: QuoteId::generate(),
        selection,
        breakdown,
        customer,
        created_at: Utc::now(),
    }
}

/// Prices the selection and assembles the quote.
///
/// ## Errors
/// `UnresolvedReference` if the selection doesn't match the catalog.
pub fn assemble_verified_quote(
    catalog: &Catalog,
    selection: Selection,
    tax_rate: TaxRate,
    customer: Option<CustomerInfo>,
) -> CoreResult<Quote> {
    let breakdown = price_selection(catalog, &selection, tax_rate)?;
    Ok(assemble_quote(selection, breakdown, customer))
}

// =============================================================================
// Unit Tests
// =============================================================================
