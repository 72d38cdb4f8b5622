//! # configurator-core: Configuration & Pricing Engine
//!
//! This crate is the **heart** of the EV configurator. It holds the catalog,
//! the selection rules, the price calculation and quote assembly as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      EV Configurator Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 configurator-cli (presentation)                 │   │
//! │  │     models ──► options ──► price ──► quote (store + render)     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ configurator-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────────┐ ┌─────────┐ ┌───────┐ ┌─────────┐ │   │
//! │  │  │ catalog │►│configuration│►│ pricing │►│ quote │►│document │ │   │
//! │  │  │ models  │ │ Selection   │ │Breakdown│ │ Quote │ │ lines   │ │   │
//! │  │  │sections │ │ resolve()   │ │ tax 8%  │ │ UUID  │ │ vendor  │ │   │
//! │  │  └─────────┘ └─────────────┘ └─────────┘ └───────┘ └─────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO RENDERING • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                 │                                   │                   │
//! │  ┌──────────────▼─────────────┐   ┌─────────────────▼──────────────┐   │
//! │  │   configurator-store       │   │   configurator-render          │   │
//! │  │   QuoteStore (save/get)    │   │   QuoteRenderer (text / json)  │   │
//! │  └────────────────────────────┘   └────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Vehicle models, sections, options (read-only)
//! - [`configuration`] - Selection defaults, updates, resolution
//! - [`pricing`] - Price breakdown and the standard tax rate
//! - [`quote`] - Quote assembly
//! - [`document`] - Renderer-facing quote document
//! - [`money`] - Whole-unit integer money
//! - [`types`] - Tax rate, quote id, customer info
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use configurator_core::{compute_breakdown, resolve, Catalog, Selection};
//!
//! let catalog = Catalog::elite_ev()?;
//! let selection = Selection::default_for(&catalog)
//!     .with_option(&catalog, "battery", "long-range")?;
//!
//! let resolved = resolve(&catalog, &selection)?;
//! let breakdown = compute_breakdown(&resolved);
//!
//! assert_eq!(breakdown.subtotal.units(), 55_000);
//! assert_eq!(breakdown.tax.units(), 4_400);
//! assert_eq!(breakdown.total.units(), 59_400);
//! # Ok::<(), configurator_core::CoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod configuration;
pub mod document;
pub mod error;
pub mod money;
pub mod pricing;
pub mod quote;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{Catalog, CatalogDefinition, ConfigOption, OptionSection, SectionDefinition, VehicleModel};
pub use configuration::{resolve, ResolvedOption, ResolvedSelection, Selection};
pub use document::{format_delta, OptionLine, QuoteDocument, VendorProfile};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{compute_breakdown, compute_breakdown_with_rate, price_selection, LineItem, PriceBreakdown, TAX_RATE};
pub use quote::{assemble_quote, assemble_verified_quote, Quote};
pub use types::*;
