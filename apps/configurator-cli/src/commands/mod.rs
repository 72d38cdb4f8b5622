//! # Commands Module
//!
//! Everything the CLI can ask the configurator to do.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs            ◄─── You are here (exports)
//! ├── catalog.rs        ◄─── Models and option listings
//! ├── configuration.rs  ◄─── Selection updates and pricing
//! └── quote.rs          ◄─── Quote generation, rendering, lookup
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  ev-configurator price --option battery=long-range                      │
//! │         │                                                               │
//! │         │ (clap parses into cli::Command)                               │
//! │         ▼                                                               │
//! │  lib.rs dispatch                                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  fn configure(                                                          │
//! │      catalog: &CatalogState,  ◄── only the state it needs               │
//! │      session: &SessionState,                                            │
//! │      config: &ConfigState,                                              │
//! │      ...                                                                │
//! │  ) -> Result<SelectionResponse, ApiError>                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  output.rs prints a table, or JSON with --json                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod configuration;
pub mod quote;

pub use catalog::{list_models, list_options, ModelResponse, OptionResponse, SectionResponse};
pub use configuration::{
    configure, get_price, get_selection, reset_selection, select_model, select_option,
    SelectionResponse,
};
pub use quote::{
    customer_from_parts, export_quote, export_quote_as, generate_quote, get_quote, list_quotes,
    render_quote, write_quote, QuoteResponse, QuoteSummary,
};
