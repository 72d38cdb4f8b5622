//! # State Module
//!
//! Application state for the configurator.
//!
//! Separate state types instead of one `AppState`: each command takes only
//! the state it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ CatalogState │  │ SessionState │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Arc<        │  │  Arc<Mutex<  │  │  tax_rate        │              │
//! │  │   Catalog>   │  │   Selection  │  │  vendor          │              │
//! │  │              │  │  >>          │  │  output_dir      │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CatalogState: immutable, shared by Arc                              │
//! │  • SessionState: Arc<Mutex<T>>, updates swap a whole Selection         │
//! │  • ConfigState: read-only after initialization                         │
//! │                                                                         │
//! │  The quote store (MemoryQuoteStore) is its own cloneable handle.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod config;
mod session;

pub use catalog::CatalogState;
pub use config::{ConfigError, ConfigState};
pub use session::SessionState;
