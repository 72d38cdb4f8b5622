//! # configurator-store: Quote Storage
//!
//! The storage collaborator for generated quotes.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Quote Data Flow                                  │
//! │                                                                         │
//! │  configurator-core: assemble_verified_quote() → Quote                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                configurator-store (THIS CRATE)                  │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────────┐        ┌─────────────────────────┐    │   │
//! │  │   │  QuoteStore trait  │◄───────│  MemoryQuoteStore       │    │   │
//! │  │   │  save / get / list │        │  Arc<RwLock<HashMap>>   │    │   │
//! │  │   └────────────────────┘        └─────────────────────────┘    │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  Quotes live as long as the process. No update, no delete.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`error`] - Store error types
//! - [`repository`] - `QuoteStore` trait and implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use configurator_store::{MemoryQuoteStore, QuoteStore};
//!
//! let store = MemoryQuoteStore::new();
//! let id = store.save(quote).await?;
//! let same = store.get(&id).await?; // Some(quote)
//! ```

pub mod error;
pub mod repository;

pub use error::{StoreError, StoreResult};
pub use repository::{MemoryQuoteStore, QuoteStore};
