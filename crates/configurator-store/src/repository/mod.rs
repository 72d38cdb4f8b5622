//! # Repository Module
//!
//! The storage collaborator contract and its implementations.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Quote Storage                                        │
//! │                                                                         │
//! │  Quote generation (CLI)                                                │
//! │       │                                                                 │
//! │       │  store.save(quote).await?                                      │
//! │       ▼                                                                 │
//! │  QuoteStore (trait)                                                    │
//! │  ├── save(&self, quote)  → QuoteId                                     │
//! │  ├── get(&self, id)      → Option<Quote>   (None = not found)          │
//! │  └── list(&self)         → Vec<Quote>      (save order)                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  MemoryQuoteStore (process lifetime only)                              │
//! │                                                                         │
//! │  No update, no delete: quotes are immutable once saved.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Implementations
//!
//! - [`MemoryQuoteStore`] - in-memory map behind an async `RwLock`

pub mod memory;

pub use memory::MemoryQuoteStore;

use std::future::Future;

use configurator_core::{Quote, QuoteId};

use crate::error::StoreResult;

/// Storage for generated quotes.
///
/// Every call is atomic from the caller's point of view: a quote is either
/// fully stored or not stored at all.
pub trait QuoteStore: Send + Sync {
    /// Stores a quote and returns its id.
    fn save(&self, quote: Quote) -> impl Future<Output = StoreResult<QuoteId>> + Send;

    /// Looks up a quote. `Ok(None)` when the id was never saved.
    fn get(&self, id: &QuoteId) -> impl Future<Output = StoreResult<Option<Quote>>> + Send;

    /// Every stored quote, in the order they were saved.
    fn list(&self) -> impl Future<Output = StoreResult<Vec<Quote>>> + Send;
}
