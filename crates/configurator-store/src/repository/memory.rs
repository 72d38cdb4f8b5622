//! # In-Memory Quote Store
//!
//! Keeps quotes in a map for the lifetime of the process.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MemoryQuoteStore (Clone = another handle to the same map)              │
//! │                                                                         │
//! │  Arc<RwLock<Inner>>                                                     │
//! │   ├── quotes: HashMap<QuoteId, Quote>    point lookups                  │
//! │   └── order:  Vec<QuoteId>               save order for list()          │
//! │                                                                         │
//! │  save: write lock, both collections updated under the same guard        │
//! │  get / list: read lock, clones out                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use configurator_core::{Quote, QuoteId};

use super::QuoteStore;
use crate::error::{StoreError, StoreResult};

#[derive(Debug, Default)]
struct Inner {
    quotes: HashMap<QuoteId, Quote>,
    order: Vec<QuoteId>,
}

/// In-memory quote store.
///
/// ## Usage
/// ```rust
/// use configurator_store::{MemoryQuoteStore, QuoteStore};
///
/// # async fn demo() -> Result<(), configurator_store::StoreError> {
/// let store = MemoryQuoteStore::new();
/// assert!(store.list().await?.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryQuoteStore {
    inner: Arc<RwLock<Inner>>,
    max_quotes: Option<usize>,
}

impl MemoryQuoteStore {
    /// Creates an empty, unbounded store.
    pub fn new() -> Self {
        MemoryQuoteStore::default()
    }

    /// Creates an empty store that refuses quotes beyond `max_quotes`.
    pub fn with_capacity_limit(max_quotes: usize) -> Self {
        MemoryQuoteStore {
            inner: Arc::default(),
            max_quotes: Some(max_quotes),
        }
    }

    /// Number of stored quotes.
    pub async fn len(&self) -> usize {
        self.inner.read().await.order.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl QuoteStore for MemoryQuoteStore {
    async fn save(&self, quote: Quote) -> StoreResult<QuoteId> {
        let id = quote.id().clone();
        let mut inner = self.inner.write().await;

        if inner.quotes.contains_key(&id) {
            return Err(StoreError::duplicate(id.as_str()));
        }

        if let Some(max) = self.max_quotes {
            if inner.order.len() >= max {
                return Err(StoreError::CapacityExceeded { max });
            }
        }

        debug!(id = %id, total = %quote.breakdown().total, "Saving quote");

        inner.order.push(id.clone());
        inner.quotes.insert(id.clone(), quote);
        Ok(id)
    }

    async fn get(&self, id: &QuoteId) -> StoreResult<Option<Quote>> {
        Ok(self.inner.read().await.quotes.get(id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Quote>> {
        let inner = self.inner.read().await;
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.quotes.get(id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use configurator_core::{assemble_verified_quote, Catalog, Selection, TAX_RATE};

    fn quote(battery: &str) -> Quote {
        let catalog = Catalog::elite_ev().unwrap();
        let selection = Selection::default_for(&catalog)
            .with_option(&catalog, "battery", battery)
            .unwrap();
        assemble_verified_quote(&catalog, selection, TAX_RATE, None).unwrap()
    }

    #[tokio::test]
    async fn test_save_then_get() {
        let store = MemoryQuoteStore::new();
        let quote = quote("long-range");

        let id = store.save(quote.clone()).await.unwrap();
        assert_eq!(&id, quote.id());

        let fetched = store.get(&id).await.unwrap().unwrap();
        assert_eq!(fetched, quote);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let store = MemoryQuoteStore::new();
        store.save(quote("standard")).await.unwrap();

        let missing = store.get(&QuoteId::generate()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_in_save_order() {
        let store = MemoryQuoteStore::new();
        let first = quote("standard");
        let second = quote("performance");
        let third = quote("long-range");

        for q in [&first, &second, &third] {
            store.save(q.clone()).await.unwrap();
        }

        let ids: Vec<QuoteId> = store
            .list()
            .await
            .unwrap()
            .iter()
            .map(|q| q.id().clone())
            .collect();
        assert_eq!(ids, vec![first.id().clone(), second.id().clone(), third.id().clone()]);
    }

    #[tokio::test]
    async fn test_duplicate_save_rejected() {
        let store = MemoryQuoteStore::new();
        let quote = quote("standard");

        store.save(quote.clone()).await.unwrap();
        let err = store.save(quote).await.unwrap_err();

        assert!(matches!(err, StoreError::Duplicate { .. }));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_capacity_limit() {
        let store = MemoryQuoteStore::with_capacity_limit(1);
        store.save(quote("standard")).await.unwrap();

        let err = store.save(quote("performance")).await.unwrap_err();
        assert!(matches!(err, StoreError::CapacityExceeded { max: 1 }));
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let store = MemoryQuoteStore::new();
        let handle = store.clone();

        handle.save(quote("standard")).await.unwrap();
        assert!(!store.is_empty().await);
    }

    #[tokio::test]
    async fn test_concurrent_saves_all_land() {
        let store = MemoryQuoteStore::new();

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.save(quote("long-range")).await })
            })
            .collect();

        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(store.list().await.unwrap().len(), 16);
    }
}
