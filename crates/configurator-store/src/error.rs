//! # Store Error Types
//!
//! Error types for quote storage.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  QuoteStore implementation                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module)                                              │
//! │       │   surfaced unchanged, never retried by the caller              │
//! │       ▼                                                                 │
//! │  ApiError (in CLI app) ← code + message for the user                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A missing quote is NOT an error: `get` returns `Ok(None)`.

use thiserror::Error;

/// Quote storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A quote with this id was already saved.
    ///
    /// ## When This Occurs
    /// - The same quote value is saved twice
    /// - Ids are never reused, so a new quote never hits this
    #[error("Quote {id} already exists")]
    Duplicate { id: String },

    /// The store refuses further quotes.
    ///
    /// ## When This Occurs
    /// - A capacity limit was configured and has been reached
    #[error("Quote store is full ({max} quotes)")]
    CapacityExceeded { max: usize },
}

impl StoreError {
    /// Creates a Duplicate error for a quote id.
    pub fn duplicate(id: impl Into<String>) -> Self {
        StoreError::Duplicate { id: id.into() }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            StoreError::duplicate("abc").to_string(),
            "Quote abc already exists"
        );
        assert_eq!(
            StoreError::CapacityExceeded { max: 3 }.to_string(),
            "Quote store is full (3 quotes)"
        );
    }
}
