//! # Session State
//!
//! The customer's in-progress selection.
//!
//! ## Update Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Selection Update                                     │
//! │                                                                         │
//! │  select_option("battery", "long-range")                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lock ──► current.with_option(...) ──► Ok(next) ──► swap ──► unlock     │
//! │                                    └─► Err(e)   ──► keep ──► unlock     │
//! │                                                                         │
//! │  A failed update never leaves a half-applied selection behind.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use configurator_core::{Catalog, Selection};

/// Thread-safe wrapper around the session's Selection.
///
/// Cloning shares the same selection.
#[derive(Debug, Clone)]
pub struct SessionState {
    selection: Arc<Mutex<Selection>>,
}

impl SessionState {
    /// Starts a session at the catalog's default selection.
    pub fn new(catalog: &Catalog) -> Self {
        SessionState {
            selection: Arc::new(Mutex::new(Selection::default_for(catalog))),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Selection> {
        // Selection is replaced wholesale, so a poisoned guard still holds
        // a complete value.
        self.selection.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A snapshot of the current selection.
    pub fn selection(&self) -> Selection {
        self.lock().clone()
    }

    /// Executes a function with read access to the selection.
    pub fn with_selection<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Selection) -> R,
    {
        f(&self.lock())
    }

    /// Computes the next selection from the current one and swaps it in.
    ///
    /// On error the current selection is left untouched.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// session.update(|s| s.with_option(&catalog, "battery", "long-range"))?;
    /// ```
    pub fn update<F, E>(&self, f: F) -> Result<Selection, E>
    where
        F: FnOnce(&Selection) -> Result<Selection, E>,
    {
        let mut current = self.lock();
        let next = f(&current)?;
        *current = next.clone();
        Ok(next)
    }

    /// Goes back to the catalog defaults.
    pub fn reset(&self, catalog: &Catalog) -> Selection {
        let fresh = Selection::default_for(catalog);
        *self.lock() = fresh.clone();
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use configurator_core::CoreError;

    #[test]
    fn test_starts_at_defaults() {
        let catalog = Catalog::elite_ev().unwrap();
        let session = SessionState::new(&catalog);

        assert_eq!(session.selection(), Selection::default_for(&catalog));
    }

    #[test]
    fn test_successful_update_is_visible() {
        let catalog = Catalog::elite_ev().unwrap();
        let session = SessionState::new(&catalog);

        session
            .update(|s| s.with_option(&catalog, "battery", "long-range"))
            .unwrap();

        let battery = session.with_selection(|s| s.option_id("battery").map(str::to_owned));
        assert_eq!(battery.as_deref(), Some("long-range"));
    }

    #[test]
    fn test_failed_update_leaves_selection_unchanged() {
        let catalog = Catalog::elite_ev().unwrap();
        let session = SessionState::new(&catalog);
        session
            .update(|s| s.with_option(&catalog, "color", "red"))
            .unwrap();
        let before = session.selection();

        let err = session
            .update(|s| s.with_option(&catalog, "battery", "fusion"))
            .unwrap_err();

        assert!(matches!(err, CoreError::InvalidOption { .. }));
        assert_eq!(session.selection(), before);
    }

    #[test]
    fn test_clones_share_selection() {
        let catalog = Catalog::elite_ev().unwrap();
        let session = SessionState::new(&catalog);
        let other = session.clone();

        other.update(|s| s.with_model(&catalog, "bmw-i4")).unwrap();
        assert_eq!(session.selection().model_id(), "bmw-i4");

        session.reset(&catalog);
        assert_eq!(other.selection().model_id(), "tesla-model-3");
    }
}
