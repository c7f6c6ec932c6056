//! Shared catalog with swap-on-write replacement.
//!
//! Readers take an `Arc` snapshot and keep using it for the whole
//! reconciliation. A reload builds the new catalog off to the side and then
//! swaps the pointer, so a reader sees either the old catalog or the new one
//! in full, never a mixture.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use super::entry::Catalog;
use super::loader::load_catalog;
use crate::error::Result;

/// Holder for the currently active catalog.
#[derive(Debug, Default)]
pub struct CatalogStore {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogStore {
    /// Create a store holding the empty, never-loaded catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with a catalog.
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The catalog active right now.
    pub fn snapshot(&self) -> Arc<Catalog> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace the active catalog, returning the previous one.
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let next = Arc::new(catalog);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }

    /// Load `path` and make it the active catalog.
    ///
    /// On failure the previously active catalog stays in effect.
    pub fn reload(&self, path: &Path) -> Result<Arc<Catalog>> {
        let catalog = load_catalog(path)?;
        self.replace(catalog);
        Ok(self.snapshot())
    }
}
