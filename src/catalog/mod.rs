//! Approved-software catalog.
//!
//! - [`entry`] - [`CatalogEntry`] and the immutable [`Catalog`]
//! - [`loader`] - reading JSON, YAML and delimited catalog files
//! - [`delimited`] - the delimited-text reader
//! - [`store`] - the shared, swap-on-write [`CatalogStore`]
//!
//! # Example
//!
//! ```
//! use swaudit::catalog::load_catalog;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("catalog.csv");
//! fs::write(&path, "software_name,version,approved,restrictedTo\nSAP SAPGUI x64,7700.1.12.1161,true,\n").unwrap();
//!
//! let catalog = load_catalog(&path).unwrap();
//! assert_eq!(catalog.entries()[0].expected_version, "7700.1.12.1161");
//! ```

pub mod delimited;
pub mod entry;
pub mod loader;
pub mod store;

pub use delimited::parse_delimited;
pub use entry::{normalize_restriction, Catalog, CatalogEntry};
pub use loader::{load_catalog, parse_catalog, CatalogFormat};
pub use store::CatalogStore;
