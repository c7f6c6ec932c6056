//! swaudit - Workstation software compliance auditing.
//!
//! swaudit runs the package manager's listing command (`winget list` by
//! default), parses the installed packages it reports, and compares them by
//! exact name and version against an approved software catalog.
//!
//! # Modules
//!
//! - [`inventory`] - Listing command execution and output parsing
//! - [`catalog`] - Catalog entries, file loading, and the shared catalog store
//! - [`reconcile`] - Matching, restriction filtering, and compliance reports
//! - [`config`] - Configuration loading
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use swaudit::catalog::CatalogEntry;
//! use swaudit::inventory::parse_installed_packages;
//! use swaudit::reconcile::reconcile;
//!
//! let listing = "Name  Id  Version  Available  Source\n---\n\n\n\n\
//!                Mozilla Firefox  Mozilla.Firefox  115.0.2  116.0  winget\n";
//! let installed = parse_installed_packages(listing);
//! let catalog = vec![CatalogEntry::new("Mozilla Firefox", "115.0.2", true, None)];
//!
//! let report = reconcile(&catalog, &installed);
//! assert!(report[0].installed);
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod inventory;
pub mod reconcile;
pub mod ui;

pub use error::{AuditError, Result};
