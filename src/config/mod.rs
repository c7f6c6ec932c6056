//! Configuration loading for swaudit.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use swaudit::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".swaudit");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "restrictions: [Laptop]\n").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.restrictions, vec!["Laptop".to_string()]);
//! assert_eq!(config.listing.program, "winget");
//! ```
//!
//! # Configuration File Locations
//!
//! 1. `--config <PATH>` (must exist)
//! 2. Project config (`.swaudit/config.yml`)
//! 3. Built-in defaults

pub mod loader;
pub mod schema;

pub use loader::{find_config, load_config, load_config_file, parse_config, CONFIG_DIR, CONFIG_FILE};
pub use schema::{AuditConfig, ListingSettings};
