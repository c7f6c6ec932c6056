//! Installed package inventory.
//!
//! - [`package`] - the [`InstalledPackage`] record
//! - [`parser`] - parsing of the listing command's tabular output
//! - [`lister`] - running the listing command behind [`PackageLister`]

pub mod lister;
pub mod package;
pub mod parser;

pub use lister::{CommandLister, ListingOutput, PackageLister, DEFAULT_TIMEOUT};
pub use package::InstalledPackage;
pub use parser::{
    parse_installed_packages, parse_listing, split_columns, DEFAULT_PREAMBLE_LINES,
    LISTING_COLUMNS,
};
