//! Configuration schema definitions.
//!
//! This module contains the struct definitions that map to the
//! `.swaudit/config.yml` file format.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::inventory::lister::{DEFAULT_ARGS, DEFAULT_PROGRAM, DEFAULT_TIMEOUT};
use crate::inventory::{CommandLister, DEFAULT_PREAMBLE_LINES};

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    /// Catalog file used when `--catalog` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// Restriction tags applied when `--restrict` is not given.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restrictions: Vec<String>,

    /// Listing command settings.
    pub listing: ListingSettings,
}

/// How the package manager listing command is run and read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingSettings {
    /// Program to execute.
    pub program: String,

    /// Arguments passed to the program.
    pub args: Vec<String>,

    /// Leading output lines to discard before data rows.
    pub preamble_lines: usize,

    /// Seconds to wait before killing the command. `null` waits forever.
    pub timeout_secs: Option<u64>,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            args: DEFAULT_ARGS.iter().map(|a| a.to_string()).collect(),
            preamble_lines: DEFAULT_PREAMBLE_LINES,
            timeout_secs: Some(DEFAULT_TIMEOUT.as_secs()),
        }
    }
}

impl ListingSettings {
    /// Build the process lister described by these settings.
    pub fn lister(&self) -> CommandLister {
        CommandLister::new(self.program.clone(), self.args.clone())
            .with_timeout(self.timeout_secs.map(Duration::from_secs))
    }
}
