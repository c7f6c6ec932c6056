//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// swaudit - Installed software compliance against an approved catalog.
#[derive(Debug, Parser)]
#[command(name = "swaudit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .swaudit/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Arguments for `check` when no subcommand is given
    #[command(flatten)]
    pub check: CheckArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compare installed software with the catalog (default)
    Check(CheckArgs),

    /// Show packages reported by the package manager
    Installed(InstalledArgs),

    /// Load and display a catalog file
    Catalog(CatalogArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Catalog file (CSV, TSV, JSON, or YAML)
    #[arg(long, env = "SWAUDIT_CATALOG", value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Only report entries restricted to these tags (comma-separated)
    #[arg(
        short,
        long,
        env = "SWAUDIT_RESTRICT",
        value_delimiter = ',',
        value_name = "TAG"
    )]
    pub restrict: Vec<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Exit with status 1 when any reported entry is missing
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `installed` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstalledArgs {
    /// Print packages as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `catalog` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CatalogArgs {
    /// Catalog file to load
    pub path: PathBuf,

    /// Only show entries restricted to these tags (comma-separated)
    #[arg(short, long, value_delimiter = ',', value_name = "TAG")]
    pub restrict: Vec<String>,

    /// Print entries as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
