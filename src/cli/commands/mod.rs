//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Running `swaudit` with no
//! subcommand is the same as `swaudit check`.

pub mod catalog;
pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod display;
pub mod installed;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
