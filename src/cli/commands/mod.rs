//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Every command opens the store in
//! the data directory, applies its change and reports any storage problem.

pub mod challenge;
pub mod completions;
pub mod dispatcher;
pub mod display;
pub mod history;
pub mod playlist;
pub mod preferences;
pub mod session;
pub mod status;
pub mod timer;
pub mod transfer;

pub use dispatcher::{open_store, Command, CommandDispatcher, CommandResult};
