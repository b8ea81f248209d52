//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, StatusArgs};
use crate::config::load_settings;
use crate::error::Result;
use crate::persistence::Persistence;
use crate::state::Store;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Open the store kept in `data_dir` and apply its theme to `ui`.
///
/// Problems loading saved data are shown as a warning; the store then
/// starts from the default state.
pub fn open_store(data_dir: &Path, ui: &mut dyn UserInterface) -> Result<Store> {
    let settings = load_settings(data_dir)?;
    let mut store = Store::open(Persistence::in_dir(data_dir), settings);
    ui.set_theme(store.state().theme);
    super::display::report_storage(&mut store, ui);
    Ok(store)
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    data_dir: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given data directory.
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Get the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let dir = &self.data_dir;
        match &cli.command {
            Some(Commands::Status(args)) => {
                super::status::StatusCommand::new(dir, args.clone()).execute(ui)
            }
            Some(Commands::Challenge(args)) => {
                super::challenge::ChallengeCommand::new(dir, args.clone()).execute(ui)
            }
            Some(Commands::Session(args)) => {
                super::session::SessionCommand::new(dir, args.clone()).execute(ui)
            }
            Some(Commands::History(args)) => {
                super::history::HistoryCommand::new(dir, args.clone()).execute(ui)
            }
            Some(Commands::Timer(args)) => {
                super::timer::TimerCommand::new(dir, args.clone()).execute(ui)
            }
            Some(Commands::Playlist(args)) => {
                super::playlist::PlaylistCommand::new(dir, args.clone()).execute(ui)
            }
            Some(Commands::Sort) => super::preferences::SortCommand::new(dir).execute(ui),
            Some(Commands::Theme) => super::preferences::ThemeCommand::new(dir).execute(ui),
            Some(Commands::Name(args)) => {
                super::preferences::NameCommand::new(dir, args.clone()).execute(ui)
            }
            Some(Commands::Export(args)) => {
                super::transfer::ExportCommand::new(dir, args.clone()).execute(ui)
            }
            Some(Commands::Import(args)) => {
                super::transfer::ImportCommand::new(dir, args.clone()).execute(ui)
            }
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => super::status::StatusCommand::new(dir, StatusArgs::default()).execute(ui),
        }
    }
}
