//! Preference commands: `mandal sort`, `mandal theme` and `mandal name`.

use std::path::{Path, PathBuf};

use crate::cli::args::NameArgs;
use crate::error::{MandalError, Result};
use crate::state::Theme;
use crate::ui::{Prompt, UserInterface};

use super::dispatcher::{open_store, Command, CommandResult};
use super::display;

/// Toggles the history sort order.
pub struct SortCommand {
    data_dir: PathBuf,
}

impl SortCommand {
    /// Create a new sort command.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
        }
    }
}

impl Command for SortCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut store = open_store(&self.data_dir, ui)?;

        let ascending = store.toggle_sort_order();
        let order = if ascending {
            "oldest first"
        } else {
            "newest first"
        };
        ui.success(&format!("History now sorted {}.", order));

        display::report_storage(&mut store, ui);
        Ok(CommandResult::success())
    }
}

/// Toggles between the light and dark theme.
pub struct ThemeCommand {
    data_dir: PathBuf,
}

impl ThemeCommand {
    /// Create a new theme command.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
        }
    }
}

impl Command for ThemeCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut store = open_store(&self.data_dir, ui)?;

        let theme = store.toggle_theme();
        ui.set_theme(theme);
        let label = match theme {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        };
        ui.success(&format!("{} theme enabled.", label));

        display::report_storage(&mut store, ui);
        Ok(CommandResult::success())
    }
}

/// Sets the name shown on the dashboard.
pub struct NameCommand {
    data_dir: PathBuf,
    args: NameArgs,
}

impl NameCommand {
    /// Create a new name command.
    pub fn new(data_dir: &Path, args: NameArgs) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            args,
        }
    }
}

impl Command for NameCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut store = open_store(&self.data_dir, ui)?;

        let name = match &self.args.name {
            Some(name) => name.clone(),
            None => {
                let current = store.state().user_name.clone();
                ui.prompt(&Prompt::input("name", "Your name", Some(&current)))?
                    .as_string()
            }
        };

        match store.set_user_name(&name) {
            Ok(()) => ui.success(&format!("Name set to {}.", store.state().user_name)),
            Err(MandalError::InvalidInput { message }) => {
                ui.error(&message);
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        }

        display::report_storage(&mut store, ui);
        Ok(CommandResult::success())
    }
}
