//! Export and import commands.
//!
//! `mandal export` writes the whole state as JSON; `mandal import` merges
//! such a document back in, keeping current values for missing keys.

use std::path::{Path, PathBuf};

use crate::cli::args::{ExportArgs, ImportArgs};
use crate::error::{MandalError, Result};
use crate::persistence::{export_state, read_import, EXPORT_FILE_NAME};
use crate::ui::UserInterface;

use super::dispatcher::{open_store, Command, CommandResult};
use super::display;

/// The export command implementation.
pub struct ExportCommand {
    data_dir: PathBuf,
    args: ExportArgs,
}

impl ExportCommand {
    /// Create a new export command.
    pub fn new(data_dir: &Path, args: ExportArgs) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            args,
        }
    }

    fn target(&self) -> PathBuf {
        self.args
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME))
    }
}

impl Command for ExportCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let store = open_store(&self.data_dir, ui)?;
        let target = self.target();

        export_state(&target, &store.snapshot())?;
        tracing::debug!("Exported state to {}", target.display());

        ui.success(&format!("Data exported to {}", target.display()));
        Ok(CommandResult::success())
    }
}

/// The import command implementation.
pub struct ImportCommand {
    data_dir: PathBuf,
    args: ImportArgs,
}

impl ImportCommand {
    /// Create a new import command.
    pub fn new(data_dir: &Path, args: ImportArgs) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            args,
        }
    }
}

impl Command for ImportCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut store = open_store(&self.data_dir, ui)?;

        let update = match read_import(&self.args.path) {
            Ok(update) => update,
            Err(MandalError::StateParse { message }) => {
                ui.error(&format!(
                    "Error importing data. Please check the file format. ({})",
                    message
                ));
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        };

        if update.is_empty() {
            ui.warning("The file contains no Mandal data; nothing imported.");
            return Ok(CommandResult::failure(1));
        }

        store.import_state(update);
        ui.success("Data imported successfully!");
        ui.message(&format!(
            "{} sessions, Mandal: {}",
            store.state().sessions.len(),
            store
                .state()
                .active_challenge
                .as_ref()
                .map_or("none", |c| c.name.as_str())
        ));

        display::report_storage(&mut store, ui);
        Ok(CommandResult::success())
    }
}
