//! History command implementation.
//!
//! The `mandal history` command lists recorded sessions in the stored sort
//! order, optionally filtered by a notes search.

use std::path::{Path, PathBuf};

use crate::cli::args::HistoryArgs;
use crate::error::Result;
use crate::state::Session;
use crate::ui::UserInterface;

use super::dispatcher::{open_store, Command, CommandResult};
use super::display;

/// The history command implementation.
pub struct HistoryCommand {
    data_dir: PathBuf,
    args: HistoryArgs,
}

impl HistoryCommand {
    /// Create a new history command.
    pub fn new(data_dir: &Path, args: HistoryArgs) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            args,
        }
    }
}

impl Command for HistoryCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let store = open_store(&self.data_dir, ui)?;
        let state = store.state();

        if state.sessions.is_empty() {
            ui.message("No meditation sessions recorded yet.");
            return Ok(CommandResult::success());
        }

        let query = self.args.search.as_deref().filter(|q| !q.trim().is_empty());
        let sessions: Vec<&Session> = match query {
            Some(query) => {
                let matches = store.search_notes(query);
                store
                    .sorted_sessions()
                    .into_iter()
                    .filter(|s| matches.iter().any(|m| m.id == s.id))
                    .collect()
            }
            None => store.sorted_sessions(),
        };

        if sessions.is_empty() {
            ui.message(&format!(
                "No sessions with notes matching '{}'.",
                query.unwrap_or_default()
            ));
            return Ok(CommandResult::success());
        }

        let rows: Vec<(usize, &Session)> = sessions
            .into_iter()
            .filter_map(|s| state.session_position(&s.id).map(|p| (p + 1, s)))
            .collect();

        let order = if state.sort_ascending {
            "oldest first"
        } else {
            "newest first"
        };
        ui.show_header(&format!("Session History ({})", order));
        ui.message(&display::session_table(&rows, query).render());
        ui.message(&format!("{} of {} sessions", rows.len(), state.sessions.len()));

        Ok(CommandResult::success())
    }
}
