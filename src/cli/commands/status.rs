//! Status command implementation.
//!
//! The `mandal status` command shows the dashboard: challenge progress,
//! the current streak and this week's numbers.

use std::path::{Path, PathBuf};

use crate::cli::args::StatusArgs;
use crate::error::Result;
use crate::ui::{format_clock, format_clock_f64, format_relative_day, UserInterface};

use super::dispatcher::{open_store, Command, CommandResult};
use super::display;

/// The status command implementation.
pub struct StatusCommand {
    data_dir: PathBuf,
    args: StatusArgs,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(data_dir: &Path, args: StatusArgs) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &StatusArgs {
        &self.args
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let store = open_store(&self.data_dir, ui)?;
        let state = store.snapshot();

        ui.show_header(&format!("{} · Mandal", state.user_name));

        let (Some(challenge), Some(progress)) =
            (state.active_challenge.as_ref(), store.challenge_progress())
        else {
            ui.message("No active Mandal. Create one to start tracking.");
            ui.message("Run `mandal challenge create <NAME>` to begin.");
            return Ok(CommandResult::success());
        };

        ui.message(&challenge.name);
        display::show_progress(ui, &progress);

        ui.message("");
        ui.message(&format!(
            "Current Streak: {}",
            display::days(store.calculate_streak())
        ));
        if let Some(last) = state.sessions.iter().map(|s| s.day()).max() {
            ui.message(&format!(
                "Last Session: {}",
                format_relative_day(last, store.today())
            ));
        }

        let weekly = store.weekly_stats();
        ui.message("");
        ui.message("This Week's Progress");
        ui.message(&format!("  Sessions: {}", weekly.sessions_count));
        ui.message(&format!("  Total Time: {}", format_clock(weekly.total_seconds)));
        ui.message(&format!(
            "  Average Time: {}",
            format_clock_f64(weekly.average_seconds)
        ));

        if !self.args.no_grid && ui.output_mode().shows_progress() {
            ui.message("");
            for line in display::day_grid(&progress.days) {
                ui.message(&line);
            }
            ui.message(&format!(
                "{} of {} days practiced",
                progress.practiced_days(),
                progress.total_days
            ));
        }

        Ok(CommandResult::success())
    }
}
