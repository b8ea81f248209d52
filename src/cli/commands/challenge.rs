//! Challenge command implementation.
//!
//! Provides `mandal challenge create`, `mandal challenge show` and
//! `mandal challenge clear`.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::error::{MandalError, Result};
use crate::state::{Challenge, Store};
use crate::ui::{format_date, Prompt, UserInterface};

use super::dispatcher::{open_store, Command, CommandResult};
use super::display;

/// Arguments for the challenge command.
#[derive(Debug, Clone, Args)]
pub struct ChallengeArgs {
    #[command(subcommand)]
    pub command: ChallengeSubcommand,
}

/// Challenge subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ChallengeSubcommand {
    /// Start a new Mandal.
    Create {
        /// Name of the Mandal (prompted for when omitted).
        name: Option<String>,
        /// First day, as YYYY-MM-DD (defaults to today).
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Length in days (defaults to the configured challenge length).
        #[arg(short, long)]
        days: Option<u32>,
    },
    /// Show the active Mandal with its day grid.
    Show,
    /// End the active Mandal. Recorded sessions are kept.
    Clear {
        /// Don't prompt for confirmation.
        #[arg(short, long)]
        force: bool,
    },
}

/// The challenge command implementation.
pub struct ChallengeCommand {
    data_dir: PathBuf,
    args: ChallengeArgs,
}

impl ChallengeCommand {
    /// Create a new challenge command.
    pub fn new(data_dir: &Path, args: ChallengeArgs) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            args,
        }
    }
}

impl Command for ChallengeCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut store = open_store(&self.data_dir, ui)?;

        let exit_code = match &self.args.command {
            ChallengeSubcommand::Create { name, start, days } => {
                create(&mut store, name.as_deref(), *start, *days, ui)?
            }
            ChallengeSubcommand::Show => show(&store, ui),
            ChallengeSubcommand::Clear { force } => clear(&mut store, *force, ui)?,
        };

        display::report_storage(&mut store, ui);
        Ok(if exit_code == 0 {
            CommandResult::success()
        } else {
            CommandResult::failure(exit_code)
        })
    }
}

fn create(
    store: &mut Store,
    name: Option<&str>,
    start: Option<NaiveDate>,
    days: Option<u32>,
    ui: &mut dyn UserInterface,
) -> Result<i32> {
    if let Some(active) = &store.state().active_challenge {
        let err = MandalError::ChallengeAlreadyActive {
            name: active.name.clone(),
        };
        ui.error(&err.to_string());
        ui.message("Run `mandal challenge clear` to end it.");
        return Ok(1);
    }

    let name = match name {
        Some(name) => name.to_string(),
        None => ui
            .prompt(&Prompt::input("name", "Mandal name", None))?
            .as_string(),
    };
    let start = start.unwrap_or_else(|| store.today());
    let days = days.unwrap_or(store.settings().challenge_days);

    let challenge = match Challenge::new(&name, start, days) {
        Ok(challenge) => challenge,
        Err(MandalError::InvalidInput { message }) => {
            ui.error(&message);
            return Ok(1);
        }
        Err(e) => return Err(e),
    };

    let summary = format!(
        "{}: {} to {} ({})",
        challenge.name,
        format_date(challenge.start_date),
        format_date(challenge.end_date),
        display::days(challenge.duration)
    );
    store.create_challenge(challenge)?;

    ui.success("Mandal created successfully!");
    ui.message(&summary);
    Ok(0)
}

fn show(store: &Store, ui: &mut dyn UserInterface) -> i32 {
    let state = store.snapshot();
    let (Some(challenge), Some(progress)) =
        (state.active_challenge.as_ref(), store.challenge_progress())
    else {
        ui.message("No active Mandal. Create one to start tracking.");
        return 0;
    };

    ui.show_header(&challenge.name);
    ui.message(&format!("Start Date: {}", format_date(challenge.start_date)));
    ui.message(&format!("End Date: {}", format_date(challenge.end_date)));
    display::show_progress(ui, &progress);

    ui.message("");
    for line in display::day_grid(&progress.days) {
        ui.message(&line);
    }
    ui.message(&format!(
        "{} of {} days practiced · [n] marks today",
        progress.practiced_days(),
        progress.total_days
    ));
    0
}

fn clear(store: &mut Store, force: bool, ui: &mut dyn UserInterface) -> Result<i32> {
    let Some(active) = store.state().active_challenge.clone() else {
        ui.error(&MandalError::NoActiveChallenge.to_string());
        return Ok(1);
    };

    if !force {
        let question = format!("End the Mandal '{}'? Sessions are kept.", active.name);
        let confirmed = ui
            .prompt(&Prompt::confirm("clear", &question, false))?
            .as_bool()
            .unwrap_or(false);
        if !confirmed {
            ui.message("Cancelled.");
            return Ok(0);
        }
    }

    let cleared = store.clear_challenge()?;
    ui.success(&format!("Mandal '{}' cleared.", cleared.name));
    Ok(0)
}
