//! Session command implementation.
//!
//! Provides `mandal session add`, `mandal session delete` and
//! `mandal session notes`.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::error::{MandalError, Result};
use crate::state::{NewSession, Period, SessionId, Store};
use crate::ui::{format_date, Prompt, PromptOption, UserInterface};

use super::dispatcher::{open_store, Command, CommandResult};
use super::display;

/// Arguments for the session command.
#[derive(Debug, Clone, Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionSubcommand,
}

/// Session subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum SessionSubcommand {
    /// Record a session for today, or back-fill one on a past day.
    Add(AddSessionArgs),
    /// Delete a session.
    Delete {
        /// Session id or a unique prefix of it.
        reference: Option<String>,
        /// Position in recorded order, as shown by `history`.
        #[arg(long, conflicts_with = "reference")]
        index: Option<usize>,
        /// Don't prompt for confirmation.
        #[arg(short, long)]
        force: bool,
    },
    /// Replace a session's notes.
    Notes {
        /// Session id or a unique prefix of it.
        reference: String,
        /// New notes.
        text: String,
    },
}

/// Arguments for `session add`.
#[derive(Debug, Clone, Default, Args)]
pub struct AddSessionArgs {
    /// Day to record, as YYYY-MM-DD (requires --morning and/or --evening).
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Record a morning session (08:00).
    #[arg(long)]
    pub morning: bool,
    /// Record an evening session (20:00).
    #[arg(long)]
    pub evening: bool,
    /// Notes for the session.
    #[arg(short, long)]
    pub notes: Option<String>,
    /// Length in seconds (defaults to the configured session length).
    #[arg(long)]
    pub duration: Option<u64>,
}

impl AddSessionArgs {
    fn periods(&self) -> Vec<Period> {
        [(self.morning, Period::Morning), (self.evening, Period::Evening)]
            .into_iter()
            .filter_map(|(selected, period)| selected.then_some(period))
            .collect()
    }
}

/// The session command implementation.
pub struct SessionCommand {
    data_dir: PathBuf,
    args: SessionArgs,
}

impl SessionCommand {
    /// Create a new session command.
    pub fn new(data_dir: &Path, args: SessionArgs) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            args,
        }
    }
}

impl Command for SessionCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut store = open_store(&self.data_dir, ui)?;

        let exit_code = match &self.args.command {
            SessionSubcommand::Add(args) => add(&mut store, args, ui)?,
            SessionSubcommand::Delete {
                reference,
                index,
                force,
            } => {
                let id = resolve(&store, reference.as_deref(), *index)?;
                delete(&mut store, id, *force, ui)?
            }
            SessionSubcommand::Notes { reference, text } => {
                let id = store.resolve_session(reference)?;
                store.update_session_notes(id, text)?;
                ui.success("Notes saved successfully.");
                0
            }
        };

        display::report_storage(&mut store, ui);
        Ok(if exit_code == 0 {
            CommandResult::success()
        } else {
            CommandResult::failure(exit_code)
        })
    }
}

/// Ask which sessions to back-fill. Empty when nothing usable was chosen.
fn ask_periods(ui: &mut dyn UserInterface) -> Result<Vec<Period>> {
    let prompt = Prompt::select(
        "period",
        "Which session?",
        vec![
            PromptOption::new("Morning (08:00)", "morning"),
            PromptOption::new("Evening (20:00)", "evening"),
            PromptOption::new("Both", "both"),
        ],
    );
    let choice = match ui.prompt(&prompt) {
        Ok(answer) => answer.as_string(),
        Err(MandalError::InvalidInput { .. }) => String::new(),
        Err(e) => return Err(e),
    };

    Ok(match choice.as_str() {
        "morning" => vec![Period::Morning],
        "evening" => vec![Period::Evening],
        "both" => vec![Period::Morning, Period::Evening],
        _ => Vec::new(),
    })
}

fn add(store: &mut Store, args: &AddSessionArgs, ui: &mut dyn UserInterface) -> Result<i32> {
    let notes = args.notes.clone().unwrap_or_default();
    let mut periods = args.periods();

    if periods.is_empty() && args.date.is_some() {
        periods = ask_periods(ui)?;
        if periods.is_empty() {
            ui.error("Select --morning, --evening or both for a past session.");
            return Ok(1);
        }
    }

    if periods.is_empty() {

        let id = match args.duration {
            None => store.add_session_now(&notes),
            Some(duration) => {
                let now = store.now();
                store.add_session(
                    NewSession::new(now, duration)
                        .with_period(Period::from_time(&now))
                        .with_notes(notes),
                )
            }
        };
        ui.success("Session added for today.");
        ui.message(&format!("Session id: {}", id.short()));
        return Ok(0);
    }

    let day = args.date.unwrap_or_else(|| store.today());
    let duration = args.duration.unwrap_or(store.settings().session_seconds);
    for period in &periods {
        let session = NewSession::on_day(day, *period, duration).with_notes(&*notes);
        let id = store.add_session(session);
        ui.message(&format!(
            "{} session on {} ({})",
            period,
            format_date(day),
            id.short()
        ));
    }
    ui.success("Past session(s) added successfully.");
    Ok(0)
}

/// Resolve a session from an id reference or a 1-based position.
fn resolve(store: &Store, reference: Option<&str>, index: Option<usize>) -> Result<SessionId> {
    match (reference, index) {
        (Some(reference), _) => store.resolve_session(reference),
        (None, Some(position)) => match position.checked_sub(1) {
            Some(index) => store.session_id_at(index),
            None => Err(MandalError::SessionIndexOutOfRange {
                index: position,
                len: store.state().sessions.len(),
            }),
        },
        (None, None) => Err(MandalError::InvalidInput {
            message: "Give a session id or --index".to_string(),
        }),
    }
}

fn delete(
    store: &mut Store,
    id: SessionId,
    force: bool,
    ui: &mut dyn UserInterface,
) -> Result<i32> {
    if !force {
        let confirmed = ui
            .prompt(&Prompt::confirm(
                "delete",
                "Are you sure you want to delete this session?",
                false,
            ))?
            .as_bool()
            .unwrap_or(false);
        if !confirmed {
            ui.message("Cancelled.");
            return Ok(0);
        }
    }

    let removed = store.delete_session(id)?;
    ui.success("Session deleted successfully.");
    ui.message(&format!(
        "{} session on {}",
        removed.display_period(),
        format_date(removed.day())
    ));
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn run(temp: &TempDir, command: SessionSubcommand, ui: &mut MockUI) -> Result<CommandResult> {
        SessionCommand::new(temp.path(), SessionArgs { command }).execute(ui)
    }

    fn reopen(temp: &TempDir) -> Store {
        open_store(temp.path(), &mut MockUI::new()).unwrap()
    }

    fn march_first() -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 3, 1)
    }

    #[test]
    fn add_now_records_full_session() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let args = AddSessionArgs {
            notes: Some("quiet".to_string()),
            ..Default::default()
        };
        run(&temp, SessionSubcommand::Add(args), &mut ui).unwrap();

        assert!(ui.has_success("Session added for today."));
        let store = reopen(&temp);
        let session = &store.state().sessions[0];
        assert_eq!(session.duration, 873);
        assert_eq!(session.notes, "quiet");
        assert!(session.period.is_some());
        assert_eq!(store.state().current_streak, 1);
    }

    #[test]
    fn add_past_day_both_periods() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let args = AddSessionArgs {
            date: march_first(),
            morning: true,
            evening: true,
            ..Default::default()
        };
        run(&temp, SessionSubcommand::Add(args), &mut ui).unwrap();

        let store = reopen(&temp);
        let sessions = &store.state().sessions;
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].period, Some(Period::Morning));
        assert_eq!(sessions[0].date.format("%H:%M").to_string(), "08:00");
        assert_eq!(sessions[1].period, Some(Period::Evening));
        assert_eq!(sessions[1].date.format("%H:%M").to_string(), "20:00");
        assert!(ui.has_message("Morning session on 01/03/2024"));
    }

    #[test]
    fn add_past_day_needs_period() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let args = AddSessionArgs {
            date: march_first(),
            ..Default::default()
        };
        let result = run(&temp, SessionSubcommand::Add(args), &mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert_eq!(ui.prompts_shown(), &["period"]);
        assert!(ui.has_error("Select --morning, --evening or both"));
        assert!(reopen(&temp).state().sessions.is_empty());
    }

    #[test]
    fn add_past_day_asks_for_period() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        ui.set_prompt_response("period", "evening");

        let args = AddSessionArgs {
            date: march_first(),
            ..Default::default()
        };
        let result = run(&temp, SessionSubcommand::Add(args), &mut ui).unwrap();

        assert!(result.success);
        let store = reopen(&temp);
        assert_eq!(store.state().sessions.len(), 1);
        assert_eq!(store.state().sessions[0].period, Some(Period::Evening));
    }

    #[test]
    fn add_past_day_both_periods_from_prompt() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        ui.set_prompt_response("period", "both");

        let args = AddSessionArgs {
            date: march_first(),
            ..Default::default()
        };
        run(&temp, SessionSubcommand::Add(args), &mut ui).unwrap();

        assert_eq!(reopen(&temp).state().sessions.len(), 2);
    }

    #[test]
    fn add_custom_duration() {
        let temp = TempDir::new().unwrap();
        let args = AddSessionArgs {
            duration: Some(300),
            ..Default::default()
        };
        run(&temp, SessionSubcommand::Add(args), &mut MockUI::new()).unwrap();

        assert_eq!(reopen(&temp).state().sessions[0].duration, 300);
    }

    #[test]
    fn delete_by_index_with_confirmation() {
        let temp = TempDir::new().unwrap();
        run(
            &temp,
            SessionSubcommand::Add(AddSessionArgs::default()),
            &mut MockUI::new(),
        )
        .unwrap();

        let mut ui = MockUI::new();
        ui.set_prompt_response("delete", "yes");
        run(
            &temp,
            SessionSubcommand::Delete {
                reference: None,
                index: Some(1),
                force: false,
            },
            &mut ui,
        )
        .unwrap();

        assert!(ui.has_success("Session deleted successfully."));
        assert!(reopen(&temp).state().sessions.is_empty());
    }

    #[test]
    fn delete_declined_keeps_session() {
        let temp = TempDir::new().unwrap();
        run(
            &temp,
            SessionSubcommand::Add(AddSessionArgs::default()),
            &mut MockUI::new(),
        )
        .unwrap();

        let mut ui = MockUI::new();
        run(
            &temp,
            SessionSubcommand::Delete {
                reference: None,
                index: Some(1),
                force: false,
            },
            &mut ui,
        )
        .unwrap();

        assert!(ui.has_message("Cancelled."));
        assert_eq!(reopen(&temp).state().sessions.len(), 1);
    }

    #[test]
    fn delete_by_id_prefix() {
        let temp = TempDir::new().unwrap();
        run(
            &temp,
            SessionSubcommand::Add(AddSessionArgs::default()),
            &mut MockUI::new(),
        )
        .unwrap();
        let id = reopen(&temp).state().sessions[0].id;

        run(
            &temp,
            SessionSubcommand::Delete {
                reference: Some(id.short()),
                index: None,
                force: true,
            },
            &mut MockUI::new(),
        )
        .unwrap();

        assert!(reopen(&temp).state().sessions.is_empty());
    }

    #[test]
    fn delete_bad_index_is_error() {
        let temp = TempDir::new().unwrap();
        let result = run(
            &temp,
            SessionSubcommand::Delete {
                reference: None,
                index: Some(0),
                force: true,
            },
            &mut MockUI::new(),
        );

        assert!(matches!(
            result,
            Err(MandalError::SessionIndexOutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn delete_needs_reference() {
        let temp = TempDir::new().unwrap();
        let result = run(
            &temp,
            SessionSubcommand::Delete {
                reference: None,
                index: None,
                force: true,
            },
            &mut MockUI::new(),
        );

        assert!(matches!(result, Err(MandalError::InvalidInput { .. })));
    }

    #[test]
    fn notes_are_replaced() {
        let temp = TempDir::new().unwrap();
        run(
            &temp,
            SessionSubcommand::Add(AddSessionArgs::default()),
            &mut MockUI::new(),
        )
        .unwrap();
        let id = reopen(&temp).state().sessions[0].id;

        let mut ui = MockUI::new();
        run(
            &temp,
            SessionSubcommand::Notes {
                reference: id.to_string(),
                text: "felt calm".to_string(),
            },
            &mut ui,
        )
        .unwrap();

        assert!(ui.has_success("Notes saved successfully."));
        assert_eq!(reopen(&temp).state().sessions[0].notes, "felt calm");
    }

    #[test]
    fn notes_for_unknown_session_fail() {
        let temp = TempDir::new().unwrap();
        let result = run(
            &temp,
            SessionSubcommand::Notes {
                reference: "deadbeef".to_string(),
                text: "x".to_string(),
            },
            &mut MockUI::new(),
        );

        assert!(matches!(result, Err(MandalError::SessionNotFound { .. })));
    }
}
