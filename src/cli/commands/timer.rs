//! Timer command implementation.
//!
//! The `mandal timer` command runs one timed session with a live progress
//! bar and records it when the session length is reached. In an
//! interactive terminal, pressing Enter ends the session early.

use std::cell::RefCell;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::thread;

use crate::cli::args::TimerArgs;
use crate::error::Result;
use crate::state::AppState;
use crate::timer::{drive_session, Timer, TimerStopper};
use crate::ui::{format_clock, UserInterface};

use super::dispatcher::{open_store, Command, CommandResult};
use super::display;

/// The timer command implementation.
pub struct TimerCommand {
    data_dir: PathBuf,
    args: TimerArgs,
}

impl TimerCommand {
    /// Create a new timer command.
    pub fn new(data_dir: &Path, args: TimerArgs) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            args,
        }
    }
}

/// End the session when a line arrives on stdin.
fn stop_on_enter(stopper: TimerStopper) {
    thread::spawn(move || {
        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line).is_ok() {
            stopper.stop();
        }
    });
}

impl Command for TimerCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut store = open_store(&self.data_dir, ui)?;
        let settings = store.settings().clone();
        let total = settings.session_seconds;

        let mut timer = Timer::from_settings(&settings);
        let events = timer.start();
        if ui.is_interactive() {
            if let Some(stopper) = timer.stopper() {
                ui.message("Press Enter to end the session early.");
                stop_on_enter(stopper);
            }
        }

        let progress = Rc::new(RefCell::new(
            ui.start_progress(total, &format!("Meditating {}", format_clock(total))),
        ));
        let bar = Rc::clone(&progress);
        let subscription = store.subscribe(move |state: &AppState| -> anyhow::Result<()> {
            if state.timer_running {
                bar.borrow_mut().set_position(state.timer_seconds);
            }
            Ok(())
        });

        let recorded = drive_session(&mut store, &mut timer, events);
        store.unsubscribe(subscription);
        let id = recorded?;

        if let Some(notes) = &self.args.notes {
            store.update_session_notes(id, notes)?;
        }

        let duration = store.state().session(&id).map_or(0, |s| s.duration);
        if duration >= total {
            progress.borrow_mut().finish("Session complete");
        } else {
            progress
                .borrow_mut()
                .abandon(&format!("Session ended early at {}", format_clock(duration)));
        }

        ui.success(&format!("Session recorded: {}", format_clock(duration)));
        ui.message(&format!(
            "Current Streak: {}",
            display::days(store.state().current_streak)
        ));

        display::report_storage(&mut store, ui);
        Ok(CommandResult::success())
    }
}
