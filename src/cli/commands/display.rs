//! Shared display helpers for sessions, challenge progress and notices.
//!
//! These helpers are used by `status`, `history`, `challenge` and any
//! other command that renders tracker state.

use chrono::NaiveDate;
use console::style;
use regex::RegexBuilder;

use crate::state::{Session, Store};
use crate::stats::{ChallengeProgress, DayCell};
use crate::ui::{format_clock, format_clock_f64, format_date, Table, UserInterface};

/// Days per row in the challenge grid.
const GRID_WIDTH: usize = 7;

/// Show and clear any storage problem the store ran into.
pub fn report_storage(store: &mut Store, ui: &mut dyn UserInterface) {
    if let Some(warning) = store.take_storage_warning() {
        ui.warning(&warning);
    }
}

/// Build the session history table.
///
/// `rows` pairs each session with its 1-based position in recorded order,
/// which `session delete --index` accepts.
pub fn session_table(rows: &[(usize, &Session)], highlight: Option<&str>) -> Table {
    let mut table = Table::new(vec!["#", "ID", "Date", "Period", "Duration", "Notes"]);
    for (position, session) in rows {
        let notes = match highlight {
            Some(term) => highlight_term(&session.notes, term),
            None => session.notes.clone(),
        };
        table.add_row(vec![
            position.to_string(),
            session.id.short(),
            format_date(session.day()),
            session.display_period().to_string(),
            format_clock(session.duration),
            notes,
        ]);
    }
    table
}

/// Emphasize every case-insensitive occurrence of `term` in `text`.
pub fn highlight_term(text: &str, term: &str) -> String {
    if term.is_empty() {
        return text.to_string();
    }

    match RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re
            .replace_all(text, |caps: &regex::Captures| {
                style(&caps[0]).bold().underlined().to_string()
            })
            .into_owned(),
        Err(_) => text.to_string(),
    }
}

/// Print the headline numbers of the active challenge.
pub fn show_progress(ui: &mut dyn UserInterface, progress: &ChallengeProgress) {
    ui.message(&format!(
        "Day {} of {} Day Mandal · {}% complete",
        progress.day_number.max(0),
        progress.total_days,
        progress.percent_complete
    ));
    ui.message(&format!("Days Remaining: {}", progress.days_remaining));
    ui.message(&format!(
        "Sessions: {}/{} ({} today)",
        progress.total_sessions, progress.target_sessions, progress.sessions_today
    ));
    ui.message(&format!(
        "Total Meditation Time: {}",
        format_clock(progress.total_seconds)
    ));
    ui.message(&format!(
        "Average Session Duration: {}",
        format_clock_f64(progress.average_seconds)
    ));
}

/// Render the per-day grid, one week per line.
///
/// Each cell shows the session count for that day (`·` for none);
/// today is wrapped in brackets.
pub fn day_grid(days: &[DayCell]) -> Vec<String> {
    days.chunks(GRID_WIDTH)
        .map(|week| {
            let cells: Vec<String> = week.iter().map(grid_cell).collect();
            format!("{}  {}", week_label(week), cells.join(" "))
        })
        .collect()
}

fn grid_cell(cell: &DayCell) -> String {
    let mark = match cell.sessions {
        0 => "·".to_string(),
        n if n < 10 => n.to_string(),
        _ => "+".to_string(),
    };
    if cell.is_today {
        format!("[{}]", mark)
    } else {
        format!(" {} ", mark)
    }
}

fn week_label(week: &[DayCell]) -> String {
    week.first()
        .map(|cell| short_date(cell.date))
        .unwrap_or_default()
}

fn short_date(date: NaiveDate) -> String {
    date.format("%d/%m").to_string()
}

/// Pluralize "day".
pub fn days(count: u32) -> String {
    if count == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", count)
    }
}
