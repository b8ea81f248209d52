//! Library integration tests.

use chrono::NaiveDate;
use mandal::clock::FixedClock;
use mandal::persistence::{export_state, read_import, Persistence};
use mandal::state::{Challenge, Store};
use mandal::MandalError;
use tempfile::TempDir;

fn noon(y: i32, m: u32, d: u32) -> FixedClock {
    FixedClock::at(
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
    )
}

#[test]
fn error_types_are_public() {
    let err = MandalError::UnsupportedMedia {
        url: "https://vimeo.com/1".into(),
    };
    assert!(err.to_string().contains("vimeo"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> mandal::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use mandal::cli::{Cli, Commands};

    let cli = Cli::parse_from(["mandal", "history", "--search", "calm"]);
    if let Some(Commands::History(args)) = cli.command {
        assert_eq!(args.search.as_deref(), Some("calm"));
    } else {
        panic!("Expected History command");
    }
}

#[test]
fn store_persists_across_reopen() {
    let temp = TempDir::new().unwrap();
    {
        let mut store = Store::open(Persistence::in_dir(temp.path()), Default::default())
            .with_clock(noon(2024, 3, 3));
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        store
            .create_challenge(Challenge::new("Spring", start, 48).unwrap())
            .unwrap();
        store.add_session_now("first");
    }

    let store = Store::open(Persistence::in_dir(temp.path()), Default::default());
    assert_eq!(store.state().sessions.len(), 1);
    assert_eq!(store.state().sessions[0].notes, "first");
    assert_eq!(
        store.state().active_challenge.as_ref().map(|c| c.name.as_str()),
        Some("Spring")
    );
}

#[test]
fn observers_see_every_change() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut store = Store::in_memory().with_clock(noon(2024, 3, 3));
    store.subscribe(move |state: &mandal::state::AppState| -> anyhow::Result<()> {
        sink.borrow_mut().push(state.sessions.len());
        Ok(())
    });

    store.add_session_now("a");
    store.add_session_now("b");
    store.toggle_sort_order();

    assert_eq!(*seen.borrow(), vec![1, 2, 2]);
}

#[test]
fn export_and_import_through_files() {
    let temp = TempDir::new().unwrap();
    let mut store = Store::in_memory().with_clock(noon(2024, 3, 3));
    store.add_session_now("exported");
    store.set_user_name("Asha").unwrap();

    let file = temp.path().join("meditation_data.json");
    export_state(&file, &store.snapshot()).unwrap();

    let mut fresh = Store::in_memory();
    fresh.import_state(read_import(&file).unwrap());

    assert_eq!(fresh.state().user_name, "Asha");
    assert_eq!(fresh.state().sessions[0].notes, "exported");
}

#[test]
fn streak_and_weekly_stats_from_store() {
    let mut store = Store::in_memory().with_clock(noon(2024, 3, 6));
    for day in 4..=6 {
        let date = NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        store.add_session(mandal::state::NewSession::on_day(
            date,
            mandal::state::Period::Morning,
            600,
        ));
    }

    assert_eq!(store.calculate_streak(), 3);
    let weekly = store.weekly_stats();
    assert_eq!(weekly.sessions_count, 3);
    assert_eq!(weekly.total_seconds, 1800);
}
