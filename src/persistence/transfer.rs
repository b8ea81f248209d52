//! Export and import of the full state as a standalone JSON document.

use std::fs;
use std::path::Path;

use crate::error::{MandalError, Result};
use crate::state::{AppState, StateUpdate};

/// Default file name for exports.
pub const EXPORT_FILE_NAME: &str = "meditation_data.json";

/// Write `state` as pretty-printed JSON to `path`.
pub fn export_state(path: &Path, state: &AppState) -> Result<()> {
    let json = serde_json::to_string_pretty(state).map_err(|e| MandalError::StateParse {
        message: format!("Failed to serialize state: {}", e),
    })?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, json)?;

    Ok(())
}

/// Read an exported document as a partial update.
///
/// Keys missing from the document are left as `None` so merging keeps the
/// current values.
pub fn read_import(path: &Path) -> Result<StateUpdate> {
    let content = fs::read_to_string(path)?;
    parse_import(&content)
}

/// Parse an exported document held in memory.
pub fn parse_import(content: &str) -> Result<StateUpdate> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| MandalError::StateParse {
            message: e.to_string(),
        })?;

    if !value.is_object() {
        return Err(MandalError::StateParse {
            message: "Imported data must be a JSON object".to_string(),
        });
    }

    let update: StateUpdate =
        serde_json::from_value(value).map_err(|e| MandalError::StateParse {
            message: e.to_string(),
        })?;

    if let Some(Some(challenge)) = &update.active_challenge {
        if challenge.duration == 0 {
            return Err(MandalError::StateParse {
                message: format!("Mandal '{}' must last at least one day", challenge.name),
            });
        }
    }

    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Challenge, Theme};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn export_then_import_restores_state() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(EXPORT_FILE_NAME);

        let mut state = AppState::default();
        state.active_challenge = Some(
            Challenge::new("Spring", NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), 48).unwrap(),
        );
        state.theme = Theme::Dark;

        export_state(&path, &state).unwrap();
        let update = read_import(&path).unwrap();

        assert_eq!(AppState::default().merged(update), state);
    }

    #[test]
    fn export_is_pretty_printed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out").join(EXPORT_FILE_NAME);

        export_state(&path, &AppState::default()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains('\n'));
        assert!(content.contains("\"userName\": \"Your Name\""));
    }

    #[test]
    fn import_partial_document() {
        let update = parse_import(r#"{"userName": "Asha"}"#).unwrap();
        assert_eq!(update.user_name.as_deref(), Some("Asha"));
        assert!(update.sessions.is_none());
        assert!(update.active_challenge.is_none());
    }

    #[test]
    fn import_ignores_unknown_keys() {
        let update = parse_import(r#"{"somethingElse": 3, "theme": "dark"}"#).unwrap();
        assert_eq!(update.theme, Some(Theme::Dark));
    }

    #[test]
    fn import_rejects_malformed_json() {
        let err = parse_import("{oops").unwrap_err();
        assert!(matches!(err, MandalError::StateParse { .. }));
    }

    #[test]
    fn import_rejects_non_object() {
        let err = parse_import("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, MandalError::StateParse { .. }));
    }

    #[test]
    fn import_rejects_wrong_field_types() {
        let err = parse_import(r#"{"sessions": "nope"}"#).unwrap_err();
        assert!(matches!(err, MandalError::StateParse { .. }));
    }

    #[test]
    fn import_browser_export_keeps_mandal() {
        let document = r#"{
            "activeMandal": {
                "name": "Spring",
                "startDate": "2024-03-01T00:00:00.000Z",
                "endDate": "2024-04-18T00:00:00.000Z",
                "duration": 48
            },
            "sessions": [
                {"date": "2024-03-02T08:00:00.000Z", "duration": 873, "notes": "calm"}
            ],
            "sortAscending": true,
            "theme": "light",
            "timerRunning": false,
            "timerSeconds": 0,
            "userName": "Your Name",
            "playlists": {"youtube": [], "soundcloud": []}
        }"#;

        let state = AppState::default().merged(parse_import(document).unwrap());

        let challenge = state.active_challenge.expect("challenge survives import");
        assert_eq!(challenge.name, "Spring");
        assert_eq!(challenge.start_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(challenge.end_date, NaiveDate::from_ymd_opt(2024, 4, 18).unwrap());
        assert_eq!(state.sessions.len(), 1);
        assert_eq!(state.sessions[0].notes, "calm");
    }

    #[test]
    fn import_rejects_zero_day_mandal() {
        let document = r#"{"activeChallenge": {
            "name": "Blink",
            "startDate": "2024-03-01",
            "endDate": "2024-03-01",
            "duration": 0
        }}"#;

        let err = parse_import(document).unwrap_err();
        assert!(matches!(err, MandalError::StateParse { ref message } if message.contains("Blink")));
    }

    #[test]
    fn import_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = read_import(&temp.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, MandalError::Io(_)));
    }
}
