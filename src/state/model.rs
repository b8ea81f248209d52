//! Tracker state model.
//!
//! [`AppState`] is the root aggregate persisted to the state slot. Keys are
//! serialized in camelCase and every field has a serde default, so partial
//! or older documents still load.

use chrono::{DateTime, Days, Local, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::SessionId;
use crate::clock::local_from_naive;
use crate::error::{MandalError, Result};

/// Default display name before the user sets one.
pub const DEFAULT_USER_NAME: &str = "Your Name";

/// The whole tracker state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// The running challenge, if any.
    #[serde(default, alias = "activeMandal")]
    pub active_challenge: Option<Challenge>,

    /// Completed sessions in the order they were recorded.
    #[serde(default)]
    pub sessions: Vec<Session>,

    /// History display order.
    #[serde(default = "default_sort_ascending")]
    pub sort_ascending: bool,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default = "default_user_name")]
    pub user_name: String,

    /// Whether a timed session is in progress.
    #[serde(default)]
    pub timer_running: bool,

    /// Elapsed seconds of the timed session in progress.
    #[serde(default)]
    pub timer_seconds: u64,

    #[serde(default)]
    pub playlists: Playlists,

    /// Streak as of the last session change.
    #[serde(default)]
    pub current_streak: u32,
}

fn default_sort_ascending() -> bool {
    true
}

fn default_user_name() -> String {
    DEFAULT_USER_NAME.to_string()
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            active_challenge: None,
            sessions: Vec::new(),
            sort_ascending: true,
            theme: Theme::Light,
            user_name: default_user_name(),
            timer_running: false,
            timer_seconds: 0,
            playlists: Playlists::default(),
            current_streak: 0,
        }
    }
}

impl AppState {
    /// Find a session by id.
    pub fn session(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == *id)
    }

    /// Position of a session in recording order.
    pub fn session_position(&self, id: &SessionId) -> Option<usize> {
        self.sessions.iter().position(|s| s.id == *id)
    }
}

/// A fixed-length practice commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub name: String,

    #[serde(deserialize_with = "revive_date")]
    pub start_date: NaiveDate,

    /// Always `start_date + duration` days.
    #[serde(deserialize_with = "revive_date")]
    pub end_date: NaiveDate,

    /// Length in days.
    pub duration: u32,
}

impl Challenge {
    /// Build a challenge, validating the name and length.
    pub fn new(name: &str, start_date: NaiveDate, duration: u32) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MandalError::InvalidInput {
                message: "Please enter a valid Mandal name.".to_string(),
            });
        }
        if duration == 0 {
            return Err(MandalError::InvalidInput {
                message: "A Mandal must last at least one day.".to_string(),
            });
        }

        let end_date = start_date
            .checked_add_days(Days::new(u64::from(duration)))
            .ok_or_else(|| MandalError::InvalidInput {
                message: format!("{} days from {} is out of range", duration, start_date),
            })?;

        Ok(Self {
            name: name.to_string(),
            start_date,
            end_date,
            duration,
        })
    }

    /// Whether `date` falls inside the challenge window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date < self.end_date
    }
}

/// Accepts both `2024-03-01` and full timestamps such as
/// `2024-03-01T00:00:00.000Z`, keeping the calendar date as written.
fn revive_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let date_part = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| serde::de::Error::custom(format!("invalid date '{}': {}", raw, e)))
}

/// One completed sitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Generated for documents written before ids existed.
    #[serde(default)]
    pub id: SessionId,

    pub date: DateTime<Local>,

    /// Length in seconds.
    pub duration: u64,

    #[serde(default)]
    pub notes: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

impl Session {
    /// The recorded period, or the one implied by the time of day.
    pub fn display_period(&self) -> Period {
        self.period.unwrap_or_else(|| Period::from_time(&self.date))
    }

    /// Calendar day of the session in local time.
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

/// Input for recording a session; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSession {
    pub date: DateTime<Local>,
    pub duration: u64,
    pub notes: String,
    pub period: Option<Period>,
}

impl NewSession {
    /// A session with empty notes and no explicit period.
    pub fn new(date: DateTime<Local>, duration: u64) -> Self {
        Self {
            date,
            duration,
            notes: String::new(),
            period: None,
        }
    }

    /// A back-filled session at the period's default hour on `day`.
    pub fn on_day(day: NaiveDate, period: Period, duration: u64) -> Self {
        let date = day
            .and_hms_opt(period.default_hour(), 0, 0)
            .map(local_from_naive)
            .unwrap_or_else(|| local_from_naive(day.and_time(NaiveTime::MIN)));
        Self::new(date, duration).with_period(period)
    }

    /// Set the period.
    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    /// Set the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub(crate) fn into_session(self) -> Session {
        Session {
            id: SessionId::new(),
            date: self.date,
            duration: self.duration,
            notes: self.notes,
            period: self.period,
        }
    }
}

/// Time of day a session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    Morning,
    Evening,
}

impl Period {
    /// Hour used when back-filling a morning session.
    pub const MORNING_HOUR: u32 = 8;
    /// Hour used when back-filling an evening session.
    pub const EVENING_HOUR: u32 = 20;

    /// Morning before noon, evening after.
    pub fn from_time(date: &DateTime<Local>) -> Self {
        if date.hour() < 12 {
            Self::Morning
        } else {
            Self::Evening
        }
    }

    /// Default hour for a back-filled session in this period.
    pub fn default_hour(&self) -> u32 {
        match self {
            Self::Morning => Self::MORNING_HOUR,
            Self::Evening => Self::EVENING_HOUR,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Morning => write!(f, "Morning"),
            Self::Evening => write!(f, "Evening"),
        }
    }
}

/// Display theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

/// Recognized playlist providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaylistKind {
    Youtube,
    Soundcloud,
}

impl PlaylistKind {
    /// All kinds in display order.
    pub const ALL: [PlaylistKind; 2] = [PlaylistKind::Youtube, PlaylistKind::Soundcloud];

    /// Key used in the persisted document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Youtube => "youtube",
            Self::Soundcloud => "soundcloud",
        }
    }

    /// Provider name for messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Youtube => "YouTube",
            Self::Soundcloud => "SoundCloud",
        }
    }
}

impl fmt::Display for PlaylistKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlaylistKind {
    type Err = MandalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "youtube" => Ok(Self::Youtube),
            "soundcloud" => Ok(Self::Soundcloud),
            _ => Err(MandalError::InvalidPlaylistType {
                kind: s.to_string(),
            }),
        }
    }
}

/// A linked track or video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub url: String,
    pub title: String,
}

/// Both playlists.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Playlists {
    #[serde(default)]
    pub youtube: Vec<PlaylistEntry>,
    #[serde(default)]
    pub soundcloud: Vec<PlaylistEntry>,
}

impl Playlists {
    /// Entries of one playlist.
    pub fn entries(&self, kind: PlaylistKind) -> &[PlaylistEntry] {
        match kind {
            PlaylistKind::Youtube => &self.youtube,
            PlaylistKind::Soundcloud => &self.soundcloud,
        }
    }

    pub(crate) fn entries_mut(&mut self, kind: PlaylistKind) -> &mut Vec<PlaylistEntry> {
        match kind {
            PlaylistKind::Youtube => &mut self.youtube,
            PlaylistKind::Soundcloud => &mut self.soundcloud,
        }
    }
}
