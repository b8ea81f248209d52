//! Partial state updates.
//!
//! Every store mutation is expressed as a [`StateUpdate`]: only the fields
//! that are `Some` replace the corresponding fields of the current state.
//! Imports deserialize straight into an update, so keys missing from an
//! imported document keep their current values.

use serde::{Deserialize, Deserializer};

use super::{AppState, Challenge, Playlists, Session, Theme};

/// A shallow, field-level patch of [`AppState`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateUpdate {
    /// `Some(None)` clears the challenge; `None` leaves it alone.
    #[serde(default, alias = "activeMandal", deserialize_with = "present")]
    pub active_challenge: Option<Option<Challenge>>,
    pub sessions: Option<Vec<Session>>,
    pub sort_ascending: Option<bool>,
    pub theme: Option<Theme>,
    pub user_name: Option<String>,
    pub timer_running: Option<bool>,
    pub timer_seconds: Option<u64>,
    pub playlists: Option<Playlists>,
    pub current_streak: Option<u32>,
}

/// Distinguishes an explicit `null` from a missing key.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl StateUpdate {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl AppState {
    /// A new state with `update` merged over this one.
    pub fn merged(&self, update: StateUpdate) -> AppState {
        AppState {
            active_challenge: update
                .active_challenge
                .unwrap_or_else(|| self.active_challenge.clone()),
            sessions: update.sessions.unwrap_or_else(|| self.sessions.clone()),
            sort_ascending: update.sort_ascending.unwrap_or(self.sort_ascending),
            theme: update.theme.unwrap_or(self.theme),
            user_name: update.user_name.unwrap_or_else(|| self.user_name.clone()),
            timer_running: update.timer_running.unwrap_or(self.timer_running),
            timer_seconds: update.timer_seconds.unwrap_or(self.timer_seconds),
            playlists: update.playlists.unwrap_or_else(|| self.playlists.clone()),
            current_streak: update.current_streak.unwrap_or(self.current_streak),
        }
    }
}
