//! The tracker state store.
//!
//! [`Store`] owns the single [`AppState`] value. Every mutation builds a
//! [`StateUpdate`], merges it into a fresh snapshot, persists the result and
//! notifies observers. Snapshots handed out earlier are never modified.

use std::sync::Arc;

use crate::bus::{NotificationBus, NotifyReport, Observer, SubscriptionId};
use crate::clock::{Clock, SystemClock};
use crate::config::Settings;
use crate::error::{MandalError, Result};
use crate::media::MediaLink;
use crate::persistence::Persistence;
use crate::stats::{self, ChallengeProgress, WeeklyStats};

use super::{
    AppState, Challenge, NewSession, PlaylistEntry, PlaylistKind, Session, SessionId,
    StateUpdate, Theme,
};

/// Result of adding to a playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistOutcome {
    Added { kind: PlaylistKind },
    /// The playlist is at capacity; nothing changed.
    Full { kind: PlaylistKind, capacity: usize },
}

impl PlaylistOutcome {
    /// Message for the user.
    pub fn notice(&self) -> String {
        match self {
            Self::Added { kind } => format!("Added to {} playlist successfully.", kind),
            Self::Full { kind, .. } => format!(
                "{} playlist is full. Remove an item before adding a new one.",
                capitalize(kind.as_str())
            ),
        }
    }

    /// Whether the entry was added.
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added { .. })
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// What the timer should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// The session length has been reached.
    Complete,
}

/// Single source of truth for tracker state.
pub struct Store {
    state: Arc<AppState>,
    persistence: Persistence,
    bus: NotificationBus,
    clock: Box<dyn Clock>,
    settings: Settings,
    storage_warning: Option<String>,
}

impl Store {
    /// Open a store backed by `persistence`, loading any saved state.
    ///
    /// A missing slot yields the default state. An unreadable or corrupt
    /// slot is logged, kept as a storage warning, and also yields the
    /// default state.
    pub fn open(persistence: Persistence, settings: Settings) -> Self {
        let mut storage_warning = None;
        let mut state = match persistence.load() {
            Ok(Some(state)) => {
                tracing::debug!(
                    sessions = state.sessions.len(),
                    "Loaded state from {}",
                    persistence.location()
                );
                state
            }
            Ok(None) => {
                tracing::debug!("No saved state at {}", persistence.location());
                AppState::default()
            }
            Err(e) => {
                tracing::error!("Failed to load state: {}", e);
                storage_warning = Some(format!(
                    "Could not load saved data ({}); starting fresh.",
                    e
                ));
                AppState::default()
            }
        };

        // A timer never survives the process that ran it
        if state.timer_running {
            tracing::debug!("Clearing stale running timer");
            state.timer_running = false;
        }

        Self {
            state: Arc::new(state),
            persistence,
            bus: NotificationBus::new(),
            clock: Box::new(SystemClock),
            settings,
            storage_warning,
        }
    }

    /// A store that keeps state in memory only.
    pub fn in_memory() -> Self {
        Self::open(Persistence::in_memory(), Settings::default())
    }

    /// Replace the clock used for date logic.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // --- Observation ---

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// Borrow the current state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Active settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Register an observer for every future change.
    pub fn subscribe(&mut self, observer: impl Observer + 'static) -> SubscriptionId {
        self.bus.subscribe(observer)
    }

    /// Remove an observer.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Take the most recent storage problem, if any.
    pub fn take_storage_warning(&mut self) -> Option<String> {
        self.storage_warning.take()
    }

    /// Where state is persisted.
    pub fn location(&self) -> String {
        self.persistence.location()
    }

    // --- Core mutation ---

    /// Merge `update` into a new snapshot, persist it and notify observers.
    ///
    /// A persistence failure is logged and kept as a storage warning;
    /// observers are notified regardless.
    pub fn set_state(&mut self, update: StateUpdate) -> NotifyReport {
        self.state = Arc::new(self.state.merged(update));

        if let Err(e) = self.persistence.save(&self.state) {
            tracing::error!("Failed to save state: {}", e);
            self.storage_warning = Some(format!("Your changes could not be saved: {}", e));
        }

        self.bus.notify(&self.state)
    }

    fn streak_after(&self, sessions: &[Session]) -> u32 {
        stats::streak(sessions, self.clock.today())
    }

    fn set_sessions(&mut self, sessions: Vec<Session>) {
        let current_streak = self.streak_after(&sessions);
        self.set_state(StateUpdate {
            sessions: Some(sessions),
            current_streak: Some(current_streak),
            ..Default::default()
        });
    }

    // --- Challenge ---

    /// Start a challenge. Sessions from any earlier challenge are dropped.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeAlreadyActive` if a challenge is running.
    pub fn create_challenge(&mut self, challenge: Challenge) -> Result<()> {
        if let Some(active) = &self.state.active_challenge {
            return Err(MandalError::ChallengeAlreadyActive {
                name: active.name.clone(),
            });
        }

        tracing::debug!(
            name = %challenge.name,
            start = %challenge.start_date,
            days = challenge.duration,
            "Creating challenge"
        );
        self.set_state(StateUpdate {
            active_challenge: Some(Some(challenge)),
            sessions: Some(Vec::new()),
            current_streak: Some(0),
            ..Default::default()
        });
        Ok(())
    }

    /// End the active challenge. Recorded sessions are kept.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveChallenge` if nothing is running.
    pub fn clear_challenge(&mut self) -> Result<Challenge> {
        let challenge = self
            .state
            .active_challenge
            .clone()
            .ok_or(MandalError::NoActiveChallenge)?;

        tracing::debug!(name = %challenge.name, "Clearing challenge");
        self.set_state(StateUpdate {
            active_challenge: Some(None),
            ..Default::default()
        });
        Ok(challenge)
    }

    // --- Sessions ---

    /// Append a session and recompute the streak.
    pub fn add_session(&mut self, new_session: NewSession) -> SessionId {
        let session = new_session.into_session();
        let id = session.id;
        tracing::debug!(
            id = %id.short(),
            date = %session.date,
            duration = session.duration,
            "Adding session"
        );

        let mut sessions = self.state.sessions.clone();
        sessions.push(session);
        self.set_sessions(sessions);
        id
    }

    /// Record a full-length session right now.
    pub fn add_session_now(&mut self, notes: &str) -> SessionId {
        let now = self.clock.now();
        self.add_session(
            NewSession::new(now, self.settings.session_seconds)
                .with_period(super::Period::from_time(&now))
                .with_notes(notes),
        )
    }

    /// Remove a session.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` for an unknown id.
    pub fn delete_session(&mut self, id: SessionId) -> Result<Session> {
        let position = self.position_of(id)?;

        let mut sessions = self.state.sessions.clone();
        let removed = sessions.remove(position);
        tracing::debug!(id = %id.short(), "Deleting session");
        self.set_sessions(sessions);
        Ok(removed)
    }

    /// Replace a session's notes.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` for an unknown id.
    pub fn update_session_notes(&mut self, id: SessionId, notes: &str) -> Result<()> {
        let position = self.position_of(id)?;

        let mut sessions = self.state.sessions.clone();
        sessions[position].notes = notes.to_string();
        tracing::debug!(id = %id.short(), "Updating session notes");
        self.set_state(StateUpdate {
            sessions: Some(sessions),
            ..Default::default()
        });
        Ok(())
    }

    /// Id of the session at `index` in recording order.
    ///
    /// # Errors
    ///
    /// Returns `SessionIndexOutOfRange` for a bad index.
    pub fn session_id_at(&self, index: usize) -> Result<SessionId> {
        self.state
            .sessions
            .get(index)
            .map(|s| s.id)
            .ok_or(MandalError::SessionIndexOutOfRange {
                index,
                len: self.state.sessions.len(),
            })
    }

    /// Resolve a full id or a unique id prefix.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` if nothing matches and `InvalidInput` if
    /// the prefix matches more than one session.
    pub fn resolve_session(&self, reference: &str) -> Result<SessionId> {
        if let Some(id) = SessionId::parse(reference) {
            if self.state.session(&id).is_some() {
                return Ok(id);
            }
        }

        let matches: Vec<SessionId> = self
            .state
            .sessions
            .iter()
            .filter(|s| s.id.matches_prefix(reference))
            .map(|s| s.id)
            .collect();

        match matches.as_slice() {
            [id] => Ok(*id),
            [] => Err(MandalError::SessionNotFound {
                id: reference.to_string(),
            }),
            _ => Err(MandalError::InvalidInput {
                message: format!(
                    "Session id '{}' is ambiguous ({} matches); use more characters",
                    reference,
                    matches.len()
                ),
            }),
        }
    }

    fn position_of(&self, id: SessionId) -> Result<usize> {
        self.state
            .session_position(&id)
            .ok_or_else(|| MandalError::SessionNotFound { id: id.to_string() })
    }

    // --- Preferences ---

    /// Flip the history sort order. Returns the new value.
    pub fn toggle_sort_order(&mut self) -> bool {
        let ascending = !self.state.sort_ascending;
        self.set_state(StateUpdate {
            sort_ascending: Some(ascending),
            ..Default::default()
        });
        ascending
    }

    /// Flip the theme. Returns the new theme.
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.state.theme.toggled();
        self.set_state(StateUpdate {
            theme: Some(theme),
            ..Default::default()
        });
        theme
    }

    /// Set the display name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty name.
    pub fn set_user_name(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MandalError::InvalidInput {
                message: "Please enter a name.".to_string(),
            });
        }

        self.set_state(StateUpdate {
            user_name: Some(name.to_string()),
            ..Default::default()
        });
        Ok(())
    }

    // --- Playlists ---

    /// Append an entry to a playlist unless it is full.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPlaylistType` if `kind` is not a known playlist.
    pub fn add_to_playlist(
        &mut self,
        kind: &str,
        url: &str,
        title: &str,
    ) -> Result<PlaylistOutcome> {
        let kind: PlaylistKind = kind.parse()?;
        let capacity = self.settings.playlist_capacity;

        if self.state.playlists.entries(kind).len() >= capacity {
            tracing::debug!(%kind, capacity, "Playlist full");
            return Ok(PlaylistOutcome::Full { kind, capacity });
        }

        let mut playlists = self.state.playlists.clone();
        playlists.entries_mut(kind).push(PlaylistEntry {
            url: url.to_string(),
            title: title.to_string(),
        });
        tracing::debug!(%kind, url, "Adding playlist entry");
        self.set_state(StateUpdate {
            playlists: Some(playlists),
            ..Default::default()
        });
        Ok(PlaylistOutcome::Added { kind })
    }

    /// Remove the entry at `index` from a playlist.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPlaylistType` for an unknown kind and
    /// `PlaylistIndexOutOfRange` for a bad index.
    pub fn remove_from_playlist(&mut self, kind: &str, index: usize) -> Result<PlaylistEntry> {
        let kind: PlaylistKind = kind.parse()?;
        let len = self.state.playlists.entries(kind).len();
        if index >= len {
            return Err(MandalError::PlaylistIndexOutOfRange {
                kind: kind.to_string(),
                index,
                len,
            });
        }

        let mut playlists = self.state.playlists.clone();
        let removed = playlists.entries_mut(kind).remove(index);
        tracing::debug!(%kind, index, "Removing playlist entry");
        self.set_state(StateUpdate {
            playlists: Some(playlists),
            ..Default::default()
        });
        Ok(removed)
    }

    /// Classify a media URL and add it to the matching playlist.
    ///
    /// # Errors
    ///
    /// Returns the classification error for unusable or unsupported URLs.
    pub fn add_media_link(&mut self, url: &str) -> Result<(MediaLink, PlaylistOutcome)> {
        let link = MediaLink::parse(url)?;
        let outcome = self.add_to_playlist(link.kind().as_str(), link.url(), &link.title())?;
        Ok((link, outcome))
    }

    // --- Timer projection ---

    /// Mark a timed session as started at zero seconds.
    pub fn start_timer(&mut self) {
        tracing::debug!("Timer started");
        self.set_state(StateUpdate {
            timer_running: Some(true),
            timer_seconds: Some(0),
            ..Default::default()
        });
    }

    /// Record elapsed seconds from the timer.
    pub fn record_tick(&mut self, seconds: u64) -> TickOutcome {
        self.set_state(StateUpdate {
            timer_seconds: Some(seconds),
            ..Default::default()
        });

        if seconds >= self.settings.session_seconds {
            TickOutcome::Complete
        } else {
            TickOutcome::Continue
        }
    }

    /// Mark the timed session as no longer running.
    pub fn stop_timer(&mut self) {
        tracing::debug!(seconds = self.state.timer_seconds, "Timer stopped");
        self.set_state(StateUpdate {
            timer_running: Some(false),
            ..Default::default()
        });
    }

    /// Record the session produced by a stopped timer.
    ///
    /// The duration is capped at the configured session length.
    pub fn record_timer_session(&mut self, elapsed: u64) -> SessionId {
        let duration = elapsed.min(self.settings.session_seconds);
        self.add_session(NewSession::new(self.clock.now(), duration))
    }

    // --- Import ---

    /// Merge an imported document over the current state.
    ///
    /// Keys missing from the document keep their current values. The
    /// streak is recomputed whenever sessions are imported.
    pub fn import_state(&mut self, mut update: StateUpdate) {
        tracing::debug!(
            sessions = update.sessions.as_ref().map(Vec::len),
            "Importing state"
        );
        if let Some(sessions) = &update.sessions {
            update.current_streak = Some(self.streak_after(sessions));
        }
        self.set_state(update);
    }

    // --- Queries ---

    /// Streak as of today.
    pub fn calculate_streak(&self) -> u32 {
        self.streak_after(&self.state.sessions)
    }

    /// Aggregates over the trailing seven days.
    pub fn weekly_stats(&self) -> WeeklyStats {
        stats::weekly_stats(&self.state.sessions, self.clock.now())
    }

    /// Sessions whose notes contain `query`, ignoring case.
    pub fn search_notes(&self, query: &str) -> Vec<&Session> {
        stats::search_notes(&self.state.sessions, query)
    }

    /// Sessions in the preferred display order.
    pub fn sorted_sessions(&self) -> Vec<&Session> {
        stats::sorted_sessions(&self.state.sessions, self.state.sort_ascending)
    }

    /// Progress through the active challenge, if any.
    pub fn challenge_progress(&self) -> Option<ChallengeProgress> {
        self.state
            .active_challenge
            .as_ref()
            .map(|c| ChallengeProgress::compute(c, &self.state.sessions, self.clock.now()))
    }

    /// The current local time.
    pub fn now(&self) -> chrono::DateTime<chrono::Local> {
        self.clock.now()
    }

    /// Today's date.
    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("persistence", &self.persistence)
            .field("bus", &self.bus)
            .field("settings", &self.settings)
            .finish()
    }
}
