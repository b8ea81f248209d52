//! Settings schema.
//!
//! Maps to `config.yml` in the data directory. Every key is optional.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Length of one timed session, in seconds.
    pub session_seconds: u64,

    /// Default challenge length, in days.
    pub challenge_days: u32,

    /// Maximum entries per playlist.
    pub playlist_capacity: usize,

    /// Interval between timer ticks, in milliseconds.
    pub tick_millis: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            session_seconds: 873,
            challenge_days: 48,
            playlist_capacity: 3,
            tick_millis: 1000,
        }
    }
}

impl Settings {
    /// Tick interval as a duration.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }

    /// Names of settings whose values are unusable.
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.session_seconds == 0 {
            fields.push("session_seconds");
        }
        if self.challenge_days == 0 {
            fields.push("challenge_days");
        }
        if self.playlist_capacity == 0 {
            fields.push("playlist_capacity");
        }
        if self.tick_millis == 0 {
            fields.push("tick_millis");
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_practice_rules() {
        let settings = Settings::default();
        assert_eq!(settings.session_seconds, 873);
        assert_eq!(settings.challenge_days, 48);
        assert_eq!(settings.playlist_capacity, 3);
        assert_eq!(settings.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let settings: Settings = serde_yaml::from_str("tick_millis: 5").unwrap();
        assert_eq!(settings.tick_millis, 5);
        assert_eq!(settings.session_seconds, 873);
    }

    #[test]
    fn empty_yaml_is_default() {
        let settings: Settings = serde_yaml::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn invalid_fields_lists_zeroes() {
        let settings = Settings {
            session_seconds: 0,
            tick_millis: 0,
            ..Default::default()
        };
        assert_eq!(
            settings.invalid_fields(),
            vec!["session_seconds", "tick_millis"]
        );
        assert!(Settings::default().invalid_fields().is_empty());
    }
}
