//! Mandal - Meditation challenge tracker.
//!
//! Mandal tracks a fixed-length meditation challenge (a "Mandal"), records
//! morning and evening sessions, runs a session timer, and keeps two small
//! playlists of YouTube videos and SoundCloud tracks.
//!
//! # Modules
//!
//! - [`bus`] - Observer registry notified after every state change
//! - [`cli`] - Command-line interface and argument parsing
//! - [`clock`] - Wall-clock abstraction for deterministic tests
//! - [`config`] - Data directory discovery and settings loading
//! - [`error`] - Error types and result aliases
//! - [`media`] - YouTube and SoundCloud link parsing
//! - [`persistence`] - Durable storage and JSON export/import
//! - [`state`] - Application state model and the state store
//! - [`stats`] - Streak, weekly statistics, note search and progress
//! - [`timer`] - Background session timer
//! - [`ui`] - Interactive prompts, progress bar, and terminal output
//!
//! # Example
//!
//! ```
//! use mandal::media::MediaLink;
//! use mandal::state::PlaylistKind;
//!
//! let link = MediaLink::parse("https://youtu.be/dQw4w9WgXcQ?t=42").unwrap();
//! assert_eq!(link.kind(), PlaylistKind::Youtube);
//! assert_eq!(link.title(), "YouTube Video: dQw4w9WgXcQ");
//! ```

pub mod bus;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod media;
pub mod persistence;
pub mod state;
pub mod stats;
pub mod timer;
pub mod ui;

pub use error::{MandalError, Result};
