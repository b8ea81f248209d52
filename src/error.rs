//! Error types for Mandal operations.
//!
//! This module defines [`MandalError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `MandalError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `MandalError::Other`) for unexpected errors
//! - Conditions the user can fix (full playlist, bad input) carry a message
//!   that can be shown as-is

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Mandal operations.
#[derive(Debug, Error)]
pub enum MandalError {
    /// A challenge is already running and must be cleared first.
    #[error("An active Mandal already exists ('{name}'). Please complete or clear it before creating a new one.")]
    ChallengeAlreadyActive { name: String },

    /// An operation needed an active challenge but there is none.
    #[error("No active Mandal. Create one to start tracking.")]
    NoActiveChallenge,

    /// No session carries the given identifier.
    #[error("Session not found: {id}")]
    SessionNotFound { id: String },

    /// Positional session access outside the current session list.
    #[error("Session #{index} does not exist ({len} sessions recorded)")]
    SessionIndexOutOfRange { index: usize, len: usize },

    /// Playlist kind is not one of the recognized providers.
    #[error("Invalid playlist type: {kind}")]
    InvalidPlaylistType { kind: String },

    /// Playlist removal index outside the playlist.
    #[error("No entry #{index} in the {kind} playlist ({len} entries)")]
    PlaylistIndexOutOfRange {
        kind: String,
        index: usize,
        len: usize,
    },

    /// User input failed validation.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// URL could not be parsed or lacks a required identifier.
    #[error("Invalid media URL: {message}")]
    InvalidMediaUrl { message: String },

    /// URL is well-formed but the host is not a supported provider.
    #[error("Unsupported media URL: {url}. Please enter a YouTube or SoundCloud URL.")]
    UnsupportedMedia { url: String },

    /// Reading or writing the persisted state failed.
    #[error("Storage error at {path}: {message}")]
    Storage { path: PathBuf, message: String },

    /// The persisted or imported document is not valid state JSON.
    #[error("Failed to parse state: {message}")]
    StateParse { message: String },

    /// Failed to parse the settings file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Mandal operations.
pub type Result<T> = std::result::Result<T, MandalError>;
