//! Session ID generation and parsing.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A stable session identifier.
///
/// Sessions used to be addressed by their position in the session list,
/// which shifts whenever an earlier session is removed. An id survives
/// deletions and reordering.
///
/// Format: 32 lowercase hex characters (a v4 UUID without hyphens).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Number of characters shown by [`SessionId::short`].
    pub const SHORT_LEN: usize = 8;

    /// Generate a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a session ID, accepting both the plain and hyphenated forms.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s.trim()).ok().map(Self)
    }

    /// Abbreviated form for tables and prompts.
    pub fn short(&self) -> String {
        self.to_string()[..Self::SHORT_LEN].to_string()
    }

    /// Whether the textual form of this ID starts with `prefix`.
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        let prefix = prefix.trim().replace('-', "").to_lowercase();
        !prefix.is_empty() && self.to_string().starts_with(&prefix)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

// Stored as a plain string so the state file stays readable
impl Serialize for SessionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SessionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SessionId::parse(&s).ok_or_else(|| serde::de::Error::custom("Invalid session ID format"))
    }
}
