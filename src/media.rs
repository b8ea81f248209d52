//! Media link classification.
//!
//! Recognizes YouTube and SoundCloud URLs, extracts the identifiers needed
//! to title a playlist entry, and derives the provider's embed URLs.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{MandalError, Result};
use crate::state::PlaylistKind;

/// Length of a YouTube video id.
const YOUTUBE_ID_LEN: usize = 11;

/// Scheme, host and path of an absolute URL.
static URL_PARTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://(?:[^@/?#]*@)?([^/?#:]+)(?::\d+)?([^?#]*)")
        .expect("URL_PARTS must compile")
});

/// Video id after any of the known YouTube path or query prefixes.
static YOUTUBE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(youtu.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*")
        .expect("YOUTUBE_ID must compile")
});

static YOUTUBE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]t=(\d+)").expect("YOUTUBE_START must compile"));

/// A recognized media link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaLink {
    YouTube {
        url: String,
        video_id: String,
        /// Offset from the `t=` parameter, 0 if absent.
        start_seconds: u64,
    },
    SoundCloud {
        url: String,
        /// Last path segment of the track URL.
        slug: String,
    },
}

impl MediaLink {
    /// Classify a URL.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for an empty string
    /// - `InvalidMediaUrl` for text that is not an absolute URL, or a
    ///   YouTube URL without a usable video id
    /// - `UnsupportedMedia` for any other host
    pub fn parse(raw: &str) -> Result<Self> {
        let url = raw.trim();
        if url.is_empty() {
            return Err(MandalError::InvalidInput {
                message: "Please enter a valid URL.".to_string(),
            });
        }

        let parts = URL_PARTS
            .captures(url)
            .ok_or_else(|| MandalError::InvalidMediaUrl {
                message: format!("'{}' is not a valid URL", url),
            })?;
        let host = parts[1].to_lowercase();
        let path = parts.get(2).map_or("", |m| m.as_str());

        if host.contains("youtube.com") || host.contains("youtu.be") {
            let video_id = extract_youtube_id(url).ok_or_else(|| MandalError::InvalidMediaUrl {
                message: "Invalid YouTube URL. Please check and try again.".to_string(),
            })?;
            return Ok(Self::YouTube {
                url: url.to_string(),
                video_id,
                start_seconds: extract_start_seconds(url),
            });
        }

        if host.contains("soundcloud.com") {
            let slug = path.rsplit('/').next().unwrap_or_default().to_string();
            return Ok(Self::SoundCloud {
                url: url.to_string(),
                slug,
            });
        }

        Err(MandalError::UnsupportedMedia {
            url: url.to_string(),
        })
    }

    /// Playlist the link belongs in.
    pub fn kind(&self) -> PlaylistKind {
        match self {
            Self::YouTube { .. } => PlaylistKind::Youtube,
            Self::SoundCloud { .. } => PlaylistKind::Soundcloud,
        }
    }

    /// The link as entered.
    pub fn url(&self) -> &str {
        match self {
            Self::YouTube { url, .. } | Self::SoundCloud { url, .. } => url,
        }
    }

    /// Title for the playlist entry.
    pub fn title(&self) -> String {
        match self {
            Self::YouTube { video_id, .. } => format!("YouTube Video: {}", video_id),
            Self::SoundCloud { slug, .. } => format!("SoundCloud Track: {}", slug),
        }
    }

    /// Provider player URL.
    pub fn embed_url(&self) -> String {
        match self {
            Self::YouTube { video_id, .. } => {
                format!("https://www.youtube-nocookie.com/embed/{}", video_id)
            }
            Self::SoundCloud { url, .. } => format!(
                "https://w.soundcloud.com/player/?url={}",
                encode_uri_component(url)
            ),
        }
    }

    /// Player URL that starts playback at the linked offset.
    pub fn play_url(&self) -> String {
        match self {
            Self::YouTube { start_seconds, .. } => {
                format!("{}?autoplay=1&start={}", self.embed_url(), start_seconds)
            }
            Self::SoundCloud { .. } => self.embed_url(),
        }
    }

    /// Preview image, YouTube only.
    pub fn thumbnail_url(&self) -> Option<String> {
        match self {
            Self::YouTube { video_id, .. } => {
                Some(format!("https://img.youtube.com/vi/{}/0.jpg", video_id))
            }
            Self::SoundCloud { .. } => None,
        }
    }
}

/// Extract an 11-character YouTube video id.
pub fn extract_youtube_id(url: &str) -> Option<String> {
    let caps = YOUTUBE_ID.captures(url)?;
    let id = caps.get(2)?.as_str();
    (id.chars().count() == YOUTUBE_ID_LEN).then(|| id.to_string())
}

/// Extract the `t=` start offset, 0 if absent.
pub fn extract_start_seconds(url: &str) -> u64 {
    YOUTUBE_START
        .captures(url)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}

/// Percent-encode everything outside the URI component unreserved set.
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
