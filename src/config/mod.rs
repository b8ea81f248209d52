//! Settings loading for Mandal.
//!
//! - Schema definitions in [`schema`]
//! - Data directory discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use mandal::config::load_settings;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("config.yml"), "tick_millis: 250").unwrap();
//!
//! let settings = load_settings(temp.path()).unwrap();
//! assert_eq!(settings.tick_millis, 250);
//! assert_eq!(settings.session_seconds, 873);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{data_dir, load_settings, parse_settings, CONFIG_FILE_NAME};
pub use schema::Settings;
