//! Data directory discovery and settings loading.

use crate::config::schema::Settings;
use crate::error::{MandalError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.yml";

/// Directory name under the platform data directory.
const APP_DIR_NAME: &str = "mandal";

/// Resolve the data directory.
///
/// An explicit override wins; otherwise the platform's local data directory
/// (`~/.local/share/mandal` on Linux), falling back to `~/.mandal`.
pub fn data_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }

    if let Some(base) = dirs::data_local_dir() {
        return Ok(base.join(APP_DIR_NAME));
    }

    dirs::home_dir()
        .map(|home| home.join(format!(".{}", APP_DIR_NAME)))
        .ok_or_else(|| MandalError::InvalidInput {
            message: "Could not determine a data directory; pass --data-dir".to_string(),
        })
}

/// Load settings from `config.yml` in `data_dir`.
///
/// A missing file yields the defaults.
///
/// # Errors
///
/// Returns `ConfigParseError` if the YAML is invalid or a value is unusable.
pub fn load_settings(data_dir: &Path) -> Result<Settings> {
    let path = data_dir.join(CONFIG_FILE_NAME);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(e) => return Err(MandalError::Io(e)),
    };

    parse_settings(&content, &path)
}

/// Parse YAML content into Settings.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_settings(content: &str, source_path: &Path) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    let settings: Settings =
        serde_yaml::from_str(content).map_err(|e| MandalError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;

    let invalid = settings.invalid_fields();
    if !invalid.is_empty() {
        return Err(MandalError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: format!("must be greater than zero: {}", invalid.join(", ")),
        });
    }

    Ok(settings)
}
