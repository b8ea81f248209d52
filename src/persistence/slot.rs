//! Storage slots.
//!
//! A slot holds exactly one text blob: the serialized state. There is no
//! history and no versioning; every write replaces the previous blob.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MandalError, Result};

/// A single-value, device-local text store.
pub trait StateSlot {
    /// Read the stored blob, or `None` if nothing has been written yet.
    fn read(&self) -> Result<Option<String>>;

    /// Replace the stored blob.
    fn write(&self, blob: &str) -> Result<()>;

    /// Human-readable location, for messages.
    fn describe(&self) -> String;
}

/// Slot backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// File name of the state slot inside the data directory.
    pub const FILE_NAME: &'static str = "meditation_tracker_state.json";

    /// Create a slot at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The slot inside a data directory.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(Self::FILE_NAME))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, e: impl std::fmt::Display) -> MandalError {
        MandalError::Storage {
            path: self.path.clone(),
            message: e.to_string(),
        }
    }
}

impl StateSlot for FileSlot {
    fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&self.path)
            .map(Some)
            .map_err(|e| self.storage_error(e))
    }

    /// Uses the write-to-temp-then-rename pattern so a crash mid-write never
    /// leaves a truncated state file behind.
    fn write(&self, blob: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.storage_error(e))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, blob).map_err(|e| self.storage_error(e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| self.storage_error(e))?;

        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Slot kept in memory, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySlot {
    blob: RefCell<Option<String>>,
}

impl MemorySlot {
    /// An empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot pre-filled with a blob.
    pub fn with_blob(blob: &str) -> Self {
        Self {
            blob: RefCell::new(Some(blob.to_string())),
        }
    }

    /// Current contents.
    pub fn contents(&self) -> Option<String> {
        self.blob.borrow().clone()
    }
}

impl StateSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.blob.borrow().clone())
    }

    fn write(&self, blob: &str) -> Result<()> {
        *self.blob.borrow_mut() = Some(blob.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

impl<T: StateSlot + ?Sized> StateSlot for std::rc::Rc<T> {
    fn read(&self) -> Result<Option<String>> {
        (**self).read()
    }

    fn write(&self, blob: &str) -> Result<()> {
        (**self).write(blob)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
