//! State persistence.
//!
//! [`Persistence`] turns [`AppState`] into one JSON blob and back, reading
//! and writing it through a [`StateSlot`]. Dates come back as real
//! `chrono` values because deserialization goes through the typed model.
//!
//! The [`transfer`] submodule covers the standalone export/import file.

pub mod slot;
pub mod transfer;

pub use slot::{FileSlot, MemorySlot, StateSlot};
pub use transfer::{export_state, read_import, EXPORT_FILE_NAME};

use crate::error::{MandalError, Result};
use crate::state::AppState;

/// Serializes state into a slot and back.
pub struct Persistence {
    slot: Box<dyn StateSlot>,
}

impl Persistence {
    /// Persist through the given slot.
    pub fn new(slot: impl StateSlot + 'static) -> Self {
        Self {
            slot: Box::new(slot),
        }
    }

    /// Persist to the state file inside `data_dir`.
    pub fn in_dir(data_dir: &std::path::Path) -> Self {
        Self::new(FileSlot::in_dir(data_dir))
    }

    /// Persist to memory only.
    pub fn in_memory() -> Self {
        Self::new(MemorySlot::new())
    }

    /// Where the state is stored.
    pub fn location(&self) -> String {
        self.slot.describe()
    }

    /// Write the full state.
    pub fn save(&self, state: &AppState) -> Result<()> {
        let blob = serde_json::to_string(state).map_err(|e| MandalError::StateParse {
            message: format!("Failed to serialize state: {}", e),
        })?;
        self.slot.write(&blob)
    }

    /// Read the stored state, `None` if the slot is empty.
    pub fn load(&self) -> Result<Option<AppState>> {
        let Some(blob) = self.slot.read()? else {
            return Ok(None);
        };
        if blob.trim().is_empty() {
            return Ok(None);
        }

        let state = serde_json::from_str(&blob).map_err(|e| MandalError::StateParse {
            message: e.to_string(),
        })?;
        Ok(Some(state))
    }
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("slot", &self.slot.describe())
            .finish()
    }
}
