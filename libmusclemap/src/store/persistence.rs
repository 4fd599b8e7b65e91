//! Where store state lives between runs

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::state::StoreState;
use crate::error::StateError;

/// Current on-disk layout version
const STATE_FILE_VERSION: u32 = 1;

/// Storage backend for the store
///
/// Invoked by the caller after a transition succeeds; the reducer itself
/// never persists anything.
pub trait StatePersistence {
    /// Load the last saved state, or the default state if nothing was saved
    fn load(&self) -> Result<StoreState, StateError>;

    /// Save a state, replacing whatever was saved before
    fn save(&mut self, state: &StoreState) -> Result<(), StateError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct StateFile {
    version: u32,
    state: StoreState,
}

/// JSON file on local disk
#[derive(Debug, Clone)]
pub struct FileStatePersistence {
    path: PathBuf,
}

impl FileStatePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "state.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StatePersistence for FileStatePersistence {
    fn load(&self) -> Result<StoreState, StateError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No state file, starting empty");
            return Ok(StoreState::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let file: StateFile = serde_json::from_str(&content).map_err(|e| StateError::CorruptFile {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        if file.version != STATE_FILE_VERSION {
            tracing::warn!(
                found = file.version,
                expected = STATE_FILE_VERSION,
                "State file version mismatch, reading anyway"
            );
        }
        Ok(file.state)
    }

    fn save(&mut self, state: &StoreState) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = StateFile {
            version: STATE_FILE_VERSION,
            state: state.clone(),
        };
        let content = serde_json::to_string_pretty(&file)?;

        // Write-then-rename so a crash never leaves a half-written state file
        let temp_path = self.temp_path();
        std::fs::write(&temp_path, content)?;
        if let Err(e) = std::fs::rename(&temp_path, &self.path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e.into());
        }

        tracing::debug!(path = %self.path.display(), entries = state.muscle_states.len(), "Saved state");
        Ok(())
    }
}

/// In-memory backend for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryStatePersistence {
    saved: Option<StoreState>,
    fail_saves: bool,
    save_count: usize,
}

impl MemoryStatePersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a previously saved state
    pub fn with_state(state: StoreState) -> Self {
        Self {
            saved: Some(state),
            ..Self::default()
        }
    }

    /// A backend whose saves always fail
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn saved(&self) -> Option<&StoreState> {
        self.saved.as_ref()
    }

    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl StatePersistence for MemoryStatePersistence {
    fn load(&self) -> Result<StoreState, StateError> {
        Ok(self.saved.clone().unwrap_or_default())
    }

    fn save(&mut self, state: &StoreState) -> Result<(), StateError> {
        if self.fail_saves {
            return Err(StateError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "simulated save failure",
            )));
        }
        self.saved = Some(state.clone());
        self.save_count += 1;
        Ok(())
    }
}
