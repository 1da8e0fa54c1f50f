//! Tracker state persistence.
//!
//! One small JSON file per Kimai host, so switching instances never mixes
//! their thresholds. Reading is forgiving: anything that is not a valid
//! record is treated as "no prior state" and the tracker starts over.

use std::path::{Path, PathBuf};

use super::data_dir;
use crate::config::KimaiConfig;
use crate::error::{CoreError, StateError};
use crate::tracker::TrackerState;

#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Store backed by an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for the configured Kimai instance, `<data_dir>/<host>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL has no host or the data directory cannot
    /// be determined.
    pub fn for_service(kimai: &KimaiConfig) -> Result<Self, CoreError> {
        let host = kimai.host()?;
        Ok(Self::at(data_dir()?.join(host)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted state, `None` if missing or unreadable.
    pub fn load(&self) -> Option<TrackerState> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No tracker state yet");
                return None;
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Cannot read tracker state, starting over");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Tracker state is corrupt, starting over");
                None
            }
        }
    }

    /// Persist `state`, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be encoded or written.
    pub fn save(&self, state: &TrackerState) -> Result<(), StateError> {
        let bytes = serde_json::to_vec(state)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StateError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&self.path, bytes).map_err(|source| StateError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), month = %state.month, "Tracker state saved");
        Ok(())
    }

    /// Delete the persisted state. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be removed.
    pub fn reset(&self) -> Result<(), StateError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "Tracker state reset");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StateError::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
