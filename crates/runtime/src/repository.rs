//! Flag registry persistence.
//!
//! The registry is the only state this runtime owns across ticks; snapshots
//! are handed in fresh every tick and never stored.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use world_core::FlagRegistry;

/// Errors surfaced by repository implementations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("flag repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable storage for one player's flag registry.
pub trait FlagRepository {
    /// Loads the stored registry, `None` if nothing was stored yet.
    fn load(&self) -> Result<Option<FlagRegistry>, RepositoryError>;

    /// Stores the registry, replacing any previous state.
    fn store(&self, registry: &FlagRegistry) -> Result<(), RepositoryError>;
}

/// File-based implementation of [`FlagRepository`].
///
/// Stores the registry as one JSON file, written to a temp file first and
/// renamed into place so a crash mid-write never corrupts the stored state.
pub struct FileFlagRepository {
    path: PathBuf,
}

impl FileFlagRepository {
    /// Create a file-backed repository at the given path, creating parent
    /// directories as needed.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FlagRepository for FileFlagRepository {
    fn load(&self) -> Result<Option<FlagRegistry>, RepositoryError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let registry: FlagRegistry = serde_json::from_str(&content)?;
        tracing::debug!(path = %self.path.display(), flags = registry.len(), "flag registry loaded");
        Ok(Some(registry))
    }

    fn store(&self, registry: &FlagRegistry) -> Result<(), RepositoryError> {
        let temp_path = self.path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(registry)?;
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &self.path)?;
        tracing::debug!(path = %self.path.display(), flags = registry.len(), "flag registry stored");
        Ok(())
    }
}

/// In-memory implementation of [`FlagRepository`] for tests and ephemeral
/// hosts.
#[derive(Default)]
pub struct InMemoryFlagRepository {
    stored: Mutex<Option<FlagRegistry>>,
}

impl InMemoryFlagRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlagRepository for InMemoryFlagRepository {
    fn load(&self) -> Result<Option<FlagRegistry>, RepositoryError> {
        let stored = self
            .stored
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(stored.clone())
    }

    fn store(&self, registry: &FlagRegistry) -> Result<(), RepositoryError> {
        let mut stored = self
            .stored
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *stored = Some(registry.clone());
        Ok(())
    }
}
