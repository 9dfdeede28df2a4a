//! Content loaders for reading world data from files.
//!
//! This module provides loaders that convert RON/TOML files into world-core
//! snapshot and configuration types.

pub mod config;
pub mod room;

pub use config::ConfigLoader;
pub use room::RoomLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
