//! World configuration loader.

use std::path::Path;

use world_core::{PathOptions, WorldConfig};

use crate::loaders::{LoadResult, read_file};

/// Loader for world configuration from TOML files.
///
/// Missing keys fall back to the platform defaults, so a config file only
/// needs to name its overrides.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<WorldConfig> {
        let content = read_file(path)?;
        Self::from_str(&content)
            .map_err(|e| anyhow::anyhow!("in config file {}: {}", path.display(), e))
    }

    /// Parse config data from TOML text and validate the search ranges.
    pub fn from_str(content: &str) -> LoadResult<WorldConfig> {
        let config: WorldConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {e}"))?;
        PathOptions::from_config(&config)
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid search defaults: {e}"))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_overrides_keep_defaults() {
        let config = ConfigLoader::from_str("swamp_cost = 10\nmax_ops = 500\n").unwrap();
        assert_eq!(config.swamp_cost, 10);
        assert_eq!(config.max_ops, 500);
        assert_eq!(config.plain_cost, WorldConfig::DEFAULT_PLAIN_COST);
        assert_eq!(config.max_rooms, WorldConfig::MAX_SEARCH_ROOMS);
    }

    #[test]
    fn invalid_ranges_are_rejected() {
        let error = ConfigLoader::from_str("max_rooms = 40\n").unwrap_err();
        assert!(error.to_string().contains("invalid search defaults"));
        assert!(ConfigLoader::from_str("plain_cost = 0\n").is_err());
    }

    #[test]
    fn garbage_toml_is_a_parse_error() {
        assert!(ConfigLoader::from_str("max_ops = \"lots\"\n").is_err());
    }
}
