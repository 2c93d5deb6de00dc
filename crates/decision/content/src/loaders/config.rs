//! Decision configuration loader.

use std::path::Path;

use decision_core::DecisionConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for decision configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing DecisionConfig
    ///
    /// # Returns
    ///
    /// Returns a DecisionConfig. Sections missing from the file take their defaults.
    pub fn load(path: &Path) -> LoadResult<DecisionConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from an in-memory TOML document.
    pub fn parse(content: &str) -> LoadResult<DecisionConfig> {
        let config: DecisionConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse decision config TOML: {}", e))?;

        Ok(config)
    }
}

/// Loads `path`, falling back to [`DecisionConfig::default`] on any failure.
///
/// A behavior built from the fallback stays operational with zero whirl
/// velocity and reload spots at the origin; callers that cannot tolerate that
/// should use [`ConfigLoader::load`] and abort instead.
pub fn load_or_default(path: &Path) -> DecisionConfig {
    match ConfigLoader::load(path) {
        Ok(config) => {
            tracing::info!("Loaded decision config from {}", path.display());
            config
        }
        Err(e) => {
            tracing::error!("{:#}; using zero-initialized decision parameters", e);
            DecisionConfig::default()
        }
    }
}
