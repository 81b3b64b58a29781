//! Runner configuration, read from environment variables
//!
//! - `SANDWICH_LEVELS`: level container JSON file (built-in demo levels when unset)
//! - `SANDWICH_LEVEL`: level index to start on (default 0)
//! - `SANDWICH_SEED`: seed for randomized layouts (default 1)
//! - `SANDWICH_SAVE_RANDOM`: when set, randomized layouts are saved to this JSON file
//! - `SANDWICH_LOG`: log level, `off` / `error` / `warn` / `info` / `debug` / `trace` (default info)

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::LevelFilter;

use sandwich_stack::core::{LevelContainer, RandomLayoutStore};

const DEMO_LEVELS: &str = include_str!("../levels/demo.json");

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub levels_path: Option<PathBuf>,
    pub level: usize,
    pub seed: u32,
    pub save_random_path: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            levels_path: None,
            level: 0,
            seed: 1,
            save_random_path: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl CliConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let path = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) })
        };

        let level = lookup("SANDWICH_LEVEL")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.level);

        let seed = lookup("SANDWICH_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        let log_level = lookup("SANDWICH_LOG")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.log_level);

        Self {
            levels_path: path("SANDWICH_LEVELS"),
            level,
            seed,
            save_random_path: path("SANDWICH_SAVE_RANDOM"),
            log_level,
        }
    }

    pub fn load_levels(&self) -> Result<LevelContainer> {
        match &self.levels_path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading levels from {}", path.display()))?;
                LevelContainer::from_json(&json)
                    .with_context(|| format!("parsing levels in {}", path.display()))
            }
            None => LevelContainer::from_json(DEMO_LEVELS).context("parsing built-in demo levels"),
        }
    }

    /// Existing saved layouts at the save path, so new ones are appended
    pub fn load_layout_store(&self) -> Result<Option<RandomLayoutStore>> {
        let Some(path) = &self.save_random_path else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(Some(RandomLayoutStore::new()));
        }
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading saved layouts from {}", path.display()))?;
        let store = RandomLayoutStore::from_json(&json)
            .with_context(|| format!("parsing saved layouts in {}", path.display()))?;
        Ok(Some(store))
    }

    pub fn write_layout_store(&self, store: &RandomLayoutStore) -> Result<()> {
        let Some(path) = &self.save_random_path else {
            return Ok(());
        };
        let json = store.to_json_pretty().context("serializing saved layouts")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing saved layouts to {}", path.display()))
    }
}
