use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Featured cities shown by `wearcast featured` until the user picks their
/// own list.
const DEFAULT_FEATURED: &[&str] = &["London", "New York", "Tokyo", "Paris", "Sydney", "Reykjavik"];

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// default_city = "London"
/// language = "en"
/// max_candidates = 5
/// featured = ["London", "Tokyo"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// City used by `advise` when none is given on the command line.
    pub default_city: Option<String>,

    /// Geocoding language code, e.g. "en".
    pub language: String,

    /// How many geocoding candidates to offer in the picker.
    pub max_candidates: u8,

    /// Cities looked up by the `featured` command.
    pub featured: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_city: None,
            language: "en".to_string(),
            max_candidates: 5,
            featured: DEFAULT_FEATURED.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl Config {
    pub fn set_default_city(&mut self, city: Option<String>) {
        self.default_city = city.filter(|c| !c.trim().is_empty());
    }

    /// Replace the featured list, dropping empty entries.
    pub fn set_featured<I, S>(&mut self, cities: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.featured = cities
            .into_iter()
            .map(Into::into)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
    }

    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "wearcast", "wearcast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
