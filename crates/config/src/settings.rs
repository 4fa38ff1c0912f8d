use color_eyre::eyre::{Result, eyre};
use folderstat_models::AggregationKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_MAX_DEPTH: usize = 256;

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub count_recursive: bool,
    #[serde(default = "default_last_modified_recursive")]
    pub last_modified_recursive: bool,
    #[serde(default)]
    pub size_recursive: bool,
    #[serde(default = "default_stats_recursive")]
    pub stats_recursive: bool,
    /// Deepest level below the root the walk may enter; `0` removes the cap.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default = "default_detect_cycles")]
    pub detect_cycles: bool,
    #[serde(default)]
    pub follow_links: bool,
    #[serde(default)]
    pub skip_hidden_files: bool,
}

// Default value functions for serde
fn default_last_modified_recursive() -> bool {
    AggregationKind::LatestModified.default_recursive()
}
fn default_stats_recursive() -> bool {
    AggregationKind::Stats.default_recursive()
}
fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}
fn default_detect_cycles() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            count_recursive: AggregationKind::Count.default_recursive(),
            last_modified_recursive: default_last_modified_recursive(),
            size_recursive: AggregationKind::TotalSize.default_recursive(),
            stats_recursive: default_stats_recursive(),
            max_depth: default_max_depth(),
            detect_cycles: default_detect_cycles(),
            follow_links: false,
            skip_hidden_files: false,
        }
    }
}

impl Settings {
    /// Loads the user configuration, falling back to defaults when none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined, or if
    /// the file exists but cannot be read or parsed.
    pub async fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path).await
        } else {
            debug!("No config at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Loads settings from an explicit TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let settings: Self = toml::from_str(&content)?;
        debug!("Settings loaded from {:?}", path);
        Ok(settings)
    }

    /// Writes settings to the user config location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined or written.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        info!("Settings saved to {:?}", path);
        Ok(())
    }

    /// Configured recursion for `kind` when the caller gives none.
    #[must_use]
    pub const fn recursive_for(&self, kind: AggregationKind) -> bool {
        match kind {
            AggregationKind::Count => self.count_recursive,
            AggregationKind::LatestModified => self.last_modified_recursive,
            AggregationKind::TotalSize => self.size_recursive,
            AggregationKind::Stats => self.stats_recursive,
        }
    }

    #[must_use]
    pub const fn depth_limit(&self) -> Option<usize> {
        if self.max_depth == 0 { None } else { Some(self.max_depth) }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| eyre!("Could not find config directory"))?;
        Ok(config_dir.join("folderstat").join("config.toml"))
    }
}
