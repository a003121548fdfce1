//! User configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{DaybookError, DaybookResult};
use crate::event::DEFAULT_LABEL_COLOR;
use crate::layout::{ColumnStrategy, DEFAULT_DURATION_MINUTES, LayoutOptions};

static DEFAULT_EVENTS_FILE: &str = "~/.local/share/daybook/events.json";

/// Dots shown per day in the month grid.
pub const DEFAULT_PREVIEW_LIMIT: usize = 3;

fn default_events_file() -> PathBuf {
    PathBuf::from(DEFAULT_EVENTS_FILE)
}

fn is_default_events_file(p: &PathBuf) -> bool {
    *p == default_events_file()
}

fn default_duration_minutes() -> u32 {
    DEFAULT_DURATION_MINUTES
}

fn default_label_color() -> String {
    DEFAULT_LABEL_COLOR.to_string()
}

fn default_preview_limit() -> usize {
    DEFAULT_PREVIEW_LIMIT
}

/// Configuration at ~/.config/daybook/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DaybookConfig {
    #[serde(default = "default_events_file", skip_serializing_if = "is_default_events_file")]
    pub events_file: PathBuf,

    #[serde(default)]
    pub column_strategy: ColumnStrategy,

    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: u32,

    #[serde(default = "default_label_color")]
    pub default_label_color: String,

    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,
}

impl Default for DaybookConfig {
    fn default() -> Self {
        DaybookConfig {
            events_file: default_events_file(),
            column_strategy: ColumnStrategy::default(),
            default_duration_minutes: default_duration_minutes(),
            default_label_color: default_label_color(),
            preview_limit: default_preview_limit(),
        }
    }
}

impl DaybookConfig {
    pub fn config_path() -> DaybookResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DaybookError::Config("Could not determine config directory".into()))?
            .join("daybook");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user config, writing a commented-out default first if none exists.
    pub fn load() -> DaybookResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load config from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> DaybookResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| DaybookError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DaybookError::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> DaybookResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| DaybookError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| DaybookError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DaybookResult<()> {
        let contents = format!(
            "\
# daybook configuration

# Where events are kept:
# events_file = \"{DEFAULT_EVENTS_FILE}\"

# Column layout for overlapping events, \"sequential\" or \"packed\":
# column_strategy = \"sequential\"

# Length of timed events without an end time:
# default_duration_minutes = {DEFAULT_DURATION_MINUTES}

# Color for events without a label:
# default_label_color = \"{DEFAULT_LABEL_COLOR}\"

# Event dots per day in the month view:
# preview_limit = {DEFAULT_PREVIEW_LIMIT}
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DaybookError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DaybookError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// The events file with `~` expanded.
    pub fn events_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.events_file.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            strategy: self.column_strategy,
            default_duration_minutes: self.default_duration_minutes,
        }
    }
}
