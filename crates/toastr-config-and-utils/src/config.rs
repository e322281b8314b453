//! Configuration management for toastr.

use crate::{CoreResult, Paths};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Per-type title overrides (`toastr.title.<type>`).
///
/// Unset entries fall back to the built-in title for that type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
}

impl TitleOverrides {
    /// Iterate over the overrides that are set, keyed by type name.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("error", &self.error),
            ("info", &self.info),
            ("success", &self.success),
            ("warning", &self.warning),
            ("primary", &self.primary),
        ]
        .into_iter()
        .filter_map(|(name, title)| title.as_deref().map(|title| (name, title)))
    }
}

/// Toastr configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToastrConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Default client-side options written as `toastr.options`.
    #[serde(default)]
    pub options: Map<String, Value>,
    /// Per-type default titles.
    #[serde(default)]
    pub title: TitleOverrides,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for ToastrConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            options: Map::new(),
            title: TitleOverrides::default(),
        }
    }
}

impl ToastrConfig {
    /// Load configuration from the config file, falling back to defaults.
    pub fn load(paths: &Paths) -> CoreResult<Self> {
        let config_path = paths.config_file();

        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Self::default()
        };

        config.load_from_env();
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ToastrConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the config file.
    pub fn save(&self, paths: &Paths) -> CoreResult<()> {
        paths.ensure_dirs()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.config_file(), content)?;
        Ok(())
    }

    /// Only the log level can be overridden at runtime.
    fn load_from_env(&mut self) {
        if let Ok(log_level) = std::env::var("TOASTR_LOG_LEVEL") {
            self.log_level = log_level;
        }
    }
}
