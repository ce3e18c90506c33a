use anyhow::Context;
use rearrange_editor::{CutStack, NameProperties, RearrangeEngine, DEFAULT_SEPARATOR};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "rearrange.config.json";

/// Rearrange configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Text appended after each pasted element
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Depth of the last-cut stack (0 = unlimited)
    #[serde(default)]
    pub max_batches: usize,

    /// Name attribute per document type and element type
    #[serde(default)]
    pub name_properties: NameProperties,
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

impl Config {
    /// Config file to use: `explicit` if given, else the default name in `cwd`
    pub fn resolve_path(cwd: &str, explicit: Option<&Path>) -> PathBuf {
        match explicit {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME),
        }
    }

    /// Load config from `path`
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("invalid config file {}", path.display()))?;
            Ok(config)
        } else {
            // Return default config if none exists
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Config::default())
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content + "\n")?;
        Ok(())
    }

    /// Engine configured with this file's separator and stack depth
    pub fn engine(&self) -> RearrangeEngine {
        RearrangeEngine::new()
            .with_separator(self.separator.as_str())
            .with_history(CutStack::with_max_batches(self.max_batches))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            max_batches: 0,
            name_properties: NameProperties::new(),
        }
    }
}
