//! Global calsheet configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{CalsheetError, CalsheetResult};

static DEFAULT_EXPORT_DIR: &str = "~/calsheet";
static DEFAULT_PROVIDER: &str = "canvas";
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

fn default_export_dir() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_DIR)
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

fn default_provider_timeout_secs() -> u64 {
    DEFAULT_PROVIDER_TIMEOUT_SECS
}

/// Configuration at ~/.config/calsheet/config.toml, overridable with
/// `CALSHEET_*` environment variables.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CalsheetConfig {
    /// Selects the `calsheet-provider-<name>` binary.
    #[serde(default = "default_provider")]
    pub provider: String,

    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    /// Default recipient for commit and export notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default = "default_provider_timeout_secs")]
    pub provider_timeout_secs: u64,
}

impl Default for CalsheetConfig {
    fn default() -> Self {
        CalsheetConfig {
            provider: default_provider(),
            export_dir: default_export_dir(),
            email: None,
            provider_timeout_secs: default_provider_timeout_secs(),
        }
    }
}

impl CalsheetConfig {
    pub fn config_path() -> CalsheetResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalsheetError::Config("Could not determine config directory".into()))?
            .join("calsheet");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config, writing a commented-out default file on first run.
    pub fn load() -> CalsheetResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> CalsheetResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("CALSHEET"))
            .build()
            .map_err(|e| CalsheetError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalsheetError::Config(e.to_string()))
    }

    /// Export directory with `~` expanded.
    pub fn export_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.export_dir.to_string_lossy()).into_owned())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalsheetResult<()> {
        let contents = format!(
            "\
# calsheet configuration

# Which provider binary talks to your course platform (calsheet-provider-<name>):
# provider = \"{DEFAULT_PROVIDER}\"

# Where exported spreadsheets are written:
# export_dir = \"{DEFAULT_EXPORT_DIR}\"

# Who gets notified when exports are ready and changes are committed:
# email = \"you@example.org\"

# Seconds to wait for the provider before giving up:
# provider_timeout_secs = {DEFAULT_PROVIDER_TIMEOUT_SECS}
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalsheetError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalsheetError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calsheet").join("config.toml");

        CalsheetConfig::create_default_config(&path).unwrap();
        let config = CalsheetConfig::load_from(&path).unwrap();

        assert_eq!(config.provider, "canvas");
        assert_eq!(config.export_dir, PathBuf::from("~/calsheet"));
        assert_eq!(config.email, None);
        assert_eq!(config.provider_timeout_secs, 30);
    }

    #[test]
    fn test_file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "provider = \"mock\"\nemail = \"staff@example.org\"\nprovider_timeout_secs = 5\n",
        )
        .unwrap();

        let config = CalsheetConfig::load_from(&path).unwrap();
        assert_eq!(config.provider, "mock");
        assert_eq!(config.email.as_deref(), Some("staff@example.org"));
        assert_eq!(config.provider_timeout_secs, 5);
    }

    #[test]
    fn test_export_path_keeps_absolute_paths() {
        let config = CalsheetConfig {
            export_dir: PathBuf::from("/tmp/sheets"),
            ..Default::default()
        };
        assert_eq!(config.export_path(), PathBuf::from("/tmp/sheets"));
    }
}
