use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::draft::{FieldKey, SettingsDraft};
use super::error::{PanelError, Result};
use super::options::{OptionCatalog, DEFAULT_VALUES};

/// Environment variable that overrides the config file location
pub const CONFIG_PATH_ENV: &str = "ARTICLE_PARAMS_CONFIG";

/// On-disk shape of the panel configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct PanelConfigFile {
    #[serde(default)]
    catalog: OptionCatalog,

    /// Default option value per field key
    #[serde(default)]
    defaults: BTreeMap<FieldKey, String>,
}

/// Option sets and default draft, supplied once when the panel is built.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    pub catalog: OptionCatalog,
    pub defaults: SettingsDraft,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PanelConfig {
    pub fn builtin() -> Self {
        Self {
            catalog: OptionCatalog::builtin(),
            defaults: SettingsDraft::builtin(),
        }
    }

    /// Parse and validate a config document.
    pub fn from_json(contents: &str) -> Result<Self> {
        let file: PanelConfigFile = serde_json::from_str(contents)?;
        file.catalog.validate()?;

        let mut values: Vec<(FieldKey, &str)> = Vec::with_capacity(FieldKey::ALL.len());
        for key in FieldKey::ALL {
            let value = match file.defaults.get(&key) {
                Some(value) => value.as_str(),
                None => fallback_default(&file.catalog, key)?,
            };
            values.push((key, value));
        }
        let defaults = SettingsDraft::resolve(&file.catalog, values)?;

        Ok(Self {
            catalog: file.catalog,
            defaults,
        })
    }

    /// Read a config file. A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Load the config, or use the built-in one when there is none or it is
    /// invalid.
    pub fn load() -> Self {
        let path = Self::get_config_path();
        match Self::load_from(&path) {
            Ok(Some(config)) => {
                tracing::info!(path = %path.display(), "loaded panel config");
                config
            }
            Ok(None) => {
                tracing::debug!(path = %path.display(), "no panel config, using built-in options");
                Self::builtin()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid panel config, using built-in options");
                Self::builtin()
            }
        }
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("article-params");
        path.push("panel.json");
        path
    }
}

/// Built-in default for `key` if the catalog offers it, else its first option.
fn fallback_default(catalog: &OptionCatalog, key: FieldKey) -> Result<&str> {
    let builtin = DEFAULT_VALUES
        .iter()
        .find(|(k, _)| *k == key)
        .and_then(|(_, value)| catalog.find(key, value));
    builtin
        .or_else(|| catalog.options(key).first())
        .map(|o| o.value())
        .ok_or_else(|| PanelError::Config(format!("empty option set for {key}")))
}
