//! Run configuration loaded from TOML
//!
//! Every key is optional; missing keys fall back to the defaults the
//! consolidation template expects. The config is read once at startup and
//! never mutated afterwards.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::consolidate::{DuplicatePolicy, Field};

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "payroll.toml";

/// Consolidation settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Folder holding the client workbooks
    pub input_dir: PathBuf,
    /// Path of the consolidated template
    pub output_file: PathBuf,
    /// Sheet name of the consolidated template
    pub output_sheet: String,
    /// Accepted workbook extension (without the dot)
    pub extension: String,
    /// Which occurrence of a repeated RUT is kept
    pub duplicate_policy: DuplicatePolicy,
    /// Extra header aliases, keyed by field label or key
    pub aliases: BTreeMap<String, Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("archivos_cliente"),
            output_file: PathBuf::from("Template_Listo_Para_Subir.xlsx"),
            output_sheet: "Sheet1".to_string(),
            extension: "xlsx".to_string(),
            duplicate_policy: DuplicatePolicy::First,
            aliases: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load the config.
    ///
    /// An explicit path must exist. Otherwise `./payroll.toml` and then
    /// `<config dir>/payroll-cli/config.toml` are tried, falling back to
    /// defaults when neither exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                bail!("Config file does not exist: {}", path.display());
            }
            return Self::from_file(path);
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Self::from_file(&local);
        }

        let global = get_config_path();
        if global.exists() {
            return Self::from_file(&global);
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.output_sheet.trim().is_empty() {
            bail!("output_sheet must not be empty");
        }
        if self.extension.trim_start_matches('.').trim().is_empty() {
            bail!("extension must not be empty");
        }
        self.custom_aliases()?;
        Ok(())
    }

    /// Accepted extension, lowercase and without a leading dot
    pub fn extension(&self) -> String {
        self.extension.trim().trim_start_matches('.').to_lowercase()
    }

    /// Custom aliases resolved to fields, in key order
    pub fn custom_aliases(&self) -> Result<Vec<(Field, Vec<String>)>> {
        self.aliases
            .iter()
            .map(|(name, aliases)| match Field::from_name(name) {
                Some(field) => Ok((field, aliases.clone())),
                None => bail!("Unknown field '{}' in [aliases]", name),
            })
            .collect()
    }
}

/// Returns the platform-specific path for the config file.
///
/// Falls back to the current directory if no config directory is available.
pub fn get_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("payroll-cli")
        .join("config.toml")
}
