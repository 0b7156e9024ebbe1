use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, TmError};
use crate::utils::is_identifier;

pub const CONFIG_FILE_NAME: &str = ".elziirc.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_translations")]
    pub translations: String,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default = "default_interface_name")]
    pub interface_name: String,
    #[serde(default = "default_elz_instance_name")]
    pub elz_instance_name: String,
    #[serde(default = "default_static_default")]
    pub static_default: bool,
    /// Glob patterns matched against translation file names.
    #[serde(default)]
    pub ignores: Vec<String>,
}

/// Output directory of each format. `null` disables a format.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    #[serde(default = "default_ts_output")]
    pub ts: Option<String>,
    #[serde(default)]
    pub dts: Option<String>,
}

fn default_translations() -> String {
    "./translations".to_string()
}

fn default_ts_output() -> Option<String> {
    Some("./src/locales".to_string())
}

fn default_interface_name() -> String {
    "Locale".to_string()
}

fn default_elz_instance_name() -> String {
    "elz".to_string()
}

fn default_static_default() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            ts: default_ts_output(),
            dts: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translations: default_translations(),
            output: OutputConfig::default(),
            interface_name: default_interface_name(),
            elz_instance_name: default_elz_instance_name(),
            static_default: default_static_default(),
            ignores: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if a generated name is not a valid identifier or a
    /// glob pattern in `ignores` is invalid.
    pub fn validate(&self) -> Result<()> {
        for (field, name) in [
            ("interfaceName", &self.interface_name),
            ("elzInstanceName", &self.elz_instance_name),
        ] {
            if !is_identifier(name) {
                return Err(TmError::new(
                    ErrorKind::Config,
                    format!("'{}' must be a valid identifier, found \"{}\"", field, name),
                )
                .into());
            }
        }

        self.ignore_patterns()?;
        Ok(())
    }

    pub fn ignore_patterns(&self) -> Result<Vec<Pattern>> {
        self.ignores
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|err| {
                    anyhow::Error::new(
                        TmError::new(
                            ErrorKind::Config,
                            format!("Invalid glob pattern in 'ignores': \"{}\"", pattern),
                        )
                        .with_details([err.to_string()]),
                    )
                })
            })
            .collect()
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
    /// Directory that relative paths of the config are resolved against.
    pub base_dir: PathBuf,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map_or_else(|| start_dir.to_path_buf(), Path::to_path_buf);
            Ok(ConfigLoadResult {
                config,
                from_file: true,
                base_dir,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
            base_dir: start_dir.to_path_buf(),
        }),
    }
}
