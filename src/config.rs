use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GopSetupError, Result};

/// Complete configuration for a setup run.
///
/// An explicit struct handed to the resolver and workflow; nothing in the
/// core reads process environment. Environment-based CI inputs are layered
/// in once, by [Config::apply_env].
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub inputs: InputsConfig,

    #[serde(default)]
    pub repo: RepoConfig,

    #[serde(default)]
    pub install: InstallConfig,
}

/// Version selection inputs.
///
/// `version` is an explicit spec (exact version, range, or branch name);
/// `version_file` names a file to read the spec from. When both are present
/// the explicit spec wins.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct InputsConfig {
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub version_file: Option<String>,
}

/// Upstream repository location.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RepoConfig {
    #[serde(default = "default_repo_url")]
    pub url: String,
}

fn default_repo_url() -> String {
    "https://github.com/goplus/gop.git".to_string()
}

impl Default for RepoConfig {
    fn default() -> Self {
        RepoConfig {
            url: default_repo_url(),
        }
    }
}

/// Where the clone lands and where the built binary is installed.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct InstallConfig {
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,

    #[serde(default = "default_bin_dir")]
    pub bin_dir: PathBuf,
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn default_work_dir() -> PathBuf {
    home_dir().join("workdir")
}

fn default_bin_dir() -> PathBuf {
    home_dir().join("bin")
}

impl Default for InstallConfig {
    fn default() -> Self {
        InstallConfig {
            work_dir: default_work_dir(),
            bin_dir: default_bin_dir(),
        }
    }
}

impl Config {
    /// Layer in the CI input environment variables.
    ///
    /// `INPUT_GOP_VERSION` and `INPUT_GOP_VERSION_FILE` override file-sourced
    /// inputs when set and non-empty.
    pub fn apply_env(&mut self) {
        if let Ok(version) = env::var("INPUT_GOP_VERSION") {
            if !version.is_empty() {
                self.inputs.version = Some(version);
            }
        }
        if let Ok(version_file) = env::var("INPUT_GOP_VERSION_FILE") {
            if !version_file.is_empty() {
                self.inputs.version_file = Some(version_file);
            }
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gop-setup.toml` in current directory
/// 3. `gop-setup.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./gop-setup.toml").exists() {
        fs::read_to_string("./gop-setup.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("gop-setup.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str)
        .map_err(|e| GopSetupError::config(format!("invalid configuration: {}", e)))
}
