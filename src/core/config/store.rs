use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::defaults::builtin_configuration;
use super::model::Configuration;
use crate::core::error::{ProvisionError, ProvisionResult};

pub const CONFIG_FILE_NAME: &str = "makemcserver.yml";
const APP_DIR_NAME: &str = "makemcserver";

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Builtin,
}

/// Locates and loads the run configuration.
///
/// The first candidate that exists is used as-is. Files are never merged:
/// a project-local file hides every preset defined in the user-level file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    candidates: Vec<PathBuf>,
}

impl ConfigStore {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    /// `./makemcserver.yml`, then the user config dir, then `~/.makemcserver.yml`.
    pub fn with_default_locations() -> Self {
        let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME));
        }
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(format!(".{}", CONFIG_FILE_NAME)));
        }
        Self::new(candidates)
    }

    pub fn load(&self) -> ProvisionResult<(Configuration, ConfigSource)> {
        for candidate in &self.candidates {
            if !candidate.is_file() {
                debug!("No config at {:?}", candidate);
                continue;
            }
            let config = load_file(candidate)?;
            info!("Using configuration from {:?}", candidate);
            return Ok((config, ConfigSource::File(candidate.clone())));
        }

        info!("No configuration file found; using built-in defaults");
        Ok((builtin_configuration(), ConfigSource::Builtin))
    }
}

/// Parse one configuration file. An empty file is an empty configuration.
pub fn load_file(path: &Path) -> ProvisionResult<Configuration> {
    let raw = std::fs::read_to_string(path).map_err(|e| ProvisionError::io(path, e))?;
    if raw.trim().is_empty() {
        return Ok(Configuration::default());
    }
    serde_yaml::from_str(&raw).map_err(|source| ProvisionError::Config {
        path: path.to_path_buf(),
        source,
    })
}
