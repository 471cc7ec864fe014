// lazykeg-common/src/config.rs
use std::env;
use std::path::{Path, PathBuf};

use directories::UserDirs;
use tracing::debug;

use super::error::{LazykegError, Result};

// Used when LAZYKEG_PREFIX is not set or is empty, relative to the home directory.
const DEFAULT_PREFIX_DIR_NAME: &str = ".lazykeg";

#[derive(Debug, Clone)]
pub struct Config {
    pub prefix: PathBuf,
    pub home: PathBuf,
    pub descriptor_path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        debug!("Loading lazykeg configuration");

        let home = UserDirs::new()
            .map(|ud| ud.home_dir().to_path_buf())
            .ok_or_else(|| {
                LazykegError::Config("Could not determine the user's home directory".to_string())
            })?;

        let prefix = env::var("LAZYKEG_PREFIX")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                debug!(
                    "LAZYKEG_PREFIX not set or empty, falling back to {}/{}",
                    home.display(),
                    DEFAULT_PREFIX_DIR_NAME
                );
                home.join(DEFAULT_PREFIX_DIR_NAME)
            });
        if !prefix.is_absolute() {
            return Err(LazykegError::Config(format!(
                "LAZYKEG_PREFIX must be an absolute path, got '{}'",
                prefix.display()
            )));
        }
        debug!("Effective prefix set to: {}", prefix.display());

        let descriptor_path = env::var("LAZYKEG_DESCRIPTOR")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        debug!("Configuration loaded successfully.");
        Ok(Self {
            prefix,
            home,
            descriptor_path,
        })
    }

    /// Builds a configuration rooted at explicit directories, bypassing the environment.
    pub fn with_roots(prefix: impl Into<PathBuf>, home: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            home: home.into(),
            descriptor_path: None,
        }
    }

    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    pub fn home_dir(&self) -> &Path {
        &self.home
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.prefix.join("bin")
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.prefix.join("cache")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.prefix.join("logs")
    }

    pub fn receipts_dir(&self) -> PathBuf {
        self.prefix.join("var").join("receipts")
    }

    /// `$HOME/.local/share`, where wrapped applications install themselves.
    pub fn user_share_dir(&self) -> PathBuf {
        self.home.join(".local").join("share")
    }
}

pub fn load_config() -> Result<Config> {
    Config::load()
}
