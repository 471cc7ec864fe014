// ===== lazykeg-common/src/model/descriptor.rs =====
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::error::{LazykegError, Result};

const SHA256_HEX_LEN: usize = 64;

/// Layout of the wrapped application: what it is called and where it lives
/// once its own installer has run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppLayout {
    /// Human-readable name used in the first-run message.
    #[serde(default = "default_display_name")]
    pub display_name: String,
    /// Directory under `$HOME/.local/share` the installer populates.
    #[serde(default = "default_share_dir")]
    pub share_dir: String,
    /// Executable inside `share_dir`.
    #[serde(default = "default_executable")]
    pub executable: String,
    /// Name the downloaded artifact is installed under in the bin directory.
    #[serde(default = "default_installer_name")]
    pub installer_name: String,
    /// Name of the generated launcher in the bin directory.
    #[serde(default = "default_launcher_name")]
    pub launcher_name: String,
}

fn default_display_name() -> String {
    "fileShare.app".to_string()
}

fn default_share_dir() -> String {
    "fileShare".to_string()
}

fn default_executable() -> String {
    "fileshare".to_string()
}

fn default_installer_name() -> String {
    "fileshare-installer".to_string()
}

fn default_launcher_name() -> String {
    "fileshare".to_string()
}

impl Default for AppLayout {
    fn default() -> Self {
        Self {
            display_name: default_display_name(),
            share_dir: default_share_dir(),
            executable: default_executable(),
            installer_name: default_installer_name(),
            launcher_name: default_launcher_name(),
        }
    }
}

/// Declarative metadata describing what to download and how to verify it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    pub name: String,
    #[serde(default)]
    pub desc: Option<String>,
    pub homepage: String,
    pub url: String,
    pub version: String,
    pub sha256: String,
    #[serde(default)]
    pub app: AppLayout,
}

impl PackageDescriptor {
    /// The fileShare release this installer ships with.
    pub fn fileshare() -> Self {
        Self {
            name: "fileshare".to_string(),
            desc: Some("Share files over WiFi".to_string()),
            homepage: "https://github.com/realwebthings/file-share".to_string(),
            url: "https://github.com/realwebthings/file-share/releases/download/v1.0.0/fileshare-universal.run"
                .to_string(),
            version: "1.0.0".to_string(),
            sha256: "REPLACE_WITH_ACTUAL_SHA256".to_string(),
            app: AppLayout::default(),
        }
    }

    /// Reads a descriptor from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        debug!("Loading package descriptor from {}", path.display());
        let raw = fs::read_to_string(path).map_err(|e| {
            LazykegError::Config(format!(
                "Failed to read descriptor {}: {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            LazykegError::Config(format!(
                "Malformed descriptor {}: {}",
                path.display(),
                e
            ))
        })
    }

    pub fn with_sha256(mut self, sha256: impl Into<String>) -> Self {
        self.sha256 = sha256.into();
        self
    }

    /// Final path segment of the download URL.
    pub fn artifact_filename(&self) -> String {
        self.url
            .split('/')
            .next_back()
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("{}-download", self.name))
    }

    /// Checks every invariant that must hold before anything is downloaded.
    pub fn validate(&self) -> Result<()> {
        self.validate_layout()?;

        Url::parse(&self.homepage).map_err(|e| {
            LazykegError::Validation(format!("Invalid homepage '{}': {}", self.homepage, e))
        })?;
        let url = Url::parse(&self.url)
            .map_err(|e| LazykegError::Validation(format!("Invalid url '{}': {}", self.url, e)))?;
        if url.scheme() != "https" {
            return Err(LazykegError::Validation(format!(
                "Download url for '{}' must be https, got '{}'",
                self.name,
                url.scheme()
            )));
        }

        if self.version.trim().is_empty() {
            return Err(LazykegError::Validation(format!(
                "Package '{}' has an empty version",
                self.name
            )));
        }
        if !self.url.contains(&self.version) {
            return Err(LazykegError::Validation(format!(
                "Download url '{}' does not embed version '{}'",
                self.url, self.version
            )));
        }
        if let Err(e) = semver::Version::parse(&self.version) {
            warn!(
                "Version '{}' of '{}' is not semver ({}); comparing as plain text",
                self.version, self.name, e
            );
        }

        if !is_sha256_hex(&self.sha256) {
            return Err(LazykegError::Config(format!(
                "sha256 for '{}' is not a 64-digit hex digest (placeholder '{}'?)",
                self.name, self.sha256
            )));
        }
        Ok(())
    }

    /// Checks the names that become filesystem paths. Anything that resolves
    /// install locations from a descriptor must call this first.
    pub fn validate_layout(&self) -> Result<()> {
        validate_component("name", &self.name)?;
        validate_component("app.share_dir", &self.app.share_dir)?;
        validate_component("app.executable", &self.app.executable)?;
        validate_component("app.installer_name", &self.app.installer_name)?;
        validate_component("app.launcher_name", &self.app.launcher_name)?;
        if self.app.installer_name == self.app.launcher_name {
            return Err(LazykegError::Validation(format!(
                "installer_name and launcher_name must differ (both '{}')",
                self.app.launcher_name
            )));
        }
        if self.app.display_name.trim().is_empty()
            || self.app.display_name.contains(['\n', '\r', '\0'])
        {
            return Err(LazykegError::Validation(format!(
                "Invalid display name {:?}",
                self.app.display_name
            )));
        }
        Ok(())
    }
}

/// True for a 64-character hexadecimal string.
pub fn is_sha256_hex(value: &str) -> bool {
    value.len() == SHA256_HEX_LEN && value.chars().all(|c| c.is_ascii_hexdigit())
}

// A single path component: no separators, no traversal, no control characters.
fn validate_component(field: &str, value: &str) -> Result<()> {
    let ok = !value.is_empty()
        && value != "."
        && value != ".."
        && !value.contains('/')
        && !value.chars().any(|c| c.is_control());
    if ok {
        Ok(())
    } else {
        Err(LazykegError::Validation(format!(
            "{field} must be a plain file name, got {value:?}"
        )))
    }
}
