// lazykeg-core/src/receipt.rs
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use lazykeg_aio::json_io::{read_json, write_json};
use lazykeg_common::error::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Record of a completed package install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallReceipt {
    pub name: String,
    pub version: String,
    pub sha256: String,
    pub source_url: String,
    pub installer_path: PathBuf,
    pub launcher_path: PathBuf,
    pub target_path: PathBuf,
    pub installed_at: DateTime<Utc>,
}

impl InstallReceipt {
    pub fn save(&self, path: &Path) -> Result<()> {
        debug!("Writing install receipt for {} to {}", self.name, path.display());
        write_json(path, self)
    }

    /// Loads the receipt at `path`, or `None` if the package was never installed.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }
        read_json(path).map(Some)
    }
}
