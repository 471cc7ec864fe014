// lazykeg-common/src/paths.rs
//! Every filesystem location an install or launch touches, resolved once
//! from [`Config`] and a [`PackageDescriptor`].

use std::path::{Component, PathBuf};

use crate::config::Config;
use crate::model::PackageDescriptor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPaths {
    pub bin_dir: PathBuf,
    pub installer_path: PathBuf,
    pub launcher_path: PathBuf,
    pub home: PathBuf,
    /// `$HOME/.local/share`; the application directory must sit directly below it.
    pub share_root: PathBuf,
    /// Target location relative to `home`, e.g. `.local/share/fileShare/fileshare`.
    pub target_rel: PathBuf,
    pub receipt_path: PathBuf,
    pub cache_dir: PathBuf,
}

impl InstallPaths {
    pub fn new(config: &Config, descriptor: &PackageDescriptor) -> Self {
        let bin_dir = config.bin_dir();
        let target_rel = PathBuf::from(".local")
            .join("share")
            .join(&descriptor.app.share_dir)
            .join(&descriptor.app.executable);
        Self {
            installer_path: bin_dir.join(&descriptor.app.installer_name),
            launcher_path: bin_dir.join(&descriptor.app.launcher_name),
            bin_dir,
            home: config.home_dir().to_path_buf(),
            share_root: config.user_share_dir(),
            target_rel,
            receipt_path: config
                .receipts_dir()
                .join(format!("{}.json", descriptor.name)),
            cache_dir: config.cache_dir(),
        }
    }

    /// Absolute target location for the configured home directory.
    pub fn target_path(&self) -> PathBuf {
        self.home.join(&self.target_rel)
    }

    /// Directory the wrapped application owns under the home directory.
    pub fn target_dir(&self) -> PathBuf {
        self.target_path()
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| self.home.clone())
    }

    /// True when `target_dir()` is a single directory directly below
    /// `share_root`, i.e. something that belongs to this application alone.
    pub fn owns_target_dir(&self) -> bool {
        let target_dir = self.target_dir();
        let Ok(rest) = target_dir.strip_prefix(&self.share_root) else {
            return false;
        };
        let mut components = rest.components();
        matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        )
    }
}
