// lazykeg-core/src/uninstall.rs

use std::path::PathBuf;

use lazykeg_aio::fs::remove_path_if_exists;
use lazykeg_common::error::{LazykegError, Result};
use lazykeg_common::paths::InstallPaths;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct UninstallOptions {
    /// Also delete the wrapped application's directory under the home directory.
    pub zap: bool,
}

/// Removes the installer binary, launcher and receipt (and with `zap`, the
/// application directory). Returns the paths that were actually removed.
pub fn uninstall_package(paths: &InstallPaths, options: &UninstallOptions) -> Result<Vec<PathBuf>> {
    if options.zap && !paths.owns_target_dir() {
        return Err(LazykegError::Validation(format!(
            "Refusing to zap {}: not an application directory under {}",
            paths.target_dir().display(),
            paths.share_root.display()
        )));
    }

    let mut candidates = vec![
        paths.launcher_path.clone(),
        paths.installer_path.clone(),
        paths.receipt_path.clone(),
    ];
    if options.zap {
        candidates.push(paths.target_dir());
    }

    let mut removed = Vec::new();
    for path in candidates {
        if remove_path_if_exists(&path)? {
            removed.push(path);
        } else {
            debug!("Nothing to remove at {}", path.display());
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use lazykeg_aio::fs::{atomic_write_file, EXECUTABLE_MODE};
    use lazykeg_common::config::Config;
    use lazykeg_common::model::PackageDescriptor;

    use super::*;

    fn installed(root: &std::path::Path) -> InstallPaths {
        let config = Config::with_roots(root.join("prefix"), root.join("home"));
        let paths = InstallPaths::new(&config, &PackageDescriptor::fileshare());
        for p in [
            &paths.installer_path,
            &paths.launcher_path,
            &paths.receipt_path,
            &paths.target_path(),
        ] {
            atomic_write_file(p, b"x", EXECUTABLE_MODE).unwrap();
        }
        paths
    }

    #[test]
    fn keeps_application_data_without_zap() {
        let root = tempfile::tempdir().unwrap();
        let paths = installed(root.path());
        let removed = uninstall_package(&paths, &UninstallOptions::default()).unwrap();
        assert_eq!(removed.len(), 3);
        assert!(!paths.launcher_path.exists());
        assert!(paths.target_path().exists());
    }

    #[test]
    fn zap_removes_application_directory() {
        let root = tempfile::tempdir().unwrap();
        let paths = installed(root.path());
        uninstall_package(&paths, &UninstallOptions { zap: true }).unwrap();
        assert!(!paths.target_dir().exists());
    }

    #[test]
    fn zap_refuses_shared_data_directory() {
        let root = tempfile::tempdir().unwrap();
        let config = Config::with_roots(root.path().join("prefix"), root.path().join("home"));
        let other_app = config.user_share_dir().join("other-app").join("data");
        atomic_write_file(&other_app, b"keep", EXECUTABLE_MODE).unwrap();

        let mut descriptor = PackageDescriptor::fileshare();
        descriptor.app.share_dir = String::new();
        let paths = InstallPaths::new(&config, &descriptor);
        atomic_write_file(&paths.launcher_path, b"x", EXECUTABLE_MODE).unwrap();

        let err = uninstall_package(&paths, &UninstallOptions { zap: true }).unwrap_err();
        assert!(matches!(err, LazykegError::Validation(_)), "{err}");
        assert!(other_app.exists());
        assert!(paths.launcher_path.exists());
    }

    #[test]
    fn uninstalling_twice_is_harmless() {
        let root = tempfile::tempdir().unwrap();
        let paths = installed(root.path());
        uninstall_package(&paths, &UninstallOptions::default()).unwrap();
        let removed = uninstall_package(&paths, &UninstallOptions::default()).unwrap();
        assert!(removed.is_empty());
    }
}
