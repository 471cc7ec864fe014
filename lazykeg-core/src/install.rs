// lazykeg-core/src/install.rs
//! Download, verify and place a package, then write its launcher.

use std::path::PathBuf;

use chrono::Utc;
use lazykeg_aio::fs::{atomic_write_file, EXECUTABLE_MODE};
use lazykeg_common::error::Result;
use lazykeg_common::model::PackageDescriptor;
use lazykeg_common::paths::InstallPaths;
use lazykeg_net::validation::verify_digest;
use lazykeg_net::Fetcher;
use tracing::{debug, info};

use crate::launcher::{LauncherScript, TargetPath};
use crate::receipt::InstallReceipt;

#[derive(Debug, Clone)]
pub struct InstallReport {
    pub installer_path: PathBuf,
    pub launcher_path: PathBuf,
    pub receipt: InstallReceipt,
}

/// Fetches, verifies and installs `descriptor`.
pub async fn install_package(
    descriptor: &PackageDescriptor,
    paths: &InstallPaths,
    fetcher: &Fetcher,
) -> Result<InstallReport> {
    descriptor.validate()?;
    debug!(
        "Installing {} {} from {}",
        descriptor.name, descriptor.version, descriptor.url
    );
    let bytes = fetcher.fetch_cached(descriptor, &paths.cache_dir).await?;
    install_from_bytes(descriptor, paths, &bytes)
}

/// Installs an artifact that is already in memory. The digest is checked
/// again here; unverified content is never written to the bin directory.
pub fn install_from_bytes(
    descriptor: &PackageDescriptor,
    paths: &InstallPaths,
    bytes: &[u8],
) -> Result<InstallReport> {
    descriptor.validate()?;
    verify_digest(bytes, &descriptor.sha256, &descriptor.url)?;

    let installer_path = install_binary(bytes, paths)?;
    let script = LauncherScript::builder()
        .installer_path(&installer_path)
        .target(TargetPath::home_relative(&paths.target_rel))
        .display_name(&descriptor.app.display_name)
        .package_label(format!("{} {}", descriptor.name, descriptor.version))
        .build()?;
    let launcher_path = write_launcher(&script, paths)?;

    let receipt = InstallReceipt {
        name: descriptor.name.clone(),
        version: descriptor.version.clone(),
        sha256: descriptor.sha256.to_ascii_lowercase(),
        source_url: descriptor.url.clone(),
        installer_path: installer_path.clone(),
        launcher_path: launcher_path.clone(),
        target_path: paths.target_path(),
        installed_at: Utc::now(),
    };
    receipt.save(&paths.receipt_path)?;
    info!(
        "Installed {} {} ({})",
        descriptor.name,
        descriptor.version,
        launcher_path.display()
    );

    Ok(InstallReport {
        installer_path,
        launcher_path,
        receipt,
    })
}

/// Writes the artifact under the fixed installer name with mode 0755,
/// replacing any previous install.
pub fn install_binary(bytes: &[u8], paths: &InstallPaths) -> Result<PathBuf> {
    debug!(
        "Installing {} bytes to {}",
        bytes.len(),
        paths.installer_path.display()
    );
    atomic_write_file(&paths.installer_path, bytes, EXECUTABLE_MODE)?;
    Ok(paths.installer_path.clone())
}

pub fn write_launcher(script: &LauncherScript, paths: &InstallPaths) -> Result<PathBuf> {
    debug!("Writing launcher to {}", paths.launcher_path.display());
    atomic_write_file(&paths.launcher_path, script.as_bytes(), EXECUTABLE_MODE)?;
    Ok(paths.launcher_path.clone())
}
