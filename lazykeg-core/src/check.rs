// lazykeg-core/src/check.rs
use std::ffi::OsString;

use lazykeg_aio::fs::is_executable;
use lazykeg_aio::process::spawn_and_wait;
use lazykeg_common::error::{LazykegError, Result};
use lazykeg_common::paths::InstallPaths;
use tracing::{debug, warn};

use crate::receipt::InstallReceipt;

#[derive(Debug, Clone)]
pub struct InstallStatus {
    pub installer_present: bool,
    pub launcher_present: bool,
    pub target_present: bool,
    pub receipt: Option<InstallReceipt>,
}

impl InstallStatus {
    pub fn inspect(paths: &InstallPaths) -> Self {
        let receipt = match InstallReceipt::load(&paths.receipt_path) {
            Ok(r) => r,
            Err(e) => {
                warn!(
                    "Ignoring unreadable receipt {}: {}",
                    paths.receipt_path.display(),
                    e
                );
                None
            }
        };
        Self {
            installer_present: paths.installer_path.is_file(),
            launcher_present: paths.launcher_path.is_file(),
            target_present: paths.target_path().is_file(),
            receipt,
        }
    }

    pub fn is_installed(&self) -> bool {
        self.installer_present && self.launcher_present
    }
}

/// Runs `<launcher> --help` and requires a zero exit code.
pub fn run_smoke_test(paths: &InstallPaths) -> Result<()> {
    let launcher = &paths.launcher_path;
    if !launcher.is_file() {
        return Err(LazykegError::NotFound(format!(
            "No launcher at {}; run install first",
            launcher.display()
        )));
    }
    if !is_executable(launcher) {
        return Err(LazykegError::Execution {
            path: launcher.clone(),
            reason: "launcher is not executable".to_string(),
        });
    }
    debug!("Smoke testing {} --help", launcher.display());
    let code = spawn_and_wait(launcher, &[OsString::from("--help")])?;
    if code == 0 {
        Ok(())
    } else {
        Err(LazykegError::Execution {
            path: launcher.clone(),
            reason: format!("'--help' exited with code {code}"),
        })
    }
}
