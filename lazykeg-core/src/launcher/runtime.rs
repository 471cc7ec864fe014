// lazykeg-core/src/launcher/runtime.rs
//! Native counterpart of the generated launcher script.
//!
//! Each invocation walks `Check -> Install -> Exec`, skipping `Install`
//! once the target exists.

use std::ffi::OsString;
use std::io::Write;
use std::path::Path;

use lazykeg_aio::fs::is_executable;
use lazykeg_aio::process::{exec_or_wait, spawn_and_wait};
use lazykeg_common::error::{LazykegError, Result};
use lazykeg_common::paths::InstallPaths;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchState {
    Check,
    Install,
    Exec,
}

/// Process operations the launcher needs; swapped out in tests.
pub trait ProcessRunner {
    /// Runs the installer with no arguments and returns its exit code.
    fn run_installer(&mut self, installer: &Path) -> Result<i32>;
    /// Hands control to the target. Returns the target's exit code when the
    /// current process is not replaced.
    fn exec(&mut self, target: &Path, args: &[OsString]) -> Result<i32>;
}

/// Runs real processes. With `replace_process` set, `exec` replaces the
/// current process image on Unix and never returns on success.
#[derive(Debug, Clone, Copy)]
pub struct SystemRunner {
    pub replace_process: bool,
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self {
            replace_process: true,
        }
    }
}

impl ProcessRunner for SystemRunner {
    fn run_installer(&mut self, installer: &Path) -> Result<i32> {
        spawn_and_wait(installer, &[])
    }

    fn exec(&mut self, target: &Path, args: &[OsString]) -> Result<i32> {
        if self.replace_process {
            exec_or_wait(target, args)
        } else {
            spawn_and_wait(target, args)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOutcome {
    pub states: Vec<LaunchState>,
    pub exit_code: i32,
}

impl LaunchOutcome {
    pub fn installed(&self) -> bool {
        self.states.contains(&LaunchState::Install)
    }
}

pub struct Launcher<'a, R> {
    paths: &'a InstallPaths,
    display_name: &'a str,
    runner: R,
}

impl<'a, R: ProcessRunner> Launcher<'a, R> {
    pub fn new(paths: &'a InstallPaths, display_name: &'a str, runner: R) -> Self {
        Self {
            paths,
            display_name,
            runner,
        }
    }

    pub fn into_runner(self) -> R {
        self.runner
    }

    /// Ensures the target is installed, then runs it with `args`.
    /// Progress messages go to `out`.
    pub fn run<W: Write>(&mut self, args: &[OsString], out: &mut W) -> Result<LaunchOutcome> {
        let target = self.paths.target_path();
        let mut states = vec![LaunchState::Check];
        debug!("Checking for {}", target.display());

        if !target.is_file() {
            states.push(LaunchState::Install);
            writeln!(out, "Installing {}...", self.display_name)?;
            out.flush()?;
            let code = self.runner.run_installer(&self.paths.installer_path)?;
            if code != 0 {
                warn!(
                    "Installer {} exited with code {}",
                    self.paths.installer_path.display(),
                    code
                );
                return Ok(LaunchOutcome {
                    states,
                    exit_code: code,
                });
            }
            if !target.is_file() {
                return Err(LazykegError::Execution {
                    path: target,
                    reason: format!(
                        "installer {} finished but did not create it",
                        self.paths.installer_path.display()
                    ),
                });
            }
        } else {
            debug!("{} already installed", target.display());
        }

        if !is_executable(&target) {
            return Err(LazykegError::Execution {
                path: target,
                reason: "file exists but is not executable".to_string(),
            });
        }

        states.push(LaunchState::Exec);
        let exit_code = self.runner.exec(&target, args)?;
        Ok(LaunchOutcome { states, exit_code })
    }
}
