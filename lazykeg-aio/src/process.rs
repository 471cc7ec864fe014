// lazykeg-aio/src/process.rs
use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};

use lazykeg_common::error::{LazykegError, Result};
use tracing::{debug, error};

/// Runs `program` with inherited stdio and blocks until it exits.
pub fn run_blocking(program: &Path, args: &[OsString]) -> Result<ExitStatus> {
    debug!("Running {} {:?}", program.display(), args);
    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|e| spawn_error(program, e))?;
    if status.success() {
        debug!("{} finished successfully.", program.display());
    } else {
        debug!("{} exited with status: {}", program.display(), status);
    }
    Ok(status)
}

/// Runs `program` to completion and returns the exit code it reported.
pub fn spawn_and_wait(program: &Path, args: &[OsString]) -> Result<i32> {
    run_blocking(program, args).map(|status| exit_code_of(&status))
}

/// Replaces the current process image with `program`. Only returns on failure.
#[cfg(unix)]
pub fn exec_replace(program: &Path, args: &[OsString]) -> LazykegError {
    use std::os::unix::process::CommandExt;

    debug!("Exec {} {:?}", program.display(), args);
    let err = Command::new(program).args(args).exec();
    error!("Failed to exec {}: {}", program.display(), err);
    spawn_error(program, err)
}

/// Replaces the current process where the platform allows it; otherwise
/// waits for `program` and returns its exit code.
pub fn exec_or_wait(program: &Path, args: &[OsString]) -> Result<i32> {
    #[cfg(unix)]
    {
        Err(exec_replace(program, args))
    }
    #[cfg(not(unix))]
    {
        spawn_and_wait(program, args)
    }
}

/// Maps an exit status to a shell-style exit code (128 + signal when killed).
pub fn exit_code_of(status: &ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

fn spawn_error(program: &Path, err: io::Error) -> LazykegError {
    match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => LazykegError::Execution {
            path: program.to_path_buf(),
            reason: err.to_string(),
        },
        _ => LazykegError::from(err),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::fs::{atomic_write_file, EXECUTABLE_MODE};

    #[test]
    fn exit_code_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("exit7");
        atomic_write_file(&script, b"#!/bin/sh\nexit 7\n", EXECUTABLE_MODE).unwrap();
        assert_eq!(spawn_and_wait(&script, &[]).unwrap(), 7);
    }

    #[test]
    fn missing_program_is_an_execution_error() {
        let err = spawn_and_wait(Path::new("/nonexistent/lazykeg-missing"), &[]).unwrap_err();
        assert!(matches!(err, LazykegError::Execution { .. }), "{err}");
    }
}
