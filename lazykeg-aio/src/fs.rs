/*
File: lazykeg-aio/src/fs.rs
Purpose: Primitive synchronous filesystem operations.
*/
use std::{
    fs::{self, Permissions},
    io::{self, Write},
    path::Path,
};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use lazykeg_common::error::{LazykegError, Result};
use tempfile::NamedTempFile;
use tracing::{debug, error, warn};

/// Mode for installed binaries and generated launchers.
pub const EXECUTABLE_MODE: u32 = 0o755;
/// Mode for receipts and other plain data files.
pub const DATA_MODE: u32 = 0o644;

/// Creates a directory and all its parent components if they are missing.
pub fn create_dir_all(path: &Path) -> Result<()> {
    debug!("Creating directory recursively: {}", path.display());
    fs::create_dir_all(path).map_err(|e| {
        error!("Failed create dir {}: {}", path.display(), e);
        LazykegError::from_write(path, e)
    })
}

/// Sets file permissions (Unix only). Mode is standard Unix octal mode.
#[cfg(unix)]
pub fn set_permissions(path: &Path, mode: u32) -> Result<()> {
    debug!("Setting permissions on {}: {:o}", path.display(), mode);
    fs::set_permissions(path, Permissions::from_mode(mode)).map_err(|e| {
        error!("Failed set permissions on {}: {}", path.display(), e);
        LazykegError::from_write(path, e)
    })
}

#[cfg(not(unix))]
pub fn set_permissions(path: &Path, _mode: u32) -> Result<()> {
    warn!(
        "Setting permissions not fully supported on this platform: {}",
        path.display()
    );
    Ok(())
}

/// Atomically replaces `path` with `content` through a temporary file in the
/// same directory, then applies `mode`.
pub fn atomic_write_file(path: &Path, content: &[u8], mode: u32) -> Result<()> {
    let dir = path.parent().ok_or_else(|| {
        LazykegError::Install(format!("Cannot get parent directory for {}", path.display()))
    })?;
    create_dir_all(dir)?;

    let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| LazykegError::from_write(dir, e))?;
    debug!(
        "Atomically writing {} bytes to {} via temp file {}",
        content.len(),
        path.display(),
        temp_file.path().display()
    );

    let write = |f: &mut NamedTempFile| -> io::Result<()> {
        f.write_all(content)?;
        f.flush()?;
        f.as_file().sync_all()
    };
    write(&mut temp_file).map_err(|e| LazykegError::from_write(path, e))?;

    // Permissions go on before the rename so the final name is never
    // visible with the temp file's 0600 mode.
    set_permissions(temp_file.path(), mode)?;

    temp_file.persist(path).map_err(|e| {
        error!(
            "Failed to persist temporary file over {}: {}",
            path.display(),
            e.error
        );
        LazykegError::from_write(path, e.error)
    })?;
    Ok(())
}

/// True if `path` is a regular file the current user may execute.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    if !path.is_file() {
        return false;
    }
    match CString::new(path.as_os_str().as_bytes()) {
        // SAFETY: `c_path` is a valid NUL-terminated string that outlives the call.
        Ok(c_path) => unsafe { libc::access(c_path.as_ptr(), libc::X_OK) == 0 },
        Err(_) => false,
    }
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Removes a file, symlink or directory tree. Returns `false` if nothing was there.
pub fn remove_path_if_exists(path: &Path) -> Result<bool> {
    let metadata = match path.symlink_metadata() {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e.into()),
    };
    debug!("Removing {}", path.display());
    let result = if metadata.file_type().is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    match result {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => {
            warn!("Failed to remove {}: {}", path.display(), e);
            Err(LazykegError::from_write(path, e))
        }
    }
}
