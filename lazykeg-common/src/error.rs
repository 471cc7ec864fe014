use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum LazykegError {
    #[error("I/O Error: {0}")]
    Io(#[from] Arc<std::io::Error>),

    #[error("HTTP Request Error: {0}")]
    Http(#[from] Arc<reqwest::Error>),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] Arc<serde_json::Error>),

    #[error("Semantic Versioning Error: {0}")]
    SemVer(#[from] Arc<semver::Error>),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("Network Error: Failed to download '{url}': {reason}")]
    Network { url: String, reason: String },

    #[error("Integrity Error: checksum mismatch for {origin}: expected {expected}, got {actual}")]
    Integrity {
        origin: String,
        expected: String,
        actual: String,
    },

    #[error("Permission Error: cannot write {}: {reason}", .path.display())]
    Permission { path: PathBuf, reason: String },

    #[error("Execution Error: {} is not runnable: {reason}", .path.display())]
    Execution { path: PathBuf, reason: String },

    #[error("Installation Error: {0}")]
    Install(String),

    #[error("Resource Not Found: {0}")]
    NotFound(String),
}

impl LazykegError {
    /// Process exit code the CLI reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::SemVer(_) => 2,
            Self::Network { .. } | Self::Http(_) => 3,
            Self::Integrity { .. } => 4,
            Self::Permission { .. } => 5,
            Self::Execution { .. } => 6,
            _ => 1,
        }
    }

    /// Wraps an I/O error raised while writing `path`, turning
    /// permission failures into [`LazykegError::Permission`].
    pub fn from_write(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            LazykegError::Permission {
                path: path.into(),
                reason: err.to_string(),
            }
        } else {
            LazykegError::Io(Arc::new(err))
        }
    }
}

impl From<std::io::Error> for LazykegError {
    fn from(err: std::io::Error) -> Self {
        LazykegError::Io(Arc::new(err))
    }
}

impl From<reqwest::Error> for LazykegError {
    fn from(err: reqwest::Error) -> Self {
        LazykegError::Http(Arc::new(err))
    }
}

impl From<serde_json::Error> for LazykegError {
    fn from(err: serde_json::Error) -> Self {
        LazykegError::Json(Arc::new(err))
    }
}

impl From<semver::Error> for LazykegError {
    fn from(err: semver::Error) -> Self {
        LazykegError::SemVer(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, LazykegError>;
