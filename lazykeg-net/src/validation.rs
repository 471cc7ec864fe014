// lazykeg-net/src/validation.rs
use std::fs::File;
use std::io;
use std::path::Path;

use lazykeg_common::error::{LazykegError, Result};
use lazykeg_common::model::is_sha256_hex;
use sha2::{Digest, Sha256};
use url::Url;

/// Lowercase hex SHA-256 of an in-memory buffer.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Rejects anything that is not a usable 64-digit hex digest.
pub fn ensure_digest_configured(expected: &str) -> Result<()> {
    if is_sha256_hex(expected) {
        Ok(())
    } else {
        Err(LazykegError::Config(format!(
            "Expected sha256 '{expected}' is not a 64-digit hex digest; refusing to install unverified content"
        )))
    }
}

/// Compares the digest of `bytes` against `expected`.
pub fn verify_digest(bytes: &[u8], expected: &str, origin: &str) -> Result<()> {
    let actual = sha256_hex(bytes);
    tracing::debug!("Calculated SHA256: {} ({} bytes)", actual, bytes.len());
    tracing::debug!("Expected SHA256:   {}", expected);
    if actual.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(LazykegError::Integrity {
            origin: origin.to_string(),
            expected: expected.to_string(),
            actual,
        })
    }
}

pub fn verify_checksum(path: &Path, expected: &str) -> Result<()> {
    tracing::debug!("Verifying checksum for: {}", path.display());
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let bytes_copied = io::copy(&mut file, &mut hasher)?;
    let actual = hex::encode(hasher.finalize());
    tracing::debug!(
        "Calculated SHA256: {} ({} bytes read)",
        actual,
        bytes_copied
    );
    if actual.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(LazykegError::Integrity {
            origin: path.display().to_string(),
            expected: expected.to_string(),
            actual,
        })
    }
}

/// Validates a URL, ensuring it uses the HTTPS scheme unless plain HTTP is allowed.
pub fn validate_url(url_str: &str, allow_http: bool) -> Result<()> {
    let url = Url::parse(url_str)
        .map_err(|e| LazykegError::Validation(format!("Failed to parse URL '{url_str}': {e}")))?;
    match url.scheme() {
        "https" => Ok(()),
        "http" if allow_http => {
            tracing::warn!("Fetching over plain http: {}", url_str);
            Ok(())
        }
        scheme => Err(LazykegError::Validation(format!(
            "Invalid URL scheme for '{url_str}': Must be https, but got '{scheme}'"
        ))),
    }
}
