// lazykeg-aio/src/checksum.rs
use std::path::Path;

use lazykeg_common::error::{LazykegError, Result};
use sha2::{Digest, Sha256};
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::debug;

const BUF_SIZE: usize = 64 * 1024;

/// Asynchronously computes the lowercase hex SHA-256 of a file.
pub async fn sha256_file_async(path: &Path) -> Result<String> {
    debug!("Async hashing: {}", path.display());
    let mut file = File::open(path).await?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; BUF_SIZE];
    let mut total_bytes_read = 0u64;

    loop {
        let n = file.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
        total_bytes_read += n as u64;
    }

    let actual = hex::encode(hasher.finalize());
    debug!(
        "Async Calculated SHA256: {} ({} bytes read)",
        actual, total_bytes_read
    );
    Ok(actual)
}

/// Asynchronously verifies the SHA256 checksum of a file.
pub async fn verify_checksum_async(path: &Path, expected: &str) -> Result<()> {
    let actual = sha256_file_async(path).await?;
    debug!("Expected SHA256:   {}", expected);
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
