use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use lazykeg_aio::fs::{atomic_write_file, DATA_MODE};
use lazykeg_common::error::{LazykegError, Result};
use lazykeg_common::model::PackageDescriptor;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::validation::{ensure_digest_configured, validate_url, verify_checksum, verify_digest};

const DOWNLOAD_TIMEOUT_SECS: u64 = 300;
const CONNECT_TIMEOUT_SECS: u64 = 30;
const MAX_REDIRECTS: usize = 10;
const USER_AGENT_STRING: &str = "lazykeg package installer (Rust)";

/// Downloads release artifacts and refuses to hand back anything whose
/// SHA-256 digest does not match the declared one.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    allow_http: bool,
    show_progress: bool,
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: build_http_client()?,
            allow_http: false,
            show_progress: false,
        })
    }

    /// Permits `http://` URLs. Only meant for local mirrors and tests.
    pub fn allow_plain_http(mut self, allow: bool) -> Self {
        self.allow_http = allow;
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Downloads `url` into memory and verifies it against `expected_sha256`.
    pub async fn fetch_and_verify(&self, url: &str, expected_sha256: &str) -> Result<Vec<u8>> {
        ensure_digest_configured(expected_sha256)?;
        validate_url(url, self.allow_http)?;
        debug!("Attempting download from: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            debug!("HTTP request failed for {url}: {e}");
            network_error(url, format!("HTTP request failed: {e}"))
        })?;
        let status = response.status();
        debug!("Received HTTP status: {} for {}", status, url);

        if !status.is_success() {
            let reason = match status {
                StatusCode::NOT_FOUND => "Resource not found (404)".to_string(),
                StatusCode::FORBIDDEN => "Access forbidden (403)".to_string(),
                _ => format!("HTTP error {status}"),
            };
            return Err(network_error(url, reason));
        }

        let progress = self.progress_bar(response.content_length());
        let mut body = Vec::with_capacity(response.content_length().unwrap_or(0) as usize);
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                progress.abandon();
                network_error(url, format!("Failed to read response body: {e}"))
            })?;
            progress.inc(chunk.len() as u64);
            body.extend_from_slice(&chunk);
        }
        progress.finish_and_clear();
        debug!("Downloaded {} bytes from {}", body.len(), url);

        verify_digest(&body, expected_sha256, url)?;
        debug!("Checksum verified for {}", url);
        Ok(body)
    }

    /// Like [`Fetcher::fetch_and_verify`], but reuses a previously verified
    /// copy under `cache_dir` when its digest still matches.
    pub async fn fetch_cached(
        &self,
        descriptor: &PackageDescriptor,
        cache_dir: &Path,
    ) -> Result<Vec<u8>> {
        let cache_path = cache_path_for(descriptor, cache_dir);
        debug!("Target cache path: {}", cache_path.display());

        if cache_path.is_file() {
            match verify_checksum(&cache_path, &descriptor.sha256) {
                Ok(()) => {
                    debug!("Using valid cached file: {}", cache_path.display());
                    return Ok(fs::read(&cache_path)?);
                }
                Err(e) => {
                    debug!(
                        "Cached file invalid ({}): {}. Redownloading.",
                        cache_path.display(),
                        e
                    );
                    if let Err(remove_err) = fs::remove_file(&cache_path) {
                        warn!(
                            "Failed to remove corrupted cached file {}: {}",
                            cache_path.display(),
                            remove_err
                        );
                    }
                }
            }
        }

        let bytes = self
            .fetch_and_verify(&descriptor.url, &descriptor.sha256)
            .await?;
        if let Err(e) = store_in_cache(&cache_path, &bytes) {
            warn!(
                "Could not cache {} at {}: {}",
                descriptor.url,
                cache_path.display(),
                e
            );
        }
        Ok(bytes)
    }

    fn progress_bar(&self, len: Option<u64>) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        match len {
            Some(len) => {
                let style = ProgressStyle::with_template(
                    "{bar:40.cyan/blue} {bytes}/{total_bytes} ({eta})",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar());
                ProgressBar::new(len).with_style(style)
            }
            None => ProgressBar::new_spinner(),
        }
    }
}

pub fn cache_path_for(descriptor: &PackageDescriptor, cache_dir: &Path) -> PathBuf {
    cache_dir.join(format!(
        "{}-{}-{}",
        descriptor.name,
        descriptor.version,
        descriptor.artifact_filename()
    ))
}

fn store_in_cache(cache_path: &Path, bytes: &[u8]) -> Result<()> {
    atomic_write_file(cache_path, bytes, DATA_MODE)?;
    debug!("Cached verified artifact at {}", cache_path.display());
    Ok(())
}

fn network_error(url: &str, reason: String) -> LazykegError {
    LazykegError::Network {
        url: url.to_string(),
        reason,
    }
}

fn build_http_client() -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_STRING));
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    Client::builder()
        .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
        .map_err(|e| LazykegError::Config(format!("Failed to build HTTP client: {e}")))
}
