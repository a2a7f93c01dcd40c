//! HTTP artifact fetching.
//!
//! Downloads a file only when it is not already present locally. An existing
//! file is never re-validated or replaced, and a failed download may leave a
//! truncated file behind.

use reqwest::blocking::Client;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use crate::error::{InstallError, Result};

/// Where a remote artifact lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSource {
    /// Host name, optionally with a scheme and port.
    pub host: String,
    /// Absolute path on the host.
    pub path: String,
}

impl RemoteSource {
    /// Create a source from host and path.
    pub fn new(host: &str, path: &str) -> Self {
        Self {
            host: host.to_string(),
            path: path.to_string(),
        }
    }

    /// Full URL; plain hosts are fetched over `http://`.
    pub fn url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        let base = if host.contains("://") {
            host.to_string()
        } else {
            format!("http://{}", host)
        };

        if self.path.starts_with('/') {
            format!("{}{}", base, self.path)
        } else {
            format!("{}/{}", base, self.path)
        }
    }
}

/// What [`HttpFetcher::fetch_if_absent`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The target existed; nothing was requested.
    AlreadyPresent,
    /// The body was written to the target.
    Downloaded { bytes: u64 },
}

/// Fetches artifacts over HTTP.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher; `timeout` of `None` waits indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(timeout)
            .build()
            .map_err(|e| InstallError::Other(anyhow::anyhow!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Download `source` to `target` unless `target` already exists.
    pub fn fetch_if_absent(&self, source: &RemoteSource, target: &Path) -> Result<FetchOutcome> {
        if target.exists() {
            tracing::debug!("{} already present, skipping download", target.display());
            return Ok(FetchOutcome::AlreadyPresent);
        }

        let url = source.url();
        tracing::debug!("Downloading {} to {}", url, target.display());

        let download_err = |message: String| InstallError::DownloadFailed {
            url: url.clone(),
            message,
        };

        let mut response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| download_err(e.to_string()))?;

        if !response.status().is_success() {
            return Err(download_err(format!("HTTP {}", response.status())));
        }

        let mut writer = BufWriter::new(File::create(target)?);
        let bytes = io::copy(&mut response, &mut writer).map_err(|e| download_err(e.to_string()))?;
        writer.flush()?;

        tracing::debug!("Downloaded {} bytes", bytes);
        Ok(FetchOutcome::Downloaded { bytes })
    }
}
