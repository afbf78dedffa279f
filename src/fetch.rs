//! Release asset download client

use crate::{FetchError, Result};
use reqwest::{header, Client};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// User agent sent with every download
const USER_AGENT: &str = concat!("cluster-stack-fetch/", env!("CARGO_PKG_VERSION"));

/// HTTP client for GitHub release downloads
///
/// One GET per download, no retries.
#[derive(Debug, Clone)]
pub struct ReleaseClient {
    client: Client,
    download_dir: Option<PathBuf>,
}

impl ReleaseClient {
    /// Create a client; `timeout` bounds each whole request when set
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().default_headers({
            let mut headers = header::HeaderMap::new();
            headers.insert(
                header::USER_AGENT,
                header::HeaderValue::from_static(USER_AGENT),
            );
            headers
        });

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            download_dir: None,
        })
    }

    /// Store downloads in `dir` instead of the system temp directory
    pub fn with_download_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.download_dir = dir;
        self
    }

    /// Download `url` into a new temporary file and return its path
    ///
    /// The body is streamed chunk by chunk. The file is kept on disk.
    pub async fn download(&self, url: &str) -> Result<PathBuf> {
        info!(url = %url, "Downloading release manifest");

        let mut response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Download(format!("HTTP {} for {}", status, url)));
        }

        let mut file = match &self.download_dir {
            Some(dir) => NamedTempFile::new_in(dir)?,
            None => NamedTempFile::new()?,
        };

        let mut written = 0usize;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk)?;
            written += chunk.len();
        }
        file.flush()?;

        let (_, path) = file.keep().map_err(|e| e.error)?;
        debug!(path = %path.display(), bytes = written, "Stored release manifest");

        Ok(path)
    }
}
