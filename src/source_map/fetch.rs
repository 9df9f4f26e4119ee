//! Fetching generated source text for source map discovery

use crate::core::error::{LoggerError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use url::Url;

/// Loads the content served at a generated file's URL.
///
/// # Example
///
/// ```no_run
/// use rust_log_bridge::source_map::SourceFetcher;
/// use rust_log_bridge::core::Result;
/// use async_trait::async_trait;
///
/// struct Bundled;
///
/// #[async_trait]
/// impl SourceFetcher for Bundled {
///     async fn fetch(&self, url: &str) -> Result<String> {
///         Ok(format!("// contents of {}", url))
///     }
/// }
/// ```
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Where a URL's content is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Origin {
    Http,
    File(PathBuf),
    Unsupported(String),
}

fn classify(url: &str) -> Origin {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Origin::Http,
        Ok(parsed) if parsed.scheme() == "file" => match parsed.to_file_path() {
            Ok(path) => Origin::File(path),
            Err(()) => Origin::Unsupported(url.to_string()),
        },
        Ok(parsed) if !parsed.cannot_be_a_base() => Origin::Unsupported(parsed.scheme().to_string()),
        _ => Origin::File(PathBuf::from(url)),
    }
}

/// Reads `http(s)://` URLs over HTTP and `file://` URLs or bare paths from disk.
///
/// There is no timeout on either path.
#[derive(Debug, Clone, Default)]
pub struct DefaultFetcher {
    #[cfg(feature = "http")]
    client: reqwest::Client,
}

impl DefaultFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(feature = "http")]
    async fn fetch_http(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| LoggerError::fetch(url, e.to_string()))?;

        response
            .text()
            .await
            .map_err(|e| LoggerError::fetch(url, e.to_string()))
    }

    #[cfg(not(feature = "http"))]
    async fn fetch_http(&self, url: &str) -> Result<String> {
        Err(LoggerError::fetch(url, "HTTP support is disabled (enable the `http` feature)"))
    }
}

#[async_trait]
impl SourceFetcher for DefaultFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        match classify(url) {
            Origin::Http => self.fetch_http(url).await,
            Origin::File(path) => tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| LoggerError::fetch(url, e.to_string())),
            Origin::Unsupported(scheme) => {
                Err(LoggerError::fetch(url, format!("unsupported scheme '{}'", scheme)))
            }
        }
    }
}
