use std::path::Path;
use std::time::Duration;
use reqwest::{Client, Url};
use crate::errors::{ReverseEngineerError, ReverseEngineerResult};

/// Turns a locator (local path or http(s) URL) into source text.
#[derive(Clone)]
pub struct SourceResolver {
    client: Client,
}

impl SourceResolver {
    pub fn new(timeout: Duration) -> ReverseEngineerResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ReverseEngineerError::config_error(&format!("Failed to build HTTP client: {e}"), None, None))?;
        Ok(Self { client })
    }

    pub async fn resolve(&self, locator: &str) -> ReverseEngineerResult<String> {
        let locator = locator.trim();
        if locator.is_empty() {
            return Err(ReverseEngineerError::read_error(locator, "empty path"));
        }

        match Url::parse(locator) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => {
                self.fetch(locator, url).await
            }
            Ok(url) if url.scheme() == "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|()| ReverseEngineerError::read_error(locator, "invalid file URL"))?;
                Self::read_local(locator, &path).await
            }
            // Windows drive letters and bare paths land here too.
            _ => Self::read_local(locator, Path::new(locator)).await,
        }
    }

    async fn fetch(&self, locator: &str, url: Url) -> ReverseEngineerResult<String> {
        log::debug!("🌐 Fetching source from {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ReverseEngineerError::fetch_error(locator, None, &e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("request failed");
            return Err(ReverseEngineerError::fetch_error(locator, Some(status.as_u16()), reason));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ReverseEngineerError::fetch_error(locator, Some(status.as_u16()), &e.to_string()))?;
        log::debug!("📥 Fetched {} bytes", text.len());
        Ok(text)
    }

    async fn read_local(locator: &str, path: &Path) -> ReverseEngineerResult<String> {
        log::debug!("📄 Reading source from {}", path.display());
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ReverseEngineerError::read_error(locator, &e.to_string()))
    }
}
