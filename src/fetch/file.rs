//! Local file fetcher

use super::DataFetcher;
use crate::error::FetchError;
use std::path::PathBuf;
use url::Url;

/// Reads documents from plain paths or `file://` URLs
#[derive(Debug, Clone, Default)]
pub struct FileFetcher;

impl FileFetcher {
    pub fn new() -> Self {
        Self
    }

    /// Map a URL or plain path to a local path
    pub fn path_for(url: &str) -> Result<PathBuf, FetchError> {
        if url.starts_with("file:") {
            let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
                url: url.to_string(),
                source,
            })?;
            return parsed.to_file_path().map_err(|_| FetchError::NotAFilePath {
                url: url.to_string(),
            });
        }
        Ok(PathBuf::from(url))
    }
}

impl DataFetcher for FileFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let path = Self::path_for(url)?;
        log::debug!("Reading {}", path.display());
        tokio::fs::read(&path).await.map_err(|source| FetchError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}
