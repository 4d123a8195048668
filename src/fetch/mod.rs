//! Data fetchers: turn a URL into raw bytes
//!
//! - [`FileFetcher`] for local paths and `file://` URLs
//! - [`HttpFetcher`] for `http://` and `https://`
//! - [`UrlFetcher`] chooses between them per URL

mod auth;
mod file;
mod http;

pub use auth::{Auth, AuthType};
pub use file::FileFetcher;
pub use http::HttpFetcher;

use crate::config::FetcherKind;
use crate::error::FetchError;
use std::collections::BTreeMap;
use url::Url;

/// Retrieves the raw bytes behind a URL
///
/// # Example
/// ```no_run
/// use migrate_source_yaml::FetchError;
/// use migrate_source_yaml::fetch::DataFetcher;
///
/// struct Fixed(&'static str);
///
/// impl DataFetcher for Fixed {
///     async fn fetch(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
///         Ok(self.0.as_bytes().to_vec())
///     }
/// }
/// ```
pub trait DataFetcher: Send + Sync {
    /// Fetch the document at `url`
    ///
    /// # Errors
    /// Returns an error if the document cannot be retrieved.
    fn fetch(&self, url: &str) -> impl std::future::Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

/// Dispatches to the file or HTTP fetcher
#[derive(Clone, Debug)]
pub struct UrlFetcher {
    file: FileFetcher,
    http: HttpFetcher,
    forced: Option<FetcherKind>,
}

impl UrlFetcher {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn try_new(
        auth: Auth,
        headers: &BTreeMap<String, String>,
        forced: Option<FetcherKind>,
    ) -> Result<Self, FetchError> {
        Ok(Self {
            file: FileFetcher::new(),
            http: HttpFetcher::try_new(auth, headers)?,
            forced,
        })
    }

    /// Which fetcher handles `url`
    pub fn kind_for(&self, url: &str) -> Result<FetcherKind, FetchError> {
        if let Some(kind) = self.forced {
            return Ok(kind);
        }
        match Url::parse(url) {
            Ok(parsed) => match parsed.scheme() {
                "http" | "https" => Ok(FetcherKind::Http),
                "file" => Ok(FetcherKind::File),
                // Windows drive letters parse as one-letter schemes
                scheme if scheme.len() == 1 => Ok(FetcherKind::File),
                scheme => Err(FetchError::UnsupportedScheme {
                    url: url.to_string(),
                    scheme: scheme.to_string(),
                }),
            },
            Err(url::ParseError::RelativeUrlWithoutBase) => Ok(FetcherKind::File),
            Err(source) => Err(FetchError::InvalidUrl {
                url: url.to_string(),
                source,
            }),
        }
    }
}

impl DataFetcher for UrlFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        match self.kind_for(url)? {
            FetcherKind::File => self.file.fetch(url).await,
            FetcherKind::Http => self.http.fetch(url).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher(forced: Option<FetcherKind>) -> UrlFetcher {
        UrlFetcher::try_new(Auth::None, &BTreeMap::new(), forced).unwrap()
    }

    #[test]
    fn test_kind_by_scheme() {
        let fetcher = fetcher(None);
        assert_eq!(fetcher.kind_for("https://example.com/a.yml").unwrap(), FetcherKind::Http);
        assert_eq!(fetcher.kind_for("http://example.com/a.yml").unwrap(), FetcherKind::Http);
        assert_eq!(fetcher.kind_for("file:///tmp/a.yml").unwrap(), FetcherKind::File);
        assert_eq!(fetcher.kind_for("data/a.yml").unwrap(), FetcherKind::File);
        assert_eq!(fetcher.kind_for("/srv/data/a.yml").unwrap(), FetcherKind::File);
        assert!(matches!(
            fetcher.kind_for("ftp://example.com/a.yml"),
            Err(FetchError::UnsupportedScheme { .. })
        ));
    }

    #[test]
    fn test_forced_kind() {
        let fetcher = fetcher(Some(FetcherKind::File));
        assert_eq!(fetcher.kind_for("https://example.com/a.yml").unwrap(), FetcherKind::File);
    }
}
