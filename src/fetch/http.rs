//! HTTP fetcher

use super::{Auth, DataFetcher};
use crate::error::FetchError;
use base64::Engine;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use std::collections::BTreeMap;

/// Retrieves documents with HTTP GET requests
///
/// Any non-success status is a [`FetchError::Status`]; nothing is retried.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher sending `auth` and `headers` with every request
    ///
    /// # Errors
    /// Returns an error if a header is invalid or the client cannot be built.
    pub fn try_new(auth: Auth, headers: &BTreeMap<String, String>) -> Result<Self, FetchError> {
        let mut header_map = HeaderMap::new();
        for (name, value) in headers {
            let invalid = |message: String| FetchError::InvalidHeader {
                name: name.clone(),
                message,
            };
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
            let header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
            header_map.append(header_name, header_value);
        }

        if let Some(credentials) = authorization(&auth) {
            let value = HeaderValue::from_str(&credentials).map_err(|e| {
                FetchError::InvalidHeader {
                    name: AUTHORIZATION.to_string(),
                    message: e.to_string(),
                }
            })?;
            header_map.insert(AUTHORIZATION, value);
        }

        log::debug!("Building HTTP fetcher with {} authentication", auth);
        let client = Client::builder()
            .default_headers(header_map)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

fn authorization(auth: &Auth) -> Option<String> {
    match auth {
        Auth::Basic(username, password) => {
            let credentials = base64::engine::general_purpose::STANDARD
                .encode(format!("{}:{}", username, password));
            Some(format!("Basic {}", credentials))
        }
        Auth::Apikey(apikey) => Some(format!("ApiKey {}", apikey)),
        Auth::None => None,
    }
}

impl DataFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        log::debug!("GET {}", url);
        let http_error = |source| FetchError::Http {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(http_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(http_error)?;
        log::trace!("Received {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_header() {
        let basic = authorization(&Auth::Basic("user".to_string(), "pass".to_string()));
        assert_eq!(basic.as_deref(), Some("Basic dXNlcjpwYXNz"));

        let apikey = authorization(&Auth::Apikey("abc".to_string()));
        assert_eq!(apikey.as_deref(), Some("ApiKey abc"));

        assert_eq!(authorization(&Auth::None), None);
    }

    #[test]
    fn test_invalid_header_is_rejected() {
        let mut headers = BTreeMap::new();
        headers.insert("bad header".to_string(), "value".to_string());

        let result = HttpFetcher::try_new(Auth::None, &headers);
        assert!(matches!(result, Err(FetchError::InvalidHeader { .. })));
    }
}
