//! Error types for the YAML source.
//!
//! - [`SourceError`] - top-level error returned by source construction and opening
//! - [`FetchError`] - the data fetcher could not retrieve bytes
//! - [`LookupError`] - a selector did not resolve against a document
//!
//! Application code (CLI, ETL pipeline) wraps these in `eyre::Report`.

use crate::parser::Selector;
use thiserror::Error;

/// Errors raised while configuring or opening a YAML source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Required configuration is missing or malformed.
    #[error("Invalid source configuration: {0}")]
    Configuration(String),

    /// The fetcher failed to retrieve the document.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The fetched buffer is not well-formed YAML.
    #[error("Failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A configured selector does not match the document shape.
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl SourceError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Errors from a [`DataFetcher`](crate::fetch::DataFetcher).
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL could not be parsed.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// No fetcher handles this URL scheme.
    #[error("Unsupported URL scheme '{scheme}' in {url}")]
    UnsupportedScheme { url: String, scheme: String },

    /// A `file://` URL that does not name a local path.
    #[error("Not a local file path: {url}")]
    NotAFilePath { url: String },

    /// Reading a local file failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The HTTP request could not be sent or its body read.
    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("HTTP request to {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// A configured request header is not valid.
    #[error("Invalid HTTP header '{name}': {message}")]
    InvalidHeader { name: String, message: String },
}

/// Why a single selector segment failed to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupFailure {
    /// The mapping has no such key.
    #[error("key not found")]
    MissingKey,
    /// The sequence index is past the end.
    #[error("index out of range (length {len})")]
    IndexOutOfRange { len: usize },
    /// The segment is not an unsigned integer but the value is a sequence.
    #[error("sequence index is not an unsigned integer")]
    NotAnIndex,
    /// The value is a scalar and cannot be indexed.
    #[error("cannot index into a {kind}")]
    NotAContainer { kind: &'static str },
}

/// A selector segment that did not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Selector '{selector}' failed at segment '{segment}': {reason}")]
pub struct LookupError {
    pub selector: Selector,
    pub segment: String,
    pub reason: LookupFailure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_message() {
        let err = LookupError {
            selector: Selector::parse("/items/missing"),
            segment: "missing".to_string(),
            reason: LookupFailure::MissingKey,
        };
        assert_eq!(
            err.to_string(),
            "Selector 'items/missing' failed at segment 'missing': key not found"
        );
    }

    #[test]
    fn test_lookup_failure_messages() {
        assert_eq!(
            LookupFailure::IndexOutOfRange { len: 2 }.to_string(),
            "index out of range (length 2)"
        );
        assert_eq!(
            LookupFailure::NotAContainer { kind: "string" }.to_string(),
            "cannot index into a string"
        );
    }

    #[test]
    fn test_lookup_converts_to_source_error() {
        let err = LookupError {
            selector: Selector::parse("a/0"),
            segment: "0".to_string(),
            reason: LookupFailure::NotAContainer { kind: "string" },
        };
        let source: SourceError = err.clone().into();
        assert!(matches!(source, SourceError::Lookup(ref inner) if *inner == err));
    }
}
