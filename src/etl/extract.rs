//! Extractor trait for pulling records out of a source

use eyre::Result;

/// Extractor trait for extracting data from a source
///
/// [`YamlSource`](crate::YamlSource) is the extractor this crate provides;
/// tests and embedders can supply their own.
///
/// # Example
/// ```no_run
/// use migrate_source_yaml::etl::Extractor;
/// use eyre::Result;
///
/// struct StaticRows(Vec<serde_json::Value>);
///
/// impl Extractor for StaticRows {
///     type Item = serde_json::Value;
///
///     async fn extract(&self) -> Result<Vec<Self::Item>> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait Extractor: Send + Sync {
    /// The type of items extracted
    type Item: Send;

    /// Extract items from the source
    ///
    /// # Errors
    /// Returns an error if extraction fails (fetching, parsing, selection)
    fn extract(&self) -> impl std::future::Future<Output = Result<Vec<Self::Item>>> + Send;
}
