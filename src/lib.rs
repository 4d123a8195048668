//! Migrate Source YAML
//!
//! A YAML data source for migration pipelines: fetch a document, select
//! the list of items inside it, and map per-item paths to record fields.

pub mod cli;
pub mod config;
pub mod error;
pub mod etl;
pub mod fetch;
pub mod parser;
pub mod source;
pub mod storage;

// Re-exports for convenience
pub use config::SourceConfig;
pub use error::{FetchError, LookupError, SourceError};
pub use etl::{Extractor, Loader, Pipeline, RowToJson, Transformer};
pub use fetch::{DataFetcher, FileFetcher, HttpFetcher, UrlFetcher};
pub use parser::{CurrentItem, Document, ItemSelector, Selector, YamlParser};
pub use source::{SourceRow, YamlSource};
pub use storage::NdjsonWriter;
