//! YAML source: configuration + fetcher + parser
//!
//! Drives one or more URLs through the parser and attaches row ids.

use crate::config::SourceConfig;
use crate::error::SourceError;
use crate::etl::Extractor;
use crate::fetch::DataFetcher;
use crate::parser::{CurrentItem, Document, Rows, YamlParser};
use eyre::Result;

/// One extracted record with its identifier values
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    /// Values of the `ids` fields, in configured order
    pub id: Vec<(String, Document)>,
    pub item: CurrentItem,
}

impl SourceRow {
    pub fn new(item: CurrentItem, ids: &[String]) -> Self {
        let id = ids
            .iter()
            .filter_map(|name| item.get(name).map(|value| (name.clone(), value.clone())))
            .collect();
        Self { id, item }
    }
}

/// A configured YAML source bound to a fetcher
///
/// Construction validates the configuration and never fetches. Each
/// [`open`](YamlSource::open) fetches and parses from scratch.
pub struct YamlSource<F> {
    parser: YamlParser,
    urls: Vec<String>,
    ids: Vec<String>,
    fetcher: F,
    skip_failed_rows: bool,
}

impl<F: DataFetcher> YamlSource<F> {
    /// # Errors
    /// Returns [`SourceError::Configuration`] for missing `ids` or
    /// inconsistent fields.
    pub fn new(config: &SourceConfig, fetcher: F) -> Result<Self, SourceError> {
        let resolved = config.resolve()?;
        log::debug!(
            "Configured YAML source: {} field(s), ids [{}], item selector {}",
            resolved.fields.len(),
            resolved.ids.join(", "),
            resolved.item_selector
        );
        Ok(Self {
            parser: YamlParser::new(
                resolved.item_selector,
                resolved.fields,
                resolved.include_raw_data,
            ),
            urls: resolved.urls,
            ids: resolved.ids,
            fetcher,
            skip_failed_rows: false,
        })
    }

    /// Skip rows whose fields do not resolve instead of failing the run
    pub fn skip_failed_rows(mut self, skip: bool) -> Self {
        self.skip_failed_rows = skip;
        self
    }

    /// Replace the configured URLs
    pub fn with_urls(mut self, urls: Vec<String>) -> Self {
        self.urls = urls;
        self
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn parser(&self) -> &YamlParser {
        &self.parser
    }

    /// Fetch `url` and return a fresh row iterator at its first item
    ///
    /// # Errors
    /// Fetch, parse, and item-selector lookup failures abort the open.
    pub async fn open(&self, url: &str) -> Result<Rows<'_>, SourceError> {
        log::debug!("Opening {}", url);
        let bytes = self.fetcher.fetch(url).await?;
        self.parser.open(&bytes)
    }

    /// Read every configured URL in order
    ///
    /// # Errors
    /// Any open failure aborts. A row whose fields do not resolve aborts
    /// too, unless failed rows are skipped.
    pub async fn rows(&self) -> Result<Vec<SourceRow>, SourceError> {
        if self.urls.is_empty() {
            log::warn!("No URLs configured for YAML source");
        }

        let mut collected = Vec::new();
        for url in &self.urls {
            let rows = self.open(url).await?;
            let selected = rows.len();
            let mut skipped = 0;

            for (position, row) in rows.enumerate() {
                match row {
                    Ok(item) => {
                        log::trace!("Row {} of {}", position, url);
                        collected.push(SourceRow::new(item, &self.ids));
                    }
                    Err(e) if self.skip_failed_rows => {
                        log::warn!("Skipping item {} of {}: {}", position, url, e);
                        skipped += 1;
                    }
                    Err(e) => return Err(e.into()),
                }
            }

            log::info!(
                "Read {} row(s) from {} ({} skipped)",
                selected - skipped,
                url,
                skipped
            );
        }
        Ok(collected)
    }

    /// Number of items selected across all URLs
    ///
    /// # Errors
    /// Same as [`YamlSource::open`].
    pub async fn count(&self) -> Result<usize, SourceError> {
        let mut total = 0;
        for url in &self.urls {
            let bytes = self.fetcher.fetch(url).await?;
            total += self.parser.select(&bytes)?.len();
        }
        Ok(total)
    }
}

impl<F: DataFetcher> Extractor for YamlSource<F> {
    type Item = SourceRow;

    async fn extract(&self) -> Result<Vec<Self::Item>> {
        Ok(self.rows().await?)
    }
}
