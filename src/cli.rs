//! CLI helper functions

use crate::{
    config::SourceConfig,
    etl::{Pipeline, RowToJson},
    fetch::{Auth, AuthType, UrlFetcher},
    source::YamlSource,
    storage::NdjsonWriter,
};
use eyre::{Context, Result};
use std::path::Path;

/// Options for the `extract` command
#[derive(Debug, Default, Clone)]
pub struct ExtractOptions {
    /// URLs to read instead of the configured ones
    pub urls: Vec<String>,
    /// NDJSON output file; stdout when unset
    pub output: Option<String>,
    /// Skip rows whose fields do not resolve
    pub skip_failed_rows: bool,
    /// Add the row identifier to each record under `_id`
    pub with_ids: bool,
    /// Force an authentication type for HTTP fetches
    pub auth: Option<AuthType>,
}

/// Read the source configuration file
pub fn load_source_config(path: impl AsRef<Path>) -> Result<SourceConfig> {
    let path = path.as_ref();
    SourceConfig::read(path)
        .with_context(|| format!("Failed to load source configuration: {}", path.display()))
}

/// Build the URL fetcher from configuration and environment variables
///
/// Expected environment variables:
/// - YAML_SOURCE_APIKEY: API key for HTTP auth (optional)
/// - YAML_SOURCE_USERNAME / YAML_SOURCE_PASSWORD: Basic auth (optional)
pub fn load_fetcher(config: &SourceConfig, auth: Option<&AuthType>) -> Result<UrlFetcher> {
    let auth = Auth::from_env(auth);
    log::debug!("Using {} authentication for HTTP fetches", auth);
    UrlFetcher::try_new(auth, &config.headers, config.data_fetcher_plugin)
        .context("Failed to create data fetcher")
}

fn load_source(
    config_path: &Path,
    urls: &[String],
    auth: Option<&AuthType>,
) -> Result<YamlSource<UrlFetcher>> {
    let config = load_source_config(config_path)?;
    let fetcher = load_fetcher(&config, auth)?;
    let source = YamlSource::new(&config, fetcher).context("Invalid source configuration")?;

    let source = match urls.is_empty() {
        true => source,
        false => source.with_urls(urls.to_vec()),
    };
    if source.urls().is_empty() {
        eyre::bail!(
            "No URLs to read: set `urls` in {} or pass --url",
            config_path.display()
        );
    }
    Ok(source)
}

/// Extract rows and write them as NDJSON
///
/// Pipeline: YamlSource → RowToJson → NdjsonWriter
pub async fn extract_rows(config_path: impl AsRef<Path>, options: ExtractOptions) -> Result<usize> {
    let config_path = config_path.as_ref();
    log::info!("Loading source configuration from {}", config_path.display());

    let source = load_source(config_path, &options.urls, options.auth.as_ref())?
        .skip_failed_rows(options.skip_failed_rows);
    log::info!("Reading {} URL(s)", source.urls().len());

    let loader = match &options.output {
        Some(path) => NdjsonWriter::new(path),
        None => NdjsonWriter::stdout(),
    };

    let pipeline = Pipeline::new(source, RowToJson::new().with_ids(options.with_ids), loader);
    pipeline.run().await.context("Extraction failed")
}

/// Count selected items across all URLs
pub async fn count_items(
    config_path: impl AsRef<Path>,
    urls: &[String],
    auth: Option<&AuthType>,
) -> Result<usize> {
    let config_path = config_path.as_ref();
    let source = load_source(config_path, urls, auth)?;
    source.count().await.context("Counting items failed")
}
