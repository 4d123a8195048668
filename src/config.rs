//! Source configuration
//!
//! Example format:
//! ```yaml
//! urls:
//!   - https://example.com/articles.yml
//! ids:
//!   id:
//!     type: integer
//! item_selector: data/articles
//! fields:
//!   - id
//!   - name: author
//!     label: Author name
//!     selector: meta/author/name
//! include_raw_data: true
//! ```

use crate::error::SourceError;
use crate::parser::{FieldSelectorMap, FieldSpec, ItemSelector};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Raw source configuration as written by the user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceConfig {
    /// Documents to read, in order
    #[serde(default)]
    pub urls: Urls,

    /// Fields forming the unique row identifier
    #[serde(default)]
    pub ids: Option<IdsConfig>,

    /// Where the item list lives; the root when absent
    #[serde(default)]
    pub item_selector: ItemSelector,

    /// Output fields
    #[serde(default)]
    pub fields: FieldsConfig,

    /// Add the unmodified source item as a `raw` field
    #[serde(default)]
    pub include_raw_data: bool,

    /// Force a fetcher instead of choosing one by URL scheme
    #[serde(default)]
    pub data_fetcher_plugin: Option<FetcherKind>,

    /// Extra HTTP request headers
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

/// One URL or a list of URLs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Urls {
    One(String),
    Many(Vec<String>),
}

impl Default for Urls {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl Urls {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::One(url) => vec![url.clone()],
            Self::Many(urls) => urls.clone(),
        }
    }
}

/// Row identifier fields: a list of names or a name-to-schema mapping
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IdsConfig {
    Names(Vec<String>),
    Schema(serde_yaml::Mapping),
}

impl IdsConfig {
    /// Field names in configured order
    pub fn names(&self) -> Result<Vec<String>, SourceError> {
        match self {
            Self::Names(names) => Ok(names.clone()),
            Self::Schema(mapping) => mapping
                .keys()
                .map(|key| {
                    key.as_str().map(str::to_string).ok_or_else(|| {
                        SourceError::configuration(format!("ID field name must be a string: {:?}", key))
                    })
                })
                .collect(),
        }
    }
}

/// Output fields: a list of [`FieldSpec`]s, or a mapping keyed by field name
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldsConfig {
    List(Vec<FieldSpec>),
    Map(serde_yaml::Mapping),
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl FieldsConfig {
    /// Normalize to field specs in configured order
    ///
    /// In the mapping form a nested mapping carrying `selector` is an
    /// explicit field; any other value makes a bare field named by its key.
    pub fn specs(&self) -> Result<Vec<FieldSpec>, SourceError> {
        match self {
            Self::List(specs) => Ok(specs.clone()),
            Self::Map(mapping) => mapping
                .iter()
                .map(|(key, value)| -> Result<FieldSpec, SourceError> {
                    let key = key.as_str().ok_or_else(|| {
                        SourceError::configuration(format!("Field name must be a string: {:?}", key))
                    })?;
                    Ok(match value.get("selector").and_then(|s| s.as_str()) {
                        Some(selector) => FieldSpec::Explicit {
                            name: value
                                .get("name")
                                .and_then(|n| n.as_str())
                                .unwrap_or(key)
                                .to_string(),
                            selector: Some(selector.to_string()),
                            label: value.get("label").and_then(|l| l.as_str()).map(str::to_string),
                        },
                        None => FieldSpec::Bare(key.to_string()),
                    })
                })
                .collect(),
        }
    }
}

/// Which fetcher retrieves the documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetcherKind {
    File,
    Http,
}

/// Validated configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub urls: Vec<String>,
    pub ids: Vec<String>,
    pub item_selector: ItemSelector,
    pub fields: FieldSelectorMap,
    pub include_raw_data: bool,
}

impl SourceConfig {
    /// Parse configuration from YAML text
    ///
    /// # Errors
    /// Malformed YAML or unexpected value types become a configuration error.
    pub fn from_yaml_str(text: &str) -> Result<Self, SourceError> {
        serde_yaml::from_str(text).map_err(|e| SourceError::configuration(e.to_string()))
    }

    /// Read configuration from a YAML file
    pub fn read(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SourceError::configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Check required options and resolve field selectors
    ///
    /// # Errors
    /// Returns [`SourceError::Configuration`] when `ids` is missing or
    /// empty, an id is not a configured field, field names collide, or a
    /// field is named `raw` while raw data is included.
    pub fn resolve(&self) -> Result<ResolvedConfig, SourceError> {
        let ids = match &self.ids {
            Some(ids) => ids.names()?,
            None => Vec::new(),
        };
        if ids.is_empty() {
            return Err(SourceError::configuration(
                r#"You must declare "ids" as a unique array of fields in your source settings."#,
            ));
        }

        let fields = FieldSelectorMap::from_specs(self.fields.specs()?)?;

        if let Some(missing) = ids.iter().find(|id| !fields.contains(id)) {
            return Err(SourceError::configuration(format!(
                "ID field '{}' is not one of the configured fields",
                missing
            )));
        }

        if self.include_raw_data && fields.contains(crate::parser::RAW_FIELD) {
            return Err(SourceError::configuration(format!(
                "Field name '{}' is reserved when include_raw_data is set",
                crate::parser::RAW_FIELD
            )));
        }

        Ok(ResolvedConfig {
            urls: self.urls.to_vec(),
            ids,
            item_selector: self.item_selector.clone(),
            fields,
            include_raw_data: self.include_raw_data,
        })
    }
}
