//! YAML item selection and record extraction
//!
//! Turns a raw YAML buffer into a sequence of records:
//! - [`Document`] - the parsed tree
//! - [`Selector`] - slash-delimited paths into the tree
//! - [`select_items`] - locates the item list (path or legacy depth mode)
//! - [`Rows`] - walks the items, building a [`CurrentItem`] per item
//!
//! Everything here is synchronous and in-memory; fetching is handled by
//! [`crate::fetch`].

mod document;
mod fields;
mod iterator;
mod navigator;
mod selector;

pub use document::{Document, Mapping, Scalar};
pub use fields::{CurrentItem, FieldSelectorMap, FieldSpec, RAW_FIELD};
pub use iterator::{ItemCursor, Rows};
pub use navigator::{ItemSelector, select_by_depth, select_items, walk};
pub use selector::Selector;

use crate::error::SourceError;

/// Parses YAML buffers into rows according to a fixed configuration
///
/// # Example
/// ```
/// use migrate_source_yaml::parser::{FieldSelectorMap, FieldSpec, ItemSelector, Selector, YamlParser};
///
/// let fields = FieldSelectorMap::from_specs(vec![FieldSpec::Bare("id".to_string())])?;
/// let parser = YamlParser::new(ItemSelector::Path(Selector::parse("items")), fields, false);
///
/// let rows = parser.open(b"items:\n  - id: 1\n  - id: 2\n")?;
/// assert_eq!(rows.len(), 2);
/// # Ok::<(), migrate_source_yaml::SourceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct YamlParser {
    item_selector: ItemSelector,
    fields: FieldSelectorMap,
    include_raw: bool,
}

impl YamlParser {
    pub fn new(item_selector: ItemSelector, fields: FieldSelectorMap, include_raw: bool) -> Self {
        Self {
            item_selector,
            fields,
            include_raw,
        }
    }

    pub fn item_selector(&self) -> &ItemSelector {
        &self.item_selector
    }

    pub fn fields(&self) -> &FieldSelectorMap {
        &self.fields
    }

    pub fn include_raw(&self) -> bool {
        self.include_raw
    }

    /// Parse `bytes` and select the item list
    ///
    /// # Errors
    /// [`SourceError::Parse`] for malformed YAML, [`SourceError::Lookup`]
    /// when the item selector does not resolve.
    pub fn select(&self, bytes: &[u8]) -> Result<Vec<Document>, SourceError> {
        let document = Document::from_yaml_slice(bytes)?;
        let items = select_items(&document, &self.item_selector)?;
        log::debug!(
            "Selected {} item(s) with item selector {}",
            items.len(),
            self.item_selector
        );
        Ok(items)
    }

    /// Parse, select and return a fresh row iterator at the first item
    ///
    /// Every call starts over from the given bytes.
    ///
    /// # Errors
    /// Same as [`YamlParser::select`].
    pub fn open(&self, bytes: &[u8]) -> Result<Rows<'_>, SourceError> {
        let items = self.select(bytes)?;
        Ok(Rows::new(ItemCursor::new(items), &self.fields, self.include_raw))
    }
}
