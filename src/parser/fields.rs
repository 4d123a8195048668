//! Field selectors and per-item record extraction

use super::navigator::walk;
use super::{Document, Selector};
use crate::error::{LookupError, SourceError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Reserved record key holding the unmodified source item
pub const RAW_FIELD: &str = "raw";

/// One configured output field
///
/// A bare name selects the item key of the same name. An explicit entry
/// without a selector also falls back to its name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FieldSpec {
    Bare(String),
    Explicit {
        name: String,
        #[serde(default)]
        selector: Option<String>,
        #[serde(default)]
        label: Option<String>,
    },
}

impl FieldSpec {
    pub fn name(&self) -> &str {
        match self {
            Self::Bare(name) | Self::Explicit { name, .. } => name,
        }
    }

    pub fn selector(&self) -> Selector {
        match self {
            Self::Explicit {
                selector: Some(path),
                ..
            } => Selector::parse(path),
            other => Selector::parse(other.name()),
        }
    }
}

/// Output field name to selector, in configured order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSelectorMap {
    fields: IndexMap<String, Selector>,
}

impl FieldSelectorMap {
    /// Resolve field specs into selectors
    ///
    /// # Errors
    /// Returns a configuration error for empty or duplicate field names.
    pub fn from_specs(specs: impl IntoIterator<Item = FieldSpec>) -> Result<Self, SourceError> {
        let mut fields = IndexMap::new();
        for spec in specs {
            let name = spec.name();
            if name.is_empty() {
                return Err(SourceError::configuration("Field names must not be empty"));
            }
            if fields.contains_key(name) {
                return Err(SourceError::configuration(format!(
                    "Field '{}' is configured more than once",
                    name
                )));
            }
            fields.insert(name.to_string(), spec.selector());
        }
        Ok(Self { fields })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Selector> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Selector)> {
        self.fields
            .iter()
            .map(|(name, selector)| (name.as_str(), selector))
    }

    /// Build the record for one item
    ///
    /// # Errors
    /// Fails on the first field whose selector does not resolve; no
    /// partial record is returned.
    pub fn extract(&self, item: &Document, include_raw: bool) -> Result<CurrentItem, LookupError> {
        let fields = self
            .fields
            .iter()
            .map(|(name, selector)| walk(item, selector).map(|value| (name.clone(), value.clone())))
            .collect::<Result<IndexMap<_, _>, _>>()?;

        Ok(CurrentItem {
            fields,
            raw: include_raw.then(|| item.clone()),
        })
    }
}

/// The record built from a single item
///
/// Serializes as one map: fields in configured order, then `raw` when kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CurrentItem {
    #[serde(flatten)]
    fields: IndexMap<String, Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw: Option<Document>,
}

impl CurrentItem {
    /// Value of an output field; `raw` returns the source item when kept
    pub fn get(&self, name: &str) -> Option<&Document> {
        self.fields.get(name).or_else(|| match name {
            RAW_FIELD => self.raw.as_ref(),
            _ => None,
        })
    }

    pub fn raw(&self) -> Option<&Document> {
        self.raw.as_ref()
    }

    /// Field entries in configured order, followed by `raw` when present
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Document)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value))
            .chain(self.raw.iter().map(|raw| (RAW_FIELD, raw)))
    }

    pub fn len(&self) -> usize {
        self.fields.len() + usize::from(self.raw.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.iter()
                .map(|(name, value)| (name.to_string(), value.to_json()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupFailure;
    use serde_json::json;

    fn item() -> Document {
        Document::from_yaml_str(
            "id: 7\ntitle: Seven\nauthor:\n  name: Ada\n  tags: [math, code]\n",
        )
        .unwrap()
    }

    fn explicit(name: &str, selector: &str) -> FieldSpec {
        FieldSpec::Explicit {
            name: name.to_string(),
            selector: Some(selector.to_string()),
            label: None,
        }
    }

    #[test]
    fn test_bare_and_explicit_specs() {
        let map = FieldSelectorMap::from_specs(vec![
            FieldSpec::Bare("id".to_string()),
            explicit("author_name", "/author/name"),
            FieldSpec::Explicit {
                name: "title".to_string(),
                selector: None,
                label: Some("Title".to_string()),
            },
        ])
        .unwrap();

        let names: Vec<&str> = map.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["id", "author_name", "title"]);
        assert_eq!(map.get("id"), Some(&Selector::parse("id")));
        assert_eq!(map.get("author_name"), Some(&Selector::parse("author/name")));
        assert_eq!(map.get("title"), Some(&Selector::parse("title")));
    }

    #[test]
    fn test_duplicate_field_is_rejected() {
        let result = FieldSelectorMap::from_specs(vec![
            FieldSpec::Bare("id".to_string()),
            explicit("id", "other"),
        ]);
        assert!(matches!(result, Err(SourceError::Configuration(_))));
    }

    #[test]
    fn test_extract_follows_configured_order() {
        let map = FieldSelectorMap::from_specs(vec![
            explicit("second_tag", "author/tags/1"),
            FieldSpec::Bare("id".to_string()),
            explicit("author", "author/name"),
        ])
        .unwrap();

        let record = map.extract(&item(), false).unwrap();
        let names: Vec<&str> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["second_tag", "id", "author"]);
        assert_eq!(
            record.to_json().to_string(),
            r#"{"second_tag":"code","id":7,"author":"Ada"}"#
        );
        assert_eq!(
            record.to_json(),
            json!({"second_tag": "code", "id": 7, "author": "Ada"})
        );
        assert!(record.raw().is_none());
        assert!(record.get(RAW_FIELD).is_none());
    }

    #[test]
    fn test_extract_is_deterministic() {
        let map = FieldSelectorMap::from_specs(vec![
            FieldSpec::Bare("title".to_string()),
            explicit("tags", "author/tags"),
        ])
        .unwrap();

        let first = serde_json::to_string(&map.extract(&item(), true).unwrap()).unwrap();
        let second = serde_json::to_string(&map.extract(&item(), true).unwrap()).unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with(r#"{"title":"Seven","tags":["math","code"],"raw":"#));
    }

    #[test]
    fn test_extract_with_raw() {
        let map = FieldSelectorMap::from_specs(vec![FieldSpec::Bare("id".to_string())]).unwrap();
        let source = item();

        let record = map.extract(&source, true).unwrap();
        assert_eq!(record.raw(), Some(&source));
        assert_eq!(record.get(RAW_FIELD), Some(&source));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_raw_keeps_source_key_order() {
        let map = FieldSelectorMap::from_specs(vec![
            FieldSpec::Bare("zeta".to_string()),
            FieldSpec::Bare("alpha".to_string()),
        ])
        .unwrap();
        let source = Document::from_yaml_str("zeta: 1\nalpha: 2\n").unwrap();

        let record = map.extract(&source, true).unwrap();
        let expected = r#"{"zeta":1,"alpha":2,"raw":{"zeta":1,"alpha":2}}"#;
        assert_eq!(serde_json::to_string(&record).unwrap(), expected);
        assert_eq!(record.to_json().to_string(), expected);
    }

    #[test]
    fn test_missing_field_fails_the_row() {
        let map = FieldSelectorMap::from_specs(vec![
            FieldSpec::Bare("id".to_string()),
            explicit("email", "author/email"),
        ])
        .unwrap();

        let err = map.extract(&item(), false).unwrap_err();
        assert_eq!(err.segment, "email");
        assert_eq!(err.reason, LookupFailure::MissingKey);
    }

    #[test]
    fn test_empty_selector_takes_whole_item() {
        let map = FieldSelectorMap::from_specs(vec![explicit("value", "")]).unwrap();
        let scalar = Document::from_yaml_str("hello").unwrap();

        let record = map.extract(&scalar, false).unwrap();
        assert_eq!(record.get("value").and_then(Document::as_str), Some("hello"));
    }

    #[test]
    fn test_field_spec_deserialize() {
        let specs: Vec<FieldSpec> = serde_yaml::from_str(
            "- id\n- name: title\n  label: Title\n  selector: meta/title\n",
        )
        .unwrap();
        assert_eq!(specs[0], FieldSpec::Bare("id".to_string()));
        assert_eq!(specs[1].name(), "title");
        assert_eq!(specs[1].selector(), Selector::parse("meta/title"));
    }
}
