//! Transformer trait for data transformation

use crate::source::SourceRow;
use eyre::Result;

/// Transformer trait for transforming data items
///
/// # Example
/// ```no_run
/// use migrate_source_yaml::etl::Transformer;
/// use eyre::Result;
///
/// struct Uppercase;
///
/// impl Transformer for Uppercase {
///     type Input = String;
///     type Output = String;
///
///     fn transform(&self, input: Self::Input) -> Result<Self::Output> {
///         Ok(input.to_uppercase())
///     }
/// }
/// ```
pub trait Transformer: Send + Sync {
    /// Input item type
    type Input: Send;

    /// Output item type after transformation
    type Output: Send;

    /// Transform a single item
    ///
    /// # Errors
    /// Returns an error if transformation fails
    fn transform(&self, input: Self::Input) -> Result<Self::Output>;

    /// Transform multiple items (default batch implementation)
    fn transform_many(&self, inputs: Vec<Self::Input>) -> Result<Vec<Self::Output>> {
        inputs.into_iter().map(|i| self.transform(i)).collect()
    }
}

/// Renders source rows as JSON objects
///
/// The record fields come first in configured order; with `with_ids` the
/// row identifier is added under `_id`.
#[derive(Debug, Default, Clone)]
pub struct RowToJson {
    with_ids: bool,
}

impl RowToJson {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids(mut self, with_ids: bool) -> Self {
        self.with_ids = with_ids;
        self
    }
}

impl Transformer for RowToJson {
    type Input = SourceRow;
    type Output = serde_json::Value;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        let mut value = input.item.to_json();
        if self.with_ids
            && let Some(object) = value.as_object_mut()
        {
            let ids = input
                .id
                .iter()
                .map(|(name, value)| (name.clone(), value.to_json()))
                .collect();
            object.insert("_id".to_string(), serde_json::Value::Object(ids));
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Document, FieldSelectorMap, FieldSpec};
    use serde_json::json;

    fn row() -> SourceRow {
        let fields = FieldSelectorMap::from_specs(vec![
            FieldSpec::Bare("id".to_string()),
            FieldSpec::Bare("title".to_string()),
        ])
        .unwrap();
        let item = Document::from_yaml_str("id: 4\ntitle: Four\n").unwrap();
        SourceRow::new(fields.extract(&item, false).unwrap(), &["id".to_string()])
    }

    #[test]
    fn test_row_to_json() {
        let output = RowToJson::new().transform(row()).unwrap();
        assert_eq!(output, json!({"id": 4, "title": "Four"}));
    }

    #[test]
    fn test_row_to_json_with_ids() {
        let output = RowToJson::new().with_ids(true).transform(row()).unwrap();
        assert_eq!(output, json!({"id": 4, "title": "Four", "_id": {"id": 4}}));
    }

    #[test]
    fn test_row_to_json_keeps_configured_order() {
        let fields = FieldSelectorMap::from_specs(vec![
            FieldSpec::Bare("zeta".to_string()),
            FieldSpec::Bare("alpha".to_string()),
        ])
        .unwrap();
        let item = Document::from_yaml_str("zeta: 1\nalpha: 2\n").unwrap();
        let row = SourceRow::new(fields.extract(&item, true).unwrap(), &["zeta".to_string()]);

        let output = RowToJson::new().with_ids(true).transform(row).unwrap();
        assert_eq!(
            output.to_string(),
            r#"{"zeta":1,"alpha":2,"raw":{"zeta":1,"alpha":2},"_id":{"zeta":1}}"#
        );
    }
}
