//! Locating the item list inside a document

use super::{Document, Selector};
use crate::error::{LookupError, LookupFailure};
use serde::Deserialize;

/// How the item list is located within a document
///
/// Deserializes from a string (path mode) or a non-negative integer
/// (legacy depth mode).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawItemSelector")]
pub enum ItemSelector {
    /// Collect every container found at this depth (root children are depth 0)
    Depth(usize),
    /// Follow the path; the target holds the items
    Path(Selector),
}

impl Default for ItemSelector {
    fn default() -> Self {
        Self::Path(Selector::default())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawItemSelector {
    Depth(usize),
    Path(String),
}

impl From<RawItemSelector> for ItemSelector {
    fn from(raw: RawItemSelector) -> Self {
        match raw {
            RawItemSelector::Depth(depth) => Self::Depth(depth),
            RawItemSelector::Path(path) => Self::Path(Selector::parse(&path)),
        }
    }
}

impl std::fmt::Display for ItemSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Depth(depth) => write!(f, "depth {}", depth),
            Self::Path(selector) => write!(f, "'{}'", selector),
        }
    }
}

/// Follow `selector` from `document`
///
/// Mappings are indexed by key, sequences by position.
///
/// # Errors
/// Returns [`LookupError`] naming the first segment that did not resolve.
pub fn walk<'a>(document: &'a Document, selector: &Selector) -> Result<&'a Document, LookupError> {
    let mut current = document;
    for segment in selector.segments() {
        current = step(current, segment).map_err(|reason| LookupError {
            selector: selector.clone(),
            segment: segment.clone(),
            reason,
        })?;
    }
    Ok(current)
}

fn step<'a>(document: &'a Document, segment: &str) -> Result<&'a Document, LookupFailure> {
    match document {
        Document::Mapping(mapping) => mapping.get(segment).ok_or(LookupFailure::MissingKey),
        Document::Sequence(items) => {
            let index: usize = segment
                .bytes()
                .all(|b| b.is_ascii_digit())
                .then(|| segment.parse().ok())
                .flatten()
                .ok_or(LookupFailure::NotAnIndex)?;
            items
                .get(index)
                .ok_or(LookupFailure::IndexOutOfRange { len: items.len() })
        }
        scalar => Err(LookupFailure::NotAContainer {
            kind: scalar.kind(),
        }),
    }
}

/// Locate the list of items to iterate
///
/// In path mode the target's children become the items: sequence
/// elements, or mapping values in order. A scalar target passes through
/// as a single item.
///
/// # Errors
/// Returns [`LookupError`] when a path segment does not resolve. Depth
/// mode never fails.
pub fn select_items(
    document: &Document,
    item_selector: &ItemSelector,
) -> Result<Vec<Document>, LookupError> {
    match item_selector {
        ItemSelector::Depth(depth) => Ok(select_by_depth(document, *depth)),
        ItemSelector::Path(selector) => {
            let target = walk(document, selector)?;
            Ok(match target {
                Document::Sequence(items) => items.clone(),
                Document::Mapping(mapping) => mapping.values().cloned().collect(),
                scalar => vec![scalar.clone()],
            })
        }
    }
}

/// Pre-order walk collecting every container at exactly `depth`
///
/// The root's own children sit at depth 0. Containers are visited before
/// their children, siblings in document order.
pub fn select_by_depth(document: &Document, depth: usize) -> Vec<Document> {
    let mut items = Vec::new();
    let mut stack: Vec<(&Document, usize)> = Vec::new();
    push_children(&mut stack, document, 0);

    while let Some((node, level)) = stack.pop() {
        if !node.is_container() {
            continue;
        }
        if level == depth {
            items.push(node.clone());
        } else if level < depth {
            push_children(&mut stack, node, level + 1);
        }
    }

    items
}

/// Children are pushed in reverse so they pop in document order
fn push_children<'a>(stack: &mut Vec<(&'a Document, usize)>, node: &'a Document, level: usize) {
    match node {
        Document::Mapping(mapping) => stack.extend(mapping.values().rev().map(|c| (c, level))),
        Document::Sequence(items) => stack.extend(items.iter().rev().map(|c| (c, level))),
        Document::Scalar(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(yaml: &str) -> Document {
        Document::from_yaml_str(yaml).unwrap()
    }

    fn to_json(items: &[Document]) -> String {
        serde_json::to_string(items).unwrap()
    }

    #[test]
    fn test_path_mode_selects_nested_sequence() {
        let document = doc(r#"{"items": {"x": [{"id": 1}, {"id": 2}]}}"#);
        let selector = ItemSelector::Path(Selector::parse("items/x"));

        let items = select_items(&document, &selector).unwrap();
        assert_eq!(to_json(&items), r#"[{"id":1},{"id":2}]"#);
    }

    #[test]
    fn test_path_mode_missing_key_fails() {
        let document = doc(r#"{"items": {"x": [{"id": 1}, {"id": 2}]}}"#);
        let selector = ItemSelector::Path(Selector::parse("items/missing"));

        let err = select_items(&document, &selector).unwrap_err();
        assert_eq!(err.segment, "missing");
        assert_eq!(err.reason, LookupFailure::MissingKey);
    }

    #[test]
    fn test_path_mode_sequence_index() {
        let document = doc("groups:\n  - [a, b]\n  - [c]\n");

        let items = select_items(&document, &ItemSelector::Path(Selector::parse("groups/1")))
            .unwrap();
        assert_eq!(to_json(&items), r#"["c"]"#);

        let err = select_items(&document, &ItemSelector::Path(Selector::parse("groups/5")))
            .unwrap_err();
        assert_eq!(err.reason, LookupFailure::IndexOutOfRange { len: 2 });

        let err = select_items(&document, &ItemSelector::Path(Selector::parse("groups/first")))
            .unwrap_err();
        assert_eq!(err.reason, LookupFailure::NotAnIndex);

        for segment in ["+1", "-0", " 1"] {
            let selector = Selector::parse(&format!("groups/{}", segment));
            let err = select_items(&document, &ItemSelector::Path(selector)).unwrap_err();
            assert_eq!(err.reason, LookupFailure::NotAnIndex, "segment {:?}", segment);
        }
    }

    #[test]
    fn test_path_mode_through_scalar_fails() {
        let document = doc("title: hello\n");
        let err = select_items(&document, &ItemSelector::Path(Selector::parse("title/x")))
            .unwrap_err();
        assert_eq!(err.reason, LookupFailure::NotAContainer { kind: "string" });
    }

    #[test]
    fn test_path_mode_mapping_target_yields_values() {
        let document = doc("users:\n  zed: {name: Z, id: 1}\n  amy: {name: A, id: 2}\n");
        let items =
            select_items(&document, &ItemSelector::Path(Selector::parse("users"))).unwrap();
        assert_eq!(
            to_json(&items),
            r#"[{"name":"Z","id":1},{"name":"A","id":2}]"#
        );
    }

    #[test]
    fn test_path_mode_scalar_target_passes_through() {
        let document = doc("count: 3\n");
        let items =
            select_items(&document, &ItemSelector::Path(Selector::parse("count"))).unwrap();
        assert_eq!(to_json(&items), "[3]");
    }

    #[test]
    fn test_root_selector_uses_whole_document() {
        let document = doc("- {id: 1}\n- {id: 2}\n- {id: 3}\n");
        let items = select_items(&document, &ItemSelector::default()).unwrap();
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn test_depth_mode_collects_in_document_order() {
        let document = doc(r#"{"a": [{"id": 1}], "b": [{"id": 2}]}"#);

        let items = select_items(&document, &ItemSelector::Depth(1)).unwrap();
        assert_eq!(to_json(&items), r#"[{"id":1},{"id":2}]"#);
    }

    #[test]
    fn test_depth_zero_collects_root_children() {
        let document = doc(r#"{"a": [{"id": 1}], "b": [{"id": 2}], "c": 5}"#);

        let items = select_by_depth(&document, 0);
        assert_eq!(to_json(&items), r#"[[{"id":1}],[{"id":2}]]"#);
    }

    #[test]
    fn test_depth_mode_skips_scalars_and_other_depths() {
        let yaml = r#"
first:
  - {id: 1, tags: [x, y]}
  - plain
second:
  nested:
    - {id: 2}
  sibling: {id: 3}
"#;
        let document = doc(yaml);

        let items = select_by_depth(&document, 1);
        assert_eq!(
            to_json(&items),
            r#"[{"id":1,"tags":["x","y"]},[{"id":2}],{"id":3}]"#
        );

        let items = select_by_depth(&document, 2);
        assert_eq!(to_json(&items), r#"[["x","y"],{"id":2}]"#);
    }

    #[test]
    fn test_depth_mode_on_scalar_root_is_empty() {
        assert!(select_by_depth(&doc("42"), 0).is_empty());
    }

    #[test]
    fn test_item_selector_deserialize() {
        let depth: ItemSelector = serde_yaml::from_str("2").unwrap();
        assert_eq!(depth, ItemSelector::Depth(2));

        let path: ItemSelector = serde_yaml::from_str("/items/x/").unwrap();
        assert_eq!(path, ItemSelector::Path(Selector::parse("items/x")));

        let numeric_string: ItemSelector = serde_yaml::from_str("'1'").unwrap();
        assert_eq!(numeric_string, ItemSelector::Path(Selector::parse("1")));

        assert!(serde_yaml::from_str::<ItemSelector>("-1").is_err());
    }
}
