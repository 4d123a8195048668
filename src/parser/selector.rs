//! Slash-delimited path selectors

use serde::{Deserialize, Deserializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// An ordered path through a [`Document`](super::Document)
///
/// Each segment indexes a mapping by key or a sequence by position.
/// An empty selector targets the root.
///
/// # Example
/// ```
/// use migrate_source_yaml::parser::Selector;
///
/// let selector = Selector::parse("/a//b/");
/// assert_eq!(selector.segments(), ["a", "b"]);
/// assert!(Selector::parse("").is_root());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Selector {
    segments: Vec<String>,
}

impl Selector {
    /// Split `path` on `/`, discarding empty segments
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// True when the selector has no segments
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromStr for Selector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let path = String::deserialize(deserializer)?;
        Ok(Self::parse(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_drops_empty_segments() {
        assert_eq!(Selector::parse("/a/b/").segments(), ["a", "b"]);
        assert_eq!(Selector::parse("a//b").segments(), ["a", "b"]);
        assert_eq!(Selector::parse("/a//b/").segments(), ["a", "b"]);
    }

    #[test]
    fn test_empty_path_is_root() {
        assert!(Selector::parse("").is_root());
        assert!(Selector::parse("/").is_root());
        assert!(Selector::parse("///").is_root());
        assert!(Selector::default().is_root());
    }

    #[test]
    fn test_display_joins_segments() {
        assert_eq!(Selector::parse("/items/0/name/").to_string(), "items/0/name");
        assert_eq!(Selector::parse("").to_string(), "");
    }

    #[test]
    fn test_from_str_and_deserialize() {
        let parsed: Selector = "x/y".parse().unwrap();
        assert_eq!(parsed.segments(), ["x", "y"]);

        let deserialized: Selector = serde_yaml::from_str("'/x/y/'").unwrap();
        assert_eq!(deserialized, parsed);
    }
}
