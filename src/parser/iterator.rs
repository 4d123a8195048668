//! Cursor and row iteration over a selected item list

use super::{CurrentItem, Document, FieldSelectorMap};
use crate::error::LookupError;

/// Cursor over a fully materialized item list
#[derive(Debug, Clone, Default)]
pub struct ItemCursor {
    items: Vec<Document>,
    position: usize,
}

impl ItemCursor {
    pub fn new(items: Vec<Document>) -> Self {
        Self { items, position: 0 }
    }

    /// Item under the cursor, `None` once exhausted
    pub fn current(&self) -> Option<&Document> {
        self.items.get(self.position)
    }

    pub fn advance(&mut self) {
        if self.position < self.items.len() {
            self.position += 1;
        }
    }

    pub fn at_end(&self) -> bool {
        self.position >= self.items.len()
    }

    /// Total number of selected items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.items.len() - self.position
    }
}

/// Yields one record per selected item
///
/// A field that does not resolve yields `Err` for that row only; the
/// cursor still moves on, so the caller chooses to skip or stop.
#[derive(Debug)]
pub struct Rows<'a> {
    cursor: ItemCursor,
    fields: &'a FieldSelectorMap,
    include_raw: bool,
}

impl<'a> Rows<'a> {
    pub fn new(cursor: ItemCursor, fields: &'a FieldSelectorMap, include_raw: bool) -> Self {
        Self {
            cursor,
            fields,
            include_raw,
        }
    }

    pub fn cursor(&self) -> &ItemCursor {
        &self.cursor
    }
}

impl Iterator for Rows<'_> {
    type Item = Result<CurrentItem, LookupError>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self
            .cursor
            .current()
            .map(|item| self.fields.extract(item, self.include_raw))?;
        self.cursor.advance();
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cursor.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Rows<'_> {}
