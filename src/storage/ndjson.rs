//! NDJSON (Newline Delimited JSON) output

use crate::etl::Loader;

use eyre::{Context, Result};
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write NDJSON to a file, or to stdout
pub struct NdjsonWriter {
    path: Option<PathBuf>,
}

impl NdjsonWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    pub fn stdout() -> Self {
        Self { path: None }
    }

    /// Render values as NDJSON, one per line with a trailing newline
    pub fn render(items: &[Value]) -> Result<String> {
        let ndjson = items
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?
            .join("\n");

        Ok(if ndjson.is_empty() {
            String::new()
        } else {
            format!("{}\n", ndjson)
        })
    }

    /// Write JSON values as NDJSON, replacing any existing file
    pub fn write(&self, items: &[Value]) -> Result<()> {
        let content = Self::render(items)?;

        match &self.path {
            Some(path) => std::fs::write(path, content)
                .with_context(|| format!("Failed to write NDJSON file: {}", path.display())),
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(content.as_bytes())
                    .and_then(|_| stdout.flush())
                    .context("Failed to write NDJSON to stdout")
            }
        }
    }
}

impl Loader for NdjsonWriter {
    type Item = Value;

    async fn load(&self, items: Vec<Self::Item>) -> Result<usize> {
        self.write(&items)?;
        Ok(items.len())
    }
}
