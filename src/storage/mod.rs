//! File output for extracted rows

mod ndjson;

pub use ndjson::NdjsonWriter;
