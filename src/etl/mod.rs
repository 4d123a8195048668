//! Core ETL (Extract, Transform, Load) abstractions
//!
//! The YAML source plugs in as an [`Extractor`]; rows can then be
//! transformed and handed to any [`Loader`].

mod extract;
mod load;
mod pipeline;
mod transform;

pub use extract::Extractor;
pub use load::Loader;
pub use pipeline::Pipeline;
pub use transform::{RowToJson, Transformer};
