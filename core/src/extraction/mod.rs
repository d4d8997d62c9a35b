pub mod dictionary;
pub mod tags;

pub use dictionary::{dictionary_columns, read_tag, Coercion, TagSpec, METADATA_TAGS};
pub use tags::*;
