//! Core type definitions for dataset curation
//!
//! This module provides the fundamental types used throughout the ctcurate
//! library:
//! - [`TagValue`]: Coerced scalar value of a descriptive tag
//! - [`Split`]: Train/eval partition assignment
//! - [`MetadataRow`]: One series' row in the tabular metadata store
//! - [`MetadataTable`]: Ordered row collection with unique series keys
//! - [`QualifyConfig`]: Series qualification criteria profile
//! - [`SplitConfig`]: Stratified split parameters

mod config;
mod row;
mod split;
mod table;
mod value;

pub use config::{QualifyConfig, SplitConfig};
pub use row::{
    MetadataRow, COL_DATA_SOURCE, COL_LABEL, COL_NUM_SLICES, COL_SERIES_UID, COL_SPLIT,
    COL_STUDY_UID,
};
pub use split::Split;
pub use table::{MetadataTable, Upsert};
pub use value::TagValue;
