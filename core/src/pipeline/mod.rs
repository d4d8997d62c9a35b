//! Batch pipelines gluing the core stages to the filesystem
//!
//! Single-threaded and fully synchronous: each stage consumes the complete
//! output of the previous one. Concurrent runs against the same task are
//! serialized by the invoking orchestrator, not here.

pub mod label;
pub mod register;
pub mod walk;

pub use label::{run_labeling, LabelOptions};
pub use register::{register_data_source, RegisterOptions, META_DATA_FILE};
pub use walk::{collect_series, find_study_paths, SeriesGroup};
