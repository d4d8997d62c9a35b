pub mod anonymize;
pub mod api;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod extraction;
pub mod pipeline;
pub mod qualify;
pub mod types;

pub use anonymize::{anonymize, anonymize_file};
pub use api::SeriesExtractor;
pub use cli::report::{StudyQualification, TextReport};
pub use error::{CurateError, Result};
pub use qualify::{qualify_study, Criterion, SeriesCandidate};
pub use types::*;
