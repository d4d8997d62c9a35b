//! The durable metadata store and its two table transformations
//!
//! Merging is keyed, never positional, so extraction order does not affect
//! the final table; splitting is seeded and stratified so partitions are
//! reproducible across runs.

mod merge;
mod split;
mod store;

pub use merge::merge;
pub use split::stratified_split;
pub use store::{load_rows, load_table, save_table};
