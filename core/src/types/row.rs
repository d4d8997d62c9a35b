use std::collections::BTreeMap;

use crate::types::{Split, TagValue};

// Well-known column names of the metadata store.
pub const COL_STUDY_UID: &str = "StudyInstanceUID";
pub const COL_SERIES_UID: &str = "SeriesInstanceUID";
pub const COL_DATA_SOURCE: &str = "DataSource";
pub const COL_LABEL: &str = "Label";
pub const COL_SPLIT: &str = "Split";
pub const COL_NUM_SLICES: &str = "NumberOfSlices";

/// One series' row in the tabular metadata store
///
/// A row is a mapping from column name to coerced value. Columns that were
/// absent or failed coercion are simply unset and render as empty CSV cells.
/// `SeriesInstanceUID` is the row key within a [`crate::types::MetadataTable`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct MetadataRow {
    values: BTreeMap<String, TagValue>,
}

impl MetadataRow {
    /// Creates an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of a column, if set
    pub fn get(&self, column: &str) -> Option<&TagValue> {
        self.values.get(column)
    }

    /// Sets a column value
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<TagValue>) {
        self.values.insert(column.into(), value.into());
    }

    /// Checks whether a column has a value
    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    /// Returns the set column names in sorted order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }

    /// Returns the series identifier key
    pub fn series_uid(&self) -> Option<&str> {
        self.get(COL_SERIES_UID).and_then(|v| v.as_str())
    }

    /// Returns the data source name
    pub fn data_source(&self) -> Option<&str> {
        self.get(COL_DATA_SOURCE).and_then(|v| v.as_str())
    }

    /// Returns the label in its display form
    ///
    /// Labels loaded from CSV are text, but a label supplied as a number is
    /// rendered the same way it would appear in the output table.
    pub fn label(&self) -> Option<String> {
        self.get(COL_LABEL).map(|v| v.to_string())
    }

    /// Stamps the split assignment onto this row
    pub fn set_split(&mut self, split: Split) {
        self.set(COL_SPLIT, split.as_str());
    }

    /// Returns the split assignment, if stamped
    pub fn split(&self) -> Option<Split> {
        self.get(COL_SPLIT)
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse().ok())
    }
}
