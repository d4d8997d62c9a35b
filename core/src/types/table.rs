use crate::error::{CurateError, Result};
use crate::types::{MetadataRow, Split, COL_SERIES_UID};

/// Outcome of an upsert into a [`MetadataTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Added,
    Updated,
}

/// Ordered collection of metadata rows keyed by `SeriesInstanceUID`
///
/// Invariant: series identifiers are unique. Row order carries no meaning
/// for correctness but is preserved so repeated runs produce stable reports.
/// The column list is the first-seen union of all row columns and defines
/// the CSV header order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataTable {
    columns: Vec<String>,
    rows: Vec<MetadataRow>,
}

impl MetadataTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the column names in header order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the rows in insertion order
    pub fn rows(&self) -> &[MetadataRow] {
        &self.rows
    }

    /// Returns the number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Checks whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up a row by series identifier
    pub fn get(&self, series_uid: &str) -> Option<&MetadataRow> {
        self.rows.iter().find(|r| r.series_uid() == Some(series_uid))
    }

    /// Checks whether a series identifier is present
    pub fn contains_key(&self, series_uid: &str) -> bool {
        self.get(series_uid).is_some()
    }

    /// Appends a row, rejecting rows without a key or with a duplicate key
    pub fn push(&mut self, row: MetadataRow) -> Result<()> {
        let uid = row
            .series_uid()
            .ok_or_else(|| {
                CurateError::Integrity(format!("row is missing the {} column", COL_SERIES_UID))
            })?
            .to_string();
        if self.contains_key(&uid) {
            return Err(CurateError::Integrity(format!(
                "duplicate {} '{}'",
                COL_SERIES_UID, uid
            )));
        }
        self.register_columns(&row);
        self.rows.push(row);
        Ok(())
    }

    /// Inserts a row, replacing any prior row with the same key
    ///
    /// An update removes the old row and appends the new one, so updated
    /// rows move to the end of the table (matching the append-after-drop
    /// merge behavior of the labeling pipeline).
    pub fn upsert(&mut self, row: MetadataRow) -> Result<Upsert> {
        let uid = row
            .series_uid()
            .ok_or_else(|| {
                CurateError::Integrity(format!("row is missing the {} column", COL_SERIES_UID))
            })?
            .to_string();
        let outcome = if self.remove(&uid).is_some() {
            Upsert::Updated
        } else {
            Upsert::Added
        };
        self.register_columns(&row);
        self.rows.push(row);
        Ok(outcome)
    }

    /// Removes and returns the row with the given key
    pub fn remove(&mut self, series_uid: &str) -> Option<MetadataRow> {
        let pos = self
            .rows
            .iter()
            .position(|r| r.series_uid() == Some(series_uid))?;
        Some(self.rows.remove(pos))
    }

    /// Returns the unique series identifiers in first-appearance order
    pub fn unique_series_uids(&self) -> Vec<String> {
        // Keys are unique by invariant, so row order is appearance order.
        self.rows
            .iter()
            .filter_map(|r| r.series_uid().map(|s| s.to_string()))
            .collect()
    }

    /// Stamps the same split onto every row of a series
    pub fn set_split_for_series(&mut self, series_uid: &str, split: Split) {
        for row in &mut self.rows {
            if row.series_uid() == Some(series_uid) {
                row.set_split(split);
            }
        }
    }

    /// Registers any not-yet-seen columns of a row at the end of the header
    fn register_columns(&mut self, row: &MetadataRow) {
        for col in row.columns() {
            if !self.columns.iter().any(|c| c == col) {
                self.columns.push(col.to_string());
            }
        }
    }
}
