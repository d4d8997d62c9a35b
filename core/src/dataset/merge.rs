use std::collections::HashMap;

use log::{debug, info};

use crate::error::{CurateError, Result};
use crate::extraction::dictionary_columns;
use crate::types::{MetadataRow, MetadataTable, Split, Upsert, COL_NUM_SLICES};

/// Columns copied from a data source table when the incoming row lacks them
fn enrichment_columns() -> impl Iterator<Item = &'static str> {
    dictionary_columns().chain(std::iter::once(COL_NUM_SLICES))
}

/// Merges newly labeled rows into a per-task metadata table
///
/// Upsert-by-key on `SeriesInstanceUID`: an incoming row replaces any prior
/// row with the same key and is appended otherwise. Before insertion each
/// incoming row is enriched with every Tag-Dictionary column (plus
/// `NumberOfSlices`) it does not already carry, copied from the matching
/// row of its data source's own metadata table — a thin label-only input
/// expands to a fully described row. An explicitly pinned split is stamped
/// onto every incoming row.
///
/// # Errors
///
/// Returns [`CurateError::Integrity`] when an incoming row has no key or
/// data source, or when the referenced series is missing from its source
/// table. Upstream validation is expected to have caught this before any
/// destructive write.
pub fn merge(
    existing: Option<MetadataTable>,
    sources: &HashMap<String, MetadataTable>,
    incoming: Vec<MetadataRow>,
    pinned_split: Option<Split>,
) -> Result<MetadataTable> {
    let mut table = existing.unwrap_or_default();

    for mut row in incoming {
        let uid = row
            .series_uid()
            .ok_or_else(|| {
                CurateError::Integrity("labeling row is missing SeriesInstanceUID".to_string())
            })?
            .to_string();
        let data_source = row
            .data_source()
            .ok_or_else(|| {
                CurateError::Integrity(format!("labeling row for '{}' is missing DataSource", uid))
            })?
            .to_string();

        let source = sources.get(&data_source).ok_or_else(|| {
            CurateError::Integrity(format!(
                "no metadata table loaded for data source '{}'",
                data_source
            ))
        })?;
        let source_row = source.get(&uid).ok_or_else(|| {
            CurateError::Integrity(format!(
                "series '{}' is not registered in data source '{}'",
                uid, data_source
            ))
        })?;

        for col in enrichment_columns() {
            if !row.contains(col) {
                if let Some(value) = source_row.get(col) {
                    debug!("adding {} for {}", col, uid);
                    row.set(col, value.clone());
                }
            }
        }

        if let Some(split) = pinned_split {
            row.set_split(split);
        }

        match table.upsert(row)? {
            Upsert::Updated => info!("updating the meta-data for {}", uid),
            Upsert::Added => info!("adding the meta-data for {}", uid),
        }
    }

    Ok(table)
}
