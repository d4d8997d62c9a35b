use std::fs;
use std::path::Path;

use log::info;

use crate::error::{CurateError, Result};
use crate::types::{MetadataRow, MetadataTable};

/// Loads a metadata table from a CSV file
///
/// Empty cells are unset columns; every loaded value is text. Duplicate
/// series keys in the file violate the table invariant and are rejected.
pub fn load_table(path: &Path) -> Result<MetadataTable> {
    let mut reader = csv::ReaderBuilder::new().from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut table = MetadataTable::new();
    for record in reader.records() {
        let record = record?;
        let mut row = MetadataRow::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            if !cell.is_empty() {
                row.set(header.clone(), cell);
            }
        }
        table.push(row)?;
    }

    info!("loaded {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Loads CSV rows without imposing the unique-key table invariant
///
/// Used for labeling input files, where the caller validates required
/// columns and later merges by key.
pub fn load_rows(path: &Path) -> Result<Vec<MetadataRow>> {
    let mut reader = csv::ReaderBuilder::new().from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = MetadataRow::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            if !cell.is_empty() {
                row.set(header.clone(), cell);
            }
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Writes a metadata table to a CSV file, atomically
///
/// The table is always rewritten in full. The write goes to a sibling
/// temporary file first and is renamed over the target only once complete,
/// so a failed run never leaves a partially merged table on disk.
pub fn save_table(table: &MetadataTable, path: &Path) -> Result<()> {
    let tmp_path = path.with_extension("csv.tmp");

    {
        let mut writer = csv::WriterBuilder::new().from_path(&tmp_path)?;
        writer.write_record(table.columns())?;
        for row in table.rows() {
            let cells: Vec<String> = table
                .columns()
                .iter()
                .map(|col| row.get(col).map(|v| v.to_string()).unwrap_or_default())
                .collect();
            writer.write_record(&cells)?;
        }
        writer.flush().map_err(CurateError::IoError)?;
    }

    fs::rename(&tmp_path, path)?;
    info!("wrote {} rows to {}", table.len(), path.display());
    Ok(())
}
