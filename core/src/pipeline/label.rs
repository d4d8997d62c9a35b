use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use log::info;

use crate::dataset::{load_rows, load_table, merge, save_table, stratified_split};
use crate::error::{CurateError, Result};
use crate::pipeline::register::META_DATA_FILE;
use crate::types::{
    MetadataRow, MetadataTable, Split, SplitConfig, COL_DATA_SOURCE, COL_LABEL, COL_SERIES_UID,
};

/// Parameters of a labeling run
#[derive(Debug, Clone)]
pub struct LabelOptions {
    /// Labeling CSV with DataSource, SeriesInstanceUID and Label columns
    pub labels_csv: PathBuf,

    /// Root directory of all registered data sources
    pub datasources_root: PathBuf,

    /// Directory of the task owning the merged table
    pub task_dir: PathBuf,

    /// Pin the whole batch to one split instead of stratified sampling
    pub pinned_split: Option<Split>,

    /// Stratified split parameters, used when no split is pinned
    pub split: SplitConfig,
}

/// Merges a labeling batch into a task's metadata table
///
/// Loads the labeling CSV, verifies that every referenced series is
/// registered on disk and in its data source's table (fatal before any
/// write otherwise), merges into the existing task table, runs the
/// stratified splitter unless a split was pinned for the batch, and
/// commits the task table atomically.
///
/// Returns the path of the written table.
pub fn run_labeling(opts: &LabelOptions) -> Result<PathBuf> {
    let incoming = load_rows(&opts.labels_csv)?;
    info!(
        "loaded {} labeling rows from {}",
        incoming.len(),
        opts.labels_csv.display()
    );
    validate_labeling_rows(&incoming)?;

    let sources = load_source_tables(opts, &incoming)?;
    verify_registration(opts, &incoming, &sources)?;

    let task_table_path = opts.task_dir.join(META_DATA_FILE);
    let existing = if task_table_path.is_file() {
        info!("task meta-data exists, loading {}", task_table_path.display());
        Some(load_table(&task_table_path)?)
    } else {
        None
    };

    let mut table = merge(existing, &sources, incoming, opts.pinned_split)?;

    if opts.pinned_split.is_none() {
        info!("splitting with eval fraction {}", opts.split.eval_fraction);
        stratified_split(&mut table, &opts.split)?;
    }

    fs::create_dir_all(&opts.task_dir)?;
    save_table(&table, &task_table_path)?;
    Ok(task_table_path)
}

/// Checks the labeling batch carries the required columns
fn validate_labeling_rows(rows: &[MetadataRow]) -> Result<()> {
    for (i, row) in rows.iter().enumerate() {
        for col in [COL_DATA_SOURCE, COL_SERIES_UID, COL_LABEL] {
            if !row.contains(col) {
                return Err(missing_column(i, col));
            }
        }
    }
    Ok(())
}

fn missing_column(row: usize, column: &str) -> CurateError {
    CurateError::Integrity(format!(
        "labeling row {} is missing the {} column",
        row, column
    ))
}

/// Loads the metadata table of every data source the batch references
fn load_source_tables(
    opts: &LabelOptions,
    rows: &[MetadataRow],
) -> Result<HashMap<String, MetadataTable>> {
    let mut sources = HashMap::new();
    for (i, row) in rows.iter().enumerate() {
        let name = row
            .data_source()
            .ok_or_else(|| missing_column(i, COL_DATA_SOURCE))?;
        if sources.contains_key(name) {
            continue;
        }
        let table_path = opts.datasources_root.join(name).join(META_DATA_FILE);
        if !table_path.is_file() {
            return Err(CurateError::Integrity(format!(
                "data source '{}' is not found under {}",
                name,
                opts.datasources_root.display()
            )));
        }
        sources.insert(name.to_string(), load_table(&table_path)?);
    }
    Ok(sources)
}

/// Verifies every referenced series exists on disk and in its source table
fn verify_registration(
    opts: &LabelOptions,
    rows: &[MetadataRow],
    sources: &HashMap<String, MetadataTable>,
) -> Result<()> {
    for (i, row) in rows.iter().enumerate() {
        let name = row
            .data_source()
            .ok_or_else(|| missing_column(i, COL_DATA_SOURCE))?;
        let uid = row
            .series_uid()
            .ok_or_else(|| missing_column(i, COL_SERIES_UID))?;

        if !opts.datasources_root.join(name).join(uid).is_dir() {
            return Err(CurateError::Integrity(format!(
                "series directory does not exist for row {} ({}/{})",
                i, name, uid
            )));
        }
        if !sources[name].contains_key(uid) {
            return Err(CurateError::Integrity(format!(
                "series '{}' is missing from data source '{}' meta-data",
                uid, name
            )));
        }
    }
    Ok(())
}
