use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::anonymize::anonymize_file;
use crate::api::SeriesExtractor;
use crate::dataset::save_table;
use crate::error::{CurateError, Result};
use crate::pipeline::walk::{collect_series, find_study_paths, list_dicom_files, open_header};
use crate::qualify::qualify_study;
use crate::types::{MetadataRow, MetadataTable, QualifyConfig};

/// Name of the per-data-source (and per-task) metadata table file
pub const META_DATA_FILE: &str = "meta-data.csv";

/// Parameters of a data source registration run
#[derive(Debug, Clone)]
pub struct RegisterOptions {
    /// Directory holding the raw studies
    pub src_dir: PathBuf,

    /// Root directory of all registered data sources
    pub datasources_root: PathBuf,

    /// Name of the data source being registered
    pub data_source: String,

    /// Replace series directories that are already materialized
    pub overwrite: bool,

    /// Qualification profile
    pub qualify: QualifyConfig,
}

/// Registers a raw imaging batch as a curated data source
///
/// For every discovered study the first qualified series is copied into
/// `<root>/<data-source>/<series-uid>/`, its files are anonymized in place,
/// and one metadata row per materialized series is extracted into the data
/// source's table. The table is rewritten in full, atomically, at the end.
///
/// Returns the data source directory.
pub fn register_data_source(opts: &RegisterOptions) -> Result<PathBuf> {
    info!("data source path: {}", opts.src_dir.display());

    let studies = find_study_paths(&opts.src_dir)?;

    // One qualified series per study.
    let mut selected = Vec::new();
    for study_path in &studies {
        let groups = collect_series(study_path)?;
        let candidates: Vec<_> = groups.iter().map(|g| g.to_candidate()).collect();
        let qualified = qualify_study(&candidates, &opts.qualify);
        info!(
            "{} qualified series for {}",
            qualified.len(),
            study_path.display()
        );
        if let Some(uid) = qualified.first() {
            if let Some(group) = groups.into_iter().find(|g| &g.uid == uid) {
                selected.push(group);
            }
        }
    }
    info!("extracted {} qualified series", selected.len());

    let dst = opts.datasources_root.join(&opts.data_source);
    fs::create_dir_all(&dst)?;

    // Copy, honoring the overwrite flag, then anonymize what was copied.
    let mut materialized = Vec::new();
    for group in &selected {
        let series_dst = dst.join(&group.uid);
        if series_dst.exists() {
            if !opts.overwrite {
                info!("series {} is already materialized, skipping", group.uid);
                continue;
            }
            warn!("series {} exists, overwriting", series_dst.display());
            fs::remove_dir_all(&series_dst)?;
        }
        fs::create_dir_all(&series_dst)?;

        info!("copying files to {}", series_dst.display());
        for file in &group.files {
            if let Some(name) = file.file_name() {
                fs::copy(file, series_dst.join(name))?;
            }
        }
        materialized.push(series_dst);
    }

    for series_path in &materialized {
        info!("anonymizing series {}", series_path.display());
        for file in list_dicom_files(series_path)? {
            anonymize_file(&file)?;
        }
    }

    // Extract one row per series directory, including previously registered
    // ones, so the table always reflects the whole data source.
    let mut table = MetadataTable::new();
    for entry in fs::read_dir(&dst)? {
        let series_path = entry?.path();
        if !series_path.is_dir() {
            continue;
        }
        let row = extract_series_row(&series_path, &opts.data_source)?;
        table.push(row)?;
    }

    save_table(&table, &dst.join(META_DATA_FILE))?;
    Ok(dst)
}

/// Extracts the metadata row of one materialized series directory
fn extract_series_row(series_path: &Path, data_source: &str) -> Result<MetadataRow> {
    let files = list_dicom_files(series_path)?;
    let representative = files.first().ok_or_else(|| {
        CurateError::Integrity(format!(
            "series directory {} holds no image files",
            series_path.display()
        ))
    })?;
    let header = open_header(representative)?;
    Ok(SeriesExtractor::extract_for_source(
        &header,
        files.len(),
        data_source,
    ))
}
