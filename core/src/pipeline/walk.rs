use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dicom_object::{InMemDicomObject, OpenFileOptions};
use log::{info, warn};

use crate::error::Result;
use crate::extraction::{get_string_value, PIXEL_DATA, SERIES_INSTANCE_UID};
use crate::qualify::SeriesCandidate;

/// One series' files within a study directory
#[derive(Debug, Clone)]
pub struct SeriesGroup {
    /// SeriesInstanceUID shared by the files
    pub uid: String,

    /// Image files in name order; the first is the representative slice
    pub files: Vec<PathBuf>,

    /// Header of the representative slice
    pub header: InMemDicomObject,
}

impl SeriesGroup {
    /// Views this group as a qualification candidate
    pub fn to_candidate(&self) -> SeriesCandidate {
        SeriesCandidate::new(self.uid.clone(), self.files.len(), self.header.clone())
    }
}

/// Recursively discovers study directories under a source root
///
/// A study is a directory whose entries are all files, at least one of them
/// a `.dcm` file. Directories with subdirectories are descended into; empty
/// or mixed directories are logged and skipped.
pub fn find_study_paths(root: &Path) -> Result<Vec<PathBuf>> {
    let mut studies = Vec::new();
    walk_into_dir(root, &mut studies)?;
    info!("extracted {} studies under {}", studies.len(), root.display());
    Ok(studies)
}

fn walk_into_dir(dir: &Path, studies: &mut Vec<PathBuf>) -> Result<()> {
    let entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|e| e.path())
        .collect();

    if entries.is_empty() {
        info!("{}: an empty directory, skipping", dir.display());
        return Ok(());
    }

    let all_files = entries.iter().all(|p| p.is_file());
    let any_dcm = entries.iter().any(|p| is_dicom_path(p));
    let subdirs: Vec<&PathBuf> = entries.iter().filter(|p| p.is_dir()).collect();

    if all_files && any_dcm {
        studies.push(dir.to_path_buf());
    } else if !subdirs.is_empty() {
        for sub in subdirs {
            walk_into_dir(sub, studies)?;
        }
    } else {
        info!("{}: no image files or subdirectories, skipping", dir.display());
    }
    Ok(())
}

fn is_dicom_path(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("dcm") || ext.eq_ignore_ascii_case("dicom"))
}

/// Lists a directory's image files sorted by name
pub fn list_dicom_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|e| e.path())
        .filter(|p| is_dicom_path(p))
        .collect();
    files.sort();
    Ok(files)
}

/// Opens a file's header, stopping before pixel data
pub fn open_header(path: &Path) -> Result<InMemDicomObject> {
    let obj = OpenFileOptions::new()
        .read_until(PIXEL_DATA)
        .open_file(path)?;
    Ok((*obj).clone())
}

/// Groups a study directory's files into series
///
/// Files are visited in name order, so the first file of each series is its
/// deterministic representative slice. Files that cannot be read or that
/// carry no `SeriesInstanceUID` are logged and skipped; that can only ever
/// narrow the result.
pub fn collect_series(study_path: &Path) -> Result<Vec<SeriesGroup>> {
    let mut groups: BTreeMap<String, SeriesGroup> = BTreeMap::new();

    for file in list_dicom_files(study_path)? {
        let header = match open_header(&file) {
            Ok(header) => header,
            Err(e) => {
                warn!("failed to read {}: {}, skipping file", file.display(), e);
                continue;
            }
        };
        let Some(uid) = get_string_value(&header, SERIES_INSTANCE_UID) else {
            warn!(
                "{} carries no SeriesInstanceUID, skipping file",
                file.display()
            );
            continue;
        };

        groups
            .entry(uid.clone())
            .or_insert_with(|| SeriesGroup {
                uid,
                files: Vec::new(),
                header,
            })
            .files
            .push(file);
    }

    Ok(groups.into_values().collect())
}
