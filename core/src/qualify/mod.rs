//! Series qualification
//!
//! Decides which acquired series of a study satisfy the inclusion profile
//! and resolves ties among multiple qualifying series. Total by design:
//! unreadable or incomplete series are disqualified with a log line, and an
//! empty result simply means the study has no usable series.

mod criteria;

pub use criteria::Criterion;

use dicom_object::InMemDicomObject;
use log::{debug, info};

use crate::extraction::{get_string_value, SERIES_DESCRIPTION};
use crate::types::QualifyConfig;

/// One candidate series of a study
///
/// Series-level attributes are read from the first slice's header only; all
/// slices of a qualifying series are assumed to share them.
#[derive(Debug, Clone)]
pub struct SeriesCandidate {
    /// SeriesInstanceUID
    pub uid: String,

    /// Number of image files belonging to the series
    pub file_count: usize,

    /// Header of the series' first slice
    pub header: InMemDicomObject,
}

impl SeriesCandidate {
    /// Creates a candidate from a first-slice header and file count
    pub fn new(uid: impl Into<String>, file_count: usize, header: InMemDicomObject) -> Self {
        Self {
            uid: uid.into(),
            file_count,
            header,
        }
    }
}

/// Selects the qualifying series of one study
///
/// A series qualifies only when every [`Criterion`] is satisfied; a missing
/// required tag disqualifies the series. When more than one series
/// qualifies and the profile enables the tie-break, series whose
/// description mentions "head" are preferred — unless none do, in which
/// case all qualifiers are returned.
pub fn qualify_study(study: &[SeriesCandidate], cfg: &QualifyConfig) -> Vec<String> {
    let mut qualified: Vec<&SeriesCandidate> = Vec::new();

    'candidates: for candidate in study {
        for criterion in Criterion::ALL {
            match criterion.evaluate(&candidate.header, candidate.file_count, cfg) {
                Some(true) => {}
                Some(false) => {
                    debug!(
                        "series {} fails criterion {}, skipping",
                        candidate.uid,
                        criterion.name()
                    );
                    continue 'candidates;
                }
                None => {
                    info!(
                        "series {} does not contain a readable {} tag, skipping",
                        candidate.uid,
                        criterion.name()
                    );
                    continue 'candidates;
                }
            }
        }
        qualified.push(candidate);
    }

    if qualified.len() > 1 && cfg.prefer_head_series {
        let head_qualified: Vec<String> = qualified
            .iter()
            .filter(|c| {
                get_string_value(&c.header, SERIES_DESCRIPTION)
                    .is_some_and(|d| d.to_lowercase().contains("head"))
            })
            .map(|c| c.uid.clone())
            .collect();

        if !head_qualified.is_empty() {
            return head_qualified;
        }
    }

    qualified.iter().map(|c| c.uid.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{
        BODY_PART_EXAMINED, IMAGE_TYPE, MODALITY, SERIES_DESCRIPTION, SLICE_THICKNESS,
    };
    use dicom_core::{DataElement, PrimitiveValue, VR};

    fn make_header(thickness: &str, description: Option<&str>) -> InMemDicomObject {
        let mut dcm = InMemDicomObject::new_empty();
        dcm.put(DataElement::new(
            MODALITY,
            VR::CS,
            PrimitiveValue::from("CT"),
        ));
        dcm.put(DataElement::new(
            BODY_PART_EXAMINED,
            VR::CS,
            PrimitiveValue::from("HEAD"),
        ));
        dcm.put(DataElement::new(
            IMAGE_TYPE,
            VR::CS,
            PrimitiveValue::Strs(
                vec![
                    "ORIGINAL".to_string(),
                    "PRIMARY".to_string(),
                    "AXIAL".to_string(),
                ]
                .into(),
            ),
        ));
        dcm.put(DataElement::new(
            SLICE_THICKNESS,
            VR::DS,
            PrimitiveValue::from(thickness),
        ));
        if let Some(desc) = description {
            dcm.put(DataElement::new(
                SERIES_DESCRIPTION,
                VR::LO,
                PrimitiveValue::from(desc),
            ));
        }
        dcm
    }

    #[test]
    fn test_single_qualifying_series() {
        // 12 files, CT/HEAD/AXIAL, 3.0 mm against a 2.0 mm minimum.
        let study = vec![SeriesCandidate::new(
            "S1",
            12,
            make_header("3.0", Some("Routine Head")),
        )];
        let result = qualify_study(&study, &QualifyConfig::default());
        assert_eq!(result, vec!["S1"]);
    }

    #[test]
    fn test_thin_slices_disqualify() {
        let study = vec![SeriesCandidate::new("S1", 12, make_header("1.5", None))];
        let result = qualify_study(&study, &QualifyConfig::default());
        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_study() {
        assert!(qualify_study(&[], &QualifyConfig::default()).is_empty());
    }

    #[test]
    fn test_too_few_files_disqualifies() {
        let study = vec![SeriesCandidate::new("S1", 9, make_header("3.0", None))];
        assert!(qualify_study(&study, &QualifyConfig::default()).is_empty());
    }

    #[test]
    fn test_missing_modality_disqualifies_without_error() {
        let mut header = make_header("3.0", None);
        header.remove_element(MODALITY);
        let study = vec![
            SeriesCandidate::new("S1", 12, header),
            SeriesCandidate::new("S2", 12, make_header("3.0", None)),
        ];
        let result = qualify_study(&study, &QualifyConfig::default());
        assert_eq!(result, vec!["S2"]);
    }

    #[test]
    fn test_head_tie_break_selects_described_series() {
        let study = vec![
            SeriesCandidate::new("S1", 12, make_header("3.0", Some("Chest protocol"))),
            SeriesCandidate::new("S2", 12, make_header("3.0", Some("HEAD w/o contrast"))),
        ];
        let result = qualify_study(&study, &QualifyConfig::default());
        assert_eq!(result, vec!["S2"]);
    }

    #[test]
    fn test_tie_break_without_head_match_returns_all() {
        let study = vec![
            SeriesCandidate::new("S1", 12, make_header("3.0", Some("Protocol A"))),
            SeriesCandidate::new("S2", 12, make_header("3.0", None)),
        ];
        let result = qualify_study(&study, &QualifyConfig::default());
        assert_eq!(result, vec!["S1", "S2"]);
    }

    #[test]
    fn test_legacy_profile_disables_tie_break_and_raises_threshold() {
        let study = vec![
            SeriesCandidate::new("S1", 12, make_header("4.5", Some("Chest protocol"))),
            SeriesCandidate::new("S2", 12, make_header("5.0", Some("HEAD w/o contrast"))),
            SeriesCandidate::new("S3", 12, make_header("3.0", Some("HEAD thin"))),
        ];
        let result = qualify_study(&study, &QualifyConfig::legacy());
        // S3 fails the 4.0 mm threshold; no tie-break between the rest.
        assert_eq!(result, vec!["S1", "S2"]);
    }

    #[test]
    fn test_result_is_subset_of_input() {
        let study = vec![
            SeriesCandidate::new("S1", 12, make_header("3.0", None)),
            SeriesCandidate::new("S2", 3, make_header("3.0", None)),
        ];
        let result = qualify_study(&study, &QualifyConfig::default());
        let input_uids: Vec<_> = study.iter().map(|c| c.uid.as_str()).collect();
        assert!(result.iter().all(|uid| input_uids.contains(&uid.as_str())));
    }
}
