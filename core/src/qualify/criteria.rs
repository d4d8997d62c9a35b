use dicom_object::InMemDicomObject;

use crate::extraction::{
    get_float_value, get_multi_string_value, get_string_value, BODY_PART_EXAMINED, IMAGE_TYPE,
    MODALITY, SLICE_THICKNESS,
};
use crate::types::QualifyConfig;

/// Inclusion criteria evaluated against a candidate series
///
/// An explicit enumerated predicate set: every criterion is named, and every
/// check is a plain comparison against the configured profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    /// Series contains at least `min_dcm_files` image files
    FileCount,
    /// Modality equals the target (case-insensitive)
    Modality,
    /// BodyPartExamined equals the target (case-insensitive)
    BodyPart,
    /// ImageType set contains the target token (case-insensitive)
    ImageType,
    /// SliceThickness is at least the configured minimum
    SliceThickness,
}

impl Criterion {
    /// All criteria, in evaluation order
    pub const ALL: [Criterion; 5] = [
        Criterion::FileCount,
        Criterion::Modality,
        Criterion::BodyPart,
        Criterion::ImageType,
        Criterion::SliceThickness,
    ];

    /// Returns the criterion's name for log context
    pub fn name(&self) -> &'static str {
        match self {
            Criterion::FileCount => "FileCount",
            Criterion::Modality => "Modality",
            Criterion::BodyPart => "BodyPartExamined",
            Criterion::ImageType => "ImageType",
            Criterion::SliceThickness => "SliceThickness",
        }
    }

    /// Evaluates this criterion against a series' representative header
    ///
    /// Returns `None` when a required tag is absent or unreadable; the
    /// caller treats that as a disqualification, never an error.
    pub fn evaluate(
        &self,
        header: &InMemDicomObject,
        file_count: usize,
        cfg: &QualifyConfig,
    ) -> Option<bool> {
        match self {
            Criterion::FileCount => Some(file_count >= cfg.min_dcm_files),
            Criterion::Modality => get_string_value(header, MODALITY)
                .map(|m| m.eq_ignore_ascii_case(&cfg.target_modality)),
            Criterion::BodyPart => get_string_value(header, BODY_PART_EXAMINED)
                .map(|b| b.eq_ignore_ascii_case(&cfg.target_body_part)),
            Criterion::ImageType => get_multi_string_value(header, IMAGE_TYPE).map(|tokens| {
                tokens
                    .iter()
                    .any(|t| t.eq_ignore_ascii_case(&cfg.target_image_type))
            }),
            Criterion::SliceThickness => get_float_value(header, SLICE_THICKNESS)
                .map(|thickness| thickness >= cfg.min_slice_thickness),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicom_core::{DataElement, PrimitiveValue, VR};

    fn header_with_modality(modality: &str) -> InMemDicomObject {
        let mut dcm = InMemDicomObject::new_empty();
        dcm.put(DataElement::new(
            MODALITY,
            VR::CS,
            PrimitiveValue::from(modality),
        ));
        dcm
    }

    #[test]
    fn test_file_count_threshold() {
        let cfg = QualifyConfig::default();
        let empty = InMemDicomObject::new_empty();
        assert_eq!(Criterion::FileCount.evaluate(&empty, 10, &cfg), Some(true));
        assert_eq!(Criterion::FileCount.evaluate(&empty, 9, &cfg), Some(false));
    }

    #[test]
    fn test_modality_case_insensitive() {
        let cfg = QualifyConfig::default();
        assert_eq!(
            Criterion::Modality.evaluate(&header_with_modality("ct"), 10, &cfg),
            Some(true)
        );
        assert_eq!(
            Criterion::Modality.evaluate(&header_with_modality("MR"), 10, &cfg),
            Some(false)
        );
    }

    #[test]
    fn test_missing_tag_is_none() {
        let cfg = QualifyConfig::default();
        let empty = InMemDicomObject::new_empty();
        assert_eq!(Criterion::Modality.evaluate(&empty, 10, &cfg), None);
        assert_eq!(Criterion::BodyPart.evaluate(&empty, 10, &cfg), None);
        assert_eq!(Criterion::ImageType.evaluate(&empty, 10, &cfg), None);
        assert_eq!(Criterion::SliceThickness.evaluate(&empty, 10, &cfg), None);
    }

    #[test]
    fn test_image_type_membership() {
        let cfg = QualifyConfig::default();
        let mut dcm = InMemDicomObject::new_empty();
        dcm.put(DataElement::new(
            IMAGE_TYPE,
            VR::CS,
            PrimitiveValue::Strs(
                vec![
                    "ORIGINAL".to_string(),
                    "PRIMARY".to_string(),
                    "axial".to_string(),
                ]
                .into(),
            ),
        ));
        assert_eq!(Criterion::ImageType.evaluate(&dcm, 10, &cfg), Some(true));
    }

    #[test]
    fn test_slice_thickness_threshold() {
        let cfg = QualifyConfig::default();
        let mut dcm = InMemDicomObject::new_empty();
        dcm.put(DataElement::new(
            SLICE_THICKNESS,
            VR::DS,
            PrimitiveValue::from("1.5"),
        ));
        assert_eq!(
            Criterion::SliceThickness.evaluate(&dcm, 10, &cfg),
            Some(false)
        );
        assert_eq!(
            Criterion::SliceThickness.evaluate(&dcm, 10, &cfg.clone().with_min_slice_thickness(1.0)),
            Some(true)
        );
    }
}
