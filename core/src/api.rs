use dicom_object::InMemDicomObject;
use log::debug;

use crate::extraction::{read_tag, METADATA_TAGS};
use crate::types::{MetadataRow, COL_DATA_SOURCE, COL_NUM_SLICES};

/// Extractor producing one metadata row per series
///
/// Reads every Tag Dictionary entry from the series' representative slice
/// (its first file), applies the per-tag coercion rule, and derives
/// `NumberOfSlices` from the series' file count.
///
/// # Example
///
/// ```
/// use ctcurate_core::SeriesExtractor;
/// use dicom_object::InMemDicomObject;
/// use dicom_core::{DataElement, PrimitiveValue, Tag, VR};
///
/// let mut dcm = InMemDicomObject::new_empty();
/// dcm.put(DataElement::new(
///     Tag(0x0008, 0x0060), // Modality
///     VR::CS,
///     PrimitiveValue::from("CT"),
/// ));
/// dcm.put(DataElement::new(
///     Tag(0x0018, 0x0050), // SliceThickness
///     VR::DS,
///     PrimitiveValue::from("2.5"),
/// ));
/// dcm.put(DataElement::new(
///     Tag(0x0010, 0x1010), // PatientAge
///     VR::AS,
///     PrimitiveValue::from("054Y"),
/// ));
///
/// let row = SeriesExtractor::extract(&dcm, 42);
///
/// assert_eq!(row.get("Modality").unwrap().to_string(), "CT");
/// assert_eq!(row.get("SliceThickness").unwrap().as_float(), Some(2.5));
/// assert_eq!(row.get("PatientAge").unwrap().as_int(), Some(54));
/// assert_eq!(row.get("NumberOfSlices").unwrap().as_int(), Some(42));
/// ```
pub struct SeriesExtractor;

impl SeriesExtractor {
    /// Extracts a metadata row from a representative slice header
    ///
    /// Absent tags and values that fail coercion are left unset; a single
    /// bad tag never aborts the rest of the row.
    pub fn extract(dcm: &InMemDicomObject, slice_count: usize) -> MetadataRow {
        let mut row = MetadataRow::new();

        for spec in METADATA_TAGS {
            match read_tag(dcm, spec) {
                Some(value) => row.set(spec.name, value),
                None => debug!("tag {} absent or uncoercible, left unset", spec.name),
            }
        }

        // Derived field, not a DICOM-native tag.
        row.set(COL_NUM_SLICES, slice_count as i64);
        row
    }

    /// Extracts a row and stamps the data source it belongs to
    pub fn extract_for_source(
        dcm: &InMemDicomObject,
        slice_count: usize,
        data_source: &str,
    ) -> MetadataRow {
        let mut row = Self::extract(dcm, slice_count);
        row.set(COL_DATA_SOURCE, data_source);
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{MODALITY, PATIENT_AGE, SERIES_INSTANCE_UID, SLICE_THICKNESS};
    use dicom_core::{DataElement, PrimitiveValue, VR};

    fn make_header() -> InMemDicomObject {
        let mut dcm = InMemDicomObject::new_empty();
        dcm.put(DataElement::new(
            SERIES_INSTANCE_UID,
            VR::UI,
            PrimitiveValue::from("1.2.840.1"),
        ));
        dcm.put(DataElement::new(
            MODALITY,
            VR::CS,
            PrimitiveValue::from("CT"),
        ));
        dcm.put(DataElement::new(
            SLICE_THICKNESS,
            VR::DS,
            PrimitiveValue::from("3.0"),
        ));
        dcm
    }

    #[test]
    fn test_extract_sets_derived_slice_count() {
        let row = SeriesExtractor::extract(&make_header(), 17);
        assert_eq!(row.get(COL_NUM_SLICES).unwrap().as_int(), Some(17));
        assert_eq!(row.series_uid(), Some("1.2.840.1"));
    }

    #[test]
    fn test_extract_leaves_missing_tags_unset() {
        let row = SeriesExtractor::extract(&make_header(), 5);
        assert!(row.get("Manufacturer").is_none());
        assert!(row.get("PatientSex").is_none());
        // Present tags still extracted.
        assert_eq!(row.get("Modality").unwrap().to_string(), "CT");
    }

    #[test]
    fn test_extract_isolates_bad_age() {
        let mut dcm = make_header();
        dcm.put(DataElement::new(
            PATIENT_AGE,
            VR::AS,
            PrimitiveValue::from("newborn"),
        ));

        let row = SeriesExtractor::extract(&dcm, 5);
        // Unrecognized age passes through unchanged as text.
        assert_eq!(row.get("PatientAge").unwrap().to_string(), "newborn");
        assert_eq!(row.get("SliceThickness").unwrap().as_float(), Some(3.0));
    }

    #[test]
    fn test_extract_for_source_stamps_data_source() {
        let row = SeriesExtractor::extract_for_source(&make_header(), 12, "hospital-a");
        assert_eq!(row.data_source(), Some("hospital-a"));
    }
}
