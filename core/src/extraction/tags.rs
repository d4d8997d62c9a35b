use dicom_core::Tag;
use dicom_object::InMemDicomObject;

// Study/Series Identification Tags
pub const STUDY_INSTANCE_UID: Tag = Tag(0x0020, 0x000D);
pub const SERIES_INSTANCE_UID: Tag = Tag(0x0020, 0x000E);

// Core Image Tags
pub const IMAGE_TYPE: Tag = Tag(0x0008, 0x0008);
pub const MODALITY: Tag = Tag(0x0008, 0x0060);
pub const BODY_PART_EXAMINED: Tag = Tag(0x0018, 0x0015);
pub const PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);

// Description Tags
pub const STUDY_DESCRIPTION: Tag = Tag(0x0008, 0x1030);
pub const SERIES_DESCRIPTION: Tag = Tag(0x0008, 0x103E);

// Device/Manufacturer Tags
pub const MANUFACTURER: Tag = Tag(0x0008, 0x0070);
pub const MANUFACTURER_MODEL_NAME: Tag = Tag(0x0008, 0x1090);

// Geometry/Acquisition Tags
pub const SPATIAL_RESOLUTION: Tag = Tag(0x0018, 0x1050);
pub const SLICE_THICKNESS: Tag = Tag(0x0018, 0x0050);
pub const PIXEL_SPACING: Tag = Tag(0x0028, 0x0030);
pub const SAMPLES_PER_PIXEL: Tag = Tag(0x0028, 0x0002);
pub const IMAGES_IN_ACQUISITION: Tag = Tag(0x0020, 0x1002);
pub const LOSSY_IMAGE_COMPRESSION: Tag = Tag(0x0028, 0x2110);

// Patient Tags
pub const PATIENT_NAME: Tag = Tag(0x0010, 0x0010);
pub const PATIENT_ID: Tag = Tag(0x0010, 0x0020);
pub const PATIENT_AGE: Tag = Tag(0x0010, 0x1010);
pub const PATIENT_SEX: Tag = Tag(0x0010, 0x0040);

/// Helper to get string value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to string
pub fn get_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| s.trim().to_string())
}

/// Helper to get integer value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to i64
pub fn get_int_value(dcm: &InMemDicomObject, tag: Tag) -> Option<i64> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_int::<i64>().ok())
}

/// Helper to get float value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to f64
pub fn get_float_value(dcm: &InMemDicomObject, tag: Tag) -> Option<f64> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_float64().ok())
}

/// Helper to get multi-string value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to Vec<String>
pub fn get_multi_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<Vec<String>> {
    dcm.element(tag).ok().and_then(|elem| {
        // Try to get as multi-string
        if let Ok(strs) = elem.to_multi_str() {
            Some(strs.iter().map(|s| s.to_string()).collect())
        } else {
            // Fallback: try to get as single string and split by backslash
            elem.to_str()
                .ok()
                .map(|s| s.split('\\').map(|part| part.trim().to_string()).collect())
        }
    })
}
