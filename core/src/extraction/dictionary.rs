use std::sync::OnceLock;

use dicom_core::Tag;
use dicom_object::InMemDicomObject;
use log::debug;
use regex::Regex;

use super::tags::{
    get_float_value, get_int_value, get_string_value, BODY_PART_EXAMINED, IMAGES_IN_ACQUISITION,
    LOSSY_IMAGE_COMPRESSION, MANUFACTURER, MANUFACTURER_MODEL_NAME, MODALITY, PATIENT_AGE,
    PATIENT_ID, PATIENT_SEX, PIXEL_SPACING, SAMPLES_PER_PIXEL, SERIES_DESCRIPTION,
    SERIES_INSTANCE_UID, SLICE_THICKNESS, SPATIAL_RESOLUTION, STUDY_DESCRIPTION,
    STUDY_INSTANCE_UID,
};
use crate::types::TagValue;

/// Coercion rule applied to a dictionary tag's raw value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Native string form, trimmed
    Text,
    /// Whole number (integer-string VRs such as SamplesPerPixel)
    Int,
    /// Floating point (spatial measurements)
    Float,
    /// PatientAge string such as "063Y" or "63/years"
    Age,
}

/// One entry of the Tag Dictionary: column name, tag, and coercion rule
#[derive(Debug, Clone, Copy)]
pub struct TagSpec {
    pub name: &'static str,
    pub tag: Tag,
    pub coercion: Coercion,
}

/// The descriptive tags extracted into the metadata store, in column order
///
/// This is the corrected tag set: `PatientID` and `ImagesInAcquisition` are
/// separate entries.
pub const METADATA_TAGS: &[TagSpec] = &[
    TagSpec {
        name: "StudyInstanceUID",
        tag: STUDY_INSTANCE_UID,
        coercion: Coercion::Text,
    },
    TagSpec {
        name: "SeriesInstanceUID",
        tag: SERIES_INSTANCE_UID,
        coercion: Coercion::Text,
    },
    TagSpec {
        name: "Modality",
        tag: MODALITY,
        coercion: Coercion::Text,
    },
    TagSpec {
        name: "BodyPartExamined",
        tag: BODY_PART_EXAMINED,
        coercion: Coercion::Text,
    },
    TagSpec {
        name: "StudyDescription",
        tag: STUDY_DESCRIPTION,
        coercion: Coercion::Text,
    },
    TagSpec {
        name: "SeriesDescription",
        tag: SERIES_DESCRIPTION,
        coercion: Coercion::Text,
    },
    TagSpec {
        name: "Manufacturer",
        tag: MANUFACTURER,
        coercion: Coercion::Text,
    },
    TagSpec {
        name: "ManufacturerModelName",
        tag: MANUFACTURER_MODEL_NAME,
        coercion: Coercion::Text,
    },
    TagSpec {
        name: "SpatialResolution",
        tag: SPATIAL_RESOLUTION,
        coercion: Coercion::Float,
    },
    TagSpec {
        name: "PatientAge",
        tag: PATIENT_AGE,
        coercion: Coercion::Age,
    },
    TagSpec {
        name: "PatientSex",
        tag: PATIENT_SEX,
        coercion: Coercion::Text,
    },
    TagSpec {
        name: "PatientID",
        tag: PATIENT_ID,
        coercion: Coercion::Text,
    },
    TagSpec {
        name: "ImagesInAcquisition",
        tag: IMAGES_IN_ACQUISITION,
        coercion: Coercion::Int,
    },
    TagSpec {
        name: "LossyImageCompression",
        tag: LOSSY_IMAGE_COMPRESSION,
        coercion: Coercion::Text,
    },
    TagSpec {
        name: "SliceThickness",
        tag: SLICE_THICKNESS,
        coercion: Coercion::Float,
    },
    TagSpec {
        name: "PixelSpacing",
        tag: PIXEL_SPACING,
        coercion: Coercion::Text,
    },
    TagSpec {
        name: "SamplesPerPixel",
        tag: SAMPLES_PER_PIXEL,
        coercion: Coercion::Int,
    },
];

/// Returns the dictionary column names in order
pub fn dictionary_columns() -> impl Iterator<Item = &'static str> {
    METADATA_TAGS.iter().map(|spec| spec.name)
}

/// Reads and coerces one dictionary tag from a slice header
///
/// Returns `None` when the tag is absent or its value cannot be coerced;
/// a failed coercion never aborts the rest of the row.
pub fn read_tag(dcm: &InMemDicomObject, spec: &TagSpec) -> Option<TagValue> {
    match spec.coercion {
        Coercion::Text => get_string_value(dcm, spec.tag).map(TagValue::Text),
        Coercion::Int => get_int_value(dcm, spec.tag).map(TagValue::Int),
        Coercion::Float => get_float_value(dcm, spec.tag).map(TagValue::Float),
        Coercion::Age => {
            let raw = get_string_value(dcm, spec.tag)?;
            Some(parse_age(&raw))
        }
    }
}

/// Parses a PatientAge string
///
/// Takes the leading digit run before the first `y`/`Y` or `/` and converts
/// it to an integer ("063Y" → 63, "63/years" → 63). Strings that do not
/// match the pattern pass through unchanged as text.
fn parse_age(raw: &str) -> TagValue {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX
        .get_or_init(|| Regex::new(r"^\s*(\d+)\s*[yY/]").expect("Failed to compile age regex"));

    match re.captures(raw).and_then(|c| c.get(1)) {
        Some(digits) => match digits.as_str().parse::<i64>() {
            Ok(age) => TagValue::Int(age),
            Err(_) => {
                debug!("age digit run '{}' out of integer range", digits.as_str());
                TagValue::Text(raw.to_string())
            }
        },
        None => TagValue::Text(raw.to_string()),
    }
}
