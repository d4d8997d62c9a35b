//! Identifying-field scrub applied to every slice before persistence
//!
//! The transformation is a pure function of the input record and is
//! idempotent, so re-scrubbing an already-anonymized file is a no-op.
//! Unlike every other stage, failures here are fatal for the file: a
//! partially scrubbed slice must never be written.

use std::path::Path;

use dicom_core::header::Header;
use dicom_core::{DataElement, PrimitiveValue, Tag, VR};
use dicom_object::{open_file, InMemDicomObject};

use crate::error::{CurateError, Result};
use crate::extraction::PATIENT_ID;

/// Constant substituted for PatientID
pub const PATIENT_ID_PLACEHOLDER: &str = "id";

/// Constant substituted for every person-name valued field
pub const PERSON_NAME_PLACEHOLDER: &str = "anonymous";

/// Tag groups 0x5000–0x50FF hold legacy curve data and are dropped outright.
fn is_curve_group(tag: Tag) -> bool {
    tag.group() & 0xFF00 == 0x5000
}

/// Scrubs identifying fields from a slice record, in place
///
/// Applies, in order: overwrite PatientID with a constant placeholder,
/// replace every PN-valued element with a constant placeholder, delete
/// every element in a curve-data group.
pub fn anonymize(dcm: &mut InMemDicomObject) {
    let mut person_names: Vec<Tag> = Vec::new();
    let mut curves: Vec<Tag> = Vec::new();

    for elem in dcm.iter() {
        let tag = elem.tag();
        if is_curve_group(tag) {
            curves.push(tag);
        } else if elem.vr() == VR::PN {
            person_names.push(tag);
        }
    }

    dcm.put(DataElement::new(
        PATIENT_ID,
        VR::LO,
        PrimitiveValue::from(PATIENT_ID_PLACEHOLDER),
    ));

    for tag in person_names {
        dcm.put(DataElement::new(
            tag,
            VR::PN,
            PrimitiveValue::from(PERSON_NAME_PLACEHOLDER),
        ));
    }

    for tag in curves {
        dcm.remove_element(tag);
    }
}

/// Anonymizes one DICOM file in place on disk
///
/// # Errors
///
/// Any read or write failure is returned as
/// [`CurateError::Anonymization`] and must abort processing of the file.
pub fn anonymize_file(path: &Path) -> Result<()> {
    let mut obj = open_file(path).map_err(|e| CurateError::Anonymization {
        path: path.to_path_buf(),
        message: format!("{}", e),
    })?;

    anonymize(&mut obj);

    obj.write_to_file(path)
        .map_err(|e| CurateError::Anonymization {
            path: path.to_path_buf(),
            message: format!("{}", e),
        })
}
