use crate::error::{CurateError, Result};

/// Series qualification criteria profile
///
/// Two profiles are in circulation for the head-CT inclusion rules and both
/// are explicit configuration, never hardcoded at use sites:
/// [`QualifyConfig::default`] is the current profile (2.0 mm minimum slice
/// thickness, "head" description tie-break enabled); [`QualifyConfig::legacy`]
/// is the earlier one (4.0 mm, no tie-break).
///
/// # Example
///
/// ```
/// use ctcurate_core::QualifyConfig;
///
/// let cfg = QualifyConfig::default()
///     .with_min_dcm_files(20)
///     .with_target_modality("MR");
///
/// assert_eq!(cfg.min_dcm_files, 20);
/// assert_eq!(cfg.target_modality, "MR");
/// assert_eq!(cfg.min_slice_thickness, 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct QualifyConfig {
    /// Minimum number of image files a series must contain
    pub min_dcm_files: usize,

    /// Minimum slice thickness in millimeters
    pub min_slice_thickness: f64,

    /// Required modality (case-insensitive exact match)
    pub target_modality: String,

    /// Required body part examined (case-insensitive exact match)
    pub target_body_part: String,

    /// Token that must appear in the ImageType set (case-insensitive)
    pub target_image_type: String,

    /// Prefer series whose description mentions "head" when several qualify
    pub prefer_head_series: bool,
}

impl Default for QualifyConfig {
    fn default() -> Self {
        Self {
            min_dcm_files: 10,
            min_slice_thickness: 2.0,
            target_modality: "CT".to_string(),
            target_body_part: "HEAD".to_string(),
            target_image_type: "AXIAL".to_string(),
            prefer_head_series: true,
        }
    }
}

impl QualifyConfig {
    /// Returns the legacy profile (4.0 mm threshold, no tie-break)
    pub fn legacy() -> Self {
        Self {
            min_slice_thickness: 4.0,
            prefer_head_series: false,
            ..Self::default()
        }
    }

    /// Builder: set the minimum file count
    pub fn with_min_dcm_files(mut self, min: usize) -> Self {
        self.min_dcm_files = min;
        self
    }

    /// Builder: set the minimum slice thickness in millimeters
    pub fn with_min_slice_thickness(mut self, min: f64) -> Self {
        self.min_slice_thickness = min;
        self
    }

    /// Builder: set the required modality
    pub fn with_target_modality(mut self, modality: impl Into<String>) -> Self {
        self.target_modality = modality.into();
        self
    }

    /// Builder: set the required body part
    pub fn with_target_body_part(mut self, body_part: impl Into<String>) -> Self {
        self.target_body_part = body_part.into();
        self
    }

    /// Builder: set the required ImageType token
    pub fn with_target_image_type(mut self, image_type: impl Into<String>) -> Self {
        self.target_image_type = image_type.into();
        self
    }

    /// Builder: toggle the "head" description tie-break
    pub fn prefer_head_series(mut self, prefer: bool) -> Self {
        self.prefer_head_series = prefer;
        self
    }
}

/// Stratified split parameters
///
/// The seed is a fixed constant per task so that identical tables always
/// produce identical partitions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct SplitConfig {
    /// Fraction of unique series assigned to eval, in (0, 1)
    pub eval_fraction: f64,

    /// Seed for the split's pseudo-random generator
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            eval_fraction: 0.1,
            seed: 0,
        }
    }
}

impl SplitConfig {
    /// Builder: set the eval fraction
    pub fn with_eval_fraction(mut self, fraction: f64) -> Self {
        self.eval_fraction = fraction;
        self
    }

    /// Builder: set the seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates that the eval fraction is a usable proportion
    pub fn validate(&self) -> Result<()> {
        if self.eval_fraction <= 0.0 || self.eval_fraction >= 1.0 {
            return Err(CurateError::Config(format!(
                "eval fraction must be in (0, 1), got {}",
                self.eval_fraction
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let cfg = QualifyConfig::default();
        assert_eq!(cfg.min_dcm_files, 10);
        assert_eq!(cfg.min_slice_thickness, 2.0);
        assert_eq!(cfg.target_modality, "CT");
        assert_eq!(cfg.target_body_part, "HEAD");
        assert_eq!(cfg.target_image_type, "AXIAL");
        assert!(cfg.prefer_head_series);
    }

    #[test]
    fn test_legacy_profile() {
        let cfg = QualifyConfig::legacy();
        assert_eq!(cfg.min_slice_thickness, 4.0);
        assert!(!cfg.prefer_head_series);
        // Everything else matches the current profile.
        assert_eq!(cfg.min_dcm_files, 10);
        assert_eq!(cfg.target_modality, "CT");
    }

    #[test]
    fn test_builder_chain() {
        let cfg = QualifyConfig::default()
            .with_min_slice_thickness(1.0)
            .with_target_body_part("BRAIN")
            .prefer_head_series(false);

        assert_eq!(cfg.min_slice_thickness, 1.0);
        assert_eq!(cfg.target_body_part, "BRAIN");
        assert!(!cfg.prefer_head_series);
    }

    #[test]
    fn test_split_config_validation() {
        assert!(SplitConfig::default().validate().is_ok());
        assert!(SplitConfig::default()
            .with_eval_fraction(0.0)
            .validate()
            .is_err());
        assert!(SplitConfig::default()
            .with_eval_fraction(1.0)
            .validate()
            .is_err());
        assert!(SplitConfig::default()
            .with_eval_fraction(0.25)
            .validate()
            .is_ok());
    }
}
