pub mod report;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::types::{QualifyConfig, Split};

/// Command-line arguments for ctcurate
#[derive(Parser, Debug)]
#[command(name = "ctcurate")]
#[command(about = "Curate head-CT series into a versioned, labeled dataset")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register a raw imaging batch as a curated data source
    Register(RegisterArgs),

    /// Merge a labeling CSV into a task's metadata table
    Label(LabelArgs),

    /// List each study's qualified series without copying anything
    Qualify(QualifyArgs),
}

/// Qualification criteria overrides shared by subcommands
#[derive(Args, Debug)]
pub struct CriteriaArgs {
    /// Use the legacy profile (4.0 mm minimum thickness, no head tie-break)
    #[arg(long)]
    pub legacy_profile: bool,

    /// Minimum number of image files per series
    #[arg(long)]
    pub min_dcm_files: Option<usize>,

    /// Minimum slice thickness in millimeters
    #[arg(long)]
    pub min_slice_thickness: Option<f64>,

    /// Required modality
    #[arg(long)]
    pub target_modality: Option<String>,

    /// Required body part examined
    #[arg(long)]
    pub target_body_part: Option<String>,

    /// Required ImageType token
    #[arg(long)]
    pub target_image_type: Option<String>,
}

impl CriteriaArgs {
    /// Builds the qualification profile from the chosen base and overrides
    pub fn to_config(&self) -> QualifyConfig {
        let mut cfg = if self.legacy_profile {
            QualifyConfig::legacy()
        } else {
            QualifyConfig::default()
        };
        if let Some(min) = self.min_dcm_files {
            cfg = cfg.with_min_dcm_files(min);
        }
        if let Some(min) = self.min_slice_thickness {
            cfg = cfg.with_min_slice_thickness(min);
        }
        if let Some(ref modality) = self.target_modality {
            cfg = cfg.with_target_modality(modality.clone());
        }
        if let Some(ref body_part) = self.target_body_part {
            cfg = cfg.with_target_body_part(body_part.clone());
        }
        if let Some(ref image_type) = self.target_image_type {
            cfg = cfg.with_target_image_type(image_type.clone());
        }
        cfg
    }
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Directory containing the raw studies
    #[arg(value_name = "SRC_DIR")]
    pub src_dir: PathBuf,

    /// Name of the data source
    #[arg(long)]
    pub datasource_name: String,

    /// Root directory of the registered data sources
    #[arg(long, default_value = "datasources")]
    pub root: PathBuf,

    /// Replace series directories that are already materialized
    #[arg(long)]
    pub overwrite: bool,

    #[command(flatten)]
    pub criteria: CriteriaArgs,
}

#[derive(Args, Debug)]
pub struct LabelArgs {
    /// Labeling CSV (DataSource, SeriesInstanceUID, Label)
    #[arg(value_name = "CSV_FILE")]
    pub csv_file: PathBuf,

    /// Name of the task owning the merged table
    #[arg(long)]
    pub task_name: String,

    /// Root directory of the registered data sources
    #[arg(long, default_value = "datasources")]
    pub root: PathBuf,

    /// Directory under which task directories are created
    #[arg(long, default_value = ".")]
    pub tasks_root: PathBuf,

    /// Pin the whole batch to one split instead of stratified sampling
    #[arg(long)]
    pub split: Option<SplitArg>,

    /// Fraction of unique series assigned to eval
    #[arg(long, default_value_t = 0.1)]
    pub eval_fraction: f64,

    /// Seed of the split's pseudo-random generator
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

#[derive(Args, Debug)]
pub struct QualifyArgs {
    /// Directory containing the raw studies
    #[arg(value_name = "SRC_DIR")]
    pub src_dir: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub criteria: CriteriaArgs,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
    /// Qualified series identifiers only (one per line)
    Uids,
}

/// Split assignment accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SplitArg {
    Train,
    Eval,
}

impl From<SplitArg> for Split {
    fn from(arg: SplitArg) -> Self {
        match arg {
            SplitArg::Train => Split::Train,
            SplitArg::Eval => Split::Eval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criteria_defaults_to_current_profile() {
        let args = CriteriaArgs {
            legacy_profile: false,
            min_dcm_files: None,
            min_slice_thickness: None,
            target_modality: None,
            target_body_part: None,
            target_image_type: None,
        };
        assert_eq!(args.to_config(), QualifyConfig::default());
    }

    #[test]
    fn test_criteria_overrides_apply_over_legacy_base() {
        let args = CriteriaArgs {
            legacy_profile: true,
            min_dcm_files: Some(5),
            min_slice_thickness: None,
            target_modality: Some("MR".to_string()),
            target_body_part: None,
            target_image_type: None,
        };
        let cfg = args.to_config();
        assert_eq!(cfg.min_slice_thickness, 4.0);
        assert!(!cfg.prefer_head_series);
        assert_eq!(cfg.min_dcm_files, 5);
        assert_eq!(cfg.target_modality, "MR");
    }

    #[test]
    fn test_split_arg_conversion() {
        assert_eq!(Split::from(SplitArg::Train), Split::Train);
        assert_eq!(Split::from(SplitArg::Eval), Split::Eval);
    }
}
