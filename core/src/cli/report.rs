use std::fmt;
use std::path::PathBuf;

/// Qualification outcome of one study
#[derive(Debug, Clone)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct StudyQualification {
    /// Study directory
    pub study_path: PathBuf,

    /// Number of series found in the study
    pub total_series: usize,

    /// Identifiers of the qualifying series
    pub qualified: Vec<String>,
}

/// Text report formatter for a qualification dry run
pub struct TextReport<'a> {
    studies: &'a [StudyQualification],
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(studies: &'a [StudyQualification]) -> Self {
        Self { studies }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Series Qualification")?;
        writeln!(f, "====================")?;
        writeln!(f)?;

        for study in self.studies {
            writeln!(f, "{}", study.study_path.display())?;
            writeln!(f, "  Series found:   {}", study.total_series)?;
            if study.qualified.is_empty() {
                writeln!(f, "  Qualified:      none")?;
            } else {
                writeln!(f, "  Qualified:      {}", study.qualified.len())?;
                for uid in &study.qualified {
                    writeln!(f, "    {}", uid)?;
                }
            }
            writeln!(f)?;
        }

        let usable = self.studies.iter().filter(|s| !s.qualified.is_empty()).count();
        writeln!(f, "{}/{} studies with a usable series", usable, self.studies.len())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_report_format() {
        let studies = vec![
            StudyQualification {
                study_path: PathBuf::from("/data/study1"),
                total_series: 3,
                qualified: vec!["1.2.3".to_string()],
            },
            StudyQualification {
                study_path: PathBuf::from("/data/study2"),
                total_series: 1,
                qualified: vec![],
            },
        ];

        let output = format!("{}", TextReport::new(&studies));

        assert!(output.contains("Series Qualification"));
        assert!(output.contains("/data/study1"));
        assert!(output.contains("    1.2.3"));
        assert!(output.contains("Qualified:      none"));
        assert!(output.contains("1/2 studies with a usable series"));
    }
}
