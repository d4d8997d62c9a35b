use std::fmt;
use std::str::FromStr;

use crate::error::CurateError;

/// Partition assignment of a series in the metadata table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum Split {
    Train,
    Eval,
}

impl Split {
    /// Returns the lowercase form stored in the `Split` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Eval => "eval",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Split {
    type Err = CurateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "train" => Ok(Split::Train),
            "eval" => Ok(Split::Eval),
            other => Err(CurateError::Config(format!(
                "split must be 'train' or 'eval', got '{}'",
                other
            ))),
        }
    }
}
