use std::fmt;
use std::str::FromStr;

pub mod dot;
pub mod tables;

/// The four visualization modes of the graph view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Normal,
    Recommendations,
    Resilience,
    Gaps,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Recommendations => "recommendations",
            Self::Resilience => "resilience",
            Self::Gaps => "gaps",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "recommendations" => Ok(Self::Recommendations),
            "resilience" => Ok(Self::Resilience),
            "gaps" => Ok(Self::Gaps),
            other => Err(format!("unknown view mode '{other}'")),
        }
    }
}
