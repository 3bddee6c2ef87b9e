use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_SUMMARY_TOP_ITEMS: usize = 2;

/// Verbosity tier chosen by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Depth {
    Summary,
    #[default]
    Detailed,
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Depth::Summary => f.write_str("summary"),
            Depth::Detailed => f.write_str("detailed"),
        }
    }
}

impl FromStr for Depth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "summary" | "ceo" => Ok(Depth::Summary),
            "detailed" | "expert" => Ok(Depth::Detailed),
            other => Err(format!("unknown depth '{}': expected summary or detailed", other)),
        }
    }
}

impl<'de> Deserialize<'de> for Depth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Operator-owned settings read by every analysis. The orchestrator never
/// writes to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfiguration {
    pub depth: Depth,
    pub credential: String,
    /// How many items a summary answer may surface.
    pub summary_top_items: usize,
}

impl Default for ViewConfiguration {
    fn default() -> Self {
        Self {
            depth: Depth::Detailed,
            credential: String::new(),
            summary_top_items: DEFAULT_SUMMARY_TOP_ITEMS,
        }
    }
}

impl ViewConfiguration {
    pub fn new(depth: Depth, credential: impl Into<String>) -> Self {
        Self {
            depth,
            credential: credential.into(),
            ..Self::default()
        }
    }

    pub fn with_summary_top_items(mut self, count: usize) -> Self {
        self.summary_top_items = count.max(1);
        self
    }

    pub fn has_credential(&self) -> bool {
        !self.credential.trim().is_empty()
    }
}
