use std::fmt;
use std::str::FromStr;

use super::IntelError;

/// Every analysis a caller can ask for. Each kind maps to exactly one label
/// and instruction set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    RegulatoryDeepDive,
    MarketDynamics,
    CompetitorTactics,
    RumorAnalysis,
    TechnicalDeepDive,
    StrategicResearch,
    /// Drill-down on a single item. Always answered at maximum verbosity.
    LearnMore,
}

impl RequestKind {
    pub const ALL: [RequestKind; 7] = [
        RequestKind::RegulatoryDeepDive,
        RequestKind::MarketDynamics,
        RequestKind::CompetitorTactics,
        RequestKind::RumorAnalysis,
        RequestKind::TechnicalDeepDive,
        RequestKind::StrategicResearch,
        RequestKind::LearnMore,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RequestKind::RegulatoryDeepDive => "REGULATORY DEEP-DIVE",
            RequestKind::MarketDynamics => "MARKET DYNAMICS",
            RequestKind::CompetitorTactics => "COMPETITOR TACTICS",
            RequestKind::RumorAnalysis => "RUMOR ANALYSIS",
            RequestKind::TechnicalDeepDive => "TECHNICAL DEEP-DIVE",
            RequestKind::StrategicResearch => "STRATEGIC RESEARCH QUERY",
            RequestKind::LearnMore => "LEARN MORE",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            RequestKind::RegulatoryDeepDive => "regulatory",
            RequestKind::MarketDynamics => "market",
            RequestKind::CompetitorTactics => "competitor",
            RequestKind::RumorAnalysis => "rumor",
            RequestKind::TechnicalDeepDive => "technical",
            RequestKind::StrategicResearch => "research",
            RequestKind::LearnMore => "learn-more",
        }
    }

    pub fn is_drill_down(self) -> bool {
        matches!(self, RequestKind::LearnMore)
    }

    /// Kinds whose detailed answers close with a competitive rebuttal.
    pub fn wants_rebuttal(self) -> bool {
        matches!(
            self,
            RequestKind::MarketDynamics
                | RequestKind::CompetitorTactics
                | RequestKind::RumorAnalysis
                | RequestKind::StrategicResearch
        )
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn normalize_tag(tag: &str) -> String {
    tag.trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

impl FromStr for RequestKind {
    type Err = IntelError;

    /// Accepts either the slug (`rumor`) or the label (`RUMOR ANALYSIS`).
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_tag(tag);
        RequestKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == wanted || normalize_tag(kind.label()) == wanted)
            .ok_or_else(|| IntelError::UnknownRequestKind(tag.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntelRequest {
    pub kind: RequestKind,
    pub payload: String,
    pub extra_instructions: Option<String>,
}

impl IntelRequest {
    pub fn new(kind: RequestKind, payload: impl Into<String>) -> Self {
        Self {
            kind,
            payload: payload.into(),
            extra_instructions: None,
        }
    }

    pub fn with_extra_instructions(mut self, instructions: Option<String>) -> Self {
        self.extra_instructions = instructions;
        self
    }
}
