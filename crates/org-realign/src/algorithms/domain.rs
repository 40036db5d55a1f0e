use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Immediate,
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl Priority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Immediate => "Immediate",
            Self::ShortTerm => "Short-term",
            Self::MediumTerm => "Medium-term",
            Self::LongTerm => "Long-term",
        }
    }
}

/// Coarse three-step rating for impact, effort, priority and confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Magnitude {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Timeframe {
    Immediate,
    ShortTerm,
    LongTerm,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskFactor {
    pub category: String,
    pub severity: Severity,
    pub description: String,
    pub impact: f64,
    pub mitigations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: String,
    pub title: String,
    pub description: String,
    pub expected_roi: f64,
    pub timeframe: String,
    pub resources: Vec<String>,
}

/// Position of a score against fixed industry reference points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Benchmark {
    pub industry_average: f64,
    pub top_quartile: f64,
    pub percentile: f64,
}

pub(crate) fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
