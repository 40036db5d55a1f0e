//! Dynamic Structural Complexity Heuristic (DSCH) scoring.

use serde::Serialize;

use super::domain::{owned, Benchmark, Priority, Recommendation, RiskFactor, Severity};
use super::{dispersion_confidence, score_map};
use crate::assessment::{
    aggregate, generate_insights, AssessmentData, Bands, DomainClassifier, KeywordClassifier,
    ResponseNormalizer, WeightTable, Weighted,
};

pub const DSCH_WEIGHTS: WeightTable<4> = WeightTable::new(
    "dsch",
    [
        ("structural", 0.35),
        ("operational", 0.25),
        ("cultural", 0.20),
        ("strategic", 0.20),
    ],
);

/// Each dimension blends four keyword sub-factors with these weights.
const SUB_FACTOR_WEIGHTS: [f64; 4] = [0.30, 0.25, 0.25, 0.20];

const STRUCTURAL: [&[&str]; 4] = [
    &["hierarchy", "reporting", "levels", "structure"],
    &["decision", "authority", "approval"],
    &["report", "supervisor", "manager"],
    &["communication", "information", "meeting", "feedback"],
];
const OPERATIONAL: [&[&str]; 4] = [
    &["process", "workflow", "efficiency", "procedures"],
    &["resource", "budget", "staff", "allocation"],
    &["technology", "system", "digital", "integration"],
    &["performance", "metric", "measurement", "kpi"],
];
const CULTURAL: [&[&str]; 4] = [
    &["value", "mission", "culture", "vision"],
    &["collaboration", "teamwork", "cooperation"],
    &["change", "adapt", "flexibility"],
    &["leadership", "leader", "management"],
];
const STRATEGIC: [&[&str]; 4] = [
    &["strategy", "planning", "vision"],
    &["goal", "objective", "target"],
    &["adapt", "flexible", "agile"],
    &["innovation", "creative", "new"],
];

const RISK_THRESHOLD: f64 = 0.3;
const RECOMMENDATION_THRESHOLD: f64 = 0.6;
const INDUSTRY_AVERAGE: f64 = 0.65;
const TOP_QUARTILE: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DschLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl DschLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

pub const DSCH_BANDS: Bands<DschLevel> = Bands::new(
    DschLevel::Low,
    &[
        (0.3, DschLevel::Medium),
        (0.6, DschLevel::High),
        (0.8, DschLevel::VeryHigh),
    ],
);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DschDimensions {
    pub structural: f64,
    pub operational: f64,
    pub cultural: f64,
    pub strategic: f64,
}

impl DschDimensions {
    fn values(&self) -> [f64; 4] {
        [self.structural, self.operational, self.cultural, self.strategic]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DschMetrics {
    pub overall_score: f64,
    pub level: DschLevel,
    pub dimensions: DschDimensions,
    pub confidence: f64,
    pub risk_factors: Vec<RiskFactor>,
    pub recommendations: Vec<Recommendation>,
    pub benchmark: Benchmark,
    pub insights: Vec<String>,
}

pub fn calculate_dsch(data: &AssessmentData) -> DschMetrics {
    calculate_dsch_with(&KeywordClassifier, data)
}

pub fn calculate_dsch_with(classifier: &dyn DomainClassifier, data: &AssessmentData) -> DschMetrics {
    let normalizer = ResponseNormalizer::five_point();
    let blend = |factors: &[&[&str]; 4]| -> f64 {
        let parts: Vec<Weighted> = factors
            .iter()
            .zip(SUB_FACTOR_WEIGHTS)
            .map(|(keywords, weight)| {
                let subset = classifier.select(&data.responses, keywords);
                Weighted::new(normalizer.average(subset), weight)
            })
            .collect();
        aggregate(&parts)
    };

    let dimensions = DschDimensions {
        structural: blend(&STRUCTURAL),
        operational: blend(&OPERATIONAL),
        cultural: blend(&CULTURAL),
        strategic: blend(&STRATEGIC),
    };
    let overall_score = DSCH_WEIGHTS.composite(dimensions.values());
    tracing::debug!(assessment_id = %data.id.0, overall_score, "dsch scored");

    let scores = score_map(&[
        ("structural", dimensions.structural),
        ("operational", dimensions.operational),
        ("cultural", dimensions.cultural),
        ("strategic", dimensions.strategic),
        ("overall", overall_score),
    ]);
    let thresholds = score_map(&[
        ("structural", RECOMMENDATION_THRESHOLD),
        ("operational", RECOMMENDATION_THRESHOLD),
        ("cultural", RECOMMENDATION_THRESHOLD),
        ("strategic", RECOMMENDATION_THRESHOLD),
    ]);
    let benchmarks = score_map(&[("overall", INDUSTRY_AVERAGE)]);

    DschMetrics {
        overall_score,
        level: DSCH_BANDS.classify(overall_score),
        dimensions,
        confidence: dispersion_confidence(&dimensions.values()),
        risk_factors: risk_factors(overall_score),
        recommendations: recommendations(overall_score),
        benchmark: Benchmark {
            industry_average: INDUSTRY_AVERAGE,
            top_quartile: TOP_QUARTILE,
            percentile: (overall_score * 100.0).clamp(0.0, 100.0),
        },
        insights: generate_insights(&scores, &thresholds, &benchmarks),
    }
}

fn risk_factors(score: f64) -> Vec<RiskFactor> {
    if score >= RISK_THRESHOLD {
        return Vec::new();
    }
    vec![RiskFactor {
        category: "structural".to_string(),
        severity: Severity::High,
        description:
            "Low organizational complexity score indicates potential structural inefficiencies"
                .to_string(),
        impact: 0.8,
        mitigations: owned(&[
            "Conduct detailed structural analysis",
            "Implement process optimization",
            "Review organizational design",
        ]),
    }]
}

fn recommendations(score: f64) -> Vec<Recommendation> {
    if score >= RECOMMENDATION_THRESHOLD {
        return Vec::new();
    }
    vec![Recommendation {
        priority: Priority::Immediate,
        category: "Structural Optimization".to_string(),
        title: "Organizational Structure Review".to_string(),
        description: "Conduct comprehensive review of organizational structure to identify optimization opportunities".to_string(),
        expected_roi: 0.15,
        timeframe: "3-6 months".to_string(),
        resources: owned(&["Senior Leadership", "HR Team", "External Consultant"]),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{AssessmentResponse, ResponseValue, NEUTRAL_SCORE};

    fn numeric(id: &str, prompt: &str, value: f64) -> AssessmentResponse {
        AssessmentResponse::new(id, prompt, ResponseValue::Numeric(value))
    }

    #[test]
    fn weights_sum_to_one() {
        assert!(DSCH_WEIGHTS.validate().is_ok());
        assert!(DSCH_BANDS.is_strictly_increasing());
    }

    #[test]
    fn empty_assessment_scores_neutral() {
        let metrics = calculate_dsch(&AssessmentData::default());
        assert!((metrics.overall_score - NEUTRAL_SCORE).abs() < 1e-12);
        assert_eq!(metrics.level, DschLevel::Medium);
        assert!(metrics.risk_factors.is_empty());
        assert_eq!(metrics.recommendations.len(), 1);
        assert_eq!(
            metrics.recommendations[0].title,
            "Organizational Structure Review"
        );
    }

    #[test]
    fn low_scores_raise_structural_risk() {
        let prompts = [
            "hierarchy and reporting",
            "decision authority",
            "supervisor relationship",
            "communication flow",
            "process workflow",
            "budget allocation",
            "technology integration",
            "performance metric",
            "mission and values",
            "collaboration",
            "change readiness",
            "leadership",
            "strategy",
            "goal setting",
            "agile",
            "innovation",
        ];
        let responses = prompts
            .iter()
            .enumerate()
            .map(|(index, prompt)| numeric(&format!("q{index}"), prompt, 1.0))
            .collect();
        let metrics = calculate_dsch(&AssessmentData::new("a-low", responses));

        assert!(metrics.overall_score < 0.3, "score {}", metrics.overall_score);
        assert_eq!(metrics.level, DschLevel::Low);
        assert_eq!(metrics.risk_factors.len(), 1);
        assert_eq!(metrics.risk_factors[0].severity, Severity::High);
        assert!((metrics.benchmark.percentile - metrics.overall_score * 100.0).abs() < 1e-9);
    }

    #[test]
    fn strong_structure_lifts_level() {
        let responses = vec![
            numeric("q1", "Hierarchy levels are clear", 5.0),
            numeric("q2", "Decision authority is delegated", 5.0),
            numeric("q3", "Workflow efficiency", 5.0),
            numeric("q4", "Culture and mission", 5.0),
            numeric("q5", "Strategy and planning", 5.0),
        ];
        let metrics = calculate_dsch(&AssessmentData::new("a-high", responses));
        assert!(metrics.dimensions.structural > 0.6);
        assert!(metrics.overall_score > 0.6);
        assert!(metrics.recommendations.is_empty());
        assert!(metrics
            .insights
            .iter()
            .any(|insight| insight.starts_with("Strong performance in structural")));
    }
}
