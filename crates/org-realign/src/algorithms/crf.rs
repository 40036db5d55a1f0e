//! Cultural Resilience Factor (CRF) scoring.

use serde::Serialize;

use super::dispersion_confidence;
use super::domain::owned;
use crate::assessment::{
    AssessmentData, Bands, DomainClassifier, KeywordClassifier, ResponseNormalizer, WeightTable,
};

pub const CRF_WEIGHTS: WeightTable<5> = WeightTable::new(
    "crf",
    [
        ("values_alignment", 0.30),
        ("behavioral_consistency", 0.25),
        ("adaptability", 0.20),
        ("cohesion", 0.15),
        ("innovation_openness", 0.10),
    ],
);

const VALUES: &[&str] = &["values", "mission", "purpose", "beliefs"];
const BEHAVIOR: &[&str] = &["behavior", "actions", "practice", "consistent"];
const ADAPTABILITY: &[&str] = &["change", "adapt", "flexible", "evolve"];
const COHESION: &[&str] = &["unity", "together", "shared", "common"];
const INNOVATION: &[&str] = &["innovation", "new ideas", "creative", "experiment"];
const TRANSFORMATION: &[&str] = &["transformation", "change management", "readiness"];
const POWER_DISTANCE: &[&str] = &["hierarchy", "authority", "decision"];
const UNCERTAINTY: &[&str] = &["uncertainty", "risk", "ambiguity"];

const RISK_THRESHOLD: f64 = 0.35;
const STRENGTH_THRESHOLD: f64 = 0.65;
const STABILITY_THRESHOLD: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrfLevel {
    Low,
    Moderate,
    High,
    Exceptional,
}

impl CrfLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::Exceptional => "Exceptional",
        }
    }
}

pub const CRF_BANDS: Bands<CrfLevel> = Bands::new(
    CrfLevel::Low,
    &[
        (0.35, CrfLevel::Moderate),
        (0.65, CrfLevel::High),
        (0.85, CrfLevel::Exceptional),
    ],
);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CrfDimensions {
    pub values_alignment: f64,
    pub behavioral_consistency: f64,
    pub adaptability: f64,
    pub cohesion: f64,
    pub innovation_openness: f64,
}

impl CrfDimensions {
    fn values(&self) -> [f64; 5] {
        [
            self.values_alignment,
            self.behavioral_consistency,
            self.adaptability,
            self.cohesion,
            self.innovation_openness,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorImpact {
    Positive,
    Neutral,
    Negative,
}

/// A named cultural dimension and how it currently bears on resilience.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CulturalFactor {
    pub name: String,
    pub description: String,
    pub score: f64,
    pub impact: FactorImpact,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResilienceIndicator {
    pub kind: String,
    pub strength: String,
    pub description: String,
    pub evidence: Vec<String>,
    pub improvements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrfMetrics {
    pub overall_score: f64,
    pub level: CrfLevel,
    pub dimensions: CrfDimensions,
    pub confidence: f64,
    pub transformation_readiness: f64,
    pub cultural_factors: Vec<CulturalFactor>,
    pub resilience_indicators: Vec<ResilienceIndicator>,
    pub risks: Vec<String>,
    pub strengths: Vec<String>,
}

pub fn calculate_crf(data: &AssessmentData) -> CrfMetrics {
    calculate_crf_with(&KeywordClassifier, data)
}

pub fn calculate_crf_with(classifier: &dyn DomainClassifier, data: &AssessmentData) -> CrfMetrics {
    let normalizer = ResponseNormalizer::five_point();
    let score = |keywords: &[&str]| normalizer.average(classifier.select(&data.responses, keywords));

    let dimensions = CrfDimensions {
        values_alignment: score(VALUES),
        behavioral_consistency: score(BEHAVIOR),
        adaptability: score(ADAPTABILITY),
        cohesion: score(COHESION),
        innovation_openness: score(INNOVATION),
    };
    let overall_score = CRF_WEIGHTS.composite(dimensions.values());
    tracing::debug!(assessment_id = %data.id.0, overall_score, "crf scored");

    let cultural_factors = vec![
        CulturalFactor {
            name: "Power Distance".to_string(),
            description: "Level of hierarchy acceptance and authority distribution".to_string(),
            score: score(POWER_DISTANCE),
            impact: FactorImpact::Neutral,
            recommendations: owned(&[
                "Foster more collaborative decision-making",
                "Encourage upward feedback",
            ]),
        },
        CulturalFactor {
            name: "Uncertainty Avoidance".to_string(),
            description: "Comfort level with ambiguity and uncertain situations".to_string(),
            score: score(UNCERTAINTY),
            impact: FactorImpact::Positive,
            recommendations: owned(&["Maintain structured processes", "Provide clear guidelines"]),
        },
    ];

    let mut resilience_indicators = Vec::new();
    if overall_score >= STABILITY_THRESHOLD {
        resilience_indicators.push(ResilienceIndicator {
            kind: "stability".to_string(),
            strength: "high".to_string(),
            description: "Organization demonstrates high cultural stability and consistency"
                .to_string(),
            evidence: owned(&[
                "Strong values alignment",
                "Consistent behaviors",
                "Clear cultural identity",
            ]),
            improvements: owned(&[
                "Continue monitoring cultural evolution",
                "Maintain cultural practices",
            ]),
        });
    }

    let risks = if overall_score < RISK_THRESHOLD {
        owned(&[
            "Low cultural cohesion may impede organizational effectiveness",
            "Misaligned values could lead to internal conflicts",
            "Resistance to change may hinder adaptation",
        ])
    } else {
        Vec::new()
    };

    let strengths = if overall_score >= STRENGTH_THRESHOLD {
        owned(&[
            "Strong cultural foundation supports organizational goals",
            "Good adaptability enables effective change management",
            "Cohesive culture enhances collaboration and performance",
        ])
    } else {
        Vec::new()
    };

    CrfMetrics {
        overall_score,
        level: CRF_BANDS.classify(overall_score),
        dimensions,
        confidence: dispersion_confidence(&dimensions.values()),
        transformation_readiness: score(TRANSFORMATION),
        cultural_factors,
        resilience_indicators,
        risks,
        strengths,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{AssessmentResponse, ResponseValue};

    fn answer(id: &str, prompt: &str, value: &str) -> AssessmentResponse {
        AssessmentResponse::new(id, prompt, ResponseValue::from_text(value))
    }

    #[test]
    fn weights_sum_to_one() {
        assert!(CRF_WEIGHTS.validate().is_ok());
        assert!(CRF_BANDS.is_strictly_increasing());
    }

    #[test]
    fn strong_culture_reports_stability() {
        let responses = vec![
            answer("q1", "Our values guide us", "strongly agree"),
            answer("q2", "Leaders model consistent behavior", "strongly agree"),
            answer("q3", "We adapt to change", "strongly agree"),
            answer("q4", "We work together", "strongly agree"),
            answer("q5", "Creative experiments are welcome", "strongly agree"),
        ];
        let metrics = calculate_crf(&AssessmentData::new("a-1", responses));

        assert!((metrics.overall_score - 1.0).abs() < 1e-12);
        assert_eq!(metrics.level, CrfLevel::Exceptional);
        assert_eq!(metrics.resilience_indicators.len(), 1);
        assert_eq!(metrics.strengths.len(), 3);
        assert!(metrics.risks.is_empty());
    }

    #[test]
    fn weak_culture_lists_risks() {
        let responses = vec![
            answer("q1", "Our values guide us", "strongly disagree"),
            answer("q2", "Leaders model consistent behavior", "strongly disagree"),
            answer("q3", "We adapt to change", "strongly disagree"),
            answer("q4", "We work together", "strongly disagree"),
            answer("q5", "Creative experiments are welcome", "strongly disagree"),
        ];
        let metrics = calculate_crf(&AssessmentData::new("a-2", responses));

        assert!((metrics.overall_score - 0.2).abs() < 1e-12);
        assert_eq!(metrics.level, CrfLevel::Low);
        assert_eq!(metrics.risks.len(), 3);
        assert!(metrics.strengths.is_empty());
        assert_eq!(metrics.cultural_factors[0].score, 0.5);
    }
}
