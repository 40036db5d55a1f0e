//! AI Cultural Compatibility Score (AICS): how well institutional culture supports AI
//! adoption.

use serde::Serialize;

use super::domain::{owned, Severity};
use crate::assessment::{
    AssessmentData, Bands, DomainClassifier, KeywordClassifier, OrganizationMetrics,
    ResponseNormalizer, WeightTable,
};

pub const AICS_WEIGHTS: WeightTable<6> = WeightTable::new(
    "aics",
    [
        ("innovation_openness", 0.25),
        ("collaboration_readiness", 0.20),
        ("learning_orientation", 0.20),
        ("change_adaptability", 0.15),
        ("risk_tolerance", 0.10),
        ("technology_acceptance", 0.10),
    ],
);

const INNOVATION: &[&str] = &["innovation", "creativity", "experimentation", "new ideas"];
const COLLABORATION: &[&str] = &["collaboration", "teamwork", "interdisciplinary", "partnership"];
const LEARNING: &[&str] = &[
    "learning",
    "development",
    "training",
    "growth",
    "continuous improvement",
];
const CHANGE: &[&str] = &["change", "adaptation", "flexibility", "agility"];
const RISK: &[&str] = &["risk", "uncertainty", "experimentation", "pilot"];
const TECHNOLOGY: &[&str] = &["technology", "digital", "automation", "systems"];
const FACULTY: &[&str] = &["faculty", "instructor", "professor", "teaching"];
const STUDENTS: &[&str] = &["student", "learner", "academic experience"];

const BARRIER_THRESHOLD: f64 = 0.6;
const ENABLER_THRESHOLD: f64 = 0.5;
const TRANSFORMATION_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityLevel {
    Critical,
    Low,
    Moderate,
    High,
}

pub const AICS_BANDS: Bands<CompatibilityLevel> = Bands::new(
    CompatibilityLevel::Critical,
    &[
        (0.35, CompatibilityLevel::Low),
        (0.55, CompatibilityLevel::Moderate),
        (0.75, CompatibilityLevel::High),
    ],
);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CulturalDimensions {
    pub innovation_openness: f64,
    pub collaboration_readiness: f64,
    pub learning_orientation: f64,
    pub change_adaptability: f64,
    pub risk_tolerance: f64,
    pub technology_acceptance: f64,
}

impl CulturalDimensions {
    fn values(&self) -> [f64; 6] {
        [
            self.innovation_openness,
            self.collaboration_readiness,
            self.learning_orientation,
            self.change_adaptability,
            self.risk_tolerance,
            self.technology_acceptance,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CulturalBarrier {
    pub dimension: String,
    pub barrier: String,
    pub severity: Severity,
    pub impact: f64,
    pub mitigation_strategy: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CulturalEnabler {
    pub dimension: String,
    pub enabler: String,
    pub strength: f64,
    pub leverage_opportunity: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementPriority {
    Critical,
    Important,
    Optional,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformationRequirement {
    pub area: String,
    pub requirement: String,
    pub priority: RequirementPriority,
    pub timeline: String,
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AicsMetrics {
    pub overall_compatibility: f64,
    pub level: CompatibilityLevel,
    pub dimensions: CulturalDimensions,
    pub cultural_barriers: Vec<CulturalBarrier>,
    pub cultural_enablers: Vec<CulturalEnabler>,
    pub transformation_requirements: Vec<TransformationRequirement>,
    pub faculty_readiness: f64,
    pub student_acceptance: f64,
}

pub fn calculate_aics(data: &AssessmentData, metrics: &OrganizationMetrics) -> AicsMetrics {
    calculate_aics_with(&KeywordClassifier, data, metrics)
}

/// Organization metrics are accepted for signature parity with the other AI modules; the
/// cultural score is read from survey answers alone.
pub fn calculate_aics_with(
    classifier: &dyn DomainClassifier,
    data: &AssessmentData,
    _metrics: &OrganizationMetrics,
) -> AicsMetrics {
    let normalizer = ResponseNormalizer::four_point();
    let score = |keywords: &[&str]| normalizer.average(classifier.select(&data.responses, keywords));

    let dimensions = CulturalDimensions {
        innovation_openness: score(INNOVATION),
        collaboration_readiness: score(COLLABORATION),
        learning_orientation: score(LEARNING),
        change_adaptability: score(CHANGE),
        risk_tolerance: score(RISK),
        technology_acceptance: score(TECHNOLOGY),
    };
    let overall_compatibility = AICS_WEIGHTS.composite(dimensions.values());
    tracing::debug!(assessment_id = %data.id.0, overall_compatibility, "aics scored");

    AicsMetrics {
        overall_compatibility,
        level: AICS_BANDS.classify(overall_compatibility),
        dimensions,
        cultural_barriers: cultural_barriers(overall_compatibility),
        cultural_enablers: cultural_enablers(overall_compatibility),
        transformation_requirements: transformation_requirements(overall_compatibility),
        faculty_readiness: score(FACULTY),
        student_acceptance: score(STUDENTS),
    }
}

fn cultural_barriers(score: f64) -> Vec<CulturalBarrier> {
    if score >= BARRIER_THRESHOLD {
        return Vec::new();
    }
    vec![
        CulturalBarrier {
            dimension: "Faculty Autonomy".to_string(),
            barrier: "Strong preference for individual academic freedom over collaborative AI adoption"
                .to_string(),
            severity: Severity::High,
            impact: 0.8,
            mitigation_strategy:
                "Emphasize AI as enhancing rather than replacing faculty expertise".to_string(),
        },
        CulturalBarrier {
            dimension: "Risk Aversion".to_string(),
            barrier: "Conservative institutional culture resistant to technological experimentation"
                .to_string(),
            severity: Severity::Medium,
            impact: 0.6,
            mitigation_strategy: "Start with low-risk pilot programs and demonstrate success"
                .to_string(),
        },
    ]
}

fn cultural_enablers(score: f64) -> Vec<CulturalEnabler> {
    if score < ENABLER_THRESHOLD {
        return Vec::new();
    }
    vec![
        CulturalEnabler {
            dimension: "Learning Culture".to_string(),
            enabler: "Strong institutional commitment to continuous learning and improvement"
                .to_string(),
            strength: 0.7,
            leverage_opportunity: "Build on existing professional development programs"
                .to_string(),
        },
        CulturalEnabler {
            dimension: "Student-Centered Focus".to_string(),
            enabler: "Deep commitment to student success and outcomes".to_string(),
            strength: 0.8,
            leverage_opportunity: "Frame AI initiatives around student success benefits"
                .to_string(),
        },
    ]
}

fn transformation_requirements(score: f64) -> Vec<TransformationRequirement> {
    if score >= TRANSFORMATION_THRESHOLD {
        return Vec::new();
    }
    vec![
        TransformationRequirement {
            area: "Faculty Development".to_string(),
            requirement: "Comprehensive AI literacy and pedagogical integration training"
                .to_string(),
            priority: RequirementPriority::Critical,
            timeline: "6-12 months".to_string(),
            resources: owned(&["Training budget", "Expert facilitators", "Release time"]),
        },
        TransformationRequirement {
            area: "Change Management".to_string(),
            requirement: "Structured change management program with stakeholder engagement"
                .to_string(),
            priority: RequirementPriority::Important,
            timeline: "3-9 months".to_string(),
            resources: owned(&[
                "Change management expertise",
                "Communication resources",
                "Leadership time",
            ]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{AssessmentResponse, ResponseValue};

    fn numeric(id: &str, prompt: &str, value: f64) -> AssessmentResponse {
        AssessmentResponse::new(id, prompt, ResponseValue::Numeric(value))
    }

    #[test]
    fn weights_sum_to_one() {
        assert!(AICS_WEIGHTS.validate().is_ok());
        assert!(AICS_BANDS.is_strictly_increasing());
    }

    #[test]
    fn neutral_culture_has_barriers_and_enablers() {
        let result = calculate_aics(&AssessmentData::default(), &OrganizationMetrics::default());

        assert!((result.overall_compatibility - 0.5).abs() < 1e-12);
        assert_eq!(result.level, CompatibilityLevel::Low);
        assert_eq!(result.cultural_barriers.len(), 2);
        assert_eq!(result.cultural_enablers.len(), 2);
        assert_eq!(
            result.transformation_requirements[0].priority,
            RequirementPriority::Critical
        );
        assert_eq!(result.faculty_readiness, 0.5);
    }

    #[test]
    fn receptive_culture_needs_no_transformation_program() {
        let responses = vec![
            numeric("q1", "Innovation and new ideas are welcomed", 4.0),
            numeric("q2", "Interdisciplinary teamwork", 4.0),
            numeric("q3", "Professional development and training", 4.0),
            numeric("q4", "Flexibility during change", 3.0),
            numeric("q5", "Comfort running a pilot", 3.0),
            numeric("q6", "Digital systems adoption", 4.0),
            numeric("q7", "Faculty comfort with AI in teaching", 2.0),
        ];
        let result = calculate_aics(
            &AssessmentData::new("a-culture", responses),
            &OrganizationMetrics::default(),
        );

        assert_eq!(result.level, CompatibilityLevel::High);
        assert!(result.cultural_barriers.is_empty());
        assert!(result.transformation_requirements.is_empty());
        assert_eq!(result.faculty_readiness, 0.5);
    }
}
