//! AI Mission Alignment Score (AIMS). Mission, strategic-plan and student-success answers
//! are blended with fixed higher-education reference factors before weighting.

use serde::Serialize;

use super::anchored;
use super::domain::{owned, Magnitude, Severity};
use crate::assessment::{
    AssessmentData, Bands, DomainClassifier, KeywordClassifier, OrganizationMetrics,
    ResponseNormalizer, WeightTable,
};

pub const AIMS_WEIGHTS: WeightTable<4> = WeightTable::new(
    "aims",
    [
        ("mission_alignment", 0.30),
        ("strategic_plan_integration", 0.25),
        ("student_success_mapping", 0.25),
        ("values_compatibility", 0.20),
    ],
);

const MISSION: &[&str] = &["mission", "purpose", "institutional identity", "core values"];
const STRATEGIC_PLAN: &[&str] = &[
    "strategic plan",
    "goals",
    "objectives",
    "priorities",
    "initiatives",
];
const STUDENT_SUCCESS: &[&str] = &[
    "student success",
    "learning outcomes",
    "retention",
    "completion",
    "achievement",
];
const VALUES: &[&str] = &["values", "ethics", "integrity", "diversity", "inclusion", "equity"];

/// Academic mission (0.7) and service commitment (0.6).
const MISSION_ANCHORS: &[(f64, f64)] = &[(0.7, 0.25), (0.6, 0.15)];
/// Quality enhancement plan (0.5) and accreditation (0.6).
const STRATEGIC_ANCHORS: &[(f64, f64)] = &[(0.5, 0.25), (0.6, 0.15)];
/// Learning outcomes (0.7) and equity (0.65).
const STUDENT_ANCHORS: &[(f64, f64)] = &[(0.7, 0.25), (0.65, 0.15)];

const GAP_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentLevel {
    Misaligned,
    Weak,
    Moderate,
    Strong,
}

pub const AIMS_BANDS: Bands<AlignmentLevel> = Bands::new(
    AlignmentLevel::Misaligned,
    &[
        (0.40, AlignmentLevel::Weak),
        (0.60, AlignmentLevel::Moderate),
        (0.80, AlignmentLevel::Strong),
    ],
);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlignmentDimensions {
    pub mission_alignment: f64,
    pub strategic_plan_integration: f64,
    pub student_success_mapping: f64,
    pub values_compatibility: f64,
}

impl AlignmentDimensions {
    fn values(&self) -> [f64; 4] {
        [
            self.mission_alignment,
            self.strategic_plan_integration,
            self.student_success_mapping,
            self.values_compatibility,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentGap {
    pub dimension: String,
    pub gap: String,
    pub severity: Severity,
    pub impact: f64,
    pub recommended_action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategicOpportunity {
    pub area: String,
    pub opportunity: String,
    pub potential: f64,
    pub requirements: Vec<String>,
    pub timeline: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImplementationPriority {
    pub initiative: String,
    pub priority: Magnitude,
    pub alignment_score: f64,
    pub feasibility: f64,
    pub impact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeMapping {
    pub ai_initiative: String,
    pub student_outcome: String,
    pub measurement_method: String,
    pub expected_impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AimsMetrics {
    pub overall_alignment: f64,
    pub level: AlignmentLevel,
    pub dimensions: AlignmentDimensions,
    pub alignment_gaps: Vec<AlignmentGap>,
    pub strategic_opportunities: Vec<StrategicOpportunity>,
    pub implementation_priorities: Vec<ImplementationPriority>,
    pub outcome_mapping: Vec<OutcomeMapping>,
}

pub fn calculate_aims(data: &AssessmentData, metrics: &OrganizationMetrics) -> AimsMetrics {
    calculate_aims_with(&KeywordClassifier, data, metrics)
}

pub fn calculate_aims_with(
    classifier: &dyn DomainClassifier,
    data: &AssessmentData,
    _metrics: &OrganizationMetrics,
) -> AimsMetrics {
    let normalizer = ResponseNormalizer::four_point();
    let score = |keywords: &[&str]| normalizer.average(classifier.select(&data.responses, keywords));

    let dimensions = AlignmentDimensions {
        mission_alignment: anchored(score(MISSION), 0.6, MISSION_ANCHORS),
        strategic_plan_integration: anchored(score(STRATEGIC_PLAN), 0.6, STRATEGIC_ANCHORS),
        student_success_mapping: anchored(score(STUDENT_SUCCESS), 0.6, STUDENT_ANCHORS),
        values_compatibility: score(VALUES),
    };
    let overall_alignment = AIMS_WEIGHTS.composite(dimensions.values());
    tracing::debug!(assessment_id = %data.id.0, overall_alignment, "aims scored");

    AimsMetrics {
        overall_alignment,
        level: AIMS_BANDS.classify(overall_alignment),
        dimensions,
        alignment_gaps: alignment_gaps(overall_alignment),
        strategic_opportunities: strategic_opportunities(),
        implementation_priorities: implementation_priorities(),
        outcome_mapping: outcome_mapping(),
    }
}

fn alignment_gaps(score: f64) -> Vec<AlignmentGap> {
    if score >= GAP_THRESHOLD {
        return Vec::new();
    }
    vec![
        AlignmentGap {
            dimension: "Strategic Integration".to_string(),
            gap: "AI initiatives not explicitly connected to institutional strategic priorities"
                .to_string(),
            severity: Severity::High,
            impact: 0.7,
            recommended_action: "Map AI initiatives to specific strategic plan objectives"
                .to_string(),
        },
        AlignmentGap {
            dimension: "Student Success Alignment".to_string(),
            gap: "Limited connection between AI tools and measurable student outcomes".to_string(),
            severity: Severity::Critical,
            impact: 0.8,
            recommended_action: "Develop student success metrics for AI initiatives".to_string(),
        },
    ]
}

fn strategic_opportunities() -> Vec<StrategicOpportunity> {
    vec![
        StrategicOpportunity {
            area: "Personalized Learning".to_string(),
            opportunity: "AI-powered adaptive learning systems aligned with learning outcomes"
                .to_string(),
            potential: 0.85,
            requirements: owned(&[
                "Learning analytics platform",
                "Faculty training",
                "Student data integration",
            ]),
            timeline: "12-18 months".to_string(),
        },
        StrategicOpportunity {
            area: "Student Support Services".to_string(),
            opportunity: "AI chatbots for 24/7 student advising and support".to_string(),
            potential: 0.75,
            requirements: owned(&[
                "Natural language processing",
                "Knowledge base development",
                "Staff training",
            ]),
            timeline: "6-9 months".to_string(),
        },
    ]
}

fn implementation_priorities() -> Vec<ImplementationPriority> {
    let entry = |initiative: &str, priority, alignment_score, feasibility, impact| {
        ImplementationPriority {
            initiative: initiative.to_string(),
            priority,
            alignment_score,
            feasibility,
            impact,
        }
    };
    vec![
        entry("AI-Enhanced Student Advising", Magnitude::High, 0.85, 0.7, 0.8),
        entry("Automated Administrative Processes", Magnitude::Medium, 0.6, 0.9, 0.6),
        entry("AI-Powered Research Support", Magnitude::Medium, 0.7, 0.5, 0.7),
    ]
}

fn outcome_mapping() -> Vec<OutcomeMapping> {
    let entry = |initiative: &str, outcome: &str, method: &str, impact: &str| OutcomeMapping {
        ai_initiative: initiative.to_string(),
        student_outcome: outcome.to_string(),
        measurement_method: method.to_string(),
        expected_impact: impact.to_string(),
    };
    vec![
        entry(
            "Predictive Analytics for At-Risk Students",
            "Improved retention rates",
            "Semester-to-semester persistence tracking",
            "5-10% increase in retention",
        ),
        entry(
            "AI-Enhanced Tutoring Systems",
            "Improved learning outcomes",
            "Course completion rates and grade improvements",
            "10-15% improvement in course success rates",
        ),
        entry(
            "Automated Career Guidance",
            "Enhanced career preparation",
            "Post-graduation employment rates",
            "8-12% improvement in employment outcomes",
        ),
    ]
}
