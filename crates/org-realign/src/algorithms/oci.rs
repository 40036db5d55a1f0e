//! Organizational Change Index (OCI) scoring.

use serde::Serialize;

use super::dispersion_confidence;
use super::domain::owned;
use crate::assessment::{
    AssessmentData, Bands, DomainClassifier, KeywordClassifier, ResponseNormalizer, WeightTable,
};

pub const OCI_WEIGHTS: WeightTable<6> = WeightTable::new(
    "oci",
    [
        ("leadership_support", 0.25),
        ("culture_adaptability", 0.20),
        ("communication_effectiveness", 0.15),
        ("resource_availability", 0.15),
        ("process_flexibility", 0.15),
        ("stakeholder_engagement", 0.10),
    ],
);

const LEADERSHIP: &[&str] = &["leadership", "executive", "support", "commitment"];
const CULTURE: &[&str] = &["culture", "adaptable", "flexible", "change mindset"];
const COMMUNICATION: &[&str] = &["communication", "information sharing", "transparency", "feedback"];
const RESOURCES: &[&str] = &["resource", "budget", "capacity", "staffing"];
const PROCESS: &[&str] = &["process", "procedures", "workflow", "agile"];
const STAKEHOLDERS: &[&str] = &["stakeholder", "engagement", "participation", "involvement"];
const TRANSFORMATION: &[&str] = &["transformation", "major change", "organizational restructure"];
const IMPLEMENTATION: &[&str] = &[
    "implementation",
    "execution",
    "project management",
    "change management",
];

const RISK_THRESHOLD: f64 = 0.65;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OciLevel {
    Low,
    Developing,
    Moderate,
    High,
}

impl OciLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Developing => "Developing",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

pub const OCI_BANDS: Bands<OciLevel> = Bands::new(
    OciLevel::Low,
    &[
        (0.40, OciLevel::Developing),
        (0.65, OciLevel::Moderate),
        (0.85, OciLevel::High),
    ],
);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OciDimensions {
    pub leadership_support: f64,
    pub culture_adaptability: f64,
    pub communication_effectiveness: f64,
    pub resource_availability: f64,
    pub process_flexibility: f64,
    pub stakeholder_engagement: f64,
}

impl OciDimensions {
    fn values(&self) -> [f64; 6] {
        [
            self.leadership_support,
            self.culture_adaptability,
            self.communication_effectiveness,
            self.resource_availability,
            self.process_flexibility,
            self.stakeholder_engagement,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessArea {
    Strategic,
    Cultural,
    Operational,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeReadiness {
    pub area: ReadinessArea,
    pub score: f64,
    pub description: String,
    pub enablers: Vec<String>,
    pub barriers: Vec<String>,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OciMetrics {
    pub overall_score: f64,
    pub level: OciLevel,
    pub dimensions: OciDimensions,
    pub confidence: f64,
    pub change_readiness: Vec<ChangeReadiness>,
    pub transformation_capacity: f64,
    pub implementation_readiness: f64,
    pub change_risks: Vec<String>,
    pub strengths: Vec<String>,
}

pub fn calculate_oci(data: &AssessmentData) -> OciMetrics {
    calculate_oci_with(&KeywordClassifier, data)
}

pub fn calculate_oci_with(classifier: &dyn DomainClassifier, data: &AssessmentData) -> OciMetrics {
    let normalizer = ResponseNormalizer::five_point();
    let score = |keywords: &[&str]| normalizer.average(classifier.select(&data.responses, keywords));

    let dimensions = OciDimensions {
        leadership_support: score(LEADERSHIP),
        culture_adaptability: score(CULTURE),
        communication_effectiveness: score(COMMUNICATION),
        resource_availability: score(RESOURCES),
        process_flexibility: score(PROCESS),
        stakeholder_engagement: score(STAKEHOLDERS),
    };
    let overall_score = OCI_WEIGHTS.composite(dimensions.values());
    tracing::debug!(assessment_id = %data.id.0, overall_score, "oci scored");

    let transformation_capacity =
        (0.7 * score(TRANSFORMATION) + 0.3 * overall_score).clamp(0.0, 1.0);

    let (change_risks, strengths) = if overall_score < RISK_THRESHOLD {
        (
            owned(&[
                "Low change readiness may lead to implementation delays",
                "Resistance to change initiatives may emerge",
                "Resource constraints could impact change success",
                "Communication gaps may cause confusion and uncertainty",
            ]),
            Vec::new(),
        )
    } else {
        (
            Vec::new(),
            owned(&[
                "Strong foundation for change implementation",
                "Effective communication and engagement processes",
                "Adequate resource allocation for change initiatives",
                "Leadership commitment to transformation goals",
            ]),
        )
    };

    OciMetrics {
        overall_score,
        level: OCI_BANDS.classify(overall_score),
        dimensions,
        confidence: dispersion_confidence(&dimensions.values()),
        change_readiness: change_readiness(&dimensions),
        transformation_capacity,
        implementation_readiness: score(IMPLEMENTATION),
        change_risks,
        strengths,
    }
}

fn change_readiness(dimensions: &OciDimensions) -> Vec<ChangeReadiness> {
    vec![
        ChangeReadiness {
            area: ReadinessArea::Strategic,
            score: dimensions.leadership_support,
            description: "Strategic change readiness based on leadership support and direction"
                .to_string(),
            enablers: owned(&[
                "Strong executive commitment",
                "Clear strategic vision",
                "Resource allocation",
            ]),
            barriers: owned(&[
                "Competing priorities",
                "Unclear objectives",
                "Resource constraints",
            ]),
            actions: owned(&[
                "Strengthen leadership alignment",
                "Clarify change objectives",
                "Secure resources",
            ]),
        },
        ChangeReadiness {
            area: ReadinessArea::Cultural,
            score: dimensions.culture_adaptability,
            description: "Cultural adaptability and openness to change initiatives".to_string(),
            enablers: owned(&[
                "Growth mindset",
                "Learning orientation",
                "Collaborative culture",
            ]),
            barriers: owned(&["Resistance to change", "Risk aversion", "Siloed thinking"]),
            actions: owned(&[
                "Culture transformation program",
                "Change champion network",
                "Success communication",
            ]),
        },
        ChangeReadiness {
            area: ReadinessArea::Operational,
            score: (dimensions.process_flexibility + dimensions.resource_availability) / 2.0,
            description: "Operational capacity for implementing and sustaining change".to_string(),
            enablers: owned(&[
                "Process maturity",
                "Resource adequacy",
                "Operational excellence",
            ]),
            barriers: owned(&[
                "Process rigidity",
                "Resource scarcity",
                "Operational silos",
            ]),
            actions: owned(&[
                "Process optimization",
                "Resource planning",
                "Cross-functional teams",
            ]),
        },
    ]
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
        assert!(OCI_WEIGHTS.validate().is_ok());
        assert!(OCI_BANDS.is_strictly_increasing());
    }

    #[test]
    fn operational_readiness_averages_process_and_resources() {
        let responses = vec![
            numeric("q1", "Process flexibility", 5.0),
            numeric("q2", "Budget availability", 3.0),
        ];
        let metrics = calculate_oci(&AssessmentData::new("a-1", responses));
        let operational = metrics
            .change_readiness
            .iter()
            .find(|entry| entry.area == ReadinessArea::Operational)
            .expect("operational entry present");
        assert!((operational.score - 0.8).abs() < 1e-12);
        assert_eq!(metrics.change_readiness.len(), 3);
    }

    #[test]
    fn transformation_capacity_blends_direct_answers_with_index() {
        let metrics = calculate_oci(&AssessmentData::new(
            "a-2",
            vec![numeric("q1", "Readiness for major change", 5.0)],
        ));
        let expected = 0.7 * 1.0 + 0.3 * metrics.overall_score;
        assert!((metrics.transformation_capacity - expected).abs() < 1e-12);
        assert_eq!(metrics.implementation_readiness, NEUTRAL_SCORE);
        assert_eq!(metrics.change_risks.len(), 4);
    }
}
