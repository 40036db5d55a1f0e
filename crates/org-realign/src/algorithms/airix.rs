//! AI Readiness Index (AIRIX) for institutions. Answers use a four-point scale and are
//! grouped by their declared `domain`; topic tags refine each domain score.

use serde::Serialize;

use super::domain::owned;
use crate::assessment::{
    variance_of_numeric, AssessmentData, AssessmentResponse, Bands, DomainClassifier,
    DomainFieldClassifier, OrganizationMetrics, ResponseNormalizer, WeightTable,
};

pub const AIRIX_WEIGHTS: WeightTable<6> = WeightTable::new(
    "airix",
    [
        ("strategic_readiness", 0.25),
        ("infrastructure_security", 0.20),
        ("cultural_readiness", 0.20),
        ("resource_planning", 0.15),
        ("ethics_compliance", 0.10),
        ("mission_alignment", 0.10),
    ],
);

/// Tag-scoped refinements per domain; the base domain average carries the remaining weight.
type Topics = &'static [(&'static [&'static str], f64)];

const STRATEGIC_TOPICS: Topics = &[(&["leadership"], 0.25), (&["governance"], 0.15)];
const INFRASTRUCTURE_TOPICS: Topics = &[(&["ferpa", "privacy"], 0.3), (&["security"], 0.2)];
const CULTURAL_TOPICS: Topics = &[(&["faculty"], 0.3), (&["change"], 0.2)];
const ETHICS_TOPICS: Topics = &[(&["integrity"], 0.3)];
const ALIGNMENT_TOPICS: Topics = &[(&["strategic"], 0.3), (&["student"], 0.2)];

/// Response count at which data completeness saturates.
const FULL_SURVEY_RESPONSES: f64 = 60.0;
const MAX_CONFIDENCE: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AirixLevel {
    Foundational,
    Developing,
    Intermediate,
    Advanced,
}

impl AirixLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Foundational => "Foundational",
            Self::Developing => "Developing",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

pub const AIRIX_BANDS: Bands<AirixLevel> = Bands::new(
    AirixLevel::Foundational,
    &[
        (0.50, AirixLevel::Developing),
        (0.70, AirixLevel::Intermediate),
        (0.85, AirixLevel::Advanced),
    ],
);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AirixDomains {
    pub strategic_readiness: f64,
    pub infrastructure_security: f64,
    pub cultural_readiness: f64,
    pub resource_planning: f64,
    pub ethics_compliance: f64,
    pub mission_alignment: f64,
}

impl AirixDomains {
    fn values(&self) -> [f64; 6] {
        [
            self.strategic_readiness,
            self.infrastructure_security,
            self.cultural_readiness,
            self.resource_planning,
            self.ethics_compliance,
            self.mission_alignment,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirixMetrics {
    pub overall_readiness: f64,
    pub level: AirixLevel,
    pub domains: AirixDomains,
    pub confidence: f64,
    pub implementation_capacity: f64,
    pub risk_score: f64,
    pub benchmark_percentile: f64,
    pub recommendations: Vec<String>,
    pub key_insights: Vec<String>,
}

pub fn calculate_airix(data: &AssessmentData, metrics: &OrganizationMetrics) -> AirixMetrics {
    calculate_airix_with(&DomainFieldClassifier, data, metrics)
}

pub fn calculate_airix_with(
    classifier: &dyn DomainClassifier,
    data: &AssessmentData,
    metrics: &OrganizationMetrics,
) -> AirixMetrics {
    let normalizer = ResponseNormalizer::four_point();
    let blend = |domain: &str, parts: &[(&[&str], f64)], base_weight: f64| -> f64 {
        let subset = classifier.select(&data.responses, &[domain]);
        let base = normalizer.average(subset.iter().copied());
        parts.iter().fold(base * base_weight, |total, (tags, weight)| {
            let tagged = subset
                .iter()
                .copied()
                .filter(|response| tags.iter().any(|tag| response.has_tag(tag)));
            total + normalizer.average(tagged) * weight
        })
    };

    let domains = AirixDomains {
        strategic_readiness: blend("strategic", STRATEGIC_TOPICS, 0.6),
        infrastructure_security: blend("infrastructure", INFRASTRUCTURE_TOPICS, 0.5),
        cultural_readiness: blend("cultural", CULTURAL_TOPICS, 0.5),
        resource_planning: blend("resource", &[], 1.0),
        ethics_compliance: blend("ethics", ETHICS_TOPICS, 0.7),
        mission_alignment: blend("alignment", ALIGNMENT_TOPICS, 0.5),
    };

    let overall_readiness = AIRIX_WEIGHTS.composite(domains.values());
    let level = AIRIX_BANDS.classify(overall_readiness);
    tracing::debug!(assessment_id = %data.id.0, overall_readiness, "airix scored");

    let confidence = (data_quality(&data.responses) * 0.7 + overall_readiness * 0.3)
        .min(MAX_CONFIDENCE);
    let implementation_capacity = (0.4 * domains.resource_planning
        + 0.3 * domains.strategic_readiness
        + 0.3 * overall_readiness)
        .clamp(0.0, 1.0);
    let risk_score = (1.0 - overall_readiness
        + 0.1
            * ((1.0 - domains.cultural_readiness)
                + (1.0 - domains.ethics_compliance)
                + (1.0 - domains.resource_planning)))
        .clamp(0.0, 1.0);

    AirixMetrics {
        overall_readiness,
        level,
        domains,
        confidence,
        implementation_capacity,
        risk_score,
        benchmark_percentile: benchmark_percentile(overall_readiness, metrics),
        recommendations: recommendations(overall_readiness),
        key_insights: key_insights(level),
    }
}

/// Completeness and answer consistency, each in [0,1], averaged.
fn data_quality(responses: &[AssessmentResponse]) -> f64 {
    if responses.is_empty() {
        return 0.0;
    }
    let completeness = (responses.len() as f64 / FULL_SURVEY_RESPONSES).min(1.0);
    let consistency = match variance_of_numeric(responses, 4.0) {
        Some(variance) => (1.0 - variance * 2.0).max(0.0),
        None => 0.5,
    };
    (completeness + consistency) / 2.0
}

fn benchmark_percentile(score: f64, metrics: &OrganizationMetrics) -> f64 {
    let mut percentile = score * 100.0;
    if metrics.digital_maturity.unwrap_or(0.5) < 0.4 {
        percentile += 10.0;
    } else if metrics.innovation_capacity.unwrap_or(0.5) > 0.8 {
        percentile -= 5.0;
    }
    percentile.clamp(1.0, 99.0)
}

fn recommendations(score: f64) -> Vec<String> {
    if score < 0.5 {
        owned(&[
            "Establish foundational AI governance structure",
            "Conduct comprehensive faculty AI literacy assessment",
            "Develop institutional AI ethics framework",
        ])
    } else if score < 0.7 {
        owned(&[
            "Launch pilot AI initiatives in low-risk areas",
            "Expand faculty professional development programs",
            "Strengthen data governance and compliance frameworks",
        ])
    } else {
        owned(&[
            "Scale successful AI pilots across institution",
            "Develop advanced AI capabilities and partnerships",
            "Establish center of excellence for AI in education",
        ])
    }
}

fn key_insights(level: AirixLevel) -> Vec<String> {
    vec![
        format!(
            "Institution demonstrates {} AI readiness",
            level.label().to_lowercase()
        ),
        "Strategic leadership support is critical for AI success".to_string(),
        "Faculty engagement requires dedicated change management".to_string(),
        "Data governance is foundational for responsible AI use".to_string(),
        "Mission alignment ensures sustainable AI adoption".to_string(),
    ]
}
