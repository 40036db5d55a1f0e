//! AI Implementation Risk Score (AIRS). The composite is a risk: higher means a riskier
//! rollout, so each factor is the complement of the matching readiness score.

use serde::Serialize;

use super::domain::{owned, Priority};
use crate::assessment::{
    AssessmentData, Bands, DomainClassifier, InstitutionType, KeywordClassifier,
    OrganizationMetrics, ResponseNormalizer, WeightTable,
};

pub const AIRS_WEIGHTS: WeightTable<6> = WeightTable::new(
    "airs",
    [
        ("cultural_resistance", 0.25),
        ("compliance_gaps", 0.20),
        ("resource_constraints", 0.20),
        ("technical_limitations", 0.15),
        ("governance_weaknesses", 0.10),
        ("external_pressures", 0.10),
    ],
);

const CULTURAL: &[&str] = &["faculty", "culture", "resistance", "change", "pedagogy"];
const COMPLIANCE: &[&str] = &["compliance", "ferpa", "privacy", "accessibility", "accreditation"];
const RESOURCES: &[&str] = &["budget", "resources", "staffing", "infrastructure", "funding"];
const TECHNICAL: &[&str] = &["technology", "infrastructure", "integration", "systems"];
const GOVERNANCE: &[&str] = &["governance", "leadership", "decision", "oversight"];

/// Faculty autonomy (0.2) and academic freedom (0.15) concerns, applied at a tenth.
const ACADEMIC_CONCERNS: f64 = 0.1 * (0.2 + 0.15);
const BASE_EXTERNAL_RISK: f64 = 0.3;
const CULTURAL_STRATEGY_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

pub const AIRS_BANDS: Bands<RiskLevel> = Bands::new(
    RiskLevel::Low,
    &[
        (0.50, RiskLevel::Moderate),
        (0.70, RiskLevel::High),
        (0.85, RiskLevel::Critical),
    ],
);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AirsRiskFactors {
    pub cultural_resistance: f64,
    pub compliance_gaps: f64,
    pub resource_constraints: f64,
    pub technical_limitations: f64,
    pub governance_weaknesses: f64,
    pub external_pressures: f64,
}

impl AirsRiskFactors {
    fn values(&self) -> [f64; 6] {
        [
            self.cultural_resistance,
            self.compliance_gaps,
            self.resource_constraints,
            self.technical_limitations,
            self.governance_weaknesses,
            self.external_pressures,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Effort {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MitigationStrategy {
    pub risk_category: String,
    pub strategy: String,
    pub priority: Priority,
    pub effort: Effort,
    pub impact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskTimelinePhase {
    pub phase: String,
    pub risks: Vec<String>,
    pub mitigations: Vec<String>,
    pub timeline: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirsMetrics {
    pub overall_risk: f64,
    pub level: RiskLevel,
    pub risk_factors: AirsRiskFactors,
    pub mitigation_strategies: Vec<MitigationStrategy>,
    pub implementation_readiness: f64,
    pub risk_timeline: Vec<RiskTimelinePhase>,
}

pub fn calculate_airs(data: &AssessmentData, metrics: &OrganizationMetrics) -> AirsMetrics {
    calculate_airs_with(&KeywordClassifier, data, metrics)
}

pub fn calculate_airs_with(
    classifier: &dyn DomainClassifier,
    data: &AssessmentData,
    metrics: &OrganizationMetrics,
) -> AirsMetrics {
    let normalizer = ResponseNormalizer::four_point();
    let risk = |keywords: &[&str]| {
        1.0 - normalizer.average(classifier.select(&data.responses, keywords))
    };

    let institution_type = metrics
        .institution_type
        .or(data.metadata.institution_type);
    let risk_factors = AirsRiskFactors {
        cultural_resistance: (risk(CULTURAL) + ACADEMIC_CONCERNS).min(1.0),
        compliance_gaps: risk(COMPLIANCE),
        resource_constraints: risk(RESOURCES),
        technical_limitations: risk(TECHNICAL),
        governance_weaknesses: risk(GOVERNANCE),
        external_pressures: external_pressure(institution_type),
    };

    let overall_risk = AIRS_WEIGHTS.composite(risk_factors.values());
    let level = AIRS_BANDS.classify(overall_risk);
    tracing::debug!(assessment_id = %data.id.0, overall_risk, level = level.label(), "airs scored");

    AirsMetrics {
        overall_risk,
        level,
        risk_factors,
        mitigation_strategies: mitigation_strategies(overall_risk),
        implementation_readiness: 1.0 - overall_risk,
        risk_timeline: risk_timeline(),
    }
}

fn external_pressure(institution_type: Option<InstitutionType>) -> f64 {
    let adjustment = match institution_type {
        Some(InstitutionType::CommunityCollege) => 0.1,
        Some(InstitutionType::ResearchUniversity) => 0.05,
        _ => 0.0,
    };
    (BASE_EXTERNAL_RISK + adjustment).min(1.0)
}

fn mitigation_strategies(risk: f64) -> Vec<MitigationStrategy> {
    let mut strategies = Vec::with_capacity(3);
    if risk >= CULTURAL_STRATEGY_THRESHOLD {
        strategies.push(MitigationStrategy {
            risk_category: "Cultural Resistance".to_string(),
            strategy: "Comprehensive change management program with faculty champions"
                .to_string(),
            priority: Priority::Immediate,
            effort: Effort::High,
            impact: 0.8,
        });
    }
    strategies.push(MitigationStrategy {
        risk_category: "Compliance".to_string(),
        strategy: "FERPA and accessibility compliance audit".to_string(),
        priority: Priority::ShortTerm,
        effort: Effort::Medium,
        impact: 0.7,
    });
    strategies.push(MitigationStrategy {
        risk_category: "Resource Planning".to_string(),
        strategy: "Phased implementation with quick wins".to_string(),
        priority: Priority::ShortTerm,
        effort: Effort::Medium,
        impact: 0.6,
    });
    strategies
}

fn risk_timeline() -> Vec<RiskTimelinePhase> {
    let phase = |name: &str, risks: &[&str], mitigations: &[&str], timeline: &str| {
        RiskTimelinePhase {
            phase: name.to_string(),
            risks: owned(risks),
            mitigations: owned(mitigations),
            timeline: timeline.to_string(),
        }
    };
    vec![
        phase(
            "Planning (Months 1-3)",
            &["Incomplete stakeholder buy-in", "Unclear governance structure"],
            &["Stakeholder engagement plan", "Governance framework development"],
            "90 days",
        ),
        phase(
            "Pilot Implementation (Months 4-9)",
            &["Faculty resistance", "Technical integration issues"],
            &["Change management support", "Technical pilot testing"],
            "6 months",
        ),
        phase(
            "Scale & Adoption (Months 10-18)",
            &["Scaling challenges", "Compliance gaps"],
            &["Systematic rollout plan", "Compliance monitoring"],
            "9 months",
        ),
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
        assert!(AIRS_WEIGHTS.validate().is_ok());
        assert!(AIRS_BANDS.is_strictly_increasing());
    }

    #[test]
    fn empty_assessment_sits_at_neutral_risk() {
        let result = calculate_airs(&AssessmentData::default(), &OrganizationMetrics::default());

        assert!((result.risk_factors.cultural_resistance - 0.535).abs() < 1e-12);
        assert!((result.risk_factors.compliance_gaps - 0.5).abs() < 1e-12);
        assert!((result.risk_factors.external_pressures - 0.3).abs() < 1e-12);
        let expected = 0.25 * 0.535 + 0.20 * 0.5 + 0.20 * 0.5 + 0.15 * 0.5 + 0.10 * 0.5 + 0.10 * 0.3;
        assert!((result.overall_risk - expected).abs() < 1e-12);
        assert!((result.implementation_readiness - (1.0 - expected)).abs() < 1e-12);
        assert_eq!(result.level, RiskLevel::Low);
        assert_eq!(result.mitigation_strategies.len(), 2);
        assert_eq!(result.risk_timeline.len(), 3);
        assert_eq!(result.risk_timeline[0].timeline, "90 days");
    }

    #[test]
    fn unprepared_institutions_get_cultural_mitigation_first() {
        let responses = vec![
            numeric("q1", "Faculty openness to change", 0.0),
            numeric("q2", "FERPA compliance posture", 0.0),
            numeric("q3", "Budget for staffing", 0.0),
            numeric("q4", "Technology integration", 0.0),
            numeric("q5", "Governance oversight", 0.0),
        ];
        let metrics = OrganizationMetrics {
            institution_type: Some(InstitutionType::CommunityCollege),
            ..OrganizationMetrics::default()
        };
        let result = calculate_airs(&AssessmentData::new("a-risk", responses), &metrics);

        assert_eq!(result.risk_factors.cultural_resistance, 1.0);
        assert!((result.risk_factors.external_pressures - 0.4).abs() < 1e-12);
        assert_eq!(result.level, RiskLevel::Critical);
        assert_eq!(
            result.mitigation_strategies[0].risk_category,
            "Cultural Resistance"
        );
        assert_eq!(result.mitigation_strategies[0].priority, Priority::Immediate);
    }

    #[test]
    fn metadata_institution_type_is_used_when_metrics_omit_it() {
        let mut data = AssessmentData::default();
        data.metadata.institution_type = Some(InstitutionType::ResearchUniversity);
        let result = calculate_airs(&data, &OrganizationMetrics::default());
        assert!((result.risk_factors.external_pressures - 0.35).abs() < 1e-12);
    }
}
