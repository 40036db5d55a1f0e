//! Higher-Order Complexity Indicator (HOCI) scoring. Higher scores mean a more
//! complex organization; free-text answers are read with the complexity vocabulary.

use std::collections::BTreeMap;

use serde::Serialize;

use super::dispersion_confidence;
use super::domain::owned;
use crate::assessment::{
    AssessmentData, AssessmentResponse, Bands, DomainClassifier, KeywordClassifier,
    ResponseNormalizer, ResponseValue, ScoreScale, Vocabulary, WeightTable,
};

pub const HOCI_WEIGHTS: WeightTable<6> = WeightTable::new(
    "hoci",
    [
        ("structural", 0.25),
        ("process", 0.20),
        ("information", 0.20),
        ("decision", 0.15),
        ("relational", 0.12),
        ("temporal", 0.08),
    ],
);

const STRUCTURAL: &[&str] = &[
    "hierarchy",
    "reporting",
    "span of control",
    "organizational structure",
];
const PROCESS: &[&str] = &["process", "workflow", "procedure", "steps"];
const INFORMATION: &[&str] = &["information", "data", "knowledge", "communication"];
const DECISION: &[&str] = &["decision", "approval", "authority", "governance"];
const RELATIONAL: &[&str] = &[
    "relationship",
    "coordination",
    "collaboration",
    "interdependence",
];
const TEMPORAL: &[&str] = &["timing", "sequence", "deadline", "cycle time"];

const COMPLEX_THRESHOLD: f64 = 0.65;
const CHAOTIC_THRESHOLD: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityLevel {
    Simple,
    Moderate,
    Complex,
    Chaotic,
}

impl ComplexityLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Simple => "Simple",
            Self::Moderate => "Moderate",
            Self::Complex => "Complex",
            Self::Chaotic => "Chaotic",
        }
    }
}

pub const HOCI_BANDS: Bands<ComplexityLevel> = Bands::new(
    ComplexityLevel::Simple,
    &[
        (0.35, ComplexityLevel::Moderate),
        (0.65, ComplexityLevel::Complex),
        (0.85, ComplexityLevel::Chaotic),
    ],
);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HociDimensions {
    pub structural: f64,
    pub process: f64,
    pub information: f64,
    pub decision: f64,
    pub relational: f64,
    pub temporal: f64,
}

impl HociDimensions {
    fn values(&self) -> [f64; 6] {
        [
            self.structural,
            self.process,
            self.information,
            self.decision,
            self.relational,
            self.temporal,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityTier {
    Organizational,
    Departmental,
    Team,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexityLayer {
    pub tier: ComplexityTier,
    pub complexity: f64,
    pub description: String,
    pub key_factors: Vec<String>,
    pub interdependencies: Vec<String>,
    pub management_strategies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HociMetrics {
    pub overall_score: f64,
    pub level: ComplexityLevel,
    pub dimensions: HociDimensions,
    pub confidence: f64,
    pub layers: Vec<ComplexityLayer>,
    pub emergent_properties: Vec<String>,
    pub complexity_risks: Vec<String>,
    pub simplification_opportunities: Vec<String>,
    /// Shannon entropy of the answer distribution, scaled to [0,1].
    pub organizational_entropy: f64,
}

pub fn calculate_hoci(data: &AssessmentData) -> HociMetrics {
    calculate_hoci_with(&KeywordClassifier, data)
}

pub fn calculate_hoci_with(classifier: &dyn DomainClassifier, data: &AssessmentData) -> HociMetrics {
    let normalizer = ResponseNormalizer::new(ScoreScale::FivePoint, Vocabulary::complexity());
    let score = |keywords: &[&str]| normalizer.average(classifier.select(&data.responses, keywords));

    let dimensions = HociDimensions {
        structural: score(STRUCTURAL),
        process: score(PROCESS),
        information: score(INFORMATION),
        decision: score(DECISION),
        relational: score(RELATIONAL),
        temporal: score(TEMPORAL),
    };
    let overall_score = HOCI_WEIGHTS.composite(dimensions.values());
    tracing::debug!(assessment_id = %data.id.0, overall_score, "hoci scored");

    HociMetrics {
        overall_score,
        level: HOCI_BANDS.classify(overall_score),
        dimensions,
        confidence: dispersion_confidence(&dimensions.values()),
        layers: complexity_layers(&dimensions),
        emergent_properties: emergent_properties(overall_score),
        complexity_risks: complexity_risks(overall_score),
        simplification_opportunities: simplification_opportunities(overall_score),
        organizational_entropy: organizational_entropy(&data.responses),
    }
}

fn complexity_layers(dimensions: &HociDimensions) -> Vec<ComplexityLayer> {
    vec![
        ComplexityLayer {
            tier: ComplexityTier::Organizational,
            complexity: (dimensions.structural + dimensions.decision) / 2.0,
            description:
                "Organizational-level complexity driven by structure and decision-making systems"
                    .to_string(),
            key_factors: owned(&[
                "Hierarchical levels",
                "Decision authority",
                "Governance structures",
            ]),
            interdependencies: owned(&[
                "Strategic planning",
                "Resource allocation",
                "Performance management",
            ]),
            management_strategies: owned(&[
                "Simplify structures",
                "Clarify decision rights",
                "Streamline governance",
            ]),
        },
        ComplexityLayer {
            tier: ComplexityTier::Departmental,
            complexity: (dimensions.process + dimensions.relational) / 2.0,
            description:
                "Departmental complexity arising from process interactions and coordination needs"
                    .to_string(),
            key_factors: owned(&[
                "Cross-functional processes",
                "Coordination mechanisms",
                "Interface management",
            ]),
            interdependencies: owned(&[
                "Workflow dependencies",
                "Resource sharing",
                "Information exchange",
            ]),
            management_strategies: owned(&[
                "Process standardization",
                "Interface optimization",
                "Coordination tools",
            ]),
        },
        ComplexityLayer {
            tier: ComplexityTier::Team,
            complexity: (dimensions.information + dimensions.temporal) / 2.0,
            description:
                "Team-level complexity from information processing and temporal coordination"
                    .to_string(),
            key_factors: owned(&[
                "Information flows",
                "Task coordination",
                "Timing dependencies",
            ]),
            interdependencies: owned(&[
                "Communication patterns",
                "Task sequences",
                "Resource timing",
            ]),
            management_strategies: owned(&[
                "Information systems",
                "Communication protocols",
                "Scheduling tools",
            ]),
        },
    ]
}

fn emergent_properties(score: f64) -> Vec<String> {
    let mut properties = Vec::new();
    if score >= COMPLEX_THRESHOLD {
        properties.extend(owned(&[
            "Self-organizing teams and informal networks",
            "Adaptive behaviors and workaround solutions",
            "Innovation through creative problem-solving",
            "Resilience through redundancy and flexibility",
        ]));
    }
    if score >= CHAOTIC_THRESHOLD {
        properties.extend(owned(&[
            "Unpredictable system behaviors and outcomes",
            "Non-linear responses to interventions",
            "Difficulty in root cause analysis",
        ]));
    }
    properties
}

fn complexity_risks(score: f64) -> Vec<String> {
    let mut risks = Vec::new();
    if score >= COMPLEX_THRESHOLD {
        risks.extend(owned(&[
            "Increased coordination costs and delays",
            "Higher potential for errors and misunderstandings",
            "Difficulty in change implementation and management",
            "Reduced transparency and accountability",
        ]));
    }
    if score >= CHAOTIC_THRESHOLD {
        risks.extend(owned(&[
            "System instability and unpredictable behaviors",
            "Cascading failures and unintended consequences",
            "Decision paralysis and analysis overload",
            "Inability to achieve desired outcomes",
        ]));
    }
    risks
}

fn simplification_opportunities(score: f64) -> Vec<String> {
    if score < COMPLEX_THRESHOLD {
        return Vec::new();
    }
    owned(&[
        "Streamline reporting relationships and hierarchies",
        "Standardize processes and eliminate redundancies",
        "Implement unified information systems",
        "Clarify roles, responsibilities, and decision rights",
        "Reduce unnecessary meetings and touchpoints",
    ])
}

/// Entropy over the distinct answered values, normalized by the five-point maximum.
fn organizational_entropy(responses: &[AssessmentResponse]) -> f64 {
    let mut frequencies: BTreeMap<String, usize> = BTreeMap::new();
    for response in responses {
        let key = match &response.value {
            ResponseValue::Missing => continue,
            ResponseValue::Numeric(value) => format!("n:{value}"),
            ResponseValue::Qualitative(level) => format!("q:{}", level.label()),
            ResponseValue::Text(text) => format!("t:{}", text.trim().to_lowercase()),
        };
        *frequencies.entry(key).or_default() += 1;
    }

    let total: usize = frequencies.values().sum();
    if total == 0 {
        return 0.0;
    }
    let entropy: f64 = frequencies
        .values()
        .map(|count| {
            let p = *count as f64 / total as f64;
            -p * p.log2()
        })
        .sum();
    (entropy / 5f64.log2()).clamp(0.0, 1.0)
}
