//! AI Implementation Priority Score (AIPS). Resource requirements and risk count against
//! the composite, so they enter the weight table as complements.

use serde::Serialize;

use super::anchored;
use super::domain::{owned, Magnitude, Timeframe};
use crate::assessment::{
    AssessmentData, Bands, DomainClassifier, KeywordClassifier, OrganizationMetrics,
    ResponseNormalizer, WeightTable,
};

pub const AIPS_WEIGHTS: WeightTable<5> = WeightTable::new(
    "aips",
    [
        ("strategic_value", 0.30),
        ("implementation_feasibility", 0.25),
        ("resource_requirements", 0.20),
        ("risk_level", 0.15),
        ("time_to_value", 0.10),
    ],
);

const STRATEGIC: &[&str] = &["strategic", "mission", "goals", "outcomes", "impact"];
const FEASIBILITY: &[&str] = &[
    "technical",
    "infrastructure",
    "capability",
    "expertise",
    "readiness",
];
const RESOURCES: &[&str] = &["budget", "funding", "staffing", "resources", "capacity"];
const RISK: &[&str] = &["risk", "challenge", "barrier", "concern", "resistance"];
const TIME: &[&str] = &["timeline", "speed", "rapid", "immediate", "quick"];

/// Student impact (0.8) and institutional reputation (0.6).
const STRATEGIC_ANCHORS: &[(f64, f64)] = &[(0.8, 0.25), (0.6, 0.15)];
/// Technical (0.7) and organizational (0.65) readiness.
const FEASIBILITY_ANCHORS: &[(f64, f64)] = &[(0.7, 0.3), (0.65, 0.2)];

/// Initiatives below this share of the overall priority are dropped.
const INITIATIVE_CUTOFF: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityLevel {
    Deferred,
    Low,
    Medium,
    High,
}

pub const AIPS_BANDS: Bands<PriorityLevel> = Bands::new(
    PriorityLevel::Deferred,
    &[
        (0.35, PriorityLevel::Low),
        (0.55, PriorityLevel::Medium),
        (0.75, PriorityLevel::High),
    ],
);

/// Raw factors. Higher `resource_requirements` and `risk_level` are less favorable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriorityFactors {
    pub strategic_value: f64,
    pub implementation_feasibility: f64,
    pub resource_requirements: f64,
    pub risk_level: f64,
    pub time_to_value: f64,
}

impl PriorityFactors {
    fn weighted_values(&self) -> [f64; 5] {
        [
            self.strategic_value,
            self.implementation_feasibility,
            1.0 - self.resource_requirements,
            1.0 - self.risk_level,
            self.time_to_value,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InitiativeCategory {
    QuickWin,
    Strategic,
    Transformational,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrioritizedInitiative {
    pub name: String,
    pub priority: f64,
    pub category: InitiativeCategory,
    pub effort: Magnitude,
    pub timeframe: Timeframe,
    pub dependencies: Vec<String>,
    pub expected_roi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImplementationPhase {
    pub phase: u8,
    pub name: String,
    pub duration: String,
    pub initiatives: Vec<String>,
    pub resources: Vec<String>,
    pub milestones: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceAllocation {
    pub resource: String,
    /// Percent of budget for "Budget", FTE otherwise.
    pub allocation: f64,
    pub initiatives: Vec<String>,
    pub timeline: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickWin {
    pub initiative: String,
    pub value: f64,
    pub effort: f64,
    pub timeline: String,
    pub requirements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AipsMetrics {
    pub overall_priority: f64,
    pub level: PriorityLevel,
    pub factors: PriorityFactors,
    pub recommended_initiatives: Vec<PrioritizedInitiative>,
    pub implementation_sequence: Vec<ImplementationPhase>,
    pub resource_allocation: Vec<ResourceAllocation>,
    pub quick_wins: Vec<QuickWin>,
}

pub fn calculate_aips(data: &AssessmentData, metrics: &OrganizationMetrics) -> AipsMetrics {
    calculate_aips_with(&KeywordClassifier, data, metrics)
}

pub fn calculate_aips_with(
    classifier: &dyn DomainClassifier,
    data: &AssessmentData,
    _metrics: &OrganizationMetrics,
) -> AipsMetrics {
    let normalizer = ResponseNormalizer::four_point();
    let score = |keywords: &[&str]| normalizer.average(classifier.select(&data.responses, keywords));

    let factors = PriorityFactors {
        strategic_value: anchored(score(STRATEGIC), 0.6, STRATEGIC_ANCHORS),
        implementation_feasibility: anchored(score(FEASIBILITY), 0.5, FEASIBILITY_ANCHORS),
        resource_requirements: 1.0 - score(RESOURCES),
        risk_level: score(RISK),
        time_to_value: score(TIME),
    };
    let overall_priority = AIPS_WEIGHTS.composite(factors.weighted_values());
    tracing::debug!(assessment_id = %data.id.0, overall_priority, "aips scored");

    let recommended_initiatives = recommended_initiatives(overall_priority);
    AipsMetrics {
        overall_priority,
        level: AIPS_BANDS.classify(overall_priority),
        factors,
        implementation_sequence: implementation_sequence(&recommended_initiatives),
        resource_allocation: resource_allocation(&recommended_initiatives),
        recommended_initiatives,
        quick_wins: quick_wins(),
    }
}

fn recommended_initiatives(overall_priority: f64) -> Vec<PrioritizedInitiative> {
    let initiative = |name: &str,
                      priority: f64,
                      category,
                      effort,
                      timeframe,
                      dependencies: &[&str],
                      expected_roi: f64| PrioritizedInitiative {
        name: name.to_string(),
        priority,
        category,
        effort,
        timeframe,
        dependencies: owned(dependencies),
        expected_roi,
    };
    let mut initiatives = vec![
        initiative(
            "AI-Enhanced Student Support Chatbot",
            0.85,
            InitiativeCategory::QuickWin,
            Magnitude::Medium,
            Timeframe::ShortTerm,
            &["Knowledge base development", "Staff training"],
            3.2,
        ),
        initiative(
            "Predictive Analytics for Student Success",
            0.78,
            InitiativeCategory::Strategic,
            Magnitude::High,
            Timeframe::LongTerm,
            &["Data integration", "Analytics platform", "Privacy compliance"],
            4.5,
        ),
        initiative(
            "Automated Administrative Workflows",
            0.72,
            InitiativeCategory::QuickWin,
            Magnitude::Low,
            Timeframe::Immediate,
            &["Process mapping", "System integration"],
            2.8,
        ),
        initiative(
            "AI-Powered Personalized Learning",
            0.68,
            InitiativeCategory::Transformational,
            Magnitude::High,
            Timeframe::LongTerm,
            &["Learning platform", "Content development", "Faculty training"],
            5.1,
        ),
    ];
    initiatives.retain(|item| item.priority >= overall_priority * INITIATIVE_CUTOFF);
    initiatives.sort_by(|a, b| b.priority.total_cmp(&a.priority));
    initiatives
}

fn names_in(initiatives: &[PrioritizedInitiative], category: InitiativeCategory) -> Vec<String> {
    initiatives
        .iter()
        .filter(|item| item.category == category)
        .map(|item| item.name.clone())
        .collect()
}

fn implementation_sequence(initiatives: &[PrioritizedInitiative]) -> Vec<ImplementationPhase> {
    let phase = |phase: u8,
                 name: &str,
                 duration: &str,
                 category,
                 resources: &[&str],
                 milestones: &[&str]| ImplementationPhase {
        phase,
        name: name.to_string(),
        duration: duration.to_string(),
        initiatives: names_in(initiatives, category),
        resources: owned(resources),
        milestones: owned(milestones),
    };
    vec![
        phase(
            1,
            "Foundation & Quick Wins",
            "3-6 months",
            InitiativeCategory::QuickWin,
            &["Technical team", "Project management", "Training budget"],
            &[
                "First AI tool deployed",
                "Staff training completed",
                "Initial metrics collected",
            ],
        ),
        phase(
            2,
            "Strategic Implementation",
            "6-12 months",
            InitiativeCategory::Strategic,
            &["Data analytics team", "Integration specialists", "Change management"],
            &[
                "Data platform operational",
                "Analytics dashboard live",
                "User adoption targets met",
            ],
        ),
        phase(
            3,
            "Transformational Scaling",
            "12-24 months",
            InitiativeCategory::Transformational,
            &["AI specialists", "Content developers", "Faculty development"],
            &[
                "Personalized learning deployed",
                "Faculty adoption achieved",
                "Student outcomes improved",
            ],
        ),
    ]
}

fn resource_allocation(initiatives: &[PrioritizedInitiative]) -> Vec<ResourceAllocation> {
    let allocation = |resource: &str, amount: f64, names: Vec<String>, timeline: &str| {
        ResourceAllocation {
            resource: resource.to_string(),
            allocation: amount,
            initiatives: names,
            timeline: timeline.to_string(),
        }
    };
    vec![
        allocation(
            "Budget",
            100.0,
            initiatives.iter().map(|item| item.name.clone()).collect(),
            "24 months",
        ),
        allocation(
            "Technical Staff",
            2.5,
            owned(&[
                "AI-Enhanced Student Support Chatbot",
                "Automated Administrative Workflows",
            ]),
            "12 months",
        ),
        allocation(
            "Data Analytics Team",
            1.5,
            owned(&["Predictive Analytics for Student Success"]),
            "18 months",
        ),
        allocation(
            "Faculty Development",
            1.0,
            owned(&["AI-Powered Personalized Learning"]),
            "24 months",
        ),
    ]
}

fn quick_wins() -> Vec<QuickWin> {
    let win = |initiative: &str, value: f64, effort: f64, timeline: &str, requirements: &[&str]| {
        QuickWin {
            initiative: initiative.to_string(),
            value,
            effort,
            timeline: timeline.to_string(),
            requirements: owned(requirements),
        }
    };
    vec![
        win(
            "Email Automation for Student Communications",
            0.75,
            0.3,
            "2-4 weeks",
            &["Email system integration", "Template development"],
        ),
        win(
            "AI-Powered FAQ System",
            0.65,
            0.4,
            "4-6 weeks",
            &["Knowledge base creation", "Chatbot platform"],
        ),
        win(
            "Automated Report Generation",
            0.55,
            0.25,
            "1-2 weeks",
            &["Data access", "Report templates"],
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
        assert!(AIPS_WEIGHTS.validate().is_ok());
        assert!(AIPS_BANDS.is_strictly_increasing());
    }

    #[test]
    fn unanswered_survey_keeps_every_initiative() {
        let result = calculate_aips(&AssessmentData::default(), &OrganizationMetrics::default());

        assert!((result.factors.strategic_value - 0.59).abs() < 1e-9);
        assert!((result.factors.implementation_feasibility - 0.59).abs() < 1e-9);
        assert!((result.overall_priority - 0.5495).abs() < 1e-9);
        assert_eq!(result.level, PriorityLevel::Low);
        assert_eq!(result.recommended_initiatives.len(), 4);
        assert_eq!(
            result.implementation_sequence[0].initiatives,
            [
                "AI-Enhanced Student Support Chatbot",
                "Automated Administrative Workflows"
            ]
        );
        assert_eq!(result.resource_allocation[0].initiatives.len(), 4);
        assert_eq!(result.quick_wins.len(), 3);
    }

    #[test]
    fn high_priority_filters_out_weaker_initiatives() {
        let responses = vec![
            numeric("q1", "Strategic goals and outcomes", 4.0),
            numeric("q2", "Technical infrastructure readiness", 4.0),
            numeric("q3", "Budget and staffing capacity", 4.0),
            numeric("q4", "Risk of resistance", 0.0),
            numeric("q5", "Rapid timeline", 4.0),
        ];
        let result = calculate_aips(
            &AssessmentData::new("a-priority", responses),
            &OrganizationMetrics::default(),
        );

        assert_eq!(result.factors.resource_requirements, 0.0);
        assert_eq!(result.factors.risk_level, 0.0);
        // 0.3 * 0.89 + 0.25 * 0.84 + 0.2 + 0.15 + 0.1
        assert!((result.overall_priority - 0.927).abs() < 1e-9);
        assert_eq!(result.level, PriorityLevel::High);
        let names: Vec<&str> = result
            .recommended_initiatives
            .iter()
            .map(|item| item.name.as_str())
            .collect();
        assert_eq!(
            names,
            [
                "AI-Enhanced Student Support Chatbot",
                "Predictive Analytics for Student Success"
            ]
        );
        assert!(result.implementation_sequence[2].initiatives.is_empty());
    }
}
