//! AI Business Strategy Score (AIBS): strategic positioning of AI initiatives against the
//! institution's competitive landscape.

use serde::Serialize;

use super::anchored;
use super::domain::{owned, Magnitude, Timeframe};
use crate::assessment::{
    AssessmentData, Bands, DomainClassifier, KeywordClassifier, OrganizationMetrics,
    ResponseNormalizer, WeightTable,
};

pub const AIBS_WEIGHTS: WeightTable<6> = WeightTable::new(
    "aibs",
    [
        ("competitive_advantage", 0.25),
        ("market_positioning", 0.20),
        ("revenue_impact", 0.20),
        ("operational_efficiency", 0.15),
        ("innovation_potential", 0.12),
        ("strategic_alignment", 0.08),
    ],
);

const COMPETITIVE: &[&str] = &[
    "competitive",
    "advantage",
    "differentiation",
    "unique",
    "innovation",
];
const MARKET: &[&str] = &["position", "market", "reputation", "brand", "recognition"];
const REVENUE: &[&str] = &[
    "revenue",
    "funding",
    "financial",
    "cost",
    "efficiency",
    "savings",
];
const EFFICIENCY: &[&str] = &[
    "efficiency",
    "automation",
    "process",
    "productivity",
    "streamline",
];
const INNOVATION: &[&str] = &[
    "innovation",
    "research",
    "development",
    "cutting-edge",
    "breakthrough",
];
const ALIGNMENT: &[&str] = &["strategy", "mission", "vision", "goals", "alignment"];

/// Academic excellence, student experience and research capability.
const COMPETITIVE_ANCHORS: &[(f64, f64)] = &[(0.75, 0.25), (0.68, 0.20), (0.72, 0.15)];
/// Institutional reputation and market share.
const MARKET_ANCHORS: &[(f64, f64)] = &[(0.70, 0.25), (0.55, 0.15)];
/// Enrollment, operational savings and grant opportunities.
const REVENUE_ANCHORS: &[(f64, f64)] = &[(0.65, 0.25), (0.58, 0.20), (0.62, 0.15)];
/// Research capacity and faculty innovation.
const INNOVATION_ANCHORS: &[(f64, f64)] = &[(0.68, 0.25), (0.60, 0.15)];

/// Recommendations whose impact falls below this share of the overall score are dropped.
const RECOMMENDATION_CUTOFF: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyLevel {
    Lagging,
    Following,
    Leading,
    Pioneering,
}

pub const AIBS_BANDS: Bands<StrategyLevel> = Bands::new(
    StrategyLevel::Lagging,
    &[
        (0.55, StrategyLevel::Following),
        (0.75, StrategyLevel::Leading),
        (0.90, StrategyLevel::Pioneering),
    ],
);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrategyComponents {
    pub competitive_advantage: f64,
    pub market_positioning: f64,
    pub revenue_impact: f64,
    pub operational_efficiency: f64,
    pub innovation_potential: f64,
    pub strategic_alignment: f64,
}

impl StrategyComponents {
    fn values(&self) -> [f64; 6] {
        [
            self.competitive_advantage,
            self.market_positioning,
            self.revenue_impact,
            self.operational_efficiency,
            self.innovation_potential,
            self.strategic_alignment,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitivePosition {
    Leader,
    Challenger,
    Follower,
    Niche,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitiveAnalysis {
    pub current_position: CompetitivePosition,
    pub advantages: Vec<String>,
    pub threats: Vec<String>,
    pub differentiation_factors: Vec<String>,
    pub market_gaps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketOpportunity {
    pub opportunity: String,
    pub impact: Magnitude,
    pub effort: Magnitude,
    pub timeframe: Timeframe,
    pub prerequisites: Vec<String>,
    pub potential_revenue: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevenueType {
    CostSavings,
    NewRevenue,
    EfficiencyGains,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueProjection {
    pub initiative: String,
    pub yearly: [f64; 3],
    pub revenue_type: RevenueType,
    pub confidence: Magnitude,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyCategory {
    Positioning,
    Investment,
    Partnership,
    Innovation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategicRecommendation {
    pub category: StrategyCategory,
    pub recommendation: String,
    pub priority: Magnitude,
    pub impact: f64,
    pub timeline: String,
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorCategory {
    Efficiency,
    Quality,
    Innovation,
    Satisfaction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceIndicator {
    pub metric: String,
    pub current_value: f64,
    pub target_value: f64,
    pub timeframe: String,
    pub category: IndicatorCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AibsMetrics {
    pub overall_strategy: f64,
    pub level: StrategyLevel,
    pub components: StrategyComponents,
    pub competitive_analysis: CompetitiveAnalysis,
    pub market_opportunities: Vec<MarketOpportunity>,
    pub revenue_projections: Vec<RevenueProjection>,
    pub strategic_recommendations: Vec<StrategicRecommendation>,
    pub performance_indicators: Vec<PerformanceIndicator>,
}

pub fn calculate_aibs(data: &AssessmentData, metrics: &OrganizationMetrics) -> AibsMetrics {
    calculate_aibs_with(&KeywordClassifier, data, metrics)
}

pub fn calculate_aibs_with(
    classifier: &dyn DomainClassifier,
    data: &AssessmentData,
    _metrics: &OrganizationMetrics,
) -> AibsMetrics {
    let normalizer = ResponseNormalizer::four_point();
    let score = |keywords: &[&str]| normalizer.average(classifier.select(&data.responses, keywords));

    let components = StrategyComponents {
        competitive_advantage: anchored(score(COMPETITIVE), 0.4, COMPETITIVE_ANCHORS),
        market_positioning: anchored(score(MARKET), 0.6, MARKET_ANCHORS),
        revenue_impact: anchored(score(REVENUE), 0.4, REVENUE_ANCHORS),
        operational_efficiency: score(EFFICIENCY),
        innovation_potential: anchored(score(INNOVATION), 0.6, INNOVATION_ANCHORS),
        strategic_alignment: score(ALIGNMENT),
    };
    let overall_strategy = AIBS_WEIGHTS.composite(components.values());
    tracing::debug!(assessment_id = %data.id.0, overall_strategy, "aibs scored");

    AibsMetrics {
        overall_strategy,
        level: AIBS_BANDS.classify(overall_strategy),
        components,
        competitive_analysis: competitive_analysis(),
        market_opportunities: market_opportunities(),
        revenue_projections: revenue_projections(),
        strategic_recommendations: strategic_recommendations(overall_strategy),
        performance_indicators: performance_indicators(),
    }
}

fn competitive_analysis() -> CompetitiveAnalysis {
    CompetitiveAnalysis {
        current_position: CompetitivePosition::Challenger,
        advantages: owned(&[
            "Personalized learning experiences",
            "Data-driven student success initiatives",
            "Automated administrative processes",
            "AI-enhanced research capabilities",
        ]),
        threats: owned(&[
            "Larger institutions with more resources",
            "Technology-first competitors",
            "Online education platforms",
            "Corporate training programs",
        ]),
        differentiation_factors: owned(&[
            "AI-powered student support",
            "Predictive analytics for outcomes",
            "Automated workflow optimization",
            "Research acceleration tools",
        ]),
        market_gaps: owned(&[
            "Personalized career guidance",
            "Real-time learning analytics",
            "Automated compliance monitoring",
            "AI-driven curriculum optimization",
        ]),
    }
}

fn market_opportunities() -> Vec<MarketOpportunity> {
    let opportunity = |name: &str, impact, effort, timeframe, prerequisites: &[&str], revenue| {
        MarketOpportunity {
            opportunity: name.to_string(),
            impact,
            effort,
            timeframe,
            prerequisites: owned(prerequisites),
            potential_revenue: revenue,
        }
    };
    vec![
        opportunity(
            "AI-Enhanced Online Learning Platform",
            Magnitude::High,
            Magnitude::High,
            Timeframe::LongTerm,
            &["Technology infrastructure", "Faculty training", "Content development"],
            2_500_000.0,
        ),
        opportunity(
            "Predictive Student Success Program",
            Magnitude::High,
            Magnitude::Medium,
            Timeframe::ShortTerm,
            &["Data integration", "Analytics platform", "Staff training"],
            1_200_000.0,
        ),
        opportunity(
            "Automated Administrative Services",
            Magnitude::Medium,
            Magnitude::Low,
            Timeframe::Immediate,
            &["Process mapping", "System integration"],
            800_000.0,
        ),
        opportunity(
            "AI Research Collaboration Hub",
            Magnitude::Medium,
            Magnitude::High,
            Timeframe::LongTerm,
            &["Research partnerships", "Funding", "Infrastructure"],
            1_800_000.0,
        ),
    ]
}

fn revenue_projections() -> Vec<RevenueProjection> {
    let projection = |initiative: &str, yearly, revenue_type, confidence| RevenueProjection {
        initiative: initiative.to_string(),
        yearly,
        revenue_type,
        confidence,
    };
    vec![
        projection(
            "AI-Enhanced Student Support",
            [150_000.0, 300_000.0, 450_000.0],
            RevenueType::CostSavings,
            Magnitude::High,
        ),
        projection(
            "Predictive Analytics Platform",
            [200_000.0, 500_000.0, 800_000.0],
            RevenueType::EfficiencyGains,
            Magnitude::Medium,
        ),
        projection(
            "Automated Workflows",
            [100_000.0, 180_000.0, 250_000.0],
            RevenueType::CostSavings,
            Magnitude::High,
        ),
        projection(
            "AI Research Services",
            [50_000.0, 150_000.0, 300_000.0],
            RevenueType::NewRevenue,
            Magnitude::Low,
        ),
    ]
}

fn strategic_recommendations(overall_strategy: f64) -> Vec<StrategicRecommendation> {
    let recommendation =
        |category, text: &str, priority, impact: f64, timeline: &str, resources: &[&str]| {
            StrategicRecommendation {
                category,
                recommendation: text.to_string(),
                priority,
                impact,
                timeline: timeline.to_string(),
                resources: owned(resources),
            }
        };
    let mut recommendations = vec![
        recommendation(
            StrategyCategory::Positioning,
            "Position as AI-forward institution for student success",
            Magnitude::High,
            0.85,
            "6-12 months",
            &["Marketing team", "Student affairs", "Technology team"],
        ),
        recommendation(
            StrategyCategory::Investment,
            "Invest in predictive analytics infrastructure",
            Magnitude::High,
            0.78,
            "12-18 months",
            &["IT budget", "Data team", "Analytics platform"],
        ),
        recommendation(
            StrategyCategory::Partnership,
            "Partner with AI technology vendors for rapid deployment",
            Magnitude::Medium,
            0.65,
            "3-6 months",
            &["Partnership team", "Legal review", "Budget approval"],
        ),
        recommendation(
            StrategyCategory::Innovation,
            "Establish AI research and development center",
            Magnitude::Medium,
            0.72,
            "18-24 months",
            &["Research funding", "Faculty recruitment", "Facility setup"],
        ),
    ];
    recommendations.retain(|item| item.impact >= overall_strategy * RECOMMENDATION_CUTOFF);
    recommendations
}

fn performance_indicators() -> Vec<PerformanceIndicator> {
    let indicator = |metric: &str, current_value, target_value, timeframe: &str, category| {
        PerformanceIndicator {
            metric: metric.to_string(),
            current_value,
            target_value,
            timeframe: timeframe.to_string(),
            category,
        }
    };
    vec![
        indicator(
            "Student Satisfaction Score",
            3.2,
            4.2,
            "12 months",
            IndicatorCategory::Satisfaction,
        ),
        indicator(
            "Administrative Process Efficiency",
            65.0,
            85.0,
            "18 months",
            IndicatorCategory::Efficiency,
        ),
        indicator("Research Output Quality", 7.5, 8.5, "24 months", IndicatorCategory::Quality),
        indicator("Innovation Index", 6.2, 8.0, "36 months", IndicatorCategory::Innovation),
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
        assert!(AIBS_WEIGHTS.validate().is_ok());
        assert!(AIBS_BANDS.is_strictly_increasing());
    }

    #[test]
    fn reference_factors_place_a_silent_institution_as_follower() {
        let result = calculate_aibs(&AssessmentData::default(), &OrganizationMetrics::default());

        assert!((result.components.competitive_advantage - 0.6315).abs() < 1e-9);
        assert!((result.components.market_positioning - 0.5575).abs() < 1e-9);
        assert!((result.components.revenue_impact - 0.5715).abs() < 1e-9);
        assert!((result.components.innovation_potential - 0.56).abs() < 1e-9);
        assert!((result.overall_strategy - 0.565875).abs() < 1e-9);
        assert_eq!(result.level, StrategyLevel::Following);
        assert_eq!(result.strategic_recommendations.len(), 4);
        assert_eq!(
            result.competitive_analysis.current_position,
            CompetitivePosition::Challenger
        );
        assert_eq!(result.revenue_projections[1].yearly[2], 800_000.0);
    }

    #[test]
    fn strong_answers_reach_leading_but_not_pioneering() {
        let responses = vec![
            numeric("q1", "Competitive differentiation", 4.0),
            numeric("q2", "Market reputation and brand", 4.0),
            numeric("q3", "Revenue and savings", 4.0),
            numeric("q4", "Automation and productivity", 4.0),
            numeric("q5", "Research breakthroughs", 4.0),
            numeric("q6", "Vision and goals", 4.0),
        ];
        let result = calculate_aibs(
            &AssessmentData::new("a-strategy", responses),
            &OrganizationMetrics::default(),
        );

        // components: 0.8315, 0.8575, 0.7715, 1.0, 0.86, 1.0
        assert!((result.overall_strategy - 0.866875).abs() < 1e-9);
        assert_eq!(result.level, StrategyLevel::Leading);
        assert!(result
            .strategic_recommendations
            .iter()
            .all(|item| item.impact >= 0.866875 * RECOMMENDATION_CUTOFF));
        assert_eq!(result.market_opportunities.len(), 4);
        assert_eq!(result.performance_indicators[1].target_value, 85.0);
    }
}
