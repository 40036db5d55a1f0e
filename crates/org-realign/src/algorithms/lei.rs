//! Leadership Effectiveness Index (LEI) scoring.

use serde::Serialize;

use super::dispersion_confidence;
use super::domain::owned;
use crate::assessment::{
    AssessmentData, Bands, DomainClassifier, KeywordClassifier, ResponseNormalizer, WeightTable,
};

pub const LEI_WEIGHTS: WeightTable<6> = WeightTable::new(
    "lei",
    [
        ("vision_strategy", 0.25),
        ("communication", 0.20),
        ("decision_making", 0.20),
        ("team_development", 0.15),
        ("emotional_intelligence", 0.10),
        ("change_leadership", 0.10),
    ],
);

const VISION: &[&str] = &["vision", "strategy", "direction", "future"];
const COMMUNICATION: &[&str] = &["communication", "listening", "feedback", "clarity"];
const DECISION: &[&str] = &["decision", "judgment", "problem solving", "critical thinking"];
const TEAM: &[&str] = &["team", "development", "coaching", "mentoring"];
const EMOTIONAL: &[&str] = &["emotional", "empathy", "self-awareness", "relationship"];
const CHANGE: &[&str] = &["change", "transformation", "innovation", "adaptation"];
const STYLE: &[&str] = &["leadership style", "approach", "management style"];
const SUCCESSION: &[&str] = &["succession", "development", "readiness", "capability"];

const DEVELOPMENT_THRESHOLD: f64 = 0.65;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeiLevel {
    Emerging,
    Developing,
    Competent,
    Exemplary,
}

impl LeiLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Emerging => "Emerging",
            Self::Developing => "Developing",
            Self::Competent => "Competent",
            Self::Exemplary => "Exemplary",
        }
    }
}

pub const LEI_BANDS: Bands<LeiLevel> = Bands::new(
    LeiLevel::Emerging,
    &[
        (0.40, LeiLevel::Developing),
        (0.65, LeiLevel::Competent),
        (0.85, LeiLevel::Exemplary),
    ],
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadershipStyle {
    Transformational,
    Democratic,
    Transactional,
    Adaptive,
}

impl LeadershipStyle {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Transformational => "Transformational",
            Self::Democratic => "Democratic",
            Self::Transactional => "Transactional",
            Self::Adaptive => "Adaptive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LeiDimensions {
    pub vision_strategy: f64,
    pub communication: f64,
    pub decision_making: f64,
    pub team_development: f64,
    pub emotional_intelligence: f64,
    pub change_leadership: f64,
}

impl LeiDimensions {
    fn values(&self) -> [f64; 6] {
        [
            self.vision_strategy,
            self.communication,
            self.decision_making,
            self.team_development,
            self.emotional_intelligence,
            self.change_leadership,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadershipDimension {
    pub name: String,
    pub description: String,
    pub score: f64,
    pub level: LeiLevel,
    pub key_behaviors: Vec<String>,
    pub development_actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeiMetrics {
    pub overall_score: f64,
    pub level: LeiLevel,
    pub dimensions: LeiDimensions,
    pub confidence: f64,
    pub leadership_dimensions: Vec<LeadershipDimension>,
    pub leadership_style: LeadershipStyle,
    pub successor_readiness: f64,
    pub development_areas: Vec<String>,
    pub strengths: Vec<String>,
}

pub fn calculate_lei(data: &AssessmentData) -> LeiMetrics {
    calculate_lei_with(&KeywordClassifier, data)
}

pub fn calculate_lei_with(classifier: &dyn DomainClassifier, data: &AssessmentData) -> LeiMetrics {
    let normalizer = ResponseNormalizer::five_point();
    let score = |keywords: &[&str]| normalizer.average(classifier.select(&data.responses, keywords));

    let dimensions = LeiDimensions {
        vision_strategy: score(VISION),
        communication: score(COMMUNICATION),
        decision_making: score(DECISION),
        team_development: score(TEAM),
        emotional_intelligence: score(EMOTIONAL),
        change_leadership: score(CHANGE),
    };
    let overall_score = LEI_WEIGHTS.composite(dimensions.values());
    tracing::debug!(assessment_id = %data.id.0, overall_score, "lei scored");

    let style_responses = classifier.select(&data.responses, STYLE);
    let leadership_style = if style_responses.is_empty() {
        LeadershipStyle::Adaptive
    } else {
        match normalizer.average(style_responses) {
            avg if avg >= 0.8 => LeadershipStyle::Transformational,
            avg if avg >= 0.6 => LeadershipStyle::Democratic,
            _ => LeadershipStyle::Transactional,
        }
    };

    let (development_areas, strengths) = if overall_score < DEVELOPMENT_THRESHOLD {
        (
            owned(&[
                "Enhanced strategic thinking and vision development",
                "Improved communication and interpersonal skills",
                "Stronger decision-making capabilities",
                "Advanced emotional intelligence development",
            ]),
            Vec::new(),
        )
    } else {
        (
            Vec::new(),
            owned(&[
                "Strong leadership presence and influence",
                "Effective team development and coaching",
                "Clear communication and vision articulation",
                "Adaptable leadership style for different situations",
            ]),
        )
    };

    LeiMetrics {
        overall_score,
        level: LEI_BANDS.classify(overall_score),
        dimensions,
        confidence: dispersion_confidence(&dimensions.values()),
        leadership_dimensions: leadership_dimensions(&dimensions),
        leadership_style,
        successor_readiness: score(SUCCESSION),
        development_areas,
        strengths,
    }
}

fn leadership_dimensions(dimensions: &LeiDimensions) -> Vec<LeadershipDimension> {
    let entry = |name: &str,
                 description: &str,
                 score: f64,
                 behaviors: &[&str],
                 actions: &[&str]| LeadershipDimension {
        name: name.to_string(),
        description: description.to_string(),
        score,
        level: LEI_BANDS.classify(score),
        key_behaviors: owned(behaviors),
        development_actions: owned(actions),
    };

    vec![
        entry(
            "Vision & Strategy",
            "Ability to create and communicate compelling vision and strategic direction",
            dimensions.vision_strategy,
            &["Strategic thinking", "Vision articulation", "Future orientation"],
            &["Strategic planning workshops", "Vision communication training"],
        ),
        entry(
            "Communication",
            "Effectiveness in verbal, written, and interpersonal communication",
            dimensions.communication,
            &["Active listening", "Clear messaging", "Feedback delivery"],
            &["Communication skills training", "Public speaking practice"],
        ),
        entry(
            "Decision Making",
            "Quality and timeliness of decisions under various conditions",
            dimensions.decision_making,
            &["Analytical thinking", "Risk assessment", "Decisive action"],
            &["Decision-making frameworks", "Case study analysis"],
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
        assert!(LEI_WEIGHTS.validate().is_ok());
        assert!(LEI_BANDS.is_strictly_increasing());
    }

    #[test]
    fn style_defaults_to_adaptive_without_style_questions() {
        let metrics = calculate_lei(&AssessmentData::default());
        assert_eq!(metrics.leadership_style, LeadershipStyle::Adaptive);
        assert_eq!(metrics.level, LeiLevel::Developing);
        assert_eq!(metrics.development_areas.len(), 4);
        assert_eq!(metrics.leadership_dimensions.len(), 3);
    }

    #[test]
    fn style_follows_style_question_average() {
        let transformational = calculate_lei(&AssessmentData::new(
            "a-1",
            vec![numeric("q1", "Describe the leadership style", 4.5)],
        ));
        assert_eq!(
            transformational.leadership_style,
            LeadershipStyle::Transformational
        );

        let democratic = calculate_lei(&AssessmentData::new(
            "a-2",
            vec![numeric("q1", "Our management style is open", 3.0)],
        ));
        assert_eq!(democratic.leadership_style, LeadershipStyle::Democratic);

        let transactional = calculate_lei(&AssessmentData::new(
            "a-3",
            vec![numeric("q1", "Preferred approach", 2.0)],
        ));
        assert_eq!(transactional.leadership_style, LeadershipStyle::Transactional);
    }

    #[test]
    fn strong_leadership_reports_strengths() {
        let responses = vec![
            numeric("q1", "Vision and strategy are clear", 5.0),
            numeric("q2", "Communication and feedback", 5.0),
            numeric("q3", "Decision quality", 5.0),
            numeric("q4", "Team coaching", 5.0),
            numeric("q5", "Empathy", 4.0),
            numeric("q6", "Change leadership", 4.0),
        ];
        let metrics = calculate_lei(&AssessmentData::new("a-4", responses));
        assert!(metrics.overall_score > 0.85);
        assert_eq!(metrics.level, LeiLevel::Exemplary);
        assert!(metrics.development_areas.is_empty());
        assert_eq!(metrics.strengths.len(), 4);
        assert_eq!(metrics.leadership_dimensions[0].level, LeiLevel::Exemplary);
    }
}
