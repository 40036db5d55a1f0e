use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier wrapper for submitted assessments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

/// Five-point qualitative answer recognized from rating vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QualitativeLevel {
    VeryLow,
    Low,
    Neutral,
    High,
    VeryHigh,
}

impl QualitativeLevel {
    pub const fn score(self) -> f64 {
        match self {
            Self::VeryLow => 0.2,
            Self::Low => 0.4,
            Self::Neutral => 0.6,
            Self::High => 0.8,
            Self::VeryHigh => 1.0,
        }
    }

    /// Canonical Likert phrase, used when serializing.
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "strongly disagree",
            Self::Low => "disagree",
            Self::Neutral => "neutral",
            Self::High => "agree",
            Self::VeryHigh => "strongly agree",
        }
    }
}

/// The value recorded for one answer.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResponseValue {
    Numeric(f64),
    Qualitative(QualitativeLevel),
    Text(String),
    #[default]
    Missing,
}

impl ResponseValue {
    /// Wraps answer text verbatim; blank text counts as missing. Phrases are matched later
    /// by each scorer's own vocabulary, so "complex" and "agree" stay readable to both.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            Self::Missing
        } else {
            Self::Text(text)
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Self::Numeric(value) if value.is_finite() => Some(*value),
            _ => None,
        }
    }
}

impl Serialize for ResponseValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Numeric(value) => serializer.serialize_f64(*value),
            Self::Qualitative(level) => serializer.serialize_str(level.label()),
            Self::Text(text) => serializer.serialize_str(text),
            Self::Missing => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for ResponseValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ResponseValueVisitor)
    }
}

struct ResponseValueVisitor;

impl<'de> Visitor<'de> for ResponseValueVisitor {
    type Value = ResponseValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, a string, or null")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(ResponseValue::Numeric(value as f64))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(ResponseValue::Numeric(value as f64))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(ResponseValue::Numeric(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(ResponseValue::from_text(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(ResponseValue::from_text(value))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ResponseValue::Missing)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ResponseValue::Missing)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

/// One answer to one survey question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResponse {
    pub question_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub value: ResponseValue,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
}

impl AssessmentResponse {
    pub fn new(question_id: impl Into<String>, prompt: impl Into<String>, value: ResponseValue) -> Self {
        Self {
            question_id: question_id.into(),
            prompt: prompt.into(),
            value,
            ..Self::default()
        }
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// True when any tag equals `tag`, ignoring case.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate.eq_ignore_ascii_case(tag))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstitutionType {
    CommunityCollege,
    ResearchUniversity,
    LiberalArtsCollege,
    RegionalUniversity,
    #[serde(other)]
    Other,
}

impl InstitutionType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::CommunityCollege => "Community College",
            Self::ResearchUniversity => "Research University",
            Self::LiberalArtsCollege => "Liberal Arts College",
            Self::RegionalUniversity => "Regional University",
            Self::Other => "Other",
        }
    }
}

/// Descriptive context captured alongside the survey.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution_type: Option<InstitutionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_count: Option<u32>,
}

/// A submitted assessment: ordered responses plus descriptive metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentData {
    #[serde(default)]
    pub id: AssessmentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub responses: Vec<AssessmentResponse>,
    #[serde(default)]
    pub metadata: AssessmentMetadata,
}

impl AssessmentData {
    pub fn new(id: impl Into<String>, responses: Vec<AssessmentResponse>) -> Self {
        Self {
            id: AssessmentId(id.into()),
            responses,
            ..Self::default()
        }
    }
}

/// Numeric organizational context independent of the survey answers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hierarchy_levels: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_span_of_control: Option<f64>,
    /// Digital maturity on a 0-1 scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digital_maturity: Option<f64>,
    /// Innovation capacity on a 0-1 scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub innovation_capacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution_type: Option<InstitutionType>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_values_deserialize_by_shape() {
        let responses: Vec<AssessmentResponse> = serde_json::from_value(json!([
            { "question_id": "q1", "prompt": "Reporting lines are clear", "value": 4 },
            { "question_id": "q2", "prompt": "Teams collaborate", "value": "Strongly Agree" },
            { "question_id": "q3", "prompt": "Describe your culture", "value": "we ship fast" },
            { "question_id": "q4", "prompt": "Skipped", "value": null },
            { "question_id": "q6", "prompt": "Blank", "value": "  " },
            { "question_id": "q5", "prompt": "Absent" }
        ]))
        .expect("responses parse");

        assert_eq!(responses[0].value, ResponseValue::Numeric(4.0));
        assert_eq!(
            responses[1].value,
            ResponseValue::Text("Strongly Agree".to_string())
        );
        assert_eq!(
            responses[2].value,
            ResponseValue::Text("we ship fast".to_string())
        );
        assert!(responses[3].value.is_missing());
        assert!(responses[4].value.is_missing());
        assert!(responses[5].value.is_missing());
    }

    #[test]
    fn qualitative_values_serialize_as_phrases() {
        let response = AssessmentResponse::new(
            "q1",
            "Leadership is visible",
            ResponseValue::Qualitative(QualitativeLevel::Low),
        );
        let value = serde_json::to_value(&response).expect("serializes");
        assert_eq!(value["value"], json!("disagree"));
        assert!(value.get("tags").is_none());
    }

    #[test]
    fn unknown_institution_types_fall_back_to_other() {
        let metrics: OrganizationMetrics =
            serde_json::from_value(json!({ "institution_type": "bootcamp" })).expect("parses");
        assert_eq!(metrics.institution_type, Some(InstitutionType::Other));
    }
}
