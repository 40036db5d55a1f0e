use serde::Serialize;

use super::domain::{AssessmentData, ResponseValue};

/// Outcome of pre-scoring checks. Data-quality problems are reported as warnings;
/// scoring still runs with neutral defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub data_quality: f64,
}

const EXPECTED_MIN: f64 = 1.0;
const EXPECTED_MAX: f64 = 5.0;
const LOW_QUALITY_WARNING: f64 = 0.7;
const MIN_ACCEPTABLE_QUALITY: f64 = 0.5;

pub fn validate_assessment(data: &AssessmentData) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if data.responses.is_empty() {
        errors.push("Assessment contains no responses".to_string());
    }
    if data
        .organization_id
        .as_deref()
        .map_or(true, |id| id.trim().is_empty())
    {
        warnings.push("Organization ID is missing".to_string());
    }
    if data.submitted_at.is_none() {
        warnings.push("Assessment timestamp is missing".to_string());
    }

    let mut valid = 0usize;
    for (index, response) in data.responses.iter().enumerate() {
        if response.question_id.trim().is_empty() || response.value.is_missing() {
            warnings.push(format!(
                "Invalid response at index {index}: missing question or value"
            ));
            continue;
        }
        if let ResponseValue::Numeric(value) = response.value {
            if !(EXPECTED_MIN..=EXPECTED_MAX).contains(&value) {
                warnings.push(format!(
                    "Response value out of expected range (1-5): {value}"
                ));
            }
        }
        valid += 1;
    }

    let data_quality = if data.responses.is_empty() {
        0.0
    } else {
        valid as f64 / data.responses.len() as f64
    };

    if !data.responses.is_empty() && data_quality < LOW_QUALITY_WARNING {
        warnings.push(format!(
            "Low data quality: {:.1}% valid responses",
            data_quality * 100.0
        ));
    }

    if !warnings.is_empty() {
        tracing::warn!(
            assessment_id = %data.id.0,
            warnings = warnings.len(),
            "assessment has data quality warnings"
        );
    }

    ValidationReport {
        is_valid: errors.is_empty() && data_quality >= MIN_ACCEPTABLE_QUALITY,
        errors,
        warnings,
        data_quality,
    }
}
