use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::aibs::{calculate_aibs_with, AibsMetrics};
use super::aics::{calculate_aics_with, AicsMetrics};
use super::aims::{calculate_aims_with, AimsMetrics};
use super::aips::{calculate_aips_with, AipsMetrics};
use super::airix::{calculate_airix, AirixMetrics};
use super::airs::{calculate_airs_with, AirsMetrics};
use super::crf::{calculate_crf_with, CrfMetrics};
use super::dsch::{calculate_dsch_with, DschMetrics};
use super::hoci::{calculate_hoci_with, HociMetrics};
use super::lei::{calculate_lei_with, LeiMetrics};
use super::oci::{calculate_oci_with, OciMetrics};
use crate::assessment::{AssessmentData, DomainClassifier, KeywordClassifier, OrganizationMetrics};

pub const SUITE_VERSION: &str = "2.1.0";

/// Combined output of one suite run. The AI modules are present only when requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnterpriseMetrics {
    pub dsch: DschMetrics,
    pub crf: CrfMetrics,
    pub lei: LeiMetrics,
    pub oci: OciMetrics,
    pub hoci: HociMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airix: Option<AirixMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airs: Option<AirsMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_strategy: Option<AiStrategyMetrics>,
    pub version: &'static str,
    pub calculated_at: DateTime<Utc>,
}

/// Strategy, culture, mission and prioritization scores from the AI modules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AiStrategyMetrics {
    pub aibs: AibsMetrics,
    pub aics: AicsMetrics,
    pub aims: AimsMetrics,
    pub aips: AipsMetrics,
}

/// Runs every module over the same assessment. Modules share no state, so the suite only
/// holds the classifier used for keyword-selected domains. AIRIX always groups answers by
/// their declared domain and ignores the injected classifier.
#[derive(Clone)]
pub struct AlgorithmSuite {
    classifier: Arc<dyn DomainClassifier>,
    include_ai: bool,
}

impl Default for AlgorithmSuite {
    fn default() -> Self {
        Self::new(Arc::new(KeywordClassifier))
    }
}

impl AlgorithmSuite {
    pub fn new(classifier: Arc<dyn DomainClassifier>) -> Self {
        Self {
            classifier,
            include_ai: false,
        }
    }

    /// Also run the AI modules: AIRIX, AIRS, AIBS, AICS, AIMS and AIPS.
    pub fn with_ai_modules(mut self, include_ai: bool) -> Self {
        self.include_ai = include_ai;
        self
    }

    pub fn calculate(
        &self,
        data: &AssessmentData,
        metrics: &OrganizationMetrics,
    ) -> EnterpriseMetrics {
        let classifier = self.classifier.as_ref();
        let (airix, airs, ai_strategy) = if self.include_ai {
            let strategy = AiStrategyMetrics {
                aibs: calculate_aibs_with(classifier, data, metrics),
                aics: calculate_aics_with(classifier, data, metrics),
                aims: calculate_aims_with(classifier, data, metrics),
                aips: calculate_aips_with(classifier, data, metrics),
            };
            (
                Some(calculate_airix(data, metrics)),
                Some(calculate_airs_with(classifier, data, metrics)),
                Some(strategy),
            )
        } else {
            (None, None, None)
        };

        let result = EnterpriseMetrics {
            dsch: calculate_dsch_with(classifier, data),
            crf: calculate_crf_with(classifier, data),
            lei: calculate_lei_with(classifier, data),
            oci: calculate_oci_with(classifier, data),
            hoci: calculate_hoci_with(classifier, data),
            airix,
            airs,
            ai_strategy,
            version: SUITE_VERSION,
            calculated_at: Utc::now(),
        };
        tracing::info!(
            assessment_id = %data.id.0,
            responses = data.responses.len(),
            include_ai = self.include_ai,
            "enterprise metrics calculated"
        );
        result
    }
}

/// Suite run with the default keyword classifier and without the AI modules.
pub fn calculate_enterprise_metrics(
    data: &AssessmentData,
    metrics: &OrganizationMetrics,
) -> EnterpriseMetrics {
    AlgorithmSuite::default().calculate(data, metrics)
}
