//! The scoring algorithms, the suite that runs them together, and the lightweight
//! span/culture runner. The five structural models always run; the AI modules (readiness,
//! risk, business strategy, cultural compatibility, mission alignment and implementation
//! priority) are opt-in.

use std::collections::BTreeMap;

use crate::assessment::{aggregate_metrics, WeightTableError};

pub mod aibs;
pub mod aics;
pub mod aims;
pub mod aips;
pub mod airix;
pub mod airs;
pub mod crf;
pub mod domain;
pub mod dsch;
pub mod hoci;
pub mod lei;
pub mod oci;
pub mod router;
pub mod runner;
pub mod suite;

pub use aibs::{calculate_aibs, calculate_aibs_with, AibsMetrics, StrategyLevel, AIBS_WEIGHTS};
pub use aics::{
    calculate_aics, calculate_aics_with, AicsMetrics, CompatibilityLevel, AICS_WEIGHTS,
};
pub use aims::{calculate_aims, calculate_aims_with, AimsMetrics, AlignmentLevel, AIMS_WEIGHTS};
pub use aips::{calculate_aips, calculate_aips_with, AipsMetrics, PriorityLevel, AIPS_WEIGHTS};
pub use airix::{calculate_airix, calculate_airix_with, AirixLevel, AirixMetrics, AIRIX_WEIGHTS};
pub use airs::{calculate_airs, calculate_airs_with, AirsMetrics, RiskLevel, AIRS_WEIGHTS};
pub use crf::{calculate_crf, calculate_crf_with, CrfLevel, CrfMetrics, CRF_WEIGHTS};
pub use domain::{
    Benchmark, Magnitude, Priority, Recommendation, RiskFactor, Severity, Timeframe,
};
pub use dsch::{calculate_dsch, calculate_dsch_with, DschLevel, DschMetrics, DSCH_WEIGHTS};
pub use hoci::{calculate_hoci, calculate_hoci_with, ComplexityLevel, HociMetrics, HOCI_WEIGHTS};
pub use lei::{calculate_lei, calculate_lei_with, LeiLevel, LeiMetrics, LEI_WEIGHTS};
pub use oci::{calculate_oci, calculate_oci_with, OciLevel, OciMetrics, OCI_WEIGHTS};
pub use router::assessment_router;
pub use runner::{run_algorithms, AlgorithmPayload, AlgorithmRun};
pub use suite::{
    calculate_enterprise_metrics, AiStrategyMetrics, AlgorithmSuite, EnterpriseMetrics,
};

/// Checks every built-in weight table; called once at startup so a bad edit fails loudly.
pub fn validate_weight_tables() -> Result<(), WeightTableError> {
    DSCH_WEIGHTS.validate()?;
    CRF_WEIGHTS.validate()?;
    LEI_WEIGHTS.validate()?;
    OCI_WEIGHTS.validate()?;
    HOCI_WEIGHTS.validate()?;
    AIRIX_WEIGHTS.validate()?;
    AIRS_WEIGHTS.validate()?;
    AIBS_WEIGHTS.validate()?;
    AICS_WEIGHTS.validate()?;
    AIMS_WEIGHTS.validate()?;
    AIPS_WEIGHTS.validate()
}

/// Blends a response-driven `base` with fixed institutional reference factors, each given
/// as `(value, weight)`.
pub(crate) fn anchored(base: f64, base_weight: f64, anchors: &[(f64, f64)]) -> f64 {
    anchors
        .iter()
        .fold(base * base_weight, |sum, (value, weight)| sum + value * weight)
}

/// Agreement between domain scores: 1 when they match, falling as they spread.
pub(crate) fn dispersion_confidence(values: &[f64]) -> f64 {
    aggregate_metrics(values, None).confidence.clamp(0.0, 1.0)
}

pub(crate) fn score_map(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_tables_are_valid() {
        assert_eq!(validate_weight_tables(), Ok(()));
    }

    #[test]
    fn anchors_blend_with_the_response_score() {
        assert!((anchored(0.5, 0.6, &[(0.7, 0.25), (0.6, 0.15)]) - 0.565).abs() < 1e-12);
        assert_eq!(anchored(1.0, 1.0, &[]), 1.0);
    }

    #[test]
    fn identical_domain_scores_are_fully_confident() {
        assert!((dispersion_confidence(&[0.6, 0.6, 0.6]) - 1.0).abs() < 1e-12);
        assert!(dispersion_confidence(&[0.0, 1.0]) < 0.5);
    }
}
