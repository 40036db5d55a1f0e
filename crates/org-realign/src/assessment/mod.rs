//! Survey response model and the shared scoring primitives: normalization, domain
//! selection, weighted aggregation, banding, validation, and insight generation.

pub mod aggregator;
pub mod banding;
pub mod classifier;
pub mod domain;
pub mod insights;
pub mod normalizer;
pub mod validation;

pub use aggregator::{
    aggregate, aggregate_metrics, confidence_interval, correlation, mean, normalize_score,
    percentile_rank, variance, weighted_score, ConfidenceInterval, ScoreMetrics, WeightTable,
    WeightTableError, Weighted,
};
pub use banding::Bands;
pub use classifier::{DomainClassifier, DomainFieldClassifier, KeywordClassifier, TagClassifier};
pub use domain::{
    AssessmentData, AssessmentId, AssessmentMetadata, AssessmentResponse, InstitutionType,
    OrganizationMetrics, QualitativeLevel, ResponseValue,
};
pub use insights::{benchmark_comparison, generate_insights, BenchmarkComparison, BenchmarkRanking};
pub use normalizer::{
    variance_of_numeric, ResponseNormalizer, ScoreScale, Vocabulary, NEUTRAL_SCORE,
};
pub use validation::{validate_assessment, ValidationReport};
