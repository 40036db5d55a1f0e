use serde::Serialize;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// A domain score paired with its weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weighted {
    pub value: f64,
    pub weight: f64,
}

impl Weighted {
    pub const fn new(value: f64, weight: f64) -> Self {
        Self { value, weight }
    }
}

/// `Σ(value·weight) / Σweight`, or 0 when the weights sum to zero.
pub fn aggregate(scores: &[Weighted]) -> f64 {
    let total_weight: f64 = scores.iter().map(|entry| entry.weight).sum();
    if total_weight == 0.0 {
        return 0.0;
    }
    scores
        .iter()
        .map(|entry| entry.value * entry.weight)
        .sum::<f64>()
        / total_weight
}

/// Slice-based variant for callers holding parallel arrays.
pub fn weighted_score(values: &[f64], weights: &[f64]) -> Result<f64, WeightTableError> {
    if values.len() != weights.len() {
        return Err(WeightTableError::LengthMismatch {
            values: values.len(),
            weights: weights.len(),
        });
    }
    let pairs: Vec<Weighted> = values
        .iter()
        .zip(weights)
        .map(|(value, weight)| Weighted::new(*value, *weight))
        .collect();
    Ok(aggregate(&pairs))
}

/// Linear rescale of `value` from `[min, max]` into [0,1]; a degenerate range yields 0.5.
pub fn normalize_score(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 0.5;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

/// Misconfigured weight tables or weighted-average inputs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightTableError {
    #[error("weight table `{table}` sums to {sum}, expected 1.0")]
    InvalidSum { table: &'static str, sum: f64 },
    #[error("weight table `{table}` has a negative weight for `{domain}`")]
    NegativeWeight {
        table: &'static str,
        domain: &'static str,
    },
    #[error("{values} values supplied for {weights} weights")]
    LengthMismatch { values: usize, weights: usize },
}

/// Fixed per-algorithm domain weights. The array length ties each table to the
/// number of domain scores it combines.
#[derive(Debug, Clone, Copy)]
pub struct WeightTable<const N: usize> {
    name: &'static str,
    entries: [(&'static str, f64); N],
}

impl<const N: usize> WeightTable<N> {
    pub const fn new(name: &'static str, entries: [(&'static str, f64); N]) -> Self {
        Self { name, entries }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn entries(&self) -> &[(&'static str, f64); N] {
        &self.entries
    }

    pub fn weight(&self, domain: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| *name == domain)
            .map(|(_, weight)| *weight)
    }

    pub fn validate(&self) -> Result<(), WeightTableError> {
        if let Some((domain, _)) = self.entries.iter().find(|(_, weight)| *weight < 0.0) {
            return Err(WeightTableError::NegativeWeight {
                table: self.name,
                domain: *domain,
            });
        }
        let sum: f64 = self.entries.iter().map(|(_, weight)| weight).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(WeightTableError::InvalidSum {
                table: self.name,
                sum,
            });
        }
        Ok(())
    }

    /// Weighted composite of `values`, given in table order.
    pub fn composite(&self, values: [f64; N]) -> f64 {
        debug_assert!(self.validate().is_ok(), "invalid weight table {}", self.name);
        let pairs: Vec<Weighted> = values
            .iter()
            .zip(self.entries.iter())
            .map(|(value, (_, weight))| Weighted::new(*value, *weight))
            .collect();
        aggregate(&pairs).clamp(0.0, 1.0)
    }
}

/// Midpoint percentile rank of `score` within `distribution`, 50 when empty.
pub fn percentile_rank(score: f64, distribution: &[f64]) -> f64 {
    if distribution.is_empty() {
        return 50.0;
    }
    let below = distribution.iter().filter(|value| **value < score).count() as f64;
    let equal = distribution.iter().filter(|value| **value == score).count() as f64;
    ((below + equal / 2.0) / distribution.len() as f64 * 100.0).clamp(0.0, 100.0)
}

/// Summary statistics over a set of scores.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScoreMetrics {
    pub score: f64,
    pub confidence: f64,
    pub percentile: f64,
    pub variance: f64,
    pub reliability: f64,
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Population variance.
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    values.iter().map(|value| (value - avg).powi(2)).sum::<f64>() / values.len() as f64
}

/// Score, dispersion-based confidence, and reliability for a set of values. The score is
/// weighted when `weights` is supplied with a matching length.
pub fn aggregate_metrics(values: &[f64], weights: Option<&[f64]>) -> ScoreMetrics {
    if values.is_empty() {
        return ScoreMetrics::default();
    }

    let score = match weights {
        Some(weights) => weighted_score(values, weights).unwrap_or_else(|_| mean(values)),
        None => mean(values),
    };
    let avg = mean(values);
    let variance = variance(values);
    let std_dev = variance.sqrt();

    ScoreMetrics {
        score,
        confidence: (1.0 - std_dev / avg.max(0.1)).max(0.0),
        percentile: 50.0,
        variance,
        reliability: (1.0 - std_dev / (avg + 0.1)).clamp(0.0, 1.0),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    pub confidence_level: f64,
}

/// Interval around `score`, with bounds clamped into [0,1].
pub fn confidence_interval(
    score: f64,
    sample_size: usize,
    standard_error: f64,
    confidence_level: f64,
) -> ConfidenceInterval {
    let z = if (confidence_level - 0.90).abs() < 1e-9 {
        1.645
    } else if (confidence_level - 0.99).abs() < 1e-9 {
        2.576
    } else {
        1.96
    };
    let margin = if sample_size == 0 {
        0.0
    } else {
        z * standard_error / (sample_size as f64).sqrt()
    };

    ConfidenceInterval {
        lower: (score - margin).max(0.0),
        upper: (score + margin).min(1.0),
        confidence_level,
    }
}

/// Pearson correlation; 0 for mismatched, empty, or constant inputs.
pub fn correlation(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let n = a.len() as f64;
    let sum_a: f64 = a.iter().sum();
    let sum_b: f64 = b.iter().sum();
    let sum_ab: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let sum_a2: f64 = a.iter().map(|x| x * x).sum();
    let sum_b2: f64 = b.iter().map(|y| y * y).sum();

    let numerator = n * sum_ab - sum_a * sum_b;
    let denominator = ((n * sum_a2 - sum_a * sum_a) * (n * sum_b2 - sum_b * sum_b)).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        0.0
    } else {
        numerator / denominator
    }
}
