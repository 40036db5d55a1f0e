use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const STRONG_MULTIPLIER: f64 = 1.2;
const WEAK_MULTIPLIER: f64 = 0.8;
const BENCHMARK_GAP: f64 = 0.1;
const RANKING_BAND: f64 = 0.05;

/// Threshold and benchmark driven observations over named metric scores.
pub fn generate_insights(
    scores: &BTreeMap<String, f64>,
    thresholds: &BTreeMap<String, f64>,
    benchmarks: &BTreeMap<String, f64>,
) -> Vec<String> {
    let mut insights = Vec::new();

    for (metric, score) in scores {
        if let Some(threshold) = thresholds.get(metric) {
            if *score >= threshold * STRONG_MULTIPLIER {
                insights.push(format!(
                    "Strong performance in {metric} ({:.1}%)",
                    score * 100.0
                ));
            } else if *score < threshold * WEAK_MULTIPLIER {
                insights.push(format!(
                    "Improvement opportunity in {metric} ({:.1}%)",
                    score * 100.0
                ));
            }
        }

        if let Some(benchmark) = benchmarks.get(metric) {
            let difference = score - benchmark;
            if difference.abs() > BENCHMARK_GAP {
                let direction = if difference > 0.0 { "above" } else { "below" };
                insights.push(format!(
                    "{metric} is {:.1}% {direction} industry benchmark",
                    difference.abs() * 100.0
                ));
            }
        }
    }

    insights
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkRanking {
    Above,
    At,
    Below,
}

impl BenchmarkRanking {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Above => "Above benchmark",
            Self::At => "At benchmark",
            Self::Below => "Below benchmark",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkComparison {
    pub gaps: BTreeMap<String, f64>,
    pub average_gap: f64,
    pub ranking: BenchmarkRanking,
    pub recommendations: Vec<String>,
}

/// Compare each benchmarked metric and rank the organization by the average gap.
pub fn benchmark_comparison(
    scores: &BTreeMap<String, f64>,
    benchmarks: &BTreeMap<String, f64>,
) -> BenchmarkComparison {
    let gaps: BTreeMap<String, f64> = scores
        .iter()
        .filter_map(|(metric, score)| {
            benchmarks
                .get(metric)
                .map(|benchmark| (metric.clone(), score - benchmark))
        })
        .collect();

    let average_gap = if gaps.is_empty() {
        0.0
    } else {
        gaps.values().sum::<f64>() / gaps.len() as f64
    };

    let ranking = if average_gap > RANKING_BAND {
        BenchmarkRanking::Above
    } else if average_gap < -RANKING_BAND {
        BenchmarkRanking::Below
    } else {
        BenchmarkRanking::At
    };

    let mut recommendations: Vec<String> = gaps
        .iter()
        .filter_map(|(metric, gap)| {
            if *gap < -BENCHMARK_GAP {
                Some(format!(
                    "Focus on improving {metric} - significant gap below benchmark"
                ))
            } else if *gap > BENCHMARK_GAP {
                Some(format!(
                    "Leverage strength in {metric} - significantly above benchmark"
                ))
            } else {
                None
            }
        })
        .collect();

    if recommendations.is_empty() {
        recommendations
            .push("Performance is generally aligned with industry benchmarks".to_string());
    }

    BenchmarkComparison {
        gaps,
        average_gap,
        ranking,
        recommendations,
    }
}
