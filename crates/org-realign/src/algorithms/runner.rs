//! Span-of-control and culture runner for the lightweight payload used by quick
//! organizational checks. Scores are on a 0-100 scale.

use serde::{Deserialize, Serialize};

use crate::assessment::mean;

/// Span of control that scores best.
const TARGET_SPAN: f64 = 8.0;
/// Layers beyond this depth are penalized.
const MAX_LAYERS: u32 = 4;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureInput {
    #[serde(default)]
    pub layers: u32,
    #[serde(default, alias = "span_by_mgr")]
    pub span_by_mgr: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CultureInput {
    #[serde(default)]
    pub adaptability: f64,
    #[serde(default)]
    pub cohesion: f64,
    #[serde(default)]
    pub innovation: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LicenseInput {
    #[serde(default)]
    pub leadership: f64,
    #[serde(default)]
    pub effectiveness: f64,
    #[serde(default)]
    pub impact: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AlgorithmPayload {
    #[serde(default)]
    pub structure: StructureInput,
    #[serde(default)]
    pub culture: CultureInput,
    #[serde(default)]
    pub licenses: LicenseInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpanScore {
    pub score: f64,
    pub ideal_span: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentScore {
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlgorithmRun {
    pub dsch: SpanScore,
    pub crf: PercentScore,
    pub lei: PercentScore,
}

pub fn run_algorithms(payload: &AlgorithmPayload) -> AlgorithmRun {
    let structure = &payload.structure;
    let spans: Vec<f64> = structure
        .span_by_mgr
        .iter()
        .copied()
        .filter(|span| span.is_finite())
        .collect();
    let average_span = mean(&spans);
    let excess_layers = structure.layers.saturating_sub(MAX_LAYERS) as f64;
    let dsch = SpanScore {
        score: (100.0 - 5.0 * (average_span - TARGET_SPAN).abs() - 10.0 * excess_layers)
            .clamp(20.0, 100.0),
        ideal_span: ((average_span + TARGET_SPAN) / 2.0).clamp(0.0, 20.0),
    };

    let culture = &payload.culture;
    let licenses = &payload.licenses;
    AlgorithmRun {
        dsch,
        crf: percent(&[culture.adaptability, culture.cohesion, culture.innovation]),
        lei: percent(&[licenses.leadership, licenses.effectiveness, licenses.impact]),
    }
}

fn percent(values: &[f64]) -> PercentScore {
    let average = mean(values);
    let score = if average.is_finite() {
        average.clamp(0.0, 1.0) * 100.0
    } else {
        0.0
    };
    PercentScore { score }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reference_payload_stays_in_bounds() {
        let payload: AlgorithmPayload = serde_json::from_value(json!({
            "structure": { "layers": 4, "spanByMgr": [6, 8, 5, 12, 4] },
            "culture": { "adaptability": 0.8, "cohesion": 0.7, "innovation": 0.9 },
            "licenses": { "leadership": 0.85, "effectiveness": 0.75, "impact": 0.8 }
        }))
        .expect("payload parses");

        let run = run_algorithms(&payload);
        assert!((run.dsch.score - 95.0).abs() < 1e-9);
        assert!((run.dsch.ideal_span - 7.5).abs() < 1e-9);
        assert!((run.crf.score - 80.0).abs() < 1e-9);
        assert!((run.lei.score - 80.0).abs() < 1e-9);
    }

    #[test]
    fn deep_wide_structures_bottom_out_at_twenty() {
        let payload = AlgorithmPayload {
            structure: StructureInput {
                layers: 12,
                span_by_mgr: vec![30.0, 40.0],
            },
            ..AlgorithmPayload::default()
        };
        let run = run_algorithms(&payload);
        assert_eq!(run.dsch.score, 20.0);
        assert_eq!(run.dsch.ideal_span, 20.0);
        assert_eq!(run.crf.score, 0.0);
    }

    #[test]
    fn missing_spans_count_as_zero() {
        let run = run_algorithms(&AlgorithmPayload::default());
        assert_eq!(run.dsch.score, 60.0);
        assert_eq!(run.dsch.ideal_span, 4.0);
    }
}
