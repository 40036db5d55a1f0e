use super::domain::{AssessmentResponse, QualitativeLevel, ResponseValue};

/// Score used when a domain has no usable responses or text is unrecognized.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Upper bound of the numeric answer scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreScale {
    FivePoint,
    FourPoint,
}

impl ScoreScale {
    pub const fn max(self) -> f64 {
        match self {
            Self::FivePoint => 5.0,
            Self::FourPoint => 4.0,
        }
    }
}

/// Ordered phrase table; the first phrase contained in the text wins, so longer phrases
/// that embed shorter ones ("strongly disagree" / "agree") must come first.
#[derive(Debug, Clone, Copy)]
pub struct Vocabulary {
    entries: &'static [(&'static str, QualitativeLevel)],
}

const LIKERT: &[(&str, QualitativeLevel)] = &[
    ("strongly disagree", QualitativeLevel::VeryLow),
    ("very poor", QualitativeLevel::VeryLow),
    ("disagree", QualitativeLevel::Low),
    ("poor", QualitativeLevel::Low),
    ("strongly agree", QualitativeLevel::VeryHigh),
    ("excellent", QualitativeLevel::VeryHigh),
    ("very good", QualitativeLevel::VeryHigh),
    ("agree", QualitativeLevel::High),
    ("good", QualitativeLevel::High),
    ("neutral", QualitativeLevel::Neutral),
    ("fair", QualitativeLevel::Neutral),
    ("average", QualitativeLevel::Neutral),
];

const COMPLEXITY: &[(&str, QualitativeLevel)] = &[
    ("very complex", QualitativeLevel::VeryHigh),
    ("extremely complex", QualitativeLevel::VeryHigh),
    ("very simple", QualitativeLevel::VeryLow),
    ("complex", QualitativeLevel::High),
    ("moderate", QualitativeLevel::Neutral),
    ("average", QualitativeLevel::Neutral),
    ("simple", QualitativeLevel::Low),
];

impl Vocabulary {
    pub const fn likert() -> Self {
        Self { entries: LIKERT }
    }

    /// Complexity ratings ("very complex" .. "very simple").
    pub const fn complexity() -> Self {
        Self {
            entries: COMPLEXITY,
        }
    }

    pub fn lookup(&self, text: &str) -> Option<QualitativeLevel> {
        let lowered = text.to_lowercase();
        self.entries
            .iter()
            .find(|(phrase, _)| lowered.contains(phrase))
            .map(|(_, level)| *level)
    }
}

/// Maps a single response onto [0,1].
#[derive(Debug, Clone, Copy)]
pub struct ResponseNormalizer {
    scale: ScoreScale,
    vocabulary: Vocabulary,
}

impl ResponseNormalizer {
    pub const fn new(scale: ScoreScale, vocabulary: Vocabulary) -> Self {
        Self { scale, vocabulary }
    }

    pub const fn five_point() -> Self {
        Self::new(ScoreScale::FivePoint, Vocabulary::likert())
    }

    pub const fn four_point() -> Self {
        Self::new(ScoreScale::FourPoint, Vocabulary::likert())
    }

    pub const fn scale(&self) -> ScoreScale {
        self.scale
    }

    /// `None` for missing answers; those are left out of averages entirely.
    pub fn score(&self, value: &ResponseValue) -> Option<f64> {
        match value {
            ResponseValue::Numeric(raw) if raw.is_finite() => {
                Some((raw / self.scale.max()).clamp(0.0, 1.0))
            }
            ResponseValue::Numeric(_) | ResponseValue::Missing => None,
            ResponseValue::Qualitative(level) => Some(level.score()),
            ResponseValue::Text(text) => Some(
                self.vocabulary
                    .lookup(text)
                    .map(QualitativeLevel::score)
                    .unwrap_or(NEUTRAL_SCORE),
            ),
        }
    }

    /// Mean normalized score over the answered responses, [`NEUTRAL_SCORE`] when none are.
    pub fn average<'a, I>(&self, responses: I) -> f64
    where
        I: IntoIterator<Item = &'a AssessmentResponse>,
    {
        let (sum, count) = responses
            .into_iter()
            .filter_map(|response| self.score(&response.value))
            .fold((0.0, 0usize), |(sum, count), score| (sum + score, count + 1));

        if count == 0 {
            NEUTRAL_SCORE
        } else {
            sum / count as f64
        }
    }
}

/// Population variance of numeric answers scaled by `scale_max`, `None` when no answer
/// is numeric.
pub fn variance_of_numeric(responses: &[AssessmentResponse], scale_max: f64) -> Option<f64> {
    let values: Vec<f64> = responses
        .iter()
        .filter_map(|response| response.value.as_numeric())
        .map(|value| value / scale_max)
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(super::aggregator::variance(&values))
    }
}
