//! Confidence in a verdict, independent of the verdict's likelihood score.
//!
//! The likelihood score answers "is this AI-generated?". Confidence answers
//! "how far should a consumer trust that answer?", from how extreme the score
//! is and how much evidence stood behind it.

use serde::{Deserialize, Serialize};

/// Kind of content the likelihood score was computed for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Text,
    Image,
    Video,
    File,
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Image => write!(f, "image"),
            Self::Video => write!(f, "video"),
            Self::File => write!(f, "file"),
        }
    }
}

/// Auxiliary evidence about a likelihood score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    /// Per-unit scores (video frames, document pages)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signals: Vec<f64>,
    /// The detector had no real signal
    #[serde(default)]
    pub degraded: bool,
}

impl ConfidenceDetails {
    pub fn with_word_count(mut self, count: usize) -> Self {
        self.word_count = Some(count);
        self
    }

    pub fn with_signals(mut self, signals: Vec<f64>) -> Self {
        self.signals = signals;
        self
    }

    pub fn with_degraded(mut self, degraded: bool) -> Self {
        self.degraded = degraded;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInput {
    /// Likelihood score, 0-100
    pub score: f64,
    pub source_type: SourceType,
    #[serde(default)]
    pub details: ConfidenceDetails,
}

impl ConfidenceInput {
    pub fn new(score: f64, source_type: SourceType, details: ConfidenceDetails) -> Self {
        Self {
            score,
            source_type,
            details,
        }
    }
}

const DEGRADED_CONFIDENCE: u8 = 10;
const BASELINE: i32 = 50;

const EXTREME_HIGH: f64 = 90.0;
const EXTREME_LOW: f64 = 10.0;
const EXTREMITY_BONUS: i32 = 30;
const UNCERTAIN_BAND: (f64, f64) = (40.0, 60.0);
const UNCERTAINTY_PENALTY: i32 = 20;

const LONG_TEXT_WORDS: usize = 150;
const SHORT_TEXT_WORDS: usize = 30;
const LENGTH_ADJUSTMENT: i32 = 15;

const SIGNAL_HIGH: f64 = 70.0;
const SIGNAL_LOW: f64 = 30.0;
const CONSISTENCY_BONUS: i32 = 20;
const DISAGREEMENT_PENALTY: i32 = 25;

/// Confidence in `[1, 100]` for a likelihood verdict.
///
/// Degraded input is pinned at 10. Otherwise a baseline of 50 moves with
/// score extremity, then with text length (text) or per-unit signal
/// agreement (video, file).
pub fn calculate_confidence(input: &ConfidenceInput) -> u8 {
    let details = &input.details;
    if details.degraded {
        return DEGRADED_CONFIDENCE;
    }

    let mut confidence = BASELINE;
    let score = input.score;

    if score > EXTREME_HIGH || score < EXTREME_LOW {
        confidence += EXTREMITY_BONUS;
    } else if (UNCERTAIN_BAND.0..=UNCERTAIN_BAND.1).contains(&score) {
        confidence -= UNCERTAINTY_PENALTY;
    }

    match input.source_type {
        SourceType::Text => {
            let words = details.word_count.unwrap_or(0);
            if words > LONG_TEXT_WORDS {
                confidence += LENGTH_ADJUSTMENT;
            } else if words < SHORT_TEXT_WORDS {
                confidence -= LENGTH_ADJUSTMENT;
            }
        }
        SourceType::Video | SourceType::File if details.signals.len() >= 2 => {
            let signals = &details.signals;
            let consistent = signals.iter().all(|&s| s > SIGNAL_HIGH)
                || signals.iter().all(|&s| s < SIGNAL_LOW);
            if consistent {
                confidence += CONSISTENCY_BONUS;
            } else {
                confidence -= DISAGREEMENT_PENALTY;
            }
        }
        _ => {}
    }

    confidence.clamp(1, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn text(score: f64, words: usize) -> ConfidenceInput {
        ConfidenceInput::new(
            score,
            SourceType::Text,
            ConfidenceDetails::default().with_word_count(words),
        )
    }

    fn signals(source_type: SourceType, score: f64, signals: Vec<f64>) -> ConfidenceInput {
        ConfidenceInput::new(
            score,
            source_type,
            ConfidenceDetails::default().with_signals(signals),
        )
    }

    #[test]
    fn test_long_extreme_text() {
        assert_eq!(calculate_confidence(&text(95.0, 200)), 95);
    }

    #[test]
    fn test_short_uncertain_text() {
        assert_eq!(calculate_confidence(&text(50.0, 10)), 15);
    }

    #[test]
    fn test_consistent_video_clamps() {
        let input = signals(SourceType::Video, 92.0, vec![90.0, 95.0, 92.0]);
        assert_eq!(calculate_confidence(&input), 100);
    }

    #[test]
    fn test_conflicting_video() {
        let input = signals(SourceType::Video, 55.0, vec![95.0, 15.0]);
        assert_eq!(calculate_confidence(&input), 5);
    }

    #[test]
    fn test_file_consistently_low() {
        let input = signals(SourceType::File, 5.0, vec![10.0, 20.0, 5.0]);
        assert_eq!(calculate_confidence(&input), 100);
    }

    #[test]
    fn test_single_signal_unadjusted() {
        let input = signals(SourceType::Video, 75.0, vec![75.0]);
        assert_eq!(calculate_confidence(&input), 50);
    }

    #[test]
    fn test_image_uses_extremity_only() {
        let input = ConfidenceInput::new(97.0, SourceType::Image, ConfidenceDetails::default());
        assert_eq!(calculate_confidence(&input), 80);
    }

    #[test]
    fn test_band_edges() {
        // 40 and 60 are inside the uncertainty band; 10 and 90 are not extreme.
        assert_eq!(calculate_confidence(&text(40.0, 100)), 30);
        assert_eq!(calculate_confidence(&text(60.0, 100)), 30);
        assert_eq!(calculate_confidence(&text(90.0, 100)), 50);
        assert_eq!(calculate_confidence(&text(10.0, 100)), 50);
    }

    #[test]
    fn test_source_type_serde() {
        assert_eq!(serde_json::to_string(&SourceType::Video).unwrap(), "\"video\"");
        let parsed: SourceType = serde_json::from_str("\"file\"").unwrap();
        assert_eq!(parsed, SourceType::File);
    }

    proptest! {
        #[test]
        fn degraded_is_always_ten(score in 0.0f64..=100.0, words in 0usize..1000) {
            let mut input = text(score, words);
            input.details.degraded = true;
            prop_assert_eq!(calculate_confidence(&input), 10);
        }

        #[test]
        fn confidence_in_range(
            score in 0.0f64..=100.0,
            words in proptest::option::of(0usize..1000),
            sigs in proptest::collection::vec(0.0f64..=100.0, 0..6),
            kind in 0u8..4,
        ) {
            let source_type = match kind {
                0 => SourceType::Text,
                1 => SourceType::Image,
                2 => SourceType::Video,
                _ => SourceType::File,
            };
            let details = ConfidenceDetails { word_count: words, signals: sigs, degraded: false };
            let c = calculate_confidence(&ConfidenceInput::new(score, source_type, details));
            prop_assert!((1..=100).contains(&c));
        }
    }
}
