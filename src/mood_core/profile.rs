//! Per-text emotion profile combining lexicon and contextual scores

use super::contextual::SentimentResult;
use super::emotion::{Emotion, EmotionLabel, EmotionVector, Valence};
use super::lexicon::LexiconScore;
use serde::{Deserialize, Serialize};

/// Share of the lexicon balance in the combined score
pub const LEXICON_WEIGHT: f64 = 0.6;
/// Share of the contextual score in the combined score
pub const CONTEXTUAL_WEIGHT: f64 = 0.4;
/// Contextual intensity above which the primary emotion may be overridden
pub const OVERRIDE_INTENSITY: f64 = 0.7;

const POSITIVE_GROUP: [Emotion; 3] = [Emotion::Joy, Emotion::Trust, Emotion::Anticipation];
const NEGATIVE_GROUP: [Emotion; 3] = [Emotion::Anger, Emotion::Fear, Emotion::Sadness];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionProfile {
    pub primary: EmotionLabel,
    pub secondary: EmotionLabel,
    /// Contextual intensity, in [0, 1]
    pub intensity: f64,
    pub valence: Valence,
    /// `min(emotion_density * 2, 1)`
    pub confidence: f64,
    /// Combined sentiment score, in [-1, 1]
    pub sentiment_score: f64,
    /// Source emotion counts from the lexicon scorer
    pub emotions: EmotionVector,
}

pub struct ProfileCombiner;

impl ProfileCombiner {
    pub fn new() -> Self {
        Self
    }

    pub fn combine(&self, lexicon: &LexiconScore, contextual: &SentimentResult) -> EmotionProfile {
        let sentiment_score = (lexicon.sentiment_balance * LEXICON_WEIGHT
            + contextual.score * CONTEXTUAL_WEIGHT)
            .clamp(-1.0, 1.0);

        let first = EmotionLabel::from(lexicon.dominant_emotions.first().copied());
        let secondary = EmotionLabel::from(lexicon.dominant_emotions.get(1).copied());
        let primary = override_primary(first, contextual.intensity, sentiment_score);

        EmotionProfile {
            primary,
            secondary,
            intensity: contextual.intensity.clamp(0.0, 1.0),
            valence: Valence::from_score(sentiment_score),
            confidence: (lexicon.emotion_density * 2.0).min(1.0),
            sentiment_score,
            emotions: lexicon.emotions,
        }
    }
}

impl Default for ProfileCombiner {
    fn default() -> Self {
        Self::new()
    }
}

/// High-intensity texts whose primary emotion sits in the wrong valence group
/// are pulled to joy (positive) or anger (negative). Other mismatches are
/// left as they are.
fn override_primary(primary: EmotionLabel, intensity: f64, score: f64) -> EmotionLabel {
    if intensity <= OVERRIDE_INTENSITY {
        return primary;
    }

    let in_group = |group: &[Emotion]| primary.emotion().is_some_and(|e| group.contains(&e));

    if score > 0.0 && !in_group(&POSITIVE_GROUP) {
        EmotionLabel::Joy
    } else if score < 0.0 && !in_group(&NEGATIVE_GROUP) {
        EmotionLabel::Anger
    } else {
        primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood_core::contextual::SentimentCategory;

    fn create_test_lexicon(dominant: Vec<Emotion>, balance: f64, density: f64) -> LexiconScore {
        LexiconScore {
            emotions: EmotionVector::new(),
            emotion_frequencies: EmotionVector::new(),
            dominant_emotions: dominant,
            sentiment_balance: balance,
            emotion_density: density,
            positive_count: 0,
            negative_count: 0,
            emotion_word_tally: 0.0,
            total_tokens: 1,
        }
    }

    fn create_test_sentiment(score: f64) -> SentimentResult {
        SentimentResult {
            score,
            category: SentimentCategory::from_score(score),
            intensity: score.abs(),
            word_count: 1,
        }
    }

    #[test]
    fn test_combined_score_weights() {
        let lexicon = create_test_lexicon(vec![Emotion::Joy], 1.0, 0.25);
        let profile = ProfileCombiner::new().combine(&lexicon, &create_test_sentiment(0.5));

        assert!((profile.sentiment_score - 0.8).abs() < 1e-12);
        assert_eq!(profile.valence, Valence::Positive);
        assert_eq!(profile.primary, EmotionLabel::Joy);
        assert_eq!(profile.secondary, EmotionLabel::Neutral);
        assert_eq!(profile.confidence, 0.5);
    }

    #[test]
    fn test_no_matches_is_neutral() {
        let lexicon = create_test_lexicon(vec![], 0.0, 0.0);
        let profile = ProfileCombiner::new().combine(&lexicon, &SentimentResult::neutral());

        assert_eq!(profile.primary, EmotionLabel::Neutral);
        assert_eq!(profile.secondary, EmotionLabel::Neutral);
        assert_eq!(profile.valence, Valence::Neutral);
        assert_eq!(profile.sentiment_score, 0.0);
        assert_eq!(profile.confidence, 0.0);
    }

    #[test]
    fn test_positive_override_to_joy() {
        let lexicon = create_test_lexicon(vec![Emotion::Surprise, Emotion::Fear], 1.0, 0.5);
        let profile = ProfileCombiner::new().combine(&lexicon, &create_test_sentiment(0.9));

        assert_eq!(profile.primary, EmotionLabel::Joy);
        assert_eq!(profile.secondary, EmotionLabel::Fear, "secondary is never overridden");
    }

    #[test]
    fn test_negative_override_to_anger() {
        let lexicon = create_test_lexicon(vec![Emotion::Disgust], -1.0, 0.5);
        let profile = ProfileCombiner::new().combine(&lexicon, &create_test_sentiment(-0.8));

        assert_eq!(profile.primary, EmotionLabel::Anger);
    }

    #[test]
    fn test_no_override_below_intensity_threshold() {
        let lexicon = create_test_lexicon(vec![Emotion::Disgust], -1.0, 0.5);
        let profile = ProfileCombiner::new().combine(&lexicon, &create_test_sentiment(-0.7));

        assert_eq!(profile.primary, EmotionLabel::Disgust);
    }

    #[test]
    fn test_matching_group_is_kept() {
        let lexicon = create_test_lexicon(vec![Emotion::Trust], 1.0, 0.5);
        let profile = ProfileCombiner::new().combine(&lexicon, &create_test_sentiment(0.9));
        assert_eq!(profile.primary, EmotionLabel::Trust);

        let lexicon = create_test_lexicon(vec![Emotion::Sadness], -1.0, 0.5);
        let profile = ProfileCombiner::new().combine(&lexicon, &create_test_sentiment(-0.9));
        assert_eq!(profile.primary, EmotionLabel::Sadness);
    }

    #[test]
    fn test_confidence_capped_at_one() {
        let lexicon = create_test_lexicon(vec![Emotion::Joy], 1.0, 0.9);
        let profile = ProfileCombiner::new().combine(&lexicon, &create_test_sentiment(0.5));
        assert_eq!(profile.confidence, 1.0);
    }
}
