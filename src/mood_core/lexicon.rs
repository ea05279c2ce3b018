//! Lexicon scoring: emotion-category counts and coarse sentiment balance

use super::emotion::{Emotion, EmotionVector, Valence};
use super::tables::{emoji_emotions, lexicon_entry};
use serde::{Deserialize, Serialize};

/// Weight of an emoji hit relative to a lexicon word
pub const EMOJI_WEIGHT: f64 = 0.5;

/// Number of dominant emotions reported per text
pub const TEXT_DOMINANT_LIMIT: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconScore {
    /// Raw category counts (lexicon words 1.0, emoji 0.5)
    pub emotions: EmotionVector,
    /// `emotions / total_tokens`
    pub emotion_frequencies: EmotionVector,
    /// Up to two categories with frequency > 0
    pub dominant_emotions: Vec<Emotion>,
    /// (positive - negative) / emotion-word tally, in [-1, 1]
    pub sentiment_balance: f64,
    /// Emotion-word tally / total tokens
    pub emotion_density: f64,
    pub positive_count: u32,
    pub negative_count: u32,
    pub emotion_word_tally: f64,
    pub total_tokens: usize,
}

pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score<S: AsRef<str>>(&self, tokens: &[S]) -> LexiconScore {
        let mut emotions = EmotionVector::new();
        let mut positive_count = 0u32;
        let mut negative_count = 0u32;
        let mut tally = 0.0;

        for token in tokens {
            let raw = token.as_ref();
            let key = lookup_key(raw);

            if let Some(entry) = lexicon_entry(&key) {
                tally += 1.0;
                for &emotion in entry.emotions {
                    emotions.add(emotion, 1.0);
                }
                match entry.sentiment {
                    Valence::Positive => positive_count += 1,
                    Valence::Negative => negative_count += 1,
                    Valence::Neutral => {}
                }
            }

            if let Some(categories) = emoji_emotions(raw) {
                tally += EMOJI_WEIGHT;
                for &emotion in categories {
                    emotions.add(emotion, EMOJI_WEIGHT);
                }
            }
        }

        let total_tokens = tokens.len();
        let denominator = total_tokens.max(1) as f64;
        let emotion_frequencies = emotions.scaled(1.0 / denominator);
        let dominant_emotions = emotion_frequencies.dominant(TEXT_DOMINANT_LIMIT);

        let sentiment_balance = if tally > 0.0 {
            ((positive_count as f64 - negative_count as f64) / tally).clamp(-1.0, 1.0)
        } else {
            0.0
        };

        LexiconScore {
            emotions,
            emotion_frequencies,
            dominant_emotions,
            sentiment_balance,
            emotion_density: tally / denominator,
            positive_count,
            negative_count,
            emotion_word_tally: tally,
            total_tokens,
        }
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Token with every non-word character stripped
pub(crate) fn lookup_key(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}
