//! Contextual sentiment scoring with negation/booster windows
//!
//! Each lexicon word or emoticon carries a base score. The nearest modifier in
//! the preceding window (negation or booster/damper) adjusts it, trailing `!`
//! and `?` intensify or soften it, and an all-caps post gets a flat boost.

use super::emotion::Valence;
use super::lexicon::lookup_key;
use super::normalizer::NormalizedText;
use super::tables::{adjustment, emoticon_score, lexicon_entry, Adjustment};
use serde::{Deserialize, Serialize};

/// Base magnitude of a positive/negative lexicon word
pub const LEXICON_BASE_SCORE: f64 = 0.5;
/// How many preceding tokens are scanned for a modifier
pub const MODIFIER_WINDOW: usize = 3;
pub const EXCLAMATION_FACTOR: f64 = 1.2;
pub const QUESTION_FACTOR: f64 = 0.8;
pub const CAPS_BOOST: f64 = 0.2;
/// All-caps texts must be longer than this to earn [`CAPS_BOOST`]
pub const CAPS_MIN_LENGTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentCategory {
    #[serde(rename = "very positive")]
    VeryPositive,
    #[serde(rename = "positive")]
    Positive,
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "negative")]
    Negative,
    #[serde(rename = "very negative")]
    VeryNegative,
}

impl SentimentCategory {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.5 {
            SentimentCategory::VeryPositive
        } else if score >= 0.1 {
            SentimentCategory::Positive
        } else if score <= -0.5 {
            SentimentCategory::VeryNegative
        } else if score <= -0.1 {
            SentimentCategory::Negative
        } else {
            SentimentCategory::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentCategory::VeryPositive => "very positive",
            SentimentCategory::Positive => "positive",
            SentimentCategory::Neutral => "neutral",
            SentimentCategory::Negative => "negative",
            SentimentCategory::VeryNegative => "very negative",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Final score in [-1, 1]
    pub score: f64,
    pub category: SentimentCategory,
    /// |score|
    pub intensity: f64,
    /// Number of scored tokens (lexicon hits and emoticons)
    pub word_count: usize,
}

impl SentimentResult {
    pub fn neutral() -> Self {
        Self {
            score: 0.0,
            category: SentimentCategory::Neutral,
            intensity: 0.0,
            word_count: 0,
        }
    }
}

pub struct ContextualScorer;

impl ContextualScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score a normalized token sequence against its original text
    pub fn score(&self, normalized: &NormalizedText, original: &str) -> SentimentResult {
        let tokens = &normalized.tokens;

        let mut total = 0.0;
        let mut word_count = 0;

        for (i, token) in tokens.iter().enumerate() {
            let Some(base) = base_score(token) else {
                continue;
            };
            word_count += 1;

            if base == 0.0 {
                continue;
            }

            let mut token_score = apply_modifier(base, &tokens[..i]);

            match normalized.trailing.get(i).copied().flatten() {
                Some('!') => token_score *= EXCLAMATION_FACTOR,
                Some('?') => token_score *= QUESTION_FACTOR,
                _ => {}
            }

            log::trace!("token '{}' base={:.2} adjusted={:.3}", token, base, token_score);
            total += token_score;
        }

        if word_count == 0 && !is_shouting(original) {
            return SentimentResult::neutral();
        }

        let mean = if word_count > 0 {
            total / word_count as f64
        } else {
            0.0
        };

        let boost = if is_shouting(original) { CAPS_BOOST } else { 0.0 };
        let score = (mean + boost).clamp(-1.0, 1.0);

        SentimentResult {
            score,
            category: SentimentCategory::from_score(score),
            intensity: score.abs(),
            word_count,
        }
    }
}

impl Default for ContextualScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed value for an emoticon, ±0.5 (or 0 for neutral words) for a lexicon hit
fn base_score(token: &str) -> Option<f64> {
    if let Some(value) = emoticon_score(token) {
        return Some(value);
    }

    lexicon_entry(&lookup_key(token)).map(|entry| match entry.sentiment {
        Valence::Positive => LEXICON_BASE_SCORE,
        Valence::Negative => -LEXICON_BASE_SCORE,
        Valence::Neutral => 0.0,
    })
}

/// Nearest modifier within the window wins; everything further back is ignored
fn apply_modifier(base: f64, preceding: &[String]) -> f64 {
    let nearest = preceding
        .iter()
        .rev()
        .take(MODIFIER_WINDOW)
        .find_map(|token| adjustment(token));

    match nearest {
        Some(Adjustment::Negation) => -base,
        Some(Adjustment::Scale(fraction)) => base * (1.0 + fraction),
        None => base,
    }
}

/// Entire text upper-case, with at least one letter, and longer than
/// [`CAPS_MIN_LENGTH`] characters
fn is_shouting(text: &str) -> bool {
    text.chars().count() > CAPS_MIN_LENGTH
        && text.chars().any(char::is_uppercase)
        && text.to_uppercase() == text
}
