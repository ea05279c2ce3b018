//! Emotion categories, fixed-key emotion vectors and dominant-emotion ranking

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// The eight emotion categories, in their canonical tie-break order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Trust,
    Fear,
    Surprise,
    Sadness,
    Disgust,
    Anger,
    Anticipation,
}

impl Emotion {
    /// Every category, in enumeration order
    pub const ALL: [Emotion; 8] = [
        Emotion::Joy,
        Emotion::Trust,
        Emotion::Fear,
        Emotion::Surprise,
        Emotion::Sadness,
        Emotion::Disgust,
        Emotion::Anger,
        Emotion::Anticipation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Trust => "trust",
            Emotion::Fear => "fear",
            Emotion::Surprise => "surprise",
            Emotion::Sadness => "sadness",
            Emotion::Disgust => "disgust",
            Emotion::Anger => "anger",
            Emotion::Anticipation => "anticipation",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Emotion::ALL.into_iter().find(|e| e.as_str() == s)
    }
}

/// A profile slot: one of the eight categories, or "neutral" when nothing matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionLabel {
    Joy,
    Trust,
    Fear,
    Surprise,
    Sadness,
    Disgust,
    Anger,
    Anticipation,
    Neutral,
}

impl EmotionLabel {
    /// The underlying category, `None` for neutral
    pub fn emotion(&self) -> Option<Emotion> {
        match self {
            EmotionLabel::Joy => Some(Emotion::Joy),
            EmotionLabel::Trust => Some(Emotion::Trust),
            EmotionLabel::Fear => Some(Emotion::Fear),
            EmotionLabel::Surprise => Some(Emotion::Surprise),
            EmotionLabel::Sadness => Some(Emotion::Sadness),
            EmotionLabel::Disgust => Some(Emotion::Disgust),
            EmotionLabel::Anger => Some(Emotion::Anger),
            EmotionLabel::Anticipation => Some(Emotion::Anticipation),
            EmotionLabel::Neutral => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.emotion().map_or("neutral", |e| e.as_str())
    }

    pub fn is(&self, emotion: Emotion) -> bool {
        self.emotion() == Some(emotion)
    }
}

impl From<Emotion> for EmotionLabel {
    fn from(emotion: Emotion) -> Self {
        match emotion {
            Emotion::Joy => EmotionLabel::Joy,
            Emotion::Trust => EmotionLabel::Trust,
            Emotion::Fear => EmotionLabel::Fear,
            Emotion::Surprise => EmotionLabel::Surprise,
            Emotion::Sadness => EmotionLabel::Sadness,
            Emotion::Disgust => EmotionLabel::Disgust,
            Emotion::Anger => EmotionLabel::Anger,
            Emotion::Anticipation => EmotionLabel::Anticipation,
        }
    }
}

impl From<Option<Emotion>> for EmotionLabel {
    fn from(emotion: Option<Emotion>) -> Self {
        emotion.map_or(EmotionLabel::Neutral, EmotionLabel::from)
    }
}

/// Coarse sentiment direction, used both for lexicon entries and profile valence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Valence {
    Positive,
    Negative,
    Neutral,
}

impl Valence {
    /// Sign of a score; exactly zero is neutral
    pub fn from_score(score: f64) -> Self {
        if score > 0.0 {
            Valence::Positive
        } else if score < 0.0 {
            Valence::Negative
        } else {
            Valence::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Valence::Positive => "positive",
            Valence::Negative => "negative",
            Valence::Neutral => "neutral",
        }
    }
}

/// Weight per emotion category
///
/// Always carries all eight keys; serializes as a full, zero-filled map.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EmotionVector {
    pub joy: f64,
    pub trust: f64,
    pub fear: f64,
    pub surprise: f64,
    pub sadness: f64,
    pub disgust: f64,
    pub anger: f64,
    pub anticipation: f64,
}

impl EmotionVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, emotion: Emotion) -> f64 {
        self[emotion]
    }

    pub fn add(&mut self, emotion: Emotion, amount: f64) {
        self[emotion] += amount;
    }

    /// `self += other * factor`, category by category
    pub fn add_scaled(&mut self, other: &EmotionVector, factor: f64) {
        for emotion in Emotion::ALL {
            self[emotion] += other[emotion] * factor;
        }
    }

    pub fn scaled(&self, factor: f64) -> EmotionVector {
        let mut out = EmotionVector::new();
        out.add_scaled(self, factor);
        out
    }

    /// (category, weight) pairs in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f64)> + '_ {
        Emotion::ALL.into_iter().map(move |e| (e, self[e]))
    }

    /// Highest-weighted categories, see [`rank_dominant`]
    pub fn dominant(&self, limit: usize) -> Vec<Emotion> {
        rank_dominant(self.iter(), limit)
    }
}

impl Index<Emotion> for EmotionVector {
    type Output = f64;

    fn index(&self, emotion: Emotion) -> &f64 {
        match emotion {
            Emotion::Joy => &self.joy,
            Emotion::Trust => &self.trust,
            Emotion::Fear => &self.fear,
            Emotion::Surprise => &self.surprise,
            Emotion::Sadness => &self.sadness,
            Emotion::Disgust => &self.disgust,
            Emotion::Anger => &self.anger,
            Emotion::Anticipation => &self.anticipation,
        }
    }
}

impl IndexMut<Emotion> for EmotionVector {
    fn index_mut(&mut self, emotion: Emotion) -> &mut f64 {
        match emotion {
            Emotion::Joy => &mut self.joy,
            Emotion::Trust => &mut self.trust,
            Emotion::Fear => &mut self.fear,
            Emotion::Surprise => &mut self.surprise,
            Emotion::Sadness => &mut self.sadness,
            Emotion::Disgust => &mut self.disgust,
            Emotion::Anger => &mut self.anger,
            Emotion::Anticipation => &mut self.anticipation,
        }
    }
}

/// Rank categories by descending weight, keeping only weights > 0
///
/// Ties resolve by enumeration order: the input is re-ordered canonically and
/// then stable-sorted, so the caller's iteration order never leaks through.
pub fn rank_dominant<I>(weights: I, limit: usize) -> Vec<Emotion>
where
    I: IntoIterator<Item = (Emotion, f64)>,
{
    let mut ranked: Vec<(Emotion, f64)> = weights
        .into_iter()
        .filter(|(_, weight)| *weight > 0.0)
        .collect();

    ranked.sort_by_key(|(emotion, _)| *emotion);
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranked.into_iter().take(limit).map(|(emotion, _)| emotion).collect()
}
