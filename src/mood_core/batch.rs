//! Batch aggregation of per-text profiles into a region signal
//!
//! Weighted sums are kept unnormalized in [`BatchPartial`] so that partitions of
//! a batch can be aggregated independently and merged before the single final
//! division by the item count.

use super::emotion::{Emotion, EmotionLabel, EmotionVector};
use super::profile::EmotionProfile;
use super::region::TimeRange;
use crate::error::MoodError;
use serde::{Deserialize, Serialize};

/// Number of dominant emotions reported for an aggregate
pub const AGGREGATE_DOMINANT_LIMIT: usize = 3;
/// Sentiment reported when there is no data
pub const NEUTRAL_SENTIMENT: f64 = 0.5;
/// Sample size at which a signal reaches full confidence
pub const FULL_CONFIDENCE_SAMPLES: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationOptions {
    /// Weight each text by its contextual intensity
    pub weight_by_intensity: bool,
    /// Weight each text by `exp(-index / n)`; earlier items count more
    pub time_decay: bool,
}

impl Default for AggregationOptions {
    fn default() -> Self {
        Self {
            weight_by_intensity: true,
            time_decay: false,
        }
    }
}

impl AggregationOptions {
    pub fn for_time_range(range: TimeRange) -> Self {
        Self {
            weight_by_intensity: true,
            time_decay: range.uses_time_decay(),
        }
    }
}

/// Overall mood tag chosen from mean sentiment, mean intensity and dominant emotions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoodCategory {
    #[serde(rename = "euphoric")]
    Euphoric,
    #[serde(rename = "confident")]
    Confident,
    #[serde(rename = "excited")]
    Excited,
    #[serde(rename = "very positive")]
    VeryPositive,
    #[serde(rename = "cheerful")]
    Cheerful,
    #[serde(rename = "content")]
    Content,
    #[serde(rename = "optimistic")]
    Optimistic,
    #[serde(rename = "positive")]
    Positive,
    #[serde(rename = "furious")]
    Furious,
    #[serde(rename = "terrified")]
    Terrified,
    #[serde(rename = "despondent")]
    Despondent,
    #[serde(rename = "very negative")]
    VeryNegative,
    #[serde(rename = "frustrated")]
    Frustrated,
    #[serde(rename = "anxious")]
    Anxious,
    #[serde(rename = "melancholic")]
    Melancholic,
    #[serde(rename = "negative")]
    Negative,
    #[serde(rename = "curious")]
    Curious,
    #[serde(rename = "contemplative")]
    Contemplative,
    #[serde(rename = "neutral")]
    Neutral,
}

impl MoodCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodCategory::Euphoric => "euphoric",
            MoodCategory::Confident => "confident",
            MoodCategory::Excited => "excited",
            MoodCategory::VeryPositive => "very positive",
            MoodCategory::Cheerful => "cheerful",
            MoodCategory::Content => "content",
            MoodCategory::Optimistic => "optimistic",
            MoodCategory::Positive => "positive",
            MoodCategory::Furious => "furious",
            MoodCategory::Terrified => "terrified",
            MoodCategory::Despondent => "despondent",
            MoodCategory::VeryNegative => "very negative",
            MoodCategory::Frustrated => "frustrated",
            MoodCategory::Anxious => "anxious",
            MoodCategory::Melancholic => "melancholic",
            MoodCategory::Negative => "negative",
            MoodCategory::Curious => "curious",
            MoodCategory::Contemplative => "contemplative",
            MoodCategory::Neutral => "neutral",
        }
    }
}

/// Decision table over (sentiment, intensity, primary emotion)
///
/// The primary emotion is the first dominant entry. Rows are checked top to
/// bottom; the first matching sentiment band wins.
pub fn categorize_mood(sentiment: f64, intensity: f64, dominant: &[EmotionLabel]) -> MoodCategory {
    let primary = dominant.first().and_then(EmotionLabel::emotion);

    if sentiment > 0.5 && intensity > 0.6 {
        match primary {
            Some(Emotion::Joy) => MoodCategory::Euphoric,
            Some(Emotion::Trust) => MoodCategory::Confident,
            Some(Emotion::Anticipation) => MoodCategory::Excited,
            _ => MoodCategory::VeryPositive,
        }
    } else if sentiment > 0.2 {
        match primary {
            Some(Emotion::Joy) => MoodCategory::Cheerful,
            Some(Emotion::Trust) => MoodCategory::Content,
            Some(Emotion::Anticipation) => MoodCategory::Optimistic,
            _ => MoodCategory::Positive,
        }
    } else if sentiment < -0.5 && intensity > 0.6 {
        match primary {
            Some(Emotion::Anger) => MoodCategory::Furious,
            Some(Emotion::Fear) => MoodCategory::Terrified,
            Some(Emotion::Sadness) => MoodCategory::Despondent,
            _ => MoodCategory::VeryNegative,
        }
    } else if sentiment < -0.2 {
        match primary {
            Some(Emotion::Anger) => MoodCategory::Frustrated,
            Some(Emotion::Fear) => MoodCategory::Anxious,
            Some(Emotion::Sadness) => MoodCategory::Melancholic,
            _ => MoodCategory::Negative,
        }
    } else if primary == Some(Emotion::Surprise) {
        MoodCategory::Curious
    } else if dominant.iter().any(|label| label.is(Emotion::Anticipation)) {
        MoodCategory::Contemplative
    } else {
        MoodCategory::Neutral
    }
}

/// Aggregated mood of one batch of texts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSignal {
    /// Weighted emotion totals divided by the sample size
    pub emotion_distribution: EmotionVector,
    /// Mean weighted sentiment, in [-1, 1]
    pub sentiment_score: f64,
    /// Mean contextual intensity, in [0, 1]
    pub intensity: f64,
    /// Up to three emotions with weight > 0, or `[neutral]` for an empty batch
    pub dominant_emotions: Vec<EmotionLabel>,
    pub mood_category: MoodCategory,
    pub sample_size: usize,
    /// `min(sample_size / 500, 1)`
    pub confidence: f64,
}

/// The fields the text-generation collaborator consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodDescriptor {
    pub sentiment_score: f64,
    pub dominant_emotions: Vec<EmotionLabel>,
    pub intensity: f64,
    pub emotion_distribution: EmotionVector,
}

impl RegionSignal {
    /// Signal reported when a batch has no samples
    pub fn neutral_default() -> Self {
        Self {
            emotion_distribution: EmotionVector::new(),
            sentiment_score: NEUTRAL_SENTIMENT,
            intensity: 0.0,
            dominant_emotions: vec![EmotionLabel::Neutral],
            mood_category: MoodCategory::Neutral,
            sample_size: 0,
            confidence: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sample_size == 0
    }

    pub fn descriptor(&self) -> MoodDescriptor {
        MoodDescriptor {
            sentiment_score: self.sentiment_score,
            dominant_emotions: self.dominant_emotions.clone(),
            intensity: self.intensity,
            emotion_distribution: self.emotion_distribution,
        }
    }

    pub fn to_json(&self) -> Result<String, MoodError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a signal previously produced by [`RegionSignal::to_json`]
    pub fn from_json(json: &str) -> Result<Self, MoodError> {
        Ok(serde_json::from_str(json)?)
    }
}

pub fn confidence_for(sample_size: usize) -> f64 {
    (sample_size as f64 / FULL_CONFIDENCE_SAMPLES as f64).min(1.0)
}

/// Unnormalized running sums for a batch or a contiguous slice of one
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BatchPartial {
    pub weighted_totals: EmotionVector,
    pub weighted_sentiment: f64,
    pub intensity_sum: f64,
    pub count: usize,
}

impl BatchPartial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one profile at global position `index` of a batch of `batch_len` items
    pub fn accumulate(
        &mut self,
        profile: &EmotionProfile,
        index: usize,
        batch_len: usize,
        options: AggregationOptions,
    ) {
        let mut weight = if options.weight_by_intensity {
            profile.intensity
        } else {
            1.0
        };

        if options.time_decay && batch_len > 0 {
            weight *= (-(index as f64) / batch_len as f64).exp();
        }

        self.weighted_totals.add_scaled(&profile.emotions, weight);
        self.weighted_sentiment += profile.sentiment_score * weight;
        self.intensity_sum += profile.intensity;
        self.count += 1;
    }

    /// Sum two partials; both must come from the same batch
    pub fn merge(mut self, other: &BatchPartial) -> Self {
        self.weighted_totals.add_scaled(&other.weighted_totals, 1.0);
        self.weighted_sentiment += other.weighted_sentiment;
        self.intensity_sum += other.intensity_sum;
        self.count += other.count;
        self
    }

    /// Divide by the raw item count and classify
    pub fn finish(&self) -> RegionSignal {
        if self.count == 0 {
            return RegionSignal::neutral_default();
        }

        let n = self.count as f64;
        let emotion_distribution = self.weighted_totals.scaled(1.0 / n);
        let sentiment_score = (self.weighted_sentiment / n).clamp(-1.0, 1.0);
        let intensity = (self.intensity_sum / n).clamp(0.0, 1.0);

        let dominant_emotions: Vec<EmotionLabel> = emotion_distribution
            .dominant(AGGREGATE_DOMINANT_LIMIT)
            .into_iter()
            .map(EmotionLabel::from)
            .collect();

        let mood_category = categorize_mood(sentiment_score, intensity, &dominant_emotions);

        RegionSignal {
            emotion_distribution,
            sentiment_score,
            intensity,
            dominant_emotions,
            mood_category,
            sample_size: self.count,
            confidence: confidence_for(self.count),
        }
    }
}

pub struct BatchAggregator {
    options: AggregationOptions,
}

impl BatchAggregator {
    pub fn new(options: AggregationOptions) -> Self {
        Self { options }
    }

    pub fn with_defaults() -> Self {
        Self::new(AggregationOptions::default())
    }

    /// Aggregate a whole batch, in caller-supplied order
    pub fn aggregate(&self, profiles: &[EmotionProfile]) -> RegionSignal {
        let signal = self.partial(profiles, 0, profiles.len()).finish();

        log::debug!(
            "Aggregated {} profiles: sentiment={:.3} intensity={:.3} mood={}",
            signal.sample_size,
            signal.sentiment_score,
            signal.intensity,
            signal.mood_category.as_str()
        );

        signal
    }

    /// Sums for the slice starting at `offset` within a batch of `batch_len` items
    pub fn partial(
        &self,
        profiles: &[EmotionProfile],
        offset: usize,
        batch_len: usize,
    ) -> BatchPartial {
        let mut partial = BatchPartial::new();
        for (i, profile) in profiles.iter().enumerate() {
            partial.accumulate(profile, offset + i, batch_len, self.options);
        }
        partial
    }
}

impl Default for BatchAggregator {
    fn default() -> Self {
        Self::with_defaults()
    }
}
