//! Cross-region aggregation into a single world signal

use super::batch::{
    categorize_mood, confidence_for, MoodCategory, RegionSignal, AGGREGATE_DOMINANT_LIMIT,
    NEUTRAL_SENTIMENT,
};
use super::emotion::{rank_dominant, EmotionLabel, EmotionVector};
use super::region::is_world;
use crate::error::MoodError;
use serde::{Deserialize, Serialize};

/// Sample-weighted combination of region signals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSignal {
    /// Per-category tally of sample sizes over each region's dominant emotions
    pub emotion_distribution: EmotionVector,
    pub sentiment_score: f64,
    pub intensity: f64,
    pub dominant_emotions: Vec<EmotionLabel>,
    pub mood_category: MoodCategory,
    /// Sum of the contributing regions' sample sizes
    pub sample_size: usize,
    pub confidence: f64,
    /// Regions aggregated, after excluding any world entry
    pub region_count: usize,
}

impl WorldSignal {
    pub fn to_json(&self) -> Result<String, MoodError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, MoodError> {
        Ok(serde_json::from_str(json)?)
    }

    /// View as a region signal, e.g. to store it under the world slug
    pub fn as_region_signal(&self) -> RegionSignal {
        RegionSignal {
            emotion_distribution: self.emotion_distribution,
            sentiment_score: self.sentiment_score,
            intensity: self.intensity,
            dominant_emotions: self.dominant_emotions.clone(),
            mood_category: self.mood_category,
            sample_size: self.sample_size,
            confidence: self.confidence,
        }
    }
}

pub struct CrossRegionAggregator;

impl CrossRegionAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Combine `(region name, signal)` pairs
    ///
    /// An entry named "world" (any case) is skipped so a previously stored
    /// world signal is never counted twice.
    pub fn aggregate<'a, K, I>(&self, regions: I) -> WorldSignal
    where
        K: AsRef<str> + 'a,
        I: IntoIterator<Item = (&'a K, &'a RegionSignal)>,
    {
        let mut tally = EmotionVector::new();
        let mut weighted_sentiment = 0.0;
        let mut weighted_intensity = 0.0;
        let mut total_samples = 0usize;
        let mut region_count = 0usize;

        for (name, signal) in regions {
            let name = name.as_ref();
            if is_world(name) {
                log::debug!("Skipping '{}' entry in cross-region aggregation", name);
                continue;
            }
            region_count += 1;

            let n = signal.sample_size as f64;
            weighted_sentiment += signal.sentiment_score * n;
            weighted_intensity += signal.intensity * n;
            total_samples += signal.sample_size;

            for emotion in signal.dominant_emotions.iter().filter_map(EmotionLabel::emotion) {
                tally.add(emotion, n);
            }
        }

        let (sentiment_score, intensity) = if total_samples > 0 {
            let n = total_samples as f64;
            (
                (weighted_sentiment / n).clamp(-1.0, 1.0),
                (weighted_intensity / n).clamp(0.0, 1.0),
            )
        } else {
            (NEUTRAL_SENTIMENT, 0.0)
        };

        let mut dominant_emotions: Vec<EmotionLabel> =
            rank_dominant(tally.iter(), AGGREGATE_DOMINANT_LIMIT)
                .into_iter()
                .map(EmotionLabel::from)
                .collect();
        if total_samples == 0 {
            dominant_emotions = vec![EmotionLabel::Neutral];
        }

        let mood_category = categorize_mood(sentiment_score, intensity, &dominant_emotions);

        log::debug!(
            "World signal from {} regions ({} samples): sentiment={:.3} mood={}",
            region_count,
            total_samples,
            sentiment_score,
            mood_category.as_str()
        );

        WorldSignal {
            emotion_distribution: tally,
            sentiment_score,
            intensity,
            dominant_emotions,
            mood_category,
            sample_size: total_samples,
            confidence: confidence_for(total_samples),
            region_count,
        }
    }
}

impl Default for CrossRegionAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn create_test_signal(sentiment: f64, intensity: f64, dominant: Vec<EmotionLabel>, samples: usize) -> RegionSignal {
        RegionSignal {
            emotion_distribution: EmotionVector::new(),
            sentiment_score: sentiment,
            intensity,
            dominant_emotions: dominant,
            mood_category: MoodCategory::Neutral,
            sample_size: samples,
            confidence: confidence_for(samples),
        }
    }

    #[test]
    fn test_sample_weighted_sentiment() {
        let mut regions = BTreeMap::new();
        regions.insert("usa".to_string(), create_test_signal(0.6, 0.4, vec![EmotionLabel::Joy], 300));
        regions.insert("europe".to_string(), create_test_signal(-0.2, 0.8, vec![EmotionLabel::Fear], 100));

        let world = CrossRegionAggregator::new().aggregate(&regions);

        // (0.6 * 300 + -0.2 * 100) / 400
        assert!((world.sentiment_score - 0.4).abs() < 1e-12);
        assert!((world.intensity - 0.5).abs() < 1e-12);
        assert_eq!(world.sample_size, 400);
        assert_eq!(world.region_count, 2);
        assert_eq!(world.dominant_emotions, vec![EmotionLabel::Joy, EmotionLabel::Fear]);
        assert_eq!(world.mood_category, MoodCategory::Cheerful);
    }

    #[test]
    fn test_world_entry_is_excluded() {
        let mut regions = BTreeMap::new();
        regions.insert("asia".to_string(), create_test_signal(0.1, 0.3, vec![EmotionLabel::Trust], 50));
        regions.insert("World".to_string(), create_test_signal(-0.9, 0.9, vec![EmotionLabel::Anger], 5000));

        let world = CrossRegionAggregator::new().aggregate(&regions);

        assert_eq!(world.region_count, 1);
        assert_eq!(world.sample_size, 50);
        assert!((world.sentiment_score - 0.1).abs() < 1e-12);
        assert_eq!(world.emotion_distribution.anger, 0.0, "world entry must not be double counted");
    }

    #[test]
    fn test_only_dominant_emotions_are_tallied() {
        let mut usa = create_test_signal(0.0, 0.2, vec![EmotionLabel::Sadness], 10);
        usa.emotion_distribution.joy = 99.0;

        let regions = vec![("usa", usa)];
        let world = CrossRegionAggregator::new().aggregate(regions.iter().map(|(k, v)| (k, v)));

        assert_eq!(world.emotion_distribution.joy, 0.0);
        assert_eq!(world.emotion_distribution.sadness, 10.0);
    }

    #[test]
    fn test_no_samples_defaults_to_neutral() {
        let mut regions = BTreeMap::new();
        regions.insert("canada".to_string(), RegionSignal::neutral_default());

        let world = CrossRegionAggregator::new().aggregate(&regions);

        assert_eq!(world.sentiment_score, 0.5);
        assert_eq!(world.intensity, 0.0);
        assert_eq!(world.sample_size, 0);
        assert_eq!(world.dominant_emotions, vec![EmotionLabel::Neutral]);
        assert_eq!(world.emotion_distribution, EmotionVector::new(), "neutral placeholders never contribute");

        let empty: BTreeMap<String, RegionSignal> = BTreeMap::new();
        let world = CrossRegionAggregator::new().aggregate(&empty);
        assert_eq!(world.region_count, 0);
        assert!(!world.sentiment_score.is_nan());
    }

    #[test]
    fn test_dominant_capped_at_three() {
        let mut regions = BTreeMap::new();
        regions.insert(
            "usa".to_string(),
            create_test_signal(0.0, 0.2, vec![EmotionLabel::Joy, EmotionLabel::Trust, EmotionLabel::Fear], 10),
        );
        regions.insert(
            "asia".to_string(),
            create_test_signal(0.0, 0.2, vec![EmotionLabel::Anger, EmotionLabel::Surprise], 20),
        );

        let world = CrossRegionAggregator::new().aggregate(&regions);

        assert_eq!(
            world.dominant_emotions,
            vec![EmotionLabel::Surprise, EmotionLabel::Anger, EmotionLabel::Joy]
        );
    }
}
