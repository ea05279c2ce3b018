//! Emotion analyzer: runs the per-text pipeline and batch aggregation
//!
//! Per-text scoring is independent across texts; parallel batches are split
//! into fixed-size chunks, each chunk aggregated into a [`BatchPartial`] at its
//! global offset, and the partials merged in order before the final division.

use super::batch::{AggregationOptions, BatchAggregator, BatchPartial, RegionSignal};
use super::contextual::{ContextualScorer, SentimentResult};
use super::lexicon::{LexiconScore, LexiconScorer};
use super::normalizer::TextNormalizer;
use super::profile::{EmotionProfile, ProfileCombiner};
use crate::config::MoodConfig;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CHUNK_SIZE: usize = 256;

/// Full per-text result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub profile: EmotionProfile,
    pub lexicon: LexiconScore,
    pub sentiment: SentimentResult,
}

/// One fetched post
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Post {
    /// Missing or non-text bodies are scored as empty text
    pub text: Option<String>,
    /// Likes + reposts + replies, when the source reports it
    pub engagement: Option<u64>,
}

impl Post {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            engagement: None,
        }
    }

    pub fn with_engagement(mut self, engagement: u64) -> Self {
        self.engagement = Some(engagement);
        self
    }

    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// `ceil(log2(engagement + 1))`; posts without a metric count once
pub fn engagement_replicas(engagement: Option<u64>) -> usize {
    match engagement {
        // bit length of e == ceil(log2(e + 1))
        Some(e) => (u64::BITS - e.leading_zeros()) as usize,
        None => 1,
    }
}

/// Texts of `posts`, each repeated by its engagement weight, in post order
pub fn expand_by_engagement(posts: &[Post]) -> Vec<&str> {
    posts
        .iter()
        .flat_map(|post| {
            std::iter::repeat(post.text_or_empty()).take(engagement_replicas(post.engagement))
        })
        .collect()
}

pub struct EmotionAnalyzer {
    normalizer: TextNormalizer,
    lexicon: LexiconScorer,
    contextual: ContextualScorer,
    combiner: ProfileCombiner,
    chunk_size: usize,
}

impl EmotionAnalyzer {
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Chunk size for [`EmotionAnalyzer::batch_analyze_parallel`]; 0 is treated as 1
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            normalizer: TextNormalizer::new(),
            lexicon: LexiconScorer::new(),
            contextual: ContextualScorer::new(),
            combiner: ProfileCombiner::new(),
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn from_config(config: &MoodConfig) -> Self {
        Self::with_chunk_size(config.parallel_chunk_size)
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn analyze_text(&self, text: &str) -> TextAnalysis {
        let normalized = self.normalizer.normalize(text);
        let lexicon = self.lexicon.score(&normalized.tokens);
        let sentiment = self.contextual.score(&normalized, text);
        let profile = self.combiner.combine(&lexicon, &sentiment);

        TextAnalysis {
            profile,
            lexicon,
            sentiment,
        }
    }

    /// `None` is analyzed as the empty string
    pub fn analyze_optional(&self, text: Option<&str>) -> TextAnalysis {
        self.analyze_text(text.unwrap_or(""))
    }

    pub fn analyze_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<TextAnalysis> {
        texts.iter().map(|text| self.analyze_text(text.as_ref())).collect()
    }

    pub fn aggregate(
        &self,
        analyses: &[TextAnalysis],
        options: AggregationOptions,
    ) -> RegionSignal {
        let profiles: Vec<EmotionProfile> = analyses.iter().map(|a| a.profile.clone()).collect();
        BatchAggregator::new(options).aggregate(&profiles)
    }

    /// Analyze and aggregate in caller order
    pub fn batch_analyze<S: AsRef<str>>(
        &self,
        texts: &[S],
        options: AggregationOptions,
    ) -> RegionSignal {
        let profiles: Vec<EmotionProfile> = texts
            .iter()
            .map(|text| self.analyze_text(text.as_ref()).profile)
            .collect();
        BatchAggregator::new(options).aggregate(&profiles)
    }

    /// Same result as [`EmotionAnalyzer::batch_analyze`], scored on the rayon pool
    pub fn batch_analyze_parallel<S>(
        &self,
        texts: &[S],
        options: AggregationOptions,
    ) -> RegionSignal
    where
        S: AsRef<str> + Sync,
    {
        let batch_len = texts.len();
        let chunk_size = self.chunk_size;
        let aggregator = BatchAggregator::new(options);

        let partials: Vec<BatchPartial> = texts
            .par_chunks(chunk_size)
            .enumerate()
            .map(|(chunk_index, chunk)| {
                let profiles: Vec<EmotionProfile> = chunk
                    .iter()
                    .map(|text| self.analyze_text(text.as_ref()).profile)
                    .collect();
                aggregator.partial(&profiles, chunk_index * chunk_size, batch_len)
            })
            .collect();

        log::debug!(
            "Scored {} texts in {} chunks of up to {}",
            batch_len,
            partials.len(),
            chunk_size
        );

        partials
            .iter()
            .fold(BatchPartial::new(), |acc, partial| acc.merge(partial))
            .finish()
    }

    /// Aggregate posts, replicating each by engagement when enabled
    pub fn batch_analyze_posts(
        &self,
        posts: &[Post],
        options: AggregationOptions,
        weight_by_engagement: bool,
    ) -> RegionSignal {
        let texts: Vec<&str> = if weight_by_engagement {
            expand_by_engagement(posts)
        } else {
            posts.iter().map(Post::text_or_empty).collect()
        };

        log::debug!(
            "Analyzing {} posts as {} weighted texts",
            posts.len(),
            texts.len()
        );

        self.batch_analyze_parallel(&texts, options)
    }

    /// [`EmotionAnalyzer::batch_analyze_posts`] with flags taken from `config`
    pub fn analyze_posts(&self, posts: &[Post], config: &MoodConfig) -> RegionSignal {
        self.batch_analyze_posts(posts, config.aggregation_options(), config.weight_by_engagement)
    }
}

impl Default for EmotionAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood_core::emotion::{EmotionLabel, Valence};

    fn create_test_texts() -> Vec<String> {
        let samples = [
            "I love this, what a wonderful day :)",
            "so sad and lonely tonight :(",
            "furious about the traffic!!!",
            "meh",
            "Grateful for my friends <3",
            "worried about the exam tomorrow",
            "WHAT AN AMAZING GAME TONIGHT",
            "not happy with the service",
        ];
        (0..40).map(|i| samples[i % samples.len()].to_string()).collect()
    }

    #[test]
    fn test_analyze_text_runs_full_pipeline() {
        let analysis = EmotionAnalyzer::new().analyze_text("I am so happy today! :)");

        assert_eq!(analysis.profile.valence, Valence::Positive);
        assert_eq!(analysis.profile.primary, EmotionLabel::Joy);
        assert_eq!(analysis.lexicon.positive_count, 1);
        assert!(analysis.sentiment.score > 0.0);
        assert_eq!(analysis.profile.emotions, analysis.lexicon.emotions);
    }

    #[test]
    fn test_missing_text_is_empty() {
        let analyzer = EmotionAnalyzer::new();
        assert_eq!(analyzer.analyze_optional(None), analyzer.analyze_text(""));
        assert_eq!(analyzer.analyze_optional(None).profile.primary, EmotionLabel::Neutral);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let texts = create_test_texts();
        let analyzer = EmotionAnalyzer::with_chunk_size(7);

        for options in [
            AggregationOptions::default(),
            AggregationOptions { weight_by_intensity: true, time_decay: true },
            AggregationOptions { weight_by_intensity: false, time_decay: true },
        ] {
            let sequential = analyzer.batch_analyze(&texts, options);
            let parallel = analyzer.batch_analyze_parallel(&texts, options);

            assert!((sequential.sentiment_score - parallel.sentiment_score).abs() < 1e-9);
            assert!((sequential.intensity - parallel.intensity).abs() < 1e-9);
            assert_eq!(sequential.sample_size, parallel.sample_size);
            assert_eq!(sequential.mood_category, parallel.mood_category);
            for (emotion, weight) in sequential.emotion_distribution.iter() {
                assert!((weight - parallel.emotion_distribution.get(emotion)).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_aggregate_matches_batch_analyze() {
        let texts = create_test_texts();
        let analyzer = EmotionAnalyzer::new();
        let options = AggregationOptions::default();

        let analyses = analyzer.analyze_batch(&texts);
        assert_eq!(analyses.len(), texts.len());
        assert_eq!(analyzer.aggregate(&analyses, options), analyzer.batch_analyze(&texts, options));
    }

    #[test]
    fn test_empty_parallel_batch() {
        let texts: Vec<String> = Vec::new();
        let signal = EmotionAnalyzer::new().batch_analyze_parallel(&texts, AggregationOptions::default());
        assert_eq!(signal, RegionSignal::neutral_default());
    }

    #[test]
    fn test_engagement_replicas() {
        assert_eq!(engagement_replicas(None), 1);
        assert_eq!(engagement_replicas(Some(0)), 0);
        assert_eq!(engagement_replicas(Some(1)), 1);
        assert_eq!(engagement_replicas(Some(2)), 2);
        assert_eq!(engagement_replicas(Some(3)), 2);
        assert_eq!(engagement_replicas(Some(4)), 3);
        assert_eq!(engagement_replicas(Some(1023)), 10);
        assert_eq!(engagement_replicas(Some(1024)), 11);
    }

    #[test]
    fn test_expand_by_engagement_keeps_order() {
        let posts = vec![
            Post::new("first").with_engagement(3),
            Post::default(),
            Post::new("ignored").with_engagement(0),
            Post::new("last"),
        ];

        assert_eq!(expand_by_engagement(&posts), vec!["first", "first", "", "last"]);
    }

    #[test]
    fn test_posts_without_engagement_weighting() {
        let posts = vec![
            Post::new("happy").with_engagement(100),
            Post::new("sad").with_engagement(0),
        ];
        let analyzer = EmotionAnalyzer::new();

        let flat = analyzer.batch_analyze_posts(&posts, AggregationOptions::default(), false);
        assert_eq!(flat.sample_size, 2);

        let weighted = analyzer.batch_analyze_posts(&posts, AggregationOptions::default(), true);
        assert_eq!(weighted.sample_size, 7);
        assert!(weighted.sentiment_score > flat.sentiment_score);
    }
}
