//! Mood Core - Emotion Signal Extraction and Aggregation
//!
//! Turns batches of short social-media texts into per-text emotion profiles,
//! per-region mood signals, a sample-weighted world signal and a trend against
//! the previous period. Every stage is a pure function over its inputs; the
//! lookup tables are static and shared read-only.
//!
//! # Architecture
//!
//! ```text
//! raw text → TextNormalizer (tokens + caps ratio)
//!     ↓                         ↓
//! LexiconScorer           ContextualScorer (negation/booster window, !/?, caps)
//!     ↓                         ↓
//! ProfileCombiner (0.6 × balance + 0.4 × contextual, primary override)
//!     ↓
//! BatchAggregator (intensity / decay weights, mood table) → RegionSignal
//!     ↓
//! CrossRegionAggregator (sample-size weights) → WorldSignal
//!     ↓
//! MomentumCalculator (current vs previous) → MomentumResult
//! ```
//!
//! [`EmotionAnalyzer`] wires the per-text stages together and runs large
//! batches on the rayon pool.

pub mod analyzer;
pub mod batch;
pub mod contextual;
pub mod emotion;
pub mod lexicon;
pub mod momentum;
pub mod normalizer;
pub mod profile;
pub mod region;
pub mod tables;
pub mod world;

pub use analyzer::{expand_by_engagement, EmotionAnalyzer, Post, TextAnalysis};
pub use batch::{
    AggregationOptions, BatchAggregator, BatchPartial, MoodCategory, MoodDescriptor, RegionSignal,
};
pub use contextual::{ContextualScorer, SentimentCategory, SentimentResult};
pub use emotion::{Emotion, EmotionLabel, EmotionVector, Valence};
pub use lexicon::{LexiconScore, LexiconScorer};
pub use momentum::{
    Direction, MomentumCalculator, MomentumIcon, MomentumResult, MomentumTier, SentimentSignal,
};
pub use normalizer::{NormalizedText, TextNormalizer};
pub use profile::{EmotionProfile, ProfileCombiner};
pub use region::{display_name, signal_cache_key, TimeRange};
pub use world::{CrossRegionAggregator, WorldSignal};
