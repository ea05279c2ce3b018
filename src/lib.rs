
pub mod config;
pub mod error;
pub mod mood_core;

pub use config::MoodConfig;
pub use error::MoodError;
pub use mood_core::{
    AggregationOptions, CrossRegionAggregator, EmotionAnalyzer, EmotionProfile, MomentumCalculator,
    MomentumResult, Post, RegionSignal, TimeRange, WorldSignal,
};
