//! Engine configuration from environment variables

use crate::error::MoodError;
use crate::mood_core::batch::AggregationOptions;
use std::env;

/// Configuration for batch analysis
///
/// Loaded from environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct MoodConfig {
    /// Weight each text by its contextual intensity
    pub weight_by_intensity: bool,

    /// Favour earlier texts in a batch with `exp(-index / n)`
    pub time_decay: bool,

    /// Replicate posts by `ceil(log2(engagement + 1))` before aggregating
    pub weight_by_engagement: bool,

    /// Texts per rayon task in parallel batch analysis
    pub parallel_chunk_size: usize,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            weight_by_intensity: true,
            time_decay: false,
            weight_by_engagement: false,
            parallel_chunk_size: 256,
        }
    }
}

impl MoodConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `MOOD_WEIGHT_BY_INTENSITY` (default: true)
    /// - `MOOD_TIME_DECAY` (default: false)
    /// - `MOOD_WEIGHT_BY_ENGAGEMENT` (default: false)
    /// - `MOOD_PARALLEL_CHUNK_SIZE` (default: 256)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            weight_by_intensity: env::var("MOOD_WEIGHT_BY_INTENSITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.weight_by_intensity),

            time_decay: env::var("MOOD_TIME_DECAY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.time_decay),

            weight_by_engagement: env::var("MOOD_WEIGHT_BY_ENGAGEMENT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.weight_by_engagement),

            parallel_chunk_size: env::var("MOOD_PARALLEL_CHUNK_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.parallel_chunk_size),
        }
    }

    /// Read `.env` if present, then the environment, then validate
    pub fn load() -> Result<Self, MoodError> {
        dotenv::dotenv().ok();

        let config = Self::from_env();
        config.validate()?;

        log::debug!("Loaded mood config: {:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MoodError> {
        if self.parallel_chunk_size == 0 {
            return Err(MoodError::InvalidConfig(
                "MOOD_PARALLEL_CHUNK_SIZE must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn aggregation_options(&self) -> AggregationOptions {
        AggregationOptions {
            weight_by_intensity: self.weight_by_intensity,
            time_decay: self.time_decay,
        }
    }
}
