//! Trend comparison between a current and a previous signal

use super::batch::{RegionSignal, NEUTRAL_SENTIMENT};
use super::world::WorldSignal;
use serde::{Deserialize, Serialize};

/// Anything with a mean sentiment that can be compared across periods
pub trait SentimentSignal {
    fn sentiment_score(&self) -> f64;
}

impl SentimentSignal for RegionSignal {
    fn sentiment_score(&self) -> f64 {
        self.sentiment_score
    }
}

impl SentimentSignal for WorldSignal {
    fn sentiment_score(&self) -> f64 {
        self.sentiment_score
    }
}

impl SentimentSignal for f64 {
    fn sentiment_score(&self) -> f64 {
        *self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Flat => "flat",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MomentumTier {
    Steady,
    Rapid,
    SteadyTrend,
    Gentle,
}

impl MomentumTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MomentumTier::Steady => "steady",
            MomentumTier::Rapid => "rapid",
            MomentumTier::SteadyTrend => "steady-trend",
            MomentumTier::Gentle => "gentle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumIcon {
    FlatArrow,
    UpArrow,
    DownArrow,
}

impl MomentumIcon {
    pub fn code(&self) -> &'static str {
        match self {
            MomentumIcon::FlatArrow => "flat_arrow",
            MomentumIcon::UpArrow => "up_arrow",
            MomentumIcon::DownArrow => "down_arrow",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            MomentumIcon::FlatArrow => "→",
            MomentumIcon::UpArrow => "↗️",
            MomentumIcon::DownArrow => "↘️",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentumResult {
    /// current - previous sentiment
    pub change: f64,
    pub direction: Direction,
    pub tier: MomentumTier,
    pub icon: MomentumIcon,
}

impl MomentumResult {
    /// Short trailing phrase, e.g. "and gently brightening"
    pub fn phrase(&self) -> &'static str {
        match (self.direction, self.tier) {
            (Direction::Flat, _) | (_, MomentumTier::Steady) => "and steady",
            (Direction::Up, MomentumTier::Rapid) => "and rapidly brightening",
            (Direction::Up, MomentumTier::SteadyTrend) => "and brightening",
            (Direction::Up, MomentumTier::Gentle) => "and gently brightening",
            (Direction::Down, MomentumTier::Rapid) => "and rapidly darkening",
            (Direction::Down, MomentumTier::SteadyTrend) => "and darkening",
            (Direction::Down, MomentumTier::Gentle) => "and slightly dimming",
        }
    }
}

pub struct MomentumCalculator {
    dead_band: f64,
    steady_threshold: f64,
    rapid_threshold: f64,
}

impl MomentumCalculator {
    pub fn new(dead_band: f64, steady_threshold: f64, rapid_threshold: f64) -> Self {
        Self {
            dead_band,
            steady_threshold,
            rapid_threshold,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(0.05, 0.1, 0.2)
    }

    /// Compare two signals; a missing previous signal counts as neutral (0.5)
    pub fn compare<C, P>(&self, current: &C, previous: Option<&P>) -> MomentumResult
    where
        C: SentimentSignal + ?Sized,
        P: SentimentSignal + ?Sized,
    {
        let previous = previous.map_or(NEUTRAL_SENTIMENT, |p| p.sentiment_score());
        self.from_scores(current.sentiment_score(), previous)
    }

    pub fn from_scores(&self, current: f64, previous: f64) -> MomentumResult {
        let change = current - previous;
        let magnitude = change.abs();

        if magnitude < self.dead_band {
            return MomentumResult {
                change,
                direction: Direction::Flat,
                tier: MomentumTier::Steady,
                icon: MomentumIcon::FlatArrow,
            };
        }

        let (direction, icon) = if change > 0.0 {
            (Direction::Up, MomentumIcon::UpArrow)
        } else {
            (Direction::Down, MomentumIcon::DownArrow)
        };

        let tier = if magnitude > self.rapid_threshold {
            MomentumTier::Rapid
        } else if magnitude > self.steady_threshold {
            MomentumTier::SteadyTrend
        } else {
            MomentumTier::Gentle
        };

        MomentumResult {
            change,
            direction,
            tier,
            icon,
        }
    }
}

impl Default for MomentumCalculator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dead_band_is_flat() {
        let calculator = MomentumCalculator::with_defaults();

        for (current, previous) in [(0.3, 0.3), (0.34, 0.3), (0.26, 0.3), (0.549, 0.5)] {
            let result = calculator.from_scores(current, previous);
            assert_eq!(result.direction, Direction::Flat, "{} vs {}", current, previous);
            assert_eq!(result.tier, MomentumTier::Steady);
            assert_eq!(result.icon, MomentumIcon::FlatArrow);
            assert_eq!(result.phrase(), "and steady");
        }
    }

    #[test]
    fn test_upward_tiers() {
        let calculator = MomentumCalculator::with_defaults();

        let gentle = calculator.from_scores(0.08, 0.0);
        assert_eq!(gentle.direction, Direction::Up);
        assert_eq!(gentle.tier, MomentumTier::Gentle);
        assert_eq!(gentle.phrase(), "and gently brightening");

        let steady = calculator.from_scores(0.15, 0.0);
        assert_eq!(steady.tier, MomentumTier::SteadyTrend);
        assert_eq!(steady.phrase(), "and brightening");

        let rapid = calculator.from_scores(0.5, 0.0);
        assert_eq!(rapid.tier, MomentumTier::Rapid);
        assert_eq!(rapid.icon.glyph(), "↗️");
        assert_eq!(rapid.phrase(), "and rapidly brightening");
    }

    #[test]
    fn test_downward_tiers() {
        let calculator = MomentumCalculator::with_defaults();

        let gentle = calculator.from_scores(-0.08, 0.0);
        assert_eq!(gentle.direction, Direction::Down);
        assert_eq!(gentle.phrase(), "and slightly dimming");

        assert_eq!(calculator.from_scores(-0.15, 0.0).phrase(), "and darkening");

        let rapid = calculator.from_scores(-0.3, 0.0);
        assert_eq!(rapid.phrase(), "and rapidly darkening");
        assert_eq!(rapid.icon, MomentumIcon::DownArrow);
        assert!((rapid.change + 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_missing_previous_defaults_to_neutral() {
        let calculator = MomentumCalculator::with_defaults();

        let result = calculator.compare::<f64, f64>(&0.8, None);
        assert!((result.change - 0.3).abs() < 1e-12);
        assert_eq!(result.tier, MomentumTier::Rapid);
    }

    #[test]
    fn test_compare_region_signals() {
        let calculator = MomentumCalculator::with_defaults();
        let mut previous = RegionSignal::neutral_default();
        previous.sentiment_score = 0.05;
        let mut current = RegionSignal::neutral_default();
        current.sentiment_score = -0.1;

        let result = calculator.compare(&current, Some(&previous));
        assert_eq!(result.direction, Direction::Down);
        assert_eq!(result.tier, MomentumTier::SteadyTrend);
    }

    #[test]
    fn test_icon_codes_match_serialized_names() {
        for icon in [MomentumIcon::FlatArrow, MomentumIcon::UpArrow, MomentumIcon::DownArrow] {
            let json = serde_json::to_string(&icon).unwrap();
            assert_eq!(json, format!("\"{}\"", icon.code()));
        }
        assert_eq!(MomentumCalculator::with_defaults().from_scores(0.5, 0.5).icon.code(), "flat_arrow");
    }

    #[test]
    fn test_tier_serializes_kebab_case() {
        let json = serde_json::to_string(&MomentumTier::SteadyTrend).unwrap();
        assert_eq!(json, "\"steady-trend\"");
    }
}
