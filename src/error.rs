//! Centralized error types for the runner.
//!
//! Nothing in the per-frame loop is fallible; errors only surface when a game
//! is built from a configuration that cannot produce a playable run.

use std::time::Duration;

/// Main error type for the runner.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised by [`RunnerConfig::validate`](crate::config::RunnerConfig::validate).
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("At least one obstacle variant is required (ground: {ground}, flying: {flying})")]
    NoObstacleVariants { ground: u32, flying: u32 },

    #[error("Too many obstacle variants to draw from (ground: {ground}, flying: {flying})")]
    TooManyVariants { ground: u32, flying: u32 },

    #[error("Interval '{name}' must be non-zero, got {value:?}")]
    ZeroInterval { name: &'static str, value: Duration },

    #[error("Spawn gap range is inverted: {min} > {max}")]
    InvertedGapRange { min: u32, max: u32 },

    #[error("'{name}' must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("Score milestone must be non-zero")]
    ZeroMilestone,

    #[error("Score display needs at least one digit")]
    ZeroScoreDigits,
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
