//! Tunable parameters of a play session.
//!
//! Defaults come from [`crate::constants`]. A config is validated once when a
//! [`Game`](crate::game::Game) is built; the frame loop never re-checks it.

use std::time::Duration;

use bevy_ecs::resource::Resource;
use glam::Vec2;

use crate::constants::{self, clouds, mechanics, scoring, spawning, startup};
use crate::error::ConfigError;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RunnerConfig {
    /// Size of the visible play area. The ground line sits at `viewport.y`.
    pub viewport: Vec2,

    /// Base scroll distance per frame.
    pub base_speed: f32,
    /// Increase of the speed modifier at each score milestone.
    pub speed_step: f32,
    pub speed_milestone: u32,
    pub score_interval: Duration,
    pub score_digits: usize,
    pub high_score_prefix: String,
    pub flash_repeats: u32,
    pub flash_half_period: Duration,

    pub spawn_interval: Duration,
    pub min_gap: u32,
    pub max_gap: u32,
    pub ground_variants: u32,
    pub flying_variants: u32,
    /// Height above the ground line of the low flying band.
    pub low_altitude: f32,
    /// Height above the ground line of the high flying band.
    pub high_altitude: f32,
    pub ground_obstacle_size: Vec2,
    pub flying_obstacle_size: Vec2,

    pub cloud_size: Vec2,
    pub cloud_drift: f32,
    pub cloud_wrap_offset: f32,
    pub cloud_positions: Vec<Vec2>,

    pub ground_tile_width: f32,
    pub ground_height: f32,
    pub initial_ground_width: f32,
    pub start_trigger_position: Vec2,

    pub reveal_period: Duration,
    pub reveal_increment: f32,
    pub reveal_run_velocity: f32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        let viewport = constants::VIEWPORT_SIZE;
        Self {
            viewport,

            base_speed: mechanics::BASE_SPEED,
            speed_step: scoring::SPEED_STEP,
            speed_milestone: scoring::SPEED_MILESTONE,
            score_interval: scoring::SCORE_INTERVAL,
            score_digits: scoring::SCORE_DIGITS,
            high_score_prefix: scoring::HIGH_SCORE_PREFIX.to_string(),
            flash_repeats: scoring::FLASH_REPEATS,
            flash_half_period: scoring::FLASH_HALF_PERIOD,

            spawn_interval: spawning::SPAWN_INTERVAL,
            min_gap: spawning::MIN_GAP,
            max_gap: spawning::MAX_GAP,
            ground_variants: spawning::GROUND_VARIANTS,
            flying_variants: spawning::FLYING_VARIANTS,
            low_altitude: spawning::LOW_ALTITUDE,
            high_altitude: spawning::HIGH_ALTITUDE,
            ground_obstacle_size: spawning::GROUND_OBSTACLE_SIZE,
            flying_obstacle_size: spawning::FLYING_OBSTACLE_SIZE,

            cloud_size: clouds::CLOUD_SIZE,
            cloud_drift: mechanics::CLOUD_DRIFT,
            cloud_wrap_offset: mechanics::CLOUD_WRAP_OFFSET,
            cloud_positions: clouds::seed_positions(viewport),

            ground_tile_width: mechanics::GROUND_TILE_WIDTH,
            ground_height: mechanics::GROUND_HEIGHT,
            initial_ground_width: startup::INITIAL_GROUND_WIDTH,
            start_trigger_position: startup::START_TRIGGER_POSITION,

            reveal_period: startup::REVEAL_PERIOD,
            reveal_increment: startup::REVEAL_INCREMENT,
            reveal_run_velocity: startup::REVEAL_RUN_VELOCITY,
        }
    }
}

impl RunnerConfig {
    /// Total number of obstacle variants a spawn draw chooses from.
    ///
    /// Saturates at `u32::MAX`; [`validate`](Self::validate) rejects such counts.
    pub fn total_variants(&self) -> u32 {
        self.ground_variants.saturating_add(self.flying_variants)
    }

    /// Rejects configurations that cannot drive a run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.ground_variants.checked_add(self.flying_variants) {
            Some(0) => {
                return Err(ConfigError::NoObstacleVariants {
                    ground: self.ground_variants,
                    flying: self.flying_variants,
                })
            }
            None => {
                return Err(ConfigError::TooManyVariants {
                    ground: self.ground_variants,
                    flying: self.flying_variants,
                })
            }
            Some(_) => {}
        }

        for (name, value) in [
            ("score_interval", self.score_interval),
            ("spawn_interval", self.spawn_interval),
            ("reveal_period", self.reveal_period),
        ] {
            if value.is_zero() {
                return Err(ConfigError::ZeroInterval { name, value });
            }
        }

        if self.min_gap > self.max_gap {
            return Err(ConfigError::InvertedGapRange {
                min: self.min_gap,
                max: self.max_gap,
            });
        }

        for (name, value) in [
            ("viewport.x", self.viewport.x),
            ("viewport.y", self.viewport.y),
            ("base_speed", self.base_speed),
            ("speed_step", self.speed_step),
            ("reveal_increment", self.reveal_increment),
            ("ground_tile_width", self.ground_tile_width),
            ("cloud_drift", self.cloud_drift),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NotPositive { name, value });
            }
        }

        if self.speed_milestone == 0 {
            return Err(ConfigError::ZeroMilestone);
        }
        if self.score_digits == 0 {
            return Err(ConfigError::ZeroScoreDigits);
        }

        Ok(())
    }
}
