use std::time::Duration;

use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use glam::Vec2;
use rand::rngs::SmallRng;

use crate::config::RunnerConfig;

/// A tag component for the player-controlled runner.
#[derive(Default, Component)]
pub struct PlayerControlled;

/// World position of an entity's bottom-left corner.
///
/// Everything the play loop places is anchored at its base, so `x` is the
/// leading (left) edge and `x + width` the trailing edge.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec2);

/// Velocity requested of the physics service.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity(pub Vec2);

/// Extent of an entity's sprite, supplied by configuration.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Bounds(pub Vec2);

impl Bounds {
    pub fn width(&self) -> f32 {
        self.0.x
    }
}

/// Marks an entity that is never pushed by physics responses.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Immovable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    /// A ground hazard; `variant` is in `1..=ground_variants`.
    Ground { variant: u32 },
    Flying,
}

impl ObstacleKind {
    pub fn is_flying(&self) -> bool {
        matches!(self, Self::Flying)
    }
}

/// The line an obstacle's base sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalAnchor {
    GroundLevel,
    Low,
    High,
}

impl VerticalAnchor {
    /// Returns the y coordinate of the anchor line for the given configuration.
    pub fn baseline(&self, config: &RunnerConfig) -> f32 {
        match self {
            Self::GroundLevel => config.viewport.y,
            Self::Low => config.viewport.y - config.low_altitude,
            Self::High => config.viewport.y - config.high_altitude,
        }
    }
}

/// A hazard scrolling toward the player.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub anchor: VerticalAnchor,
}

/// A cosmetic cloud, recycled to the right edge instead of being despawned.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Decoration;

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub position: Position,
    pub velocity: Velocity,
}

#[derive(Bundle)]
pub struct ObstacleBundle {
    pub obstacle: Obstacle,
    pub position: Position,
    pub bounds: Bounds,
    pub immovable: Immovable,
}

impl ObstacleBundle {
    /// Builds an obstacle with its leading edge at `x` and its base on the anchor line.
    pub fn new(config: &RunnerConfig, obstacle: Obstacle, x: f32) -> Self {
        let size = if obstacle.kind.is_flying() {
            config.flying_obstacle_size
        } else {
            config.ground_obstacle_size
        };

        Self {
            obstacle,
            position: Position(Vec2::new(x, obstacle.anchor.baseline(config))),
            bounds: Bounds(size),
            immovable: Immovable,
        }
    }
}

#[derive(Bundle)]
pub struct DecorationBundle {
    pub decoration: Decoration,
    pub position: Position,
    pub bounds: Bounds,
}

/// The mutable counters of one play session.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RunState {
    pub is_running: bool,
    pub score: u32,
    /// Base scroll distance per frame. Never reset.
    pub speed: f32,
    /// Multiplier on `speed`, raised at each score milestone.
    pub speed_modifier: f32,
    pub score_accumulator: Duration,
    pub spawn_accumulator: Duration,
}

impl RunState {
    pub fn new(speed: f32) -> Self {
        Self {
            is_running: false,
            score: 0,
            speed,
            speed_modifier: 1.0,
            score_accumulator: Duration::ZERO,
            spawn_accumulator: Duration::ZERO,
        }
    }

    /// Distance obstacles and the ground travel per frame.
    pub fn scroll_rate(&self) -> f32 {
        self.speed * self.speed_modifier
    }

    /// Returns score, timers and modifier to their initial values.
    pub fn reset_progress(&mut self) {
        self.score = 0;
        self.speed_modifier = 1.0;
        self.score_accumulator = Duration::ZERO;
        self.spawn_accumulator = Duration::ZERO;
    }
}

/// Elapsed time of the frame being simulated.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct DeltaTime(pub Duration);

/// The scrolling ground strip.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Ground {
    /// Visible width; grows during the reveal and then equals the viewport width.
    pub width: f32,
    pub height: f32,
    /// Horizontal texture offset, always within `0..tile_width`.
    pub tile_offset: f32,
    pub tile_width: f32,
}

/// The region whose overlap with the player starts the run.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct StartTrigger {
    pub position: Vec2,
}

/// Random source for obstacle spawning.
#[derive(Resource)]
pub struct SpawnRng(pub SmallRng);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_state_reset_keeps_speed() {
        let mut state = RunState::new(5.0);
        state.is_running = true;
        state.score = 250;
        state.speed_modifier = 1.4;
        state.score_accumulator = Duration::from_millis(40);
        state.spawn_accumulator = Duration::from_millis(900);

        state.reset_progress();

        assert_eq!(state.score, 0);
        assert_eq!(state.speed_modifier, 1.0);
        assert_eq!(state.score_accumulator, Duration::ZERO);
        assert_eq!(state.spawn_accumulator, Duration::ZERO);
        assert_eq!(state.speed, 5.0);
        assert!(state.is_running);
    }

    #[test]
    fn test_scroll_rate() {
        let mut state = RunState::new(5.0);
        assert_eq!(state.scroll_rate(), 5.0);
        state.speed_modifier = 1.2;
        assert!((state.scroll_rate() - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_anchor_baselines() {
        let config = RunnerConfig::default();
        assert_eq!(VerticalAnchor::GroundLevel.baseline(&config), config.viewport.y);
        assert_eq!(VerticalAnchor::Low.baseline(&config), config.viewport.y - 20.0);
        assert_eq!(VerticalAnchor::High.baseline(&config), config.viewport.y - 70.0);
    }

    #[test]
    fn test_obstacle_bundle_sizes() {
        let config = RunnerConfig::default();
        let ground = ObstacleBundle::new(
            &config,
            Obstacle {
                kind: ObstacleKind::Ground { variant: 2 },
                anchor: VerticalAnchor::GroundLevel,
            },
            1200.0,
        );
        assert_eq!(ground.bounds.0, config.ground_obstacle_size);
        assert_eq!(ground.position.0, Vec2::new(1200.0, config.viewport.y));

        let flying = ObstacleBundle::new(
            &config,
            Obstacle {
                kind: ObstacleKind::Flying,
                anchor: VerticalAnchor::High,
            },
            1150.0,
        );
        assert_eq!(flying.bounds.0, config.flying_obstacle_size);
        assert_eq!(flying.position.0.y, config.viewport.y - config.high_altitude);
    }
}
