//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::Vec2;

/// Duration of one simulated frame at 60 FPS.
pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of the visible play area, in distance units.
pub const VIEWPORT_SIZE: Vec2 = Vec2::new(1000.0, 340.0);

/// Scoring and difficulty progression.
pub mod scoring {
    use std::time::Duration;

    /// Accumulated running time needed to earn one point.
    pub const SCORE_INTERVAL: Duration = Duration::from_millis(100);
    /// Every positive multiple of this score raises the speed modifier.
    pub const SPEED_MILESTONE: u32 = 100;
    /// How much the speed modifier grows at each milestone.
    pub const SPEED_STEP: f32 = 0.2;
    /// Width of the zero-padded score display.
    pub const SCORE_DIGITS: usize = 5;
    /// Prefix of the committed high score text.
    pub const HIGH_SCORE_PREFIX: &str = "HI ";
    /// Blink count for the milestone cue on the score display.
    pub const FLASH_REPEATS: u32 = 3;
    /// Half period of a single score blink.
    pub const FLASH_HALF_PERIOD: Duration = Duration::from_millis(100);
}

/// World scrolling.
pub mod mechanics {
    /// Base scroll distance per frame, before the speed modifier is applied.
    pub const BASE_SPEED: f32 = 5.0;
    /// Cloud drift per frame; independent of game speed.
    pub const CLOUD_DRIFT: f32 = 0.5;
    /// Distance past the right edge where a recycled cloud reappears.
    pub const CLOUD_WRAP_OFFSET: f32 = 30.0;
    /// Width of one ground texture tile; the scroll offset wraps on it.
    pub const GROUND_TILE_WIDTH: f32 = 88.0;
    pub const GROUND_HEIGHT: f32 = 26.0;
}

/// Obstacle spawning.
pub mod spawning {
    use std::time::Duration;

    use glam::Vec2;

    pub const SPAWN_INTERVAL: Duration = Duration::from_millis(1500);
    /// Inclusive range of the extra distance past the right edge for new obstacles.
    pub const MIN_GAP: u32 = 150;
    pub const MAX_GAP: u32 = 300;
    /// Number of ground obstacle sprite variants.
    pub const GROUND_VARIANTS: u32 = 6;
    /// Number of flying obstacle sprite variants.
    pub const FLYING_VARIANTS: u32 = 1;
    /// Height above the ground line of the low and high flying bands.
    pub const LOW_ALTITUDE: f32 = 20.0;
    pub const HIGH_ALTITUDE: f32 = 70.0;
    pub const GROUND_OBSTACLE_SIZE: Vec2 = Vec2::new(25.0, 50.0);
    pub const FLYING_OBSTACLE_SIZE: Vec2 = Vec2::new(46.0, 40.0);
}

/// The intro sequence that widens the ground strip before a run begins.
pub mod startup {
    use std::time::Duration;

    use glam::Vec2;

    /// Fixed period of the reveal tick, independent of frame rate.
    pub const REVEAL_PERIOD: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);
    /// Ground width added per reveal tick.
    pub const REVEAL_INCREMENT: f32 = 34.0;
    /// Forward velocity given to the player while the ground is revealed.
    pub const REVEAL_RUN_VELOCITY: f32 = 80.0;
    /// Visible ground width before the reveal starts.
    pub const INITIAL_GROUND_WIDTH: f32 = 88.0;
    /// Base of the start trigger; above the launch pad, so the player has to jump into it.
    pub const START_TRIGGER_POSITION: Vec2 = Vec2::new(0.0, 10.0);
}

/// Decorative clouds.
pub mod clouds {
    use glam::Vec2;

    pub const CLOUD_SIZE: Vec2 = Vec2::new(46.0, 14.0);

    /// Initial cloud positions for a viewport of the given size.
    pub fn seed_positions(viewport: Vec2) -> Vec<Vec2> {
        vec![
            Vec2::new(viewport.x / 2.0, 170.0),
            Vec2::new(viewport.x - 80.0, 80.0),
            Vec2::new(viewport.x / 1.3, 100.0),
        ]
    }
}

/// Where the start trigger is parked once it has fired.
pub const OFFSTAGE: Vec2 = Vec2::new(9999.0, 9999.0);
