//! Timed obstacle creation.
//!
//! Every `spawn_interval` of running time exactly one obstacle is created just
//! past the right edge. The kind is a uniform draw over all configured
//! variants, so flying hazards appear in proportion to their variant count.

use bevy_ecs::{
    event::EventWriter,
    system::{Commands, Res, ResMut},
};
use rand::Rng;
use tracing::trace;

use crate::config::RunnerConfig;
use crate::events::{Animation, PresentationEvent};
use crate::systems::{DeltaTime, Obstacle, ObstacleBundle, ObstacleKind, RunState, SpawnRng, VerticalAnchor};

/// The outcome of one spawn draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPlan {
    pub obstacle: Obstacle,
    /// Leading edge of the new obstacle; always `viewport.x + gap`.
    pub x: f32,
}

/// Draws the kind, gap and altitude band of the next obstacle.
///
/// A draw in `1..=ground_variants` selects that ground variant; anything above
/// selects a flying obstacle in one of the two altitude bands.
pub fn roll<R: Rng>(config: &RunnerConfig, rng: &mut R) -> SpawnPlan {
    let draw = rng.random_range(1..=config.total_variants());
    let gap = rng.random_range(config.min_gap..=config.max_gap);
    let x = config.viewport.x + gap as f32;

    let obstacle = if draw > config.ground_variants {
        let anchor = if rng.random_bool(0.5) {
            VerticalAnchor::Low
        } else {
            VerticalAnchor::High
        };
        Obstacle {
            kind: ObstacleKind::Flying,
            anchor,
        }
    } else {
        Obstacle {
            kind: ObstacleKind::Ground { variant: draw },
            anchor: VerticalAnchor::GroundLevel,
        }
    };

    SpawnPlan { obstacle, x }
}

/// Spawns one obstacle each time the spawn timer reaches the interval.
///
/// Time left over when the interval is reached is dropped.
pub fn spawn_system(
    mut commands: Commands,
    dt: Res<DeltaTime>,
    config: Res<RunnerConfig>,
    mut state: ResMut<RunState>,
    mut rng: ResMut<SpawnRng>,
    mut presentation_events: EventWriter<PresentationEvent>,
) {
    state.spawn_accumulator = state.spawn_accumulator.saturating_add(dt.0);
    if state.spawn_accumulator < config.spawn_interval {
        return;
    }
    state.spawn_accumulator = std::time::Duration::ZERO;

    let plan = roll(&config, &mut rng.0);
    let entity = commands.spawn(ObstacleBundle::new(&config, plan.obstacle, plan.x)).id();
    trace!(?entity, kind = ?plan.obstacle.kind, anchor = ?plan.obstacle.anchor, x = plan.x, "Spawned obstacle");

    presentation_events.write(PresentationEvent::ObstacleSpawned { entity });
    if plan.obstacle.kind.is_flying() {
        presentation_events.write(PresentationEvent::PlayAnimation {
            entity,
            animation: Animation::BirdFly,
        });
    }
}
