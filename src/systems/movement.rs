//! Per-frame scrolling of the world while a run is active.
//!
//! Obstacles and the ground share one scroll rate (`speed * speed_modifier`);
//! clouds drift at their own fixed rate so they never hint at game pace.

use bevy_ecs::{
    entity::Entity,
    query::With,
    system::{Commands, Query, Res, ResMut},
};
use smallvec::SmallVec;
use tracing::trace;

use crate::config::RunnerConfig;
use crate::systems::{Bounds, Decoration, Ground, Obstacle, Position, RunState};

/// Shifts every obstacle left by the shared scroll rate.
pub fn obstacle_movement_system(state: Res<RunState>, mut obstacles: Query<&mut Position, With<Obstacle>>) {
    let rate = state.scroll_rate();
    for mut position in obstacles.iter_mut() {
        position.0.x -= rate;
    }
}

/// Shifts every cloud left by the fixed drift rate.
pub fn decoration_movement_system(config: Res<RunnerConfig>, mut decorations: Query<&mut Position, With<Decoration>>) {
    for mut position in decorations.iter_mut() {
        position.0.x -= config.cloud_drift;
    }
}

/// Advances the ground texture offset, wrapping on the tile width.
pub fn ground_scroll_system(state: Res<RunState>, mut ground: ResMut<Ground>) {
    let offset = ground.tile_offset + state.scroll_rate();
    ground.tile_offset = offset.rem_euclid(ground.tile_width);
}

/// Despawns obstacles whose trailing edge has left the viewport.
///
/// Runs after movement; despawns are deferred so the remaining obstacles are
/// unaffected within the same pass.
pub fn obstacle_cull_system(mut commands: Commands, obstacles: Query<(Entity, &Position, &Bounds), With<Obstacle>>) {
    let expired: SmallVec<[Entity; 4]> = obstacles
        .iter()
        .filter(|(_, position, bounds)| position.0.x + bounds.width() < 0.0)
        .map(|(entity, _, _)| entity)
        .collect();

    for entity in expired {
        trace!(?entity, "Obstacle left the viewport, despawning");
        commands.entity(entity).despawn();
    }
}

/// Moves clouds that have left the viewport to just past the right edge.
///
/// The vertical position is kept, so the cloud layer is an endless loop.
pub fn decoration_recycle_system(
    config: Res<RunnerConfig>,
    mut decorations: Query<(&mut Position, &Bounds), With<Decoration>>,
) {
    for (mut position, bounds) in decorations.iter_mut() {
        if position.0.x + bounds.width() < 0.0 {
            position.0.x = config.viewport.x + config.cloud_wrap_offset;
        }
    }
}
