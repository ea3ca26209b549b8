#![allow(dead_code)]

use std::time::Duration;

use bevy_ecs::{entity::Entity, query::With};
use glam::Vec2;
use runner::{
    config::RunnerConfig,
    constants::LOOP_TIME,
    events::{GameEvent, PresentationEvent},
    game::Game,
    systems::{GameStage, Obstacle, ObstacleKind, PlayerControlled, SpawnPlan, Velocity, VerticalAnchor},
};

/// A frame length that divides both the score and spawn intervals.
pub const EVEN_FRAME: Duration = Duration::from_millis(10);

pub const SEED: u64 = 0x5EED;

pub fn create_test_game() -> Game {
    Game::with_seed(RunnerConfig::default(), SEED).unwrap()
}

pub fn run_frames(game: &mut Game, frames: u32, dt: Duration) {
    for _ in 0..frames {
        game.tick(dt);
    }
}

/// Triggers the start zone and ticks until the reveal finishes.
///
/// Returns the number of frames the reveal took.
pub fn start_run(game: &mut Game) -> u32 {
    game.handle(GameEvent::StartZoneEntered);

    let mut frames = 0;
    while game.stage() != GameStage::Running {
        game.tick(LOOP_TIME);
        frames += 1;
        assert!(frames < 1_000, "reveal never finished");
    }
    frames
}

/// A seeded game that has finished its reveal, with all requests drained.
pub fn running_game() -> Game {
    let mut game = create_test_game();
    start_run(&mut game);
    game.drain_audio();
    game.drain_presentation();
    game
}

pub fn ground_obstacle_at(x: f32) -> SpawnPlan {
    SpawnPlan {
        obstacle: Obstacle {
            kind: ObstacleKind::Ground { variant: 1 },
            anchor: VerticalAnchor::GroundLevel,
        },
        x,
    }
}

/// Places an obstacle and reports the player touching it.
pub fn collide(game: &mut Game) -> Entity {
    let entity = game.insert_obstacle(ground_obstacle_at(10.0));
    game.handle(GameEvent::ObstacleCollision(entity));
    entity
}

pub fn obstacle_exists(game: &mut Game, entity: Entity) -> bool {
    game.obstacles().iter().any(|view| view.entity == entity)
}

pub fn count_spawned(events: &[PresentationEvent]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, PresentationEvent::ObstacleSpawned { .. }))
        .count()
}

pub fn set_player_velocity(game: &mut Game, velocity: Vec2) {
    let mut query = game.world.query_filtered::<&mut Velocity, With<PlayerControlled>>();
    for mut current in query.iter_mut(&mut game.world) {
        current.0 = velocity;
    }
}
