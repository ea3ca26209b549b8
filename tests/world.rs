use std::time::Duration;

use glam::Vec2;
use pretty_assertions::assert_eq;
use runner::{
    config::RunnerConfig,
    constants::LOOP_TIME,
    events::{Animation, GameEvent, PresentationEvent},
    game::Game,
    systems::{ObstacleKind, VerticalAnchor},
};
use speculoos::prelude::*;

mod common;

#[test]
fn test_nothing_moves_while_idle() {
    let mut game = common::create_test_game();
    let clouds = game.decorations();
    let state = game.run_state().clone();
    let entity = game.insert_obstacle(common::ground_obstacle_at(500.0));

    common::run_frames(&mut game, 500, common::EVEN_FRAME);

    assert_eq!(game.run_state(), &state);
    assert_eq!(game.decorations(), clouds);
    assert_eq!(game.ground().tile_offset, 0.0);
    let obstacles = game.obstacles();
    assert_eq!(obstacles.len(), 1);
    assert_eq!(obstacles[0].entity, entity);
    assert_eq!(obstacles[0].position.x, 500.0);
    assert_that(&game.drain_presentation()).is_empty();
}

#[test]
fn test_nothing_moves_during_reveal() {
    let mut game = common::create_test_game();
    let clouds = game.decorations();
    let entity = game.insert_obstacle(common::ground_obstacle_at(500.0));
    game.handle(GameEvent::StartZoneEntered);
    game.drain_presentation();
    let state = game.run_state().clone();

    common::run_frames(&mut game, 20, LOOP_TIME);

    assert_that(&game.stage().is_starting()).is_true();
    assert_eq!(game.run_state(), &state);
    assert_eq!(game.decorations(), clouds);
    assert_eq!(game.ground().tile_offset, 0.0);
    let obstacles = game.obstacles();
    assert_eq!(obstacles.len(), 1);
    assert_eq!(obstacles[0].entity, entity);
    assert_eq!(obstacles[0].position.x, 500.0);
    assert_eq!(common::count_spawned(&game.drain_presentation()), 0);
}

#[test]
fn test_nothing_moves_after_game_over() {
    let mut game = common::running_game();
    common::run_frames(&mut game, 10, common::EVEN_FRAME);
    common::collide(&mut game);
    let obstacles = game.obstacles();
    let clouds = game.decorations();
    let offset = game.ground().tile_offset;
    let state = game.run_state().clone();

    common::run_frames(&mut game, 300, common::EVEN_FRAME);

    assert_eq!(game.obstacles().len(), obstacles.len());
    assert_eq!(game.decorations(), clouds);
    assert_eq!(game.ground().tile_offset, offset);
    assert_eq!(game.run_state(), &state);
}

#[test]
fn test_obstacles_scroll_at_game_speed() {
    let mut game = common::running_game();
    let entity = game.insert_obstacle(common::ground_obstacle_at(800.0));

    common::run_frames(&mut game, 20, common::EVEN_FRAME);

    let view = game
        .obstacles()
        .into_iter()
        .find(|view| view.entity == entity)
        .unwrap();
    assert_eq!(view.position.x, 700.0);
}

#[test]
fn test_obstacle_culled_when_trailing_edge_leaves() {
    // Trailing edge at 1037 + 25; culled once x + 25 < 0, after ceil(1062 / 5) frames.
    let mut game = common::running_game();
    let entity = game.insert_obstacle(common::ground_obstacle_at(1037.0));

    common::run_frames(&mut game, 212, common::EVEN_FRAME);
    assert_that(&common::obstacle_exists(&mut game, entity)).is_true();

    common::run_frames(&mut game, 1, common::EVEN_FRAME);
    assert_that(&common::obstacle_exists(&mut game, entity)).is_false();
}

#[test]
fn test_cloud_wraps_past_right_edge() {
    // The first cloud starts at (500, 170) and drifts 0.5 per frame; it leaves
    // once x + 46 < 0, on frame 1093.
    let mut game = common::running_game();
    common::run_frames(&mut game, 1092, common::EVEN_FRAME);
    assert_that(&game.decorations().contains(&Vec2::new(-46.0, 170.0))).is_true();

    common::run_frames(&mut game, 1, common::EVEN_FRAME);
    let clouds = game.decorations();
    assert_that(&clouds.contains(&Vec2::new(1030.0, 170.0))).is_true();
    assert_eq!(clouds.len(), 3);
}

#[test]
fn test_clouds_ignore_game_speed() {
    let mut game = common::running_game();
    common::run_frames(&mut game, 1000, common::EVEN_FRAME);
    assert_that(&(game.run_state().speed_modifier > 1.0)).is_true();

    let before = game.decorations();
    common::run_frames(&mut game, 1, common::EVEN_FRAME);
    let after = game.decorations();

    for (old, new) in before.iter().zip(&after) {
        assert_that(&(old.x - new.x - 0.5).abs()).is_less_than(1e-3);
        assert_eq!(old.y, new.y);
    }
}

#[test]
fn test_ground_offset_wraps_on_tile_width() {
    let mut game = common::running_game();
    common::run_frames(&mut game, 100, common::EVEN_FRAME);

    assert_eq!(game.ground().tile_offset, 60.0);
    assert_eq!(game.ground().width, 1000.0);
}

#[test]
fn test_spawns_once_per_interval() {
    let mut game = common::running_game();

    common::run_frames(&mut game, 149, common::EVEN_FRAME);
    assert_eq!(common::count_spawned(&game.drain_presentation()), 0);

    common::run_frames(&mut game, 1, common::EVEN_FRAME);
    assert_eq!(common::count_spawned(&game.drain_presentation()), 1);

    common::run_frames(&mut game, 2850, common::EVEN_FRAME);
    assert_eq!(common::count_spawned(&game.drain_presentation()), 19);
}

#[test]
fn test_spawned_obstacles_are_in_range() {
    let mut game = common::running_game();
    let config = game.config().clone();

    for _ in 0..40 {
        common::run_frames(&mut game, 1, Duration::from_millis(1500));
        let events = game.drain_presentation();
        let spawned: Vec<_> = events
            .iter()
            .filter_map(|event| match event {
                PresentationEvent::ObstacleSpawned { entity } => Some(*entity),
                _ => None,
            })
            .collect();
        assert_eq!(spawned.len(), 1);

        let view = game
            .obstacles()
            .into_iter()
            .find(|view| view.entity == spawned[0])
            .unwrap();
        let gap = view.position.x - config.viewport.x;
        assert_that(&(gap >= config.min_gap as f32 && gap <= config.max_gap as f32)).is_true();

        match view.obstacle.kind {
            ObstacleKind::Ground { variant } => {
                assert_that(&(1..=config.ground_variants).contains(&variant)).is_true();
                assert_eq!(view.obstacle.anchor, VerticalAnchor::GroundLevel);
                assert_eq!(view.position.y, config.viewport.y);
            }
            ObstacleKind::Flying => {
                assert_that(&matches!(view.obstacle.anchor, VerticalAnchor::Low | VerticalAnchor::High)).is_true();
                let animated = events.contains(&PresentationEvent::PlayAnimation {
                    entity: view.entity,
                    animation: Animation::BirdFly,
                });
                assert_that(&animated).is_true();
            }
        }
    }
}

#[test]
fn test_flying_only_config_spawns_birds() {
    let config = RunnerConfig {
        ground_variants: 0,
        ..Default::default()
    };
    let mut game = Game::with_seed(config, common::SEED).unwrap();
    common::start_run(&mut game);

    common::run_frames(&mut game, 10, Duration::from_millis(1500));

    let obstacles = game.obstacles();
    assert_that(&obstacles).is_not_empty();
    for view in obstacles {
        assert_that(&view.obstacle.kind.is_flying()).is_true();
    }
}

#[test]
fn test_same_seed_same_obstacles() {
    let spawn_sequence = |seed: u64| {
        let mut game = Game::with_seed(RunnerConfig::default(), seed).unwrap();
        common::start_run(&mut game);
        common::run_frames(&mut game, 8, Duration::from_millis(1500));

        let mut obstacles: Vec<_> = game
            .obstacles()
            .into_iter()
            .map(|view| (view.obstacle, view.position))
            .collect();
        obstacles.sort_by(|a, b| a.1.x.total_cmp(&b.1.x));
        obstacles
    };

    assert_eq!(spawn_sequence(42), spawn_sequence(42));
}
