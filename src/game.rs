//! This module contains the play-loop state and its frame schedule.

use std::time::{Duration, Instant};

use bevy_ecs::entity::Entity;
use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::query::With;
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::system::Res;
use bevy_ecs::world::World;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::config::RunnerConfig;
use crate::error::GameResult;
use crate::events::{GameEvent, PresentationEvent};
use crate::formatter;
use crate::systems::{
    self, AudioEvent, Bounds, Decoration, DecorationBundle, DeltaTime, GameStage, Ground, HighScore, HudVisibility,
    Obstacle, ObstacleBundle, PlayerBundle, PlayerControlled, Position, RunState, ScoreDisplay, SpawnPlan, SpawnRng,
    StartTrigger, Velocity,
};

/// Frame phases, in execution order.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum GameplaySet {
    /// Converts running time into score and speed
    Score,
    /// Scrolls the world and removes what left it
    Advance,
    Spawn,
    /// Refreshes values shown by the HUD
    Display,
    /// Ground reveal before a run; last, so the finishing frame earns nothing
    Reveal,
}

/// A snapshot of one obstacle, for hosts doing their own collision checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleView {
    pub entity: Entity,
    pub obstacle: Obstacle,
    /// Bottom-left corner.
    pub position: Vec2,
    pub size: Vec2,
}

/// The play loop: an ECS `World` holding session state and the `Schedule` that advances it.
///
/// The host owns the frame clock, physics and rendering. It calls [`Game::tick`]
/// once per frame, reports overlaps and input through [`Game::handle`], and
/// drains audio and presentation requests after each call.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Builds a session with an entropy-seeded spawn generator.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Config` if the configuration cannot drive a run.
    pub fn new(config: RunnerConfig) -> GameResult<Game> {
        let rng = SmallRng::from_rng(&mut rand::rng());
        Self::build(config, rng)
    }

    /// Builds a session whose obstacle sequence is fully determined by `seed`.
    pub fn with_seed(config: RunnerConfig, seed: u64) -> GameResult<Game> {
        Self::build(config, SmallRng::seed_from_u64(seed))
    }

    fn build(config: RunnerConfig, rng: SmallRng) -> GameResult<Game> {
        info!("Starting play loop initialization");
        config.validate()?;

        debug!("Initializing ECS world and system schedule");
        let mut world = World::default();
        let mut schedule = Schedule::default();

        debug!("Setting up ECS event registry and observers");
        Self::setup_ecs(&mut world);

        debug!("Inserting resources into ECS world");
        Self::insert_resources(&mut world, &config, rng);

        debug!("Configuring system execution schedule");
        Self::configure_schedule(&mut schedule);

        debug!("Spawning player and clouds");
        world.spawn(PlayerBundle {
            player: PlayerControlled,
            position: Position(Vec2::new(0.0, config.viewport.y)),
            velocity: Velocity::default(),
        });
        for &position in &config.cloud_positions {
            world.spawn(DecorationBundle {
                decoration: Decoration,
                position: Position(position),
                bounds: Bounds(config.cloud_size),
            });
        }

        world.insert_resource(config);

        info!("Play loop initialization completed successfully");
        Ok(Game { world, schedule })
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<GameEvent>(world);
        EventRegistry::register_event::<AudioEvent>(world);
        EventRegistry::register_event::<PresentationEvent>(world);

        world.add_observer(systems::start_zone_observer);
        world.add_observer(systems::collision_observer);
        world.add_observer(systems::restart_observer);
    }

    fn insert_resources(world: &mut World, config: &RunnerConfig, rng: SmallRng) {
        world.insert_resource(RunState::new(config.base_speed));
        world.insert_resource(GameStage::Idle);
        world.insert_resource(Ground {
            width: config.initial_ground_width,
            height: config.ground_height,
            tile_offset: 0.0,
            tile_width: config.ground_tile_width,
        });
        world.insert_resource(StartTrigger {
            position: config.start_trigger_position,
        });
        world.insert_resource(HudVisibility::empty());
        world.insert_resource(ScoreDisplay(systems::format_score(0, config.score_digits)));
        world.insert_resource(HighScore::new(config.score_digits));
        world.insert_resource(DeltaTime::default());
        world.insert_resource(SpawnRng(rng));
    }

    fn configure_schedule(schedule: &mut Schedule) {
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);

        let is_running = |state: Res<RunState>| state.is_running;

        schedule
            .add_systems((
                systems::score_system.in_set(GameplaySet::Score),
                (
                    (
                        systems::obstacle_movement_system,
                        systems::decoration_movement_system,
                        systems::ground_scroll_system,
                    ),
                    (systems::obstacle_cull_system, systems::decoration_recycle_system),
                )
                    .chain()
                    .in_set(GameplaySet::Advance),
                systems::spawn_system.in_set(GameplaySet::Spawn),
                systems::score_display_system.in_set(GameplaySet::Display),
                systems::reveal_system.in_set(GameplaySet::Reveal),
            ))
            .configure_sets((
                GameplaySet::Score.run_if(is_running),
                GameplaySet::Advance.run_if(is_running),
                GameplaySet::Spawn.run_if(is_running),
                GameplaySet::Display.run_if(is_running),
                GameplaySet::Reveal.run_if(|stage: Res<GameStage>| stage.is_starting()),
            ))
            .configure_sets(
                (
                    GameplaySet::Score,
                    GameplaySet::Advance,
                    GameplaySet::Spawn,
                    GameplaySet::Display,
                    GameplaySet::Reveal,
                )
                    .chain(),
            );
    }

    /// Executes one frame of the play loop.
    ///
    /// `dt` is the host's elapsed frame time. Scrolling is per frame; score,
    /// spawning and the reveal accumulate `dt` against their intervals.
    pub fn tick(&mut self, dt: Duration) {
        self.world.insert_resource(DeltaTime(dt));

        let start = Instant::now();
        self.schedule.run(&mut self.world);
        let total = start.elapsed();

        let tick = formatter::increment_tick();
        let budget = dt.saturating_add(dt / 5);
        if !dt.is_zero() && total > budget {
            warn!(
                total = format!("{:.3?}", total),
                tick,
                budget = format!("{:.3?}", budget),
                "Frame took longer than expected"
            );
        }
    }

    /// Delivers a host-detected event to the lifecycle observers.
    ///
    /// Events that do not apply to the current stage are ignored.
    pub fn handle(&mut self, event: GameEvent) {
        self.world.trigger(event);
        self.world.flush();
    }

    /// Takes every sound request written since the last drain.
    pub fn drain_audio(&mut self) -> Vec<AudioEvent> {
        self.world.resource_mut::<Events<AudioEvent>>().drain().collect()
    }

    /// Takes every presentation request written since the last drain.
    pub fn drain_presentation(&mut self) -> Vec<PresentationEvent> {
        self.world.resource_mut::<Events<PresentationEvent>>().drain().collect()
    }

    /// Places an obstacle directly, bypassing the spawn timer.
    pub fn insert_obstacle(&mut self, plan: SpawnPlan) -> Entity {
        let bundle = ObstacleBundle::new(self.config(), plan.obstacle, plan.x);
        self.world.spawn(bundle).id()
    }

    pub fn config(&self) -> &RunnerConfig {
        self.world.resource::<RunnerConfig>()
    }

    pub fn stage(&self) -> GameStage {
        *self.world.resource::<GameStage>()
    }

    pub fn run_state(&self) -> &RunState {
        self.world.resource::<RunState>()
    }

    pub fn high_score(&self) -> &HighScore {
        self.world.resource::<HighScore>()
    }

    pub fn score_text(&self) -> &str {
        &self.world.resource::<ScoreDisplay>().0
    }

    pub fn hud(&self) -> HudVisibility {
        *self.world.resource::<HudVisibility>()
    }

    pub fn ground(&self) -> Ground {
        *self.world.resource::<Ground>()
    }

    pub fn start_trigger(&self) -> StartTrigger {
        *self.world.resource::<StartTrigger>()
    }

    /// All live obstacles, in no particular order.
    pub fn obstacles(&mut self) -> Vec<ObstacleView> {
        let mut query = self.world.query::<(Entity, &Obstacle, &Position, &Bounds)>();
        query
            .iter(&self.world)
            .map(|(entity, obstacle, position, bounds)| ObstacleView {
                entity,
                obstacle: *obstacle,
                position: position.0,
                size: bounds.0,
            })
            .collect()
    }

    /// Positions of all clouds.
    pub fn decorations(&mut self) -> Vec<Vec2> {
        let mut query = self.world.query_filtered::<&Position, With<Decoration>>();
        query.iter(&self.world).map(|position| position.0).collect()
    }

    pub fn player_position(&mut self) -> Option<Vec2> {
        let mut query = self.world.query_filtered::<&Position, With<PlayerControlled>>();
        query.single(&self.world).ok().map(|position| position.0)
    }

    pub fn player_velocity(&mut self) -> Option<Vec2> {
        let mut query = self.world.query_filtered::<&Velocity, With<PlayerControlled>>();
        query.single(&self.world).ok().map(|velocity| velocity.0)
    }

    /// Moves the player, as reported by the host's physics.
    pub fn set_player_position(&mut self, position: Vec2) {
        let mut query = self.world.query_filtered::<&mut Position, With<PlayerControlled>>();
        for mut current in query.iter_mut(&mut self.world) {
            current.0 = position;
        }
    }
}
