//! Session lifecycle: idle, ground reveal, running and game over.
//!
//! Transitions out of `Idle`, `Running` and `GameOver` are driven by
//! [`GameEvent`]s through observers; the reveal advances on its own fixed clock
//! inside [`reveal_system`].

use std::time::Duration;

use bevy_ecs::{
    entity::Entity,
    event::EventWriter,
    observer::Trigger,
    query::With,
    resource::Resource,
    system::{Commands, Query, Res, ResMut},
};
use tracing::{debug, info};

use crate::config::RunnerConfig;
use crate::constants::OFFSTAGE;
use crate::events::{Animation, GameEvent, PresentationEvent};
use crate::systems::{
    AudioEvent, DeltaTime, Ground, HighScore, HudVisibility, Obstacle, PlayerControlled, RunState, ScoreDisplay, Sound,
    StartTrigger, Velocity,
};

/// A resource to track the overall stage of the session.
#[derive(Resource, Debug, PartialEq, Clone, Copy, Default)]
pub enum GameStage {
    /// Waiting for the player to enter the start zone.
    #[default]
    Idle,
    /// The ground strip is widening toward the viewport width.
    Starting(RevealSequence),
    Running,
    GameOver,
}

impl GameStage {
    pub fn is_starting(&self) -> bool {
        matches!(self, Self::Starting(_))
    }
}

/// Result of a single reveal tick.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RevealStep {
    Continue,
    Finished,
}

/// Progress of the ground reveal.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct RevealSequence {
    pub ground_width: f32,
    /// Reveal ticks taken so far.
    pub ticks: u32,
    /// Frame time not yet converted into reveal ticks.
    pub accumulator: Duration,
}

impl RevealSequence {
    pub fn new(ground_width: f32) -> Self {
        Self {
            ground_width,
            ticks: 0,
            accumulator: Duration::ZERO,
        }
    }

    /// Widens the ground by one increment, clamping to `target`.
    pub fn step(&mut self, increment: f32, target: f32) -> RevealStep {
        self.ticks += 1;
        self.ground_width += increment;
        if self.ground_width >= target {
            self.ground_width = target;
            RevealStep::Finished
        } else {
            RevealStep::Continue
        }
    }

    /// Feeds frame time into the reveal clock and takes every tick that is due.
    ///
    /// Stops at the tick that finishes the reveal; any remaining time is discarded.
    pub fn advance(&mut self, dt: Duration, period: Duration, increment: f32, target: f32) -> RevealStep {
        self.accumulator = self.accumulator.saturating_add(dt);
        while self.accumulator >= period {
            self.accumulator -= period;
            if self.step(increment, target) == RevealStep::Finished {
                self.accumulator = Duration::ZERO;
                return RevealStep::Finished;
            }
        }
        RevealStep::Continue
    }
}

/// Advances the ground reveal and starts the run once it covers the viewport.
pub fn reveal_system(
    dt: Res<DeltaTime>,
    config: Res<RunnerConfig>,
    mut stage: ResMut<GameStage>,
    mut state: ResMut<RunState>,
    mut ground: ResMut<Ground>,
    mut hud: ResMut<HudVisibility>,
    mut player_query: Query<&mut Velocity, With<PlayerControlled>>,
) {
    let GameStage::Starting(mut reveal) = *stage else {
        return;
    };

    let ticks_before = reveal.ticks;
    let step = reveal.advance(
        dt.0,
        config.reveal_period,
        config.reveal_increment,
        config.viewport.x,
    );
    ground.width = reveal.ground_width;

    if reveal.ticks > ticks_before {
        for mut velocity in player_query.iter_mut() {
            velocity.0.x = config.reveal_run_velocity;
        }
    }

    match step {
        RevealStep::Continue => *stage = GameStage::Starting(reveal),
        RevealStep::Finished => {
            for mut velocity in player_query.iter_mut() {
                velocity.0.x = 0.0;
            }
            hud.insert(HudVisibility::CLOUDS | HudVisibility::SCORE);
            state.is_running = true;
            *stage = GameStage::Running;
            info!(ticks = reveal.ticks, ground_width = ground.width, "Ground revealed, run started");
        }
    }
}

/// Starts the ground reveal the first time the player reaches the start zone.
pub fn start_zone_observer(
    trigger: Trigger<GameEvent>,
    config: Res<RunnerConfig>,
    ground: Res<Ground>,
    mut stage: ResMut<GameStage>,
    mut start_trigger: ResMut<StartTrigger>,
    player_query: Query<Entity, With<PlayerControlled>>,
    mut presentation_events: EventWriter<PresentationEvent>,
) {
    if *trigger.event() != GameEvent::StartZoneEntered {
        return;
    }
    if *stage != GameStage::Idle {
        debug!(stage = ?*stage, "Start zone entered outside of idle stage, ignoring");
        return;
    }

    start_trigger.position = OFFSTAGE;
    *stage = GameStage::Starting(RevealSequence::new(ground.width));

    for entity in player_query.iter() {
        presentation_events.write(PresentationEvent::PlayAnimation {
            entity,
            animation: Animation::PlayerRun,
        });
    }
    info!(
        ground_width = ground.width,
        target = config.viewport.x,
        "Player entered start zone, revealing ground"
    );
}

/// Ends the run when the player touches an obstacle.
#[allow(clippy::too_many_arguments)]
pub fn collision_observer(
    trigger: Trigger<GameEvent>,
    config: Res<RunnerConfig>,
    display: Res<ScoreDisplay>,
    mut stage: ResMut<GameStage>,
    mut state: ResMut<RunState>,
    mut high_score: ResMut<HighScore>,
    mut hud: ResMut<HudVisibility>,
    obstacle_query: Query<(), With<Obstacle>>,
    mut audio_events: EventWriter<AudioEvent>,
    mut presentation_events: EventWriter<PresentationEvent>,
) {
    let GameEvent::ObstacleCollision(entity) = *trigger.event() else {
        return;
    };
    if *stage != GameStage::Running {
        debug!(?entity, stage = ?*stage, "Collision outside of a run, ignoring");
        return;
    }
    if !obstacle_query.contains(entity) {
        debug!(?entity, "Collision with a non-obstacle entity, ignoring");
        return;
    }

    state.is_running = false;
    *stage = GameStage::GameOver;

    presentation_events.write(PresentationEvent::PausePhysics);
    presentation_events.write(PresentationEvent::PauseAnimations);
    presentation_events.write(PresentationEvent::PlayerDied);
    audio_events.write(AudioEvent::PlaySound(Sound::Hit));

    hud.insert(HudVisibility::GAME_OVER | HudVisibility::HIGH_SCORE);
    let raised = high_score.commit(&display.0, &config.high_score_prefix, config.score_digits);

    info!(
        score = state.score,
        high_score = high_score.value,
        new_high_score = raised,
        "Player hit an obstacle, game over"
    );
    state.reset_progress();
}

/// Clears the field and resumes play after a game over.
#[allow(clippy::too_many_arguments)]
pub fn restart_observer(
    trigger: Trigger<GameEvent>,
    mut commands: Commands,
    mut stage: ResMut<GameStage>,
    mut state: ResMut<RunState>,
    mut hud: ResMut<HudVisibility>,
    mut player_query: Query<&mut Velocity, With<PlayerControlled>>,
    obstacle_query: Query<Entity, With<Obstacle>>,
    mut presentation_events: EventWriter<PresentationEvent>,
) {
    if *trigger.event() != GameEvent::RestartPressed {
        return;
    }
    if *stage != GameStage::GameOver {
        debug!(stage = ?*stage, "Restart requested outside of game over, ignoring");
        return;
    }

    presentation_events.write(PresentationEvent::ResumePhysics);
    presentation_events.write(PresentationEvent::ResumeAnimations);

    for mut velocity in player_query.iter_mut() {
        velocity.0.y = 0.0;
    }

    let mut count = 0;
    for entity in obstacle_query.iter() {
        commands.entity(entity).despawn();
        count += 1;
    }
    presentation_events.write(PresentationEvent::ObstaclesCleared { count });

    hud.remove(HudVisibility::GAME_OVER);
    state.is_running = true;
    *stage = GameStage::Running;
    info!(cleared = count, "Restarting run");
}
