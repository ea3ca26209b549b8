use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use glam::Vec2;
use strum::IntoEnumIterator;
use tracing::{debug, info, trace, warn};

use crate::config::RunnerConfig;
use crate::constants::LOOP_TIME;
use crate::events::{GameEvent, PresentationEvent};
use crate::game::{Game, ObstacleView};
use crate::systems::{AudioEvent, GameStage, Sound};

/// Collision box of the demo player.
const PLAYER_SIZE: Vec2 = Vec2::new(44.0, 47.0);

/// Frames spent on the game over screen before pressing restart.
const RESTART_DELAY_FRAMES: u32 = 60;

/// Headless host for the play loop.
///
/// Stands in for the physics and input layers of a real frontend: it jumps the
/// player into the start zone, reports obstacle overlaps, and restarts after
/// each game over until the requested number of runs is reached.
pub struct App {
    pub game: Game,
    runs: u32,
    finished_runs: u32,
    paced: bool,
    game_over_frames: u32,
    last_tick: Instant,
    /// Times each sound was requested, keyed over every known sound.
    sound_plays: HashMap<Sound, u32>,
}

impl App {
    pub fn new(config: RunnerConfig, seed: Option<u64>, runs: u32, paced: bool) -> Result<Self> {
        info!(runs, ?seed, paced, "Initializing headless runner");
        let game = match seed {
            Some(seed) => Game::with_seed(config, seed),
            None => Game::new(config),
        }
        .context("Could not create the play loop")?;

        Ok(App {
            game,
            runs,
            finished_runs: 0,
            paced,
            game_over_frames: 0,
            last_tick: Instant::now(),
            sound_plays: Sound::iter().map(|sound| (sound, 0)).collect(),
        })
    }

    /// Executes a single frame, sleeping out the rest of `LOOP_TIME` when paced.
    ///
    /// Returns `false` once every requested run has ended.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();
        let dt = if self.paced {
            self.last_tick.elapsed()
        } else {
            LOOP_TIME
        };
        self.last_tick = start;

        self.drive_player();
        self.game.tick(dt);
        self.detect_collisions();
        self.forward_requests();

        if !self.handle_game_over() {
            return false;
        }

        if self.paced && start.elapsed() < LOOP_TIME {
            let time = LOOP_TIME.saturating_sub(start.elapsed());
            if time != Duration::ZERO {
                spin_sleep::sleep(time);
            }
        }

        true
    }

    pub fn finished_runs(&self) -> u32 {
        self.finished_runs
    }

    pub fn sound_plays(&self, sound: Sound) -> u32 {
        self.sound_plays.get(&sound).copied().unwrap_or_default()
    }

    /// While idle, jumps into the start zone and lands back on the ground line.
    fn drive_player(&mut self) {
        if self.game.stage() != GameStage::Idle {
            return;
        }

        let trigger = self.game.start_trigger().position;
        self.game.set_player_position(trigger);
        trace!(?trigger, "Player jumped into the start zone");
        self.game.handle(GameEvent::StartZoneEntered);

        let ground_line = self.game.config().viewport.y;
        self.game.set_player_position(Vec2::new(0.0, ground_line));
    }

    fn detect_collisions(&mut self) {
        if self.game.stage() != GameStage::Running {
            return;
        }
        let Some(player) = self.game.player_position() else {
            return;
        };

        let hit = self
            .game
            .obstacles()
            .into_iter()
            .find(|obstacle| overlaps(player, PLAYER_SIZE, obstacle));
        if let Some(obstacle) = hit {
            debug!(entity = ?obstacle.entity, kind = ?obstacle.obstacle.kind, "Player overlaps obstacle");
            self.game.handle(GameEvent::ObstacleCollision(obstacle.entity));
        }
    }

    fn forward_requests(&mut self) {
        for AudioEvent::PlaySound(sound) in self.game.drain_audio() {
            debug!(sound = sound.name(), "Play sound");
            *self.sound_plays.entry(sound).or_default() += 1;
        }
        for event in self.game.drain_presentation() {
            match event {
                PresentationEvent::PlayerDied => info!(high_score = %self.game.high_score().text, "Player died"),
                PresentationEvent::FlashScore { .. } => {
                    info!(score = %self.game.score_text(), "Score milestone")
                }
                PresentationEvent::PlayAnimation { entity, animation } => {
                    trace!(?entity, animation = animation.name(), "Play animation")
                }
                other => trace!(event = ?other, "Presentation request"),
            }
        }
    }

    /// Counts finished runs and presses restart after a short delay.
    fn handle_game_over(&mut self) -> bool {
        if self.game.stage() != GameStage::GameOver {
            return true;
        }

        if self.game_over_frames == 0 {
            self.finished_runs += 1;
            if self.finished_runs >= self.runs {
                for sound in Sound::iter() {
                    info!(sound = sound.name(), plays = self.sound_plays(sound), "Sound summary");
                }
                info!(runs = self.finished_runs, "All runs finished");
                return false;
            }
        }

        self.game_over_frames += 1;
        if self.game_over_frames >= RESTART_DELAY_FRAMES {
            self.game_over_frames = 0;
            self.game.handle(GameEvent::RestartPressed);
            if self.game.stage() != GameStage::Running {
                warn!(stage = ?self.game.stage(), "Restart did not resume the run");
            }
        }
        true
    }
}

/// Box overlap with both shapes anchored at their bottom-left corner.
fn overlaps(player: Vec2, player_size: Vec2, obstacle: &ObstacleView) -> bool {
    let player_min = Vec2::new(player.x, player.y - player_size.y);
    let player_max = Vec2::new(player.x + player_size.x, player.y);
    let obstacle_min = Vec2::new(obstacle.position.x, obstacle.position.y - obstacle.size.y);
    let obstacle_max = Vec2::new(obstacle.position.x + obstacle.size.x, obstacle.position.y);

    player_min.cmplt(obstacle_max).all() && obstacle_min.cmplt(player_max).all()
}
