use bevy_ecs::prelude::*;
use strum_macros::IntoStaticStr;

/// Signals delivered to the play loop by the host between frames.
///
/// Physics, overlap and input callbacks fire at arbitrary times and may arrive
/// after the state has already moved on; each one only ever performs the
/// transition it is meant for and is ignored in any other stage.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// The player overlapped the start trigger region.
    StartZoneEntered,
    /// The player collided with the given obstacle entity.
    ObstacleCollision(Entity),
    /// The restart control was pressed.
    RestartPressed,
}

/// Named looping animations the rendering host knows how to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, IntoStaticStr)]
pub enum Animation {
    #[strum(serialize = "player-run")]
    PlayerRun,
    #[strum(serialize = "enemy-bird-fly")]
    BirdFly,
}

impl Animation {
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Effects the play loop asks of the rendering, physics and animation services.
///
/// The host drains these after every frame or transition and applies them.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum PresentationEvent {
    PausePhysics,
    ResumePhysics,
    PauseAnimations,
    ResumeAnimations,
    PlayAnimation { entity: Entity, animation: Animation },
    /// Blink the score display; fired on every speed milestone.
    FlashScore { repeats: u32, half_period: std::time::Duration },
    /// The player's death reaction should be shown.
    PlayerDied,
    ObstacleSpawned { entity: Entity },
    ObstaclesCleared { count: usize },
}
