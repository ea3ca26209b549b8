use bevy_ecs::{
    event::EventWriter,
    system::{Res, ResMut},
};
use tracing::{debug, trace};

use crate::config::RunnerConfig;
use crate::events::PresentationEvent;
use crate::systems::{AudioEvent, DeltaTime, RunState, Sound};

/// Converts running time into score and raises the speed modifier at milestones.
///
/// At most one point is awarded per frame. Time left over when the interval is
/// reached is dropped rather than carried into the next point.
pub fn score_system(
    dt: Res<DeltaTime>,
    config: Res<RunnerConfig>,
    mut state: ResMut<RunState>,
    mut audio_events: EventWriter<AudioEvent>,
    mut presentation_events: EventWriter<PresentationEvent>,
) {
    state.score_accumulator = state.score_accumulator.saturating_add(dt.0);
    if state.score_accumulator < config.score_interval {
        return;
    }

    state.score += 1;
    state.score_accumulator = std::time::Duration::ZERO;
    trace!(score = state.score, "Score increased");

    if state.score % config.speed_milestone == 0 {
        state.speed_modifier += config.speed_step;
        debug!(
            score = state.score,
            speed_modifier = state.speed_modifier,
            "Score milestone reached, speeding up"
        );

        audio_events.write(AudioEvent::PlaySound(Sound::Progress));
        presentation_events.write(PresentationEvent::FlashScore {
            repeats: config.flash_repeats,
            half_period: config.flash_half_period,
        });
    }
}
