//! Sound cues requested by the play loop.
//!
//! Playback itself belongs to the host; the play loop only writes
//! [`AudioEvent`]s which are drained after each frame.

use bevy_ecs::event::Event;
use strum_macros::{EnumIter, IntoStaticStr};

/// Named sound effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Sound {
    /// Played at every speed milestone.
    Progress,
    /// Played as part of the death reaction.
    Hit,
}

impl Sound {
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Events for triggering audio playback
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    PlaySound(Sound),
}
