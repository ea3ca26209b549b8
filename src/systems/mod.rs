//! The Entity-Component-System (ECS) module.
//!
//! Components, resources and the systems that drive a run.

pub mod audio;
pub mod components;
pub mod hud;
pub mod movement;
pub mod score;
pub mod spawner;
pub mod stage;

pub use self::audio::*;
pub use self::components::*;
pub use self::hud::*;
pub use self::movement::*;
pub use self::score::*;
pub use self::spawner::*;
pub use self::stage::*;
