//! # Snowfall - shake-reactive falling particle engine
//!
//! A CPU particle engine for a bounded rectangular canvas: flakes fall,
//! sway, spin, and melt, with spawn rate and fall speed elevated by
//! device-shake input and decaying back to baseline. The engine owns
//! the simulation only; rendering surfaces, motion sensors, and the
//! app shell are external collaborators wired in by the host.
//!
//! ## Quick Start
//!
//! ```ignore
//! use snowfall::prelude::*;
//!
//! // Canvas laid out (or resized): start/restart the simulation.
//! let mut engine = Snowfall::new();
//! engine.start(width, height)?;
//! let mut projector = Projector::new(engine.config());
//!
//! // Sensor subscription (reference cadence: every 50 ms):
//! engine.shake(Vec3::new(ax, ay, az));
//!
//! // Once per UI frame:
//! for cmd in projector.project(&engine.snapshot()) {
//!     canvas.draw(cmd.size_class, cmd.top_left, cmd.rotation_deg,
//!                 cmd.scale, cmd.opacity);
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Flakes
//!
//! Each [`Particle`] carries a fixed [`SizeClass`] (asset, pixel size,
//! base fall speed), an immutable horizontal anchor, and advancing
//! sway/spin/fall state. Screen x and opacity are derived, never
//! stored. After crossing the canvas floor a flake melts in place for
//! one second, fading out, then is pruned.
//!
//! ### Task pair
//!
//! Two periodic worker tasks share one snapshot-published collection:
//! a 1 ms generator (probabilistic spawning, modifier decay) and a
//! 15 ms stepper (physics, pruning). Writers publish whole new
//! collections; readers never see a half-updated frame. Restarting
//! (e.g. on resize) is cancel-then-replace.
//!
//! ### Shake response
//!
//! A 15-sample sliding window smooths raw acceleration into a shake
//! average; crossing the threshold jumps spawn intensity and fall
//! speed to elevated constants, which decay linearly back to baseline
//! over five seconds.

pub mod config;
pub mod error;
pub mod modifiers;
pub mod particle;
pub mod render;
pub mod shake;
mod simulation;
pub mod spawn;
mod state;
pub mod time;

pub use config::{ClassProfile, SnowfallConfig};
pub use error::ConfigError;
pub use glam::{Vec2, Vec3};
pub use modifiers::ShakeModifiers;
pub use particle::{Particle, SizeClass};
pub use render::{DrawCommand, Projector};
pub use shake::ShakeMeter;
pub use simulation::{SimulationHandle, Snowfall};
pub use spawn::SpawnContext;
pub use state::SharedState;
pub use time::FrameClock;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use snowfall::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{ClassProfile, SnowfallConfig};
    pub use crate::error::ConfigError;
    pub use crate::particle::{Particle, SizeClass};
    pub use crate::render::{DrawCommand, Projector};
    pub use crate::simulation::Snowfall;
    pub use crate::time::FrameClock;
    pub use crate::{Vec2, Vec3};
}
