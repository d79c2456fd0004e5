//! Spawn context for flake initialization.
//!
//! Wraps the RNG behind a small helper so the generator never touches
//! `rand` directly, and so tests can seed the sequence and assert exact
//! spawn parameters:
//!
//! ```ignore
//! let mut ctx = SpawnContext::with_seed(7);
//! let flake = ctx.spawn(&config, 480.0, 1.0);
//! assert!(flake.base_x() >= 0.0 && flake.base_x() < 480.0);
//! ```

use crate::config::SnowfallConfig;
use crate::particle::{Particle, SizeClass};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seedable random source used by the generator task.
pub struct SpawnContext {
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a context seeded from wall-clock time. Different each
    /// program execution.
    pub fn new() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::with_seed(seed)
    }

    /// Create a context with a fixed seed, for deterministic tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in the given range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..max)
    }

    /// Random angle in degrees, `[0, 360)`.
    #[inline]
    pub fn random_angle(&mut self) -> f32 {
        self.rng.gen_range(0.0..360.0)
    }

    /// Random size class, uniform among the three.
    pub fn random_class(&mut self) -> SizeClass {
        SizeClass::ALL[self.rng.gen_range(0..SizeClass::ALL.len())]
    }

    /// Build one new flake for a canvas of the given width.
    ///
    /// The horizontal anchor is uniform across the canvas (a zero-width
    /// canvas degenerates to anchor 0 rather than faulting), both
    /// angles are uniform in `[0, 360)`, the flake starts one
    /// large-class diameter above the visible area, and the fall speed
    /// captures the velocity modifier once at this moment.
    pub fn spawn(
        &mut self,
        config: &SnowfallConfig,
        canvas_width: f32,
        velocity_modifier: f32,
    ) -> Particle {
        let class = self.random_class();
        let base_x = if canvas_width > 0.0 {
            self.random_range(0.0, canvas_width)
        } else {
            0.0
        };

        Particle::new(
            class,
            base_x,
            self.random_angle(),
            self.random_angle(),
            config.spawn_y(),
            config.profile(class).base_speed * velocity_modifier,
            config.melt_duration_ms,
        )
    }
}

impl Default for SpawnContext {
    fn default() -> Self {
        Self::new()
    }
}
