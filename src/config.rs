//! Engine configuration.
//!
//! Every tunable lives in [`SnowfallConfig`], with defaults matching the
//! reference behavior. Override individual fields before handing the
//! config to the builder:
//!
//! ```ignore
//! let config = SnowfallConfig {
//!     max_particles: 200,
//!     shake_threshold: 20.0,
//!     ..Default::default()
//! };
//! Snowfall::new().with_config(config).start(width, height)?;
//! ```
//!
//! The config is validated once at engine start; the numeric core never
//! re-checks it.

use crate::error::ConfigError;
use crate::particle::SizeClass;
use std::time::Duration;

/// Pixel size and base fall speed for one size class.
#[derive(Debug, Clone, Copy)]
pub struct ClassProfile {
    /// Square asset edge length in pixels.
    pub size_px: f32,
    /// Unmodified fall speed in px/sec.
    pub base_speed: f32,
}

/// All engine tunables.
#[derive(Debug, Clone)]
pub struct SnowfallConfig {
    // ========== Population ==========
    /// Hard population cap. A resource guard, not an error path: at
    /// capacity the generator silently no-ops.
    pub max_particles: usize,
    /// Generator tick period.
    pub generator_tick: Duration,
    /// Stepper tick period (the physics frame budget).
    pub stepper_tick: Duration,

    // ========== Physics ==========
    /// Sway angle advance in degrees per millisecond.
    pub oscillation_speed: f32,
    /// Horizontal sway amplitude in pixels.
    pub oscillation_amplitude: f32,
    /// Spin in degrees per second.
    pub rotation_speed: f32,
    /// Melt countdown once a flake crosses the floor, in milliseconds.
    pub melt_duration_ms: f32,

    // ========== Size classes ==========
    pub small: ClassProfile,
    pub medium: ClassProfile,
    pub large: ClassProfile,

    // ========== Shake response ==========
    /// Resting spawn probability per generator tick.
    pub baseline_intensity: f32,
    /// Spawn probability immediately after a shake trigger.
    pub elevated_intensity: f32,
    /// Resting fall-speed multiplier.
    pub baseline_velocity: f32,
    /// Fall-speed multiplier immediately after a shake trigger.
    pub elevated_velocity: f32,
    /// Time for an elevated modifier to decay back to baseline, in
    /// milliseconds of generator ticks.
    pub decay_duration_ms: f32,
    /// Sliding window length for the shake average.
    pub shake_window: usize,
    /// Shake trigger threshold on the windowed average of per-sample
    /// |x|+|y|+|z|.
    pub shake_threshold: f32,

    // ========== Bookkeeping ==========
    /// Rolling window for the FPS average reported by the projector.
    pub fps_window: usize,
}

impl Default for SnowfallConfig {
    fn default() -> Self {
        Self {
            max_particles: 500,
            generator_tick: Duration::from_millis(1),
            stepper_tick: Duration::from_millis(15),
            oscillation_speed: 0.08,
            oscillation_amplitude: 30.0,
            rotation_speed: 100.0,
            melt_duration_ms: 1000.0,
            small: ClassProfile {
                size_px: 12.0,
                base_speed: 60.0,
            },
            medium: ClassProfile {
                size_px: 24.0,
                base_speed: 90.0,
            },
            large: ClassProfile {
                size_px: 36.0,
                base_speed: 130.0,
            },
            baseline_intensity: 0.05,
            elevated_intensity: 0.8,
            baseline_velocity: 1.0,
            elevated_velocity: 2.5,
            decay_duration_ms: 5000.0,
            shake_window: 15,
            shake_threshold: 15.0,
            fps_window: 100,
        }
    }
}

impl SnowfallConfig {
    /// Profile for a size class.
    #[inline]
    pub fn profile(&self, class: SizeClass) -> ClassProfile {
        match class {
            SizeClass::Small => self.small,
            SizeClass::Medium => self.medium,
            SizeClass::Large => self.large,
        }
    }

    /// Spawn height: one large-class diameter above the canvas, so a
    /// new flake of any class enters fully off-screen.
    #[inline]
    pub fn spawn_y(&self) -> f32 {
        -self.large.size_px
    }

    /// Check the config once before the engine starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generator_tick.is_zero() {
            return Err(ConfigError::ZeroTick("generator_tick"));
        }
        if self.stepper_tick.is_zero() {
            return Err(ConfigError::ZeroTick("stepper_tick"));
        }
        for (name, value) in [
            ("melt_duration_ms", self.melt_duration_ms),
            ("decay_duration_ms", self.decay_duration_ms),
        ] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::NonPositive(name));
            }
        }
        if self.shake_window == 0 {
            return Err(ConfigError::NonPositive("shake_window"));
        }
        if self.fps_window == 0 {
            return Err(ConfigError::NonPositive("fps_window"));
        }
        if self.elevated_intensity < self.baseline_intensity {
            return Err(ConfigError::ElevatedBelowBaseline("intensity"));
        }
        if self.elevated_velocity < self.baseline_velocity {
            return Err(ConfigError::ElevatedBelowBaseline("velocity"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SnowfallConfig::default().validate().is_ok());
    }

    #[test]
    fn test_spawn_y_is_one_large_diameter_up() {
        let config = SnowfallConfig::default();
        assert_eq!(config.spawn_y(), -36.0);
    }

    #[test]
    fn test_zero_tick_rejected() {
        let config = SnowfallConfig {
            generator_tick: Duration::ZERO,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroTick("generator_tick"))
        ));
    }

    #[test]
    fn test_elevated_below_baseline_rejected() {
        let config = SnowfallConfig {
            baseline_intensity: 0.9,
            elevated_intensity: 0.1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ElevatedBelowBaseline("intensity"))
        ));
    }

    #[test]
    fn test_profile_lookup() {
        let config = SnowfallConfig::default();
        assert_eq!(config.profile(SizeClass::Small).size_px, 12.0);
        assert_eq!(config.profile(SizeClass::Large).base_speed, 130.0);
    }
}
