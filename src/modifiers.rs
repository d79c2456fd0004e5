//! Shake-driven generation and velocity modifiers.
//!
//! One [`ShakeModifiers`] pair exists per engine. Both values rest at
//! their baselines, jump to elevated constants when a shake triggers,
//! and decay linearly back over `decay_duration_ms` worth of generator
//! ticks. A trigger overwrites rather than accumulates, so repeated
//! triggers while already elevated are no-ops in effect.

use crate::config::SnowfallConfig;

/// Current spawn-probability and fall-speed modulation.
#[derive(Debug, Clone, Copy)]
pub struct ShakeModifiers {
    /// Probability per generator tick that a flake spawns.
    intensity: f32,
    /// Multiplier applied to base fall speed at spawn time.
    velocity: f32,
}

impl ShakeModifiers {
    /// Start both values at baseline.
    pub fn new(config: &SnowfallConfig) -> Self {
        Self {
            intensity: config.baseline_intensity,
            velocity: config.baseline_velocity,
        }
    }

    /// Jump both values to their elevated constants.
    pub fn trigger(&mut self, config: &SnowfallConfig) {
        self.intensity = config.elevated_intensity;
        self.velocity = config.elevated_velocity;
    }

    /// One generator tick of linear decay toward baseline.
    ///
    /// The per-tick step is sized so a full decay from elevated to
    /// baseline takes `decay_duration_ms`. Clamped: a value already at
    /// baseline stays there, never undershooting.
    pub fn decay(&mut self, config: &SnowfallConfig) {
        let tick_ms = config.generator_tick.as_secs_f32() * 1000.0;
        let ticks = config.decay_duration_ms / tick_ms;

        if self.intensity > config.baseline_intensity {
            let step = (config.elevated_intensity - config.baseline_intensity) / ticks;
            self.intensity = (self.intensity - step).max(config.baseline_intensity);
        }
        if self.velocity > config.baseline_velocity {
            let step = (config.elevated_velocity - config.baseline_velocity) / ticks;
            self.velocity = (self.velocity - step).max(config.baseline_velocity);
        }
    }

    #[inline]
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }
}
