//! Flake entity and per-tick stepping.
//!
//! A [`Particle`] is one snowflake. Its visible horizontal position and
//! opacity are *derived* values, never stored:
//!
//! | Derived | Formula |
//! |---------|---------|
//! | screen x | `base_x + sin(oscillation_angle in radians) * amplitude` |
//! | alpha | `remaining_melt_ms / melt_duration`, clamped to `[0, 1]` |
//!
//! Lifecycle: a flake falls (oscillating and rotating) until it crosses
//! the canvas floor, then melts in place for a fixed countdown while its
//! alpha fades, and is finally removed by the stepper once melted.

use crate::config::SnowfallConfig;

/// Discrete flake size category.
///
/// Fixed at spawn time; selects the visual asset, its pixel size, and
/// the base fall speed (see [`SnowfallConfig::profile`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    /// All classes, in ascending size order. Spawning picks uniformly
    /// from this set.
    pub const ALL: [SizeClass; 3] = [SizeClass::Small, SizeClass::Medium, SizeClass::Large];
}

/// One snowflake's physical state.
///
/// `size_class`, `base_x`, and `fall_speed` are immutable after
/// creation; everything else advances through [`Particle::step`].
/// A melted flake is frozen permanently and is eligible for removal.
#[derive(Debug, Clone)]
pub struct Particle {
    size_class: SizeClass,
    base_x: f32,
    oscillation_angle: f32,
    y: f32,
    rotation_angle: f32,
    fall_speed: f32,
    remaining_melt_ms: f32,
    melted: bool,
}

impl Particle {
    /// Create a flake with explicit initial state.
    ///
    /// `fall_speed` is expected to already include the velocity
    /// modifier captured at spawn time; it is never re-evaluated.
    pub fn new(
        size_class: SizeClass,
        base_x: f32,
        oscillation_angle: f32,
        rotation_angle: f32,
        y: f32,
        fall_speed: f32,
        melt_duration_ms: f32,
    ) -> Self {
        Self {
            size_class,
            base_x,
            oscillation_angle,
            y,
            rotation_angle,
            fall_speed,
            remaining_melt_ms: melt_duration_ms,
            melted: false,
        }
    }

    /// Advance this flake by one tick of `dt_ms` milliseconds.
    ///
    /// Three regimes, checked in order:
    /// - melted: frozen, nothing changes;
    /// - past the floor (`y > floor_y`): only the melt countdown runs,
    ///   flipping `melted` once it drops below zero (clamped to 0);
    /// - falling: sway, rotation, and vertical position all advance.
    ///
    /// A melting flake does not move or rotate.
    pub fn step(&mut self, dt_ms: f32, floor_y: f32, config: &SnowfallConfig) {
        if self.melted {
            return;
        }

        if self.y > floor_y {
            self.remaining_melt_ms -= dt_ms;
            if self.remaining_melt_ms < 0.0 {
                self.remaining_melt_ms = 0.0;
                self.melted = true;
            }
        } else {
            self.oscillation_angle += dt_ms * config.oscillation_speed;
            self.rotation_angle += config.rotation_speed * dt_ms / 1000.0;
            self.y += self.fall_speed * dt_ms / 1000.0;
        }
    }

    /// Derived horizontal screen position: anchor plus sine sway.
    #[inline]
    pub fn x(&self, amplitude: f32) -> f32 {
        self.base_x + self.oscillation_angle.to_radians().sin() * amplitude
    }

    /// Derived opacity in `[0, 1]`: fraction of melt time remaining.
    #[inline]
    pub fn alpha(&self, melt_duration_ms: f32) -> f32 {
        (self.remaining_melt_ms / melt_duration_ms).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn size_class(&self) -> SizeClass {
        self.size_class
    }

    #[inline]
    pub fn base_x(&self) -> f32 {
        self.base_x
    }

    #[inline]
    pub fn oscillation_angle(&self) -> f32 {
        self.oscillation_angle
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn rotation_angle(&self) -> f32 {
        self.rotation_angle
    }

    #[inline]
    pub fn fall_speed(&self) -> f32 {
        self.fall_speed
    }

    #[inline]
    pub fn remaining_melt_ms(&self) -> f32 {
        self.remaining_melt_ms
    }

    /// Whether this flake has finished melting and can be pruned.
    #[inline]
    pub fn is_melted(&self) -> bool {
        self.melted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SnowfallConfig {
        SnowfallConfig::default()
    }

    fn small_flake(base_x: f32, y: f32) -> Particle {
        Particle::new(SizeClass::Small, base_x, 0.0, 0.0, y, 60.0, 1000.0)
    }

    #[test]
    fn test_falling_step_advances_all_motion() {
        let config = config();
        let mut p = small_flake(100.0, -36.0);

        p.step(15.0, 1000.0, &config);

        // 15 ms at 0.08 deg/ms sway and 100 deg/s rotation.
        assert!((p.oscillation_angle() - 1.2).abs() < 1e-5);
        assert!((p.rotation_angle() - 1.5).abs() < 1e-5);
        assert!((p.y() - (-36.0 + 60.0 * 15.0 / 1000.0)).abs() < 1e-5);
        assert!(!p.is_melted());
    }

    #[test]
    fn test_melting_counts_down_without_motion() {
        let config = config();
        let mut p = small_flake(50.0, 1001.0);
        let osc = p.oscillation_angle();
        let rot = p.rotation_angle();

        p.step(15.0, 1000.0, &config);

        assert!((p.remaining_melt_ms() - 985.0).abs() < 1e-5);
        assert!(!p.is_melted());
        assert_eq!(p.y(), 1001.0);
        assert_eq!(p.oscillation_angle(), osc);
        assert_eq!(p.rotation_angle(), rot);
    }

    #[test]
    fn test_melt_completes_and_clamps() {
        let config = config();
        let mut p = small_flake(50.0, 1001.0);

        // 67 ticks of 15 ms = 1005 ms, crossing the 1000 ms countdown.
        for _ in 0..67 {
            p.step(15.0, 1000.0, &config);
        }

        assert!(p.is_melted());
        assert_eq!(p.remaining_melt_ms(), 0.0);
    }

    #[test]
    fn test_melted_flake_is_frozen() {
        let config = config();
        let mut p = small_flake(50.0, 1001.0);
        for _ in 0..67 {
            p.step(15.0, 1000.0, &config);
        }
        assert!(p.is_melted());

        let before = (p.y(), p.oscillation_angle(), p.rotation_angle());
        for _ in 0..10 {
            p.step(15.0, 1000.0, &config);
        }

        assert!(p.is_melted());
        assert_eq!(p.remaining_melt_ms(), 0.0);
        assert_eq!(before, (p.y(), p.oscillation_angle(), p.rotation_angle()));
    }

    #[test]
    fn test_motion_is_monotonic_while_falling() {
        let config = config();
        let mut p = small_flake(200.0, 0.0);
        let mut last = (p.oscillation_angle(), p.rotation_angle(), p.y());

        for _ in 0..100 {
            p.step(15.0, 10_000.0, &config);
            let now = (p.oscillation_angle(), p.rotation_angle(), p.y());
            assert!(now.0 > last.0);
            assert!(now.1 > last.1);
            assert!(now.2 > last.2);
            last = now;
        }
    }

    #[test]
    fn test_derived_x_is_pure() {
        let p = Particle::new(SizeClass::Medium, 100.0, 90.0, 0.0, 0.0, 90.0, 1000.0);
        // sin(90 deg) = 1, so x sits exactly one amplitude right of anchor.
        assert!((p.x(30.0) - 130.0).abs() < 1e-4);
        // The anchor itself is untouched.
        assert_eq!(p.base_x(), 100.0);
    }

    #[test]
    fn test_alpha_tracks_melt_time_and_clamps() {
        let config = config();
        let mut p = small_flake(0.0, 1001.0);
        assert_eq!(p.alpha(1000.0), 1.0);

        p.step(250.0, 1000.0, &config);
        assert!((p.alpha(1000.0) - 0.75).abs() < 1e-5);

        for _ in 0..10 {
            p.step(250.0, 1000.0, &config);
        }
        assert_eq!(p.alpha(1000.0), 0.0);
    }
}
