//! Frame projection: snapshot in, draw commands out.
//!
//! The projector is a pure read-only mapping with no feedback into the
//! simulation. Per flake, in collection order (order only affects paint
//! overlap):
//!
//! 1. resolve the per-class asset pixel size;
//! 2. derive the screen position from anchor + sine sway;
//! 3. rotate by the flake's spin angle about that point;
//! 4. center the asset's bounding box on it;
//! 5. Large flakes only: a vertical scale swinging through
//!    `[-1, 1]` as the spin advances, producing a flip/flutter
//!    illusion;
//! 6. opacity from the melt countdown.
//!
//! The host draws each [`DrawCommand`] with its own canvas primitives
//! and is expected to call [`Projector::project`] once per UI frame;
//! the projector feeds those invocations to a [`FrameClock`] for the
//! external FPS display.

use crate::config::SnowfallConfig;
use crate::particle::{Particle, SizeClass};
use crate::time::FrameClock;
use glam::Vec2;

/// Everything the host needs to draw one flake.
#[derive(Debug, Clone, Copy)]
pub struct DrawCommand {
    /// Which visual asset to draw.
    pub size_class: SizeClass,
    /// Asset edge length in pixels.
    pub size_px: f32,
    /// Rotation/scale pivot: the flake's derived screen position.
    pub center: Vec2,
    /// Top-left corner that centers the asset's bounding box on
    /// `center`.
    pub top_left: Vec2,
    /// Rotation in degrees about `center`.
    pub rotation_deg: f32,
    /// Non-uniform scale about the asset's own center. `x` is always 1;
    /// `y` flutters through `[-1, 1]` for Large flakes.
    pub scale: Vec2,
    /// Alpha in `[0, 1]`.
    pub opacity: f32,
}

/// Vertical flutter scale for Large flakes: sweeps `-1 → 1` as the
/// spin angle crosses each full turn.
fn vertical_scale(rotation_deg: f32) -> f32 {
    (rotation_deg.rem_euclid(360.0) - 180.0) / 180.0
}

/// Per-frame snapshot projector.
pub struct Projector {
    config: SnowfallConfig,
    clock: FrameClock,
}

impl Projector {
    pub fn new(config: &SnowfallConfig) -> Self {
        Self {
            config: config.clone(),
            clock: FrameClock::new(config.fps_window),
        }
    }

    /// Map one snapshot into draw commands, in collection order, and
    /// record the frame timestamp.
    pub fn project(&mut self, snapshot: &[Particle]) -> Vec<DrawCommand> {
        self.clock.tick();
        snapshot
            .iter()
            .map(|particle| self.command_for(particle))
            .collect()
    }

    fn command_for(&self, particle: &Particle) -> DrawCommand {
        let size_px = self.config.profile(particle.size_class()).size_px;
        let center = Vec2::new(
            particle.x(self.config.oscillation_amplitude),
            particle.y(),
        );
        let half = size_px / 2.0;

        let scale_y = match particle.size_class() {
            SizeClass::Large => vertical_scale(particle.rotation_angle()),
            _ => 1.0,
        };

        DrawCommand {
            size_class: particle.size_class(),
            size_px,
            center,
            top_left: center - Vec2::splat(half),
            rotation_deg: particle.rotation_angle(),
            scale: Vec2::new(1.0, scale_y),
            opacity: particle.alpha(self.config.melt_duration_ms),
        }
    }

    /// FPS over the rolling window of recent frames.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.clock.fps()
    }

    /// Total frames projected.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.clock.frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flake(class: SizeClass, base_x: f32, y: f32, rotation: f32) -> Particle {
        Particle::new(class, base_x, 0.0, rotation, y, 60.0, 1000.0)
    }

    #[test]
    fn test_command_centers_the_asset() {
        let config = SnowfallConfig::default();
        let mut projector = Projector::new(&config);

        let commands = projector.project(&[flake(SizeClass::Medium, 100.0, 50.0, 0.0)]);
        let cmd = &commands[0];

        // Oscillation angle 0 means no sway: center sits on the anchor.
        assert_eq!(cmd.center, Vec2::new(100.0, 50.0));
        assert_eq!(cmd.size_px, 24.0);
        assert_eq!(cmd.top_left, Vec2::new(88.0, 38.0));
    }

    #[test]
    fn test_sway_offsets_the_center() {
        let config = SnowfallConfig::default();
        let mut projector = Projector::new(&config);
        let p = Particle::new(SizeClass::Small, 100.0, 90.0, 0.0, 0.0, 60.0, 1000.0);

        let commands = projector.project(&[p]);
        // sin(90 deg) * 30 px amplitude.
        assert!((commands[0].center.x - 130.0).abs() < 1e-4);
    }

    #[test]
    fn test_large_flakes_flutter() {
        let config = SnowfallConfig::default();
        let mut projector = Projector::new(&config);

        let commands = projector.project(&[
            flake(SizeClass::Large, 0.0, 0.0, 0.0),
            flake(SizeClass::Large, 0.0, 0.0, 180.0),
            flake(SizeClass::Large, 0.0, 0.0, 270.0),
            flake(SizeClass::Large, 0.0, 0.0, 360.0 + 90.0),
        ]);

        assert_eq!(commands[0].scale.y, -1.0);
        assert_eq!(commands[1].scale.y, 0.0);
        assert_eq!(commands[2].scale.y, 0.5);
        // Rotation wraps every full turn.
        assert_eq!(commands[3].scale.y, -0.5);
    }

    #[test]
    fn test_small_and_medium_never_flutter() {
        let config = SnowfallConfig::default();
        let mut projector = Projector::new(&config);

        let commands = projector.project(&[
            flake(SizeClass::Small, 0.0, 0.0, 123.0),
            flake(SizeClass::Medium, 0.0, 0.0, 321.0),
        ]);

        assert_eq!(commands[0].scale, Vec2::ONE);
        assert_eq!(commands[1].scale, Vec2::ONE);
    }

    #[test]
    fn test_opacity_follows_melt() {
        let config = SnowfallConfig::default();
        let mut projector = Projector::new(&config);

        let mut melting = flake(SizeClass::Small, 0.0, 801.0, 0.0);
        melting.step(500.0, 800.0, &config);

        let commands = projector.project(&[melting]);
        assert!((commands[0].opacity - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_collection_order_is_preserved() {
        let config = SnowfallConfig::default();
        let mut projector = Projector::new(&config);

        let snapshot: Vec<Particle> = (0..10)
            .map(|i| flake(SizeClass::Small, i as f32, 0.0, 0.0))
            .collect();
        let commands = projector.project(&snapshot);

        for (i, cmd) in commands.iter().enumerate() {
            assert_eq!(cmd.center.x, i as f32);
        }
    }

    #[test]
    fn test_projection_counts_frames() {
        let config = SnowfallConfig::default();
        let mut projector = Projector::new(&config);
        projector.project(&[]);
        projector.project(&[]);
        assert_eq!(projector.frame(), 2);
    }
}
