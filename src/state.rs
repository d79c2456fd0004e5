//! Shared simulation state.
//!
//! The live flake collection is published as an immutable
//! `Arc<Vec<Particle>>` snapshot with copy-on-write replacement: a
//! writer takes the current snapshot, computes a whole new collection,
//! and swaps the pointer. Locks guard only the pointer swap and the
//! tiny modifier pair, never a tick's worth of computation, so the
//! render thread always observes a fully-formed frame and never waits
//! on the simulation.
//!
//! Generator and stepper publishes are deliberately unordered
//! (last writer wins). A freshly spawned flake can be lost if the
//! stepper's snapshot predates the generator's publish; visually
//! negligible, and serializing the writers would change density under
//! load.

use crate::config::SnowfallConfig;
use crate::modifiers::ShakeModifiers;
use crate::particle::Particle;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// Snapshot-published flake collection plus the shake modifier pair.
pub struct SharedState {
    particles: RwLock<Arc<Vec<Particle>>>,
    modifiers: Mutex<ShakeModifiers>,
}

impl SharedState {
    pub(crate) fn new(config: &SnowfallConfig) -> Self {
        Self {
            particles: RwLock::new(Arc::new(Vec::new())),
            modifiers: Mutex::new(ShakeModifiers::new(config)),
        }
    }

    /// The latest published snapshot. Cheap: clones the Arc, not the
    /// collection.
    pub fn snapshot(&self) -> Arc<Vec<Particle>> {
        self.particles.read().clone()
    }

    /// Atomically replace the published collection.
    pub(crate) fn publish(&self, next: Vec<Particle>) {
        *self.particles.write() = Arc::new(next);
    }

    /// Number of live flakes in the latest snapshot.
    #[inline]
    pub fn population(&self) -> usize {
        self.particles.read().len()
    }

    /// Copy of the current modifier pair.
    pub fn modifiers(&self) -> ShakeModifiers {
        *self.modifiers.lock()
    }

    /// Shake trigger: overwrite both modifiers with their elevated
    /// constants.
    pub(crate) fn trigger_shake(&self, config: &SnowfallConfig) {
        self.modifiers.lock().trigger(config);
    }

    /// One generator tick of modifier decay.
    pub(crate) fn decay_modifiers(&self, config: &SnowfallConfig) {
        self.modifiers.lock().decay(config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::SizeClass;

    fn flake(y: f32) -> Particle {
        Particle::new(SizeClass::Small, 0.0, 0.0, 0.0, y, 60.0, 1000.0)
    }

    #[test]
    fn test_publish_replaces_snapshot_wholesale() {
        let config = SnowfallConfig::default();
        let state = SharedState::new(&config);
        assert_eq!(state.population(), 0);

        state.publish(vec![flake(0.0), flake(10.0)]);
        assert_eq!(state.population(), 2);

        state.publish(vec![flake(5.0)]);
        assert_eq!(state.population(), 1);
    }

    #[test]
    fn test_old_snapshot_survives_a_publish() {
        let config = SnowfallConfig::default();
        let state = SharedState::new(&config);
        state.publish(vec![flake(0.0)]);

        let held = state.snapshot();
        state.publish(Vec::new());

        // The reader's snapshot is immutable and unaffected.
        assert_eq!(held.len(), 1);
        assert_eq!(state.population(), 0);
    }

    #[test]
    fn test_modifier_roundtrip() {
        let config = SnowfallConfig::default();
        let state = SharedState::new(&config);
        assert_eq!(state.modifiers().intensity(), config.baseline_intensity);

        state.trigger_shake(&config);
        assert_eq!(state.modifiers().intensity(), config.elevated_intensity);
        assert_eq!(state.modifiers().velocity(), config.elevated_velocity);

        state.decay_modifiers(&config);
        assert!(state.modifiers().intensity() < config.elevated_intensity);
    }
}
