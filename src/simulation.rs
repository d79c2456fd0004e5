//! Engine builder and the generator/stepper task pair.
//!
//! [`Snowfall`] is the public entry point. Configure it, then call
//! [`Snowfall::start`] with the canvas geometry; this launches two
//! periodic worker tasks against one [`SharedState`]:
//!
//! | Task | Tick | Job |
//! |------|------|-----|
//! | generator | 1 ms | spawn flakes per intensity draw, decay modifiers |
//! | stepper | 15 ms | advance physics, prune melted flakes |
//!
//! Each task reads the current snapshot, computes a new collection, and
//! publishes it atomically; neither tick waits on the other. A resize
//! restarts the pair with cancel-then-replace semantics: the prior
//! tasks are cancelled and joined before the new pair launches, so a
//! stale tick can never mutate the new state.
//!
//! # Example
//!
//! ```ignore
//! let mut engine = Snowfall::new();
//! engine.start(480.0, 800.0)?;
//!
//! // sensor subscription:
//! engine.shake(Vec3::new(ax, ay, az));
//!
//! // per UI frame:
//! let commands = projector.project(&engine.snapshot());
//! ```

use crate::config::SnowfallConfig;
use crate::error::ConfigError;
use crate::modifiers::ShakeModifiers;
use crate::particle::Particle;
use crate::shake::ShakeMeter;
use crate::spawn::SpawnContext;
use crate::state::SharedState;
use glam::Vec3;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// One generator tick: a probabilistic spawn attempt, then modifier
/// decay.
///
/// Spawning is skipped at the population cap and on a malformed canvas
/// (negative width or non-positive height); a zero-width canvas still
/// spawns, with every anchor degenerating to 0. Decay always runs.
pub(crate) fn generator_tick(
    state: &SharedState,
    ctx: &mut SpawnContext,
    config: &SnowfallConfig,
    canvas_width: f32,
    canvas_height: f32,
) {
    let snapshot = state.snapshot();
    let spawnable = canvas_width >= 0.0 && canvas_height > 0.0;

    if spawnable && snapshot.len() < config.max_particles {
        let modifiers = state.modifiers();
        if ctx.random() < modifiers.intensity() {
            let mut next = Vec::with_capacity(snapshot.len() + 1);
            next.extend(snapshot.iter().cloned());
            next.push(ctx.spawn(config, canvas_width, modifiers.velocity()));
            state.publish(next);
        }
    }

    state.decay_modifiers(config);
}

/// One stepper tick: advance every flake by `dt_ms` against the canvas
/// floor, drop the melted ones, publish the result.
pub(crate) fn stepper_tick(state: &SharedState, dt_ms: f32, floor_y: f32, config: &SnowfallConfig) {
    let snapshot = state.snapshot();
    let mut next = Vec::with_capacity(snapshot.len());

    for particle in snapshot.iter() {
        let mut particle = particle.clone();
        particle.step(dt_ms, floor_y, config);
        if !particle.is_melted() {
            next.push(particle);
        }
    }

    state.publish(next);
}

/// A running generator/stepper pair bound to one canvas geometry.
///
/// Dropping the handle cancels both tasks and joins them.
pub struct SimulationHandle {
    state: Arc<SharedState>,
    cancel: Arc<AtomicBool>,
    generator: Option<JoinHandle<()>>,
    stepper: Option<JoinHandle<()>>,
}

impl SimulationHandle {
    fn launch(
        config: Arc<SnowfallConfig>,
        spawn_ctx: SpawnContext,
        width: f32,
        height: f32,
    ) -> Self {
        let state = Arc::new(SharedState::new(&config));
        let cancel = Arc::new(AtomicBool::new(false));

        let generator = {
            let state = state.clone();
            let cancel = cancel.clone();
            let config = config.clone();
            thread::spawn(move || {
                let mut ctx = spawn_ctx;
                // Cancellation is checked at the top of every tick, so
                // a cancelled task exits without touching shared state.
                while !cancel.load(Ordering::Acquire) {
                    generator_tick(&state, &mut ctx, &config, width, height);
                    thread::sleep(config.generator_tick);
                }
            })
        };

        let stepper = {
            let state = state.clone();
            let cancel = cancel.clone();
            let config = config.clone();
            thread::spawn(move || {
                let mut last_tick = Instant::now();
                while !cancel.load(Ordering::Acquire) {
                    // Measured elapsed time, not the nominal period, so
                    // physics stays correct when the scheduler is late.
                    let now = Instant::now();
                    let dt_ms = now.duration_since(last_tick).as_secs_f32() * 1000.0;
                    let dt_ms = if dt_ms > 0.0 {
                        dt_ms
                    } else {
                        config.stepper_tick.as_secs_f32() * 1000.0
                    };
                    last_tick = now;

                    stepper_tick(&state, dt_ms, height, &config);
                    thread::sleep(config.stepper_tick);
                }
            })
        };

        log::debug!("simulation started ({width}x{height})");

        Self {
            state,
            cancel,
            generator: Some(generator),
            stepper: Some(stepper),
        }
    }

    /// Shared state for readers (renderer, HUD).
    #[inline]
    pub fn state(&self) -> &Arc<SharedState> {
        &self.state
    }

    /// Cancel both tasks and wait for them to exit.
    fn shutdown(&mut self) {
        self.cancel.store(true, Ordering::Release);
        if let Some(handle) = self.generator.take() {
            let _ = handle.join();
        }
        if let Some(handle) = self.stepper.take() {
            let _ = handle.join();
        }
        log::debug!("simulation stopped");
    }
}

impl Drop for SimulationHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// The snowfall engine: shake input on one side, snapshots on the
/// other.
///
/// Holds the config, the shake meter, and the currently running task
/// pair (if any). `start` is also `restart`: calling it again (e.g. on
/// canvas resize) cancels the prior pair first.
pub struct Snowfall {
    config: Arc<SnowfallConfig>,
    meter: ShakeMeter,
    seed: Option<u64>,
    handle: Option<SimulationHandle>,
}

impl Snowfall {
    /// Create an engine with default settings. Nothing runs until
    /// [`Snowfall::start`].
    pub fn new() -> Self {
        let config = SnowfallConfig::default();
        Self {
            meter: ShakeMeter::new(&config),
            config: Arc::new(config),
            seed: None,
            handle: None,
        }
    }

    /// Replace the configuration. Takes effect on the next `start`.
    pub fn with_config(mut self, config: SnowfallConfig) -> Self {
        self.meter = ShakeMeter::new(&config);
        self.config = Arc::new(config);
        self
    }

    /// Fix the spawn RNG seed, for deterministic spawning in tests.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Start (or restart) the simulation for a canvas of the given
    /// pixel geometry.
    ///
    /// The prior task pair, if any, is cancelled and joined before the
    /// new one launches.
    pub fn start(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        self.config.validate()?;
        self.stop();

        let spawn_ctx = match self.seed {
            Some(seed) => SpawnContext::with_seed(seed),
            None => SpawnContext::new(),
        };
        self.handle = Some(SimulationHandle::launch(
            self.config.clone(),
            spawn_ctx,
            width,
            height,
        ));
        Ok(())
    }

    /// Cancel the running task pair, if any, and wait for it to exit.
    pub fn stop(&mut self) {
        self.handle = None;
    }

    /// Whether a task pair is currently running.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Feed one 3-axis linear-acceleration sample.
    ///
    /// When the windowed shake average exceeds the threshold, both
    /// modifiers jump to their elevated constants. No cooldown; while
    /// the canvas is still this simply re-applies the same values.
    pub fn shake(&mut self, accel: Vec3) {
        let triggered = self.meter.record(accel);
        if triggered {
            if let Some(handle) = &self.handle {
                handle.state().trigger_shake(&self.config);
                log::debug!("shake triggered (avg {:.1})", self.meter.average());
            }
        }
    }

    /// The latest published flake snapshot (empty when stopped).
    pub fn snapshot(&self) -> Arc<Vec<Particle>> {
        match &self.handle {
            Some(handle) => handle.state().snapshot(),
            None => Arc::new(Vec::new()),
        }
    }

    /// Current live population.
    pub fn population(&self) -> usize {
        self.handle
            .as_ref()
            .map_or(0, |handle| handle.state().population())
    }

    /// Copy of the current modifier pair (baseline values when
    /// stopped).
    pub fn modifiers(&self) -> ShakeModifiers {
        match &self.handle {
            Some(handle) => handle.state().modifiers(),
            None => ShakeModifiers::new(&self.config),
        }
    }

    /// The active configuration.
    #[inline]
    pub fn config(&self) -> &SnowfallConfig {
        &self.config
    }
}

impl Default for Snowfall {
    fn default() -> Self {
        Self::new()
    }
}
