//! Shake detection from motion samples.
//!
//! [`ShakeMeter`] turns a stream of 3-axis linear-acceleration samples
//! into a smoothed "shake strength" signal: each sample contributes
//! |x|+|y|+|z| to a fixed-length sliding window, and the windowed
//! average is compared against the trigger threshold.
//!
//! There is no cooldown. While the average stays above threshold the
//! trigger re-fires on every sample (harmless, since a trigger
//! overwrites the modifiers with the same elevated constants); decay
//! only makes progress once the average drops back below threshold.

use crate::config::SnowfallConfig;
use glam::Vec3;
use std::collections::VecDeque;

/// Sliding-window shake strength detector.
#[derive(Debug)]
pub struct ShakeMeter {
    window: VecDeque<f32>,
    capacity: usize,
    threshold: f32,
    sum: f32,
}

impl ShakeMeter {
    pub fn new(config: &SnowfallConfig) -> Self {
        Self {
            window: VecDeque::with_capacity(config.shake_window),
            capacity: config.shake_window,
            threshold: config.shake_threshold,
            sum: 0.0,
        }
    }

    /// Feed one acceleration sample. Returns `true` when the windowed
    /// average now exceeds the trigger threshold.
    pub fn record(&mut self, accel: Vec3) -> bool {
        let strength = accel.x.abs() + accel.y.abs() + accel.z.abs();

        if self.window.len() == self.capacity {
            if let Some(oldest) = self.window.pop_front() {
                self.sum -= oldest;
            }
        }
        self.window.push_back(strength);
        self.sum += strength;

        self.average() > self.threshold
    }

    /// Current windowed average of shake strength.
    #[inline]
    pub fn average(&self) -> f32 {
        if self.window.is_empty() {
            0.0
        } else {
            self.sum / self.window.len() as f32
        }
    }
}
