//! Frame timing for the render path.
//!
//! [`FrameClock`] tracks the draw invocations the host reports each UI
//! frame and derives an FPS figure from a rolling average of
//! inter-frame deltas. This is bookkeeping for an external FPS display
//! only; the simulation tasks keep their own tick timing.

use std::collections::VecDeque;
use std::time::Instant;

/// Rolling-average frame rate tracker.
#[derive(Debug)]
pub struct FrameClock {
    last_frame: Option<Instant>,
    deltas: VecDeque<f32>,
    window: usize,
    frame_count: u64,
}

impl FrameClock {
    /// Create a clock averaging over the last `window` inter-frame
    /// deltas.
    pub fn new(window: usize) -> Self {
        Self {
            last_frame: None,
            deltas: VecDeque::with_capacity(window),
            window,
            frame_count: 0,
        }
    }

    /// Record one frame at an explicit timestamp. Returns the delta to
    /// the previous frame in seconds (0 for the first frame).
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        self.frame_count += 1;

        let delta = match self.last_frame {
            Some(last) => now.duration_since(last).as_secs_f32(),
            None => 0.0,
        };
        self.last_frame = Some(now);

        if delta > 0.0 {
            if self.deltas.len() == self.window {
                self.deltas.pop_front();
            }
            self.deltas.push_back(delta);
        }

        delta
    }

    /// Record one frame at the current instant.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Frames per second over the rolling window. 0 until two frames
    /// have been recorded.
    pub fn fps(&self) -> f32 {
        if self.deltas.is_empty() {
            return 0.0;
        }
        let mean: f32 = self.deltas.iter().sum::<f32>() / self.deltas.len() as f32;
        if mean > 0.0 {
            1.0 / mean
        } else {
            0.0
        }
    }

    /// Total frames recorded since creation.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }
}
