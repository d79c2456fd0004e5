//! Error types for snowfall.
//!
//! The numeric core is infallible by design: stepping, spawning, and
//! projection are pure in-memory transforms. The only fallible surface
//! is configuration, checked once when an engine starts.

use std::fmt;

/// Errors produced by [`SnowfallConfig::validate`](crate::SnowfallConfig::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A tick period was zero; both loops need a real sleep interval.
    ZeroTick(&'static str),
    /// A duration or window size that must be positive was not.
    NonPositive(&'static str),
    /// An elevated shake constant sits below its baseline, which would
    /// make decay diverge instead of settling.
    ElevatedBelowBaseline(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroTick(field) => {
                write!(f, "tick period `{}` must be non-zero", field)
            }
            ConfigError::NonPositive(field) => {
                write!(f, "`{}` must be positive and finite", field)
            }
            ConfigError::ElevatedBelowBaseline(pair) => {
                write!(
                    f,
                    "elevated {} constant is below its baseline; decay would never settle",
                    pair
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
