//! Configuration errors
//!
//! The animation core is a deterministic simulation, so the only failures are
//! caller-contract violations. They are rejected at construction time.

use thiserror::Error;

/// Invalid parameters passed to a constructor or setter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("tempo must be greater than zero")]
    ZeroTempo,
    #[error("beat multiple must be greater than zero")]
    ZeroMultiple,
    #[error("beat interval is shorter than one microsecond")]
    TempoTooFast,
    #[error("tail length must be greater than zero")]
    ZeroTailLength,
    #[error("particle lifetime must be greater than zero")]
    ZeroLifetime,
    #[error("layout must have at least one strip and one led")]
    EmptyLayout,
    #[error("ember decay range must satisfy 0 < low < 1 <= high")]
    InvalidEmberDecay,
    #[error("probability must be in (0, 1]")]
    InvalidProbability,
    #[error("range is empty")]
    InvalidRange,
    #[error("layer or clock capacity exhausted")]
    TooManyLayers,
    #[error("clock id is not registered with the host")]
    UnknownClock,
}
