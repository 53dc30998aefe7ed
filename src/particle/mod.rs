//! Comet particles with fading tails and flickering embers
//!
//! Two variants share the tail shape and ember logic:
//! - [`TrailParticle`] crosses the strip once on its own schedule and dies
//!   after its embers burn out
//! - [`LoopingParticle`] follows a beat clock around the strip forever

mod embers;
mod looping;
mod tail;
mod trail;

pub use embers::{EmberConfig, Embers};
pub use looping::LoopingParticle;
pub use tail::{TailConfig, TailShape};
pub use trail::TrailParticle;

use crate::error::ConfigError;

/// Tail and ember settings for a particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailConfig {
    pub tail: TailConfig,
    pub embers: EmberConfig,
}

impl TrailConfig {
    /// Defaults for the looping comet: slow flicker, gentle decay
    pub const LOOPING: Self = Self {
        tail: TailConfig::DEFAULT,
        embers: EmberConfig::LOOPING,
    };

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.embers.validate()
    }
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            tail: TailConfig::DEFAULT,
            embers: EmberConfig::DEFAULT,
        }
    }
}
