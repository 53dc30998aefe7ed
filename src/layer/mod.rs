//! Layer system with compile-time known layer variants
//!
//! Each layer produces a full HSV frame per tick, or nothing when it has no
//! contribution. All layers are stored in an enum to avoid trait objects.

mod bump;
mod comet;
mod fill;
mod flash;

use embassy_time::Instant;
use rand::Rng;

pub use bump::{BumpConfig, BumpLayer, beat_brightness};
pub use comet::{EmberComet, EmberCometConfig};
pub use fill::FillLayer;
pub use flash::{FlashConfig, FlashLayer, MAX_FLASH_COLORS};

use crate::clock::BeatClock;
use crate::color::HsvPixel;
use crate::launcher::ParticleLauncher;
use crate::layout::Frame;
use crate::particle::LoopingParticle;

const LAYER_NAME_LAUNCHER: &str = "launcher";
const LAYER_NAME_LOOPING: &str = "looping";
const LAYER_NAME_EMBER_COMET: &str = "ember_comet";
const LAYER_NAME_FLASH: &str = "flash";
const LAYER_NAME_BUMP: &str = "bump";
const LAYER_NAME_FILL: &str = "fill";

pub trait Layer {
    /// Advance one tick and return this layer's pixels, if any
    ///
    /// `clock` has already been updated for `now`.
    fn step<R: Rng>(
        &mut self,
        clock: &BeatClock,
        now: Instant,
        rng: &mut R,
    ) -> Option<&Frame<HsvPixel>>;

    /// Change the base hue, for layers that have one
    fn set_hue(&mut self, _hue: u8) {}

    /// Reset layer state
    fn reset(&mut self) {}
}

/// Layer slot - enum containing all possible layers
#[derive(Debug, Clone)]
pub enum LayerSlot {
    /// Beat-spawned comets
    Launcher(ParticleLauncher),
    /// Comet circling the strip once per interval
    Looping(LoopingParticle),
    /// Rainbow comet leaving flickering embers, paced by frames
    EmberComet(EmberComet),
    /// Short color flash on every beat
    Flash(FlashLayer),
    /// Whole-strip pulse following the beat phase
    Bump(BumpLayer),
    /// Constant color
    Fill(FillLayer),
}

impl LayerSlot {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Launcher(_) => LAYER_NAME_LAUNCHER,
            Self::Looping(_) => LAYER_NAME_LOOPING,
            Self::EmberComet(_) => LAYER_NAME_EMBER_COMET,
            Self::Flash(_) => LAYER_NAME_FLASH,
            Self::Bump(_) => LAYER_NAME_BUMP,
            Self::Fill(_) => LAYER_NAME_FILL,
        }
    }
}

impl Layer for LayerSlot {
    fn step<R: Rng>(
        &mut self,
        clock: &BeatClock,
        now: Instant,
        rng: &mut R,
    ) -> Option<&Frame<HsvPixel>> {
        match self {
            Self::Launcher(layer) => Layer::step(layer, clock, now, rng),
            Self::Looping(layer) => Layer::step(layer, clock, now, rng),
            Self::EmberComet(layer) => Layer::step(layer, clock, now, rng),
            Self::Flash(layer) => Layer::step(layer, clock, now, rng),
            Self::Bump(layer) => Layer::step(layer, clock, now, rng),
            Self::Fill(layer) => Layer::step(layer, clock, now, rng),
        }
    }

    fn set_hue(&mut self, hue: u8) {
        match self {
            Self::Launcher(layer) => Layer::set_hue(layer, hue),
            Self::Looping(layer) => Layer::set_hue(layer, hue),
            Self::EmberComet(layer) => Layer::set_hue(layer, hue),
            Self::Flash(layer) => Layer::set_hue(layer, hue),
            Self::Bump(layer) => Layer::set_hue(layer, hue),
            Self::Fill(layer) => Layer::set_hue(layer, hue),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Launcher(layer) => Layer::reset(layer),
            Self::Looping(layer) => Layer::reset(layer),
            Self::EmberComet(layer) => Layer::reset(layer),
            Self::Flash(layer) => Layer::reset(layer),
            Self::Bump(layer) => Layer::reset(layer),
            Self::Fill(layer) => Layer::reset(layer),
        }
    }
}

impl From<ParticleLauncher> for LayerSlot {
    fn from(layer: ParticleLauncher) -> Self {
        Self::Launcher(layer)
    }
}

impl From<LoopingParticle> for LayerSlot {
    fn from(layer: LoopingParticle) -> Self {
        Self::Looping(layer)
    }
}

impl From<EmberComet> for LayerSlot {
    fn from(layer: EmberComet) -> Self {
        Self::EmberComet(layer)
    }
}

impl From<FlashLayer> for LayerSlot {
    fn from(layer: FlashLayer) -> Self {
        Self::Flash(layer)
    }
}

impl From<BumpLayer> for LayerSlot {
    fn from(layer: BumpLayer) -> Self {
        Self::Bump(layer)
    }
}

impl From<FillLayer> for LayerSlot {
    fn from(layer: FillLayer) -> Self {
        Self::Fill(layer)
    }
}
