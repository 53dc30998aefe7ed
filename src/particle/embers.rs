use alloc::collections::BTreeMap;

use rand::Rng;

use crate::color::HsvPixel;
use crate::error::ConfigError;
use crate::layout::{Frame, PixelCoord};

/// Flicker and decay behavior of embers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmberConfig {
    /// Chance that an ember changes on a given frame; 1.0 updates every frame
    pub update_rate: f32,
    /// Lower bound of the brightness factor, below 1
    pub decay_low: f32,
    /// Upper bound (exclusive) of the brightness factor, at least 1
    pub decay_high: f32,
}

impl EmberConfig {
    pub const DEFAULT: Self = Self {
        update_rate: 1.0,
        decay_low: 0.35,
        decay_high: 1.5,
    };

    pub const LOOPING: Self = Self {
        update_rate: 0.5,
        decay_low: 0.65,
        decay_high: 1.1,
    };

    pub fn validate(&self) -> Result<(), ConfigError> {
        let decay_ok =
            self.decay_low > 0.0 && self.decay_low < 1.0 && self.decay_high >= 1.0;
        if !decay_ok {
            return Err(ConfigError::InvalidEmberDecay);
        }
        if !(self.update_rate > 0.0 && self.update_rate <= 1.0) {
            return Err(ConfigError::InvalidProbability);
        }
        Ok(())
    }
}

impl Default for EmberConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Sparse set of glowing pixels left behind by a particle
#[derive(Debug, Clone)]
pub struct Embers {
    config: EmberConfig,
    burning: BTreeMap<PixelCoord, HsvPixel>,
}

impl Embers {
    pub fn new(config: EmberConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            burning: BTreeMap::new(),
        })
    }

    /// Start (or restart) an ember at `coord`
    pub fn ignite(&mut self, coord: PixelCoord, color: HsvPixel) {
        self.burning.insert(coord, color);
    }

    /// Drop the ember at `coord`, if any
    pub fn extinguish(&mut self, coord: PixelCoord) {
        self.burning.remove(&coord);
    }

    pub fn get(&self, coord: PixelCoord) -> Option<HsvPixel> {
        self.burning.get(&coord).copied()
    }

    pub fn len(&self) -> usize {
        self.burning.len()
    }

    pub fn is_empty(&self) -> bool {
        self.burning.is_empty()
    }

    pub fn clear(&mut self) {
        self.burning.clear();
    }

    /// Prune burnt-out embers, then flicker the rest into `frame`
    ///
    /// An ember reaching zero is still written once, so its pixel goes dark
    /// before it is pruned on the next call.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn decay<R: Rng>(&mut self, frame: &mut Frame<HsvPixel>, rng: &mut R) {
        let config = self.config;
        self.burning.retain(|_, ember| ember.val > 0);

        for (&coord, ember) in &mut self.burning {
            if !rng.gen_bool(f64::from(config.update_rate)) {
                continue;
            }
            let factor = rng.gen_range(config.decay_low..config.decay_high);
            let val = libm::floorf(f32::from(ember.val) * factor).min(255.0);
            ember.val = val as u16;
            frame.set(coord, *ember);
        }
    }
}
