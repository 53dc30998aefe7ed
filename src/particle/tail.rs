use alloc::vec::Vec;

use crate::color::{HsvPixel, wrap_hue};
use crate::error::ConfigError;

/// How a tail fades from the head backwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TailConfig {
    /// Brightness of the last tail pixel, also the brightness new embers start at
    pub min_brightness: u8,
    /// Hue drift from head to tail end (255 goes around the whole wheel)
    pub hue_shift: u8,
}

impl TailConfig {
    pub const DEFAULT: Self = Self {
        min_brightness: 100,
        hue_shift: 80,
    };
}

impl Default for TailConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Precomputed brightness and hue offset for every tail position
///
/// Index 0 is the head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailShape {
    brightness: Vec<u8>,
    hue_offsets: Vec<u8>,
}

impl TailShape {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(length: u16, config: TailConfig) -> Result<Self, ConfigError> {
        if length == 0 {
            return Err(ConfigError::ZeroTailLength);
        }

        let span = f32::from(length - 1).max(1.0);
        let fade = f32::from(255 - config.min_brightness);
        let (brightness, hue_offsets): (Vec<u8>, Vec<u8>) = (0..length)
            .map(|i| {
                let pos = f32::from(i) / span;
                let brightness = 255 - libm::floorf(pos * fade) as u8;
                let hue = libm::floorf(pos * f32::from(config.hue_shift)) as u8;
                (brightness, hue)
            })
            .unzip();

        Ok(Self {
            brightness,
            hue_offsets,
        })
    }

    /// Number of pixels including the head
    pub fn len(&self) -> usize {
        self.brightness.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brightness.is_empty()
    }

    /// Colors from head to tail end for a particle of the given hue
    pub fn colors(&self, hue: u8) -> impl Iterator<Item = HsvPixel> + '_ {
        self.brightness
            .iter()
            .zip(&self.hue_offsets)
            .map(move |(&val, &offset)| {
                HsvPixel::saturated(
                    wrap_hue(i32::from(hue) + i32::from(offset)),
                    u16::from(val),
                )
            })
    }

    /// Color of the last tail pixel, the starting color of embers
    pub fn tail_end(&self, hue: u8) -> HsvPixel {
        self.colors(hue).last().unwrap_or(HsvPixel::BLANK)
    }
}
