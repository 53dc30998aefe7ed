//! Rainbow comet with a white leader and a trail of flickering embers
//!
//! Runs on its own frame count rather than the beat clock: the head moves
//! 7 pixels every 8 frames, and every lit pixel is faded by a random factor
//! on every frame.

use embassy_time::Instant;
use rand::Rng;

use super::Layer;
use crate::clock::BeatClock;
use crate::color::{HsvPixel, wrap_hue};
use crate::error::ConfigError;
use crate::layout::{Frame, StripLayout};

const SPEED_NUM: usize = 7;
const SPEED_DEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmberCometConfig {
    /// Pixels ahead of the head that are blended toward white
    pub leader_size: u8,
    /// Whiteness of the farthest leader pixel (0-255 = 0.0-1.0)
    pub leader_whiteness: u8,
    /// Lower bound of the per-frame brightness factor
    pub fade_low: f32,
    /// Upper bound (exclusive) of the per-frame brightness factor
    pub fade_high: f32,
}

impl EmberCometConfig {
    pub const DEFAULT: Self = Self {
        leader_size: 8,
        leader_whiteness: 102,
        fade_low: 0.45,
        fade_high: 1.5,
    };

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fade_low > 0.0 && self.fade_low < self.fade_high) {
            return Err(ConfigError::InvalidEmberDecay);
        }
        Ok(())
    }
}

impl Default for EmberCometConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone)]
pub struct EmberComet {
    layout: StripLayout,
    config: EmberCometConfig,
    frame: Frame<HsvPixel>,
    /// Frame counter, wraps once the head has crossed the strip 7 times
    step: usize,
    head: usize,
    hue_offset: u8,
}

impl EmberComet {
    pub fn new(layout: StripLayout, config: EmberCometConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            layout,
            config,
            frame: Frame::new(layout, HsvPixel::BLANK),
            step: 0,
            head: 0,
            hue_offset: 0,
        })
    }

    /// Draw the head and its leader, then fade every lit pixel
    #[allow(clippy::cast_possible_truncation)]
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> &Frame<HsvPixel> {
        let leds = self.layout.leds();
        self.head = (self.step * SPEED_NUM / SPEED_DEN) % leds;

        let color = self.color_at(self.head);
        self.paint_leader(color);
        self.frame.set_column(self.head as u16, color);
        self.fade(rng);

        self.step = (self.step + 1) % (leds * SPEED_DEN);
        &self.frame
    }

    /// Palette color of a strip position
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn color_at(&self, pos: usize) -> HsvPixel {
        let hue = (255 * pos / self.layout.leds()) as i32;
        HsvPixel::saturated(wrap_hue(i32::from(self.hue_offset) + hue), 255)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn paint_leader(&mut self, color: HsvPixel) {
        let size = usize::from(self.config.leader_size);
        let whiteness = usize::from(self.config.leader_whiteness);
        for k in 1..=size {
            let pos = self.head + k;
            if pos >= self.layout.leds() {
                break;
            }
            let sat = 255 - whiteness * k / size;
            self.frame
                .set_column(pos as u16, HsvPixel::new(color.hue, sat as u8, 255));
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn fade<R: Rng>(&mut self, rng: &mut R) {
        let EmberCometConfig {
            fade_low,
            fade_high,
            ..
        } = self.config;
        for pixel in self.frame.as_mut_slice() {
            if !pixel.is_lit() {
                continue;
            }
            let factor = rng.gen_range(fade_low..fade_high);
            pixel.val = libm::floorf(f32::from(pixel.val) * factor).min(255.0) as u16;
        }
    }

    pub const fn head(&self) -> usize {
        self.head
    }

    pub const fn hue_offset(&self) -> u8 {
        self.hue_offset
    }
}

impl Layer for EmberComet {
    fn step<R: Rng>(
        &mut self,
        _clock: &BeatClock,
        _now: Instant,
        rng: &mut R,
    ) -> Option<&Frame<HsvPixel>> {
        Some(EmberComet::step(self, rng))
    }

    /// Rotate the palette
    fn set_hue(&mut self, hue: u8) {
        self.hue_offset = hue;
    }

    fn reset(&mut self) {
        self.frame.fill(HsvPixel::BLANK);
        self.step = 0;
        self.head = 0;
    }
}
