//! Quick color flash on every beat

use embassy_time::Instant;
use heapless::Vec;
use rand::Rng;

use super::Layer;
use crate::clock::BeatClock;
use crate::color::HsvPixel;
use crate::error::ConfigError;
use crate::layout::{Frame, StripLayout};

pub const MAX_FLASH_COLORS: usize = 8;

#[derive(Debug, Clone)]
pub struct FlashConfig {
    /// Frames each color is held for
    pub frames_per_color: u8,
    /// Colors played in order after each beat
    pub colors: Vec<HsvPixel, MAX_FLASH_COLORS>,
}

impl Default for FlashConfig {
    fn default() -> Self {
        let mut colors = Vec::new();
        for hue in [0, 85, 170] {
            let _ = colors.push(HsvPixel::saturated(hue, 255));
        }
        Self {
            frames_per_color: 2,
            colors,
        }
    }
}

/// Plays the configured colors after each beat, then goes quiet
#[derive(Debug, Clone)]
pub struct FlashLayer {
    config: FlashConfig,
    frame: Frame<HsvPixel>,
    /// Frames played since the last beat, `None` while idle
    blink: Option<usize>,
    last_frac: f32,
}

impl FlashLayer {
    pub fn new(layout: StripLayout, config: FlashConfig) -> Result<Self, ConfigError> {
        if config.frames_per_color == 0 {
            return Err(ConfigError::InvalidRange);
        }
        Ok(Self {
            config,
            frame: Frame::new(layout, HsvPixel::BLANK),
            blink: None,
            last_frac: 0.0,
        })
    }

    pub const fn is_flashing(&self) -> bool {
        self.blink.is_some()
    }

    pub fn step(&mut self, frac: f32) -> Option<&Frame<HsvPixel>> {
        if frac < self.last_frac {
            self.blink = Some(0);
        }
        self.last_frac = frac;

        let blink = self.blink?;
        let index = blink / usize::from(self.config.frames_per_color);
        if let Some(&color) = self.config.colors.get(index) {
            self.frame.fill(color);
            self.blink = Some(blink + 1);
        } else {
            // One black frame to end the flash
            self.frame.fill(HsvPixel::BLANK);
            self.blink = None;
        }
        Some(&self.frame)
    }
}

impl Layer for FlashLayer {
    fn step<R: Rng>(
        &mut self,
        clock: &BeatClock,
        _now: Instant,
        _rng: &mut R,
    ) -> Option<&Frame<HsvPixel>> {
        FlashLayer::step(self, clock.frac())
    }

    fn reset(&mut self) {
        self.blink = None;
        self.last_frac = 0.0;
    }
}
