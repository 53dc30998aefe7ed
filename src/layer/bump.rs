//! Whole-strip pulse following the beat

use embassy_time::{Duration, Instant};
use rand::Rng;

use super::Layer;
use crate::clock::BeatClock;
use crate::color::HsvPixel;
use crate::layout::{Frame, StripLayout};
use crate::math8::{frac8, scale8};

/// Above this interval the pulse fades smoothly
const SMOOTH_INTERVAL: Duration = Duration::from_micros(150_000);
/// Above this interval the pulse steps in quarters
const QUARTER_INTERVAL: Duration = Duration::from_micros(45_000);
/// Above this interval the pulse strobes on/off
const STROBE_INTERVAL: Duration = Duration::from_micros(22_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BumpConfig {
    pub hue: u8,
    pub saturation: u8,
    /// Output brightness scale (0-255 = 0.0-1.0)
    pub level: u8,
}

impl Default for BumpConfig {
    fn default() -> Self {
        Self {
            hue: 128,
            saturation: 127,
            level: 127,
        }
    }
}

/// Brightness of the pulse at phase `frac` of an interval
///
/// Fast tempos blur a smooth fade, so shorter intervals fall back to
/// quarter steps, then a strobe, then constant light.
pub fn beat_brightness(interval: Duration, frac: f32) -> u8 {
    if interval > SMOOTH_INTERVAL {
        255 - frac8(frac)
    } else if interval > QUARTER_INTERVAL {
        if frac > 0.75 {
            255
        } else if frac > 0.5 {
            159
        } else if frac > 0.25 {
            96
        } else {
            0
        }
    } else if interval > STROBE_INTERVAL {
        if frac > 0.5 { 255 } else { 0 }
    } else {
        255
    }
}

#[derive(Debug, Clone)]
pub struct BumpLayer {
    config: BumpConfig,
    frame: Frame<HsvPixel>,
}

impl BumpLayer {
    pub fn new(layout: StripLayout, config: BumpConfig) -> Self {
        Self {
            config,
            frame: Frame::new(layout, HsvPixel::BLANK),
        }
    }

    pub fn step(&mut self, clock: &BeatClock) -> &Frame<HsvPixel> {
        let bright = beat_brightness(clock.interval(), clock.frac());
        let val = scale8(bright, self.config.level);
        self.frame.fill(HsvPixel::new(
            self.config.hue,
            self.config.saturation,
            u16::from(val),
        ));
        &self.frame
    }
}

impl Layer for BumpLayer {
    fn step<R: Rng>(
        &mut self,
        clock: &BeatClock,
        _now: Instant,
        _rng: &mut R,
    ) -> Option<&Frame<HsvPixel>> {
        Some(BumpLayer::step(self, clock))
    }

    fn set_hue(&mut self, hue: u8) {
        self.config.hue = hue;
    }
}
