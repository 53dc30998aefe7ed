//! Static color fill
//!
//! Fills all LEDs with a single HSV color.

use embassy_time::Instant;
use rand::Rng;

use super::Layer;
use crate::clock::BeatClock;
use crate::color::HsvPixel;
use crate::layout::{Frame, StripLayout};

#[derive(Debug, Clone)]
pub struct FillLayer {
    color: HsvPixel,
    frame: Frame<HsvPixel>,
}

impl FillLayer {
    pub fn new(layout: StripLayout, color: HsvPixel) -> Self {
        Self {
            color,
            frame: Frame::new(layout, color),
        }
    }

    pub const fn color(&self) -> HsvPixel {
        self.color
    }

    pub fn set_color(&mut self, color: HsvPixel) {
        self.color = color;
        self.frame.fill(color);
    }
}

impl Layer for FillLayer {
    fn step<R: Rng>(
        &mut self,
        _clock: &BeatClock,
        _now: Instant,
        _rng: &mut R,
    ) -> Option<&Frame<HsvPixel>> {
        if self.color.is_lit() {
            Some(&self.frame)
        } else {
            None
        }
    }

    fn set_hue(&mut self, hue: u8) {
        self.set_color(HsvPixel { hue, ..self.color });
    }
}
