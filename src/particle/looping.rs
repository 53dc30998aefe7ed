use embassy_time::Instant;
use rand::Rng;

use super::{Embers, TailShape, TrailConfig};
use crate::clock::BeatClock;
use crate::color::HsvPixel;
use crate::error::ConfigError;
use crate::layer::Layer;
use crate::layout::{Frame, PixelCoord, StripLayout};

/// Comet that circles the strip once per beat-multiple interval
///
/// The head position is the clock phase scaled to the strip length. Index
/// arithmetic wraps modulo the strip length; a head that moves to a lower
/// index has passed the end and wrapped around.
#[derive(Debug, Clone)]
pub struct LoopingParticle {
    layout: StripLayout,
    hue: u8,
    tail: TailShape,
    embers: Embers,
    frame: Frame<HsvPixel>,
    head: usize,
    last_blank: Option<usize>,
}

impl LoopingParticle {
    /// Create a looping comet; the tail must be shorter than the strip
    pub fn new(
        layout: StripLayout,
        length: u16,
        hue: u8,
        config: &TrailConfig,
    ) -> Result<Self, ConfigError> {
        if usize::from(length) >= layout.leds() {
            return Err(ConfigError::InvalidRange);
        }
        Ok(Self {
            layout,
            hue,
            tail: TailShape::new(length, config.tail)?,
            embers: Embers::new(config.embers)?,
            frame: Frame::new(layout, HsvPixel::BLANK),
            head: 0,
            last_blank: None,
        })
    }

    /// Move the head to the clock phase and return the strip
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn step<R: Rng>(&mut self, frac: f32, rng: &mut R) -> &Frame<HsvPixel> {
        let leds = self.layout.leds();
        let head = libm::floorf(frac.clamp(0.0, 1.0) * leds as f32) as usize;
        self.head = head.min(leds - 1);

        self.blank_behind();
        self.paint_tail();
        self.embers.decay(&mut self.frame, rng);

        &self.frame
    }

    /// Blank the positions that left the tail since the last frame,
    /// walking forward across the strip end if the head wrapped
    #[allow(clippy::cast_possible_truncation)]
    fn blank_behind(&mut self) {
        let leds = self.layout.leds();
        let blank = (self.head + leds - self.tail.len()) % leds;
        let ember = self.tail.tail_end(self.hue);

        for strip in self.layout.strip_ids() {
            self.frame
                .set(PixelCoord::new(strip, blank as u16), ember.with_val(0));
        }

        let exited = match self.last_blank {
            Some(last) => (blank + leds - last) % leds,
            None => 0,
        };
        for back in (0..exited).rev() {
            let pos = (blank + leds - back) % leds;
            for strip in self.layout.strip_ids() {
                let coord = PixelCoord::new(strip, pos as u16);
                self.frame.set(coord, ember.with_val(0));
                self.embers.ignite(coord, ember);
            }
        }
        self.last_blank = Some(blank);
    }

    /// Paint the tail over anything underneath, embers included
    #[allow(clippy::cast_possible_truncation)]
    fn paint_tail(&mut self) {
        let leds = self.layout.leds();
        for (offset, color) in self.tail.colors(self.hue).enumerate() {
            let pos = (self.head + leds - offset) % leds;
            for strip in self.layout.strip_ids() {
                let coord = PixelCoord::new(strip, pos as u16);
                self.embers.extinguish(coord);
                self.frame.set(coord, color);
            }
        }
    }

    pub const fn head(&self) -> usize {
        self.head
    }

    pub const fn hue(&self) -> u8 {
        self.hue
    }

    pub fn ember_count(&self) -> usize {
        self.embers.len()
    }

    pub fn set_hue(&mut self, hue: u8) {
        self.hue = hue;
    }

    /// Clear the strip and forget the previous position
    pub fn reset(&mut self) {
        self.embers.clear();
        self.frame.fill(HsvPixel::BLANK);
        self.last_blank = None;
        self.head = 0;
    }
}

impl Layer for LoopingParticle {
    fn step<R: Rng>(
        &mut self,
        clock: &BeatClock,
        _now: Instant,
        rng: &mut R,
    ) -> Option<&Frame<HsvPixel>> {
        Some(LoopingParticle::step(self, clock.frac(), rng))
    }

    fn set_hue(&mut self, hue: u8) {
        LoopingParticle::set_hue(self, hue);
    }

    fn reset(&mut self) {
        LoopingParticle::reset(self);
    }
}
