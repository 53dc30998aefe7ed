use alloc::vec::Vec;

use embassy_time::{Duration, Instant};
use rand::Rng;

use super::{Embers, TailShape, TrailConfig};
use crate::clock::BeatClock;
use crate::color::HsvPixel;
use crate::error::ConfigError;
use crate::layer::Layer;
use crate::layout::{Frame, PixelCoord, StripLayout};

/// Comet that crosses the strip once, leaving embers behind
///
/// The head moves along a precomputed schedule spanning the strip plus the
/// tail length, so the tail keeps sliding off the far end after the head has
/// left. Once past the end (`gone`) only embers are updated, and when the
/// last ember burns out the particle is `dead` and contributes nothing.
#[derive(Debug, Clone)]
pub struct TrailParticle {
    layout: StripLayout,
    hue: u8,
    tail: TailShape,
    /// Arrival time of the head at each position, beyond the strip end too
    arrivals: Vec<Instant>,
    head: usize,
    /// Positions below this index have already been blanked
    blanked: usize,
    embers: Embers,
    frame: Frame<HsvPixel>,
    gone: bool,
    dead: bool,
}

impl TrailParticle {
    /// Spawn a particle at `spawned` that travels for `lifetime`
    pub fn new(
        layout: StripLayout,
        spawned: Instant,
        lifetime: Duration,
        length: u16,
        hue: u8,
        config: &TrailConfig,
    ) -> Result<Self, ConfigError> {
        if lifetime.as_micros() == 0 {
            return Err(ConfigError::ZeroLifetime);
        }
        let tail = TailShape::new(length, config.tail)?;
        let embers = Embers::new(config.embers)?;

        let steps = (layout.leds() + tail.len()) as u64;
        let lifetime_us = lifetime.as_micros();
        let arrivals = (0..steps)
            .map(|step| spawned + Duration::from_micros(step * lifetime_us / steps))
            .collect();

        Ok(Self {
            layout,
            hue,
            tail,
            arrivals,
            head: 0,
            blanked: 0,
            embers,
            frame: Frame::new(layout, HsvPixel::BLANK),
            gone: false,
            dead: false,
        })
    }

    /// Advance to `now` and return the particle's pixels
    ///
    /// Returns `None` once the particle is dead.
    pub fn step<R: Rng>(&mut self, now: Instant, rng: &mut R) -> Option<&Frame<HsvPixel>> {
        if self.dead {
            return None;
        }

        if !self.gone {
            self.advance(now);
            self.paint_tail();
            self.blank_behind();
        }

        self.embers.decay(&mut self.frame, rng);
        if self.gone && self.embers.is_empty() {
            self.dead = true;
            return None;
        }

        Some(&self.frame)
    }

    fn advance(&mut self, now: Instant) {
        let last = self.arrivals.len() - 1;
        while self.head < last && self.arrivals[self.head + 1] <= now {
            self.head += 1;
        }
        if self.head == last {
            self.gone = true;
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn paint_tail(&mut self) {
        let leds = self.layout.leds();
        for (offset, color) in self.tail.colors(self.hue).enumerate() {
            let Some(pos) = self.head.checked_sub(offset) else {
                break;
            };
            if pos < leds {
                self.frame.set_column(pos as u16, color);
            }
        }
    }

    /// Blank every position that left the tail since the last frame and
    /// put an ember on it
    #[allow(clippy::cast_possible_truncation)]
    fn blank_behind(&mut self) {
        let Some(exited) = self.head.checked_sub(self.tail.len()) else {
            return;
        };
        let last = exited.min(self.layout.leds() - 1);
        if self.blanked > last {
            return;
        }

        let ember = self.tail.tail_end(self.hue);
        for pos in self.blanked..=last {
            for strip in self.layout.strip_ids() {
                let coord = PixelCoord::new(strip, pos as u16);
                self.frame.set(coord, ember.with_val(0));
                self.embers.ignite(coord, ember);
            }
        }
        self.blanked = last + 1;
    }

    /// Index of the head in the schedule; may be past the strip end
    pub const fn head(&self) -> usize {
        self.head
    }

    pub const fn hue(&self) -> u8 {
        self.hue
    }

    pub fn tail_len(&self) -> usize {
        self.tail.len()
    }

    /// Head and tail have left the strip
    pub const fn is_gone(&self) -> bool {
        self.gone
    }

    /// Nothing left to draw, safe to drop
    pub const fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn ember_count(&self) -> usize {
        self.embers.len()
    }

    pub const fn frame(&self) -> &Frame<HsvPixel> {
        &self.frame
    }
}

impl Layer for TrailParticle {
    fn step<R: Rng>(
        &mut self,
        _clock: &BeatClock,
        now: Instant,
        rng: &mut R,
    ) -> Option<&Frame<HsvPixel>> {
        TrailParticle::step(self, now, rng)
    }

    fn set_hue(&mut self, hue: u8) {
        self.hue = hue;
    }
}
