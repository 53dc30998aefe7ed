//! Beat-driven particle launcher
//!
//! Spawns [`TrailParticle`]s at beat boundaries and merges every live
//! particle into one frame with the HSV blend.

use core::ops::RangeInclusive;

use alloc::vec::Vec;
use embassy_time::Instant;
use rand::Rng;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::clock::BeatClock;
use crate::color::{HsvPixel, blend_hsv};
use crate::error::ConfigError;
use crate::layer::Layer;
use crate::layout::{Frame, StripLayout};
use crate::particle::{TrailConfig, TrailParticle};

/// Configuration for the particle launcher
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    /// Chance to spawn a particle at each beat boundary
    pub spawn_chance: f32,
    /// Particle lifetime, in clock intervals
    pub lifetime_intervals: RangeInclusive<u32>,
    /// Tail length in pixels
    pub tail_lengths: RangeInclusive<u16>,
    /// Live particle cap; spawns beyond it are skipped
    pub max_particles: usize,
    pub trail: TrailConfig,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            spawn_chance: 0.5,
            lifetime_intervals: 1..=10,
            tail_lengths: 4..=55,
            max_particles: 64,
            trail: TrailConfig::default(),
        }
    }
}

impl LauncherConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.spawn_chance > 0.0 && self.spawn_chance <= 1.0) {
            return Err(ConfigError::InvalidProbability);
        }
        if self.lifetime_intervals.is_empty() || *self.lifetime_intervals.start() == 0 {
            return Err(ConfigError::InvalidRange);
        }
        if self.tail_lengths.is_empty() {
            return Err(ConfigError::InvalidRange);
        }
        if *self.tail_lengths.start() == 0 {
            return Err(ConfigError::ZeroTailLength);
        }
        self.trail.validate()
    }
}

#[derive(Debug, Clone)]
pub struct ParticleLauncher {
    layout: StripLayout,
    config: LauncherConfig,
    particles: Vec<TrailParticle>,
    frame: Frame<HsvPixel>,
    last_frac: f32,
}

impl ParticleLauncher {
    pub fn new(layout: StripLayout, config: LauncherConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            layout,
            config,
            particles: Vec::new(),
            frame: Frame::new(layout, HsvPixel::BLANK),
            last_frac: 0.0,
        })
    }

    /// Advance the launcher and every live particle
    ///
    /// Returns `None` when no particle contributes a frame.
    pub fn step<R: Rng>(
        &mut self,
        clock: &BeatClock,
        now: Instant,
        rng: &mut R,
    ) -> Option<&Frame<HsvPixel>> {
        // Particles that died last tick are dropped here
        self.particles.retain(|particle| !particle.is_dead());

        let frac = clock.frac();
        if frac < self.last_frac && rng.gen_bool(f64::from(self.config.spawn_chance)) {
            self.spawn(clock, now, rng);
        }
        self.last_frac = frac;

        self.frame.fill(HsvPixel::BLANK);
        let mut contributed = false;
        for particle in &mut self.particles {
            let Some(pixels) = particle.step(now, rng) else {
                continue;
            };
            contributed = true;
            for (merged, &pixel) in self.frame.as_mut_slice().iter_mut().zip(pixels.as_slice()) {
                *merged = blend_hsv(*merged, pixel);
            }
        }

        contributed.then_some(&self.frame)
    }

    fn spawn<R: Rng>(&mut self, clock: &BeatClock, now: Instant, rng: &mut R) {
        if self.particles.len() >= self.config.max_particles {
            #[cfg(feature = "esp32-log")]
            println!("[launcher] particle cap reached, skipping spawn");
            return;
        }

        let lifetime = clock.interval() * rng.gen_range(self.config.lifetime_intervals.clone());
        let length = rng.gen_range(self.config.tail_lengths.clone());
        let hue = rng.gen_range(0..=255);

        match TrailParticle::new(self.layout, now, lifetime, length, hue, &self.config.trail) {
            Ok(particle) => {
                #[cfg(feature = "esp32-log")]
                println!(
                    "[launcher] spawn hue={} length={} lifetime={}us",
                    hue,
                    length,
                    lifetime.as_micros()
                );
                self.particles.push(particle);
            }
            Err(_err) => {
                #[cfg(feature = "esp32-log")]
                println!("[launcher] spawn rejected: {}", _err);
            }
        }
    }

    /// Live particles, including ones that died on the last tick
    pub fn particles(&self) -> &[TrailParticle] {
        &self.particles
    }

    pub const fn config(&self) -> &LauncherConfig {
        &self.config
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.frame.fill(HsvPixel::BLANK);
        self.last_frac = 0.0;
    }
}

impl Layer for ParticleLauncher {
    fn step<R: Rng>(
        &mut self,
        clock: &BeatClock,
        now: Instant,
        rng: &mut R,
    ) -> Option<&Frame<HsvPixel>> {
        ParticleLauncher::step(self, clock, now, rng)
    }

    fn reset(&mut self) {
        self.clear();
    }
}
