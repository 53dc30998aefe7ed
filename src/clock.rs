//! Beat clock
//!
//! Converts wall-clock time into a smoothed fractional position inside the
//! current beat-multiple interval.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::error::ConfigError;

const MICROS_PER_MINUTE: u64 = 60_000_000;

/// Largest phase representable below 1.0
const MAX_FRAC: f32 = 1.0 - f32::EPSILON;

/// Tempo clock that stays phase-continuous across tempo changes
///
/// The clock keeps the (interpolated) timestamp of the last zero crossing and
/// measures the phase relative to it. The anchor is moved only when the phase
/// wraps, so changing the tempo stretches the current interval instead of
/// snapping to `now % interval`.
#[derive(Debug, Clone)]
pub struct BeatClock {
    bpm: u32,
    multiple: u32,
    /// Microseconds between two beat-multiple events
    interval_us: u64,
    last_zero: Instant,
    reltime_us: u64,
    frac: f32,
}

impl BeatClock {
    /// Create a clock whose first zero crossing is `now`
    pub fn new(bpm: u32, multiple: u32, now: Instant) -> Result<Self, ConfigError> {
        let interval_us = Self::interval_for(bpm, multiple)?;
        Ok(Self {
            bpm,
            multiple,
            interval_us,
            last_zero: now,
            reltime_us: 0,
            frac: 0.0,
        })
    }

    fn interval_for(bpm: u32, multiple: u32) -> Result<u64, ConfigError> {
        if bpm == 0 {
            return Err(ConfigError::ZeroTempo);
        }
        if multiple == 0 {
            return Err(ConfigError::ZeroMultiple);
        }
        let interval = MICROS_PER_MINUTE / (u64::from(bpm) * u64::from(multiple));
        if interval == 0 {
            return Err(ConfigError::TempoTooFast);
        }
        Ok(interval)
    }

    /// Change tempo and subdivision, effective on the next [`update`](Self::update)
    pub fn set_tempo(&mut self, bpm: u32, multiple: u32) -> Result<(), ConfigError> {
        self.interval_us = Self::interval_for(bpm, multiple)?;
        self.bpm = bpm;
        self.multiple = multiple;
        #[cfg(feature = "esp32-log")]
        println!(
            "[clock] tempo {} bpm x{} -> {} us",
            bpm, multiple, self.interval_us
        );
        Ok(())
    }

    pub fn set_bpm(&mut self, bpm: u32) -> Result<(), ConfigError> {
        self.set_tempo(bpm, self.multiple)
    }

    pub fn set_multiple(&mut self, multiple: u32) -> Result<(), ConfigError> {
        self.set_tempo(self.bpm, multiple)
    }

    /// Recompute the phase for `now`
    ///
    /// Call once per frame before any layer reads [`frac`](Self::frac).
    #[allow(clippy::cast_precision_loss)]
    pub fn update(&mut self, now: Instant) {
        let last_reltime = self.reltime_us;
        let elapsed = now.saturating_duration_since(self.last_zero).as_micros();
        self.reltime_us = elapsed % self.interval_us;
        // Wrapped, or the interval got shorter than the current phase
        if self.reltime_us < last_reltime {
            self.last_zero = now - Duration::from_micros(self.reltime_us);
        }
        #[allow(clippy::cast_possible_truncation)]
        let frac = (self.reltime_us as f64 / self.interval_us as f64) as f32;
        self.frac = frac.min(MAX_FRAC);
    }

    /// Fractional phase inside the current interval, in [0, 1)
    pub const fn frac(&self) -> f32 {
        self.frac
    }

    pub const fn bpm(&self) -> u32 {
        self.bpm
    }

    pub const fn multiple(&self) -> u32 {
        self.multiple
    }

    /// Time between two beat-multiple events
    pub const fn interval(&self) -> Duration {
        Duration::from_micros(self.interval_us)
    }

    /// Timestamp of the last zero crossing
    pub const fn last_zero(&self) -> Instant {
        self.last_zero
    }
}

/// Handle of a clock registered with the animation host
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockId(pub(crate) u8);

impl ClockId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}
