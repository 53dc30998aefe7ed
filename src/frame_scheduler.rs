//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};
use rand::Rng;

use crate::OutputDriver;
use crate::color::ColorPrimitives;
use crate::host::AnimationHost;

/// Default target frame rate (90 FPS).
pub const DEFAULT_FPS: u32 = 90;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / DEFAULT_FPS as u64);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Portable frame scheduler that drives the animation host.
///
/// This scheduler:
/// - Tracks frame timing with drift correction
/// - Renders through the host and writes to the output driver
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(host, driver);
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     sleep(result.sleep_duration);
/// }
/// ```
pub struct FrameScheduler<'a, O, R, C, const PARAMS: usize>
where
    O: OutputDriver,
    R: Rng,
    C: ColorPrimitives,
{
    output: O,
    host: AnimationHost<'a, R, C, PARAMS>,
    next_frame: Option<Instant>,
    frame_duration: Duration,
}

impl<'a, O, R, C, const PARAMS: usize> FrameScheduler<'a, O, R, C, PARAMS>
where
    O: OutputDriver,
    R: Rng,
    C: ColorPrimitives,
{
    /// Create a new frame scheduler running at `DEFAULT_FPS`.
    pub fn new(host: AnimationHost<'a, R, C, PARAMS>, driver: O) -> Self {
        Self::with_frame_duration(host, driver, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(
        host: AnimationHost<'a, R, C, PARAMS>,
        driver: O,
        frame_duration: Duration,
    ) -> Self {
        Self {
            output: driver,
            host,
            next_frame: None,
            frame_duration,
        }
    }

    /// Process one frame and return timing information.
    ///
    /// If we have fallen more than two frames behind, the schedule restarts
    /// at `now` instead of bursting to catch up.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let max_drift = self.frame_duration * 2;
        let scheduled = match self.next_frame {
            Some(next) if now <= next + max_drift => next,
            _ => now,
        };

        let frame = self.host.render(now);
        self.output.write(frame);

        let next_deadline = scheduled + self.frame_duration;
        self.next_frame = Some(next_deadline);

        FrameResult {
            next_deadline,
            sleep_duration: next_deadline.saturating_duration_since(now),
        }
    }

    pub const fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    pub const fn host(&self) -> &AnimationHost<'a, R, C, PARAMS> {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut AnimationHost<'a, R, C, PARAMS> {
        &mut self.host
    }

    pub const fn output(&self) -> &O {
        &self.output
    }
}
