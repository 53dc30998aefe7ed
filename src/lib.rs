#![no_std]

extern crate alloc;

pub mod clock;
pub mod color;
pub mod compositor;
pub mod error;
pub mod frame_scheduler;
pub mod host;
pub mod launcher;
pub mod layer;
pub mod layout;
pub mod math8;
pub mod params;
pub mod particle;

pub use clock::{BeatClock, ClockId};
pub use color::{ColorPrimitives, Hsv, HsvPixel, Rgb, ScreenBlend, blend_hsv, blend_many};
pub use compositor::{FrameCompositor, merge_layers};
pub use error::ConfigError;
pub use frame_scheduler::FrameScheduler;
pub use host::AnimationHost;
pub use launcher::{LauncherConfig, ParticleLauncher};
pub use layer::{Layer, LayerSlot};
pub use layout::{Frame, PixelCoord, StripLayout};
pub use params::{ParamChannel, ParamReceiver, ParamSender, ParamUpdate};
pub use particle::{EmberConfig, LoopingParticle, TailConfig, TrailConfig, TrailParticle};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms. The sink
/// receives the finished grid, one row per strip.
pub trait OutputDriver {
    /// Write a frame to the LED strips
    fn write(&mut self, frame: &Frame<Rgb>);
}
