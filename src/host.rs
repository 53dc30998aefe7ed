use embassy_time::Instant;
use heapless::Vec;
use rand::Rng;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::clock::{BeatClock, ClockId};
use crate::color::{ColorPrimitives, HsvPixel, Rgb};
use crate::compositor::FrameCompositor;
use crate::error::ConfigError;
use crate::layer::{Layer, LayerSlot};
use crate::layout::{Frame, StripLayout};
use crate::params::{ParamProcessor, ParamReceiver, ParamUpdate};

/// Maximum number of clocks a host can drive
pub const MAX_CLOCKS: usize = 8;
/// Maximum number of layers a host can compose
pub const MAX_LAYERS: usize = 8;

/// A layer and the clock it follows
#[derive(Debug, Clone)]
struct BoundLayer {
    clock: ClockId,
    layer: LayerSlot,
}

/// Animation host - owns clocks, layers and the compositor
///
/// Call [`render`](Self::render) once per frame.
pub struct AnimationHost<'a, R: Rng, C: ColorPrimitives, const PARAMS: usize> {
    // External dependencies
    params: ParamProcessor<'a, PARAMS>,
    rng: R,

    // Animation state
    layout: StripLayout,
    clocks: Vec<BeatClock, MAX_CLOCKS>,
    layers: Vec<BoundLayer, MAX_LAYERS>,

    compositor: FrameCompositor<C>,
}

impl<'a, R: Rng, C: ColorPrimitives, const PARAMS: usize> AnimationHost<'a, R, C, PARAMS> {
    pub fn new(
        layout: StripLayout,
        params: ParamReceiver<'a, PARAMS>,
        rng: R,
        colors: C,
    ) -> Self {
        Self {
            params: ParamProcessor::new(params),
            rng,
            layout,
            clocks: Vec::new(),
            layers: Vec::new(),
            compositor: FrameCompositor::new(layout, colors),
        }
    }

    pub const fn layout(&self) -> StripLayout {
        self.layout
    }

    /// Register a clock, returning its handle
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_clock(&mut self, clock: BeatClock) -> Result<ClockId, ConfigError> {
        let id = ClockId(self.clocks.len() as u8);
        self.clocks
            .push(clock)
            .map_err(|_| ConfigError::TooManyLayers)?;
        Ok(id)
    }

    /// Add a layer on top of the existing ones, driven by `clock`
    pub fn add_layer(
        &mut self,
        clock: ClockId,
        layer: impl Into<LayerSlot>,
    ) -> Result<(), ConfigError> {
        if clock.index() >= self.clocks.len() {
            return Err(ConfigError::UnknownClock);
        }
        self.layers
            .push(BoundLayer {
                clock,
                layer: layer.into(),
            })
            .map_err(|_| ConfigError::TooManyLayers)
    }

    pub fn clock(&self, id: ClockId) -> Option<&BeatClock> {
        self.clocks.get(id.index())
    }

    pub fn clock_mut(&mut self, id: ClockId) -> Option<&mut BeatClock> {
        self.clocks.get_mut(id.index())
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Layers in composition order, with the clock each one follows
    pub fn layers(&self) -> impl Iterator<Item = (ClockId, &LayerSlot)> {
        self.layers.iter().map(|bound| (bound.clock, &bound.layer))
    }

    /// Reset every layer
    pub fn reset(&mut self) {
        for bound in &mut self.layers {
            bound.layer.reset();
        }
    }

    /// Process one frame
    ///
    /// Applies queued parameter updates, updates every clock for `now`,
    /// steps the layers and composes them. The frame is black when no layer
    /// contributes.
    pub fn render(&mut self, now: Instant) -> &Frame<Rgb> {
        self.process_params();

        for clock in &mut self.clocks {
            clock.update(now);
        }

        let Self {
            clocks,
            layers,
            rng,
            compositor,
            ..
        } = self;

        let mut frames: Vec<&Frame<HsvPixel>, MAX_LAYERS> = Vec::new();
        for bound in layers.iter_mut() {
            let Some(clock) = clocks.get(bound.clock.index()) else {
                continue;
            };
            if let Some(frame) = bound.layer.step(clock, now, rng) {
                // Capacity matches the layer count
                let _ = frames.push(frame);
            }
        }

        if frames.is_empty() {
            compositor.clear()
        } else {
            compositor.merge_layers(&frames)
        }
    }

    /// Apply pending parameter updates between ticks
    fn process_params(&mut self) {
        while let Some(update) = self.params.next_fresh() {
            self.apply_update(&update);
        }
    }

    fn apply_update(&mut self, update: &ParamUpdate) {
        let Some(clock) = self.clocks.get_mut(update.clock.index()) else {
            #[cfg(feature = "esp32-log")]
            println!("[host] update for unknown clock {}", update.clock.index());
            return;
        };

        if update.changes_tempo() {
            let bpm = update.bpm.unwrap_or(clock.bpm());
            let multiple = update.multiple.unwrap_or(clock.multiple());
            // An invalid tempo keeps the last good one
            if let Err(_err) = clock.set_tempo(bpm, multiple) {
                #[cfg(feature = "esp32-log")]
                println!("[host] rejected tempo {} x{}: {}", bpm, multiple, _err);
            }
        }

        if let Some(hue) = update.hue {
            for bound in &mut self.layers {
                if bound.clock == update.clock {
                    bound.layer.set_hue(hue);
                }
            }
        }
    }
}
