//! Frame compositor
//!
//! Merges independent layers in RGB space: every layer pixel is converted
//! with [`ColorPrimitives::hsv_to_rgb`] and the results are folded left to
//! right with [`ColorPrimitives::blend_rgb`]. Particles inside one layer are
//! merged in HSV space instead (see [`crate::color::blend_hsv`]).

use crate::color::{ColorPrimitives, HsvPixel, Rgb};
use crate::layout::{Frame, StripLayout};

const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Merge `layers` into `output`, one pixel at a time
///
/// A pixel that is unlit in every layer is exactly black, whatever hue or
/// saturation the layers carry there. Pixels missing from a smaller layer
/// count as unlit.
pub fn merge_layers<C: ColorPrimitives>(
    colors: &C,
    layers: &[&Frame<HsvPixel>],
    output: &mut Frame<Rgb>,
) {
    for (i, out) in output.as_mut_slice().iter_mut().enumerate() {
        let pixel_at = |layer: &&Frame<HsvPixel>| {
            layer
                .as_slice()
                .get(i)
                .copied()
                .unwrap_or(HsvPixel::BLANK)
        };

        if layers.iter().all(|layer| !pixel_at(layer).is_lit()) {
            *out = BLACK;
            continue;
        }

        *out = layers
            .iter()
            .map(|layer| colors.hsv_to_rgb(pixel_at(layer)))
            .reduce(|a, b| colors.blend_rgb(a, b))
            .unwrap_or(BLACK);
    }
}

/// Owns the output frame and the color primitives
#[derive(Debug, Clone)]
pub struct FrameCompositor<C: ColorPrimitives> {
    colors: C,
    output: Frame<Rgb>,
}

impl<C: ColorPrimitives> FrameCompositor<C> {
    pub fn new(layout: StripLayout, colors: C) -> Self {
        Self {
            colors,
            output: Frame::new(layout, BLACK),
        }
    }

    /// Compose the layers into the output frame
    pub fn merge_layers(&mut self, layers: &[&Frame<HsvPixel>]) -> &Frame<Rgb> {
        merge_layers(&self.colors, layers, &mut self.output);
        &self.output
    }

    /// Blank the output frame
    pub fn clear(&mut self) -> &Frame<Rgb> {
        self.output.fill(BLACK);
        &self.output
    }

    pub const fn output(&self) -> &Frame<Rgb> {
        &self.output
    }
}
