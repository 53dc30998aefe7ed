use smart_leds::hsv::hsv2rgb;

use crate::color::{HsvPixel, Rgb};
use crate::math8::screen8;

/// Color conversion and RGB blending used by the compositor
///
/// Implementors are responsible for saturating [`HsvPixel::val`] into the
/// displayable range.
pub trait ColorPrimitives {
    /// Convert a layer pixel to display RGB
    fn hsv_to_rgb(&self, hsv: HsvPixel) -> Rgb;

    /// Combine two RGB colors from different layers
    fn blend_rgb(&self, a: Rgb, b: Rgb) -> Rgb;
}

/// `smart-leds` HSV conversion with screen blending between layers
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreenBlend;

impl ColorPrimitives for ScreenBlend {
    fn hsv_to_rgb(&self, hsv: HsvPixel) -> Rgb {
        hsv2rgb(hsv.to_hsv())
    }

    fn blend_rgb(&self, a: Rgb, b: Rgb) -> Rgb {
        Rgb {
            r: screen8(a.r, b.r),
            g: screen8(a.g, b.g),
            b: screen8(a.b, b.b),
        }
    }
}
