//! HSV-space blending of overlapping particles
//!
//! Used to merge particles inside one layer. Independent layers are merged
//! in RGB space by the compositor instead; the two give visibly different
//! results.

use crate::color::{HsvPixel, wrap_hue};

/// Half of the hue circle, the longest short-arc distance
const HALF_CIRCLE: i32 = 128;

/// Blend two HSV pixels, weighting hue and saturation by brightness
///
/// Unlit pixels are the identity. Hue moves along the shorter arc of the hue
/// circle. Brightness is the sum of both inputs, so overlapping particles get
/// brighter; the result may exceed 255 and is saturated on RGB conversion.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn blend_hsv(a: HsvPixel, b: HsvPixel) -> HsvPixel {
    if a.val == 0 {
        return b;
    }
    if b.val == 0 {
        return a;
    }

    let ratio = f32::from(a.val) / (f32::from(a.val) + f32::from(b.val));
    let toward_b = 1.0 - ratio;

    let hue = if a.hue == b.hue {
        a.hue
    } else {
        let diff = (i32::from(b.hue) - i32::from(a.hue)).rem_euclid(255);
        if diff <= HALF_CIRCLE {
            let move_by = libm::floorf(toward_b * diff as f32) as i32;
            wrap_hue(i32::from(a.hue) + move_by)
        } else {
            let move_by = libm::floorf(toward_b * (255 - diff) as f32) as i32;
            wrap_hue(i32::from(a.hue) - move_by)
        }
    };

    let sat = libm::floorf(ratio * f32::from(a.sat) + toward_b * f32::from(b.sat)) as u8;

    HsvPixel {
        hue,
        sat,
        val: a.val.saturating_add(b.val),
    }
}

/// Left-fold [`blend_hsv`] over a sequence, `None` if it is empty
pub fn blend_many<I>(pixels: I) -> Option<HsvPixel>
where
    I: IntoIterator<Item = HsvPixel>,
{
    pixels.into_iter().reduce(blend_hsv)
}
