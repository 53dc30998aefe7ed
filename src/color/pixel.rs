use crate::color::Hsv;

/// HSV pixel used inside layers, before conversion to RGB
///
/// Hue and saturation are 0-255. The value channel is wider than a byte
/// because merging particles sums brightness; it is saturated to 255 only
/// when the pixel is converted for display (see [`HsvPixel::to_hsv`]).
/// A value of 0 means "unlit" and is the identity for [`super::blend_hsv`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HsvPixel {
    pub hue: u8,
    pub sat: u8,
    pub val: u16,
}

impl HsvPixel {
    /// Unlit pixel
    pub const BLANK: Self = Self {
        hue: 0,
        sat: 0,
        val: 0,
    };

    pub const fn new(hue: u8, sat: u8, val: u16) -> Self {
        Self { hue, sat, val }
    }

    /// Fully saturated color of the given hue and brightness
    pub const fn saturated(hue: u8, val: u16) -> Self {
        Self::new(hue, 255, val)
    }

    pub const fn is_lit(self) -> bool {
        self.val > 0
    }

    /// Same hue and saturation, different brightness
    #[must_use]
    pub const fn with_val(self, val: u16) -> Self {
        Self { val, ..self }
    }

    /// Convert to an 8-bit HSV color, saturating the value channel
    #[allow(clippy::cast_possible_truncation)]
    pub const fn to_hsv(self) -> Hsv {
        let val = if self.val > 255 { 255 } else { self.val as u8 };
        Hsv {
            hue: self.hue,
            sat: self.sat,
            val,
        }
    }
}

impl From<Hsv> for HsvPixel {
    fn from(hsv: Hsv) -> Self {
        Self::new(hsv.hue, hsv.sat, u16::from(hsv.val))
    }
}

/// Reduce a hue offset onto the 0..255 hue circle
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn wrap_hue(hue: i32) -> u8 {
    hue.rem_euclid(255) as u8
}
