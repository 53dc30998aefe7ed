/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Screen two 8-bit values: `255 - (255 - a) * (255 - b) / 255`
///
/// Black is the identity, white absorbs.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn screen8(a: u8, b: u8) -> u8 {
    let inv = (255 - a as u16) * (255 - b as u16) / 255;
    (255 - inv) as u8
}

/// Map a fraction in [0, 1) onto 0-255, saturating outside the range
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn frac8(frac: f32) -> u8 {
    libm::floorf(frac.clamp(0.0, 1.0) * 255.0) as u8
}
