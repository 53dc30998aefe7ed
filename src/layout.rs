use alloc::vec;
use alloc::vec::Vec;

use crate::error::ConfigError;

/// Dimensions of the pixel grid: parallel strips of equal length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripLayout {
    strips: u8,
    leds: u16,
}

impl StripLayout {
    /// Create a layout, rejecting empty dimensions
    pub const fn new(strips: u8, leds: u16) -> Result<Self, ConfigError> {
        if strips == 0 || leds == 0 {
            return Err(ConfigError::EmptyLayout);
        }
        Ok(Self { strips, leds })
    }

    /// Number of parallel strips
    pub const fn strips(self) -> usize {
        self.strips as usize
    }

    /// Number of LEDs on each strip
    pub const fn leds(self) -> usize {
        self.leds as usize
    }

    /// Total number of pixels in the grid
    pub const fn len(self) -> usize {
        self.strips() * self.leds()
    }

    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Linear index of a coordinate, `None` when out of range
    pub const fn index(self, coord: PixelCoord) -> Option<usize> {
        if coord.strip >= self.strips || coord.led >= self.leds {
            return None;
        }
        Some(coord.strip as usize * self.leds() + coord.led as usize)
    }

    /// Iterate over strip indexes
    pub fn strip_ids(self) -> impl Iterator<Item = u8> {
        0..self.strips
    }
}

/// Address of a single pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PixelCoord {
    pub strip: u8,
    pub led: u16,
}

impl PixelCoord {
    pub const fn new(strip: u8, led: u16) -> Self {
        Self { strip, led }
    }
}

/// Row-major pixel grid with fixed dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<T> {
    layout: StripLayout,
    pixels: Vec<T>,
}

impl<T: Copy> Frame<T> {
    /// Create a frame with every pixel set to `value`
    pub fn new(layout: StripLayout, value: T) -> Self {
        Self {
            layout,
            pixels: vec![value; layout.len()],
        }
    }

    pub const fn layout(&self) -> StripLayout {
        self.layout
    }

    pub fn get(&self, coord: PixelCoord) -> Option<T> {
        self.layout.index(coord).map(|i| self.pixels[i])
    }

    pub fn get_mut(&mut self, coord: PixelCoord) -> Option<&mut T> {
        let i = self.layout.index(coord)?;
        self.pixels.get_mut(i)
    }

    /// Set a pixel; out-of-range coordinates are ignored
    pub fn set(&mut self, coord: PixelCoord, value: T) {
        if let Some(pixel) = self.get_mut(coord) {
            *pixel = value;
        }
    }

    /// Set the same LED on every strip
    pub fn set_column(&mut self, led: u16, value: T) {
        for strip in self.layout.strip_ids() {
            self.set(PixelCoord::new(strip, led), value);
        }
    }

    pub fn fill(&mut self, value: T) {
        self.pixels.fill(value);
    }

    /// Pixels of a single strip (empty if the strip does not exist)
    pub fn row(&self, strip: usize) -> &[T] {
        let leds = self.layout.leds();
        self.pixels
            .get(strip * leds..(strip + 1) * leds)
            .unwrap_or(&[])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.pixels.chunks_exact(self.layout.leds())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.pixels
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.pixels
    }
}
