// Core types shared by the canvas, the sampler and the dataset.

use crate::error::Error;
use std::fmt::{self, Display};

/// Side length of the drawing canvas in pixels.
pub const CANVAS_SIZE: usize = 280;
/// Side length of the captured grid (MNIST is 28×28).
pub const GRID_SIZE: usize = 28;
/// Number of values in one captured pixel vector.
pub const PIXEL_COUNT: usize = GRID_SIZE * GRID_SIZE;

pub const BLACK: u32 = 0x00_00_00_00;
pub const WHITE: u32 = 0x00_FF_FF_FF;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A buffer filled with a single color.
    pub fn filled(width: usize, height: usize, color: u32) -> Self {
        Self { width, height, pixels: vec![color; width * height] }
    }

    pub fn fill(&mut self, color: u32) {
        for p in &mut self.pixels { *p = color; }
    }

    /// Split a packed 0x00RRGGBB pixel into its channels.
    #[inline]
    pub fn rgb(px: u32) -> (u8, u8, u8) {
        (((px >> 16) & 0xFF) as u8, ((px >> 8) & 0xFF) as u8, (px & 0xFF) as u8)
    }

    #[inline]
    pub fn pack(r: u8, g: u8, b: u8) -> u32 {
        ((r as u32) << 16) | ((g as u32) << 8) | b as u32
    }
}

/// Precomputed circular footprint of one dab.
/// Visual: the solid white disc that appears under the pointer.
#[derive(Clone, Debug)]
pub struct Stamp {
    pub radius: i32,        // pixels from center to edge
    pub covered: Vec<bool>, // (2r+1)*(2r+1), centered; true = painted
}

/// A digit label, always in 0..=9.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label(u8);

impl Label {
    pub fn new(value: u8) -> Result<Self, Error> {
        if value <= 9 { Ok(Self(value)) } else { Err(Error::InvalidLabel(value)) }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// One labeled capture. Fields are private so a sample can't change after it is made.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sample {
    label: Label,
    pixels: Vec<u8>,
}

impl Sample {
    pub fn new(label: Label, pixels: Vec<u8>) -> Result<Self, Error> {
        if pixels.len() != PIXEL_COUNT {
            return Err(Error::PixelCount { expected: PIXEL_COUNT, actual: pixels.len() });
        }
        Ok(Self { label, pixels })
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}
