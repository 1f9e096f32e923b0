// Capture: shrink the 280×280 canvas to the 28×28 MNIST grid and turn every
// cell into one grayscale byte.
// Visual expectation: the HUD preview is a blocky 28×28 copy of your drawing,
// and the same 784 numbers end up in the saved CSV row.

use crate::types::{FrameBuffer, GRID_SIZE, PIXEL_COUNT};
use clap::ValueEnum;
use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgb, RgbImage};

/// How the canvas is shrunk to the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Resample {
    /// Exact area mean over each source block (10×10 for 280→28).
    #[default]
    Box,
    /// Pick the source pixel nearest each cell center.
    Nearest,
    /// Linear filter from the `image` crate.
    Triangle,
}

/// Downsample `fb` to GRID_SIZE×GRID_SIZE and return row-major gray values.
/// Same buffer in, same vector out: there is no state between calls.
pub fn capture(fb: &FrameBuffer, filter: Resample) -> Vec<u8> {
    let small = match filter {
        Resample::Box => box_downsample(fb, GRID_SIZE, GRID_SIZE),
        Resample::Nearest => image_downsample(fb, FilterType::Nearest),
        Resample::Triangle => image_downsample(fb, FilterType::Triangle),
    };
    let pixels: Vec<u8> = small.pixels().map(|p| gray(p.0)).collect();
    debug_assert_eq!(pixels.len(), PIXEL_COUNT);
    pixels
}

/// Unweighted mean of R, G and B, rounded half up.
#[inline]
pub fn gray([r, g, b]: [u8; 3]) -> u8 {
    ((r as u32 + g as u32 + b as u32 + 1) / 3) as u8
}

/// View the packed 0x00RRGGBB buffer as an RGB image.
pub fn to_rgb_image(fb: &FrameBuffer) -> RgbImage {
    ImageBuffer::from_fn(fb.width as u32, fb.height as u32, |x, y| {
        let (r, g, b) = FrameBuffer::rgb(fb.pixels[y as usize * fb.width + x as usize]);
        Rgb([r, g, b])
    })
}

fn image_downsample(fb: &FrameBuffer, filter: FilterType) -> RgbImage {
    imageops::resize(&to_rgb_image(fb), GRID_SIZE as u32, GRID_SIZE as u32, filter)
}

/// Box filter: every output cell is the per-channel mean of the source pixels
/// that fall inside it, rounded to the nearest integer.
pub fn box_downsample(fb: &FrameBuffer, out_w: usize, out_h: usize) -> RgbImage {
    let mut out = RgbImage::new(out_w as u32, out_h as u32);
    if fb.width == 0 || fb.height == 0 {
        return out;
    }

    for cy in 0..out_h {
        // Source rows [y0, y1) for this cell; never empty even when upscaling.
        let y0 = cy * fb.height / out_h;
        let y1 = ((cy + 1) * fb.height / out_h).max(y0 + 1);
        for cx in 0..out_w {
            let x0 = cx * fb.width / out_w;
            let x1 = ((cx + 1) * fb.width / out_w).max(x0 + 1);

            let (mut sr, mut sg, mut sb) = (0u32, 0u32, 0u32);
            for y in y0..y1 {
                let row = y * fb.width;
                for &px in &fb.pixels[row + x0..row + x1] {
                    let (r, g, b) = FrameBuffer::rgb(px);
                    sr += r as u32;
                    sg += g as u32;
                    sb += b as u32;
                }
            }

            let n = ((y1 - y0) * (x1 - x0)) as u32;
            let mean = |s: u32| ((s + n / 2) / n) as u8;
            out.put_pixel(cx as u32, cy as u32, Rgb([mean(sr), mean(sg), mean(sb)]));
        }
    }
    out
}
