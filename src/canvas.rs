// The drawing surface: a 280×280 black bitmap that white dabs are stamped into.
// Visual expectation: holding the pointer down and moving it leaves a trail of
// solid white discs; clearing turns the whole square black again.

use crate::types::{BLACK, CANVAS_SIZE, FrameBuffer, Stamp, WHITE};

/// Radius of one dab, in canvas pixels.
pub const DAB_RADIUS: i32 = 8;

/// Whether the pointer is currently laying down a stroke.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawState {
    #[default]
    Idle,
    Active,
}

/// Pointer input as the canvas sees it, already in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pointer {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
    Leave,
}

pub struct Canvas {
    bitmap: FrameBuffer,
    stamp: Stamp,
    state: DrawState,
}

impl Canvas {
    /// A black canvas with the default dab radius.
    pub fn new() -> Self {
        Self::with_radius(DAB_RADIUS)
    }

    pub fn with_radius(radius: i32) -> Self {
        Self {
            bitmap: FrameBuffer::filled(CANVAS_SIZE, CANVAS_SIZE, BLACK),
            stamp: make_disc_stamp(radius),
            state: DrawState::Idle,
        }
    }

    /// Reset every pixel to black. The drawing state is left alone.
    pub fn clear(&mut self) {
        self.bitmap.fill(BLACK);
    }

    /// Paint one white disc centered on the pixel under (x, y).
    /// Parts of the disc outside the canvas are clipped; NaN coordinates paint nothing.
    pub fn stroke_at(&mut self, x: f32, y: f32) {
        if x.is_nan() || y.is_nan() {
            return;
        }
        dab(&mut self.bitmap, x.floor() as i32, y.floor() as i32, &self.stamp, WHITE);
    }

    /// Advance the idle/active state machine and dab where a stroke is live.
    /// Returns true when the bitmap changed.
    pub fn handle_pointer(&mut self, pointer: Pointer) -> bool {
        match (self.state, pointer) {
            (_, Pointer::Down { x, y }) => {
                self.state = DrawState::Active;
                self.stroke_at(x, y);
                true
            }
            (DrawState::Active, Pointer::Move { x, y }) => {
                self.stroke_at(x, y);
                true
            }
            (DrawState::Idle, Pointer::Move { .. }) => false,
            (_, Pointer::Up | Pointer::Leave) => {
                self.state = DrawState::Idle;
                false
            }
        }
    }

    pub fn state(&self) -> DrawState {
        self.state
    }

    pub fn bitmap(&self) -> &FrameBuffer {
        &self.bitmap
    }

    pub fn radius(&self) -> i32 {
        self.stamp.radius
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

/// Hard-edged disc: a cell is covered when its center is within `radius` of the middle cell.
pub fn make_disc_stamp(radius: i32) -> Stamp {
    let radius = radius.max(0);
    let r2 = radius * radius;
    let mut covered = Vec::with_capacity(((2 * radius + 1) * (2 * radius + 1)) as usize);
    for y in -radius..=radius {
        for x in -radius..=radius {
            covered.push(x * x + y * y <= r2);
        }
    }
    Stamp { radius, covered }
}

/// Stamp `color` into the buffer wherever the stamp covers, centered at (cx, cy).
pub fn dab(fb: &mut FrameBuffer, cx: i32, cy: i32, stamp: &Stamp, color: u32) {
    let w = fb.width as i32;
    let h = fb.height as i32;
    let r = stamp.radius;
    // Disc entirely off the buffer; also keeps the offsets below from overflowing.
    if cx.saturating_add(r) < 0 || cy.saturating_add(r) < 0 || cx.saturating_sub(r) >= w || cy.saturating_sub(r) >= h {
        return;
    }
    let d = 2 * r + 1;

    for ky in 0..d {
        for kx in 0..d {
            let sx = cx + kx - r;
            let sy = cy + ky - r;
            if sx < 0 || sy < 0 || sx >= w || sy >= h { continue; }
            if stamp.covered[(ky * d + kx) as usize] {
                fb.pixels[sy as usize * fb.width + sx as usize] = color;
            }
        }
    }
}
