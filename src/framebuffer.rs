use crate::draw::{Colour, DrawingBackend};

/// Software render target, one `u32` per pixel, row-major.
pub struct Framebuffer {
    pub pixels: Vec<u32>,
    pub width: usize,
    pub height: usize,
    pub background: Colour,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize, background: Colour) -> Self {
        Self {
            pixels: vec![background; width * height],
            width,
            height,
            background,
        }
    }

    /// Reallocates only when the size actually changes.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixels = vec![self.background; width * height];
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Colour> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    #[inline]
    fn plot(&mut self, x: i32, y: i32, colour: Colour) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = colour;
        }
    }
}

impl DrawingBackend for Framebuffer {
    fn clear_scene(&mut self) {
        self.pixels.fill(self.background);
    }

    /// Covers pixels whose centres fall inside the rectangle. Oversized
    /// rectangles are clipped to the buffer; empty or negative ones draw
    /// nothing.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, colour: Colour) {
        if !(width > 0.0 && height > 0.0) {
            return;
        }
        let w = self.width as f32;
        let h = self.height as f32;
        let x0 = x.round().clamp(0.0, w) as usize;
        let x1 = (x + width).round().clamp(0.0, w) as usize;
        let y0 = y.round().clamp(0.0, h) as usize;
        let y1 = (y + height).round().clamp(0.0, h) as usize;
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for row in self.pixels[y0 * self.width..y1 * self.width].chunks_exact_mut(self.width) {
            row[x0..x1].fill(colour);
        }
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, colour: Colour) {
        if !(x1.is_finite() && y1.is_finite() && x2.is_finite() && y2.is_finite()) {
            return;
        }
        let (mut x, mut y) = (x1.round() as i32, y1.round() as i32);
        let (xe, ye) = (x2.round() as i32, y2.round() as i32);

        // Bresenham, all octants
        let dx = (xe - x).abs();
        let dy = -(ye - y).abs();
        let sx = if x < xe { 1 } else { -1 };
        let sy = if y < ye { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x, y, colour);
            if x == xe && y == ye {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}
