//! RGBA canvas primitives.

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
}

/// A simple owned RGBA pixel buffer.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub width: usize,
    pub height: usize,
    /// RGBA, 4 bytes per pixel, row-major
    pub pixels: Vec<u8>,
}

impl Canvas {
    /// Create a canvas filled with a background color.
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        let mut pixels = Vec::with_capacity(width * height * 4);
        for _ in 0..width * height {
            pixels.extend_from_slice(&[background.r, background.g, background.b, background.a]);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Source-over blend a color onto one pixel. Out-of-bounds is a no-op.
    pub fn blend_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * 4;
        if color.a == 255 {
            self.pixels[idx..idx + 4].copy_from_slice(&[color.r, color.g, color.b, 255]);
            return;
        }
        if color.a == 0 {
            return;
        }
        let sa = color.a as u32;
        let da = 255 - sa;
        for (c, &s) in [color.r, color.g, color.b].iter().enumerate() {
            let d = self.pixels[idx + c] as u32;
            self.pixels[idx + c] = ((s as u32 * sa + d * da) / 255) as u8;
        }
        let dst_a = self.pixels[idx + 3] as u32;
        self.pixels[idx + 3] = (sa + dst_a * da / 255).min(255) as u8;
    }

    /// Fill a rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: Color) {
        for yy in y..(y + h).min(self.height) {
            for xx in x..(x + w).min(self.width) {
                self.blend_pixel(xx, yy, color);
            }
        }
    }

    /// Copy another canvas onto this one at an offset (no blending; the
    /// source panel already carries its background).
    pub fn blit(&mut self, src: &Canvas, x: usize, y: usize) {
        for sy in 0..src.height {
            let dy = y + sy;
            if dy >= self.height {
                break;
            }
            let copy_w = src.width.min(self.width.saturating_sub(x));
            if copy_w == 0 {
                break;
            }
            let src_start = sy * src.width * 4;
            let dst_start = (dy * self.width + x) * 4;
            self.pixels[dst_start..dst_start + copy_w * 4]
                .copy_from_slice(&src.pixels[src_start..src_start + copy_w * 4]);
        }
    }
}
