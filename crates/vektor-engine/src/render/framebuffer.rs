use std::io::{self, Write};

use bytemuck::{Pod, Zeroable};

use crate::paint::Color;

/// One stored pixel, straight-alpha sRGB.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Color> for Rgba8 {
    #[inline]
    fn from(c: Color) -> Self {
        Self { r: c.r, g: c.g, b: c.b, a: c.a }
    }
}

impl Rgba8 {
    /// Source-over composite of `src` onto `self`.
    #[inline]
    fn blend(self, src: Color) -> Rgba8 {
        match src.a {
            255 => src.into(),
            0 => self,
            a => {
                let a = a as u32;
                let inv = 255 - a;
                let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * inv + 127) / 255) as u8;
                Rgba8 {
                    r: mix(src.r, self.r),
                    g: mix(src.g, self.g),
                    b: mix(src.b, self.b),
                    a: (a + (self.a as u32 * inv + 127) / 255) as u8,
                }
            }
        }
    }
}

/// CPU pixel buffer, row-major, top-left origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl Framebuffer {
    /// Allocates a transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self { width, height, pixels: vec![Rgba8::default(); len] }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, 4 per pixel.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    /// Overwrites every pixel with `color` (no blending).
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color.into());
    }

    /// Blends `color` over pixels `[x0, x1)` of row `y`. Out-of-range spans are clipped.
    pub fn blend_span(&mut self, y: u32, x0: u32, x1: u32, color: Color) {
        if y >= self.height {
            return;
        }
        let x1 = x1.min(self.width);
        if x0 >= x1 {
            return;
        }
        let start = self.index(x0, y);
        let end = self.index(x1, y);
        for px in &mut self.pixels[start..end] {
            *px = px.blend(color);
        }
    }

    /// Number of pixels exactly equal to `color`.
    pub fn count(&self, color: Color) -> usize {
        let needle = Rgba8::from(color);
        self.pixels.iter().filter(|&&p| p == needle).count()
    }

    /// Writes a binary PPM (P6). Alpha is dropped.
    pub fn write_ppm<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        let mut row = Vec::with_capacity(self.width as usize * 3);
        for line in self.as_bytes().chunks(self.width.max(1) as usize * 4) {
            row.clear();
            for rgba in line.chunks_exact(4) {
                row.extend_from_slice(&rgba[..3]);
            }
            out.write_all(&row)?;
        }
        out.flush()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
