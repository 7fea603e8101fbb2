use std::path::Path;

use bytemuck::cast_slice;
use image::{ExtendedColorType, ImageResult};

use crate::color::Color;

/// Frame buffer plus depth buffer of the same dimensions.
///
/// Pixels are packed RGBA8 words (see [`Color::pack`]). Depth grows towards
/// the viewer; a cleared buffer holds `-inf` everywhere. All accessors are
/// bounds-checked: out-of-range writes are ignored, reads return `None`.
pub struct ScreenSpace {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u32>,
    pub depth: Vec<f64>,
}

impl ScreenSpace {
    pub fn new(width: usize, height: usize) -> Self {
        let size_calc = width * height;
        Self {
            width,
            height,
            rgba: vec![Color::BLACK.pack(); size_calc],
            depth: vec![f64::NEG_INFINITY; size_calc],
        }
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.rgba[i] = color.pack();
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<u32> {
        self.index(x, y).map(|i| self.rgba[i])
    }

    pub fn set_depth(&mut self, x: usize, y: usize, value: f64) {
        if let Some(i) = self.index(x, y) {
            self.depth[i] = value;
        }
    }

    pub fn get_depth(&self, x: usize, y: usize) -> Option<f64> {
        self.index(x, y).map(|i| self.depth[i])
    }

    /// Returns true if `depth` is strictly nearer than the stored value.
    #[inline]
    pub fn passes_depth(&self, x: usize, y: usize, depth: f64) -> bool {
        self.index(x, y).is_some_and(|i| depth > self.depth[i])
    }

    /// Overwrites every pixel with `background` and resets the depth buffer.
    pub fn clear(&mut self, background: Color) {
        self.rgba.fill(background.pack());
        self.depth.fill(f64::NEG_INFINITY);
    }

    /// Reallocates for new dimensions; contents are reset as by `clear`.
    pub fn resize(&mut self, width: usize, height: usize, background: Color) {
        if (width, height) != (self.width, self.height) {
            *self = ScreenSpace::new(width, height);
        }
        self.clear(background);
    }

    /// The frame buffer as raw RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        cast_slice(&self.rgba)
    }

    /// Writes the frame buffer; the format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        image::save_buffer(path, self.as_bytes(), self.width as u32, self.height as u32, ExtendedColorType::Rgba8)
    }
}
