use std::path::Path;

use image::{DynamicImage, GenericImageView};

use crate::color::Color;
use crate::error::TextureError;
use crate::point2d::Point2D;
use crate::point3d::{Point3D, normalize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TextureFilter {
    #[default]
    Nearest,
    Bilinear,
}

/// A pre-decoded RGBA8 image sampled by (u, v) in [0, 1]².
///
/// Row 0 is at v = 0.
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Texture {
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(TextureError::SizeMismatch { width, height, expected, found: rgba.len() });
        }
        Ok(Self { width, height, rgba })
    }

    /// Builds a texture by evaluating `f(x, y)` for every texel.
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 4]) -> Result<Self, TextureError> {
        let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                rgba.extend_from_slice(&f(x, y));
            }
        }
        Self::from_rgba(width, height, rgba)
    }

    /// Decodes an image file. Rows are flipped so that v grows upwards in
    /// the image.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let img: DynamicImage = image::open(path)?;
        let (width, height) = img.dimensions();
        let rgba_img = img.to_rgba8();
        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for y in (0..height).rev() {
            let row_start = (y * width * 4) as usize;
            let row_end = row_start + (width * 4) as usize;
            rgba.extend_from_slice(&rgba_img.as_raw()[row_start..row_end]);
        }
        Self::from_rgba(width, height, rgba)
    }

    fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) * 4) as usize;
        [self.rgba[idx], self.rgba[idx + 1], self.rgba[idx + 2], self.rgba[idx + 3]]
    }

    /// Nearest-texel lookup; coordinates outside [0, 1] are clamped.
    pub fn sample(&self, u: f64, v: f64) -> [u8; 4] {
        let u = clamp_coord(u);
        let v = clamp_coord(v);
        let x = (u * (self.width as f64 - 1.0)).round() as u32;
        let y = (v * (self.height as f64 - 1.0)).round() as u32;
        self.texel(x, y)
    }

    /// Bilinear lookup of the four surrounding texels as a color.
    pub fn sample_bilinear(&self, u: f64, v: f64) -> Color {
        let fx = clamp_coord(u) * (self.width as f64 - 1.0);
        let fy = clamp_coord(v) * (self.height as f64 - 1.0);
        let (x0, y0) = (fx.floor() as u32, fy.floor() as u32);
        let (x1, y1) = ((x0 + 1).min(self.width - 1), (y0 + 1).min(self.height - 1));
        let (tx, ty) = (fx - x0 as f64, fy - y0 as f64);

        let c = |x, y| Color::from_rgba8(self.texel(x, y));
        let top = c(x0, y0).lerp(c(x1, y0), tx);
        let bottom = c(x0, y1).lerp(c(x1, y1), tx);
        top.lerp(bottom, ty)
    }

    pub fn sample_color(&self, uv: Point2D, filter: TextureFilter) -> Color {
        match filter {
            TextureFilter::Nearest => Color::from_rgba8(self.sample(uv.x, uv.y)),
            TextureFilter::Bilinear => self.sample_bilinear(uv.x, uv.y),
        }
    }
}

fn clamp_coord(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

/// A texture whose channels encode unit vectors in the surface's tangent
/// frame: `n = normalize(channel / 255 · 2 − 1)`.
#[derive(Debug, Clone)]
pub struct NormalMap {
    texture: Texture,
}

impl NormalMap {
    pub fn new(texture: Texture) -> Self {
        Self { texture }
    }

    /// Samples and decodes the normal at `uv`. A texel that decodes to the
    /// zero vector yields the tangent-frame up vector (0, 0, 1).
    pub fn sample_normal(&self, uv: Point2D, filter: TextureFilter) -> Point3D {
        let c = self.texture.sample_color(uv, filter);
        let n = normalize(Point3D::new(c.r * 2.0 - 1.0, c.g * 2.0 - 1.0, c.b * 2.0 - 1.0));
        if n == Point3D::ZERO { Point3D::UP } else { n }
    }
}

impl From<Texture> for NormalMap {
    fn from(texture: Texture) -> Self {
        Self::new(texture)
    }
}
