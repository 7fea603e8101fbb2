use std::ops::Mul;

/// Linear RGB color with channels in [0, 1].
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const MAGENTA: Color = Color::new(1.0, 0.0, 1.0);
    pub const DARK_GRAY: Color = Color::new(0.27, 0.27, 0.27);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Color { r, g, b }
    }

    pub fn from_rgba8([r, g, b, _a]: [u8; 4]) -> Self {
        Color::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Clamps every channel to [0, 1]. NaN channels become 0.
    pub fn clamped(self) -> Self {
        fn clamp01(c: f64) -> f64 {
            if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) }
        }
        Color::new(clamp01(self.r), clamp01(self.g), clamp01(self.b))
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let c = self.clamped();
        let q = |v: f64| (v * 255.0).round() as u8;
        [q(c.r), q(c.g), q(c.b), 255]
    }

    /// Packs into the frame buffer's pixel format: RGBA bytes in memory order,
    /// alpha always opaque.
    pub fn pack(self) -> u32 {
        u32::from_le_bytes(self.to_rgba8())
    }

    pub fn lerp(self, other: Color, t: f64) -> Color {
        Color::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }
}

/// Channel-wise product.
impl Mul for Color {
    type Output = Color;
    fn mul(self, other: Color) -> Color {
        Color::new(self.r * other.r, self.g * other.g, self.b * other.b)
    }
}

impl Mul<f64> for Color {
    type Output = Color;
    fn mul(self, scalar: f64) -> Color {
        Color::new(self.r * scalar, self.g * scalar, self.b * scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_is_rgba_in_memory_order() {
        let packed = Color::new(1.0, 0.0, 0.0).pack();
        assert_eq!(packed.to_le_bytes(), [255, 0, 0, 255]);
        assert_eq!(Color::from_rgba8(packed.to_le_bytes()), Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn to_rgba8_clamps_out_of_range() {
        assert_eq!(Color::new(2.0, -1.0, f64::NAN).to_rgba8(), [255, 0, 0, 255]);
    }

    #[test]
    fn product_is_channel_wise() {
        let c = Color::new(0.5, 1.0, 0.25) * Color::new(0.5, 0.5, 1.0);
        assert_eq!(c, Color::new(0.25, 0.5, 0.25));
    }
}
