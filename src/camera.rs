/// Projection constants: how view-space units map to pixels.
///
/// The projection divides by `1 + z·k` with `k = -1 / eye_distance`, which
/// places the eye on the +z axis looking towards -z. Without an eye distance
/// the projection is orthographic.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    /// Pixels per view-space unit.
    pub scale: f64,
    pub eye_distance: Option<f64>,
}

impl Camera {
    pub fn orthographic(scale: f64) -> Self {
        Self { scale, eye_distance: None }
    }

    pub fn perspective(scale: f64, eye_distance: f64) -> Self {
        Self { scale, eye_distance: Some(eye_distance) }
    }

    /// The factor `k` of the perspective divisor `1 + z·k`.
    pub fn perspective_factor(&self) -> f64 {
        match self.eye_distance {
            Some(d) if d > 0.0 => -1.0 / d,
            _ => 0.0,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera::perspective(150.0, 5.0)
    }
}
