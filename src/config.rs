//! Per-frame parameters, supplied by whoever drives the renderer.

use std::f64::consts::PI;
use std::ops::RangeInclusive;

use crate::camera::Camera;
use crate::color::Color;
use crate::error::ConfigError;
use crate::mesh::MAX_RESOLUTION;
use crate::point3d::Point3D;
use crate::shading::PhongParameters;
use crate::texture::TextureFilter;

pub const RESOLUTION_RANGE: RangeInclusive<usize> = 1..=MAX_RESOLUTION;
pub const ROTATION_RANGE: RangeInclusive<f64> = -PI..=PI;
pub const COEFFICIENT_RANGE: RangeInclusive<f64> = 0.0..=1.0;
pub const SHININESS_RANGE: RangeInclusive<f64> = 1.0..=100.0;
/// Largest canvas side accepted, in pixels.
pub const MAX_CANVAS: usize = 8192;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RenderMode {
    pub filled: bool,
    pub wireframe: bool,
    pub texture: bool,
    pub normal_map: bool,
    pub animate_light: bool,
}

impl Default for RenderMode {
    fn default() -> Self {
        Self { filled: true, wireframe: true, texture: false, normal_map: false, animate_light: false }
    }
}

/// Light orbiting the surface on a horizontal circle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LightAnimation {
    pub radius: f64,
    pub height: f64,
    /// Radians per second.
    pub angular_speed: f64,
}

impl LightAnimation {
    pub fn position_at(&self, time: f64) -> Point3D {
        let (s, c) = (self.angular_speed * time).sin_cos();
        Point3D::new(self.radius * c, self.radius * s, self.height)
    }
}

impl Default for LightAnimation {
    fn default() -> Self {
        Self { radius: 2.0, height: 3.0, angular_speed: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameConfig {
    pub canvas_width: usize,
    pub canvas_height: usize,
    pub resolution: usize,
    /// Rotation about Z, radians.
    pub rotation_alpha: f64,
    /// Rotation about X, radians.
    pub rotation_beta: f64,
    pub kd: f64,
    pub ks: f64,
    pub m: f64,
    pub light_color: Color,
    pub object_color: Color,
    pub light_position: Point3D,
    pub light_animation: LightAnimation,
    /// Seconds since the animation started.
    pub time: f64,
    pub mode: RenderMode,
    pub texture_filter: TextureFilter,
    pub wireframe_color: Color,
    pub background: Color,
    pub camera: Camera,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            resolution: 10,
            rotation_alpha: 0.0,
            rotation_beta: 0.0,
            kd: 0.5,
            ks: 0.5,
            m: 10.0,
            light_color: Color::WHITE,
            object_color: Color::MAGENTA,
            light_position: Point3D::new(0.0, 0.0, 3.0),
            light_animation: LightAnimation::default(),
            time: 0.0,
            mode: RenderMode::default(),
            texture_filter: TextureFilter::Nearest,
            wireframe_color: Color::WHITE,
            background: Color::DARK_GRAY,
            camera: Camera::default(),
        }
    }
}

fn check(name: &'static str, value: f64, range: RangeInclusive<f64>) -> Result<(), ConfigError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError { name, value, range: format!("{}..={}", range.start(), range.end()) })
    }
}

fn check_color(name: &'static str, color: Color) -> Result<(), ConfigError> {
    for channel in [color.r, color.g, color.b] {
        check(name, channel, COEFFICIENT_RANGE)?;
    }
    Ok(())
}

fn check_finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    check(name, value, f64::MIN..=f64::MAX)
}

impl FrameConfig {
    /// Range-checks every parameter before it reaches the renderer.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let canvas = 1.0..=MAX_CANVAS as f64;
        check("canvas_width", self.canvas_width as f64, canvas.clone())?;
        check("canvas_height", self.canvas_height as f64, canvas)?;
        let resolution = *RESOLUTION_RANGE.start() as f64..=*RESOLUTION_RANGE.end() as f64;
        check("resolution", self.resolution as f64, resolution)?;
        check("rotation_alpha", self.rotation_alpha, ROTATION_RANGE)?;
        check("rotation_beta", self.rotation_beta, ROTATION_RANGE)?;
        check("kd", self.kd, COEFFICIENT_RANGE)?;
        check("ks", self.ks, COEFFICIENT_RANGE)?;
        check("m", self.m, SHININESS_RANGE)?;
        check_color("light_color", self.light_color)?;
        check_color("object_color", self.object_color)?;
        check_color("wireframe_color", self.wireframe_color)?;
        check_color("background", self.background)?;
        for (name, v) in [
            ("light_position.x", self.light_position.x),
            ("light_position.y", self.light_position.y),
            ("light_position.z", self.light_position.z),
            ("time", self.time),
            ("light_animation.radius", self.light_animation.radius),
            ("light_animation.height", self.light_animation.height),
            ("light_animation.angular_speed", self.light_animation.angular_speed),
        ] {
            check_finite(name, v)?;
        }
        check("camera.scale", self.camera.scale, f64::MIN_POSITIVE..=f64::MAX)?;
        if let Some(d) = self.camera.eye_distance {
            check("camera.eye_distance", d, f64::MIN_POSITIVE..=f64::MAX)?;
        }
        Ok(())
    }

    /// The light position for this frame, animated if enabled.
    pub fn effective_light_position(&self) -> Point3D {
        if self.mode.animate_light {
            self.light_animation.position_at(self.time)
        } else {
            self.light_position
        }
    }

    pub fn phong_parameters(&self) -> PhongParameters {
        PhongParameters {
            kd: self.kd,
            ks: self.ks,
            m: self.m,
            light_color: self.light_color,
            light_position: self.effective_light_position(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(FrameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let cases: Vec<(&str, FrameConfig)> = vec![
            ("resolution", FrameConfig { resolution: 0, ..Default::default() }),
            ("resolution", FrameConfig { resolution: 51, ..Default::default() }),
            ("kd", FrameConfig { kd: 1.5, ..Default::default() }),
            ("ks", FrameConfig { ks: -0.1, ..Default::default() }),
            ("m", FrameConfig { m: 0.5, ..Default::default() }),
            ("rotation_beta", FrameConfig { rotation_beta: 4.0, ..Default::default() }),
            ("canvas_width", FrameConfig { canvas_width: 0, ..Default::default() }),
            ("light_color", FrameConfig { light_color: Color::new(0.0, 2.0, 0.0), ..Default::default() }),
            ("light_position.z", FrameConfig { light_position: Point3D::new(0.0, 0.0, f64::NAN), ..Default::default() }),
            ("camera.scale", FrameConfig { camera: Camera::orthographic(0.0), ..Default::default() }),
        ];
        for (name, config) in cases {
            let err = config.validate().unwrap_err();
            assert_eq!(err.name, name);
        }
    }

    #[test]
    fn nan_coefficient_is_rejected() {
        let config = FrameConfig { kd: f64::NAN, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn animated_light_orbits() {
        let mut config = FrameConfig::default();
        config.mode.animate_light = true;
        config.light_animation = LightAnimation { radius: 2.0, height: 1.0, angular_speed: 1.0 };
        config.time = std::f64::consts::FRAC_PI_2;
        assert_approx_eq!(config.effective_light_position(), Point3D::new(0.0, 2.0, 1.0));

        config.mode.animate_light = false;
        assert_eq!(config.effective_light_position(), config.light_position);
    }
}
