#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

impl Point3D {
    pub const ZERO: Point3D = Point3D { x: 0.0, y: 0.0, z: 0.0 };
    /// Unit vector pointing at the viewer.
    pub const UP: Point3D = Point3D { x: 0.0, y: 0.0, z: 1.0 };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Point3D { x, y, z }
    }

    pub fn length(self) -> f64 {
        dot3(self, self).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Linear interpolation, `t = 0` gives `self` and `t = 1` gives `other`.
    pub fn lerp(self, other: Point3D, t: f64) -> Point3D {
        self + (other - self) * t
    }
}

impl Add for Point3D {
    type Output = Point3D;
    fn add(self, other: Point3D) -> Point3D {
        Point3D { x: self.x + other.x, y: self.y + other.y, z: self.z + other.z }
    }
}

impl AddAssign for Point3D {
    fn add_assign(&mut self, other: Point3D) {
        *self = *self + other;
    }
}

impl Sub for Point3D {
    type Output = Point3D;
    fn sub(self, other: Point3D) -> Point3D {
        Point3D { x: self.x - other.x, y: self.y - other.y, z: self.z - other.z }
    }
}

impl Neg for Point3D {
    type Output = Point3D;
    fn neg(self) -> Point3D {
        Point3D { x: -self.x, y: -self.y, z: -self.z }
    }
}

impl Mul<f64> for Point3D {
    type Output = Point3D;
    fn mul(self, scalar: f64) -> Point3D {
        Point3D { x: self.x * scalar, y: self.y * scalar, z: self.z * scalar }
    }
}

impl Div<f64> for Point3D {
    type Output = Point3D;
    fn div(self, scalar: f64) -> Point3D {
        Point3D { x: self.x / scalar, y: self.y / scalar, z: self.z / scalar }
    }
}

pub fn dot3(a: Point3D, b: Point3D) -> f64 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

pub fn cross3(a: Point3D, b: Point3D) -> Point3D {
    Point3D {
        x: a.y * b.z - a.z * b.y,
        y: a.z * b.x - a.x * b.z,
        z: a.x * b.y - a.y * b.x,
    }
}

/// Returns the unit vector in the direction of `vec`.
///
/// The zero vector (and anything too short to divide by) normalizes to the
/// zero vector, never to NaN.
pub fn normalize(vec: Point3D) -> Point3D {
    let length = vec.length();
    if length > f64::EPSILON { vec / length } else { Point3D::ZERO }
}
