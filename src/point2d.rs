/// A 2D vector: parametric (u, v) coordinates or a position in pixels.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

use std::ops::{Add, Mul, Sub};

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Point2D { x, y }
    }

    pub fn lerp(self, other: Point2D, t: f64) -> Point2D {
        self + (other - self) * t
    }
}

impl Add for Point2D {
    type Output = Point2D;
    fn add(self, other: Point2D) -> Point2D {
        Point2D { x: self.x + other.x, y: self.y + other.y }
    }
}

impl Sub for Point2D {
    type Output = Point2D;
    fn sub(self, other: Point2D) -> Point2D {
        Point2D { x: self.x - other.x, y: self.y - other.y }
    }
}

impl Mul<f64> for Point2D {
    type Output = Point2D;
    fn mul(self, scalar: f64) -> Point2D {
        Point2D { x: self.x * scalar, y: self.y * scalar }
    }
}

#[inline(always)]
pub fn perp(vec: Point2D) -> Point2D {
    Point2D { x: vec.y, y: -vec.x }
}

#[inline(always)]
pub fn dot2(a: Point2D, b: Point2D) -> f64 {
    a.x * b.x + a.y * b.y
}
