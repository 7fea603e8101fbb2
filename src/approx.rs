//! Approximate equality of floating-point values, for tests and sanity checks.

use crate::color::Color;
use crate::point2d::Point2D;
use crate::point3d::Point3D;

/// Default tolerance used by [`assert_approx_eq!`](crate::assert_approx_eq).
pub const DEFAULT_EPSILON: f64 = 1e-6;

pub trait ApproxEq {
    fn approx_eq_eps(&self, other: &Self, eps: f64) -> bool;

    fn approx_eq(&self, other: &Self) -> bool {
        self.approx_eq_eps(other, DEFAULT_EPSILON)
    }
}

impl ApproxEq for f64 {
    fn approx_eq_eps(&self, other: &Self, eps: f64) -> bool {
        (self - other).abs() <= eps
    }
}

impl ApproxEq for Point2D {
    fn approx_eq_eps(&self, other: &Self, eps: f64) -> bool {
        self.x.approx_eq_eps(&other.x, eps) && self.y.approx_eq_eps(&other.y, eps)
    }
}

impl ApproxEq for Point3D {
    fn approx_eq_eps(&self, other: &Self, eps: f64) -> bool {
        self.x.approx_eq_eps(&other.x, eps)
            && self.y.approx_eq_eps(&other.y, eps)
            && self.z.approx_eq_eps(&other.z, eps)
    }
}

impl ApproxEq for Color {
    fn approx_eq_eps(&self, other: &Self, eps: f64) -> bool {
        self.r.approx_eq_eps(&other.r, eps)
            && self.g.approx_eq_eps(&other.g, eps)
            && self.b.approx_eq_eps(&other.b, eps)
    }
}

/// Asserts that two values are equal within a tolerance.
///
/// ```
/// # use bezier_rusterizer::assert_approx_eq;
/// assert_approx_eq!(0.1 + 0.2, 0.3);
/// assert_approx_eq!(1.0, 1.05, eps = 0.1);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr) => {
        $crate::assert_approx_eq!($a, $b, eps = $crate::approx::DEFAULT_EPSILON)
    };
    ($a:expr, $b:expr, eps = $eps:expr) => {{
        use $crate::approx::ApproxEq;
        match (&$a, &$b) {
            (a, b) => assert!(
                ApproxEq::approx_eq_eps(a, b, $eps),
                "assertion failed: `{:?} ≅ {:?}` (eps = {})",
                a,
                b,
                $eps
            ),
        }
    }};
}
