//! Evaluation of a bicubic Bézier patch.
//!
//! A point on the patch is the tensor product of two cubic Bernstein bases:
//!
//! ```text
//! P(u, v) = Σi Σj B(i, 3, u) · B(j, 3, v) · P[i][j]
//! B(i, n, t) = C(n, i) · t^i · (1 - t)^(n - i)
//! ```
//!
//! The partial derivatives are again Bézier patches, one degree lower in the
//! differentiated direction, built from the differences of adjacent control
//! points.

use crate::control::{ControlGrid, GRID_SIZE};
use crate::point2d::Point2D;
use crate::point3d::{Point3D, cross3, normalize};
use crate::triangle::Vertex;

const DEGREE: usize = GRID_SIZE - 1;

/// Tangent cross products shorter than this are treated as degenerate.
const DEGENERATE_NORMAL: f64 = 1e-12;

/// Binomial coefficients C(3, i) and C(2, i).
const CUBIC_BINOMIALS: [f64; 4] = [1.0, 3.0, 3.0, 1.0];
const QUADRATIC_BINOMIALS: [f64; 3] = [1.0, 2.0, 1.0];

/// Values of the four cubic Bernstein polynomials at `t`.
pub fn bernstein3(t: f64) -> [f64; 4] {
    let s = 1.0 - t;
    std::array::from_fn(|i| {
        CUBIC_BINOMIALS[i] * t.powi(i as i32) * s.powi((DEGREE - i) as i32)
    })
}

/// Values of the three quadratic Bernstein polynomials at `t`, the basis of
/// the derivative of a cubic.
pub fn bernstein2(t: f64) -> [f64; 3] {
    let s = 1.0 - t;
    std::array::from_fn(|i| {
        QUADRATIC_BINOMIALS[i] * t.powi(i as i32) * s.powi((DEGREE - 1 - i) as i32)
    })
}

#[derive(Debug, Clone)]
pub struct BezierSurface {
    grid: ControlGrid,
}

impl BezierSurface {
    pub fn new(grid: ControlGrid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &ControlGrid {
        &self.grid
    }

    /// Evaluates the position of the patch at `(u, v)`.
    pub fn position(&self, u: f64, v: f64) -> Point3D {
        let (bu, bv) = (bernstein3(u), bernstein3(v));
        let p = self.grid.points();
        let mut point = Point3D::ZERO;
        for i in 0..GRID_SIZE {
            for j in 0..GRID_SIZE {
                point += p[i][j] * (bu[i] * bv[j]);
            }
        }
        point
    }

    /// Returns the partial derivatives ∂P/∂u and ∂P/∂v at `(u, v)`.
    pub fn tangents(&self, u: f64, v: f64) -> (Point3D, Point3D) {
        let (bu, bv) = (bernstein3(u), bernstein3(v));
        let (du, dv) = (bernstein2(u), bernstein2(v));
        let p = self.grid.points();
        let n = DEGREE as f64;

        let mut tangent_u = Point3D::ZERO;
        for i in 0..DEGREE {
            for j in 0..GRID_SIZE {
                tangent_u += (p[i + 1][j] - p[i][j]) * (du[i] * bv[j]);
            }
        }
        let mut tangent_v = Point3D::ZERO;
        for i in 0..GRID_SIZE {
            for j in 0..DEGREE {
                tangent_v += (p[i][j + 1] - p[i][j]) * (bu[i] * dv[j]);
            }
        }
        (tangent_u * n, tangent_v * n)
    }

    /// Evaluates position, tangents and unit normal at `(u, v)`.
    ///
    /// The normal is `normalize(tangent_u × tangent_v)`, flipped if needed so
    /// that its z component is non-negative (facing the viewer). Where the
    /// tangents are degenerate, e.g. coincident control points, the normal
    /// falls back to [`Point3D::UP`].
    pub fn evaluate(&self, u: f64, v: f64) -> Vertex {
        let position = self.position(u, v);
        let (tangent_u, tangent_v) = self.tangents(u, v);
        Vertex {
            position,
            tangent_u,
            tangent_v,
            normal: orient_normal(tangent_u, tangent_v),
            uv: Point2D::new(u, v),
        }
    }
}

fn orient_normal(tangent_u: Point3D, tangent_v: Point3D) -> Point3D {
    let n = cross3(tangent_u, tangent_v);
    if !n.is_finite() || n.length() < DEGENERATE_NORMAL {
        return Point3D::UP;
    }
    let n = normalize(n);
    if n.z < 0.0 { -n } else { n }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    fn saddle() -> BezierSurface {
        BezierSurface::new(ControlGrid::saddle())
    }

    #[test]
    fn bernstein_bases_partition_unity() {
        for k in 0..=10 {
            let t = k as f64 / 10.0;
            assert_approx_eq!(bernstein3(t).iter().sum::<f64>(), 1.0);
            assert_approx_eq!(bernstein2(t).iter().sum::<f64>(), 1.0);
        }
    }

    #[test]
    fn corners_interpolate_control_points() {
        let s = saddle();
        let g = s.grid().clone();
        assert_approx_eq!(s.evaluate(0.0, 0.0).position, g.point(0, 0));
        assert_approx_eq!(s.evaluate(1.0, 0.0).position, g.point(3, 0));
        assert_approx_eq!(s.evaluate(0.0, 1.0).position, g.point(0, 3));
        assert_approx_eq!(s.evaluate(1.0, 1.0).position, g.point(3, 3));
    }

    #[test]
    fn tangents_match_finite_differences() {
        let s = saddle();
        let h = 1e-6;
        for &(u, v) in &[(0.25, 0.5), (0.7, 0.1), (0.5, 0.5)] {
            let (tu, tv) = s.tangents(u, v);
            let fu = (s.position(u + h, v) - s.position(u - h, v)) / (2.0 * h);
            let fv = (s.position(u, v + h) - s.position(u, v - h)) / (2.0 * h);
            assert_approx_eq!(tu, fu, eps = 1e-5);
            assert_approx_eq!(tv, fv, eps = 1e-5);
        }
    }

    #[test]
    fn plane_normal_faces_viewer() {
        let s = BezierSurface::new(ControlGrid::plane(1.0));
        for &(u, v) in &[(0.0, 0.0), (0.3, 0.8), (1.0, 1.0)] {
            assert_approx_eq!(s.evaluate(u, v).normal, Point3D::UP);
        }
    }

    #[test]
    fn mirrored_plane_normal_is_flipped_towards_viewer() {
        // Swapping x and y reverses the winding of the tangent frame.
        let grid = ControlGrid::from_fn(|i, j| Point3D::new(j as f64, i as f64, 0.0));
        let s = BezierSurface::new(grid);
        let vertex = s.evaluate(0.5, 0.5);
        assert!(cross3(vertex.tangent_u, vertex.tangent_v).z < 0.0);
        assert_approx_eq!(vertex.normal, Point3D::UP);
    }

    #[test]
    fn saddle_normals_are_unit_and_non_negative_z() {
        let s = saddle();
        for k in 0..=8 {
            for l in 0..=8 {
                let n = s.evaluate(k as f64 / 8.0, l as f64 / 8.0).normal;
                assert_approx_eq!(n.length(), 1.0);
                assert!(n.z >= 0.0);
            }
        }
    }

    #[test]
    fn degenerate_grid_falls_back_to_up() {
        let s = BezierSurface::new(ControlGrid::from_fn(|_, _| Point3D::new(1.0, 2.0, 3.0)));
        let vertex = s.evaluate(0.5, 0.5);
        assert_eq!(vertex.normal, Point3D::UP);
        assert_approx_eq!(vertex.position, Point3D::new(1.0, 2.0, 3.0));
    }
}
