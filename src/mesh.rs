use log::debug;

use crate::surface::BezierSurface;
use crate::triangle::{Triangle, Vertex};

/// Upper bound accepted by the frame configuration.
pub const MAX_RESOLUTION: usize = 50;

/// Triangulated patch in object space.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
    pub resolution: usize,
}

impl Mesh {
    /// Tessellates `surface` into `2 · resolution²` triangles.
    ///
    /// The (u, v) square is cut into `resolution × resolution` cells, each
    /// split along the same diagonal into (u1,v1)-(u2,v1)-(u1,v2) and
    /// (u2,v1)-(u2,v2)-(u1,v2), so every triangle has the same winding in
    /// parameter space. A resolution of 0 gives an empty mesh.
    pub fn generate(surface: &BezierSurface, resolution: usize) -> Mesh {
        if resolution == 0 {
            return Mesh { triangles: Vec::new(), resolution };
        }

        // Evaluate every grid corner once; neighbouring cells share them.
        let stride = resolution + 1;
        let step = |k: usize| k as f64 / resolution as f64;
        let mut samples: Vec<Vertex> = Vec::with_capacity(stride * stride);
        for i in 0..stride {
            for j in 0..stride {
                samples.push(surface.evaluate(step(i), step(j)));
            }
        }
        let at = |i: usize, j: usize| samples[i * stride + j];

        let mut triangles = Vec::with_capacity(2 * resolution * resolution);
        for i in 0..resolution {
            for j in 0..resolution {
                let p11 = at(i, j);
                let p21 = at(i + 1, j);
                let p12 = at(i, j + 1);
                let p22 = at(i + 1, j + 1);

                triangles.push(Triangle { a: p11, b: p21, c: p12 });
                triangles.push(Triangle { a: p21, b: p22, c: p12 });
            }
        }

        debug!("tessellated surface at resolution {resolution}: {} triangles", triangles.len());
        Mesh { triangles, resolution }
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::ControlGrid;
    use crate::point2d::{Point2D, dot2, perp};

    /// Signed area of a triangle in parameter space.
    fn uv_signed_area(tri: &Triangle) -> f64 {
        let (a, b, c) = (tri.a.uv, tri.b.uv, tri.c.uv);
        dot2(c - a, perp(b - a)) / 2.0
    }

    fn surface() -> BezierSurface {
        BezierSurface::new(ControlGrid::saddle())
    }

    #[test]
    fn triangle_count_is_twice_resolution_squared() {
        let s = surface();
        for resolution in [1, 2, 3, 7, 20] {
            let mesh = Mesh::generate(&s, resolution);
            assert_eq!(mesh.len(), 2 * resolution * resolution);
            assert_eq!(mesh.resolution, resolution);
        }
    }

    #[test]
    fn uv_stays_in_unit_square() {
        let mesh = Mesh::generate(&surface(), 9);
        for tri in &mesh.triangles {
            for v in tri.vertices() {
                assert!((0.0..=1.0).contains(&v.uv.x), "u = {}", v.uv.x);
                assert!((0.0..=1.0).contains(&v.uv.y), "v = {}", v.uv.y);
            }
        }
    }

    #[test]
    fn winding_is_consistent() {
        let mesh = Mesh::generate(&surface(), 6);
        let first = uv_signed_area(&mesh.triangles[0]).signum();
        assert_ne!(first, 0.0);
        for tri in &mesh.triangles {
            assert_eq!(uv_signed_area(tri).signum(), first);
        }
    }

    #[test]
    fn cells_cover_parameter_square() {
        let resolution = 5;
        let mesh = Mesh::generate(&surface(), resolution);
        let total: f64 = mesh.triangles.iter().map(|t| uv_signed_area(t).abs()).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn resolution_zero_is_empty() {
        assert!(Mesh::generate(&surface(), 0).is_empty());
    }

    #[test]
    fn single_cell_uses_corner_samples() {
        let mesh = Mesh::generate(&BezierSurface::new(ControlGrid::plane(1.0)), 1);
        let [first, second] = [mesh.triangles[0], mesh.triangles[1]];
        assert_eq!(first.a.uv, Point2D::new(0.0, 0.0));
        assert_eq!(first.b.uv, Point2D::new(1.0, 0.0));
        assert_eq!(first.c.uv, Point2D::new(0.0, 1.0));
        assert_eq!(second.b.uv, Point2D::new(1.0, 1.0));
    }
}
