use crate::point2d::Point2D;
use crate::point3d::Point3D;

/// A sample of the surface in object space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vertex {
    pub position: Point3D,
    pub tangent_u: Point3D,
    pub tangent_v: Point3D,
    /// Unit normal, oriented towards the viewer (non-negative z).
    pub normal: Point3D,
    /// Parametric coordinates, doubling as texture coordinates.
    pub uv: Point2D,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Triangle {
    pub a: Vertex,
    pub b: Vertex,
    pub c: Vertex,
}

impl Triangle {
    pub fn vertices(&self) -> [Vertex; 3] {
        [self.a, self.b, self.c]
    }
}

/// A vertex after rotation and projection.
///
/// `x` and `y` are pixel coordinates, `z` is depth (larger is nearer). The
/// remaining fields are in rotated view space and are interpolated across
/// the triangle for shading.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenVertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub position: Point3D,
    pub normal: Point3D,
    pub tangent_u: Point3D,
    pub tangent_v: Point3D,
    pub uv: Point2D,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenTriangle {
    pub a: ScreenVertex,
    pub b: ScreenVertex,
    pub c: ScreenVertex,
}

impl ScreenTriangle {
    pub fn vertices(&self) -> [ScreenVertex; 3] {
        [self.a, self.b, self.c]
    }

    pub fn is_finite(&self) -> bool {
        self.vertices().iter().all(|v| v.x.is_finite() && v.y.is_finite() && v.z.is_finite())
    }
}
