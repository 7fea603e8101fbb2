use log::warn;

use crate::camera::Camera;
use crate::point2d::{Point2D, dot2, perp};
use crate::transform::Transform;
use crate::triangle::{ScreenTriangle, ScreenVertex, Triangle, Vertex};

/// Perspective divisors at or below this collapse the vertex.
const MIN_DIVISOR: f64 = 1e-6;

pub fn signed_triangle_area(t1: Point2D, t2: Point2D, p: Point2D) -> f64 {
    let ap = p - t1;
    let t1t2perp: Point2D = perp(t2 - t1);
    dot2(ap, t1t2perp) / 2.0
}

pub fn screen_area(tri: &ScreenTriangle) -> f64 {
    let [a, b, c] = tri.vertices().map(|v| Point2D::new(v.x, v.y));
    signed_triangle_area(a, b, c)
}

/// Rotates `vertex` and projects it onto the canvas.
///
/// `screen = rotated.xy / (1 + rotated.z·k) · scale + resolution / 2`, with
/// depth the rotated z. Returns `None` if the vertex lies at or behind the
/// eye, where the divisor is not positive.
#[inline(always)]
pub fn vertex_to_screen(
    vertex: &Vertex,
    transform: &Transform,
    camera: &Camera,
    resolution: Point2D,
) -> Option<ScreenVertex> {
    let view = transform.rotate(vertex.position);
    let divisor = 1.0 + view.z * camera.perspective_factor();
    if !(divisor > MIN_DIVISOR) {
        return None;
    }
    let pixels_per_unit = camera.scale / divisor;

    // Apply scaling and shift to center screen (mul add for perf)
    let screen_x = view.x.mul_add(pixels_per_unit, resolution.x * 0.5);
    let screen_y = view.y.mul_add(pixels_per_unit, resolution.y * 0.5);

    Some(ScreenVertex {
        x: screen_x,
        y: screen_y,
        z: view.z,
        position: view,
        normal: transform.rotate_normal(vertex.normal),
        tangent_u: transform.rotate(vertex.tangent_u),
        tangent_v: transform.rotate(vertex.tangent_v),
        uv: vertex.uv,
    })
}

pub fn triangle_to_screen(
    tri: &Triangle,
    transform: &Transform,
    camera: &Camera,
    resolution: Point2D,
) -> Option<ScreenTriangle> {
    let project = |v: &Vertex| vertex_to_screen(v, transform, camera, resolution);
    match (project(&tri.a), project(&tri.b), project(&tri.c)) {
        (Some(a), Some(b), Some(c)) => Some(ScreenTriangle { a, b, c }),
        _ => {
            warn!("triangle crosses the eye plane, skipping");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;
    use crate::point3d::Point3D;

    fn vertex(x: f64, y: f64, z: f64) -> Vertex {
        Vertex {
            position: Point3D::new(x, y, z),
            tangent_u: Point3D::new(1.0, 0.0, 0.0),
            tangent_v: Point3D::new(0.0, 1.0, 0.0),
            normal: Point3D::UP,
            uv: Point2D::new(0.25, 0.75),
        }
    }

    #[test]
    fn unrotated_projection_is_scale_plus_center() {
        let camera = Camera::orthographic(40.0);
        let res = Point2D::new(200.0, 100.0);
        let s = vertex_to_screen(&vertex(1.0, -0.5, 2.0), &Transform::identity(), &camera, res)
            .unwrap();
        assert_approx_eq!(s.x, 140.0);
        assert_approx_eq!(s.y, 30.0);
        assert_approx_eq!(s.z, 2.0);
        assert_approx_eq!(s.normal, Point3D::UP);
        assert_eq!(s.uv, Point2D::new(0.25, 0.75));
    }

    #[test]
    fn perspective_does_not_affect_z_zero_plane() {
        let camera = Camera::perspective(40.0, 5.0);
        let res = Point2D::new(200.0, 100.0);
        let s = vertex_to_screen(&vertex(1.0, 1.0, 0.0), &Transform::identity(), &camera, res)
            .unwrap();
        assert_approx_eq!(s.x, 140.0);
        assert_approx_eq!(s.y, 90.0);
    }

    #[test]
    fn nearer_points_appear_larger() {
        let camera = Camera::perspective(40.0, 5.0);
        let res = Point2D::new(0.0, 0.0);
        let t = Transform::identity();
        let near = vertex_to_screen(&vertex(1.0, 0.0, 1.0), &t, &camera, res).unwrap();
        let far = vertex_to_screen(&vertex(1.0, 0.0, -1.0), &t, &camera, res).unwrap();
        assert!(near.x > far.x);
        assert!(near.z > far.z);
    }

    #[test]
    fn vertex_behind_eye_is_rejected() {
        let camera = Camera::perspective(40.0, 5.0);
        let res = Point2D::new(100.0, 100.0);
        assert!(vertex_to_screen(&vertex(0.0, 0.0, 5.0), &Transform::identity(), &camera, res).is_none());
        assert!(vertex_to_screen(&vertex(0.0, 0.0, 9.0), &Transform::identity(), &camera, res).is_none());
    }

    #[test]
    fn area_sign_follows_winding() {
        let (a, b, c) = (Point2D::new(0.0, 0.0), Point2D::new(4.0, 0.0), Point2D::new(0.0, 2.0));
        assert_approx_eq!(signed_triangle_area(a, b, c).abs(), 4.0);
        assert_approx_eq!(signed_triangle_area(a, b, c), -signed_triangle_area(a, c, b));
    }
}
