//! Phong reflection model, evaluated per pixel.

use crate::color::Color;
use crate::point2d::Point2D;
use crate::point3d::{Point3D, cross3, dot3, normalize};
use crate::raster::Frag;
use crate::texture::{NormalMap, Texture, TextureFilter};

/// Direction from the surface towards the viewer, fixed in view space: the
/// eye sits on +z looking down -z.
pub const VIEW_DIRECTION: Point3D = Point3D::UP;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PhongParameters {
    /// Diffuse coefficient.
    pub kd: f64,
    /// Specular coefficient.
    pub ks: f64,
    /// Shininess exponent.
    pub m: f64,
    pub light_color: Color,
    pub light_position: Point3D,
}

/// Phong color of a surface point lit by a point light.
///
/// Per channel: `kd·IL·IO·max(0, N·L) + ks·IL·IO·max(0, R·V)^m`, clamped to
/// [0, 1], where `R = 2(N·L)N − L` and `V` is [`VIEW_DIRECTION`]. A zero
/// normal reflects nothing.
pub fn phong_color(position: Point3D, normal: Point3D, material_color: Color, params: &PhongParameters) -> Color {
    let n = normalize(normal);
    if n == Point3D::ZERO {
        return Color::BLACK;
    }
    let l = normalize(params.light_position - position);
    let n_dot_l = dot3(n, l);
    let r = normalize(n * (2.0 * n_dot_l) - l);

    let diffuse = n_dot_l.max(0.0);
    let r_dot_v = dot3(r, VIEW_DIRECTION);
    let specular = if r_dot_v > 0.0 { r_dot_v.powf(params.m) } else { 0.0 };

    let lit = params.light_color * material_color;
    (lit * (params.kd * diffuse + params.ks * specular)).clamped()
}

/// Where a pixel's normal comes from.
#[derive(Debug, Copy, Clone)]
pub enum NormalSource<'a> {
    /// The interpolated geometric normal.
    Geometric,
    /// A normal map in the tangent frame (tangent_u, tangent_v, normal).
    Mapped(&'a NormalMap, TextureFilter),
}

impl NormalSource<'_> {
    pub fn normal_at(&self, frag: &Frag) -> Point3D {
        let geometric = normalize(frag.var.normal);
        match self {
            NormalSource::Geometric => geometric,
            NormalSource::Mapped(map, filter) => {
                let mapped = map.sample_normal(frag.var.uv, *filter);
                to_tangent_frame(mapped, geometric, frag.var.tangent_u, frag.var.tangent_v)
            }
        }
    }
}

/// Expresses a tangent-space vector in the frame spanned by the surface
/// tangents and normal. Falls back to `normal` if the tangents degenerate.
fn to_tangent_frame(v: Point3D, normal: Point3D, tangent_u: Point3D, tangent_v: Point3D) -> Point3D {
    if normal == Point3D::ZERO {
        return normal;
    }
    let t = normalize(tangent_u - normal * dot3(normal, tangent_u));
    if t == Point3D::ZERO {
        return normal;
    }
    let mut b = cross3(normal, t);
    if dot3(b, tangent_v) < 0.0 {
        b = -b;
    }
    normalize(t * v.x + b * v.y + normal * v.z)
}

/// Where a pixel's base (object) color comes from.
#[derive(Debug, Copy, Clone)]
pub enum MaterialSource<'a> {
    Solid(Color),
    Textured(&'a Texture, TextureFilter),
}

impl MaterialSource<'_> {
    pub fn color_at(&self, uv: Point2D) -> Color {
        match self {
            MaterialSource::Solid(color) => *color,
            MaterialSource::Textured(texture, filter) => texture.sample_color(uv, *filter),
        }
    }
}

/// Per-pixel Phong shader combining a normal source and a material source.
#[derive(Debug, Copy, Clone)]
pub struct PhongShader<'a> {
    pub params: PhongParameters,
    pub normals: NormalSource<'a>,
    pub material: MaterialSource<'a>,
}

impl PhongShader<'_> {
    pub fn shade(&self, frag: &Frag) -> Color {
        let normal = self.normals.normal_at(frag);
        let material = self.material.color_at(frag.var.uv);
        phong_color(frag.var.position, normal, material, &self.params)
    }
}
