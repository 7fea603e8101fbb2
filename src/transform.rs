use crate::point3d::{Point3D, normalize};

/// Two-axis rotation of the surface: first about Z by `alpha`, then about X
/// by `beta`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub alpha: f64,
    pub beta: f64,
    basis: (Point3D, Point3D, Point3D),
}

fn transform_vector(ihat: Point3D, jhat: Point3D, khat: Point3D, v: Point3D) -> Point3D {
    ihat * v.x + jhat * v.y + khat * v.z
}

impl Transform {
    pub fn new(alpha: f64, beta: f64) -> Self {
        let mut transform = Self { alpha, beta, basis: (Point3D::ZERO, Point3D::ZERO, Point3D::ZERO) };
        transform.basis = transform.get_basis_vectors();
        transform
    }

    pub fn identity() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn update_transform(&mut self, new_alpha: f64, new_beta: f64) {
        *self = Self::new(new_alpha, new_beta);
    }

    /// Images of the unit axes under the combined rotation, i.e. the columns
    /// of its matrix.
    pub fn get_basis_vectors(&self) -> (Point3D, Point3D, Point3D) {
        let (sa, ca) = self.alpha.sin_cos();
        let (sb, cb) = self.beta.sin_cos();
        let ihat_alpha = Point3D { x: ca, y: sa, z: 0.0 };
        let jhat_alpha = Point3D { x: -sa, y: ca, z: 0.0 };
        let khat_alpha = Point3D { x: 0.0, y: 0.0, z: 1.0 };
        let ihat_beta = Point3D { x: 1.0, y: 0.0, z: 0.0 };
        let jhat_beta = Point3D { x: 0.0, y: cb, z: sb };
        let khat_beta = Point3D { x: 0.0, y: -sb, z: cb };
        let ihat = transform_vector(ihat_beta, jhat_beta, khat_beta, ihat_alpha);
        let jhat = transform_vector(ihat_beta, jhat_beta, khat_beta, jhat_alpha);
        let khat = transform_vector(ihat_beta, jhat_beta, khat_beta, khat_alpha);
        (ihat, jhat, khat)
    }

    pub fn rotate(&self, point: Point3D) -> Point3D {
        let (ihat, jhat, khat) = self.basis;
        transform_vector(ihat, jhat, khat, point)
    }

    /// Rotates a direction and re-normalizes it. The rotation is orthonormal,
    /// so no inverse transpose is needed.
    pub fn rotate_normal(&self, normal: Point3D) -> Point3D {
        normalize(self.rotate(normal))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
