use glam::{Affine3A, Mat3, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Rigid pose in the physics engine's native layout: an origin and a unit rotation.
///
/// Matrix forms are derived on demand and never stored, so reading back a
/// transform that was written returns the exact same values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub origin: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        origin: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn from_translation(origin: Vec3) -> Self {
        Self {
            origin,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn from_rotation_translation(rotation: Quat, origin: Vec3) -> Self {
        Self { origin, rotation }
    }

    /// Rotation part as a 3x3 basis.
    pub fn basis(&self) -> Mat3 {
        Mat3::from_quat(self.rotation)
    }

    /// Builds a homogeneous matrix for the rendering layer.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.origin)
    }

    /// Extracts a rigid pose from a matrix. Any scale is discarded.
    pub fn from_matrix(matrix: Mat4) -> Self {
        let (_scale, rotation, origin) = matrix.to_scale_rotation_translation();
        Self {
            origin,
            rotation: rotation.normalize(),
        }
    }

    /// Column-major 16 float layout with the translation in elements 12..15.
    pub fn to_opengl_matrix(&self) -> [f32; 16] {
        self.to_matrix().to_cols_array()
    }

    pub fn from_opengl_matrix(m: &[f32; 16]) -> Self {
        Self::from_matrix(Mat4::from_cols_array(m))
    }

    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_rotation_translation(self.rotation, self.origin)
    }

    pub fn from_affine(affine: Affine3A) -> Self {
        let (_scale, rotation, origin) = affine.to_scale_rotation_translation();
        Self {
            origin,
            rotation: rotation.normalize(),
        }
    }

    /// Composition: applies `other` in the local frame of `self`.
    pub fn mul_transform(&self, other: &Transform) -> Transform {
        Transform {
            origin: self.origin + self.rotation * other.origin,
            rotation: (self.rotation * other.rotation).normalize(),
        }
    }

    pub fn inverse(&self) -> Transform {
        let rotation = self.rotation.inverse();
        Transform {
            origin: rotation * -self.origin,
            rotation,
        }
    }

    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.origin + self.rotation * point
    }

    /// Compares origins component-wise and rotations up to sign, since `q` and `-q`
    /// describe the same orientation.
    pub fn abs_diff_eq(&self, other: &Transform, epsilon: f32) -> bool {
        if !self.origin.abs_diff_eq(other.origin, epsilon) {
            return false;
        }
        self.rotation.abs_diff_eq(other.rotation, epsilon)
            || self.rotation.abs_diff_eq(-other.rotation, epsilon)
    }

    pub(crate) fn with_normalized_rotation(mut self) -> Self {
        self.rotation = self.rotation.normalize();
        self
    }
}

impl From<Transform> for Mat4 {
    fn from(transform: Transform) -> Self {
        transform.to_matrix()
    }
}

impl From<Transform> for Affine3A {
    fn from(transform: Transform) -> Self {
        transform.to_affine()
    }
}

impl From<Affine3A> for Transform {
    fn from(affine: Affine3A) -> Self {
        Transform::from_affine(affine)
    }
}
