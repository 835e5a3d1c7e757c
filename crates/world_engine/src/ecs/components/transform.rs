//! Entity transform with a cached transformation matrix
//!
//! Translation, Euler rotation and scale are stored as plain values. The 4x4
//! matrix is derived lazily: every setter marks the transform dirty and
//! stamps a new revision, and [`Transform::transformation_matrix`] only
//! rebuilds the matrix when the dirty flag is set.
//!
//! Revisions come from one process-wide counter, so two transforms share a
//! revision only if one is a clone of the other with no setter called since.

use crate::foundation::math::{Mat4, Vec2, Vec3};
use crate::foundation::math::utils::is_finite3;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_REVISION: AtomicU64 = AtomicU64::new(0);

fn next_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

/// Order in which Euler rotations are applied
///
/// The first named axis is applied first: `Xyz` rotates about X, then Y,
/// then Z, so its matrix is `Rz * Ry * Rx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RotationOrder {
    /// X, then Y, then Z
    #[default]
    Xyz,
    /// X, then Z, then Y
    Xzy,
    /// Y, then X, then Z
    Yxz,
    /// Y, then Z, then X
    Yzx,
    /// Z, then X, then Y
    Zxy,
    /// Z, then Y, then X
    Zyx,
}

impl RotationOrder {
    /// Rotation matrix for Euler angles (radians) composed in this order
    pub fn rotation_matrix(self, angles: &Vec3) -> Mat4 {
        let rx = Mat4::from_axis_angle(&Vec3::x_axis(), angles.x);
        let ry = Mat4::from_axis_angle(&Vec3::y_axis(), angles.y);
        let rz = Mat4::from_axis_angle(&Vec3::z_axis(), angles.z);

        match self {
            Self::Xyz => rz * ry * rx,
            Self::Xzy => ry * rz * rx,
            Self::Yxz => rz * rx * ry,
            Self::Yzx => rx * rz * ry,
            Self::Zxy => ry * rx * rz,
            Self::Zyx => rx * ry * rz,
        }
    }
}

/// Translation, rotation and scale of an entity in world space
#[derive(Debug, Clone)]
pub struct Transform {
    translation: Vec3,
    rotation: Vec3,
    rotation_order: RotationOrder,
    scale: Vec3,
    revision: u64,
    dirty: Cell<bool>,
    matrix: Cell<Mat4>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::zeros(),
            rotation: Vec3::zeros(),
            rotation_order: RotationOrder::default(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            revision: next_revision(),
            dirty: Cell::new(true),
            matrix: Cell::new(Mat4::identity()),
        }
    }
}

impl PartialEq for Transform {
    fn eq(&self, other: &Self) -> bool {
        self.translation == other.translation
            && self.rotation == other.rotation
            && self.rotation_order == other.rotation_order
            && self.scale == other.scale
    }
}

impl Transform {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from translation only
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Builder pattern: Set translation
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.set_translation(translation);
        self
    }

    /// Builder pattern: Set Euler rotation (radians)
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.set_rotation(rotation);
        self
    }

    /// Builder pattern: Set rotation order
    pub fn with_rotation_order(mut self, order: RotationOrder) -> Self {
        self.set_rotation_order(order);
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.set_scale(scale);
        self
    }

    /// Builder pattern: Set scale (uniform)
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.set_scale(Vec3::new(scale, scale, scale));
        self
    }

    /// World space translation
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// Euler angles in radians
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Order the Euler angles are composed in
    pub fn rotation_order(&self) -> RotationOrder {
        self.rotation_order
    }

    /// Scale factors
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Set the translation
    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
        self.mark_dirty();
    }

    /// Move by `offset`
    pub fn translate(&mut self, offset: Vec3) {
        self.translation += offset;
        self.mark_dirty();
    }

    /// Set the Euler angles (radians)
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.mark_dirty();
    }

    /// Set the rotation composition order
    pub fn set_rotation_order(&mut self, order: RotationOrder) {
        self.rotation_order = order;
        self.mark_dirty();
    }

    /// Set the scale
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.mark_dirty();
    }

    /// True if the cached matrix is stale
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Stamp of the current values, renewed by every setter
    ///
    /// Dependent caches compare against it. Unique across all transforms
    /// except clones.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Translate * rotate * scale, rebuilt only when dirty
    pub fn transformation_matrix(&self) -> Mat4 {
        if self.dirty.get() {
            let matrix = Mat4::new_translation(&self.translation)
                * self.rotation_order.rotation_matrix(&self.rotation)
                * Mat4::new_nonuniform_scaling(&self.scale);
            self.matrix.set(matrix);
            self.dirty.set(false);
        }
        self.matrix.get()
    }

    /// True when every component is a finite number
    pub fn is_finite(&self) -> bool {
        is_finite3(&self.translation) && is_finite3(&self.rotation) && is_finite3(&self.scale)
    }

    /// Narrow to the XY plane, keeping only the rotation about Z
    pub fn to_2d(&self) -> Transform2D {
        Transform2D {
            translation: self.translation.xy(),
            rotation: self.rotation.z,
            scale: self.scale.xy(),
        }
    }

    /// Narrow to the X axis
    pub fn to_1d(&self) -> Transform1D {
        Transform1D {
            translation: self.translation.x,
            scale: self.scale.x,
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty.set(true);
        self.revision = next_revision();
    }
}

/// Planar transform produced by [`Transform::to_2d`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// Translation in the XY plane
    pub translation: Vec2,
    /// Rotation about Z in radians
    pub rotation: f32,
    /// Scale along X and Y
    pub scale: Vec2,
}

impl Transform2D {
    /// Narrow to the X axis
    pub fn to_1d(&self) -> Transform1D {
        Transform1D {
            translation: self.translation.x,
            scale: self.scale.x,
        }
    }
}

/// Single-axis transform produced by `to_1d`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform1D {
    /// Translation along X
    pub translation: f32,
    /// Scale along X
    pub scale: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-5;

    fn apply(transform: &Transform, point: Vec3) -> Vec3 {
        transform
            .transformation_matrix()
            .transform_point(&Point3::from(point))
            .coords
    }

    #[test]
    fn test_transform_identity() {
        let transform = Transform::identity();

        assert_eq!(transform.translation(), Vec3::zeros());
        assert_eq!(transform.scale(), Vec3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(transform.transformation_matrix(), Mat4::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_matrix_applies_scale_then_rotation_then_translation() {
        let transform = Transform::from_translation(Vec3::new(1.0, 2.0, 3.0))
            .with_rotation(Vec3::new(0.0, 0.0, FRAC_PI_2))
            .with_scale(Vec3::new(2.0, 1.0, 1.0));

        let moved = apply(&transform, Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(moved, Vec3::new(1.0, 4.0, 3.0), epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_order_changes_result() {
        let angles = Vec3::new(FRAC_PI_2, FRAC_PI_2, 0.0);
        let xyz = Transform::identity().with_rotation(angles);
        let zyx = Transform::identity()
            .with_rotation(angles)
            .with_rotation_order(RotationOrder::Zyx);

        let up = Vec3::new(0.0, 1.0, 0.0);
        assert_relative_eq!(apply(&xyz, up), Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(apply(&zyx, up), Vec3::new(0.0, 0.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_dirty_flag_tracks_setters() {
        let mut transform = Transform::identity();
        assert!(transform.is_dirty());

        let _ = transform.transformation_matrix();
        assert!(!transform.is_dirty());

        let before = transform.revision();
        transform.translate(Vec3::new(0.5, 0.0, 0.0));
        assert!(transform.is_dirty());
        assert!(transform.revision() > before);

        let matrix = transform.transformation_matrix();
        assert!(!transform.is_dirty());
        assert_relative_eq!(matrix[(0, 3)], 0.5, epsilon = EPSILON);
    }

    #[test]
    fn test_cached_matrix_is_reused_until_dirty() {
        let transform = Transform::from_translation(Vec3::new(4.0, 0.0, 0.0));
        let first = transform.transformation_matrix();
        let second = transform.transformation_matrix();
        assert_eq!(first, second);
        assert!(!transform.is_dirty());
    }

    #[test]
    fn test_narrowing_is_lossy() {
        let transform = Transform::from_translation(Vec3::new(1.0, 2.0, 3.0))
            .with_rotation(Vec3::new(0.1, 0.2, 0.3))
            .with_scale(Vec3::new(4.0, 5.0, 6.0));

        let planar = transform.to_2d();
        assert_eq!(planar.translation, Vec2::new(1.0, 2.0));
        assert_eq!(planar.rotation, 0.3);
        assert_eq!(planar.scale, Vec2::new(4.0, 5.0));

        let line = planar.to_1d();
        assert_eq!(line, transform.to_1d());
        assert_eq!(line.translation, 1.0);
        assert_eq!(line.scale, 4.0);
    }

    #[test]
    fn test_revisions_unique_across_transforms() {
        let first = Transform::identity();
        let second = Transform::identity();
        assert_ne!(first.revision(), second.revision());

        let copy = first.clone();
        assert_eq!(copy.revision(), first.revision());
        let moved = copy.with_translation(Vec3::new(1.0, 0.0, 0.0));
        assert_ne!(moved.revision(), first.revision());
    }

    #[test]
    fn test_non_finite_transform_detected() {
        let transform = Transform::identity().with_uniform_scale(f32::NAN);
        assert!(!transform.is_finite());
    }
}
