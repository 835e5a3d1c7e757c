//! Query shapes accepted by views and the world registry
//!
//! Two different questions are asked of an entity:
//! - [`Region`] tests its *position* (the transform translation) for
//!   containment. The bounding volume plays no part.
//! - [`OverlapShape`] tests its *world bounding volume* for overlap.

use super::entity::Entity;
use crate::error::{WorldError, WorldResult};
use crate::foundation::math::{Aabb, Aabb2, Circle, Sphere, Vec3};
use crate::physics::collision::{aabb_aabb, aabb_aabb_3d, circle_aabb, sphere_aabb};

/// Interval that an entity's position must lie in
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Region {
    /// XY interval; Z is ignored
    Planar(Aabb2),
    /// Full 3D interval
    Volume(Aabb),
}

impl Region {
    /// Boundary-inclusive containment of `point`
    pub fn contains(&self, point: Vec3) -> bool {
        match self {
            Self::Planar(aabb) => aabb.contains_point(point.xy()),
            Self::Volume(aabb) => aabb.contains_point(point),
        }
    }

    /// Check the region is well formed
    pub fn validate(&self) -> WorldResult<()> {
        let valid = match self {
            Self::Planar(aabb) => aabb.is_valid(),
            Self::Volume(aabb) => aabb.is_valid(),
        };
        if valid {
            Ok(())
        } else {
            Err(WorldError::InvalidArgument(format!("malformed region {self:?}")))
        }
    }
}

impl From<Aabb2> for Region {
    fn from(aabb: Aabb2) -> Self {
        Self::Planar(aabb)
    }
}

impl From<Aabb> for Region {
    fn from(aabb: Aabb) -> Self {
        Self::Volume(aabb)
    }
}

/// Shape that an entity's world bounding volume must overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlapShape {
    /// XY box against the XY projection of the volume
    Planar(Aabb2),
    /// 3D box against the full volume
    Volume(Aabb),
    /// Circle against the XY projection of the volume
    Circle(Circle),
    /// Sphere against the full volume
    Sphere(Sphere),
}

impl OverlapShape {
    /// Boundary-inclusive overlap with `entity`'s world bounding volume
    pub fn overlaps(&self, entity: &Entity) -> bool {
        match self {
            Self::Planar(aabb) => aabb_aabb(&entity.world_bounds_2d(), aabb),
            Self::Volume(aabb) => aabb_aabb_3d(&entity.world_bounds(), aabb),
            Self::Circle(circle) => circle_aabb(circle, &entity.world_bounds_2d()),
            Self::Sphere(sphere) => sphere_aabb(sphere, &entity.world_bounds()),
        }
    }

    /// Check the shape is well formed (finite, ordered, non-negative radius)
    pub fn validate(&self) -> WorldResult<()> {
        let valid = match self {
            Self::Planar(aabb) => aabb.is_valid(),
            Self::Volume(aabb) => aabb.is_valid(),
            Self::Circle(circle) => circle.is_valid(),
            Self::Sphere(sphere) => sphere.is_valid(),
        };
        if valid {
            Ok(())
        } else {
            Err(WorldError::InvalidArgument(format!("malformed overlap shape {self:?}")))
        }
    }
}

impl From<Aabb2> for OverlapShape {
    fn from(aabb: Aabb2) -> Self {
        Self::Planar(aabb)
    }
}

impl From<Aabb> for OverlapShape {
    fn from(aabb: Aabb) -> Self {
        Self::Volume(aabb)
    }
}

impl From<Circle> for OverlapShape {
    fn from(circle: Circle) -> Self {
        Self::Circle(circle)
    }
}

impl From<Sphere> for OverlapShape {
    fn from(sphere: Sphere) -> Self {
        Self::Sphere(sphere)
    }
}
