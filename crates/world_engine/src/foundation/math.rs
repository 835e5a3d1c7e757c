//! Math utilities and types
//!
//! Provides the vector aliases used throughout the engine and the plain
//! geometric value types (intervals, circles, spheres, rays) that the
//! collision primitives and world queries operate on. These types carry
//! arithmetic and containment helpers only; intersection logic lives in
//! [`crate::physics::collision`].

use serde::{Deserialize, Serialize};

pub use nalgebra::{Matrix4, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Axis-aligned interval in 3D space (a 3D AABB)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner of the box
    pub min: Vec3,
    /// Maximum corner of the box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given half-extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Build the tightest box around two arbitrary corners
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if this AABB contains a point (boundary inclusive)
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Closest point inside the box to `point`
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.sup(&self.min).inf(&self.max)
    }

    /// Grow the box by `amount` on every side
    pub fn expanded(&self, amount: Vec3) -> Self {
        Self {
            min: self.min - amount,
            max: self.max + amount,
        }
    }

    /// True when every coordinate is finite and `min <= max` on each axis
    pub fn is_valid(&self) -> bool {
        self.min.iter().chain(self.max.iter()).all(|c| c.is_finite())
            && self.min.x <= self.max.x
            && self.min.y <= self.max.y
            && self.min.z <= self.max.z
    }

    /// Project onto the XY plane
    pub fn to_2d(&self) -> Aabb2 {
        Aabb2::new(self.min.xy(), self.max.xy())
    }
}

/// Axis-aligned interval in the XY plane (a 2D AABB)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb2 {
    /// Minimum corner
    pub min: Vec2,
    /// Maximum corner
    pub max: Vec2,
}

impl Aabb2 {
    /// Create a new 2D AABB from min and max points
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Create a 2D AABB centered at a point with given half-extents
    pub fn from_center_extents(center: Vec2, extents: Vec2) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Center of the box
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Half-size of the box
    pub fn extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// Check if this box contains a point (boundary inclusive)
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y
    }

    /// Closest point inside the box to `point`
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.sup(&self.min).inf(&self.max)
    }

    /// Grow the box by `amount` on every side
    pub fn expanded(&self, amount: Vec2) -> Self {
        Self {
            min: self.min - amount,
            max: self.max + amount,
        }
    }

    /// True when every coordinate is finite and `min <= max` on each axis
    pub fn is_valid(&self) -> bool {
        self.min.iter().chain(self.max.iter()).all(|c| c.is_finite())
            && self.min.x <= self.max.x
            && self.min.y <= self.max.y
    }
}

/// A circle in the XY plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Center of the circle
    pub center: Vec2,
    /// Radius of the circle
    pub radius: f32,
}

impl Circle {
    /// Creates a new circle with the given center and radius
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check whether a point lies inside or on the circle
    pub fn contains_point(&self, point: Vec2) -> bool {
        (point - self.center).magnitude_squared() <= self.radius * self.radius
    }

    /// True when the center is finite and the radius is finite and non-negative
    pub fn is_valid(&self) -> bool {
        self.center.iter().all(|c| c.is_finite()) && self.radius.is_finite() && self.radius >= 0.0
    }
}

/// A sphere in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl Sphere {
    /// Creates a new sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check whether a point lies inside or on the sphere
    pub fn contains_point(&self, point: Vec3) -> bool {
        (point - self.center).magnitude_squared() <= self.radius * self.radius
    }

    /// True when the center is finite and the radius is finite and non-negative
    pub fn is_valid(&self) -> bool {
        self.center.iter().all(|c| c.is_finite()) && self.radius.is_finite() && self.radius >= 0.0
    }
}

/// A finite 2D ray (segment) parametrized over `t` in `[0, 1]`
///
/// `point_at(0.0)` is the origin and `point_at(1.0)` is `origin + delta`.
/// Unlike a picking ray, the direction is not normalized: its length is the
/// reach of the ray.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray2 {
    /// Start of the ray
    pub origin: Vec2,
    /// Offset from the start to the end of the ray
    pub delta: Vec2,
}

impl Ray2 {
    /// Creates a ray from an origin and an offset
    pub fn new(origin: Vec2, delta: Vec2) -> Self {
        Self { origin, delta }
    }

    /// Creates a ray running from `start` to `end`
    pub fn between(start: Vec2, end: Vec2) -> Self {
        Self {
            origin: start,
            delta: end - start,
        }
    }

    /// End point of the ray
    pub fn end(&self) -> Vec2 {
        self.origin + self.delta
    }

    /// Get the point at parameter t
    pub fn point_at(&self, t: f32) -> Vec2 {
        self.origin + self.delta * t
    }

    /// A ray with no extent
    pub fn is_degenerate(&self) -> bool {
        self.delta.x == 0.0 && self.delta.y == 0.0
    }
}

/// Math utility functions
pub mod utils {
    /// True when all components are finite
    pub fn is_finite3(v: &super::Vec3) -> bool {
        v.iter().all(|c| c.is_finite())
    }
}
