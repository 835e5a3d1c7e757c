//! Swept (moving vs static) intersection tests
//!
//! A shape moving along `motion` hits a static shape exactly when its center
//! ray hits the static shape grown by the moving shape (Minkowski sum). Both
//! tests below build that ray and reuse the ray primitives, so only one code
//! path has to be right.
//!
//! Only the first operand moves. For two moving bodies pass the relative
//! motion `motion_a - motion_b`.

use super::primitives::{ray_aabb_hit, ray_circle_span, RayAabbHit, RaySpan};
use crate::foundation::math::{Aabb2, Circle, Ray2, Vec2};

/// Check if `moving`, travelling by `motion`, touches `target`
pub fn swept_circle_circle(moving: &Circle, target: &Circle, motion: Vec2) -> bool {
    swept_circle_circle_span(moving, target, motion).is_some()
}

/// Swept circle test reporting the fraction of `motion` at first and last contact
pub fn swept_circle_circle_span(moving: &Circle, target: &Circle, motion: Vec2) -> Option<RaySpan> {
    let ray = Ray2::new(moving.center, motion);
    let expanded = Circle::new(target.center, moving.radius + target.radius);
    ray_circle_span(&ray, &expanded)
}

/// Check if `moving`, travelling by `motion`, touches `target`
pub fn swept_aabb_aabb(moving: &Aabb2, target: &Aabb2, motion: Vec2) -> bool {
    swept_aabb_aabb_hit(moving, target, motion).is_some()
}

/// Swept box test
///
/// Contact points are positions of the moving box's center; `t` is the
/// fraction of `motion` travelled and the normals are faces of `target`.
pub fn swept_aabb_aabb_hit(moving: &Aabb2, target: &Aabb2, motion: Vec2) -> Option<RayAabbHit> {
    let ray = Ray2::new(moving.center(), motion);
    ray_aabb_hit(&ray, &target.expanded(moving.extents()))
}
