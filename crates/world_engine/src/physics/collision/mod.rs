//! Geometric collision tests
//!
//! Stateless predicates answering "do these shapes touch, and where".
//! Nothing here resolves collisions; callers get geometric facts only.
//! The module depends on nothing but the math value types, so gameplay code
//! can use it without a world.
//!
//! # Module Organization
//!
//! - [`primitives`] - Exact tests between circles, spheres, boxes and rays
//! - [`swept`] - Moving-vs-static tests reduced to ray tests

pub mod primitives;
pub mod swept;

pub use primitives::{
    aabb_aabb, aabb_aabb_3d, circle_aabb, circle_circle, circle_distance, circle_penetration,
    ray_aabb, ray_aabb_hit, ray_circle, ray_circle_span, sphere_aabb, sphere_sphere,
    RayAabbHit, RayContact, RaySpan,
};
pub use swept::{swept_aabb_aabb, swept_aabb_aabb_hit, swept_circle_circle, swept_circle_circle_span};
