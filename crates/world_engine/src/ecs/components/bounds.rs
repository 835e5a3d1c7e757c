//! Local and world space bounding volumes
//!
//! An entity's bounding box is authored in model space and never changes.
//! The world space box is derived from the transform by scaling and then
//! translating both corners; rotation is ignored and the result stays axis
//! aligned. The derived box is cached and rebuilt only when the
//! transform revision moves.

use super::transform::Transform;
use crate::foundation::math::{Aabb, Aabb2};
use std::cell::Cell;

/// Model-space AABB with a lazily derived world-space AABB
#[derive(Debug, Clone)]
pub struct BoundingVolume {
    local: Aabb,
    world: Cell<Aabb>,
    computed_for: Cell<Option<u64>>,
}

impl BoundingVolume {
    /// Wrap a model-space box
    pub fn new(local: Aabb) -> Self {
        Self {
            local,
            world: Cell::new(local),
            computed_for: Cell::new(None),
        }
    }

    /// The model-space box
    pub fn local(&self) -> &Aabb {
        &self.local
    }

    /// World-space box for `transform`, recomputed if the transform changed
    pub fn world(&self, transform: &Transform) -> Aabb {
        if self.computed_for.get() != Some(transform.revision()) {
            self.world.set(Self::to_world(&self.local, transform));
            self.computed_for.set(Some(transform.revision()));
        }
        self.world.get()
    }

    /// XY projection of [`BoundingVolume::world`]
    pub fn world_2d(&self, transform: &Transform) -> Aabb2 {
        self.world(transform).to_2d()
    }

    /// Forget the cached world box
    pub fn invalidate(&self) {
        self.computed_for.set(None);
    }

    /// `local * scale + translation` on both corners
    ///
    /// A negative scale flips an axis; the corners are re-sorted so the
    /// result keeps `min <= max`.
    pub fn to_world(local: &Aabb, transform: &Transform) -> Aabb {
        let scale = transform.scale();
        let translation = transform.translation();
        Aabb::from_corners(
            local.min.component_mul(&scale) + translation,
            local.max.component_mul(&scale) + translation,
        )
    }
}
