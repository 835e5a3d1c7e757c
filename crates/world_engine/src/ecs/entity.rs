//! Entity implementation

use super::components::{BoundingVolume, Transform};
use crate::error::{WorldError, WorldResult};
use crate::foundation::math::{Aabb, Aabb2, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity identifier
///
/// Assigned by the registry on registration, strictly increasing and never
/// reused, so ordering by id is ordering by registration.
///
/// Ids are scoped to one [`WorldRegistry`](crate::ecs::WorldRegistry): every
/// registry counts from 0, so entities of two coexisting registries can carry
/// the same id. Use the [`Handle`](crate::foundation::collections::Handle)
/// together with its registry to tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Id carried by an entity that has not been registered yet
    pub const UNASSIGNED: EntityId = EntityId(u64::MAX);

    /// Wrap a raw id
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw id
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Gameplay category of an entity, used only as a query filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeTag(pub u32);

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type {}", self.0)
    }
}

/// A simulation object: identity, category, transform and bounding volume
///
/// Built by gameplay code, then handed to
/// [`WorldRegistry::add_entity`](crate::ecs::WorldRegistry::add_entity),
/// which assigns the id and takes ownership.
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    tag: TypeTag,
    transform: Transform,
    bounds: BoundingVolume,
}

impl Entity {
    /// Create an unregistered entity with an identity transform
    pub fn new(tag: TypeTag, local_bounds: Aabb) -> Self {
        Self {
            id: EntityId::UNASSIGNED,
            tag,
            transform: Transform::identity(),
            bounds: BoundingVolume::new(local_bounds),
        }
    }

    /// Builder pattern: Set transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.set_transform(transform);
        self
    }

    /// Builder pattern: Set translation
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.transform.set_translation(translation);
        self
    }

    /// Registry id, [`EntityId::UNASSIGNED`] before registration
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Gameplay category
    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    /// Current transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable transform; setters invalidate the cached world bounds
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Replace the whole transform
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.bounds.invalidate();
    }

    /// Reference point used by location queries
    pub fn position(&self) -> Vec3 {
        self.transform.translation()
    }

    /// Model-space bounding box
    pub fn local_bounds(&self) -> &Aabb {
        self.bounds.local()
    }

    /// World-space bounding box
    pub fn world_bounds(&self) -> Aabb {
        self.bounds.world(&self.transform)
    }

    /// World-space bounding box projected onto the XY plane
    pub fn world_bounds_2d(&self) -> Aabb2 {
        self.bounds.world_2d(&self.transform)
    }

    pub(crate) fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    /// Reject entities whose spatial state would poison queries
    pub(crate) fn validate(&self) -> WorldResult<()> {
        if !self.transform.is_finite() {
            return Err(WorldError::InvalidArgument(format!(
                "entity of {} has a non-finite transform",
                self.tag
            )));
        }
        if !self.local_bounds().is_valid() {
            return Err(WorldError::InvalidArgument(format!(
                "entity of {} has inverted or non-finite local bounds",
                self.tag
            )));
        }
        Ok(())
    }
}
