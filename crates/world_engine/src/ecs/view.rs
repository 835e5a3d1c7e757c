//! Filterable working set of borrowed entities
//!
//! An [`EntityView`] is the scratch space for composing a query: start from
//! some entities, narrow with filters, union with other views, and finally
//! materialize. Members are de-duplicated by [`EntityId`]. The view borrows
//! its entities and therefore cannot outlive the registry borrow it was
//! built from.
//!
//! Iteration order is unspecified. Callers that need a stable order must use
//! [`EntityView::into_sorted_vec`] or sort themselves.

use super::entity::{Entity, EntityId, TypeTag};
use super::query::{OverlapShape, Region};
use crate::foundation::math::Vec3;
use std::collections::HashMap;
use std::ops::Add;

/// De-duplicated, unordered set of borrowed entities
#[derive(Debug, Clone, Default)]
pub struct EntityView<'a> {
    members: HashMap<EntityId, &'a Entity>,
}

impl<'a> EntityView<'a> {
    /// Create an empty view
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity; returns `false` if it was already a member
    pub fn insert(&mut self, entity: &'a Entity) -> bool {
        self.members.insert(entity.id(), entity).is_none()
    }

    /// Keep only the entity with `id`
    pub fn filter_by_id(&mut self, id: EntityId) -> &mut Self {
        self.members.retain(|member, _| *member == id);
        self
    }

    /// Keep only entities of category `tag`
    pub fn filter_by_type(&mut self, tag: TypeTag) -> &mut Self {
        self.members.retain(|_, entity| entity.tag() == tag);
        self
    }

    /// Keep entities whose position lies inside `region`
    pub fn filter_by_region(&mut self, region: impl Into<Region>) -> &mut Self {
        let region = region.into();
        self.members.retain(|_, entity| region.contains(entity.position()));
        self
    }

    /// Keep entities whose world bounding volume overlaps `shape`
    pub fn filter_by_overlap(&mut self, shape: impl Into<OverlapShape>) -> &mut Self {
        let shape = shape.into();
        self.members.retain(|_, entity| shape.overlaps(entity));
        self
    }

    /// Keep entities whose position is within `radius` of `point` (inclusive)
    pub fn filter_by_distance(&mut self, point: Vec3, radius: f32) -> &mut Self {
        let radius_squared = radius * radius;
        self.members
            .retain(|_, entity| (entity.position() - point).magnitude_squared() <= radius_squared);
        self
    }

    /// Drop the entity with `id`, if present
    pub fn exclude(&mut self, id: EntityId) -> &mut Self {
        self.members.remove(&id);
        self
    }

    /// Keep entities matching an arbitrary predicate
    pub fn retain(&mut self, mut predicate: impl FnMut(&Entity) -> bool) -> &mut Self {
        self.members.retain(|_, entity| predicate(entity));
        self
    }

    /// Union with `other`, leaving `other` empty
    pub fn merge(&mut self, other: &mut EntityView<'a>) -> &mut Self {
        self.members.extend(other.members.drain());
        self
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if the view has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// True if an entity with `id` is a member
    pub fn contains(&self, id: EntityId) -> bool {
        self.members.contains_key(&id)
    }

    /// Iterate members in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = &'a Entity> + '_ {
        self.members.values().copied()
    }

    /// Members in unspecified order
    pub fn into_vec(self) -> Vec<&'a Entity> {
        self.members.into_values().collect()
    }

    /// Members sorted by ascending id
    pub fn into_sorted_vec(self) -> Vec<&'a Entity> {
        let mut entities = self.into_vec();
        entities.sort_unstable_by_key(|entity| entity.id());
        entities
    }
}

impl<'a> FromIterator<&'a Entity> for EntityView<'a> {
    fn from_iter<I: IntoIterator<Item = &'a Entity>>(iter: I) -> Self {
        let mut view = Self::new();
        view.extend(iter);
        view
    }
}

impl<'a> Extend<&'a Entity> for EntityView<'a> {
    fn extend<I: IntoIterator<Item = &'a Entity>>(&mut self, iter: I) {
        for entity in iter {
            self.insert(entity);
        }
    }
}

impl<'a> Add for EntityView<'a> {
    type Output = EntityView<'a>;

    fn add(mut self, mut rhs: EntityView<'a>) -> Self::Output {
        self.merge(&mut rhs);
        self
    }
}

impl<'a> Add for &EntityView<'a> {
    type Output = EntityView<'a>;

    fn add(self, rhs: Self) -> Self::Output {
        self.clone() + rhs.clone()
    }
}
