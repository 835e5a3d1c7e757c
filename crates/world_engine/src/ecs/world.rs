//! World registry: owns every live entity and runs the tick passes
//!
//! Entities live in a slot map keyed by versioned [`Handle`]s, so a stale
//! handle can never reach a newer entity. A second index ordered by
//! [`EntityId`] gives the registration order that tick passes and query
//! results are reported in.
//!
//! Behaviors may add or remove entities (including themselves) from inside
//! any hook. Tick passes iterate over a snapshot of handles taken when the
//! pass starts, so such changes never disturb the pass in progress. A
//! behavior is moved out of its slot while one of its hooks runs; removing
//! an entity whose hook is on the stack is therefore finished when that hook
//! returns.

use super::behavior::{Behavior, EntityContext};
use super::components::Transform;
use super::entity::{Entity, EntityId, TypeTag};
use super::query::{OverlapShape, Region};
use super::view::EntityView;
use crate::config::WorldConfig;
use crate::error::{WorldError, WorldResult};
use crate::foundation::collections::{Handle, HandleMap};
use crate::foundation::logging::{debug, trace, warn};
use crate::foundation::math::{Aabb, Vec3};
use crate::foundation::math::utils::is_finite3;
use crate::foundation::time::Clock;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    Live,
    Removing,
}

struct Slot {
    entity: Entity,
    behavior: Option<Box<dyn Behavior>>,
    state: SlotState,
}

/// Registry of all live entities
pub struct WorldRegistry {
    slots: HandleMap<Slot>,
    by_id: BTreeMap<EntityId, Handle>,
    next_entity_id: u64,
    config: WorldConfig,
}

impl WorldRegistry {
    /// Create an empty registry with default configuration
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Create an empty registry with an explicit configuration
    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            slots: HandleMap::with_capacity_and_key(config.initial_capacity),
            by_id: BTreeMap::new(),
            next_entity_id: 0,
            config,
        }
    }

    /// Configuration the registry was built with
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Build an unregistered entity using this world's default rotation order
    pub fn new_entity(&self, tag: TypeTag, local_bounds: Aabb) -> Entity {
        let transform = Transform::identity().with_rotation_order(self.config.default_rotation_order);
        Entity::new(tag, local_bounds).with_transform(transform)
    }

    /// Register `entity`, run its `on_create` hook and return its handle
    ///
    /// The entity receives the next id. Ids are never reused, even after
    /// removal. If `on_create` removes the entity again, the returned handle
    /// is already stale.
    pub fn add_entity(&mut self, mut entity: Entity, behavior: impl Behavior + 'static) -> WorldResult<Handle> {
        if let Err(err) = entity.validate() {
            warn!("Rejected entity: {err}");
            return Err(err);
        }

        let id = EntityId::new(self.next_entity_id);
        self.next_entity_id += 1;
        entity.assign_id(id);

        let tag = entity.tag();
        let handle = self.slots.insert(Slot {
            entity,
            behavior: Some(Box::new(behavior)),
            state: SlotState::Live,
        });
        self.by_id.insert(id, handle);
        debug!("Registered entity {id} ({tag})");

        self.dispatch(handle, |behavior, ctx| behavior.on_create(ctx));
        Ok(handle)
    }

    /// Remove a live entity, running its `on_destroy` hook
    ///
    /// Queries stop seeing the entity immediately. When called from one of
    /// the entity's own hooks, `on_destroy` runs once that hook returns.
    pub fn remove_entity(&mut self, handle: Handle) -> WorldResult<()> {
        if self.remove_live(handle) {
            Ok(())
        } else {
            warn!("Cannot remove {handle:?}: not a live entity");
            Err(WorldError::UnknownHandle(handle))
        }
    }

    /// Remove every live entity in ascending id order
    ///
    /// Entities spawned by destroy hooks during the sweep are kept.
    pub fn clear(&mut self) {
        let snapshot: Vec<Handle> = self.by_id.values().copied().collect();
        for handle in snapshot {
            if !self.remove_live(handle) {
                trace!("clear: {handle:?} already removed by a destroy hook");
            }
        }
    }

    /// Run `on_update` for every live entity, in ascending id order
    pub fn update(&mut self, clock: Clock) {
        self.run_pass("update", |behavior, ctx| behavior.on_update(ctx, clock));
    }

    /// Run `on_draw` for every live entity, in ascending id order
    pub fn draw(&mut self, clock: Clock) {
        self.run_pass("draw", |behavior, ctx| behavior.on_draw(ctx, clock));
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// True if no entity is live
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// True if `handle` refers to a live entity
    pub fn contains(&self, handle: Handle) -> bool {
        self.live_slot(handle).is_some()
    }

    /// Handle of the live entity with `id`
    pub fn handle_of(&self, id: EntityId) -> Option<Handle> {
        self.by_id.get(&id).copied()
    }

    /// Live entity behind `handle`
    pub fn entity(&self, handle: Handle) -> Option<&Entity> {
        self.live_slot(handle).map(|slot| &slot.entity)
    }

    /// Mutable access to the live entity behind `handle`
    pub fn entity_mut(&mut self, handle: Handle) -> Option<&mut Entity> {
        self.slots
            .get_mut(handle)
            .filter(|slot| slot.state == SlotState::Live)
            .map(|slot| &mut slot.entity)
    }

    /// Live entities in ascending id order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.by_id
            .values()
            .filter_map(move |handle| self.slots.get(*handle))
            .map(|slot| &slot.entity)
    }

    /// View over all live entities, for composing custom queries
    pub fn view(&self) -> EntityView<'_> {
        self.entities().collect()
    }

    /// All entities of category `tag`, by ascending id
    pub fn retrieve_all(&self, tag: TypeTag) -> Vec<&Entity> {
        self.trace_query(|| format!("retrieve_all({tag})"));
        let mut view = self.view();
        view.filter_by_type(tag);
        view.into_sorted_vec()
    }

    /// The live entity with `id`
    pub fn retrieve_by_id(&self, id: EntityId) -> WorldResult<&Entity> {
        self.trace_query(|| format!("retrieve_by_id({id})"));
        self.by_id
            .get(&id)
            .and_then(|handle| self.slots.get(*handle))
            .map(|slot| &slot.entity)
            .ok_or_else(|| WorldError::NotFound(format!("no live entity with id {id}")))
    }

    /// Entities of category `tag` whose position lies in `region`, by ascending id
    ///
    /// Boundaries count as inside. A planar region ignores Z. Inverted or
    /// non-finite regions are rejected.
    pub fn retrieve_in_region(&self, region: impl Into<Region>, tag: TypeTag) -> WorldResult<Vec<&Entity>> {
        let region = region.into();
        self.trace_query(|| format!("retrieve_in_region({region:?}, {tag})"));
        if let Err(err) = region.validate() {
            warn!("Rejected query: {err}");
            return Err(err);
        }

        let mut view = self.view();
        view.filter_by_type(tag).filter_by_region(region);
        Ok(view.into_sorted_vec())
    }

    /// Entities of category `tag` within `radius` of `point`, by ascending id
    pub fn retrieve_near(&self, point: Vec3, radius: f32, tag: TypeTag) -> WorldResult<Vec<&Entity>> {
        self.trace_query(|| format!("retrieve_near({point:?}, {radius}, {tag})"));
        if !is_finite3(&point) {
            return Err(Self::reject(format!("query point {point:?} is not finite")));
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(Self::reject(format!("radius {radius} must be finite and non-negative")));
        }

        let mut view = self.view();
        view.filter_by_type(tag).filter_by_distance(point, radius);
        Ok(view.into_sorted_vec())
    }

    /// Up to `k` entities of category `tag` closest to `point`
    ///
    /// Ordered by distance, ties broken by ascending id.
    pub fn retrieve_k_nearest(&self, point: Vec3, k: usize, tag: TypeTag) -> Vec<&Entity> {
        self.trace_query(|| format!("retrieve_k_nearest({point:?}, {k}, {tag})"));
        if k == 0 {
            return Vec::new();
        }

        let mut view = self.view();
        view.filter_by_type(tag);
        let mut candidates: Vec<(f32, &Entity)> = view
            .iter()
            .map(|entity| ((entity.position() - point).magnitude_squared(), entity))
            .collect();
        candidates.sort_unstable_by(|(da, a), (db, b)| da.total_cmp(db).then_with(|| a.id().cmp(&b.id())));
        candidates.truncate(k);
        candidates.into_iter().map(|(_, entity)| entity).collect()
    }

    /// The entity of category `tag` closest to `point`, lowest id on ties
    pub fn retrieve_nearest(&self, point: Vec3, tag: TypeTag) -> WorldResult<&Entity> {
        self.retrieve_k_nearest(point, 1, tag)
            .into_iter()
            .next()
            .ok_or_else(|| WorldError::NotFound(format!("no entity of {tag}")))
    }

    /// Entities whose XY bounds overlap those of entity `id`, by ascending id
    ///
    /// The subject itself is never part of the result.
    pub fn retrieve_overlapping_2d(&self, id: EntityId) -> WorldResult<Vec<&Entity>> {
        let subject = self.retrieve_by_id(id)?;
        Ok(self.overlapping_subject(id, OverlapShape::Planar(subject.world_bounds_2d())))
    }

    /// Entities whose 3D bounds overlap those of entity `id`, by ascending id
    ///
    /// The subject itself is never part of the result.
    pub fn retrieve_overlapping_3d(&self, id: EntityId) -> WorldResult<Vec<&Entity>> {
        let subject = self.retrieve_by_id(id)?;
        Ok(self.overlapping_subject(id, OverlapShape::Volume(subject.world_bounds())))
    }

    /// Entities of category `tag` whose bounds overlap `shape`, by ascending id
    pub fn retrieve_overlapping(&self, shape: impl Into<OverlapShape>, tag: TypeTag) -> WorldResult<Vec<&Entity>> {
        let shape = shape.into();
        self.trace_query(|| format!("retrieve_overlapping({shape:?}, {tag})"));
        if let Err(err) = shape.validate() {
            warn!("Rejected query: {err}");
            return Err(err);
        }

        let mut view = self.view();
        view.filter_by_type(tag).filter_by_overlap(shape);
        Ok(view.into_sorted_vec())
    }

    pub(crate) fn slot_entity(&self, handle: Handle) -> Option<&Entity> {
        self.slots.get(handle).map(|slot| &slot.entity)
    }

    pub(crate) fn slot_entity_mut(&mut self, handle: Handle) -> Option<&mut Entity> {
        self.slots.get_mut(handle).map(|slot| &mut slot.entity)
    }

    /// Start removing a live entity; `false` if `handle` is not live
    fn remove_live(&mut self, handle: Handle) -> bool {
        let Some(slot) = self.slots.get_mut(handle).filter(|slot| slot.state == SlotState::Live) else {
            return false;
        };

        slot.state = SlotState::Removing;
        let id = slot.entity.id();
        let behavior = slot.behavior.take();
        self.by_id.remove(&id);

        match behavior {
            Some(behavior) => self.finish_removal(handle, behavior),
            None => debug!("Entity {id} is running a hook; removal deferred"),
        }
        true
    }

    fn live_slot(&self, handle: Handle) -> Option<&Slot> {
        self.slots.get(handle).filter(|slot| slot.state == SlotState::Live)
    }

    fn overlapping_subject(&self, id: EntityId, shape: OverlapShape) -> Vec<&Entity> {
        self.trace_query(|| format!("overlapping {id}: {shape:?}"));
        let mut view = self.view();
        view.exclude(id).filter_by_overlap(shape);
        view.into_sorted_vec()
    }

    fn run_pass(&mut self, pass: &str, mut hook: impl FnMut(&mut dyn Behavior, &mut EntityContext<'_>)) {
        let snapshot: Vec<Handle> = self.by_id.values().copied().collect();
        let mut visited = 0usize;

        for handle in &snapshot {
            if !self.contains(*handle) {
                trace!("{pass}: skipping removed entity {handle:?}");
                continue;
            }
            self.dispatch(*handle, &mut hook);
            visited += 1;
        }

        trace!("{pass}: visited {visited} of {} entities", snapshot.len());
    }

    /// Run one hook of a live entity with its behavior moved out of the slot
    fn dispatch<F>(&mut self, handle: Handle, hook: F)
    where
        F: FnOnce(&mut dyn Behavior, &mut EntityContext<'_>),
    {
        let Some(slot) = self.slots.get_mut(handle) else {
            return;
        };
        if slot.state != SlotState::Live {
            return;
        }
        // Already on the stack further up
        let Some(mut behavior) = slot.behavior.take() else {
            return;
        };
        let id = slot.entity.id();

        {
            let mut ctx = EntityContext::new(self, handle, id);
            hook(behavior.as_mut(), &mut ctx);
        }

        match self.slots.get(handle).map(|slot| slot.state) {
            Some(SlotState::Live) => {
                if let Some(slot) = self.slots.get_mut(handle) {
                    slot.behavior = Some(behavior);
                }
            }
            Some(SlotState::Removing) => self.finish_removal(handle, behavior),
            None => {}
        }
    }

    fn finish_removal(&mut self, handle: Handle, mut behavior: Box<dyn Behavior>) {
        let Some(id) = self.slots.get(handle).map(|slot| slot.entity.id()) else {
            return;
        };

        {
            let mut ctx = EntityContext::new(self, handle, id);
            behavior.on_destroy(&mut ctx);
        }

        self.slots.remove(handle);
        debug!("Removed entity {id}");
    }

    fn trace_query(&self, describe: impl FnOnce() -> String) {
        if self.config.trace_queries {
            trace!("query {}", describe());
        }
    }

    fn reject(message: String) -> WorldError {
        warn!("Rejected query: {message}");
        WorldError::InvalidArgument(message)
    }
}

impl Default for WorldRegistry {
    fn default() -> Self {
        Self::new()
    }
}
