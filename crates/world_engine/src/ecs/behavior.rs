//! Per-entity simulation hooks
//!
//! Each registered entity carries a boxed [`Behavior`]. The registry calls
//! the hooks; a hook talks back to the registry through the
//! [`EntityContext`] it is handed, which is also how it reaches its own
//! entity data.

use super::entity::{Entity, EntityId};
use super::world::WorldRegistry;
use crate::foundation::collections::Handle;
use crate::foundation::time::Clock;

/// Lifecycle and per-tick hooks of an entity kind
///
/// Every hook defaults to doing nothing.
pub trait Behavior {
    /// Called once, right after the entity is registered
    fn on_create(&mut self, _ctx: &mut EntityContext<'_>) {}

    /// Called once, right before the entity is dropped
    fn on_destroy(&mut self, _ctx: &mut EntityContext<'_>) {}

    /// Called during [`WorldRegistry::update`]
    fn on_update(&mut self, _ctx: &mut EntityContext<'_>, _clock: Clock) {}

    /// Called during [`WorldRegistry::draw`]
    fn on_draw(&mut self, _ctx: &mut EntityContext<'_>, _clock: Clock) {}
}

/// Behavior for entities that are pure spatial data
#[derive(Debug, Clone, Copy, Default)]
pub struct Inert;

impl Behavior for Inert {}

/// What a hook can see: its own entity and the world that owns it
pub struct EntityContext<'w> {
    world: &'w mut WorldRegistry,
    handle: Handle,
    id: EntityId,
}

impl<'w> EntityContext<'w> {
    pub(crate) fn new(world: &'w mut WorldRegistry, handle: Handle, id: EntityId) -> Self {
        Self { world, handle, id }
    }

    /// Handle of the entity running the hook
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Id of the entity running the hook
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// The entity's own data
    ///
    /// Still available inside `on_destroy`. `None` only if the slot is gone.
    pub fn entity(&self) -> Option<&Entity> {
        self.world.slot_entity(self.handle)
    }

    /// Mutable access to the entity's own data
    pub fn entity_mut(&mut self) -> Option<&mut Entity> {
        self.world.slot_entity_mut(self.handle)
    }

    /// The registry, for queries
    pub fn world(&self) -> &WorldRegistry {
        &*self.world
    }

    /// The registry, for spawning and removing entities
    pub fn world_mut(&mut self) -> &mut WorldRegistry {
        &mut *self.world
    }
}
