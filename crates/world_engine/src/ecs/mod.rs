//! Entity registry, behaviors and spatial queries
//!
//! Entities are registered in a [`WorldRegistry`], which owns them, drives
//! their [`Behavior`] hooks once per tick and answers location queries.

pub mod behavior;
pub mod components;
pub mod entity;
pub mod query;
pub mod view;
pub mod world;

#[cfg(test)]
mod tests;

pub use behavior::{Behavior, EntityContext, Inert};
pub use entity::{Entity, EntityId, TypeTag};
pub use query::{OverlapShape, Region};
pub use view::EntityView;
pub use world::WorldRegistry;
