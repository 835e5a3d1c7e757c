//! # World Engine
//!
//! Entity registry and spatial queries for 2D and 3D games.
//!
//! ## Features
//!
//! - **Entity Registry**: Versioned handles, monotonically increasing ids
//! - **Behaviors**: Per-entity create/destroy/update/draw hooks that may spawn
//!   and remove entities mid-pass
//! - **Spatial Queries**: Region, radius, k-nearest and bounding-volume overlap
//! - **Collision Primitives**: Box, circle, sphere, ray and swept tests usable
//!   on their own
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use world_engine::prelude::*;
//!
//! const ASTEROID: TypeTag = TypeTag(1);
//!
//! struct Spin;
//!
//! impl Behavior for Spin {
//!     fn on_update(&mut self, ctx: &mut EntityContext<'_>, _clock: Clock) {
//!         if let Some(entity) = ctx.entity_mut() {
//!             entity.transform_mut().set_rotation(Vec3::new(0.0, 0.0, 0.1));
//!         }
//!     }
//! }
//!
//! fn main() -> Result<(), WorldError> {
//!     let mut world = WorldRegistry::new();
//!     let bounds = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
//!     world.add_entity(world.new_entity(ASTEROID, bounds), Spin)?;
//!
//!     let clock = Clock::default();
//!     world.update(clock);
//!     world.draw(clock);
//!     world.update(clock.advance(1.0 / 60.0));
//!
//!     let nearby = world.retrieve_near(Vec3::zeros(), 10.0, ASTEROID)?;
//!     assert_eq!(nearby.len(), 1);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod ecs;
pub mod error;
pub mod foundation;
pub mod physics;

pub use error::{WorldError, WorldResult};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, WorldConfig},
        ecs::{
            components::{RotationOrder, Transform},
            Behavior, Entity, EntityContext, EntityId, EntityView, Inert, OverlapShape, Region, TypeTag,
            WorldRegistry,
        },
        error::{WorldError, WorldResult},
        foundation::{
            collections::Handle,
            math::{Aabb, Aabb2, Circle, Ray2, Sphere, Vec2, Vec3},
            time::Clock,
        },
    };
}
