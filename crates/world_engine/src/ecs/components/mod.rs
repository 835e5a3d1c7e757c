//! Spatial state attached to every entity

pub mod transform;
pub mod bounds;

pub use transform::{RotationOrder, Transform, Transform1D, Transform2D};
pub use bounds::BoundingVolume;
