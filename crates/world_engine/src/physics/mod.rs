//! Physics module for collision detection
//!
//! Only geometric queries live here. There is no dynamics integration and no
//! collision response.

pub mod collision;
