//! Physics module: bodies, collision groups and the stepping engine
//!
//! Collision is swept and axis-separated: bodies move along x, then along y,
//! and are snapped flush against the nearest obstacle they would enter.

pub mod body;
pub mod collision_groups;
pub mod engine;
pub mod response;

pub use body::{Body, BodyKind, Contact, Dynamics, Motion};
pub use collision_groups::CollisionGroups;
pub use engine::{BodyHandle, PhysicsEngine};

#[cfg(test)]
mod tests;
