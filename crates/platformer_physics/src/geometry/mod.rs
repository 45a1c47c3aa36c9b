//! Box geometry
//!
//! Axis-aligned boxes with side/corner queries, overlap tests and the swept
//! regions ("smear" and "offset") the collision sweep is built on.

mod aabb;

pub use aabb::Aabb;
