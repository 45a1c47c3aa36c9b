//! # Platformer Physics
//!
//! Axis-aligned box physics for 2D platformers.
//!
//! ## Features
//!
//! - **Swept collision**: every movable body is swept along one axis at a time,
//!   so bodies slide along walls and floors instead of snagging on corners
//! - **Nearest contact resolution**: only the closest blocking body is resolved
//!   per body, per axis, per step
//! - **Collision groups**: unbounded sparse group ids; bodies without a shared
//!   group pass through each other and only report an intersection
//! - **Contact response**: restitution impulses between dynamic bodies,
//!   bounce against static geometry, optional friction on the other axis
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use platformer_physics::prelude::*;
//!
//! fn main() -> Result<(), PhysicsError> {
//!     let config = PhysicsConfig {
//!         gravity: Vec2::new(0.0, 50.0),
//!         ..PhysicsConfig::default()
//!     };
//!     let mut engine = PhysicsEngine::new(config);
//!
//!     engine.add_body(Body::fixed(Aabb::new(Vec2::new(0.0, 390.0), Vec2::new(399.0, 9.0))));
//!     let player = engine.add_body(Body::dynamic(
//!         Aabb::new(Vec2::new(100.0, 150.0), Vec2::new(20.0, 20.0)),
//!         10.0,
//!     ));
//!
//!     for _ in 0..60 {
//!         let events = engine.step(1.0 / 60.0)?;
//!         for event in &events {
//!             log::debug!("{:?}", event);
//!         }
//!     }
//!
//!     if let Some(body) = engine.body(player) {
//!         println!("player at {:?}", body.bounds().position());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod events;
pub mod foundation;
pub mod geometry;
pub mod physics;

mod error;

pub use error::PhysicsError;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        PhysicsError,
        config::{Config, ConfigError, PhysicsConfig},
        events::{ContactEvent, ContactKind, StepObserver},
        foundation::{
            direction::Direction,
            math::{AxisVector, Vec2},
        },
        geometry::Aabb,
        physics::{Body, BodyHandle, BodyKind, CollisionGroups, Contact, PhysicsEngine},
    };
}
