//! Engine scenario tests
//!
//! Whole-world simulations checking positions, velocities and reported
//! contacts after a few updates.


use crate::config::PhysicsConfig;
use crate::foundation::math::Vec2;
use crate::geometry::Aabb;
use crate::physics::PhysicsEngine;

/// Engine without air resistance so trajectories are exact
fn vacuum(gravity: Vec2) -> PhysicsEngine {
    crate::foundation::logging::init_for_tests();
    PhysicsEngine::new(PhysicsConfig {
        gravity,
        air_density: 0.0,
        ..PhysicsConfig::default()
    })
}

fn rect(x: f32, y: f32, width: f32, height: f32) -> Aabb {
    Aabb::new(Vec2::new(x, y), Vec2::new(width, height))
}

/// Floor spanning the demo room, top face at y = 390
fn floor() -> Aabb {
    rect(0.0, 390.0, 399.0, 9.0)
}
