//! Swept, axis-separated collision engine
//!
//! Each update moves every movable body along one axis at a time. For each
//! body the engine:
//!
//! 1. integrates gravity, drag and user forces into velocity,
//! 2. sweeps the leading edge of the body over the step and collects the
//!    bodies it would enter,
//! 3. picks the nearest group-sharing obstacle and, if the pair is closing,
//!    snaps the body flush against it and applies the contact response,
//! 4. reports pass-through contacts with bodies in disjoint collision groups
//!    that lie no further than that obstacle,
//! 5. otherwise moves the body freely.
//!
//! A full [`PhysicsEngine::step`] runs the horizontal pass and then the
//! vertical one, so a body falling onto a floor while running sideways slides
//! along it instead of catching on the edge.

use slotmap::{new_key_type, SlotMap};

use crate::config::PhysicsConfig;
use crate::events::{ContactEvent, StepObserver};
use crate::foundation::direction::Direction;
use crate::foundation::math::{cmp, AxisVector, Vec2};
use crate::physics::body::{Body, BodyKind, Contact};
use crate::physics::response;
use crate::PhysicsError;

new_key_type! {
    /// Stable handle to a body owned by a [`PhysicsEngine`]
    pub struct BodyHandle;
}

/// What the engine needs to know about the body that was hit
#[derive(Debug, Clone, Copy)]
struct Obstacle {
    kind: BodyKind,
    velocity: Vec2,
    mass: Option<f32>,
    friction: f32,
    bounce: f32,
}

impl Obstacle {
    fn of(body: &Body) -> Self {
        Self {
            kind: body.kind(),
            velocity: body.velocity(),
            mass: body.mass(),
            friction: body.friction(),
            bounce: body.bounce(),
        }
    }
}

/// Owns the bodies and advances the simulation
pub struct PhysicsEngine {
    /// Every registered body
    bodies: SlotMap<BodyHandle, Body>,

    /// Kinematic and dynamic bodies, in the order they were added
    movable: Vec<BodyHandle>,

    config: PhysicsConfig,
}

impl PhysicsEngine {
    /// Create an empty engine
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            movable: Vec::new(),
            config,
        }
    }

    /// World-wide settings
    pub const fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Mutable world-wide settings; changes apply from the next update
    pub fn config_mut(&mut self) -> &mut PhysicsConfig {
        &mut self.config
    }

    // Body management

    /// Register a body and return its handle
    pub fn add_body(&mut self, body: Body) -> BodyHandle {
        let kind = body.kind();
        let handle = self.bodies.insert(body);
        if kind != BodyKind::Static {
            self.movable.push(handle);
        }
        log::debug!("Registered {:?} body {:?} ({} total)", kind, handle, self.bodies.len());
        handle
    }

    /// Unregister a body, handing it back
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<Body> {
        let body = self.bodies.remove(handle)?;
        self.movable.retain(|&movable| movable != handle);
        log::debug!("Removed {:?} body {:?}", body.kind(), handle);
        Some(body)
    }

    /// Unregister and drop a body; returns whether it existed
    pub fn delete_body(&mut self, handle: BodyHandle) -> bool {
        self.remove_body(handle).is_some()
    }

    /// Drop every body
    pub fn clear(&mut self) {
        log::debug!("Clearing {} bodies", self.bodies.len());
        self.bodies.clear();
        self.movable.clear();
    }

    /// Look up a body
    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle)
    }

    /// Look up a body for modification
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(handle)
    }

    /// Whether `handle` refers to a registered body
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains_key(handle)
    }

    /// Every body with its handle
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.bodies.iter()
    }

    /// Handles of the bodies that move, in processing order
    pub fn movable(&self) -> &[BodyHandle] {
        &self.movable
    }

    /// Number of registered bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether no body is registered
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    // Simulation

    /// Advance by `elapsed` seconds: horizontal pass, then vertical pass
    ///
    /// # Errors
    ///
    /// Only fails on internal axis misuse, which indicates a bug.
    pub fn step(&mut self, elapsed: f32) -> Result<Vec<ContactEvent>, PhysicsError> {
        self.update(Direction::SOUTH_EAST, elapsed)
    }

    /// Advance by `elapsed` seconds along the axes named by `axis`
    ///
    /// A direction touching both axes runs the horizontal pass and then the
    /// vertical one. Contacts are returned in the order they were found.
    ///
    /// # Errors
    ///
    /// `axis` must not be `NONE`.
    pub fn update(&mut self, axis: Direction, elapsed: f32) -> Result<Vec<ContactEvent>, PhysicsError> {
        self.update_observed(axis, elapsed, &mut ())
    }

    /// Same as [`Self::update`], calling `observer` along the way
    ///
    /// # Errors
    ///
    /// `axis` must not be `NONE`.
    pub fn update_observed<O: StepObserver + ?Sized>(
        &mut self,
        axis: Direction,
        elapsed: f32,
        observer: &mut O,
    ) -> Result<Vec<ContactEvent>, PhysicsError> {
        let mut events = Vec::new();
        if axis.is_horizontal() && axis.is_vertical() {
            self.update_axis(Direction::EAST, elapsed, observer, &mut events)?;
            self.update_axis(Direction::SOUTH, elapsed, observer, &mut events)?;
        } else {
            self.update_axis(axis.canonical_axis()?, elapsed, observer, &mut events)?;
        }
        Ok(events)
    }

    fn update_axis<O: StepObserver + ?Sized>(
        &mut self,
        axis: Direction,
        elapsed: f32,
        observer: &mut O,
        events: &mut Vec<ContactEvent>,
    ) -> Result<(), PhysicsError> {
        for index in 0..self.movable.len() {
            let handle = self.movable[index];
            self.update_body(handle, axis, elapsed, observer, events)?;
        }
        Ok(())
    }

    fn update_body<O: StepObserver + ?Sized>(
        &mut self,
        handle: BodyHandle,
        axis: Direction,
        elapsed: f32,
        observer: &mut O,
        events: &mut Vec<ContactEvent>,
    ) -> Result<(), PhysicsError> {
        let gravity = self.config.gravity;
        let air_density = self.config.air_density;

        let Some(body) = self.bodies.get_mut(handle) else {
            return Ok(());
        };
        observer.before_movement(handle, body, axis, elapsed);
        body.apply_environment(axis, gravity, air_density)?;
        body.apply_net_force(axis, elapsed)?;
        body.reset_net_force(axis);

        match self.nearest_obstacle(handle, axis, elapsed, observer, events)? {
            Some((other, contact)) => self.collide(handle, other, axis, contact, elapsed, observer, events)?,
            None => self.move_freely(handle, axis, elapsed),
        }

        if let Some(body) = self.bodies.get_mut(handle) {
            observer.after_movement(handle, body, axis, elapsed);
        }
        Ok(())
    }

    fn move_freely(&mut self, handle: BodyHandle, axis: Direction, elapsed: f32) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.apply_velocity(axis, elapsed);
        }
    }

    /// Sweep `handle` against every other body
    ///
    /// Among bodies sharing a collision group with the mover, the one whose
    /// facing side is closest to the mover's leading side wins. Contacts with
    /// the other bodies are reported as intersections, except those beyond the
    /// winner, which the mover never reaches this step.
    fn nearest_obstacle<O: StepObserver + ?Sized>(
        &self,
        handle: BodyHandle,
        axis: Direction,
        elapsed: f32,
        observer: &mut O,
        events: &mut Vec<ContactEvent>,
    ) -> Result<Option<(BodyHandle, Contact)>, PhysicsError> {
        let Some(body) = self.bodies.get(handle) else {
            return Ok(None);
        };

        let tolerance = self.config.contact_tolerance;
        let mut nearest: Option<(BodyHandle, Contact)> = None;
        let mut passed = Vec::new();
        for (other_handle, other) in &self.bodies {
            if other_handle == handle {
                continue;
            }
            let Some(contact) = body.collides(axis, other.bounds(), elapsed, tolerance)? else {
                continue;
            };

            if !body.groups().shares_any(other.groups()) {
                passed.push((other_handle, contact));
                continue;
            }

            let leading = body.bounds().side(contact.side)?;
            let is_closer = match nearest {
                Some((_, best)) => cmp::closer(contact.spot, best.spot, leading),
                None => true,
            };
            if is_closer {
                nearest = Some((other_handle, contact));
            }
        }

        for (other_handle, contact) in passed {
            if let Some((_, best)) = nearest {
                let leading = body.bounds().side(contact.side)?;
                if cmp::closer(best.spot, contact.spot, leading) {
                    continue;
                }
            }
            log::trace!("{:?} passes through {:?} on {:?}", handle, other_handle, contact.side);
            let event = ContactEvent::intersection(handle, other_handle, axis, contact);
            observer.on_contact(&event);
            events.push(event);
        }
        Ok(nearest)
    }

    fn collide<O: StepObserver + ?Sized>(
        &mut self,
        handle: BodyHandle,
        other: BodyHandle,
        axis: Direction,
        contact: Contact,
        elapsed: f32,
        observer: &mut O,
        events: &mut Vec<ContactEvent>,
    ) -> Result<(), PhysicsError> {
        let (Some(body), Some(obstacle_body)) = (self.bodies.get(handle), self.bodies.get(other)) else {
            return Ok(());
        };
        let obstacle = Obstacle::of(obstacle_body);
        let contact_length = body.bounds().measure_intersection(axis.axis_swapped(), obstacle_body.bounds())?;

        // Static obstacles always stop the mover; moving ones only when the
        // pair is closing in along the contact side.
        let relative = body.velocity_on(axis)? - obstacle.velocity.axis(axis)?;
        let closing = if contact.side.is_positive() { relative > 0.0 } else { relative < 0.0 };
        let resolved = obstacle.kind == BodyKind::Static || closing;

        log::trace!(
            "{:?} hits {:?} on {:?} at {} (resolved: {})",
            handle,
            other,
            contact.side,
            contact.spot,
            resolved
        );
        let event = ContactEvent::collision(handle, other, axis, contact, resolved, contact_length);
        observer.on_contact(&event);
        events.push(event);

        if !resolved {
            self.move_freely(handle, axis, elapsed);
            return Ok(());
        }

        let Some(body) = self.bodies.get_mut(handle) else {
            return Ok(());
        };
        body.bounds_mut().set_position_on_side(contact.side, contact.spot)?;
        match body.kind() {
            BodyKind::Dynamic => self.respond_dynamic(handle, other, axis, obstacle),
            BodyKind::Kinematic => self.respond_kinematic(handle, other, axis, obstacle),
            BodyKind::Static => Ok(()),
        }
    }

    /// Bounce a dynamic body off `obstacle`, exchanging impulses when the
    /// obstacle is dynamic too, then apply friction across the sweep axis
    fn respond_dynamic(
        &mut self,
        handle: BodyHandle,
        other: BodyHandle,
        axis: Direction,
        obstacle: Obstacle,
    ) -> Result<(), PhysicsError> {
        let friction_enabled = self.config.friction_enabled;
        let tangent = axis.axis_swapped();

        let Some(body) = self.bodies.get_mut(handle) else {
            return Ok(());
        };
        let Some(mass) = body.mass() else {
            return Ok(());
        };

        let velocity = body.velocity_on(axis)?;
        let obstacle_velocity = obstacle.velocity.axis(axis)?;
        let (new_velocity, pushed_velocity) = match obstacle.mass {
            Some(other_mass) => {
                let restitution = response::combine_bounce(body.bounce(), obstacle.bounce);
                let (ours, theirs) =
                    response::exchange_impulse(mass, velocity, other_mass, obstacle_velocity, restitution);
                (ours, Some(theirs))
            }
            None => (response::bounce_off(velocity, obstacle_velocity, body.bounce()), None),
        };
        body.set_velocity_on(axis, new_velocity);

        let mut tangent_impulse = 0.0;
        if friction_enabled {
            let normal_impulse = mass * (new_velocity - velocity);
            let sliding = body.velocity_on(tangent)? - obstacle.velocity.axis(tangent)?;
            let mu = response::combine_friction(body.friction(), obstacle.friction);
            tangent_impulse =
                response::friction_impulse(mu, normal_impulse, sliding, response::reduced_mass(mass, obstacle.mass));
            let slowed = body.velocity_on(tangent)? + tangent_impulse / mass;
            body.set_velocity_on(tangent, slowed);
        }

        if let (Some(pushed_velocity), Some(other_mass)) = (pushed_velocity, obstacle.mass) {
            if let Some(other_body) = self.bodies.get_mut(other) {
                other_body.set_velocity_on(axis, pushed_velocity);
                let dragged = other_body.velocity_on(tangent)? - tangent_impulse / other_mass;
                other_body.set_velocity_on(tangent, dragged);
            }
        }
        Ok(())
    }

    /// Kinematic bodies hand their velocity to dynamic bodies they push and
    /// bounce off anything else
    fn respond_kinematic(
        &mut self,
        handle: BodyHandle,
        other: BodyHandle,
        axis: Direction,
        obstacle: Obstacle,
    ) -> Result<(), PhysicsError> {
        let Some(body) = self.bodies.get_mut(handle) else {
            return Ok(());
        };
        let velocity = body.velocity_on(axis)?;

        if obstacle.kind == BodyKind::Dynamic {
            if let Some(other_body) = self.bodies.get_mut(other) {
                other_body.set_velocity_on(axis, velocity);
            }
        } else {
            let bounce = body.bounce();
            body.set_velocity_on(axis, -bounce * velocity);
        }
        Ok(())
    }

    // Queries

    /// Bodies sharing a collision group with `handle` that lie within the
    /// configured touching threshold of its `side`
    ///
    /// Useful for "is grounded" checks. An unknown handle touches nothing.
    ///
    /// # Errors
    ///
    /// `side` must be exactly one of north, east, south or west.
    pub fn touching(&self, handle: BodyHandle, side: Direction) -> Result<Vec<BodyHandle>, PhysicsError> {
        let side = side.expect_side()?;
        let Some(body) = self.bodies.get(handle) else {
            return Ok(Vec::new());
        };
        let threshold = self.config.touching_threshold;

        let mut found = Vec::new();
        for (other_handle, other) in &self.bodies {
            if other_handle != handle
                && body.groups().shares_any(other.groups())
                && body.touches(side, other.bounds(), threshold)?
            {
                found.push(other_handle);
            }
        }
        Ok(found)
    }

    /// Whether anything is [touching](Self::touching) `side` of `handle`
    ///
    /// # Errors
    ///
    /// `side` must be exactly one of north, east, south or west.
    pub fn is_touching(&self, handle: BodyHandle, side: Direction) -> Result<bool, PhysicsError> {
        Ok(!self.touching(handle, side)?.is_empty())
    }
}

impl Default for PhysicsEngine {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Aabb;

    fn unit_box(x: f32, y: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Vec2::new(1.0, 1.0))
    }

    #[test]
    fn test_registration_tracks_movable_bodies() {
        let mut engine = PhysicsEngine::default();
        let wall = engine.add_body(Body::fixed(unit_box(0.0, 0.0)));
        let crate_ = engine.add_body(Body::dynamic(unit_box(2.0, 0.0), 1.0));
        let lift = engine.add_body(Body::kinematic(unit_box(4.0, 0.0)));

        assert_eq!(engine.len(), 3);
        assert_eq!(engine.movable(), &[crate_, lift]);

        let removed = engine.remove_body(crate_).unwrap();
        assert_eq!(removed.kind(), BodyKind::Dynamic);
        assert_eq!(engine.movable(), &[lift]);
        assert!(!engine.contains(crate_));
        assert!(engine.remove_body(crate_).is_none());

        assert!(engine.delete_body(wall));
        assert!(!engine.delete_body(wall));

        engine.clear();
        assert!(engine.is_empty());
        assert!(engine.movable().is_empty());
    }

    #[test]
    fn test_update_rejects_no_axis() {
        let mut engine = PhysicsEngine::default();
        engine.add_body(Body::dynamic(unit_box(0.0, 0.0), 1.0));
        assert!(engine.update(Direction::NONE, 0.1).is_err());
        assert!(engine.update(Direction::WEST, 0.1).is_ok());
    }

    #[test]
    fn test_touching_rejects_compound_side() {
        let mut engine = PhysicsEngine::default();
        let body = engine.add_body(Body::dynamic(unit_box(0.0, 0.0), 1.0));
        assert!(engine.touching(body, Direction::SOUTH_EAST).is_err());
        assert!(engine.touching(body, Direction::SOUTH).unwrap().is_empty());
    }
}
