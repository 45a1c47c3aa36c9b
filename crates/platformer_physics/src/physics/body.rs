//! Physics bodies
//!
//! A [`Body`] is a box plus collision settings plus a [`Motion`] payload that
//! decides how it takes part in a step:
//!
//! - **Static** bodies never move and only act as obstacles.
//! - **Kinematic** bodies carry a velocity but no mass: they move, get blocked
//!   and push dynamic bodies, but forces do not affect them.
//! - **Dynamic** bodies integrate forces (gravity, drag, user forces) into
//!   velocity and exchange impulses on contact.

use crate::foundation::direction::Direction;
use crate::foundation::math::{AxisVector, Vec2};
use crate::geometry::Aabb;
use crate::physics::CollisionGroups;
use crate::PhysicsError;

/// Default friction coefficient for every body
pub const DEFAULT_FRICTION: f32 = 0.1;

/// Default bounce for static and kinematic bodies
pub const DEFAULT_BOUNCE: f32 = 1.0;

/// Default bounce for dynamic bodies
pub const DEFAULT_DYNAMIC_BOUNCE: f32 = 0.5;

/// Default drag coefficient for dynamic bodies
pub const DEFAULT_DRAG: f32 = 0.1;

/// Mass given to dynamic bodies created with an unusable one
pub const DEFAULT_MASS: f32 = 1.0;

fn is_valid_mass(mass: f32) -> bool {
    mass.is_finite() && mass > 0.0
}

/// How a body participates in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// Immovable obstacle
    Static,
    /// Moves at its own velocity, ignores forces
    Kinematic,
    /// Fully simulated: mass, forces, impulses
    Dynamic,
}

/// State carried by dynamic bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dynamics {
    /// Current velocity (units per second)
    pub velocity: Vec2,

    /// Forces accumulated since the last integration, per axis
    pub net_force: Vec2,

    mass: f32,

    /// Air drag coefficient
    pub drag: f32,

    /// Per-axis multiplier applied to the engine's gravity
    pub gravity_scale: Vec2,
}

impl Dynamics {
    fn new(mass: f32) -> Self {
        let mass = if is_valid_mass(mass) {
            mass
        } else {
            log::warn!("Dynamic body mass {} is not positive, using {}", mass, DEFAULT_MASS);
            DEFAULT_MASS
        };
        Self {
            velocity: Vec2::zeros(),
            net_force: Vec2::zeros(),
            mass,
            drag: DEFAULT_DRAG,
            gravity_scale: Vec2::new(1.0, 1.0),
        }
    }

    /// Mass; always positive and finite
    pub const fn mass(&self) -> f32 {
        self.mass
    }
}

/// Motion payload of a body
#[derive(Debug, Clone, PartialEq)]
pub enum Motion {
    /// Never moves
    Static,
    /// Moves at a velocity nobody but the user and contacts change
    Kinematic {
        /// Current velocity (units per second)
        velocity: Vec2,
    },
    /// Integrates forces
    Dynamic(Dynamics),
}

/// Where a swept body would first touch an obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Side of the moving body that makes contact
    pub side: Direction,

    /// Coordinate of the obstacle's facing side
    pub spot: f32,
}

/// A box taking part in the simulation
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    bounds: Aabb,
    groups: CollisionGroups,
    friction: f32,
    bounce: f32,
    motion: Motion,
}

impl Body {
    fn with_motion(bounds: Aabb, motion: Motion, bounce: f32) -> Self {
        Self {
            bounds,
            groups: CollisionGroups::default_group(),
            friction: DEFAULT_FRICTION,
            bounce,
            motion,
        }
    }

    /// Create a static obstacle
    pub fn fixed(bounds: Aabb) -> Self {
        Self::with_motion(bounds, Motion::Static, DEFAULT_BOUNCE)
    }

    /// Create a kinematic body at rest
    pub fn kinematic(bounds: Aabb) -> Self {
        Self::with_motion(bounds, Motion::Kinematic { velocity: Vec2::zeros() }, DEFAULT_BOUNCE)
    }

    /// Create a dynamic body at rest
    ///
    /// A mass that is not positive and finite is replaced by [`DEFAULT_MASS`].
    pub fn dynamic(bounds: Aabb, mass: f32) -> Self {
        Self::with_motion(bounds, Motion::Dynamic(Dynamics::new(mass)), DEFAULT_DYNAMIC_BOUNCE)
    }

    // Builders

    /// Set the initial velocity (ignored for static bodies)
    #[must_use]
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.set_velocity(velocity);
        self
    }

    /// Replace the collision groups
    #[must_use]
    pub fn with_groups(mut self, groups: CollisionGroups) -> Self {
        self.groups = groups;
        self
    }

    /// Set the bounce coefficient
    #[must_use]
    pub fn with_bounce(mut self, bounce: f32) -> Self {
        self.bounce = bounce;
        self
    }

    /// Set the friction coefficient
    #[must_use]
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    /// Set the drag coefficient (dynamic bodies only)
    #[must_use]
    pub fn with_drag(mut self, drag: f32) -> Self {
        self.set_drag(drag);
        self
    }

    /// Set the gravity scale (dynamic bodies only)
    #[must_use]
    pub fn with_gravity_scale(mut self, scale: Vec2) -> Self {
        self.set_gravity_scale(scale);
        self
    }

    // Identification

    /// How this body takes part in a step
    pub const fn kind(&self) -> BodyKind {
        match self.motion {
            Motion::Static => BodyKind::Static,
            Motion::Kinematic { .. } => BodyKind::Kinematic,
            Motion::Dynamic(_) => BodyKind::Dynamic,
        }
    }

    /// Whether the body has a velocity (kinematic or dynamic)
    pub const fn is_movable(&self) -> bool {
        !matches!(self.motion, Motion::Static)
    }

    /// Whether the body integrates forces
    pub const fn is_dynamic(&self) -> bool {
        matches!(self.motion, Motion::Dynamic(_))
    }

    /// Motion payload
    pub const fn motion(&self) -> &Motion {
        &self.motion
    }

    /// Dynamic state, if this is a dynamic body
    pub const fn dynamics(&self) -> Option<&Dynamics> {
        match &self.motion {
            Motion::Dynamic(dynamics) => Some(dynamics),
            _ => None,
        }
    }

    /// Mutable dynamic state, if this is a dynamic body
    pub fn dynamics_mut(&mut self) -> Option<&mut Dynamics> {
        match &mut self.motion {
            Motion::Dynamic(dynamics) => Some(dynamics),
            _ => None,
        }
    }

    // Properties

    /// Bounding box
    pub const fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Mutable bounding box
    pub fn bounds_mut(&mut self) -> &mut Aabb {
        &mut self.bounds
    }

    /// Collision groups
    pub const fn groups(&self) -> &CollisionGroups {
        &self.groups
    }

    /// Mutable collision groups
    pub fn groups_mut(&mut self) -> &mut CollisionGroups {
        &mut self.groups
    }

    /// Friction coefficient
    pub const fn friction(&self) -> f32 {
        self.friction
    }

    /// Set the friction coefficient
    pub fn set_friction(&mut self, friction: f32) {
        self.friction = friction;
    }

    /// Bounce coefficient
    pub const fn bounce(&self) -> f32 {
        self.bounce
    }

    /// Set the bounce coefficient
    pub fn set_bounce(&mut self, bounce: f32) {
        self.bounce = bounce;
    }

    /// Velocity; static bodies report zero
    pub const fn velocity(&self) -> Vec2 {
        match &self.motion {
            Motion::Static => Vec2::new(0.0, 0.0),
            Motion::Kinematic { velocity } => *velocity,
            Motion::Dynamic(dynamics) => dynamics.velocity,
        }
    }

    fn velocity_mut(&mut self) -> Option<&mut Vec2> {
        match &mut self.motion {
            Motion::Static => None,
            Motion::Kinematic { velocity } => Some(velocity),
            Motion::Dynamic(dynamics) => Some(&mut dynamics.velocity),
        }
    }

    /// Velocity component on `axis`
    ///
    /// # Errors
    ///
    /// `axis` must name exactly one axis.
    pub fn velocity_on(&self, axis: Direction) -> Result<f32, PhysicsError> {
        self.velocity().axis(axis)
    }

    /// Set the velocity (ignored for static bodies)
    pub fn set_velocity(&mut self, value: Vec2) {
        match self.velocity_mut() {
            Some(velocity) => *velocity = value,
            None => log::warn!("Ignoring velocity {:?} set on a static body", value),
        }
    }

    /// Set the velocity components on `axis` (ignored for static bodies)
    pub fn set_velocity_on(&mut self, axis: Direction, value: f32) {
        match self.velocity_mut() {
            Some(velocity) => velocity.set_axis(axis, value),
            None => log::warn!("Ignoring velocity {} set on a static body", value),
        }
    }

    /// Mass of a dynamic body
    pub const fn mass(&self) -> Option<f32> {
        match &self.motion {
            Motion::Dynamic(dynamics) => Some(dynamics.mass),
            _ => None,
        }
    }

    /// Set the mass (dynamic bodies only, must be positive and finite)
    pub fn set_mass(&mut self, mass: f32) {
        if !is_valid_mass(mass) {
            log::warn!("Ignoring non-positive mass {}", mass);
            return;
        }
        match self.dynamics_mut() {
            Some(dynamics) => dynamics.mass = mass,
            None => log::warn!("Ignoring mass set on a non-dynamic body"),
        }
    }

    /// Drag coefficient of a dynamic body
    pub const fn drag(&self) -> Option<f32> {
        match &self.motion {
            Motion::Dynamic(dynamics) => Some(dynamics.drag),
            _ => None,
        }
    }

    /// Set the drag coefficient (dynamic bodies only)
    pub fn set_drag(&mut self, drag: f32) {
        match self.dynamics_mut() {
            Some(dynamics) => dynamics.drag = drag,
            None => log::warn!("Ignoring drag set on a non-dynamic body"),
        }
    }

    /// Gravity scale of a dynamic body
    pub const fn gravity_scale(&self) -> Option<Vec2> {
        match &self.motion {
            Motion::Dynamic(dynamics) => Some(dynamics.gravity_scale),
            _ => None,
        }
    }

    /// Set the gravity scale (dynamic bodies only)
    pub fn set_gravity_scale(&mut self, scale: Vec2) {
        match self.dynamics_mut() {
            Some(dynamics) => dynamics.gravity_scale = scale,
            None => log::warn!("Ignoring gravity scale set on a non-dynamic body"),
        }
    }

    /// Accumulated force; zero for non-dynamic bodies
    pub fn net_force(&self) -> Vec2 {
        self.dynamics().map_or_else(Vec2::zeros, |dynamics| dynamics.net_force)
    }

    /// Replace the accumulated force (dynamic bodies only)
    pub fn set_net_force(&mut self, force: Vec2) {
        match self.dynamics_mut() {
            Some(dynamics) => dynamics.net_force = force,
            None => log::warn!("Ignoring net force set on a non-dynamic body"),
        }
    }

    /// Accumulate a force (dynamic bodies only)
    pub fn add_force(&mut self, force: Vec2) {
        match self.dynamics_mut() {
            Some(dynamics) => dynamics.net_force += force,
            None => log::warn!("Ignoring force {:?} added to a non-dynamic body", force),
        }
    }

    /// Accumulate a force on the axes named by `axis` (dynamic bodies only)
    pub fn add_force_on(&mut self, axis: Direction, force: f32) {
        match self.dynamics_mut() {
            Some(dynamics) => dynamics.net_force.add_axis(axis, force),
            None => log::warn!("Ignoring force {} added to a non-dynamic body", force),
        }
    }

    // Step helpers

    /// Add gravity and quadratic air drag on `axis` to the net force
    ///
    /// Drag opposes the current velocity on `axis` and scales with the body's
    /// extent on the other axis (its frontal area). Non-dynamic bodies are
    /// left alone.
    pub(crate) fn apply_environment(
        &mut self,
        axis: Direction,
        gravity: Vec2,
        air_density: f32,
    ) -> Result<(), PhysicsError> {
        let frontal = self.bounds.size_on(axis.axis_swapped())?.abs();
        if let Motion::Dynamic(dynamics) = &mut self.motion {
            let velocity = dynamics.velocity.axis(axis)?;
            let weight = gravity.axis(axis)? * dynamics.gravity_scale.axis(axis)? * dynamics.mass;
            let drag = -0.5 * air_density * dynamics.drag * frontal * velocity * velocity.abs();
            dynamics.net_force.add_axis(axis, weight + drag);
        }
        Ok(())
    }

    /// Integrate the net force on `axis` into velocity
    ///
    /// # Errors
    ///
    /// `axis` must name exactly one axis.
    pub fn apply_net_force(&mut self, axis: Direction, elapsed: f32) -> Result<(), PhysicsError> {
        if let Motion::Dynamic(dynamics) = &mut self.motion {
            let acceleration = dynamics.net_force.axis(axis)? / dynamics.mass;
            dynamics.velocity.add_axis(axis, acceleration * elapsed);
        }
        Ok(())
    }

    /// Clear the net force on the axes named by `axis`
    pub fn reset_net_force(&mut self, axis: Direction) {
        if let Motion::Dynamic(dynamics) = &mut self.motion {
            dynamics.net_force.set_axis(axis, 0.0);
        }
    }

    /// Move by velocity along the axes named by `axis`
    pub fn apply_velocity(&mut self, axis: Direction, elapsed: f32) {
        let distance = self.velocity().select_axis(axis) * elapsed;
        self.bounds.translate(distance);
    }

    /// Direction of travel on each axis
    ///
    /// A zero component counts as heading east / south.
    pub fn heading(&self) -> Direction {
        let velocity = self.velocity();
        let horizontal = if velocity.x >= 0.0 { Direction::EAST } else { Direction::WEST };
        let vertical = if velocity.y >= 0.0 { Direction::SOUTH } else { Direction::NORTH };
        horizontal | vertical
    }

    /// Region swept along `axis` during `elapsed` seconds
    ///
    /// # Errors
    ///
    /// `axis` must be horizontal or vertical, not both and not `NONE`.
    pub fn velocity_smear(&self, axis: Direction, elapsed: f32) -> Result<Aabb, PhysicsError> {
        self.bounds.smear(axis, self.velocity() * elapsed)
    }

    /// Leading-edge slice entered along `axis` during `elapsed` seconds
    ///
    /// # Errors
    ///
    /// `axis` must be horizontal or vertical, not both and not `NONE`.
    pub fn velocity_offset(&self, axis: Direction, elapsed: f32) -> Result<Aabb, PhysicsError> {
        self.bounds.offset(axis, self.velocity() * elapsed)
    }

    /// Sweep this body along `axis` for `elapsed` seconds against `other`
    ///
    /// Returns the contact when the leading-edge slice for the step overlaps
    /// `other`. The contact side is the body's side facing its direction of
    /// travel on `axis`; the spot is the obstacle's opposite side.
    ///
    /// `tolerance` absorbs rounding: overlap across `axis` must be deeper than
    /// it, and a spot more than `tolerance` behind the leading side is not a
    /// contact, since the body is already past that face.
    ///
    /// # Errors
    ///
    /// `axis` must be horizontal or vertical, not both and not `NONE`.
    pub fn collides(
        &self,
        axis: Direction,
        other: &Aabb,
        elapsed: f32,
        tolerance: f32,
    ) -> Result<Option<Contact>, PhysicsError> {
        let axis = axis.canonical_axis()?;
        let side = (axis | axis.flipped()) & self.heading();
        let spot = other.side(side.flipped())?;

        let leading = self.bounds.side(side)?;
        let ahead = if side.is_positive() { spot - leading } else { leading - spot };
        if ahead < -tolerance {
            return Ok(None);
        }

        let swept = self.velocity_offset(axis, elapsed)?;
        Ok(swept
            .overlaps_across(axis, other, tolerance)?
            .then_some(Contact { side, spot }))
    }

    /// Whether `other` lies within `threshold` units of one side
    ///
    /// # Errors
    ///
    /// `side` must be exactly one of north, east, south or west.
    pub fn touches(&self, side: Direction, other: &Aabb, threshold: f32) -> Result<bool, PhysicsError> {
        Ok(self.bounds.smear_side(side, threshold)?.strictly_overlaps(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(x: f32, y: f32, size: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Vec2::new(size, size))
    }

    #[test]
    fn test_kind_defaults() {
        let wall = Body::fixed(square(0.0, 0.0, 10.0));
        assert_eq!(wall.kind(), BodyKind::Static);
        assert!(!wall.is_movable());
        assert_eq!(wall.bounce(), DEFAULT_BOUNCE);
        assert_eq!(wall.mass(), None);

        let crate_ = Body::dynamic(square(0.0, 0.0, 10.0), 4.0);
        assert_eq!(crate_.kind(), BodyKind::Dynamic);
        assert!(crate_.is_movable() && crate_.is_dynamic());
        assert_eq!(crate_.bounce(), DEFAULT_DYNAMIC_BOUNCE);
        assert_eq!(crate_.mass(), Some(4.0));
        assert_eq!(crate_.drag(), Some(DEFAULT_DRAG));
        assert!(crate_.groups().contains(CollisionGroups::DEFAULT_GROUP));

        let lift = Body::kinematic(square(0.0, 0.0, 10.0));
        assert!(lift.is_movable() && !lift.is_dynamic());
    }

    #[test]
    fn test_static_bodies_ignore_motion() {
        let mut wall = Body::fixed(square(0.0, 0.0, 10.0)).with_velocity(Vec2::new(5.0, 5.0));
        wall.add_force(Vec2::new(100.0, 0.0));
        assert_eq!(wall.velocity(), Vec2::zeros());
        assert_eq!(wall.net_force(), Vec2::zeros());
    }

    #[test]
    fn test_net_force_integration_per_axis() {
        let mut body = Body::dynamic(square(0.0, 0.0, 10.0), 2.0);
        body.add_force(Vec2::new(4.0, 8.0));
        body.apply_net_force(Direction::EAST, 0.5).unwrap();
        body.reset_net_force(Direction::EAST);

        assert_relative_eq!(body.velocity().x, 1.0);
        assert_relative_eq!(body.velocity().y, 0.0);
        assert_eq!(body.net_force(), Vec2::new(0.0, 8.0));
        assert!(body.apply_net_force(Direction::SOUTH_EAST, 0.5).is_err());
    }

    #[test]
    fn test_environment_adds_weight_and_opposing_drag() {
        let mut body = Body::dynamic(square(0.0, 0.0, 20.0), 10.0)
            .with_drag(0.1)
            .with_velocity(Vec2::new(0.0, 10.0));
        body.apply_environment(Direction::SOUTH, Vec2::new(0.0, 50.0), 0.05).unwrap();

        // weight 500, drag -0.5 * 0.05 * 0.1 * 20 * 10 * 10 = -5
        assert_relative_eq!(body.net_force().y, 495.0, epsilon = 1e-4);
        assert_relative_eq!(body.net_force().x, 0.0);
    }

    #[test]
    fn test_heading_follows_velocity_sign() {
        let body = Body::kinematic(square(0.0, 0.0, 1.0)).with_velocity(Vec2::new(-1.0, 0.0));
        assert_eq!(body.heading(), Direction::SOUTH_WEST);
        let body = body.with_velocity(Vec2::new(3.0, -2.0));
        assert_eq!(body.heading(), Direction::NORTH_EAST);
    }

    #[test]
    fn test_collides_reports_leading_side_and_obstacle_face() {
        let floor = Aabb::new(Vec2::new(0.0, 390.0), Vec2::new(399.0, 9.0));
        let body = Body::dynamic(square(100.0, 365.0, 20.0), 1.0).with_velocity(Vec2::new(0.0, 100.0));

        let contact = body.collides(Direction::SOUTH, &floor, 0.1, 1e-3).unwrap().unwrap();
        assert_eq!(contact.side, Direction::SOUTH);
        assert_eq!(contact.spot, 390.0);

        // Too slow to reach the floor this step
        assert_eq!(body.collides(Direction::SOUTH, &floor, 0.01, 1e-3).unwrap(), None);
        // Horizontal sweep slides over the floor
        assert_eq!(body.collides(Direction::EAST, &floor, 0.1, 1e-3).unwrap(), None);
    }

    #[test]
    fn test_resting_body_does_not_collide_without_motion() {
        let floor = Aabb::new(Vec2::new(0.0, 390.0), Vec2::new(399.0, 9.0));
        let body = Body::dynamic(square(100.0, 370.0, 20.0), 1.0);
        assert_eq!(body.collides(Direction::SOUTH, &floor, 0.1, 1e-3).unwrap(), None);
        assert_eq!(body.collides(Direction::EAST, &floor, 0.1, 1e-3).unwrap(), None);
    }

    #[test]
    fn test_obstacle_behind_leading_side_is_not_a_contact() {
        let floor = Aabb::new(Vec2::new(0.0, 390.0), Vec2::new(399.0, 9.0));
        // Sunk well into the floor and sweeping sideways: the floor's west face
        // is far behind the east edge
        let body = Body::dynamic(square(100.0, 375.0, 20.0), 1.0).with_velocity(Vec2::new(0.0, 1.0));
        assert_eq!(body.collides(Direction::EAST, &floor, 0.1, 1e-3).unwrap(), None);

        let runner = Body::dynamic(square(100.0, 375.0, 20.0), 1.0).with_velocity(Vec2::new(-10.0, 0.0));
        assert_eq!(runner.collides(Direction::EAST, &floor, 0.1, 1e-3).unwrap(), None);

        // A rounding-error sink on the sweep axis still snaps back flush
        let top = 390.0_f32;
        let sunk = Body::dynamic(Aabb::from_points(Vec2::new(100.0, 370.0), Vec2::new(120.0, top + 0.0001)), 1.0)
            .with_velocity(Vec2::new(0.0, 1.0));
        let contact = sunk.collides(Direction::SOUTH, &floor, 0.1, 1e-3).unwrap().unwrap();
        assert_eq!(contact.spot, 390.0);
    }

    #[test]
    fn test_unusable_mass_falls_back_to_default() {
        for mass in [0.0, -3.0, f32::NAN, f32::INFINITY] {
            let mut body = Body::dynamic(square(0.0, 0.0, 10.0), mass);
            assert_eq!(body.mass(), Some(DEFAULT_MASS));

            body.add_force(Vec2::new(2.0, 0.0));
            body.apply_net_force(Direction::EAST, 1.0).unwrap();
            assert_relative_eq!(body.velocity().x, 2.0);
        }

        let mut body = Body::dynamic(square(0.0, 0.0, 10.0), 4.0);
        body.set_mass(0.0);
        body.set_mass(-1.0);
        assert_eq!(body.mass(), Some(4.0));
        assert_eq!(body.dynamics().map(Dynamics::mass), Some(4.0));
    }

    #[test]
    fn test_touches_within_threshold() {
        let floor = Aabb::new(Vec2::new(0.0, 390.0), Vec2::new(399.0, 9.0));
        let body = Body::dynamic(square(100.0, 369.0, 20.0), 1.0);
        assert!(body.touches(Direction::SOUTH, &floor, 2.0).unwrap());
        assert!(!body.touches(Direction::NORTH, &floor, 2.0).unwrap());
        assert!(!body.touches(Direction::SOUTH, &floor, 0.5).unwrap());
        assert!(body.touches(Direction::SOUTH_EAST, &floor, 2.0).is_err());
    }
}
