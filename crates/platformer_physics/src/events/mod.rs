//! Contact events and step hooks
//!
//! Every engine update returns the contacts it found as a list of
//! [`ContactEvent`]s, in the order they happened. Callers that need to act
//! mid-step (input, animation, sound) implement [`StepObserver`] and pass it
//! to [`crate::physics::PhysicsEngine::update_observed`].

use crate::foundation::direction::Direction;
use crate::physics::{Body, BodyHandle, Contact};

/// What kind of contact happened
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactKind {
    /// Bodies sharing a collision group met
    Collision {
        /// Whether the engine snapped and responded; `false` when the bodies
        /// were already moving apart
        resolved: bool,

        /// Length of the shared edge, measured across the sweep axis
        contact_length: f32,
    },

    /// Bodies with disjoint collision groups passed through each other
    ///
    /// Only bodies the mover reaches are reported: anything beyond the
    /// obstacle it collides with on the same sweep is left out.
    Intersection,
}

/// A contact found while sweeping one body along one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    /// Kind of contact
    pub kind: ContactKind,

    /// Body that was moving
    pub body: BodyHandle,

    /// Body it ran into
    pub other: BodyHandle,

    /// Sweep axis (`EAST` or `SOUTH`)
    pub axis: Direction,

    /// Side of the moving body that made contact
    pub side: Direction,

    /// Coordinate of the other body's facing side
    pub spot: f32,
}

impl ContactEvent {
    /// Physical collision between group-sharing bodies
    pub fn collision(
        body: BodyHandle,
        other: BodyHandle,
        axis: Direction,
        contact: Contact,
        resolved: bool,
        contact_length: f32,
    ) -> Self {
        Self {
            kind: ContactKind::Collision { resolved, contact_length },
            body,
            other,
            axis,
            side: contact.side,
            spot: contact.spot,
        }
    }

    /// Pass-through overlap between bodies with disjoint groups
    pub fn intersection(body: BodyHandle, other: BodyHandle, axis: Direction, contact: Contact) -> Self {
        Self {
            kind: ContactKind::Intersection,
            body,
            other,
            axis,
            side: contact.side,
            spot: contact.spot,
        }
    }

    /// Whether this is a collision, resolved or not
    pub const fn is_collision(&self) -> bool {
        matches!(self.kind, ContactKind::Collision { .. })
    }

    /// Whether this collision was snapped and responded to
    pub const fn is_resolved(&self) -> bool {
        matches!(self.kind, ContactKind::Collision { resolved: true, .. })
    }

    /// Whether `handle` took part, on either end
    pub fn involves(&self, handle: BodyHandle) -> bool {
        self.body == handle || self.other == handle
    }
}

/// Hooks called while the engine steps
///
/// All methods default to no-ops. The movement hooks receive the body being
/// processed and may change it (e.g. apply input forces right before
/// integration); they run once per body per axis pass.
pub trait StepObserver {
    /// Called before forces are integrated for `body` on `axis`
    fn before_movement(&mut self, _handle: BodyHandle, _body: &mut Body, _axis: Direction, _elapsed: f32) {}

    /// Called after `body` has moved or been resolved on `axis`
    fn after_movement(&mut self, _handle: BodyHandle, _body: &mut Body, _axis: Direction, _elapsed: f32) {}

    /// Called for every contact as it is found
    fn on_contact(&mut self, _event: &ContactEvent) {}
}

/// Observer that ignores everything
impl StepObserver for () {}
