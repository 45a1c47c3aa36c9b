//! Physics error type

use crate::foundation::direction::Direction;
use thiserror::Error;

/// Errors raised by geometry and engine operations
///
/// Every variant is a contract violation by the caller (an ill-formed
/// direction was passed where a specific shape of direction is required).
/// None of them are recoverable by retrying.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicsError {
    /// A direction did not have the shape the operation requires
    #[error("invalid argument: expected {expected}, got {found:?}")]
    InvalidArgument {
        /// What the operation accepts
        expected: &'static str,
        /// The direction that was actually passed
        found: Direction,
    },
}

impl PhysicsError {
    pub(crate) const fn invalid(expected: &'static str, found: Direction) -> Self {
        Self::InvalidArgument { expected, found }
    }
}
