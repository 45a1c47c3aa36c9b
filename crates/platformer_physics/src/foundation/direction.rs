//! Cardinal direction flag set
//!
//! A [`Direction`] is any combination of the four cardinal bits. A single bit
//! names a side of a box, two adjacent bits name a corner, and the same value
//! doubles as an axis selector: anything touching `EAST_WEST` is horizontal,
//! anything touching `NORTH_SOUTH` is vertical. That lets north/south and
//! east/west logic share one code path in the geometry and the engine.
//!
//! Screen coordinates are assumed: x grows toward `EAST`, y grows toward
//! `SOUTH`.

use crate::PhysicsError;
use bitflags::bitflags;

bitflags! {
    /// Set of cardinal directions
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Direction: u8 {
        /// Up (toward smaller y)
        const NORTH = 0b1000;
        /// Right (toward larger x)
        const EAST = 0b0100;
        /// Down (toward larger y)
        const SOUTH = 0b0010;
        /// Left (toward smaller x)
        const WEST = 0b0001;

        /// Top-right corner
        const NORTH_EAST = Self::NORTH.bits() | Self::EAST.bits();
        /// Bottom-right corner; also "both axes" when used as an axis
        const SOUTH_EAST = Self::SOUTH.bits() | Self::EAST.bits();
        /// Bottom-left corner
        const SOUTH_WEST = Self::SOUTH.bits() | Self::WEST.bits();
        /// Top-left corner
        const NORTH_WEST = Self::NORTH.bits() | Self::WEST.bits();

        /// The whole vertical axis
        const NORTH_SOUTH = Self::NORTH.bits() | Self::SOUTH.bits();
        /// The whole horizontal axis
        const EAST_WEST = Self::EAST.bits() | Self::WEST.bits();

        /// Every direction
        const ALL = 0b1111;
    }
}

impl Direction {
    /// No direction at all
    pub const NONE: Self = Self::empty();

    /// Whether any horizontal bit is set
    pub const fn is_horizontal(self) -> bool {
        self.intersects(Self::EAST_WEST)
    }

    /// Whether any vertical bit is set
    pub const fn is_vertical(self) -> bool {
        self.intersects(Self::NORTH_SOUTH)
    }

    /// Whether exactly one cardinal bit is set
    pub const fn is_single(self) -> bool {
        self.bits().count_ones() == 1
    }

    /// Whether this direction points toward growing coordinates (`EAST` or `SOUTH`)
    pub const fn is_positive(self) -> bool {
        self.intersects(Self::SOUTH_EAST)
    }

    /// Keep only the bits lying on the axes named by `axis`
    pub const fn select_axis(self, axis: Self) -> Self {
        let mut bits = 0;
        if axis.is_horizontal() {
            bits |= self.bits() & Self::EAST_WEST.bits();
        }
        if axis.is_vertical() {
            bits |= self.bits() & Self::NORTH_SOUTH.bits();
        }
        Self::from_bits_truncate(bits)
    }

    /// Opposite direction: north <-> south, east <-> west
    pub const fn flipped(self) -> Self {
        let bits = self.bits();
        Self::from_bits_truncate(((bits & 0b1100) >> 2) | ((bits & 0b0011) << 2))
    }

    /// Swap east and west, leaving north and south alone
    pub const fn mirrored_horizontally(self) -> Self {
        let bits = self.bits();
        Self::from_bits_truncate(
            (bits & Self::NORTH_SOUTH.bits()) | ((bits & 0b0100) >> 2) | ((bits & 0b0001) << 2),
        )
    }

    /// Swap north and south, leaving east and west alone
    pub const fn mirrored_vertically(self) -> Self {
        let bits = self.bits();
        Self::from_bits_truncate(
            (bits & Self::EAST_WEST.bits()) | ((bits & 0b1000) >> 2) | ((bits & 0b0010) << 2),
        )
    }

    /// Mirror along every axis named by `axis`
    pub const fn mirrored(self, axis: Self) -> Self {
        let mut result = self;
        if axis.is_horizontal() {
            result = result.mirrored_horizontally();
        }
        if axis.is_vertical() {
            result = result.mirrored_vertically();
        }
        result
    }

    /// Quarter turn clockwise: north -> east -> south -> west -> north
    pub const fn rotated_clockwise(self) -> Self {
        let bits = self.bits();
        Self::from_bits_truncate(((bits & 0b1110) >> 1) | ((bits & 0b0001) << 3))
    }

    /// Quarter turn counter-clockwise: north -> west -> south -> east -> north
    pub const fn rotated_counter_clockwise(self) -> Self {
        let bits = self.bits();
        Self::from_bits_truncate(((bits & 0b0111) << 1) | ((bits & 0b1000) >> 3))
    }

    /// Move horizontal bits onto the vertical axis and vice versa
    ///
    /// `EAST` becomes `NORTH` and `SOUTH` becomes `WEST`. Used to pick the
    /// *other* axis, e.g. the frontal extent for drag or the friction axis.
    pub const fn axis_swapped(self) -> Self {
        let bits = self.bits();
        Self::from_bits_truncate(((bits & 0b1010) >> 1) | ((bits & 0b0101) << 1))
    }

    /// Reduce a direction naming exactly one axis to that axis' positive side
    ///
    /// Purely horizontal values map to `EAST`, purely vertical ones to `SOUTH`.
    ///
    /// # Errors
    ///
    /// `NONE`, or a value touching both axes, is rejected.
    pub fn canonical_axis(self) -> Result<Self, PhysicsError> {
        match (self.is_horizontal(), self.is_vertical()) {
            (true, false) => Ok(Self::EAST),
            (false, true) => Ok(Self::SOUTH),
            (true, true) => Err(PhysicsError::invalid(
                "exclusively horizontal or vertical, not both",
                self,
            )),
            (false, false) => Err(PhysicsError::invalid("a horizontal or vertical axis", self)),
        }
    }

    /// Check that this is exactly one of north, east, south or west
    ///
    /// # Errors
    ///
    /// Compound values and `NONE` are rejected.
    pub fn expect_side(self) -> Result<Self, PhysicsError> {
        if self.is_single() {
            Ok(self)
        } else {
            Err(PhysicsError::invalid("exclusively north, east, south or west", self))
        }
    }

    /// Check that this is exactly one horizontal and one vertical bit
    ///
    /// # Errors
    ///
    /// Anything that is not one of the four corners is rejected.
    pub fn expect_corner(self) -> Result<Self, PhysicsError> {
        let horizontal = self.select_axis(Self::EAST_WEST);
        let vertical = self.select_axis(Self::NORTH_SOUTH);
        if horizontal.is_single() && vertical.is_single() {
            Ok(self)
        } else {
            Err(PhysicsError::invalid("a corner such as NORTH_WEST", self))
        }
    }
}
