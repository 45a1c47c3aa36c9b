//! Math utilities and types
//!
//! Provides the 2D vector type and the axis-addressed helpers the physics code
//! uses to treat horizontal and vertical work the same way.

use crate::foundation::direction::Direction;
use crate::PhysicsError;

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Extension trait addressing vector components through a [`Direction`]
///
/// Operations that read a single component require a direction on exactly one
/// axis. Operations that produce a vector accept any direction and apply to
/// every axis it touches, so `SOUTH_EAST` means "both components".
pub trait AxisVector {
    /// Read the component on `axis`
    ///
    /// # Errors
    ///
    /// `axis` must be horizontal or vertical, not both and not `NONE`.
    fn axis(&self, axis: Direction) -> Result<f32, PhysicsError>;

    /// Copy with every component not on `axis` zeroed
    fn select_axis(&self, axis: Direction) -> Vec2;

    /// Copy with the components on `axis` replaced by `value`
    fn with_axis(&self, axis: Direction, value: f32) -> Vec2;

    /// Copy with `value` added to the components on `axis`
    fn plus_axis(&self, axis: Direction, value: f32) -> Vec2;

    /// Replace the components on `axis` in place
    fn set_axis(&mut self, axis: Direction, value: f32);

    /// Add `value` to the components on `axis` in place
    fn add_axis(&mut self, axis: Direction, value: f32);
}

impl AxisVector for Vec2 {
    fn axis(&self, axis: Direction) -> Result<f32, PhysicsError> {
        if axis.canonical_axis()? == Direction::EAST {
            Ok(self.x)
        } else {
            Ok(self.y)
        }
    }

    fn select_axis(&self, axis: Direction) -> Vec2 {
        Vec2::new(
            if axis.is_horizontal() { self.x } else { 0.0 },
            if axis.is_vertical() { self.y } else { 0.0 },
        )
    }

    fn with_axis(&self, axis: Direction, value: f32) -> Vec2 {
        let mut result = *self;
        result.set_axis(axis, value);
        result
    }

    fn plus_axis(&self, axis: Direction, value: f32) -> Vec2 {
        let mut result = *self;
        result.add_axis(axis, value);
        result
    }

    fn set_axis(&mut self, axis: Direction, value: f32) {
        if axis.is_horizontal() {
            self.x = value;
        }
        if axis.is_vertical() {
            self.y = value;
        }
    }

    fn add_axis(&mut self, axis: Direction, value: f32) {
        if axis.is_horizontal() {
            self.x += value;
        }
        if axis.is_vertical() {
            self.y += value;
        }
    }
}

/// Scalar comparison helpers
pub mod cmp {
    /// Whether `a` lies strictly closer to `from` than `b` does
    pub fn closer(a: f32, b: f32, from: f32) -> bool {
        (from - a).abs() < (from - b).abs()
    }

    /// Length of the overlap of `[a1, b1]` and `[a2, b2]`
    ///
    /// Endpoints may come in either order. Disjoint ranges measure `0`.
    pub fn measure_intersection(a1: f32, b1: f32, a2: f32, b2: f32) -> f32 {
        let (min1, max1) = (a1.min(b1), a1.max(b1));
        let (min2, max2) = (a2.min(b2), a2.max(b2));
        (max1.min(max2) - min1.max(min2)).max(0.0)
    }

    /// Whether the closed ranges `[a1, b1]` and `[a2, b2]` share a point
    pub fn ranges_touch(a1: f32, b1: f32, a2: f32, b2: f32) -> bool {
        a1.min(b1) <= a2.max(b2) && a2.min(b2) <= a1.max(b1)
    }

    /// Whether the open ranges `(a1, b1)` and `(a2, b2)` overlap
    ///
    /// A degenerate range still overlaps a range that strictly contains it.
    pub fn ranges_overlap(a1: f32, b1: f32, a2: f32, b2: f32) -> bool {
        a1.min(b1) < a2.max(b2) && a2.min(b2) < a1.max(b1)
    }

    /// Whether the ranges `[a1, b1]` and `[a2, b2]` overlap by more than
    /// `tolerance`
    ///
    /// With a zero tolerance this is [`ranges_overlap`] for non-degenerate
    /// ranges.
    pub fn ranges_overlap_by(a1: f32, b1: f32, a2: f32, b2: f32, tolerance: f32) -> bool {
        a1.min(b1) + tolerance < a2.max(b2) && a2.min(b2) + tolerance < a1.max(b1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_read_requires_single_axis() {
        let v = Vec2::new(3.0, -4.0);
        assert_eq!(v.axis(Direction::EAST), Ok(3.0));
        assert_eq!(v.axis(Direction::WEST), Ok(3.0));
        assert_eq!(v.axis(Direction::NORTH), Ok(-4.0));
        assert!(v.axis(Direction::SOUTH_EAST).is_err());
        assert!(v.axis(Direction::NONE).is_err());
        assert_eq!(v.magnitude(), 5.0);
    }

    #[test]
    fn test_axis_writes_touch_named_components_only() {
        let v = Vec2::new(1.0, 2.0);
        assert_eq!(v.select_axis(Direction::SOUTH), Vec2::new(0.0, 2.0));
        assert_eq!(v.with_axis(Direction::EAST, 7.0), Vec2::new(7.0, 2.0));
        assert_eq!(v.plus_axis(Direction::SOUTH_EAST, 1.0), Vec2::new(2.0, 3.0));

        let mut w = v;
        w.add_axis(Direction::NORTH, -2.0);
        assert_eq!(w, Vec2::new(1.0, 0.0));
        w.set_axis(Direction::NONE, 9.0);
        assert_eq!(w, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_range_helpers() {
        assert_eq!(cmp::measure_intersection(0.0, 10.0, 5.0, 20.0), 5.0);
        assert_eq!(cmp::measure_intersection(10.0, 0.0, 20.0, 5.0), 5.0);
        assert_eq!(cmp::measure_intersection(0.0, 1.0, 2.0, 3.0), 0.0);

        assert!(cmp::ranges_touch(0.0, 1.0, 1.0, 2.0));
        assert!(!cmp::ranges_overlap(0.0, 1.0, 1.0, 2.0));
        assert!(cmp::ranges_overlap(5.0, 5.0, 0.0, 10.0));

        // A rounding-error sink does not count once a tolerance is given
        let top = 250.7_f32;
        let sunk = top + top * f32::EPSILON;
        assert!(cmp::ranges_overlap(200.0, sunk, top, 260.0));
        assert!(!cmp::ranges_overlap_by(200.0, sunk, top, 260.0, 1e-3));
        assert!(cmp::ranges_overlap_by(200.0, 251.0, top, 260.0, 1e-3));

        assert!(cmp::closer(4.0, 8.0, 3.0));
        assert!(!cmp::closer(8.0, 4.0, 3.0));
    }
}
