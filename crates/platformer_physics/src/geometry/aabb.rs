//! Axis-aligned box geometry
//!
//! An [`Aabb`] is stored as an anchor `position` plus a `size`. The size may be
//! negative on either axis (a box built from two arbitrary points keeps the
//! first point as its anchor), so nothing here assumes `position` is the
//! minimum corner: every side and corner query goes through min/max of the two
//! derived points.

use crate::foundation::direction::Direction;
use crate::foundation::math::{cmp, AxisVector, Vec2};
use crate::PhysicsError;

/// Axis-aligned box defined by an anchor point and a (possibly negative) size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    position: Vec2,
    size: Vec2,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::new(Vec2::zeros(), Vec2::zeros())
    }
}

impl Aabb {
    /// Create a box from its anchor position and size
    pub const fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    /// Create a box spanning two arbitrary points
    ///
    /// `point_a` becomes the anchor; the size points from it to `point_b` and
    /// may therefore be negative.
    pub fn from_points(point_a: Vec2, point_b: Vec2) -> Self {
        Self::new(point_a, point_b - point_a)
    }

    // Raw fields

    /// Anchor position
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Move the anchor, keeping the size
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Signed size
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Resize, keeping the anchor
    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    /// Anchor component on `axis`
    ///
    /// # Errors
    ///
    /// `axis` must name exactly one axis.
    pub fn position_on(&self, axis: Direction) -> Result<f32, PhysicsError> {
        self.position.axis(axis)
    }

    /// Signed size component on `axis`
    ///
    /// # Errors
    ///
    /// `axis` must name exactly one axis.
    pub fn size_on(&self, axis: Direction) -> Result<f32, PhysicsError> {
        self.size.axis(axis)
    }

    /// Signed width
    pub fn width(&self) -> f32 {
        self.size.x
    }

    /// Signed height
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Covered area, always non-negative
    pub fn area(&self) -> f32 {
        (self.size.x * self.size.y).abs()
    }

    // Points

    /// First defining point (the anchor)
    pub const fn point_a(&self) -> Vec2 {
        self.position
    }

    /// Move the first point, keeping the second one where it is
    pub fn set_point_a(&mut self, value: Vec2) {
        self.size += self.position - value;
        self.position = value;
    }

    /// Second defining point (`position + size`)
    pub fn point_b(&self) -> Vec2 {
        self.position + self.size
    }

    /// Move the second point, keeping the first one where it is
    pub fn set_point_b(&mut self, value: Vec2) {
        self.size = value - self.position;
    }

    /// Center of the box
    pub fn center(&self) -> Vec2 {
        self.position + self.size / 2.0
    }

    /// Move the box so its center sits at `value`
    pub fn set_center(&mut self, value: Vec2) {
        self.position = value - self.size / 2.0;
    }

    // Sides and corners

    /// Coordinate of one side
    ///
    /// North and west always return the smaller coordinate, south and east the
    /// larger one, whatever the sign of the size.
    ///
    /// # Errors
    ///
    /// `side` must be exactly one of north, east, south or west.
    pub fn side(&self, side: Direction) -> Result<f32, PhysicsError> {
        let (a, b) = (self.point_a(), self.point_b());
        match side.expect_side()? {
            Direction::NORTH => Ok(a.y.min(b.y)),
            Direction::EAST => Ok(a.x.max(b.x)),
            Direction::SOUTH => Ok(a.y.max(b.y)),
            _ => Ok(a.x.min(b.x)),
        }
    }

    /// Position of one corner
    ///
    /// # Errors
    ///
    /// `corner` must be one of the four corners, e.g. `NORTH_WEST`.
    pub fn corner(&self, corner: Direction) -> Result<Vec2, PhysicsError> {
        let corner = corner.expect_corner()?;
        Ok(Vec2::new(
            self.side(corner & Direction::EAST_WEST)?,
            self.side(corner & Direction::NORTH_SOUTH)?,
        ))
    }

    // Overlap tests

    /// Whether the closed boxes share at least one point
    ///
    /// Boxes that only touch along an edge intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        let (a1, b1, a2, b2) = (self.point_a(), self.point_b(), other.point_a(), other.point_b());
        cmp::ranges_touch(a1.x, b1.x, a2.x, b2.x) && cmp::ranges_touch(a1.y, b1.y, a2.y, b2.y)
    }

    /// Whether the open interiors of the boxes overlap
    ///
    /// Boxes that only touch along an edge do not overlap. A zero-thickness box
    /// overlaps a box whose interior strictly contains it.
    pub fn strictly_overlaps(&self, other: &Self) -> bool {
        let (a1, b1, a2, b2) = (self.point_a(), self.point_b(), other.point_a(), other.point_b());
        cmp::ranges_overlap(a1.x, b1.x, a2.x, b2.x) && cmp::ranges_overlap(a1.y, b1.y, a2.y, b2.y)
    }

    /// Open overlap along `axis` that is deeper than `tolerance` across it
    ///
    /// Used by the sweep: a box sunk into its neighbour by a rounding error
    /// does not count as overlapping it across the sweep axis.
    ///
    /// # Errors
    ///
    /// `axis` must name exactly one axis.
    pub fn overlaps_across(&self, axis: Direction, other: &Self, tolerance: f32) -> Result<bool, PhysicsError> {
        let along = axis.canonical_axis()?;
        let across = along.axis_swapped();
        let (near, far) = (along.flipped(), along);
        let (lo, hi) = (across.flipped(), across);
        Ok(
            cmp::ranges_overlap(self.side(near)?, self.side(far)?, other.side(near)?, other.side(far)?)
                && cmp::ranges_overlap_by(self.side(lo)?, self.side(hi)?, other.side(lo)?, other.side(hi)?, tolerance),
        )
    }

    /// Length of the overlap of both boxes' projections onto `axis`
    ///
    /// # Errors
    ///
    /// `axis` must name exactly one axis.
    pub fn measure_intersection(&self, axis: Direction, other: &Self) -> Result<f32, PhysicsError> {
        let axis = axis.canonical_axis()?;
        let near = axis.flipped();
        Ok(cmp::measure_intersection(
            self.side(near)?,
            self.side(axis)?,
            other.side(near)?,
            other.side(axis)?,
        ))
    }

    // Swept regions

    /// Region covered while moving by `offset` along `axis`
    ///
    /// The box is stretched from the edge facing away from the motion to the
    /// leading edge displaced by the offset component on `axis`. The result
    /// always contains the original box.
    ///
    /// # Errors
    ///
    /// `axis` must be horizontal or vertical, not both and not `NONE`.
    pub fn smear(&self, axis: Direction, offset: Vec2) -> Result<Self, PhysicsError> {
        let north_west = self.corner(Direction::NORTH_WEST)?;
        let south_east = self.corner(Direction::SOUTH_EAST)?;

        let box_ = match axis.canonical_axis()? {
            Direction::EAST if offset.x >= 0.0 => {
                Self::from_points(north_west, south_east.plus_axis(Direction::EAST, offset.x))
            }
            Direction::EAST => {
                Self::from_points(north_west.plus_axis(Direction::EAST, offset.x), south_east)
            }
            _ if offset.y >= 0.0 => {
                Self::from_points(north_west, south_east.plus_axis(Direction::SOUTH, offset.y))
            }
            _ => Self::from_points(north_west.plus_axis(Direction::SOUTH, offset.y), south_east),
        };
        Ok(box_)
    }

    /// Region newly entered while moving by `offset` along `axis`
    ///
    /// Only the slice between the leading edge and the displaced leading edge
    /// is returned. A body resting flush against a surface therefore does not
    /// report continued contact with it unless it actually moves into it.
    ///
    /// # Errors
    ///
    /// `axis` must be horizontal or vertical, not both and not `NONE`.
    pub fn offset(&self, axis: Direction, offset: Vec2) -> Result<Self, PhysicsError> {
        let box_ = match axis.canonical_axis()? {
            Direction::EAST if offset.x >= 0.0 => Self::from_points(
                self.corner(Direction::NORTH_EAST)?,
                self.corner(Direction::SOUTH_EAST)?.plus_axis(Direction::EAST, offset.x),
            ),
            Direction::EAST => Self::from_points(
                self.corner(Direction::NORTH_WEST)?.plus_axis(Direction::EAST, offset.x),
                self.corner(Direction::SOUTH_WEST)?,
            ),
            _ if offset.y >= 0.0 => Self::from_points(
                self.corner(Direction::SOUTH_WEST)?,
                self.corner(Direction::SOUTH_EAST)?.plus_axis(Direction::SOUTH, offset.y),
            ),
            _ => Self::from_points(
                self.corner(Direction::NORTH_WEST)?.plus_axis(Direction::SOUTH, offset.y),
                self.corner(Direction::NORTH_EAST)?,
            ),
        };
        Ok(box_)
    }

    /// Stretch the box `distance` units out of one side
    ///
    /// # Errors
    ///
    /// `side` must be exactly one of north, east, south or west.
    pub fn smear_side(&self, side: Direction, distance: f32) -> Result<Self, PhysicsError> {
        let side = side.expect_side()?;
        let signed = if side.is_positive() { distance } else { -distance };
        self.smear(side, Vec2::new(signed, signed))
    }

    // Movement

    /// Move the whole box
    pub fn translate(&mut self, distance: Vec2) {
        self.position += distance;
    }

    /// Move the box along the axes named by `axis`
    pub fn translate_axis(&mut self, axis: Direction, distance: f32) {
        self.position.add_axis(axis, distance);
    }

    /// Move the box so that one side sits at `value`, keeping the size
    ///
    /// # Errors
    ///
    /// `side` must be exactly one of north, east, south or west.
    pub fn set_position_on_side(&mut self, side: Direction, value: f32) -> Result<(), PhysicsError> {
        let side = side.expect_side()?;
        let size = self.size;
        if self.size_on(side)? >= 0.0 {
            match side {
                Direction::NORTH => self.position.y = value,
                Direction::EAST => self.position.x = value - size.x,
                Direction::SOUTH => self.position.y = value - size.y,
                _ => self.position.x = value,
            }
        } else {
            match side {
                Direction::NORTH => self.position.y = value - size.y,
                Direction::EAST => self.position.x = value,
                Direction::SOUTH => self.position.y = value,
                _ => self.position.x = value - size.x,
            }
        }
        Ok(())
    }

    /// Move the box so that one corner sits at `value`, keeping the size
    ///
    /// # Errors
    ///
    /// `corner` must be one of the four corners.
    pub fn set_position_on_corner(&mut self, corner: Direction, value: Vec2) -> Result<(), PhysicsError> {
        let corner = corner.expect_corner()?;
        self.set_position_on_side(corner & Direction::EAST_WEST, value.x)?;
        self.set_position_on_side(corner & Direction::NORTH_SOUTH, value.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SIDES: [Direction; 4] = [Direction::NORTH, Direction::EAST, Direction::SOUTH, Direction::WEST];

    fn sample_boxes() -> Vec<Aabb> {
        let mut boxes = Vec::new();
        for &(x, y) in &[(0.0, 0.0), (5.0, -3.0), (-10.0, 12.0)] {
            for &(w, h) in &[(10.0, 4.0), (-10.0, 4.0), (10.0, -4.0), (-6.0, -8.0), (0.0, 3.0)] {
                boxes.push(Aabb::new(Vec2::new(x, y), Vec2::new(w, h)));
            }
        }
        boxes
    }

    #[test]
    fn test_sides_are_normalized_for_negative_sizes() {
        for b in sample_boxes() {
            assert!(b.side(Direction::NORTH).unwrap() <= b.side(Direction::SOUTH).unwrap());
            assert!(b.side(Direction::WEST).unwrap() <= b.side(Direction::EAST).unwrap());
        }

        let flipped = Aabb::new(Vec2::new(10.0, 10.0), Vec2::new(-4.0, -6.0));
        assert_eq!(flipped.side(Direction::WEST), Ok(6.0));
        assert_eq!(flipped.side(Direction::EAST), Ok(10.0));
        assert_eq!(flipped.side(Direction::NORTH), Ok(4.0));
        assert_eq!(flipped.side(Direction::SOUTH), Ok(10.0));
        assert_eq!(flipped.corner(Direction::NORTH_WEST), Ok(Vec2::new(6.0, 4.0)));
    }

    #[test]
    fn test_side_and_corner_reject_bad_directions() {
        let b = Aabb::new(Vec2::zeros(), Vec2::new(1.0, 1.0));
        assert!(b.side(Direction::NONE).is_err());
        assert!(b.side(Direction::NORTH_EAST).is_err());
        assert!(b.corner(Direction::NORTH).is_err());
        assert!(b.corner(Direction::EAST_WEST).is_err());
    }

    #[test]
    fn test_from_points_in_any_order() {
        let b = Aabb::from_points(Vec2::new(30.0, 5.0), Vec2::new(10.0, 25.0));
        assert_eq!(b.size(), Vec2::new(-20.0, 20.0));
        assert_eq!(b.side(Direction::WEST), Ok(10.0));
        assert_eq!(b.side(Direction::EAST), Ok(30.0));
        assert_relative_eq!(b.area(), 400.0);
        assert_eq!(b.center(), Vec2::new(20.0, 15.0));
    }

    #[test]
    fn test_point_setters_keep_the_other_point() {
        let mut b = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        b.set_point_a(Vec2::new(2.0, 3.0));
        assert_eq!(b.point_b(), Vec2::new(10.0, 10.0));
        b.set_point_b(Vec2::new(1.0, 1.0));
        assert_eq!(b.point_a(), Vec2::new(2.0, 3.0));
        assert_eq!(b.size(), Vec2::new(-1.0, -2.0));
    }

    #[test]
    fn test_intersection_is_symmetric() {
        let boxes = sample_boxes();
        for a in &boxes {
            for b in &boxes {
                assert_eq!(a.intersects(b), b.intersects(a));
                assert_eq!(a.strictly_overlaps(b), b.strictly_overlaps(a));
            }
        }
    }

    #[test]
    fn test_edge_contact_intersects_but_does_not_overlap() {
        let floor = Aabb::new(Vec2::new(0.0, 390.0), Vec2::new(399.0, 9.0));
        let resting = Aabb::new(Vec2::new(100.0, 370.0), Vec2::new(20.0, 20.0));
        assert!(resting.intersects(&floor));
        assert!(!resting.strictly_overlaps(&floor));

        let sunk = Aabb::new(Vec2::new(100.0, 371.0), Vec2::new(20.0, 20.0));
        assert!(sunk.strictly_overlaps(&floor));
    }

    #[test]
    fn test_overlaps_across_ignores_rounding_sink() {
        let floor = Aabb::new(Vec2::new(0.0, 250.7), Vec2::new(399.0, 9.0));
        let top = floor.side(Direction::NORTH).unwrap();
        let sunk = Aabb::from_points(Vec2::new(100.0, 218.6), Vec2::new(120.0, top + top * f32::EPSILON));

        assert!(sunk.strictly_overlaps(&floor));
        assert!(!sunk.overlaps_across(Direction::EAST, &floor, 1e-3).unwrap());
        assert!(sunk.overlaps_across(Direction::SOUTH, &floor, 1e-3).unwrap());
        assert!(sunk.overlaps_across(Direction::SOUTH_EAST, &floor, 1e-3).is_err());
    }

    #[test]
    fn test_smear_contains_original() {
        let offsets = [Vec2::new(5.0, -7.0), Vec2::new(-5.0, 7.0), Vec2::zeros()];
        for b in sample_boxes() {
            for offset in offsets {
                for axis in [Direction::EAST, Direction::SOUTH] {
                    let smeared = b.smear(axis, offset).unwrap();
                    assert!(smeared.intersects(&b));
                    assert!(smeared.side(Direction::WEST).unwrap() <= b.side(Direction::WEST).unwrap());
                    assert!(smeared.side(Direction::SOUTH).unwrap() >= b.side(Direction::SOUTH).unwrap());
                }
            }
        }
    }

    #[test]
    fn test_smear_extends_toward_offset_sign() {
        let b = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));

        let east = b.smear(Direction::EAST, Vec2::new(5.0, 0.0)).unwrap();
        assert_eq!(east.side(Direction::WEST), Ok(0.0));
        assert_eq!(east.side(Direction::EAST), Ok(15.0));

        let north = b.smear(Direction::NORTH, Vec2::new(0.0, -4.0)).unwrap();
        assert_eq!(north.side(Direction::NORTH), Ok(-4.0));
        assert_eq!(north.side(Direction::SOUTH), Ok(10.0));

        let touch = b.smear_side(Direction::WEST, 2.0).unwrap();
        assert_eq!(touch.side(Direction::WEST), Ok(-2.0));
        assert_eq!(touch.side(Direction::EAST), Ok(10.0));
    }

    #[test]
    fn test_offset_is_only_the_leading_slice() {
        let b = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));

        let south = b.offset(Direction::SOUTH, Vec2::new(0.0, 3.0)).unwrap();
        assert_eq!(south.side(Direction::NORTH), Ok(10.0));
        assert_eq!(south.side(Direction::SOUTH), Ok(13.0));
        assert_eq!(south.side(Direction::WEST), Ok(0.0));
        assert_eq!(south.side(Direction::EAST), Ok(10.0));

        let west = b.offset(Direction::EAST, Vec2::new(-4.0, 0.0)).unwrap();
        assert_eq!(west.side(Direction::WEST), Ok(-4.0));
        assert_eq!(west.side(Direction::EAST), Ok(0.0));

        let north = b.offset(Direction::SOUTH, Vec2::new(0.0, -1.0)).unwrap();
        assert_eq!(north.side(Direction::NORTH), Ok(-1.0));
        assert_eq!(north.side(Direction::SOUTH), Ok(0.0));
    }

    #[test]
    fn test_swept_regions_reject_bad_axes() {
        let b = Aabb::new(Vec2::zeros(), Vec2::new(1.0, 1.0));
        assert!(b.smear(Direction::NONE, Vec2::new(1.0, 1.0)).is_err());
        assert!(b.smear(Direction::SOUTH_EAST, Vec2::new(1.0, 1.0)).is_err());
        assert!(b.offset(Direction::NORTH_WEST, Vec2::new(1.0, 1.0)).is_err());
    }

    #[test]
    fn test_set_position_on_side_for_both_size_signs() {
        for size in [Vec2::new(20.0, 20.0), Vec2::new(-20.0, -20.0)] {
            for side in SIDES {
                let mut b = Aabb::new(Vec2::new(50.0, 50.0), size);
                b.set_position_on_side(side, 100.0).unwrap();
                assert_eq!(b.side(side), Ok(100.0));
                assert_eq!(b.size(), size);
            }
        }
    }

    #[test]
    fn test_set_position_on_corner() {
        let mut b = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(-10.0, 5.0));
        b.set_position_on_corner(Direction::SOUTH_EAST, Vec2::new(40.0, 40.0)).unwrap();
        assert_eq!(b.corner(Direction::SOUTH_EAST), Ok(Vec2::new(40.0, 40.0)));
        assert!(b.set_position_on_corner(Direction::EAST, Vec2::zeros()).is_err());
    }

    #[test]
    fn test_measure_intersection() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(20.0, 20.0));
        let b = Aabb::new(Vec2::new(15.0, 30.0), Vec2::new(-10.0, 10.0));
        assert_eq!(a.measure_intersection(Direction::EAST, &b), Ok(10.0));
        assert_eq!(a.measure_intersection(Direction::SOUTH, &b), Ok(0.0));
        assert!(a.measure_intersection(Direction::SOUTH_EAST, &b).is_err());
    }
}
