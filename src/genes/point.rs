// Random number generation trait from the rand crate
use rand::Rng;
// Serialization traits so a genome can be written to / read from JSON
use serde::{Deserialize, Serialize};

use std::fmt;

/// A single vertex of a polygon, in pixel coordinates
///
/// `Copy` is derived because a point is just two integers: copying it is as cheap
/// as copying a reference, so mutation can hand back a fresh `Point` value instead
/// of editing one in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Which coordinate a point mutation replaces
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Uniformly random point in `[0, max_w) x [0, max_h)`
    ///
    /// # Panics
    /// Panics if either bound is zero: there is no valid coordinate to pick.
    pub fn random(max_w: u32, max_h: u32, rng: &mut impl Rng) -> Self {
        Self {
            x: random_coordinate(max_w, rng),
            y: random_coordinate(max_h, rng),
        }
    }

    /// Return a copy of this point with exactly one coordinate re-rolled
    ///
    /// The axis is picked with equal probability; the other coordinate is kept.
    /// `self` is taken by value (it's `Copy`), so the caller's point is untouched.
    pub fn mutated(self, max_w: u32, max_h: u32, rng: &mut impl Rng) -> Self {
        let axis = if rng.gen_bool(0.5) { Axis::X } else { Axis::Y };
        match axis {
            Axis::X => self.with_axis(Axis::X, random_coordinate(max_w, rng)),
            Axis::Y => self.with_axis(Axis::Y, random_coordinate(max_h, rng)),
        }
    }

    /// Return a copy of this point with one coordinate replaced by `value`
    pub fn with_axis(self, axis: Axis, value: i32) -> Self {
        match axis {
            Axis::X => Self { x: value, ..self },
            Axis::Y => Self { y: value, ..self },
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

fn random_coordinate(max: u32, rng: &mut impl Rng) -> i32 {
    assert!(max > 0, "image dimensions must be non-zero");
    assert!(
        max <= i32::MAX as u32,
        "image dimension {} does not fit a pixel coordinate",
        max
    );
    rng.gen_range(0..max as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_point_in_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let p = Point::random(40, 7, &mut rng);
            assert!((0..40).contains(&p.x));
            assert!((0..7).contains(&p.y));
        }
    }

    #[test]
    fn test_random_point_single_pixel() {
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(Point::random(1, 1, &mut rng), Point::new(0, 0));
    }

    #[test]
    #[should_panic(expected = "image dimensions must be non-zero")]
    fn test_random_point_zero_width_panics() {
        let mut rng = StdRng::seed_from_u64(3);
        Point::random(0, 10, &mut rng);
    }

    #[test]
    fn test_random_point_at_largest_dimension() {
        let mut rng = StdRng::seed_from_u64(6);
        let p = Point::random(i32::MAX as u32, 1, &mut rng);
        assert!(p.x >= 0);
        assert_eq!(p.y, 0);
    }

    #[test]
    #[should_panic(expected = "does not fit a pixel coordinate")]
    fn test_random_point_oversized_dimension_panics() {
        let mut rng = StdRng::seed_from_u64(6);
        Point::random(u32::MAX, 10, &mut rng);
    }

    #[test]
    fn test_mutated_changes_at_most_one_axis() {
        let mut rng = StdRng::seed_from_u64(4);
        let original = Point::new(5, 9);

        for _ in 0..500 {
            let mutated = original.mutated(100, 100, &mut rng);
            // One coordinate always survives; the other may by chance be re-rolled to itself
            assert!(mutated.x == original.x || mutated.y == original.y);
            assert!((0..100).contains(&mutated.x));
            assert!((0..100).contains(&mutated.y));
        }
    }

    #[test]
    fn test_mutated_reaches_both_axes() {
        let mut rng = StdRng::seed_from_u64(5);
        let original = Point::new(50, 50);

        let mut x_changed = false;
        let mut y_changed = false;
        for _ in 0..200 {
            let mutated = original.mutated(100, 100, &mut rng);
            x_changed |= mutated.x != original.x;
            y_changed |= mutated.y != original.y;
        }
        assert!(x_changed && y_changed);
    }

    #[test]
    fn test_with_axis_preserves_other_coordinate() {
        let p = Point::new(3, 4);
        assert_eq!(p.with_axis(Axis::X, 10), Point::new(10, 4));
        assert_eq!(p.with_axis(Axis::Y, 10), Point::new(3, 10));
        // Original is a value, not a reference: it's unchanged
        assert_eq!(p, Point::new(3, 4));
    }
}
