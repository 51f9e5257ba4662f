// Random number generation trait from the rand crate
use rand::Rng;
// Serialization traits - lets a whole genome be saved as JSON
use serde::{Deserialize, Serialize};

use super::color::{mutate_color, random_color, Color};
use super::point::Point;
use super::{MAX_POLYGON_POINTS, MIN_POLYGON_POINTS};
use crate::error::GenomeError;

/// A single polygon gene: an ordered outline plus one color
///
/// The outline is implicitly closed (last point joins back to the first), so
/// point order matters: the same points in a different order can draw a
/// different shape.
///
/// **Invariant:** `MIN_POLYGON_POINTS <= points.len() <= MAX_POLYGON_POINTS`.
/// The point list is private so the only ways to change it are the methods
/// below, and each of them keeps the count inside that range.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPolygon")]
pub struct Polygon {
    points: Vec<Point>,

    /// Fill and stroke color (non-premultiplied RGBA)
    pub color: Color,
}

/// Unchecked shape of a polygon as it appears in a saved genome
#[derive(Deserialize)]
struct RawPolygon {
    points: Vec<Point>,
    color: Color,
}

impl TryFrom<RawPolygon> for Polygon {
    type Error = GenomeError;

    fn try_from(raw: RawPolygon) -> Result<Self, Self::Error> {
        if !(MIN_POLYGON_POINTS..=MAX_POLYGON_POINTS).contains(&raw.points.len()) {
            return Err(GenomeError::PointCount {
                count: raw.points.len(),
            });
        }
        Ok(Self {
            points: raw.points,
            color: raw.color,
        })
    }
}

/// The three kinds of mutation a polygon can undergo
///
/// A closed enum: `match` on it is checked for exhaustiveness by the compiler,
/// so there's no "unknown mutation" case to fall through to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationKind {
    /// Replace one channel of the color
    Color,
    /// Replace one coordinate of one point
    Point,
    /// Append a random point or delete one, depending on the current count
    AddOrDeletePoint,
}

impl MutationKind {
    pub const ALL: [MutationKind; 3] = [
        MutationKind::Color,
        MutationKind::Point,
        MutationKind::AddOrDeletePoint,
    ];

    /// Pick one kind uniformly at random
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl Polygon {
    /// Build a polygon from an explicit outline
    ///
    /// # Panics
    /// Panics if the number of points is outside
    /// `MIN_POLYGON_POINTS..=MAX_POLYGON_POINTS`.
    pub fn new(points: Vec<Point>, color: Color) -> Self {
        assert!(
            (MIN_POLYGON_POINTS..=MAX_POLYGON_POINTS).contains(&points.len()),
            "polygon must have between {} and {} points, got {}",
            MIN_POLYGON_POINTS,
            MAX_POLYGON_POINTS,
            points.len()
        );
        Self { points, color }
    }

    /// Random polygon inside a `max_w x max_h` image
    ///
    /// Random color (alpha included, so it may be anywhere from invisible to
    /// opaque), then a uniformly chosen point count, then that many random points.
    pub fn random(max_w: u32, max_h: u32, rng: &mut impl Rng) -> Self {
        let color = random_color(rng);
        let num_points = rng.gen_range(MIN_POLYGON_POINTS..=MAX_POLYGON_POINTS);
        let points = (0..num_points)
            .map(|_| Point::random(max_w, max_h, rng))
            .collect();

        Self { points, color }
    }

    /// The outline, in drawing order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Apply one uniformly chosen mutation; returns the kind that was applied
    pub fn mutate(&mut self, max_w: u32, max_h: u32, rng: &mut impl Rng) -> MutationKind {
        let kind = MutationKind::random(rng);
        self.apply_mutation(kind, max_w, max_h, rng);
        kind
    }

    /// Apply a specific kind of mutation
    pub fn apply_mutation(&mut self, kind: MutationKind, max_w: u32, max_h: u32, rng: &mut impl Rng) {
        match kind {
            MutationKind::Color => {
                let original = self.color;
                self.color = mutate_color(self.color, rng);
                tracing::debug!(from = ?original, to = ?self.color, "color mutation");
            }
            MutationKind::Point => {
                let index = rng.gen_range(0..self.points.len());
                let original = self.points[index];
                let mutated = original.mutated(max_w, max_h, rng);
                self.points[index] = mutated;
                tracing::debug!(%original, %mutated, index, "point mutation");
            }
            MutationKind::AddOrDeletePoint => {
                let before = self.points.len();

                // At either end of the allowed range only one direction is legal
                let add = match before {
                    MIN_POLYGON_POINTS => true,
                    MAX_POLYGON_POINTS => false,
                    _ => rng.gen_bool(0.5),
                };

                if add {
                    self.add_point(Point::random(max_w, max_h, rng));
                } else {
                    self.delete_random_point(rng);
                }

                tracing::debug!(before, after = self.points.len(), "add/delete point mutation");
            }
        }
    }

    /// Append a point to the end of the outline
    ///
    /// # Panics
    /// Panics if the polygon already has `MAX_POLYGON_POINTS` points.
    pub fn add_point(&mut self, point: Point) {
        assert!(
            self.points.len() < MAX_POLYGON_POINTS,
            "cannot add a point to a polygon with {} points",
            self.points.len()
        );
        self.points.push(point);
    }

    /// Remove one uniformly chosen point, keeping the others in order
    ///
    /// `Vec::remove` shifts the tail down by one, so the outline order of the
    /// surviving points is preserved.
    ///
    /// # Panics
    /// Panics if the polygon has only `MIN_POLYGON_POINTS` points.
    pub fn delete_random_point(&mut self, rng: &mut impl Rng) -> Point {
        assert!(
            self.points.len() > MIN_POLYGON_POINTS,
            "cannot delete a point from a polygon with {} points",
            self.points.len()
        );
        let index = rng.gen_range(0..self.points.len());
        self.points.remove(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn polygon_with(n: usize) -> Polygon {
        let points = (0..n as i32).map(|i| Point::new(i, i * 2)).collect();
        Polygon::new(points, [1, 2, 3, 4])
    }

    #[test]
    fn test_random_polygon_is_valid() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let poly = Polygon::random(64, 48, &mut rng);
            assert!((MIN_POLYGON_POINTS..=MAX_POLYGON_POINTS).contains(&poly.points().len()));
            for p in poly.points() {
                assert!((0..64).contains(&p.x));
                assert!((0..48).contains(&p.y));
            }
        }
    }

    #[test]
    fn test_random_polygon_uses_every_point_count() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut seen = [false; MAX_POLYGON_POINTS + 1];
        for _ in 0..500 {
            seen[Polygon::random(10, 10, &mut rng).points().len()] = true;
        }
        for n in MIN_POLYGON_POINTS..=MAX_POLYGON_POINTS {
            assert!(seen[n], "never generated a polygon with {} points", n);
        }
    }

    #[test]
    #[should_panic(expected = "polygon must have between")]
    fn test_new_rejects_too_few_points() {
        polygon_with(2);
    }

    #[test]
    #[should_panic(expected = "polygon must have between")]
    fn test_new_rejects_too_many_points() {
        polygon_with(MAX_POLYGON_POINTS + 1);
    }

    #[test]
    fn test_deserialize_checks_point_count() {
        let ok = r#"{"points":[{"x":0,"y":0},{"x":5,"y":0},{"x":0,"y":5}],"color":[1,2,3,4]}"#;
        let poly: Polygon = serde_json::from_str(ok).unwrap();
        assert_eq!(poly.points().len(), 3);

        let too_few = r#"{"points":[{"x":0,"y":0},{"x":5,"y":0}],"color":[1,2,3,4]}"#;
        let err = serde_json::from_str::<Polygon>(too_few).unwrap_err();
        assert!(err.to_string().contains("2 points"));
    }

    #[test]
    fn test_add_or_delete_at_minimum_always_adds() {
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..100 {
            let mut poly = polygon_with(MIN_POLYGON_POINTS);
            poly.apply_mutation(MutationKind::AddOrDeletePoint, 50, 50, &mut rng);
            assert_eq!(poly.points().len(), MIN_POLYGON_POINTS + 1);
        }
    }

    #[test]
    fn test_add_or_delete_at_maximum_always_deletes() {
        let mut rng = StdRng::seed_from_u64(14);
        for _ in 0..100 {
            let mut poly = polygon_with(MAX_POLYGON_POINTS);
            poly.apply_mutation(MutationKind::AddOrDeletePoint, 50, 50, &mut rng);
            assert_eq!(poly.points().len(), MAX_POLYGON_POINTS - 1);
        }
    }

    #[test]
    fn test_add_or_delete_in_middle_goes_both_ways() {
        let mut rng = StdRng::seed_from_u64(15);
        let mut added = false;
        let mut deleted = false;
        for _ in 0..100 {
            let mut poly = polygon_with(4);
            poly.apply_mutation(MutationKind::AddOrDeletePoint, 50, 50, &mut rng);
            match poly.points().len() {
                5 => added = true,
                3 => deleted = true,
                n => panic!("unexpected point count {}", n),
            }
        }
        assert!(added && deleted);
    }

    #[test]
    fn test_add_appends_at_end() {
        let mut poly = polygon_with(3);
        poly.add_point(Point::new(99, 98));
        assert_eq!(poly.points().last(), Some(&Point::new(99, 98)));
        assert_eq!(&poly.points()[..3], polygon_with(3).points());
    }

    #[test]
    fn test_delete_preserves_order_of_remaining_points() {
        let mut rng = StdRng::seed_from_u64(16);
        let original = polygon_with(6);

        for _ in 0..50 {
            let mut poly = original.clone();
            let removed = poly.delete_random_point(&mut rng);

            let expected: Vec<Point> = original
                .points()
                .iter()
                .copied()
                .filter(|p| *p != removed)
                .collect();
            assert_eq!(poly.points(), expected.as_slice());
        }
    }

    #[test]
    fn test_point_mutation_keeps_count_and_color() {
        let mut rng = StdRng::seed_from_u64(17);
        let original = polygon_with(5);

        for _ in 0..200 {
            let mut poly = original.clone();
            poly.apply_mutation(MutationKind::Point, 50, 50, &mut rng);

            assert_eq!(poly.color, original.color);
            assert_eq!(poly.points().len(), original.points().len());

            // At most one point differs, and in at most one coordinate
            let diffs: Vec<(&Point, &Point)> = original
                .points()
                .iter()
                .zip(poly.points())
                .filter(|(a, b)| a != b)
                .collect();
            assert!(diffs.len() <= 1);
            if let Some((a, b)) = diffs.first() {
                assert!(a.x == b.x || a.y == b.y);
            }
        }
    }

    #[test]
    fn test_color_mutation_keeps_points() {
        let mut rng = StdRng::seed_from_u64(18);
        let original = polygon_with(4);
        let mut poly = original.clone();
        poly.apply_mutation(MutationKind::Color, 50, 50, &mut rng);
        assert_eq!(poly.points(), original.points());
    }

    #[test]
    fn test_point_count_invariant_survives_many_mutations() {
        let mut rng = StdRng::seed_from_u64(19);
        let mut poly = Polygon::random(30, 30, &mut rng);
        for _ in 0..10_000 {
            poly.mutate(30, 30, &mut rng);
            assert!((MIN_POLYGON_POINTS..=MAX_POLYGON_POINTS).contains(&poly.points().len()));
        }
    }

    #[test]
    fn test_mutation_kinds_are_all_selected() {
        let mut rng = StdRng::seed_from_u64(20);
        let mut poly = Polygon::random(30, 30, &mut rng);
        let mut seen = Vec::new();
        for _ in 0..300 {
            let kind = poly.mutate(30, 30, &mut rng);
            if !seen.contains(&kind) {
                seen.push(kind);
            }
        }
        assert_eq!(seen.len(), MutationKind::ALL.len());
    }
}
