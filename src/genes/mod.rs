// This file declares the genes module and its submodules
//
// The genetic representation is three layers deep:
// - Point: one vertex
// - Polygon: an outline of 3-6 points plus a color (one gene)
// - the Candidate (in candidate.rs) owns a fixed-length list of polygons

mod color;
mod point;
mod polygon;

pub use color::{mutate_color, random_color, with_channel, Channel, Color};
pub use point::{Axis, Point};
pub use polygon::{MutationKind, Polygon};

/// Fewest points a polygon may have (a triangle)
pub const MIN_POLYGON_POINTS: usize = 3;

/// Most points a polygon may have
pub const MAX_POLYGON_POINTS: usize = 6;
