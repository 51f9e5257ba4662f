// Error types for configuration, saved genomes and output files.

use std::path::PathBuf;
use thiserror::Error;

use crate::genes::{MAX_POLYGON_POINTS, MIN_POLYGON_POINTS};

/// Invalid [`EvolutionParams`](crate::EvolutionParams).
#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("population size must be at least 2, got {0}")]
    PopulationTooSmall(usize),

    #[error("each individual needs at least one polygon")]
    NoPolygons,

    #[error("mutation chance must be within [0, 1], got {0}")]
    MutationChance(f64),

    #[error("survival rate must be within (0, 1], got {0}")]
    SurvivalRate(f64),
}

/// A saved genome that doesn't describe a valid candidate.
#[derive(Debug, Error, PartialEq)]
pub enum GenomeError {
    #[error(
        "polygon has {count} points (expected {} to {})",
        MIN_POLYGON_POINTS,
        MAX_POLYGON_POINTS
    )]
    PointCount { count: usize },

    #[error("genome has no polygons")]
    Empty,

    #[error("image dimensions must be non-zero, got {width}x{height}")]
    Dimensions { width: u32, height: u32 },
}

/// Failure writing a candidate to disk.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to write image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode genome: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
