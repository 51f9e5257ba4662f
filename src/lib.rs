// Library root for the polygon evolution engine
//
// An image is approximated by a fixed number of semi-transparent polygons.
// Candidates (lists of polygons) are bred and mutated; an external score
// decides which ones survive.
//
// - genes: Point, Polygon, colors and the mutation operators
// - painting: rasterizes a polygon list into an RGBA buffer
// - candidate: one individual, with crossover (mating) and its cached image
// - evolution: parameters, crossover, and the generational step
// - population: ranking by fitness and the population container
// - fitness: the reference scorer used by the CLI

pub mod candidate;
pub mod error;
pub mod evolution;
pub mod fitness;
pub mod genes;
pub mod painting;
pub mod population;

// Re-export commonly used types at the library root for convenience
// This allows users to write:
//   use polygen::Candidate;
// instead of:
//   use polygen::candidate::Candidate;
pub use candidate::{Candidate, Genome};
pub use error::{GenomeError, ParamsError, SaveError};
pub use evolution::{
    crossover, EvolutionParams, MUTATION_CHANCE, POLYGONS_PER_INDIVIDUAL, POPULATION_COUNT,
};
pub use genes::{MutationKind, Point, Polygon, MAX_POLYGON_POINTS, MIN_POLYGON_POINTS};
pub use painting::render;
pub use population::{compare_fitness, rank, Population};
