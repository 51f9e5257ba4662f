// Genes and the renderer that turns them into pixels
use crate::error::{GenomeError, SaveError};
use crate::evolution::{crossover, should_mutate};
use crate::genes::{MutationKind, Polygon};
use crate::painting::render;

// Image type for the cached rendering
use image::RgbaImage;
use rand::Rng;
use serde::{Deserialize, Serialize};

use std::fmt;
use std::fs;
use std::path::Path;

/// One individual in the population: a fixed-length list of polygons
///
/// The rendered image is cached and always matches `polygons`: every method
/// that changes a polygon re-renders before returning, and the polygon list is
/// private so it can't be changed any other way.
///
/// **Rust Concept: Option<T> for "not yet known"**
/// `fitness` starts as `None`. The scorer fills it in once it has compared
/// `image()` against the target; nothing in here ever computes it.
#[derive(Clone)]
pub struct Candidate {
    width: u32,
    height: u32,
    polygons: Vec<Polygon>,

    /// Score assigned by the fitness function (lower is better), `None` until scored
    pub fitness: Option<i64>,

    image: RgbaImage,
}

/// The serializable part of a candidate: everything needed to rebuild it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    pub width: u32,
    pub height: u32,
    pub polygons: Vec<Polygon>,
}

impl Candidate {
    /// A candidate made of `num_polygons` random polygons, rendered immediately
    pub fn random(width: u32, height: u32, num_polygons: usize, rng: &mut impl Rng) -> Self {
        let polygons = (0..num_polygons)
            .map(|_| Polygon::random(width, height, rng))
            .collect();

        Self::from_polygons(width, height, polygons)
    }

    /// Wrap an existing polygon list (rendered immediately, fitness unset)
    pub fn from_polygons(width: u32, height: u32, polygons: Vec<Polygon>) -> Self {
        let image = render(width, height, &polygons);
        Self {
            width,
            height,
            polygons,
            fitness: None,
            image,
        }
    }

    /// Rebuild a candidate from a saved genome
    pub fn from_genome(genome: Genome) -> Result<Self, GenomeError> {
        if genome.width == 0 || genome.height == 0 {
            return Err(GenomeError::Dimensions {
                width: genome.width,
                height: genome.height,
            });
        }
        if genome.polygons.is_empty() {
            return Err(GenomeError::Empty);
        }
        Ok(Self::from_polygons(genome.width, genome.height, genome.polygons))
    }

    /// Copy out the serializable genome
    pub fn genome(&self) -> Genome {
        Genome {
            width: self.width,
            height: self.height,
            polygons: self.polygons.clone(),
        }
    }

    /// Breed this candidate (parent A) with `other` (parent B)
    ///
    /// Single-point crossover: a cut index `c` is drawn uniformly, positions
    /// `0..=c` are copied from `self` and the rest from `other`. Each copied
    /// polygon is then independently mutated with probability `mutation_chance`.
    /// Both parents are only borrowed, so they come out exactly as they went in.
    ///
    /// # Panics
    /// Panics if the parents differ in dimensions or polygon count, or have no polygons.
    pub fn mate(&self, other: &Candidate, mutation_chance: f64, rng: &mut impl Rng) -> Candidate {
        assert_eq!(
            self.dimensions(),
            other.dimensions(),
            "parents must have the same dimensions"
        );

        let (mut polygons, cut) = crossover(&self.polygons, &other.polygons, rng);

        let mut mutations = 0;
        for polygon in &mut polygons {
            if should_mutate(mutation_chance, rng) {
                polygon.mutate(self.width, self.height, rng);
                mutations += 1;
            }
        }
        tracing::trace!(cut, mutations, "mated candidates");

        Self::from_polygons(self.width, self.height, polygons)
    }

    /// Mutate one polygon in place and re-render
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn mutate_polygon(&mut self, index: usize, rng: &mut impl Rng) -> MutationKind {
        let kind = self.polygons[index].mutate(self.width, self.height, rng);
        self.image = render(self.width, self.height, &self.polygons);
        kind
    }

    /// The polygons, in drawing order
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// The cached rendering of `polygons()`
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Render from scratch (ignores the cache)
    pub fn render(&self) -> RgbaImage {
        render(self.width, self.height, &self.polygons)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Fitness of a scored candidate
    ///
    /// # Panics
    /// Panics if the candidate hasn't been scored yet. Ranking unscored
    /// candidates is a bug in the caller, not a recoverable condition.
    pub fn scored_fitness(&self) -> i64 {
        match self.fitness {
            Some(fitness) => fitness,
            None => panic!("candidate has not been scored"),
        }
    }

    /// Render and write the image to `path` (format picked from the extension, e.g. PNG)
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        let path = path.as_ref();
        self.render().save(path).map_err(|source| SaveError::Image {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the genome as pretty-printed JSON
    pub fn save_genome(&self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&self.genome())?;
        fs::write(path, json).map_err(|source| SaveError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fitness {
            Some(fitness) => write!(f, "fitness: {}", fitness),
            None => write!(f, "fitness: unscored"),
        }
    }
}

impl fmt::Debug for Candidate {
    // The pixel buffer is derived state and far too large to print
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("polygons", &self.polygons.len())
            .field("fitness", &self.fitness)
            .finish()
    }
}
