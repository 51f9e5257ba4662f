// Import our Candidate type and fitness function
use crate::candidate::Candidate;
use crate::fitness::image_diff_parallel;

// Image type for storing the target
use image::RgbaImage;

// Rayon for parallel fitness evaluation
use rayon::prelude::*;
use rand::Rng;

use std::cmp::Ordering;

/// Population ranking: compare two scored candidates by fitness, ascending
///
/// Lower fitness sorts first. Ties compare `Equal`, so their relative order is
/// whatever the sort leaves them in. Nothing is modified.
///
/// # Panics
/// Panics if either candidate hasn't been scored.
pub fn compare_fitness(a: &Candidate, b: &Candidate) -> Ordering {
    a.scored_fitness().cmp(&b.scored_fitness())
}

/// Sort candidates best (lowest fitness) first
///
/// # Panics
/// Panics if any candidate hasn't been scored.
pub fn rank(candidates: &mut [Candidate]) {
    candidates.sort_by(compare_fitness);
}

/// Population of candidates evolving toward a target image
///
/// **Rust Concept: Struct with owned data**
/// - `individuals: Vec<Candidate>` - owns all candidates (and their images)
/// - `target_image: RgbaImage` - owns the target image
/// - Dropping the population frees everything; there's no teardown step
pub struct Population {
    /// All candidates in the current generation
    pub individuals: Vec<Candidate>,

    /// Current generation number (starts at 0)
    pub generation: usize,

    /// The image we're trying to recreate
    target_image: RgbaImage,
}

impl Population {
    /// Create `size` random candidates sized to the target image
    ///
    /// # Arguments
    /// * `size` - Number of candidates
    /// * `num_polygons` - Polygons per candidate
    /// * `target_image` - The image to approximate (the population takes ownership)
    /// * `rng` - Random source for the initial polygons
    pub fn new(size: usize, num_polygons: usize, target_image: RgbaImage, rng: &mut impl Rng) -> Self {
        let (width, height) = target_image.dimensions();

        let individuals = (0..size)
            .map(|_| Candidate::random(width, height, num_polygons, rng))
            .collect();

        Self {
            individuals,
            generation: 0,
            target_image,
        }
    }

    /// Score every candidate that doesn't have a fitness yet, in parallel
    ///
    /// **Why is this safe?**
    /// `.par_iter_mut()` hands each thread exclusive `&mut` access to different
    /// candidates, and the target is only read. The borrow checker proves there's
    /// no shared mutable state, so no locks are needed.
    pub fn evaluate(&mut self) {
        let target = &self.target_image;
        self.individuals
            .par_iter_mut()
            .filter(|candidate| candidate.fitness.is_none())
            .for_each(|candidate| {
                candidate.fitness = Some(image_diff_parallel(candidate.image(), target));
            });
    }

    /// Sort the population best first
    pub fn rank(&mut self) {
        rank(&mut self.individuals);
    }

    /// The best (lowest fitness) candidate
    ///
    /// # Panics
    /// Panics if the population is empty or contains unscored candidates.
    pub fn best(&self) -> &Candidate {
        self.individuals
            .iter()
            .min_by(|a, b| compare_fitness(a, b))
            .expect("population is empty")
    }

    /// Mean fitness over the population
    ///
    /// # Panics
    /// Panics if any candidate hasn't been scored.
    pub fn average_fitness(&self) -> f64 {
        let sum: f64 = self
            .individuals
            .iter()
            .map(|c| c.scored_fitness() as f64)
            .sum();

        sum / self.individuals.len() as f64
    }

    pub fn target_dimensions(&self) -> (u32, u32) {
        self.target_image.dimensions()
    }

    pub fn target_image(&self) -> &RgbaImage {
        &self.target_image
    }
}
