// Import types we need
use crate::candidate::Candidate;
use crate::error::ParamsError;
use crate::genes::Polygon;
use crate::population::{rank, Population};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Chance that each polygon of a freshly bred child gets one mutation
pub const MUTATION_CHANCE: f64 = 0.15;

/// Number of candidates alive at once
pub const POPULATION_COUNT: usize = 10;

/// Number of polygons every candidate carries
pub const POLYGONS_PER_INDIVIDUAL: usize = 100;

/// Parameters controlling the evolution process
///
/// These are the "knobs" you can turn to control how evolution works.
/// `Default` gives the classic settings: 10 candidates of 100 polygons, 15%
/// per-polygon mutation chance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvolutionParams {
    /// Size of the population (how many candidates)
    pub population_size: usize,

    /// Number of polygons per candidate (fixed for a candidate's lifetime)
    pub polygons_per_individual: usize,

    /// Per-polygon probability of a mutation after crossover (0.0-1.0)
    pub mutation_chance: f64,

    /// Fraction of population that survives each generation (0.0-1.0]
    /// At least 2 always survive so there are two parents to breed from.
    pub survival_rate: f64,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            population_size: POPULATION_COUNT,
            polygons_per_individual: POLYGONS_PER_INDIVIDUAL,
            mutation_chance: MUTATION_CHANCE,
            survival_rate: 0.2, // Top 2 of 10
        }
    }
}

impl EvolutionParams {
    /// Check every knob is in range
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.population_size < 2 {
            return Err(ParamsError::PopulationTooSmall(self.population_size));
        }
        if self.polygons_per_individual == 0 {
            return Err(ParamsError::NoPolygons);
        }
        if !(0.0..=1.0).contains(&self.mutation_chance) {
            return Err(ParamsError::MutationChance(self.mutation_chance));
        }
        if !(self.survival_rate > 0.0 && self.survival_rate <= 1.0) {
            return Err(ParamsError::SurvivalRate(self.survival_rate));
        }
        Ok(())
    }

    /// How many of the ranked population survive into the next generation
    pub fn survivors(&self) -> usize {
        let survivors = (self.population_size as f64 * self.survival_rate) as usize;
        survivors.clamp(2, self.population_size.max(2))
    }
}

/// Single-point crossover of two polygon lists
///
/// Draws a cut index `c` uniformly from `0..len`. The child takes positions
/// `0..=c` from `parent_a` and `c+1..len` from `parent_b`, so it always
/// inherits at least one polygon from A. Every polygon is cloned: the child
/// owns its genes outright and shares nothing with either parent.
///
/// Returns the child's polygons and the cut index.
///
/// # Panics
/// Panics if the parents have different lengths or are empty.
pub fn crossover(
    parent_a: &[Polygon],
    parent_b: &[Polygon],
    rng: &mut impl Rng,
) -> (Vec<Polygon>, usize) {
    let n = parent_a.len();
    assert_eq!(n, parent_b.len(), "parents must have the same number of polygons");
    assert!(n > 0, "parents must have at least one polygon");

    let cut = rng.gen_range(0..n);

    // **Rust Concept: Borrowing vs Ownership**
    // The parents are borrowed slices; `.clone()` makes a deep, independently
    // owned copy of each polygon (points included) for the child
    let child = parent_a[..=cut]
        .iter()
        .chain(&parent_b[cut + 1..])
        .cloned()
        .collect();

    (child, cut)
}

/// Bernoulli trial: true with probability `chance`
pub fn should_mutate(chance: f64, rng: &mut impl Rng) -> bool {
    rng.gen::<f64>() < chance
}

// Additional methods for Population related to evolution
//
// **Rust Concept: Multiple impl blocks**
// `Population` is declared in population.rs; this block adds the breeding step.
impl Population {
    /// Evolve the population for one generation
    ///
    /// 1. Score every unscored candidate
    /// 2. Rank by fitness (best first)
    /// 3. Keep the top `params.survivors()`
    /// 4. Refill by mating the best survivor with a random survivor
    ///
    /// Children are bred in parallel. Each gets its own `StdRng` seeded from
    /// `rng`, so a seeded run gives the same population however rayon
    /// schedules the work.
    pub fn evolve_generation(&mut self, params: &EvolutionParams, rng: &mut impl Rng) {
        self.evaluate();
        rank(&mut self.individuals);

        self.individuals.truncate(params.survivors());

        let needed = params.population_size.saturating_sub(self.individuals.len());
        let seeds: Vec<u64> = (0..needed).map(|_| rng.gen()).collect();

        let survivors = &self.individuals;
        let children: Vec<Candidate> = seeds
            .into_par_iter()
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                let mom = &survivors[0];
                let dad = &survivors[rng.gen_range(0..survivors.len())];
                mom.mate(dad, params.mutation_chance, &mut rng)
            })
            .collect();

        self.individuals.extend(children);
        self.generation += 1;

        tracing::debug!(
            generation = self.generation,
            best = ?self.individuals[0].fitness,
            "generation bred"
        );
    }
}
