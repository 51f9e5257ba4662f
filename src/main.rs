// Import the clap Parser derive macro for CLI argument parsing
use clap::Parser;

// Import our library types
use polygen::{EvolutionParams, Population};

// Import indicatif for progress bars
use indicatif::{ProgressBar, ProgressStyle};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

// Import standard library modules
use std::fs;
use std::path::Path;

/// Polygon Evolver - approximate an image with semi-transparent polygons
///
/// A small population of candidate images, each made of a fixed number of
/// polygons, is bred and mutated generation after generation. The candidates
/// closest to the target survive.
#[derive(Parser)]
#[command(name = "polygen")]
#[command(about = "Evolve polygons to approximate an image", long_about = None)]
#[command(version)]
struct Args {
    /// Path to target image (PNG, JPEG, etc.)
    #[arg(short, long)]
    input: String,

    /// Output directory for generated images
    #[arg(short, long, default_value = "./output")]
    output: String,

    /// Number of generations to evolve
    #[arg(short, long, default_value_t = 10_000)]
    generations: usize,

    /// Population size (candidates alive at once)
    #[arg(short, long, default_value_t = polygen::POPULATION_COUNT)]
    population: usize,

    /// Number of polygons per candidate
    #[arg(short = 'n', long, default_value_t = polygen::POLYGONS_PER_INDIVIDUAL)]
    polygons: usize,

    /// Per-polygon chance of a mutation in each child (0.0-1.0)
    #[arg(long, default_value_t = polygen::MUTATION_CHANCE)]
    mutation_chance: f64,

    /// Fraction of the population that survives each generation (0.0-1.0)
    #[arg(long, default_value_t = 0.2)]
    survival_rate: f64,

    /// Save the best image every N generations
    #[arg(long, default_value_t = 100)]
    save_interval: usize,

    /// Seed for the random generator (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of threads for parallel processing (all cores by default)
    #[arg(short = 't', long)]
    threads: Option<usize>,
}

/// Main entry point for the CLI application
fn main() {
    // Log level comes from RUST_LOG, defaulting to info
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Run the genetic algorithm with given arguments
fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let params = EvolutionParams {
        population_size: args.population,
        polygons_per_individual: args.polygons,
        mutation_chance: args.mutation_chance,
        survival_rate: args.survival_rate,
    };
    params.validate()?;

    if args.save_interval == 0 {
        return Err("save interval must be at least 1".into());
    }

    if let Some(num_threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        tracing::info!(threads = num_threads, "configured thread pool");
    }

    fs::create_dir_all(&args.output)?;

    if !Path::new(&args.input).exists() {
        return Err(format!("Input file not found: {}", args.input).into());
    }
    let target = image::open(&args.input)?.to_rgba8();
    let (width, height) = target.dimensions();
    if width == 0 || height == 0 {
        return Err(format!("Input image is empty: {}", args.input).into());
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    tracing::info!(
        input = %args.input,
        width,
        height,
        population = params.population_size,
        polygons = params.polygons_per_individual,
        mutation_chance = params.mutation_chance,
        seed = ?args.seed,
        "starting evolution"
    );

    let mut pop = Population::new(
        params.population_size,
        params.polygons_per_individual,
        target,
        &mut rng,
    );

    let pb = ProgressBar::new(args.generations as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} (ETA: {eta}) | {msg}")?
            .progress_chars("=>-"),
    );

    for gen in 0..args.generations {
        pop.evolve_generation(&params, &mut rng);

        // Offspring were just created and need fitness scores
        pop.evaluate();

        let best = pop.best().scored_fitness();
        pb.set_message(format!("Best: {}, Avg: {:.0}", best, pop.average_fitness()));
        pb.inc(1);

        if gen % args.save_interval == 0 || gen + 1 == args.generations {
            save_generation(&pop, &args.output, gen)?;
        }
    }

    pb.finish_with_message("Evolution complete!");

    // With zero generations the initial population was never scored
    pop.evaluate();
    let best = pop.best();
    let genome_path = Path::new(&args.output).join("genome.json");
    best.save_genome(&genome_path)?;

    tracing::info!(
        best = %best,
        generations = pop.generation,
        output = %args.output,
        "finished"
    );

    Ok(())
}

/// Save the best candidate of a generation as `generation_NNNNN.png` and `latest.png`
fn save_generation(
    pop: &Population,
    output_dir: &str,
    generation: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let best = pop.best();
    let dir = Path::new(output_dir);

    best.save(dir.join(format!("generation_{:05}.png", generation)))?;
    best.save(dir.join("latest.png"))?;

    tracing::debug!(generation, %best, "saved best candidate");
    Ok(())
}
