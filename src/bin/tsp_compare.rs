use clap::{Parser, ValueEnum};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::env;

use tsp_algos::cs::tsp::generate::{
    choose_starts, random_euclidean, random_integer_weights, random_travel_time,
};
use tsp_algos::cs::tsp::{Solver, SolverConfig, DEFAULT_HELD_KARP_LIMIT};
use tsp_algos::graph::Graph;
use tsp_algos::Result;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    /// Integer weights in 1..=10
    Integer,
    /// Rounded Euclidean distances between grid points
    Euclidean,
    /// Distance-based travel time with traffic and light penalties
    TravelTime,
}

/// Compare Christofides, nearest-neighbor + 2-opt and Held-Karp on a random graph.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Opt {
    /// Number of vertices
    #[arg(short, long, default_value_t = 10)]
    nodes: usize,

    /// Seed for graph generation and start sampling
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Random nearest-neighbor starts to try; 0 tries every vertex
    #[arg(long)]
    starts: Option<usize>,

    /// Edge weight model
    #[arg(long, value_enum, default_value_t = Kind::TravelTime)]
    kind: Kind,

    /// Largest graph Held-Karp will be run on
    #[arg(long, default_value_t = DEFAULT_HELD_KARP_LIMIT)]
    held_karp_limit: usize,

    /// Never run Held-Karp
    #[arg(long)]
    skip_held_karp: bool,

    /// Print the weight matrix before the results
    #[arg(long)]
    show_matrix: bool,
}

fn generate(opt: &Opt, rng: &mut ChaCha8Rng) -> Result<Graph> {
    match opt.kind {
        Kind::Integer => random_integer_weights(opt.nodes, rng),
        Kind::Euclidean => random_euclidean(opt.nodes, rng),
        Kind::TravelTime => random_travel_time(opt.nodes, rng),
    }
}

fn main() -> Result<()> {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "tsp_compare=info,tsp_algos=warn")
    }
    env_logger::init();
    let opt = Opt::parse();

    let mut rng = ChaCha8Rng::seed_from_u64(opt.seed);
    let graph = generate(&opt, &mut rng)?;
    info!("generated {:?} graph with {} vertices", opt.kind, opt.nodes);

    if opt.show_matrix {
        println!("Adjacency Matrix:");
        println!("{graph}");
    }

    let held_karp_limit = if opt.skip_held_karp {
        0
    } else {
        opt.held_karp_limit
    };
    if opt.nodes > held_karp_limit && !opt.skip_held_karp {
        println!(
            "Held-Karp is limited to {held_karp_limit} vertices; skipping it for {}.\n",
            opt.nodes
        );
    }

    let start_vertices = opt.starts.map(|count| choose_starts(opt.nodes, count, &mut rng));
    if let Some(starts) = &start_vertices {
        info!("nearest neighbor starts: {starts:?}");
    }

    let solver = Solver::new(SolverConfig {
        held_karp_limit,
        start_vertices,
        ..SolverConfig::default()
    });
    let report = solver.compare(&graph)?;
    print!("{report}");
    Ok(())
}
