//! Traveling Salesman solvers for small complete graphs.
//!
//! Three independent pipelines share one immutable [`Graph`]:
//! - **Christofides** (greedy matching variant): MST, odd-degree matching, Fleury
//!   circuit, shortcutting
//! - **Nearest-Neighbor + 2-opt**: multi-start construction followed by local search
//! - **Held-Karp**: exact bitmask dynamic programming, exponential in `n`
//!
//! All tours list each vertex once and leave the return edge implicit.
//!
//! # Examples
//!
//! ```
//! use tsp_algos::cs::graph::Graph;
//! use tsp_algos::cs::tsp::{Solver, SolverConfig};
//!
//! let g = Graph::from_edges(
//!     4,
//!     &[(1, 2, 1.0), (1, 3, 4.0), (1, 4, 3.0), (2, 3, 2.0), (2, 4, 5.0), (3, 4, 6.0)],
//! )
//! .unwrap();
//!
//! let solver = Solver::new(SolverConfig::default());
//! let exact = solver.solve_held_karp(&g).unwrap();
//! let approx = solver.solve_christofides(&g).unwrap();
//! assert_eq!(exact.cost, 12.0);
//! assert!(approx.cost >= exact.cost);
//! ```

pub mod compare;
pub mod generate;

use log::{debug, warn};

use crate::cs::approx::christofides;
use crate::cs::optimization::{nearest_neighbor_multistart, two_opt_improve, DEFAULT_EPSILON};
use crate::error::{GraphError, Result};
use crate::graph::held_karp::held_karp;
use crate::graph::Graph;

pub use compare::Comparison;

/// Default node limit for the exact solver.
pub const DEFAULT_HELD_KARP_LIMIT: usize = 20;

/// Default number of nearest-neighbor start vertices.
pub const DEFAULT_NN_STARTS: usize = 10;

/// A Hamiltonian cycle and its cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Every vertex exactly once; the return to `tour[0]` is implicit.
    pub tour: Vec<usize>,
    pub cost: f64,
}

/// Result of the nearest-neighbor + 2-opt pipeline, with both stages reported.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalSearchSolution {
    /// Best nearest-neighbor tour before improvement.
    pub initial: Solution,
    /// The same tour after 2-opt.
    pub improved: Solution,
}

/// Configuration for [`Solver`].
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Largest `n` the exact solver will be run on.
    pub held_karp_limit: usize,
    /// Number of nearest-neighbor start vertices (`1..=nn_starts`); `None` means all.
    pub nn_starts: Option<usize>,
    /// Explicit nearest-neighbor start vertices; overrides `nn_starts` when set.
    pub start_vertices: Option<Vec<usize>>,
    /// Minimum gain for a 2-opt move to count as an improvement.
    pub two_opt_epsilon: f64,
    /// Decimal places kept in the Christofides cost.
    pub cost_precision: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            held_karp_limit: DEFAULT_HELD_KARP_LIMIT,
            nn_starts: Some(DEFAULT_NN_STARTS),
            start_vertices: None,
            two_opt_epsilon: DEFAULT_EPSILON,
            cost_precision: christofides::COST_PRECISION,
        }
    }
}

/// Runs the TSP pipelines under a [`SolverConfig`].
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Christofides with greedy matching; cost rounded to `cost_precision` decimals.
    pub fn solve_christofides(&self, graph: &Graph) -> Result<Solution> {
        christofides::solve_with_precision(graph, self.config.cost_precision)
    }

    /// Nearest-neighbor from the configured start vertices, then 2-opt.
    pub fn solve_nn_2opt(&self, graph: &Graph) -> Result<LocalSearchSolution> {
        let starts = self.start_vertices(graph);
        local_search(graph, &starts, self.config.two_opt_epsilon)
    }

    /// Held-Karp, refused with `SizeLimitExceeded` above the configured limit.
    pub fn solve_held_karp(&self, graph: &Graph) -> Result<Solution> {
        let limit = self.config.held_karp_limit;
        if graph.num_nodes() > limit {
            warn!(
                "held-karp refused: {} vertices over limit {limit}",
                graph.num_nodes()
            );
            return Err(GraphError::SizeLimitExceeded {
                nodes: graph.num_nodes(),
                limit,
            });
        }
        solve_held_karp(graph)
    }

    /// Whether [`Solver::solve_held_karp`] accepts `graph`.
    pub fn held_karp_allowed(&self, graph: &Graph) -> bool {
        graph.num_nodes() <= self.config.held_karp_limit
    }

    /// The explicit start list, else the first `nn_starts` vertices, else all of them.
    fn start_vertices(&self, graph: &Graph) -> Vec<usize> {
        if let Some(starts) = &self.config.start_vertices {
            return starts.clone();
        }
        let n = graph.num_nodes();
        let count = self.config.nn_starts.map_or(n, |s| s.clamp(1, n));
        (1..=count).collect()
    }
}

/// Christofides pipeline on `graph`.
pub fn solve_christofides(graph: &Graph) -> Result<Solution> {
    christofides::solve(graph)
}

/// Nearest-neighbor from each of `start_vertices` (all vertices if empty), keeping
/// the cheapest, then 2-opt with the default epsilon.
pub fn solve_nn_2opt(graph: &Graph, start_vertices: &[usize]) -> Result<LocalSearchSolution> {
    local_search(graph, start_vertices, DEFAULT_EPSILON)
}

/// Exact Held-Karp solution. Imposes no practical size limit; see
/// [`Solver::solve_held_karp`] for the guarded entry point.
pub fn solve_held_karp(graph: &Graph) -> Result<Solution> {
    let (cost, tour) = held_karp(graph)?;
    debug!("held-karp: optimal cost {cost}");
    Ok(Solution { tour, cost })
}

fn local_search(graph: &Graph, starts: &[usize], epsilon: f64) -> Result<LocalSearchSolution> {
    let (nn_tour, nn_cost) = nearest_neighbor_multistart(graph, starts)?;
    let (tour, cost) = two_opt_improve(graph, &nn_tour, epsilon)?;
    debug!("nn+2-opt: {nn_cost} -> {cost}");
    Ok(LocalSearchSolution {
        initial: Solution {
            tour: nn_tour,
            cost: nn_cost,
        },
        improved: Solution { tour, cost },
    })
}

/// Rounds `value` to `places` decimal places.
///
/// Returns `value` unchanged when `10^places` is not representable, or when scaling
/// would overflow.
pub fn round_to(value: f64, places: u32) -> f64 {
    let Ok(exp) = i32::try_from(places) else {
        return value;
    };
    let scale = 10f64.powi(exp);
    let scaled = value * scale;
    if !scale.is_finite() || !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}
