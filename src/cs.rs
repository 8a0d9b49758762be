pub mod approx;
pub mod graph;
pub mod optimization;
pub mod tsp;

// Re-export the solver entry points
pub use tsp::{
    solve_christofides, solve_held_karp, solve_nn_2opt, Comparison, LocalSearchSolution,
    Solution, Solver, SolverConfig,
};
