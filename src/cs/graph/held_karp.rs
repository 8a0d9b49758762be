//! Held-Karp implementation for the Traveling Salesman Problem (TSP) using Dynamic Programming.
//! Assumes a complete, symmetric graph and returns the minimal cost and one optimal
//! tour starting at vertex 1.
//!
//! The table is a flat arena indexed by `(subset, endpoint)` where the subset ranges
//! over the `n - 1` vertices other than the start, so it holds `2^(n-1) * (n-1)`
//! costs plus one `u8` predecessor per entry. This is only feasible for small `n`;
//! callers are expected to bound `n` before invoking it (see
//! [`Solver::solve_held_karp`](crate::cs::tsp::Solver::solve_held_karp)).
//!
//! # Example
//! ```
//! use tsp_algos::cs::graph::held_karp::held_karp;
//! use tsp_algos::cs::graph::Graph;
//!
//! let g = Graph::from_rows(&[
//!     vec![0.0, 10.0, 15.0, 20.0],
//!     vec![10.0, 0.0, 35.0, 25.0],
//!     vec![15.0, 35.0, 0.0, 30.0],
//!     vec![20.0, 25.0, 30.0, 0.0],
//! ])
//! .unwrap();
//!
//! let (cost, tour) = held_karp(&g).unwrap();
//! // 1 -> 2 -> 4 -> 3 -> 1 or its reverse.
//! assert_eq!(cost, 80.0);
//! assert_eq!(tour.len(), 4);
//! assert_eq!(tour[0], 1);
//! ```
use log::debug;

use crate::error::{GraphError, Result};
use crate::graph::Graph;

/// Hard ceiling imposed by the representation: subsets are `usize` bitmasks and
/// predecessors are stored as `u8`.
pub const MAX_NODES: usize = 32;

/// Marks "no predecessor" in the parent arena.
const NO_PARENT: u8 = u8::MAX;

/// Held-Karp TSP solver.
/// Returns `(minimum_cost, tour)` with the tour starting at vertex 1 and the return
/// edge implicit.
///
/// # Errors
/// * graph validation errors
/// * `SizeLimitExceeded` if `n > MAX_NODES`
pub fn held_karp(graph: &Graph) -> Result<(f64, Vec<usize>)> {
    graph.validate()?;
    let n = graph.num_nodes();
    if n > MAX_NODES {
        return Err(GraphError::SizeLimitExceeded {
            nodes: n,
            limit: MAX_NODES,
        });
    }
    if n == 1 {
        return Ok((0.0, vec![1]));
    }

    // Internal index i (0-based, excluding the start) is vertex i + 2; bit i marks it.
    let m = n - 1;
    let vertex = |i: usize| i + 2;
    let start = 1;
    let subsets = 1usize << m;

    debug!("held-karp: {n} vertices, {} dp entries", subsets * m);

    // dp[mask * m + j] = minimal cost of a path from start through `mask` ending at j.
    let mut dp = arena(subsets * m, f64::INFINITY)?;
    // parent[mask * m + j] = predecessor of j on that path.
    let mut parent = arena(subsets * m, NO_PARENT)?;

    // Base case: direct edges from the start
    for j in 0..m {
        dp[(1 << j) * m + j] = graph.weight(start, vertex(j));
    }

    // Every proper subset of `mask` is numerically smaller, so it is already final.
    for mask in 1..subsets {
        if mask.count_ones() < 2 {
            continue;
        }
        for j in 0..m {
            if mask & (1 << j) == 0 {
                continue;
            }
            let prev_mask = mask ^ (1 << j);
            let mut best = f64::INFINITY;
            let mut best_k = NO_PARENT;
            for k in 0..m {
                if prev_mask & (1 << k) == 0 {
                    continue;
                }
                let cost = dp[prev_mask * m + k] + graph.weight(vertex(k), vertex(j));
                if cost < best {
                    best = cost;
                    best_k = k as u8;
                }
            }
            dp[mask * m + j] = best;
            parent[mask * m + j] = best_k;
        }
    }

    // Close the tour back to the start
    let full = subsets - 1;
    let mut best_cost = f64::INFINITY;
    let mut last = 0;
    for j in 0..m {
        let cost = dp[full * m + j] + graph.weight(vertex(j), start);
        if cost < best_cost {
            best_cost = cost;
            last = j;
        }
    }

    // Reconstruct the path in reverse, then fix its order
    let mut tour = Vec::with_capacity(n);
    let mut mask = full;
    let mut curr = last as u8;
    while curr != NO_PARENT {
        let j = curr as usize;
        tour.push(vertex(j));
        let prev = parent[mask * m + j];
        mask ^= 1 << j;
        curr = prev;
    }
    tour.push(start);
    tour.reverse();

    if tour.len() != n {
        return Err(GraphError::invalid_tour(format!(
            "reconstructed {} of {n} vertices",
            tour.len()
        )));
    }

    Ok((best_cost, tour))
}

/// Allocates a table of `len` entries, reporting allocation failure as an error.
fn arena<T: Clone>(len: usize, fill: T) -> Result<Vec<T>> {
    let mut table = Vec::new();
    table
        .try_reserve_exact(len)
        .map_err(|_| GraphError::ArenaAllocation { entries: len })?;
    table.resize(len, fill);
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Exhaustive optimum over all tours starting at vertex 1.
    fn brute_force(graph: &Graph) -> f64 {
        fn permute(graph: &Graph, tour: &mut Vec<usize>, rest: &mut Vec<usize>, best: &mut f64) {
            if rest.is_empty() {
                *best = best.min(graph.cycle_cost(tour));
                return;
            }
            for i in 0..rest.len() {
                let v = rest.remove(i);
                tour.push(v);
                permute(graph, tour, rest, best);
                tour.pop();
                rest.insert(i, v);
            }
        }
        let mut best = f64::INFINITY;
        let mut rest: Vec<usize> = (2..=graph.num_nodes()).collect();
        permute(graph, &mut vec![1], &mut rest, &mut best);
        best
    }

    fn four_node() -> Graph {
        Graph::from_edges(
            4,
            &[
                (1, 2, 1.0),
                (1, 3, 4.0),
                (1, 4, 3.0),
                (2, 3, 2.0),
                (2, 4, 5.0),
                (3, 4, 6.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_four_node_example() {
        let g = four_node();
        let (cost, tour) = held_karp(&g).unwrap();
        // 1-2-3-4-1 = 1 + 2 + 6 + 3; the other two tours cost 14 and 16.
        assert_eq!(cost, 12.0);
        assert_eq!(tour[0], 1);
        assert!(tour == vec![1, 2, 3, 4] || tour == vec![1, 4, 3, 2]);
        assert_eq!(g.cycle_cost(&tour), cost);
    }

    #[test]
    fn test_single_node() {
        let g = Graph::new(1).unwrap();
        assert_eq!(held_karp(&g).unwrap(), (0.0, vec![1]));
    }

    #[test]
    fn test_two_nodes() {
        let g = Graph::from_edges(2, &[(1, 2, 7.0)]).unwrap();
        assert_eq!(held_karp(&g).unwrap(), (14.0, vec![1, 2]));
    }

    #[test]
    fn test_three_nodes() {
        let g = Graph::from_rows(&[
            vec![0.0, 10.0, 15.0],
            vec![10.0, 0.0, 20.0],
            vec![15.0, 20.0, 0.0],
        ])
        .unwrap();
        let (cost, tour) = held_karp(&g).unwrap();
        assert_eq!(cost, 45.0);
        assert_eq!(tour.len(), 3);
    }

    #[test]
    fn test_matches_brute_force() {
        let rows = vec![
            vec![0.0, 3.0, 7.0, 2.0, 9.0, 4.0, 5.0],
            vec![3.0, 0.0, 1.0, 8.0, 6.0, 5.0, 2.0],
            vec![7.0, 1.0, 0.0, 4.0, 2.0, 9.0, 3.0],
            vec![2.0, 8.0, 4.0, 0.0, 3.0, 7.0, 6.0],
            vec![9.0, 6.0, 2.0, 3.0, 0.0, 1.0, 8.0],
            vec![4.0, 5.0, 9.0, 7.0, 1.0, 0.0, 2.0],
            vec![5.0, 2.0, 3.0, 6.0, 8.0, 2.0, 0.0],
        ];
        let g = Graph::from_rows(&rows).unwrap();
        let (cost, tour) = held_karp(&g).unwrap();
        assert_relative_eq!(cost, brute_force(&g), epsilon = 1e-9);
        assert_relative_eq!(g.cycle_cost(&tour), cost, epsilon = 1e-9);
        assert!(g.check_tour(&tour).is_ok());
    }

    #[test]
    fn test_too_many_nodes_rejected() {
        let mut g = Graph::new(MAX_NODES + 1).unwrap();
        for u in g.vertices() {
            for v in (u + 1)..=g.num_nodes() {
                g.set_weight(u, v, 1.0).unwrap();
            }
        }
        assert_eq!(
            held_karp(&g),
            Err(GraphError::SizeLimitExceeded {
                nodes: MAX_NODES + 1,
                limit: MAX_NODES
            })
        );
    }

    #[test]
    fn test_incomplete_graph_rejected() {
        let g = Graph::from_edges(3, &[(1, 2, 1.0)]).unwrap();
        assert!(matches!(held_karp(&g), Err(GraphError::MissingEdge { .. })));
    }
}
