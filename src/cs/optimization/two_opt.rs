//! 2-opt improvement for a closed tour.
//!
//! # Algorithm
//!
//! For positions `1 <= i < k - 1`, `k <= n`, consider the edges `(a, b) = (t[i-1], t[i])`
//! and `(c, d) = (t[k-1], t[k mod n])` of the cycle. Reversing `t[i..k]` replaces them
//! with `(a, c)` and `(b, d)`:
//!
//! ```text
//! gain = d(a, b) + d(c, d) - d(a, c) - d(b, d)
//! ```
//!
//! The first move with `gain > epsilon` is applied and the scan restarts. The search
//! stops after a full scan without an improving move. Cost strictly decreases with
//! every applied move, so the search terminates.
//!
//! # Complexity
//!
//! O(n²) per pass; the number of passes is not polynomially bounded in theory but is
//! small in practice.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use log::{debug, trace};

use crate::error::{GraphError, Result};
use crate::graph::Graph;

/// Default improvement threshold; smaller gains are treated as floating-point noise.
pub const DEFAULT_EPSILON: f64 = 1e-12;

/// Applies 2-opt to `tour` (a cycle given as an open sequence) until no move improves
/// it by more than `epsilon`.
///
/// Returns the improved tour and its cycle cost.
///
/// # Errors
/// * graph validation errors
/// * `InvalidTour` if `tour` is not a permutation of the vertices
/// * `InvalidInput` unless `epsilon > 0`
///
/// # Examples
///
/// ```
/// use tsp_algos::cs::graph::Graph;
/// use tsp_algos::cs::optimization::{two_opt_improve, DEFAULT_EPSILON};
///
/// // Unit square; 1-3-2-4 crosses itself.
/// let d = std::f64::consts::SQRT_2;
/// let g = Graph::from_edges(
///     4,
///     &[(1, 2, 1.0), (2, 3, 1.0), (3, 4, 1.0), (4, 1, 1.0), (1, 3, d), (2, 4, d)],
/// )
/// .unwrap();
/// let (tour, cost) = two_opt_improve(&g, &[1, 3, 2, 4], DEFAULT_EPSILON).unwrap();
/// assert_eq!(cost, 4.0);
/// assert_eq!(tour.len(), 4);
/// ```
pub fn two_opt_improve(graph: &Graph, tour: &[usize], epsilon: f64) -> Result<(Vec<usize>, f64)> {
    graph.validate()?;
    graph.check_tour(tour)?;
    if !(epsilon > 0.0) {
        return Err(GraphError::invalid_input(format!(
            "2-opt epsilon must be positive, got {epsilon}"
        )));
    }

    let mut current = tour.to_vec();
    let n = current.len();
    let mut moves = 0usize;

    'scan: loop {
        for i in 1..n.saturating_sub(1) {
            for k in (i + 2)..=n {
                let gain = two_opt_gain(graph, &current, i, k);
                if gain > epsilon {
                    trace!("2-opt: reverse [{i}, {k}) gain {gain}");
                    current[i..k].reverse();
                    moves += 1;
                    continue 'scan;
                }
            }
        }
        break;
    }

    let cost = graph.cycle_cost(&current);
    debug!("2-opt: {moves} moves, cost {cost}");
    Ok((current, cost))
}

/// Cost reduction from reversing `tour[i..k]`.
///
/// Before: ... a - b ... c - d ...
/// After:  ... a - c ... b - d ...
fn two_opt_gain(graph: &Graph, tour: &[usize], i: usize, k: usize) -> f64 {
    let n = tour.len();
    let (a, b) = (tour[i - 1], tour[i]);
    let (c, d) = (tour[k - 1], tour[k % n]);
    if a == d {
        return 0.0;
    }
    graph.weight(a, b) + graph.weight(c, d) - graph.weight(a, c) - graph.weight(b, d)
}
