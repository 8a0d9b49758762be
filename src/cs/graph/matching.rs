//! Odd-degree vertex matching for Christofides' algorithm.
//!
//! The matching here is **greedy**: each unmatched vertex is paired with its nearest
//! remaining partner. This is not a minimum-weight perfect matching, so the usual
//! 1.5× approximation guarantee of Christofides does not hold; in exchange the
//! matching runs in O(k²) for `k` odd vertices instead of needing a blossom solver.

use log::debug;
use std::collections::BTreeSet;

use crate::error::{GraphError, Result};
use crate::graph::prim::SpanningTree;
use crate::graph::Graph;

/// Vertices whose degree in the spanning tree is odd, in ascending order.
///
/// # Errors
/// `OddDegreeCount` if the count is odd, which can only come from a broken tree.
pub fn odd_degree_vertices(tree: &SpanningTree) -> Result<Vec<usize>> {
    let odd: Vec<usize> = tree
        .adjacency()
        .iter()
        .enumerate()
        .filter(|(_, neighbors)| neighbors.len() % 2 == 1)
        .map(|(v, _)| v)
        .collect();

    if odd.len() % 2 != 0 {
        return Err(GraphError::OddDegreeCount(odd.len()));
    }
    Ok(odd)
}

/// Greedily pairs up `vertices` by nearest weight.
///
/// Repeatedly takes the smallest unmatched vertex `v`, scans the remaining ones in
/// ascending order and pairs `v` with the first `u` of minimum `weight(v, u)`.
///
/// # Examples
/// ```
/// use tsp_algos::cs::graph::{matching, Graph};
///
/// let g = Graph::from_edges(
///     4,
///     &[(1, 2, 5.0), (1, 3, 1.0), (1, 4, 2.0), (2, 3, 2.0), (2, 4, 1.0), (3, 4, 4.0)],
/// )
/// .unwrap();
/// let pairs = matching::greedy_matching(&g, &[1, 2, 3, 4]).unwrap();
/// assert_eq!(pairs, vec![(1, 3), (2, 4)]);
/// ```
pub fn greedy_matching(graph: &Graph, vertices: &[usize]) -> Result<Vec<(usize, usize)>> {
    let mut unmatched = BTreeSet::new();
    for &v in vertices {
        graph.check_vertex(v)?;
        if !unmatched.insert(v) {
            return Err(GraphError::invalid_input(format!(
                "vertex {v} listed twice for matching"
            )));
        }
    }
    if unmatched.len() % 2 != 0 {
        return Err(GraphError::OddDegreeCount(unmatched.len()));
    }

    let mut pairs = Vec::with_capacity(unmatched.len() / 2);
    while let Some(v) = unmatched.pop_first() {
        let mut best: Option<(usize, f64)> = None;
        for &u in &unmatched {
            let w = graph.weight(v, u);
            if best.map_or(true, |(_, bw)| w < bw) {
                best = Some((u, w));
            }
        }
        // Even cardinality guarantees a partner.
        let Some((u, _)) = best else {
            return Err(GraphError::OddDegreeCount(1));
        };
        unmatched.remove(&u);
        pairs.push((v, u));
    }

    debug!("greedy matching: {} pairs", pairs.len());
    Ok(pairs)
}

/// Finds the odd-degree vertices of `tree` and greedily matches them.
pub fn match_odd_vertices(graph: &Graph, tree: &SpanningTree) -> Result<Vec<(usize, usize)>> {
    let odd = odd_degree_vertices(tree)?;
    debug!("{} odd-degree vertices in mst", odd.len());
    greedy_matching(graph, &odd)
}
