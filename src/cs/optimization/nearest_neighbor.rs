//! Nearest-neighbor tour construction.
//!
//! Starting from a vertex, always move to the nearest unvisited vertex. Ties go to
//! the lowest vertex id, which keeps results reproducible.
//!
//! # Complexity
//!
//! O(n²) per start vertex.

use bitvec::prelude::*;
use log::debug;

use crate::error::Result;
use crate::graph::Graph;

/// Builds a nearest-neighbor tour from `start`.
///
/// The returned sequence visits every vertex once; the return to `start` is implicit.
///
/// # Examples
///
/// ```
/// use tsp_algos::cs::graph::Graph;
/// use tsp_algos::cs::optimization::nearest_neighbor;
///
/// let g = Graph::from_edges(
///     4,
///     &[(1, 2, 1.0), (1, 3, 4.0), (1, 4, 3.0), (2, 3, 2.0), (2, 4, 5.0), (3, 4, 6.0)],
/// )
/// .unwrap();
/// assert_eq!(nearest_neighbor(&g, 1).unwrap(), vec![1, 2, 3, 4]);
/// ```
pub fn nearest_neighbor(graph: &Graph, start: usize) -> Result<Vec<usize>> {
    graph.validate()?;
    graph.check_vertex(start)?;
    let n = graph.num_nodes();

    let mut visited = bitvec![0; n + 1];
    visited.set(start, true);
    let mut tour = Vec::with_capacity(n);
    tour.push(start);
    let mut current = start;

    while tour.len() < n {
        let mut best: Option<(usize, f64)> = None;
        for v in graph.vertices() {
            if visited[v] {
                continue;
            }
            let d = graph.weight(current, v);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((v, d));
            }
        }
        let Some((next, _)) = best else {
            break;
        };
        visited.set(next, true);
        tour.push(next);
        current = next;
    }

    Ok(tour)
}

/// Runs [`nearest_neighbor`] from every vertex in `starts` and keeps the cheapest
/// closed tour. An empty `starts` means every vertex.
///
/// Returns the best tour and its cycle cost; the first start wins ties.
pub fn nearest_neighbor_multistart(graph: &Graph, starts: &[usize]) -> Result<(Vec<usize>, f64)> {
    graph.validate()?;
    let all: Vec<usize>;
    let starts = if starts.is_empty() {
        all = graph.vertices().collect();
        all.as_slice()
    } else {
        starts
    };

    let mut best: Option<(Vec<usize>, f64)> = None;
    for &start in starts {
        let tour = nearest_neighbor(graph, start)?;
        let cost = graph.cycle_cost(&tour);
        if best.as_ref().map_or(true, |(_, bc)| cost < *bc) {
            best = Some((tour, cost));
        }
    }

    // `starts` is non-empty and every run succeeded.
    let (tour, cost) = best.unwrap_or_default();
    debug!("nearest neighbor: {} starts, best cost {cost}", starts.len());
    Ok((tour, cost))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    /// Points on a line at x = 0, 1, 2, 3, 10.
    fn line() -> Graph {
        let xs = [0.0, 1.0, 2.0, 3.0, 10.0];
        let mut g = Graph::new(xs.len()).unwrap();
        for i in 0..xs.len() {
            for j in (i + 1)..xs.len() {
                g.set_weight(i + 1, j + 1, f64::abs(xs[i] - xs[j])).unwrap();
            }
        }
        g
    }

    #[test]
    fn test_nn_walks_the_line() {
        let g = line();
        assert_eq!(nearest_neighbor(&g, 1).unwrap(), vec![1, 2, 3, 4, 5]);
        // From 3, vertices 2 and 4 tie at distance 1: lowest id first.
        assert_eq!(nearest_neighbor(&g, 3).unwrap(), vec![3, 2, 1, 4, 5]);
    }

    #[test]
    fn test_nn_single_vertex() {
        let g = Graph::new(1).unwrap();
        assert_eq!(nearest_neighbor(&g, 1).unwrap(), vec![1]);
    }

    #[test]
    fn test_nn_bad_start() {
        let g = line();
        assert!(matches!(
            nearest_neighbor(&g, 6),
            Err(GraphError::VertexOutOfRange { vertex: 6, .. })
        ));
    }

    #[test]
    fn test_nn_rejects_incomplete_graph() {
        let g = Graph::from_edges(3, &[(1, 2, 1.0), (2, 3, 1.0)]).unwrap();
        assert!(matches!(
            nearest_neighbor(&g, 1),
            Err(GraphError::MissingEdge { u: 1, v: 3 })
        ));
    }

    #[test]
    fn test_multistart_keeps_cheapest() {
        let g = line();
        let (tour, cost) = nearest_neighbor_multistart(&g, &[3, 1]).unwrap();
        // From 1: 1+1+1+7+10 = 20. From 3: 1+1+3+7+8 = 20. Tie keeps start 3.
        assert_eq!(tour[0], 3);
        assert_eq!(cost, 20.0);
        assert_eq!(cost, g.cycle_cost(&tour));
    }

    #[test]
    fn test_multistart_empty_means_all() {
        let g = line();
        let (tour, cost) = nearest_neighbor_multistart(&g, &[]).unwrap();
        for start in g.vertices() {
            let other = nearest_neighbor(&g, start).unwrap();
            assert!(cost <= g.cycle_cost(&other));
        }
        assert!(g.check_tour(&tour).is_ok());
    }
}
