use bitvec::prelude::*;
use log::debug;

use crate::cs::tsp::{round_to, Solution};
use crate::error::{GraphError, Result};
use crate::graph::euler_tour::{fleury, Multigraph};
use crate::graph::matching::match_odd_vertices;
use crate::graph::prim::minimum_spanning_tree;
use crate::graph::Graph;

/// Decimal places kept in the reported Christofides cost.
pub const COST_PRECISION: u32 = 2;

/// Most decimal places an `f64` cost can meaningfully carry.
pub const MAX_COST_PRECISION: u32 = 15;

/// Implements Christofides algorithm for the TSP on a complete graph.
///
/// It works by:
/// 1. Computing a minimum spanning tree (MST) rooted at vertex 1
/// 2. Finding vertices with odd degree in the MST
/// 3. Greedily matching the odd-degree vertices by nearest weight
/// 4. Combining MST and matching to form an Eulerian multigraph
/// 5. Finding an Eulerian circuit with Fleury's algorithm and shortcutting it to a
///    Hamiltonian cycle
///
/// Step 3 uses a greedy matching rather than a minimum-weight perfect matching, so
/// the classic 1.5-approximation bound does not apply.
///
/// # Arguments
///
/// * `graph` - Complete, symmetric, positively weighted graph
///
/// # Returns
///
/// * A [`Solution`] whose tour lists every vertex once starting at vertex 1 (the
///   return to the start is implicit) and whose cost is rounded to two decimals.
///
/// # Examples
///
/// ```
/// use tsp_algos::cs::approx::christofides;
/// use tsp_algos::cs::graph::Graph;
///
/// let g = Graph::from_edges(
///     4,
///     &[(1, 2, 1.0), (1, 3, 4.0), (1, 4, 3.0), (2, 3, 2.0), (2, 4, 5.0), (3, 4, 6.0)],
/// )
/// .unwrap();
/// let solution = christofides::solve(&g).unwrap();
/// assert_eq!(solution.tour.len(), 4);
/// assert!(solution.cost >= 12.0);
/// ```
pub fn solve(graph: &Graph) -> Result<Solution> {
    solve_with_precision(graph, COST_PRECISION)
}

/// [`solve`] with the cost rounded to `places` decimals instead of [`COST_PRECISION`].
///
/// # Errors
/// `InvalidInput` if `places > MAX_COST_PRECISION`.
pub fn solve_with_precision(graph: &Graph, places: u32) -> Result<Solution> {
    if places > MAX_COST_PRECISION {
        return Err(GraphError::invalid_input(format!(
            "cost precision {places} exceeds {MAX_COST_PRECISION} decimal places"
        )));
    }
    let tree = minimum_spanning_tree(graph)?;
    let matching = match_odd_vertices(graph, &tree)?;
    let multigraph = Multigraph::from_tree_and_matching(&tree, &matching)?;
    let walk = fleury(&multigraph)?;
    let tour = shortcut_tour(&walk);

    if tour.len() != graph.num_nodes() {
        return Err(GraphError::invalid_tour(format!(
            "eulerian walk reached {} of {} vertices",
            tour.len(),
            graph.num_nodes()
        )));
    }

    let cost = round_to(graph.cycle_cost(&tour), places);
    debug!(
        "christofides: mst {}, {} matching edges, walk {}, cost {cost}",
        tree.total_weight(),
        matching.len(),
        walk.len()
    );
    Ok(Solution { tour, cost })
}

/// Turns an Eulerian walk into a Hamiltonian tour by keeping the first occurrence
/// of each vertex. The closing return to the start is left implicit.
pub fn shortcut_tour(euler_tour: &[usize]) -> Vec<usize> {
    let max = euler_tour.iter().copied().max().unwrap_or(0);
    let mut seen = bitvec![0; max + 1];
    let mut shortened = Vec::new();

    for &v in euler_tour {
        if !seen[v] {
            seen.set(v, true);
            shortened.push(v);
        }
    }

    shortened
}
