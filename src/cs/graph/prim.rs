use bitvec::prelude::*;
use log::debug;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::Result;
use crate::graph::Graph;

/// Root of every spanning tree built here.
pub const ROOT: usize = 1;

/// Entry in the priority queue for Prim's algorithm
#[derive(Copy, Clone, Debug)]
struct Edge {
    vertex: usize,
    cost: f64,
    parent: usize,
    seq: u64,
}

impl Eq for Edge {}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap; earlier insertions win ties
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Spanning tree stored as a 1-indexed parent array.
///
/// `parent[0]` is unused and `parent[ROOT]` is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningTree {
    parent: Vec<Option<usize>>,
    total_weight: f64,
}

impl SpanningTree {
    /// Parent array, indexed by vertex id.
    pub fn parents(&self) -> &[Option<usize>] {
        &self.parent
    }

    /// Parent of `vertex`, `None` for the root.
    pub fn parent(&self, vertex: usize) -> Option<usize> {
        self.parent.get(vertex).copied().flatten()
    }

    /// Number of vertices spanned.
    pub fn num_nodes(&self) -> usize {
        self.parent.len() - 1
    }

    /// Sum of tree edge weights.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Tree edges as `(parent, child)` pairs in child order.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        self.parent
            .iter()
            .enumerate()
            .filter_map(|(child, p)| p.map(|p| (p, child)))
            .collect()
    }

    /// Undirected adjacency lists, indexed by vertex id (entry 0 is empty).
    /// Each tree edge appears once in each endpoint's list.
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adj = vec![Vec::new(); self.parent.len()];
        for (p, child) in self.edges() {
            adj[p].push(child);
            adj[child].push(p);
        }
        adj
    }
}

/// Computes the minimum spanning tree of a complete graph using Prim's algorithm
/// rooted at vertex 1.
///
/// # Returns
/// * `Ok(tree)` - parent array of the MST together with its total weight
/// * `Err(GraphError)` - if the graph is not complete, symmetric and positively weighted
///
/// # Examples
/// ```
/// use tsp_algos::cs::graph::{prim, Graph};
///
/// let g = Graph::from_edges(3, &[(1, 2, 4.0), (1, 3, 2.0), (2, 3, 1.0)]).unwrap();
/// let tree = prim::minimum_spanning_tree(&g).unwrap();
/// assert_eq!(tree.total_weight(), 3.0);
/// assert_eq!(tree.parent(1), None);
/// assert_eq!(tree.parent(2), Some(3));
/// ```
///
/// # Complexity
/// * Time: O(n² log n) on a complete graph
/// * Space: O(n²) for the lazy heap
pub fn minimum_spanning_tree(graph: &Graph) -> Result<SpanningTree> {
    graph.validate()?;
    let n = graph.num_nodes();

    let mut parent = vec![None; n + 1];
    let mut best = vec![f64::INFINITY; n + 1];
    let mut visited = bitvec![0; n + 1];
    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;
    let mut total_weight = 0.0;

    best[ROOT] = 0.0;
    heap.push(Edge {
        vertex: ROOT,
        cost: 0.0,
        parent: ROOT,
        seq,
    });

    while let Some(Edge {
        vertex, cost, parent: from, ..
    }) = heap.pop()
    {
        if visited[vertex] {
            continue;
        }
        visited.set(vertex, true);
        if vertex != ROOT {
            parent[vertex] = Some(from);
            total_weight += cost;
        }

        for v in graph.vertices() {
            if v == vertex || visited[v] {
                continue;
            }
            let w = graph.weight(vertex, v);
            if w < best[v] {
                best[v] = w;
                seq += 1;
                heap.push(Edge {
                    vertex: v,
                    cost: w,
                    parent: vertex,
                    seq,
                });
            }
        }
    }

    debug!("prim: {n} vertices, mst weight {total_weight}");
    Ok(SpanningTree {
        parent,
        total_weight,
    })
}

/// Dense O(n²) variant of Prim's algorithm without a heap.
///
/// Scans the best-cost array for the closest unvisited vertex each round, which
/// is usually faster than the heap version on complete graphs. Ties go to the
/// lowest vertex id.
pub fn minimum_spanning_tree_dense(graph: &Graph) -> Result<SpanningTree> {
    graph.validate()?;
    let n = graph.num_nodes();

    let mut parent = vec![None; n + 1];
    let mut best = vec![f64::INFINITY; n + 1];
    let mut visited = bitvec![0; n + 1];
    let mut total_weight = 0.0;
    best[ROOT] = 0.0;

    for _ in 0..n {
        let mut u = 0;
        let mut min_cost = f64::INFINITY;
        for v in graph.vertices() {
            if !visited[v] && best[v] < min_cost {
                min_cost = best[v];
                u = v;
            }
        }
        visited.set(u, true);
        if u != ROOT {
            total_weight += min_cost;
        }

        for v in graph.vertices() {
            if v != u && !visited[v] {
                let w = graph.weight(u, v);
                if w < best[v] {
                    best[v] = w;
                    parent[v] = Some(u);
                }
            }
        }
    }

    debug!("prim (dense): {n} vertices, mst weight {total_weight}");
    Ok(SpanningTree {
        parent,
        total_weight,
    })
}
