//! # Euler Tour (Fleury's Algorithm)
//!
//! This module builds the **Eulerian multigraph** used by Christofides' algorithm
//! (spanning tree edges plus matching edges, parallel edges allowed) and extracts an
//! **Eulerian circuit** from it with **Fleury's algorithm**.
//!
//! ## Summary of Fleury's Algorithm
//! 1. Start at vertex 1. Every vertex must have even degree and the edges must be
//!    connected, otherwise no circuit exists.
//! 2. At each step, among the current vertex's remaining edges take the first one
//!    that is **not a bridge** of the partially consumed multigraph. Only when every
//!    remaining edge is a bridge is one taken anyway.
//! 3. Remove the edge (one copy, from both endpoints), move along it and repeat until
//!    all edges are consumed.
//!
//! The bridge test compares the number of vertices reachable from `u` before and
//! after removing one copy of `(u, v)`. Reachability uses an iterative DFS with an
//! explicit stack.
//!
//! Complexity: \( O(E \cdot (V + E)) \), which limits this to small graphs.
//!
//! ## Example Usage
//! ```rust
//! use tsp_algos::cs::graph::euler_tour::{fleury, Multigraph};
//!
//! // Triangle with two extra copies of edge 1-2: degrees 4, 4, 2.
//! let mut g = Multigraph::new(3);
//! g.add_edge(1, 2).unwrap();
//! g.add_edge(2, 3).unwrap();
//! g.add_edge(3, 1).unwrap();
//! g.add_edge(1, 2).unwrap();
//! g.add_edge(2, 1).unwrap();
//!
//! let walk = fleury(&g).unwrap();
//! assert_eq!(walk.len(), g.num_edges() + 1);
//! assert_eq!(walk.first(), walk.last());
//! ```

use bitvec::prelude::*;
use log::{debug, trace};

use crate::error::{GraphError, Result};
use crate::graph::prim::SpanningTree;

/// Vertex every Eulerian walk starts from.
pub const START: usize = 1;

/// Undirected multigraph over vertices `1..=n`.
///
/// `adj[v]` lists one entry per incident edge, so an edge used twice appears twice.
/// Entry 0 is always empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Multigraph {
    adj: Vec<Vec<usize>>,
}

impl Multigraph {
    /// Creates a multigraph with `n` vertices and no edges.
    pub fn new(n: usize) -> Self {
        Self {
            adj: vec![Vec::new(); n + 1],
        }
    }

    /// Spanning tree edges plus one extra edge per matched pair.
    pub fn from_tree_and_matching(tree: &SpanningTree, matching: &[(usize, usize)]) -> Result<Self> {
        let mut graph = Self {
            adj: tree.adjacency(),
        };
        for &(u, v) in matching {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Adds an undirected edge `{u, v}`; repeated calls add parallel edges.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<()> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if u == v {
            return Err(GraphError::SelfLoop(u));
        }
        self.adj[u].push(v);
        self.adj[v].push(u);
        Ok(())
    }

    /// Number of vertices.
    pub fn num_nodes(&self) -> usize {
        self.adj.len() - 1
    }

    /// Number of remaining edges incident to `v`.
    pub fn degree(&self, v: usize) -> usize {
        self.adj.get(v).map_or(0, Vec::len)
    }

    /// Remaining neighbor entries of `v`, with multiplicity.
    pub fn neighbors(&self, v: usize) -> &[usize] {
        self.adj.get(v).map_or(&[], Vec::as_slice)
    }

    /// Number of undirected edges.
    pub fn num_edges(&self) -> usize {
        self.adj.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// First vertex with odd degree, if any.
    pub fn odd_vertex(&self) -> Option<usize> {
        (1..self.adj.len()).find(|&v| self.adj[v].len() % 2 == 1)
    }

    /// Removes one copy of `{u, v}`. Returns `false` if no such edge remains.
    fn remove_edge(&mut self, u: usize, v: usize) -> bool {
        let Some(pos_u) = self.adj[u].iter().position(|&x| x == v) else {
            return false;
        };
        let Some(pos_v) = self.adj[v].iter().position(|&x| x == u) else {
            return false;
        };
        self.adj[u].swap_remove(pos_u);
        self.adj[v].swap_remove(pos_v);
        true
    }

    /// Number of vertices reachable from `from`, including itself.
    fn reachable_count(&self, from: usize) -> usize {
        let mut visited = bitvec![0; self.adj.len()];
        let mut stack = vec![from];
        visited.set(from, true);
        let mut count = 1;

        while let Some(v) = stack.pop() {
            for &next in &self.adj[v] {
                if !visited[next] {
                    visited.set(next, true);
                    count += 1;
                    stack.push(next);
                }
            }
        }
        count
    }

    /// Whether one copy of `{u, v}` is a bridge of the current multigraph.
    ///
    /// The only remaining edge at `u` is reported as a non-bridge since it cannot
    /// be avoided. The multigraph is left unchanged.
    pub fn is_bridge(&mut self, u: usize, v: usize) -> bool {
        if self.degree(u) == 1 {
            return false;
        }
        let before = self.reachable_count(u);
        if !self.remove_edge(u, v) {
            return false;
        }
        let after = self.reachable_count(u);
        self.adj[u].push(v);
        self.adj[v].push(u);
        after < before
    }

    fn check_vertex(&self, v: usize) -> Result<()> {
        if v == 0 || v >= self.adj.len() {
            return Err(GraphError::VertexOutOfRange {
                vertex: v,
                num_nodes: self.num_nodes(),
            });
        }
        Ok(())
    }
}

/// Extracts an Eulerian circuit starting and ending at vertex 1 with Fleury's
/// algorithm. The input multigraph is not modified.
///
/// Returns the closed walk as a vertex sequence of length `num_edges() + 1`.
///
/// # Errors
/// * `NotEulerian` if some vertex has odd degree
/// * `DeadEnd` if the walk gets stuck before all edges are used, which means the
///   edges were not connected
pub fn fleury(multigraph: &Multigraph) -> Result<Vec<usize>> {
    if let Some(vertex) = multigraph.odd_vertex() {
        return Err(GraphError::NotEulerian {
            vertex,
            degree: multigraph.degree(vertex),
        });
    }
    if multigraph.num_nodes() == 0 {
        return Ok(Vec::new());
    }

    let mut adj = multigraph.clone();
    let total_edges = adj.num_edges();
    let mut walk = Vec::with_capacity(total_edges + 1);
    let mut current = START;
    walk.push(current);

    for used in 0..total_edges {
        if adj.degree(current) == 0 {
            return Err(GraphError::DeadEnd {
                vertex: current,
                remaining: total_edges - used,
            });
        }

        // Snapshot: the bridge test reorders the adjacency list.
        let candidates = adj.neighbors(current).to_vec();
        let next = match candidates.iter().copied().find(|&v| !adj.is_bridge(current, v)) {
            Some(v) => v,
            None => {
                trace!("fleury: only bridges left at {current}, taking {}", candidates[0]);
                candidates[0]
            }
        };

        adj.remove_edge(current, next);
        current = next;
        walk.push(current);
    }

    debug!("fleury: walked {total_edges} edges");
    Ok(walk)
}
