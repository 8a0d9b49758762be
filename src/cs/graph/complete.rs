//! Dense, undirected, complete weighted graph.
//!
//! Vertices are labelled `1..=n`. The weight matrix is stored as an `n × n`
//! [`ndarray::Array2`], with a zero entry meaning "not yet populated". Every solver
//! in this crate assumes the graph is complete, symmetric and positively weighted,
//! and calls [`Graph::validate`] once before doing any work.
//!
//! # Example
//! ```
//! use tsp_algos::cs::graph::Graph;
//!
//! let mut g = Graph::new(3).unwrap();
//! g.set_weight(1, 2, 1.0).unwrap();
//! g.set_weight(1, 3, 2.5).unwrap();
//! g.set_weight(2, 3, 2.0).unwrap();
//!
//! assert!(g.validate().is_ok());
//! assert_eq!(g.weight(3, 1), 2.5);
//! ```

use ndarray::Array2;
use std::fmt;
use std::ops::RangeInclusive;

use crate::error::{GraphError, Result};

/// Tolerance used when checking the weight matrix for symmetry.
pub const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Complete undirected graph with a dense weight matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    num_nodes: usize,
    weights: Array2<f64>,
}

impl Graph {
    /// Creates a graph with `num_nodes` vertices and no weights yet.
    ///
    /// # Errors
    /// `EmptyGraph` if `num_nodes == 0`.
    pub fn new(num_nodes: usize) -> Result<Self> {
        if num_nodes == 0 {
            return Err(GraphError::EmptyGraph);
        }
        Ok(Self {
            num_nodes,
            weights: Array2::zeros((num_nodes, num_nodes)),
        })
    }

    /// Builds a graph from a 0-based square matrix; row `i` describes vertex `i + 1`.
    /// The diagonal is ignored.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let mut graph = Self::new(rows.len())?;
        for (i, row) in rows.iter().enumerate() {
            if row.len() != rows.len() {
                return Err(GraphError::invalid_input(format!(
                    "row {} has {} entries, expected {}",
                    i + 1,
                    row.len(),
                    rows.len()
                )));
            }
            for (j, &w) in row.iter().enumerate() {
                if i != j {
                    // Written one direction at a time so asymmetry survives to `validate`.
                    graph.check_weight(i + 1, j + 1, w)?;
                    graph.weights[[i, j]] = w;
                }
            }
        }
        Ok(graph)
    }

    /// Builds a graph from an undirected edge list.
    pub fn from_edges(num_nodes: usize, edges: &[(usize, usize, f64)]) -> Result<Self> {
        let mut graph = Self::new(num_nodes)?;
        for &(u, v, w) in edges {
            graph.set_weight(u, v, w)?;
        }
        Ok(graph)
    }

    /// Sets the weight of the undirected edge `{u, v}`.
    pub fn set_weight(&mut self, u: usize, v: usize, weight: f64) -> Result<()> {
        self.check_pair(u, v)?;
        self.check_weight(u, v, weight)?;
        self.weights[[u - 1, v - 1]] = weight;
        self.weights[[v - 1, u - 1]] = weight;
        Ok(())
    }

    /// Number of vertices.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Vertex ids in ascending order.
    pub fn vertices(&self) -> RangeInclusive<usize> {
        1..=self.num_nodes
    }

    /// Weight of the edge `{u, v}`.
    ///
    /// # Panics
    /// Panics if `u == v` or either vertex is out of range.
    #[inline]
    pub fn weight(&self, u: usize, v: usize) -> f64 {
        assert!(u != v, "self-loop ({u}, {v}) has no weight");
        self.weights[[u - 1, v - 1]]
    }

    /// Checked variant of [`Graph::weight`].
    pub fn try_weight(&self, u: usize, v: usize) -> Result<f64> {
        self.check_pair(u, v)?;
        Ok(self.weights[[u - 1, v - 1]])
    }

    /// Cost of the closed tour `tour[0] -> ... -> tour[n-1] -> tour[0]`.
    pub fn cycle_cost(&self, tour: &[usize]) -> f64 {
        if tour.len() < 2 {
            return 0.0;
        }
        let closing = self.weight(tour[tour.len() - 1], tour[0]);
        tour.windows(2)
            .map(|pair| self.weight(pair[0], pair[1]))
            .sum::<f64>()
            + closing
    }

    /// Checks that every pair of distinct vertices has a positive, finite,
    /// symmetric weight.
    pub fn validate(&self) -> Result<()> {
        for u in self.vertices() {
            for v in (u + 1)..=self.num_nodes {
                let forward = self.weights[[u - 1, v - 1]];
                let backward = self.weights[[v - 1, u - 1]];
                if forward == 0.0 || backward == 0.0 {
                    return Err(GraphError::MissingEdge { u, v });
                }
                if (forward - backward).abs() > SYMMETRY_TOLERANCE {
                    return Err(GraphError::Asymmetric {
                        u,
                        v,
                        forward,
                        backward,
                    });
                }
            }
        }
        Ok(())
    }

    /// Checks that `vertex` is a valid id for this graph.
    pub fn check_vertex(&self, vertex: usize) -> Result<()> {
        if vertex == 0 || vertex > self.num_nodes {
            return Err(GraphError::VertexOutOfRange {
                vertex,
                num_nodes: self.num_nodes,
            });
        }
        Ok(())
    }

    /// Checks that `tour` visits every vertex exactly once.
    pub fn check_tour(&self, tour: &[usize]) -> Result<()> {
        if tour.len() != self.num_nodes {
            return Err(GraphError::invalid_tour(format!(
                "expected {} vertices, got {}",
                self.num_nodes,
                tour.len()
            )));
        }
        let mut seen = vec![false; self.num_nodes + 1];
        for &v in tour {
            self.check_vertex(v)?;
            if std::mem::replace(&mut seen[v], true) {
                return Err(GraphError::invalid_tour(format!("vertex {v} repeated")));
            }
        }
        Ok(())
    }

    fn check_pair(&self, u: usize, v: usize) -> Result<()> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if u == v {
            return Err(GraphError::SelfLoop(u));
        }
        Ok(())
    }

    fn check_weight(&self, u: usize, v: usize, weight: f64) -> Result<()> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(GraphError::InvalidWeight { u, v, weight });
        }
        Ok(())
    }
}

impl fmt::Display for Graph {
    /// Renders the weight matrix with row and column headings; `-` marks the diagonal.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "    ")?;
        for v in self.vertices() {
            write!(f, " {v:>7}")?;
        }
        writeln!(f)?;
        for u in self.vertices() {
            write!(f, "{u:>3} ")?;
            for v in self.vertices() {
                if u == v {
                    write!(f, " {:>7}", "-")?;
                } else {
                    write!(f, " {:>7}", self.weights[[u - 1, v - 1]])?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
