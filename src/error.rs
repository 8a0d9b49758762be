//! Error types shared by every solver in the crate.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors raised while building graphs or running a TSP pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// A graph must contain at least one vertex.
    #[error("graph must contain at least one vertex")]
    EmptyGraph,

    /// Vertex ids are 1-based and bounded by the node count.
    #[error("vertex {vertex} is out of range 1..={num_nodes}")]
    VertexOutOfRange { vertex: usize, num_nodes: usize },

    /// The graph model has no self-loops.
    #[error("self-loop on vertex {0} is not allowed")]
    SelfLoop(usize),

    /// Weights must be positive and finite.
    #[error("invalid weight {weight} on edge ({u}, {v})")]
    InvalidWeight { u: usize, v: usize, weight: f64 },

    /// The graph is not complete.
    #[error("edge ({u}, {v}) has no weight")]
    MissingEdge { u: usize, v: usize },

    /// The weight matrix is not symmetric.
    #[error("asymmetric weights on ({u}, {v}): {forward} vs {backward}")]
    Asymmetric {
        u: usize,
        v: usize,
        forward: f64,
        backward: f64,
    },

    /// Handshake lemma violated by the spanning tree.
    #[error("spanning tree has an odd number ({0}) of odd-degree vertices")]
    OddDegreeCount(usize),

    /// A multigraph handed to the Euler extractor has an odd-degree vertex.
    #[error("vertex {vertex} has odd degree {degree}; no Eulerian circuit exists")]
    NotEulerian { vertex: usize, degree: usize },

    /// Fleury's walk ran out of edges before consuming the whole multigraph.
    #[error("Eulerian walk stuck at vertex {vertex} with {remaining} edges left")]
    DeadEnd { vertex: usize, remaining: usize },

    /// A tour is not a permutation of the graph's vertices.
    #[error("invalid tour: {0}")]
    InvalidTour(String),

    /// The exact solver was asked for more vertices than allowed.
    #[error("{nodes} vertices exceed the exact solver limit of {limit}")]
    SizeLimitExceeded { nodes: usize, limit: usize },

    /// The exact solver's table could not be allocated.
    #[error("cannot allocate a dynamic programming table of {entries} entries")]
    ArenaAllocation { entries: usize },

    /// Catch-all for malformed arguments.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl GraphError {
    /// Shorthand for [`GraphError::InvalidInput`].
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        GraphError::InvalidInput(msg.into())
    }

    pub(crate) fn invalid_tour(msg: impl Into<String>) -> Self {
        GraphError::InvalidTour(msg.into())
    }
}
