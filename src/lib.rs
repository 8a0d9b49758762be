pub mod cs;
pub mod error;

pub use cs::{approx, graph, optimization, tsp};
pub use error::{GraphError, Result};
