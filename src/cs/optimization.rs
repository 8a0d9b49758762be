pub mod nearest_neighbor;
pub mod two_opt;

pub use nearest_neighbor::{nearest_neighbor, nearest_neighbor_multistart};
pub use two_opt::{two_opt_improve, DEFAULT_EPSILON};
