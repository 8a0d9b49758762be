pub mod complete;
pub mod euler_tour;
pub mod held_karp;
pub mod matching;
pub mod prim;

pub use complete::Graph;
pub use euler_tour::{fleury, Multigraph};
pub use held_karp::held_karp;
pub use matching::{greedy_matching, match_odd_vertices, odd_degree_vertices};
pub use prim::{minimum_spanning_tree, SpanningTree};
