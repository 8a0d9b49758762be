pub mod christofides;

pub use christofides::{shortcut_tour, COST_PRECISION};
