//! Random complete graphs for experiments.
//!
//! Every generator takes the random source explicitly so runs can be reproduced with a
//! seeded `rand_chacha::ChaCha8Rng`.

use rand::seq::index;
use rand::Rng;

use crate::cs::tsp::round_to;
use crate::error::Result;
use crate::graph::Graph;

/// Smallest weight a generated edge may carry. Coincident points would otherwise
/// produce a zero-weight edge.
pub const MIN_WEIGHT: f64 = 0.01;

/// Coordinates are drawn from `0..=GRID_SIZE` on both axes.
pub const GRID_SIZE: i32 = 100;

const TRAFFIC_PENALTY: f64 = 2.0;
const LIGHT_PENALTY: f64 = 1.5;
const SPEED: f64 = 10.0;

/// Complete graph with integer weights drawn uniformly from `1..=10`.
pub fn random_integer_weights<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Graph> {
    let mut graph = Graph::new(n)?;
    for u in 1..=n {
        for v in (u + 1)..=n {
            graph.set_weight(u, v, f64::from(rng.gen_range(1..=10u8)))?;
        }
    }
    Ok(graph)
}

/// Random grid points with Euclidean distances rounded to two decimals.
pub fn random_euclidean<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Graph> {
    let points = random_points(n, rng);
    let mut graph = Graph::new(n)?;
    for u in 1..=n {
        for v in (u + 1)..=n {
            let d = distance(points[u - 1], points[v - 1]);
            graph.set_weight(u, v, round_to(d, 2).max(MIN_WEIGHT))?;
        }
    }
    Ok(graph)
}

/// Random grid points with a travel-time cost per edge: distance over speed, plus a
/// traffic penalty (level 0 to 2) and a penalty per traffic light (0 to 3 lights).
pub fn random_travel_time<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Graph> {
    let points = random_points(n, rng);
    let mut graph = Graph::new(n)?;
    for u in 1..=n {
        for v in (u + 1)..=n {
            let base = round_to(distance(points[u - 1], points[v - 1]), 2) / SPEED;
            let traffic = f64::from(rng.gen_range(0..=2u8)) * TRAFFIC_PENALTY;
            let lights = f64::from(rng.gen_range(0..=3u8)) * LIGHT_PENALTY;
            graph.set_weight(u, v, round_to(base + traffic + lights, 2).max(MIN_WEIGHT))?;
        }
    }
    Ok(graph)
}

/// Picks `count` distinct start vertices in sampling order. Returns every vertex in
/// ascending order when `count` is 0 or at least `n`.
pub fn choose_starts<R: Rng + ?Sized>(n: usize, count: usize, rng: &mut R) -> Vec<usize> {
    if count == 0 || count >= n {
        return (1..=n).collect();
    }
    index::sample(rng, n, count)
        .into_iter()
        .map(|i| i + 1)
        .collect()
}

fn random_points<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<(i32, i32)> {
    (0..n)
        .map(|_| (rng.gen_range(0..=GRID_SIZE), rng.gen_range(0..=GRID_SIZE)))
        .collect()
}

fn distance(a: (i32, i32), b: (i32, i32)) -> f64 {
    f64::from(b.0 - a.0).hypot(f64::from(b.1 - a.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn weights(g: &Graph) -> Vec<f64> {
        let n = g.num_nodes();
        let mut out = Vec::new();
        for u in 1..=n {
            for v in (u + 1)..=n {
                out.push(g.weight(u, v));
            }
        }
        out
    }

    #[test]
    fn test_integer_weights_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let g = random_integer_weights(12, &mut rng).unwrap();
        assert!(g.validate().is_ok());
        for w in weights(&g) {
            assert!((1.0..=10.0).contains(&w));
            assert_eq!(w, w.trunc());
        }
    }

    #[test]
    fn test_same_seed_same_graph() {
        let a = random_euclidean(9, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();
        let b = random_euclidean(9, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_euclidean_is_rounded_and_metric_bounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let g = random_euclidean(10, &mut rng).unwrap();
        assert!(g.validate().is_ok());
        let diagonal = f64::from(GRID_SIZE) * std::f64::consts::SQRT_2;
        for w in weights(&g) {
            assert!(w >= MIN_WEIGHT && w <= diagonal + 0.01);
            assert_eq!(w, round_to(w, 2));
        }
    }

    #[test]
    fn test_travel_time_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let g = random_travel_time(10, &mut rng).unwrap();
        assert!(g.validate().is_ok());
        let max = f64::from(GRID_SIZE) * std::f64::consts::SQRT_2 / SPEED
            + 2.0 * TRAFFIC_PENALTY
            + 3.0 * LIGHT_PENALTY;
        for w in weights(&g) {
            assert!(w >= MIN_WEIGHT && w <= max + 0.01);
        }
    }

    #[test]
    fn test_choose_starts() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(choose_starts(4, 0, &mut rng), vec![1, 2, 3, 4]);
        assert_eq!(choose_starts(4, 9, &mut rng), vec![1, 2, 3, 4]);

        let starts = choose_starts(20, 5, &mut rng);
        assert_eq!(starts.len(), 5);
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 5);
        assert!(starts.iter().all(|&s| (1..=20).contains(&s)));
    }

    #[test]
    fn test_zero_nodes_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(random_integer_weights(0, &mut rng).is_err());
    }
}
