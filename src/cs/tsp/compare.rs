//! Side-by-side run of the three pipelines with timings.

use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::cs::tsp::{LocalSearchSolution, Solution, Solver};
use crate::error::Result;
use crate::graph::Graph;

/// Output of one pipeline together with its wall-clock time.
#[derive(Debug, Clone, PartialEq)]
pub struct Timed<T> {
    pub result: T,
    pub elapsed: Duration,
}

fn timed<T>(f: impl FnOnce() -> Result<T>) -> Result<Timed<T>> {
    let start = Instant::now();
    let result = f()?;
    Ok(Timed {
        result,
        elapsed: start.elapsed(),
    })
}

/// Results of [`Solver::compare`].
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub christofides: Timed<Solution>,
    pub nn_2opt: Timed<LocalSearchSolution>,
    /// `None` when the graph exceeds the configured exact-solver limit.
    pub held_karp: Option<Timed<Solution>>,
}

impl Comparison {
    /// Optimal cost, if Held-Karp ran.
    pub fn optimal_cost(&self) -> Option<f64> {
        self.held_karp.as_ref().map(|t| t.result.cost)
    }

    /// `(cost - optimal) / optimal * 100`, or `None` without a positive optimum.
    pub fn percent_above_optimal(&self, cost: f64) -> Option<f64> {
        self.optimal_cost()
            .filter(|&opt| opt > 0.0)
            .map(|opt| (cost - opt) / opt * 100.0)
    }
}

impl Solver {
    /// Runs every pipeline on `graph`. Held-Karp is skipped, not failed, when the graph
    /// exceeds `held_karp_limit`. With the `parallel` feature the pipelines run on the
    /// rayon pool.
    pub fn compare(&self, graph: &Graph) -> Result<Comparison> {
        graph.validate()?;
        let run_exact = self.held_karp_allowed(graph);
        if !run_exact {
            info!(
                "held-karp skipped: {} vertices over limit {}",
                graph.num_nodes(),
                self.config().held_karp_limit
            );
        }

        let christofides = || timed(|| self.solve_christofides(graph));
        let nn_2opt = || timed(|| self.solve_nn_2opt(graph));
        let held_karp = || {
            if run_exact {
                timed(|| self.solve_held_karp(graph)).map(Some)
            } else {
                Ok(None)
            }
        };

        #[cfg(feature = "parallel")]
        let (christofides, (nn_2opt, held_karp)) =
            rayon::join(christofides, || rayon::join(nn_2opt, held_karp));
        #[cfg(not(feature = "parallel"))]
        let (christofides, nn_2opt, held_karp) = (christofides(), nn_2opt(), held_karp());

        let comparison = Comparison {
            christofides: christofides?,
            nn_2opt: nn_2opt?,
            held_karp: held_karp?,
        };
        debug!(
            "compare: christofides {}, nn+2-opt {}, optimal {:?}",
            comparison.christofides.result.cost,
            comparison.nn_2opt.result.improved.cost,
            comparison.optimal_cost()
        );
        Ok(comparison)
    }
}

fn format_cycle(tour: &[usize]) -> String {
    tour.iter()
        .chain(tour.first())
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "================== RESULTS ==================")?;
        writeln!(f)?;

        let c = &self.christofides;
        writeln!(f, "----- Christofides Algorithm -----")?;
        writeln!(f, "Cost      : {}", c.result.cost)?;
        writeln!(f, "Path      : {}", format_cycle(&c.result.tour))?;
        writeln!(f, "Runtime   : {:.6} seconds", c.elapsed.as_secs_f64())?;
        writeln!(f)?;

        let l = &self.nn_2opt;
        writeln!(f, "----- Nearest Neighbor + 2-opt -----")?;
        writeln!(f, "NN Cost        : {}", l.result.initial.cost)?;
        writeln!(f, "2-opt Cost     : {}", l.result.improved.cost)?;
        writeln!(f, "Path           : {}", format_cycle(&l.result.improved.tour))?;
        writeln!(f, "Runtime        : {:.6} seconds", l.elapsed.as_secs_f64())?;
        writeln!(f)?;

        writeln!(f, "----- Held-Karp Algorithm -----")?;
        match &self.held_karp {
            Some(h) => {
                writeln!(f, "Cost      : {}", h.result.cost)?;
                writeln!(f, "Path      : {}", format_cycle(&h.result.tour))?;
                writeln!(f, "Runtime   : {:.6} seconds", h.elapsed.as_secs_f64())?;
            }
            None => writeln!(f, "Held-Karp skipped due to node limit.")?,
        }
        writeln!(f)?;

        writeln!(f, "============== SUMMARY COMPARISON ==============")?;
        writeln!(
            f,
            "{:20} {:10} {:15} {:15}",
            "Algorithm", "Cost", "Runtime (s)", "% Above Optimal"
        )?;
        writeln!(f, "{}", "-".repeat(65))?;

        let pct = |cost: f64| match self.percent_above_optimal(cost) {
            Some(p) => format!("{p:7.2}%"),
            None => "   N/A".to_string(),
        };
        let mut rows = vec![
            (
                "Christofides",
                format!("{:.4}", c.result.cost),
                c.elapsed,
                pct(c.result.cost),
            ),
            (
                "NN + 2-opt",
                format!("{:.4}", l.result.improved.cost),
                l.elapsed,
                pct(l.result.improved.cost),
            ),
        ];
        match &self.held_karp {
            Some(h) => rows.push((
                "Held-Karp",
                format!("{:.4}", h.result.cost),
                h.elapsed,
                pct(h.result.cost),
            )),
            None => rows.push((
                "Held-Karp (skipped)",
                "   N/A".to_string(),
                Duration::ZERO,
                "   N/A".to_string(),
            )),
        }
        for (name, cost, elapsed, pct) in rows {
            writeln!(
                f,
                "{name:20} {cost:10} {:15.6} {pct:15}",
                elapsed.as_secs_f64()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::tsp::generate::random_integer_weights;
    use crate::cs::tsp::SolverConfig;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn four_node() -> Graph {
        Graph::from_edges(
            4,
            &[
                (1, 2, 1.0),
                (1, 3, 4.0),
                (1, 4, 3.0),
                (2, 3, 2.0),
                (2, 4, 5.0),
                (3, 4, 6.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_compare_four_node() {
        let report = Solver::default().compare(&four_node()).unwrap();
        assert_eq!(report.optimal_cost(), Some(12.0));
        assert_eq!(report.percent_above_optimal(12.0), Some(0.0));
        assert_relative_eq!(report.percent_above_optimal(15.0).unwrap(), 25.0);
        assert!(report.christofides.result.cost >= 12.0);
        assert!(report.nn_2opt.result.improved.cost >= 12.0);
    }

    #[test]
    fn test_compare_skips_exact_over_limit() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let g = random_integer_weights(8, &mut rng).unwrap();
        let solver = Solver::new(SolverConfig {
            held_karp_limit: 5,
            ..SolverConfig::default()
        });
        let report = solver.compare(&g).unwrap();
        assert!(report.held_karp.is_none());
        assert_eq!(report.percent_above_optimal(30.0), None);

        let text = report.to_string();
        assert!(text.contains("Held-Karp skipped due to node limit."));
        assert!(text.contains("Held-Karp (skipped)"));
    }

    #[test]
    fn test_display_lists_closed_paths() {
        let report = Solver::default().compare(&four_node()).unwrap();
        let text = report.to_string();
        assert!(text.contains("SUMMARY COMPARISON"));
        assert!(text.contains("Christofides"));
        assert!(text.contains("NN + 2-opt"));
        assert!(text.contains("   0.00%"));
        assert_eq!(format_cycle(&[1, 2, 3]), "1 -> 2 -> 3 -> 1");
    }

    #[test]
    fn test_single_vertex_has_no_percentage() {
        let report = Solver::default().compare(&Graph::new(1).unwrap()).unwrap();
        assert_eq!(report.optimal_cost(), Some(0.0));
        assert_eq!(report.percent_above_optimal(0.0), None);
    }
}
