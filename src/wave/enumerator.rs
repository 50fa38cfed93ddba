// Bounded parallel fan-out over FIXED_K(1..=C) for small corridor counts,
// where enumerating every k is cheaper and more exhaustive than the
// Dinkelbach loop's iterative search.

use rayon::ThreadPoolBuilder;

use crate::domain::solver_service::SolverService;

use super::config::DriverConfig;
use super::formulator::{MipFormulator, SubSolveParams, Variant};
use super::index::ProblemIndex;
use super::time_budget::TimeBudget;
use super::tracker::SolutionTracker;
use super::types::Candidate;

pub struct FixedKEnumerator<'a> {
    index: &'a ProblemIndex,
    solver: &'a dyn SolverService,
    tracker: &'a SolutionTracker,
}

impl<'a> FixedKEnumerator<'a> {
    pub fn new(index: &'a ProblemIndex, solver: &'a dyn SolverService, tracker: &'a SolutionTracker) -> Self {
        Self {
            index,
            solver,
            tracker,
        }
    }

    /// Solves `FIXED_K(k)` for every `k` in `1..=n_corridors` across a pool
    /// sized to `config.parallel_pool_size`, offering each result to the
    /// shared tracker as it completes. Returns the best candidate this
    /// enumeration produced.
    pub fn run(&self, config: &DriverConfig, budget: &TimeBudget<'_>) -> Candidate {
        if self.index.n_corridors == 0 {
            return Candidate::infeasible();
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(config.parallel_pool_size.max(1))
            .build()
            .expect("failed to build fixed-k enumeration thread pool");

        let per_k_time = remaining_time_per_k(budget, self.index.n_corridors, config);

        let results = pool.install(|| {
            use rayon::prelude::*;
            (1..=self.index.n_corridors as u32)
                .into_par_iter()
                .map(|k| {
                    let params = SubSolveParams::new(per_k_time).with_threads(config.solver_threads.max(1));
                    let candidate = MipFormulator::solve(self.index, Variant::FixedK(k), &params, self.solver);
                    self.tracker.offer(candidate.clone());
                    candidate
                })
                .collect::<Vec<_>>()
        });

        results
            .into_iter()
            .filter(|c| c.feasible)
            .max_by(|a, b| a.ratio.total_cmp(&b.ratio))
            .unwrap_or_else(Candidate::infeasible)
    }
}

/// Splits the remaining wall-clock budget across every `k`, so the whole
/// enumeration — not any single sub-solve — respects the deadline.
fn remaining_time_per_k(budget: &TimeBudget<'_>, n_corridors: usize, config: &DriverConfig) -> f64 {
    let pool_size = config.parallel_pool_size.max(1) as f64;
    let rounds = (n_corridors as f64 / pool_size).ceil().max(1.0);
    (budget.remaining_secs() / rounds).min(config.per_subsolve_time_small)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::MicroLpSolver;
    use crate::wave::time_budget::Stopwatch;
    use crate::wave::types::{Corridor, Order};
    use std::collections::HashMap;

    #[test]
    fn enumerates_every_k_and_keeps_the_best() {
        let orders = vec![
            Order::new(HashMap::from([(0, 4)])),
            Order::new(HashMap::from([(0, 6)])),
        ];
        let corridors = vec![
            Corridor::new(HashMap::from([(0, 5)])),
            Corridor::new(HashMap::from([(0, 5)])),
        ];
        let index = ProblemIndex::build(&orders, &corridors, 1, 1, 10);

        let solver = MicroLpSolver::new();
        let tracker = SolutionTracker::new();
        let enumerator = FixedKEnumerator::new(&index, &solver, &tracker);

        let stopwatch = Stopwatch::start();
        let budget = TimeBudget::new(&stopwatch, 5_000);
        let config = DriverConfig::default();

        let best = enumerator.run(&config, &budget);
        assert!(best.feasible);
        assert_eq!(tracker.best().ratio, best.ratio);
    }

    #[test]
    fn empty_corridor_set_is_infeasible() {
        let index = ProblemIndex::build(&[], &[], 0, 0, 0);
        let solver = MicroLpSolver::new();
        let tracker = SolutionTracker::new();
        let enumerator = FixedKEnumerator::new(&index, &solver, &tracker);

        let stopwatch = Stopwatch::start();
        let budget = TimeBudget::new(&stopwatch, 5_000);
        let config = DriverConfig::default();

        assert!(!enumerator.run(&config, &budget).feasible);
    }
}
