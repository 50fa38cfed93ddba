// The outer parametric loop for large corridor counts.
//
// Dinkelbach's method recasts `max units(S)/corridors(S)` as a sequence of
// linear sub-problems `max units(S) - lambda * corridors(S)`, updating
// `lambda` to the achieved ratio after each solve. The sequence is
// monotonically non-decreasing and converges in finitely many MIP solves
// since the ratio only takes finitely many rational values.

use crate::domain::solver_service::SolverService;

use super::config::DriverConfig;
use super::formulator::{MipFormulator, SubSolveParams, Variant, WarmStart};
use super::index::ProblemIndex;
use super::lp_warm_start::{fallback_lambda, LpWarmStart};
use super::time_budget::TimeBudget;
use super::tracker::SolutionTracker;
use super::types::Candidate;

const CONVERGENCE_EPS: f64 = 1e-6;

pub struct DinkelbachDriver<'a> {
    index: &'a ProblemIndex,
    solver: &'a dyn SolverService,
    tracker: &'a SolutionTracker,
}

impl<'a> DinkelbachDriver<'a> {
    pub fn new(index: &'a ProblemIndex, solver: &'a dyn SolverService, tracker: &'a SolutionTracker) -> Self {
        Self {
            index,
            solver,
            tracker,
        }
    }

    /// Runs the Dinkelbach loop to convergence, to `max_dinkelbach_iters`, or
    /// until fewer than 2 seconds of budget remain — whichever comes first.
    /// Returns the best feasible candidate it produced (its own best,
    /// independent of what other components may have already offered the
    /// shared tracker).
    pub fn run(&self, config: &DriverConfig, budget: &TimeBudget<'_>) -> Candidate {
        let (mut lambda, mut warm_start) = self.initial_seed(config, budget);
        let mut best = Candidate::infeasible();

        for _ in 0..config.max_dinkelbach_iters {
            if budget.remaining_ms() < 2000 {
                break;
            }
            let time_limit = budget.remaining_secs().min(config.per_subsolve_time_small);

            let mut params = SubSolveParams::new(time_limit).with_threads(config.solver_threads);
            if let Some(ws) = warm_start.take() {
                params = params.with_warm_start(ws);
            }

            let candidate = MipFormulator::solve(self.index, Variant::Dinkelbach(lambda), &params, self.solver);
            if !candidate.feasible {
                break;
            }

            self.tracker.offer(candidate.clone());
            if candidate.ratio > best.ratio {
                best = candidate.clone();
            }

            if candidate.corridors.is_empty() {
                break;
            }
            let next_lambda = candidate.ratio;
            warm_start = Some(WarmStart::from_candidate(self.index, &candidate));
            let converged = (next_lambda - lambda).abs() < CONVERGENCE_EPS;
            lambda = next_lambda;
            if converged {
                break;
            }
        }

        best
    }

    /// Seeds `(lambda, warmStart)` from the LP relaxation's own Dinkelbach
    /// recurrence, falling back to a deterministic pseudo-random lambda and
    /// no warm start when that recurrence cannot produce a finite seed.
    fn initial_seed(&self, config: &DriverConfig, budget: &TimeBudget<'_>) -> (f64, Option<WarmStart>) {
        let mut lp = LpWarmStart::build(self.index);
        match lp.run(budget, config.lp_iter_cap) {
            Some((lambda, x, y)) if lambda.is_finite() => (lambda, Some(WarmStart { x, y })),
            _ => (fallback_lambda(self.index), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::MicroLpSolver;
    use crate::wave::types::{Corridor, Order};
    use std::collections::HashMap;

    #[test]
    fn converges_to_a_feasible_candidate() {
        let orders = vec![
            Order::new(HashMap::from([(0, 4)])),
            Order::new(HashMap::from([(0, 6)])),
        ];
        let corridors = vec![Corridor::new(HashMap::from([(0, 10)]))];
        let index = ProblemIndex::build(&orders, &corridors, 1, 1, 10);

        let solver = MicroLpSolver::new();
        let tracker = SolutionTracker::new();
        let driver = DinkelbachDriver::new(&index, &solver, &tracker);

        let stopwatch = super::super::time_budget::Stopwatch::start();
        let budget = TimeBudget::new(&stopwatch, 5_000);
        let config = DriverConfig::default();

        let best = driver.run(&config, &budget);
        assert!(best.feasible);
        assert!(best.ratio > 0.0);
    }

    #[test]
    fn refuses_to_start_a_new_subsolve_under_two_seconds_remaining() {
        let orders = vec![Order::new(HashMap::from([(0, 4)]))];
        let corridors = vec![Corridor::new(HashMap::from([(0, 10)]))];
        let index = ProblemIndex::build(&orders, &corridors, 1, 1, 10);

        let solver = MicroLpSolver::new();
        let tracker = SolutionTracker::new();
        let driver = DinkelbachDriver::new(&index, &solver, &tracker);

        let stopwatch = super::super::time_budget::Stopwatch::start();
        let budget = TimeBudget::new(&stopwatch, 1_500);
        let config = DriverConfig::default();

        let best = driver.run(&config, &budget);
        assert!(!best.feasible);
    }

    #[test]
    fn initial_seed_carries_the_lp_point_as_a_warm_start() {
        let orders = vec![
            Order::new(HashMap::from([(0, 4)])),
            Order::new(HashMap::from([(0, 6)])),
        ];
        let corridors = vec![Corridor::new(HashMap::from([(0, 10)]))];
        let index = ProblemIndex::build(&orders, &corridors, 1, 1, 10);

        let solver = MicroLpSolver::new();
        let tracker = SolutionTracker::new();
        let driver = DinkelbachDriver::new(&index, &solver, &tracker);

        let stopwatch = super::super::time_budget::Stopwatch::start();
        let budget = TimeBudget::new(&stopwatch, 5_000);
        let config = DriverConfig::default();

        let (lambda, warm_start) = driver.initial_seed(&config, &budget);
        assert!(lambda.is_finite());
        let ws = warm_start.expect("LP relaxation should seed a warm start");
        assert_eq!(ws.x.len(), 2);
        assert_eq!(ws.y.len(), 1);
    }
}
