// Top-level entry point: selects between exhaustive fixed-k enumeration and
// the Dinkelbach loop, and turns the winning candidate into a WaveSolution.

use tracing::{info, warn};

use crate::domain::solver_service::SolverService;
use crate::solver::MicroLpSolver;

use super::config::DriverConfig;
use super::dinkelbach::DinkelbachDriver;
use super::enumerator::FixedKEnumerator;
use super::error::DriverError;
use super::index::ProblemIndex;
use super::time_budget::{Stopwatch, TimeBudget};
use super::tracker::SolutionTracker;
use super::types::{Corridor, Order, WaveSolution};

/// Solves one wave-picking instance: selects the subset of `orders` and
/// `corridors` maximizing `units picked / corridors used`, subject to the
/// wave-size bound `[l, u]` and per-item demand-vs-supply feasibility.
///
/// Never panics and never propagates a `DriverError` — an unsolved instance
/// is reported as the explicit empty solution, with the reason traced at
/// `warn` level.
pub fn solve(orders: &[Order], corridors: &[Corridor], n_items: usize, l: u32, u: u32) -> WaveSolution {
    solve_with_config(orders, corridors, n_items, l, u, &DriverConfig::from_env())
}

pub fn solve_with_config(
    orders: &[Order],
    corridors: &[Corridor],
    n_items: usize,
    l: u32,
    u: u32,
    config: &DriverConfig,
) -> WaveSolution {
    let stopwatch = Stopwatch::start();
    let budget = TimeBudget::new(&stopwatch, config.max_wall_clock_ms);

    let index = ProblemIndex::build(orders, corridors, n_items, l, u);
    info!(
        n_orders = index.n_orders,
        n_corridors = index.n_corridors,
        n_items = index.n_items,
        "starting wave-picking solve"
    );

    if index.n_orders == 0 || index.n_corridors == 0 {
        warn!("instance has no orders or no corridors; returning empty solution");
        return WaveSolution::empty();
    }

    let solver = MicroLpSolver::new();
    let tracker = SolutionTracker::new();

    let best = if index.n_corridors <= config.small_corridor_threshold {
        let enumerator = FixedKEnumerator::new(&index, &solver as &dyn SolverService, &tracker);
        enumerator.run(config, &budget)
    } else {
        let driver = DinkelbachDriver::new(&index, &solver as &dyn SolverService, &tracker);
        driver.run(config, &budget)
    };

    let incumbent = tracker.best();
    let winner = if incumbent.ratio >= best.ratio { incumbent } else { best };

    if !winner.feasible {
        warn!(error = %DriverError::InstanceInfeasible, "no feasible wave found");
        return WaveSolution::empty();
    }

    info!(
        ratio = winner.ratio,
        n_orders_selected = winner.orders.len(),
        n_corridors_selected = winner.corridors.len(),
        elapsed_ms = stopwatch.elapsed_ms(),
        "wave-picking solve finished"
    );
    winner.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn solves_a_small_feasible_instance() {
        let orders = vec![
            Order::new(HashMap::from([(0, 3), (1, 2)])),
            Order::new(HashMap::from([(0, 2)])),
        ];
        let corridors = vec![
            Corridor::new(HashMap::from([(0, 5)])),
            Corridor::new(HashMap::from([(1, 2)])),
        ];

        let solution = solve(&orders, &corridors, 2, 2, 10);
        assert!(!solution.is_empty());
        assert!(solution.ratio > 0.0);
    }

    #[test]
    fn empty_instance_yields_empty_solution() {
        let solution = solve(&[], &[], 0, 0, 0);
        assert!(solution.is_empty());
        assert_eq!(solution, WaveSolution::empty());
    }

    #[test]
    fn unreachable_wave_bounds_yield_empty_solution() {
        let orders = vec![Order::new(HashMap::from([(0, 1)]))];
        let corridors = vec![Corridor::new(HashMap::from([(0, 1)]))];
        let solution = solve(&orders, &corridors, 1, 100, 200);
        assert!(solution.is_empty());
    }
}
