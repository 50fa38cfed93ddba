// Assembles the three wave-picking MIP variants over the generic LP/MIP
// domain model and dispatches them through `SolverService`.

use crate::domain::{
    Constraint, ConstraintType, ObjectiveFunction, OptimizationProblem, OptimizationType,
    SolverConfig, SolverService, Variable,
};
use crate::domain::value_objects::MipEmphasis;

use super::index::ProblemIndex;
use super::types::Candidate;

/// Which of the three MIP variants to build.
#[derive(Debug, Clone, Copy)]
pub enum Variant {
    /// `Σ_c y_c = k`; objective `maximize Σ units·x`.
    FixedK(u32),
    /// No corridor-count constraint; objective `maximize Σ units·x − λ·Σ y`.
    Dinkelbach(f64),
    /// Same as `Dinkelbach` but variables are continuous on `[0, 1]`.
    LpRelax(f64),
}

impl Variant {
    fn is_relaxed(self) -> bool {
        matches!(self, Variant::LpRelax(_))
    }
}

/// A prior variable assignment offered to the solver as a starting
/// incumbent. Non-binding — the solver may ignore it silently.
#[derive(Debug, Clone)]
pub struct WarmStart {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl WarmStart {
    pub fn from_candidate(index: &ProblemIndex, candidate: &Candidate) -> Self {
        let mut x = vec![0.0; index.n_orders];
        for &o in &candidate.orders {
            x[o] = 1.0;
        }
        let mut y = vec![0.0; index.n_corridors];
        for &c in &candidate.corridors {
            y[c] = 1.0;
        }
        Self { x, y }
    }
}

/// Per-sub-solve parameters.
#[derive(Debug, Clone)]
pub struct SubSolveParams {
    pub time_limit_sec: f64,
    pub threads: Option<usize>,
    pub mip_emphasis: Option<MipEmphasis>,
    pub warm_start: Option<WarmStart>,
}

impl SubSolveParams {
    pub fn new(time_limit_sec: f64) -> Self {
        Self {
            time_limit_sec,
            threads: None,
            mip_emphasis: None,
            warm_start: None,
        }
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn with_warm_start(mut self, warm_start: WarmStart) -> Self {
        self.warm_start = Some(warm_start);
        self
    }
}

pub struct MipFormulator;

impl MipFormulator {
    /// Builds the generic `OptimizationProblem` for one variant over the
    /// shared index. Variables are ordered `[x_0..x_{O-1}, y_0..y_{C-1}]`.
    pub fn build(index: &ProblemIndex, variant: Variant, params: &SubSolveParams) -> OptimizationProblem {
        let n_orders = index.n_orders;
        let n_corridors = index.n_corridors;
        let n_vars = n_orders + n_corridors;

        let mut variables = Vec::with_capacity(n_vars);
        for o in 0..n_orders {
            let mut var = if variant.is_relaxed() {
                Variable::continuous(format!("x{o}")).with_bounds(0.0, Some(1.0))
            } else {
                Variable::binary(format!("x{o}"))
            };
            if let Some(ws) = &params.warm_start {
                var = var.with_initial(warm_start_value(ws.x[o], variant));
            }
            variables.push(var);
        }
        for c in 0..n_corridors {
            let mut var = if variant.is_relaxed() {
                Variable::continuous(format!("y{c}")).with_bounds(0.0, Some(1.0))
            } else {
                Variable::binary(format!("y{c}"))
            };
            if let Some(ws) = &params.warm_start {
                var = var.with_initial(warm_start_value(ws.y[c], variant));
            }
            variables.push(var);
        }

        let mut coefficients = vec![0.0; n_vars];
        for (o, &units) in index.units_per_order.iter().enumerate() {
            coefficients[o] = units as f64;
        }
        if let Variant::Dinkelbach(lambda) | Variant::LpRelax(lambda) = variant {
            for c in 0..n_corridors {
                coefficients[n_orders + c] = -lambda;
            }
        }
        let objective = ObjectiveFunction::new(OptimizationType::Maximize, coefficients);

        let mut constraints = Vec::new();

        // Wave size: L <= sum(units * x_o) <= U
        let mut wave_coeffs = vec![0.0; n_vars];
        for (o, &units) in index.units_per_order.iter().enumerate() {
            wave_coeffs[o] = units as f64;
        }
        constraints.push(Constraint::new(
            ConstraintType::GreaterThanOrEqual,
            wave_coeffs.clone(),
            index.l as f64,
        ));
        constraints.push(Constraint::new(
            ConstraintType::LessThanOrEqual,
            wave_coeffs,
            index.u as f64,
        ));

        // Item balance: one constraint per item with nonempty demand.
        for item in 0..index.n_items {
            let orders = &index.orders_with_item[item];
            if orders.is_empty() {
                continue;
            }
            let mut coeffs = vec![0.0; n_vars];
            for &o in orders {
                let demand = lookup_qty(&index.order_items[o as usize], item as u32);
                coeffs[o as usize] = demand as f64;
            }
            for &c in &index.corridors_with_item[item] {
                let supply = lookup_qty(&index.corridor_items[c as usize], item as u32);
                coeffs[n_orders + c as usize] -= supply as f64;
            }
            constraints.push(Constraint::new(ConstraintType::LessThanOrEqual, coeffs, 0.0));
        }

        // FIXED_K: sum(y_c) = k
        if let Variant::FixedK(k) = variant {
            let mut coeffs = vec![0.0; n_vars];
            for c in 0..n_corridors {
                coeffs[n_orders + c] = 1.0;
            }
            constraints.push(Constraint::new(ConstraintType::Equal, coeffs, k as f64));
        }

        let mut solver_config = SolverConfig {
            time_limit: Some(params.time_limit_sec),
            threads: params.threads,
            mip_emphasis: params.mip_emphasis,
            ..SolverConfig::default()
        };
        solver_config.verbose = false;

        OptimizationProblem {
            name: "wave-picking".to_string(),
            description: String::new(),
            objective,
            constraints,
            variables,
            solver_config,
        }
    }

    /// Builds and solves one sub-solve, extracting a `Candidate` from the
    /// result. Warm-start rejection and solver errors are both mapped to an
    /// infeasible candidate — they never propagate.
    pub fn solve(
        index: &ProblemIndex,
        variant: Variant,
        params: &SubSolveParams,
        solver: &dyn SolverService,
    ) -> Candidate {
        let problem = Self::build(index, variant, params);
        let solution = match solver.solve(&problem) {
            Ok(sol) => sol,
            Err(_) => return Candidate::infeasible(),
        };

        use crate::domain::value_objects::SolutionStatus;
        match solution.status {
            SolutionStatus::Optimal | SolutionStatus::Feasible | SolutionStatus::TimeLimit => {}
            _ => return Candidate::infeasible(),
        }
        if solution.variable_values.is_empty() {
            return Candidate::infeasible();
        }

        let n_orders = index.n_orders;
        let mut orders = Vec::new();
        for o in 0..n_orders {
            if solution.variable_values[o] > 0.5 {
                orders.push(o);
            }
        }
        let mut corridors = Vec::new();
        for c in 0..index.n_corridors {
            if solution.variable_values[n_orders + c] > 0.5 {
                corridors.push(c);
            }
        }

        let total_items: u64 = orders.iter().map(|&o| index.units_per_order[o]).sum();
        Candidate::feasible(orders, corridors, total_items)
    }
}

/// Binary warm starts round fractional assignments to {0, 1} (values > 0.5
/// are interpreted as 1); LP relaxations keep them as-is.
fn warm_start_value(v: f64, variant: Variant) -> f64 {
    if variant.is_relaxed() {
        v
    } else if v > 0.5 {
        1.0
    } else {
        0.0
    }
}

fn lookup_qty(items: &[(u32, u32)], item: u32) -> u32 {
    items
        .binary_search_by_key(&item, |&(i, _)| i)
        .map(|idx| items[idx].1)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::MicroLpSolver;
    use crate::wave::types::{Corridor, Order};
    use std::collections::HashMap;

    #[test]
    fn fixed_k_solves_trivial_instance() {
        let orders = vec![Order::new(HashMap::from([(0, 3)]))];
        let corridors = vec![Corridor::new(HashMap::from([(0, 5)]))];
        let index = ProblemIndex::build(&orders, &corridors, 1, 1, 10);

        let params = SubSolveParams::new(5.0);
        let solver = MicroLpSolver::new();
        let candidate = MipFormulator::solve(&index, Variant::FixedK(1), &params, &solver);

        assert!(candidate.feasible);
        assert_eq!(candidate.orders, vec![0]);
        assert_eq!(candidate.corridors, vec![0]);
        assert_eq!(candidate.total_items, 3);
    }

    #[test]
    fn wave_lower_bound_makes_instance_infeasible() {
        let orders = vec![Order::new(HashMap::from([(0, 1)]))];
        let corridors = vec![Corridor::new(HashMap::from([(0, 10)]))];
        let index = ProblemIndex::build(&orders, &corridors, 1, 5, 10);

        let params = SubSolveParams::new(5.0);
        let solver = MicroLpSolver::new();
        let candidate = MipFormulator::solve(&index, Variant::FixedK(1), &params, &solver);

        assert!(!candidate.feasible);
    }
}
