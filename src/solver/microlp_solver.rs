use crate::domain::{
    models::{OptimizationProblem, Solution as DomainSolution, SolverStatistics},
    solver_service::{Result, SolverError, SolverService},
    value_objects::{ConstraintType, OptimizationType, SolutionStatus as DomainSolutionStatus, VariableType},
};
use microlp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem, StopReason, Variable as MicroLpVariable};
use std::time::{Duration, Instant};

/// A pure-Rust branch-and-bound MIP solver (no native toolchain dependency).
pub struct MicroLpSolver;

impl MicroLpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MicroLpSolver {
    fn default() -> Self {
        Self::new()
    }
}

const INTEGER_BOUND_CAP: f64 = 1_000_000_000.0;

impl SolverService for MicroLpSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<DomainSolution> {
        self.validate(problem)?;

        let start_time = Instant::now();
        let num_vars = problem.num_variables();

        let num_integer = problem
            .variables
            .iter()
            .filter(|v| matches!(v.variable_type, VariableType::Integer))
            .count() as u32;
        let num_binary = problem
            .variables
            .iter()
            .filter(|v| matches!(v.variable_type, VariableType::Binary))
            .count() as u32;

        let direction = match problem.objective.optimization_type {
            OptimizationType::Maximize => OptimizationDirection::Maximize,
            OptimizationType::Minimize => OptimizationDirection::Minimize,
        };
        let mut model = Problem::new(direction);

        let mut lp_variables: Vec<MicroLpVariable> = Vec::with_capacity(num_vars);
        for (i, var_def) in problem.variables.iter().enumerate() {
            let coeff = problem.objective.coefficients.get(i).copied().unwrap_or(0.0);
            let lower = var_def.lower_bound;
            let upper = var_def.upper_bound.unwrap_or(INTEGER_BOUND_CAP);
            let lp_var = match var_def.variable_type {
                VariableType::Binary => model.add_binary_var(coeff),
                VariableType::Integer => {
                    model.add_integer_var(coeff, (lower as i32, upper as i32))
                }
                VariableType::Continuous => model.add_var(coeff, (lower, upper)),
            };
            lp_variables.push(lp_var);
        }
        if problem.variables.is_empty() {
            for i in 0..num_vars {
                let coeff = problem.objective.coefficients.get(i).copied().unwrap_or(0.0);
                lp_variables.push(model.add_var(coeff, (0.0, f64::INFINITY)));
            }
        }

        for constraint in &problem.constraints {
            let mut expr = LinearExpr::empty();
            for (i, &coeff) in constraint.coefficients.iter().enumerate() {
                if coeff != 0.0 {
                    expr.add(lp_variables[i], coeff);
                }
            }
            let op = match constraint.constraint_type {
                ConstraintType::LessThanOrEqual => ComparisonOp::Le,
                ConstraintType::Equal => ComparisonOp::Eq,
                ConstraintType::GreaterThanOrEqual => ComparisonOp::Ge,
            };
            model.add_constraint(expr, op, constraint.bound);
        }

        if let Some(limit) = problem.solver_config.time_limit {
            model.set_time_limit(Duration::from_secs_f64(limit.max(0.0)));
        }

        let solve_result = model.solve();
        let solve_time = start_time.elapsed().as_secs_f64() * 1000.0;

        let statistics = SolverStatistics {
            simplex_iterations: 0,
            nodes_explored: 0,
            solve_time_ms: solve_time,
            num_variables: num_vars as u32,
            num_constraints: problem.constraints.len() as u32,
            num_integer_vars: num_integer,
            num_binary_vars: num_binary,
        };

        match solve_result {
            Ok(solution) => {
                let variable_values: Vec<f64> = lp_variables.iter().map(|&v| solution.var_value(v)).collect();
                let mut actual_obj = 0.0;
                for (i, &coeff) in problem.objective.coefficients.iter().enumerate() {
                    actual_obj += coeff * variable_values[i];
                }

                let (status, message) = match solution.stop_reason() {
                    StopReason::Finished => (
                        DomainSolutionStatus::Optimal,
                        format!("Optimal solution found for '{}'", problem.name),
                    ),
                    StopReason::Limit => (
                        DomainSolutionStatus::TimeLimit,
                        format!("Time limit reached for '{}', incumbent returned", problem.name),
                    ),
                };

                let mut domain_solution = DomainSolution::new(status, message);
                domain_solution.optimal_value = Some(actual_obj);
                domain_solution.variable_values = variable_values;
                domain_solution.statistics = statistics;
                Ok(domain_solution)
            }
            Err(microlp::Error::Infeasible) => {
                let mut domain_solution = DomainSolution::new(
                    DomainSolutionStatus::Infeasible,
                    "Problem is infeasible: no solution satisfies all constraints",
                );
                domain_solution.statistics = statistics;
                Ok(domain_solution)
            }
            Err(microlp::Error::Unbounded) => {
                let mut domain_solution = DomainSolution::new(
                    DomainSolutionStatus::Unbounded,
                    "Problem is unbounded: objective can be improved infinitely",
                );
                domain_solution.statistics = statistics;
                Ok(domain_solution)
            }
            Err(e @ microlp::Error::InternalError(_)) => {
                Err(SolverError::ExecutionFailed(format!("{:?}", e)))
            }
        }
    }

    fn name(&self) -> &str {
        "microlp"
    }

    fn supports_mip(&self) -> bool {
        true
    }
}
