// Domain layer: Business logic and rules
pub mod domain;

// Solver adapters: Concrete implementations of SolverService
pub mod solver;

// Wave-picking driver: the fractional-optimization solve() entry point
pub mod wave;

// Re-export commonly used types
pub use domain::{
    Constraint, ConstraintType, ObjectiveFunction, OptimizationProblem, OptimizationType, Solution,
    SolutionStatus, SolverError, SolverService, Variable, VariableType,
};

pub use solver::{MicroLpSolver, SolverFactory};

pub use wave::{solve, solve_with_config, Candidate, Corridor, DriverConfig, DriverError, Order, WaveSolution};
