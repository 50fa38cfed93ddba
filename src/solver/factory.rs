use crate::domain::{
    models::OptimizationProblem,
    solver_service::SolverService,
    value_objects::SolverBackend,
};
use crate::solver::MicroLpSolver;
use std::sync::Arc;

/// Factory for creating solver instances based on configuration.
///
/// Only one backend ships in this build (the pure-Rust `microlp` solver);
/// the factory still dispatches on `SolverBackend` so a second backend can
/// be added later without touching callers.
pub struct SolverFactory;

impl SolverFactory {
    /// Create a solver based on the problem configuration
    pub fn create_solver(problem: &OptimizationProblem) -> Arc<dyn SolverService> {
        Self::create_from_backend(problem.solver_config.backend)
    }

    /// Create a solver for a specific backend
    pub fn create_from_backend(backend: SolverBackend) -> Arc<dyn SolverService> {
        match backend {
            SolverBackend::Auto | SolverBackend::MicroLp => Arc::new(MicroLpSolver::new()),
        }
    }

    /// Get the default solver
    pub fn default_solver() -> Arc<dyn SolverService> {
        Arc::new(MicroLpSolver::new())
    }
}
