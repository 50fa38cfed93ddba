// Error taxonomy for the wave-picking driver.
//
// No error escapes `solve()` — this enum exists for `tracing` event fields
// and internal control flow, not as a panic/bail path.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    /// Solver reported infeasibility, or a timeout with no incumbent.
    #[error("sub-solve infeasible: {0}")]
    InfeasibleSubsolve(String),

    /// Solver raised or returned a non-terminal status. Mapped to
    /// `InfeasibleSubsolve` by the caller; kept distinct here for logging.
    #[error("solver returned an abnormal status: {0}")]
    SolverAbnormal(String),

    /// Solver refused the provided warm start. Swallowed by the caller.
    #[error("warm start rejected: {0}")]
    WarmStartRejected(String),

    /// Global wall-clock budget exhausted.
    #[error("time budget exhausted")]
    DeadlineExceeded,

    /// All sub-solves exhausted with no feasible candidate.
    #[error("instance is infeasible: no feasible wave found")]
    InstanceInfeasible,
}
