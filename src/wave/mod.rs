// Wave-picking driver: maximizes units picked per corridor used subject to
// a wave-size bound and per-item demand/supply feasibility.

pub mod config;
pub mod dinkelbach;
pub mod driver;
pub mod enumerator;
pub mod error;
pub mod formulator;
pub mod index;
pub mod lp_warm_start;
pub mod time_budget;
pub mod tracker;
pub mod types;

pub use config::DriverConfig;
pub use driver::{solve, solve_with_config};
pub use error::DriverError;
pub use types::{Candidate, Corridor, Order, WaveSolution};
