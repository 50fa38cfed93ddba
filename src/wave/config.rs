// Configuration knobs for the wave-picking driver.

use std::env;

/// Configuration knobs for the wave-picking driver. `from_env` overrides
/// the defaults from the named environment variables.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub max_wall_clock_ms: u64,
    pub small_corridor_threshold: usize,
    pub parallel_pool_size: usize,
    pub per_subsolve_time_small: f64,
    pub solver_threads: usize,
    pub max_dinkelbach_iters: u32,
    pub lp_iter_cap: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            max_wall_clock_ms: 10 * 60 * 1000 - 5000,
            small_corridor_threshold: 20,
            parallel_pool_size: 4,
            per_subsolve_time_small: 120.0,
            solver_threads: num_cpus::get().max(1),
            max_dinkelbach_iters: 50,
            lp_iter_cap: 50,
        }
    }
}

impl DriverConfig {
    /// Builds a config from spec defaults, overridden by environment
    /// variables when present and parseable.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(v) = read_env("MAX_WALL_CLOCK_MS") {
            config.max_wall_clock_ms = v;
        }
        if let Some(v) = read_env("SMALL_CORRIDOR_THRESHOLD") {
            config.small_corridor_threshold = v;
        }
        if let Some(v) = read_env("PARALLEL_POOL_SIZE") {
            config.parallel_pool_size = v;
        }
        if let Some(v) = read_env("PER_SUBSOLVE_TIME_SMALL") {
            config.per_subsolve_time_small = v;
        }
        if let Some(v) = read_env("SOLVER_THREADS") {
            config.solver_threads = v;
        }
        if let Some(v) = read_env("MAX_DINKELBACH_ITERS") {
            config.max_dinkelbach_iters = v;
        }
        if let Some(v) = read_env("LP_ITER_CAP") {
            config.lp_iter_cap = v;
        }

        config
    }
}

fn read_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|raw| raw.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let config = DriverConfig::default();
        assert_eq!(config.max_wall_clock_ms, 595_000);
        assert_eq!(config.small_corridor_threshold, 20);
        assert_eq!(config.parallel_pool_size, 4);
        assert_eq!(config.max_dinkelbach_iters, 50);
        assert_eq!(config.lp_iter_cap, 50);
    }
}
