// A monotone remaining-time oracle shared across sub-solves.

use std::time::Instant;

/// A simple elapsed-time source. Decoupled from `TimeBudget` so tests can
/// construct a budget against a fixed starting point.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::start()
    }
}

/// Monotone oracle over a shared stopwatch: `remaining = max(0, DEADLINE -
/// elapsed)`. Safe to read concurrently — `Stopwatch::elapsed_ms` only reads
/// an `Instant`, no synchronization needed.
#[derive(Debug, Clone)]
pub struct TimeBudget<'a> {
    stopwatch: &'a Stopwatch,
    deadline_ms: u64,
}

impl<'a> TimeBudget<'a> {
    pub fn new(stopwatch: &'a Stopwatch, deadline_ms: u64) -> Self {
        Self {
            stopwatch,
            deadline_ms,
        }
    }

    pub fn remaining_ms(&self) -> u64 {
        self.deadline_ms.saturating_sub(self.stopwatch.elapsed_ms())
    }

    pub fn remaining_secs(&self) -> f64 {
        self.remaining_ms() as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn remaining_decreases_monotonically_and_floors_at_zero() {
        let sw = Stopwatch::start();
        let budget = TimeBudget::new(&sw, 20);
        let first = budget.remaining_ms();
        sleep(Duration::from_millis(40));
        let second = budget.remaining_ms();
        assert!(second <= first);
        assert_eq!(second, 0);
    }
}
