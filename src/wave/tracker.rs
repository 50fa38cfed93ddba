// Best-feasible-candidate tracker under concurrent updates. The sole
// mutable shared state during a solve().

use std::sync::Mutex;

use super::types::Candidate;

pub struct SolutionTracker {
    best: Mutex<Candidate>,
}

impl SolutionTracker {
    pub fn new() -> Self {
        Self {
            best: Mutex::new(Candidate::sentinel()),
        }
    }

    /// Atomically replaces the incumbent iff `candidate.feasible &&
    /// candidate.ratio > incumbent.ratio` (strict; ties keep the incumbent).
    pub fn offer(&self, candidate: Candidate) {
        if !candidate.feasible {
            return;
        }
        let mut best = self.best.lock().expect("solution tracker mutex poisoned");
        if candidate.ratio > best.ratio {
            *best = candidate;
        }
    }

    /// Terminal read: either the best feasible candidate found, or the
    /// sentinel (which callers convert to the explicit empty solution).
    pub fn best(&self) -> Candidate {
        self.best.lock().expect("solution tracker mutex poisoned").clone()
    }
}

impl Default for SolutionTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_strictly_better_ratio_only() {
        let tracker = SolutionTracker::new();
        tracker.offer(Candidate::feasible(vec![0], vec![0], 10));
        tracker.offer(Candidate::feasible(vec![1], vec![0, 1], 10)); // ratio 5 < 10
        assert_eq!(tracker.best().orders, vec![0]);

        tracker.offer(Candidate::feasible(vec![0, 1], vec![0], 20)); // ratio 20 > 10
        assert_eq!(tracker.best().orders, vec![0, 1]);
    }

    #[test]
    fn ignores_infeasible_offers() {
        let tracker = SolutionTracker::new();
        tracker.offer(Candidate::infeasible());
        assert!(!tracker.best().feasible);
    }

    #[test]
    fn concurrent_offers_keep_the_global_best() {
        use std::sync::Arc;
        use std::thread;

        let tracker = Arc::new(SolutionTracker::new());
        let mut handles = Vec::new();
        for i in 1..=50u64 {
            let tracker = tracker.clone();
            handles.push(thread::spawn(move || {
                tracker.offer(Candidate::feasible(vec![0], vec![0], i));
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(tracker.best().total_items, 50);
    }
}
