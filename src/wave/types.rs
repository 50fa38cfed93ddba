// Raw problem inputs and the candidate/solution types the driver produces.

use std::collections::HashMap;

/// A customer order: a sparse multiset of item quantities.
#[derive(Debug, Clone, Default)]
pub struct Order {
    pub demand: HashMap<u32, u32>,
}

impl Order {
    pub fn new(demand: HashMap<u32, u32>) -> Self {
        Self { demand }
    }
}

impl From<HashMap<u32, u32>> for Order {
    fn from(demand: HashMap<u32, u32>) -> Self {
        Self { demand }
    }
}

/// A corridor (aisle): a sparse multiset of item quantities available.
#[derive(Debug, Clone, Default)]
pub struct Corridor {
    pub supply: HashMap<u32, u32>,
}

impl Corridor {
    pub fn new(supply: HashMap<u32, u32>) -> Self {
        Self { supply }
    }
}

impl From<HashMap<u32, u32>> for Corridor {
    fn from(supply: HashMap<u32, u32>) -> Self {
        Self { supply }
    }
}

/// A candidate produced by one sub-solve: either an infeasible result, or a
/// selection of orders/corridors with its derived productivity ratio.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub orders: Vec<usize>,
    pub corridors: Vec<usize>,
    pub total_items: u64,
    pub ratio: f64,
    pub feasible: bool,
}

impl Candidate {
    /// The `SolutionTracker` sentinel: ratio below any feasible candidate's.
    pub fn sentinel() -> Self {
        Self {
            orders: Vec::new(),
            corridors: Vec::new(),
            total_items: 0,
            ratio: -1.0,
            feasible: false,
        }
    }

    /// A sub-solve that produced no usable incumbent (INFEASIBLE, UNBOUNDED,
    /// ERROR, or a timeout with no incumbent).
    pub fn infeasible() -> Self {
        Self {
            orders: Vec::new(),
            corridors: Vec::new(),
            total_items: 0,
            ratio: -1.0,
            feasible: false,
        }
    }

    pub fn feasible(orders: Vec<usize>, corridors: Vec<usize>, total_items: u64) -> Self {
        let k = corridors.len().max(1);
        let ratio = total_items as f64 / k as f64;
        Self {
            orders,
            corridors,
            total_items,
            ratio,
            feasible: true,
        }
    }
}

/// The final reported wave: a selection of orders/corridors, or the explicit
/// empty solution `(∅, ∅)` signalling that no feasible wave was found.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveSolution {
    pub orders: Vec<usize>,
    pub corridors: Vec<usize>,
    pub total_items: u64,
    pub ratio: f64,
}

impl WaveSolution {
    pub fn empty() -> Self {
        Self {
            orders: Vec::new(),
            corridors: Vec::new(),
            total_items: 0,
            ratio: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty() && self.corridors.is_empty()
    }
}

impl From<Candidate> for WaveSolution {
    fn from(candidate: Candidate) -> Self {
        if !candidate.feasible {
            return Self::empty();
        }
        Self {
            orders: candidate.orders,
            corridors: candidate.corridors,
            total_items: candidate.total_items,
            ratio: candidate.ratio,
        }
    }
}
