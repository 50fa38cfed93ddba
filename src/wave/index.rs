// Immutable sparse projection of orders/corridors over a shared item space.

use super::types::{Corridor, Order};

/// Sparse, read-only view over an instance built once at solver construction
/// and shared by every sub-solve.
#[derive(Debug)]
pub struct ProblemIndex {
    pub n_orders: usize,
    pub n_corridors: usize,
    pub n_items: usize,
    pub l: u32,
    pub u: u32,

    /// `units_per_order[o] = sum_i demand[o][i]`.
    pub units_per_order: Vec<u64>,
    /// Per-order sparse (item, qty) pairs.
    pub order_items: Vec<Vec<(u32, u32)>>,
    /// Per-corridor sparse (item, qty) pairs.
    pub corridor_items: Vec<Vec<(u32, u32)>>,
    /// `orders_with_item[i]`: orders with nonzero demand for item `i`.
    pub orders_with_item: Vec<Vec<u32>>,
    /// `corridors_with_item[i]`: corridors with nonzero supply for item `i`.
    pub corridors_with_item: Vec<Vec<u32>>,
}

impl ProblemIndex {
    pub fn build(orders: &[Order], corridors: &[Corridor], n_items: usize, l: u32, u: u32) -> Self {
        let n_orders = orders.len();
        let n_corridors = corridors.len();

        let mut units_per_order = vec![0u64; n_orders];
        let mut order_items = vec![Vec::new(); n_orders];
        let mut orders_with_item = vec![Vec::new(); n_items];

        for (o, order) in orders.iter().enumerate() {
            let mut items: Vec<(u32, u32)> = order
                .demand
                .iter()
                .filter(|(_, &qty)| qty > 0)
                .map(|(&item, &qty)| (item, qty))
                .collect();
            items.sort_unstable_by_key(|&(item, _)| item);
            units_per_order[o] = items.iter().map(|&(_, qty)| qty as u64).sum();
            for &(item, _) in &items {
                if (item as usize) < n_items {
                    orders_with_item[item as usize].push(o as u32);
                }
            }
            order_items[o] = items;
        }

        let mut corridor_items = vec![Vec::new(); n_corridors];
        let mut corridors_with_item = vec![Vec::new(); n_items];

        for (c, corridor) in corridors.iter().enumerate() {
            let mut items: Vec<(u32, u32)> = corridor
                .supply
                .iter()
                .filter(|(_, &qty)| qty > 0)
                .map(|(&item, &qty)| (item, qty))
                .collect();
            items.sort_unstable_by_key(|&(item, _)| item);
            for &(item, _) in &items {
                if (item as usize) < n_items {
                    corridors_with_item[item as usize].push(c as u32);
                }
            }
            corridor_items[c] = items;
        }

        Self {
            n_orders,
            n_corridors,
            n_items,
            l,
            u,
            units_per_order,
            order_items,
            corridor_items,
            orders_with_item,
            corridors_with_item,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn builds_consistent_indices() {
        let orders = vec![Order::new(HashMap::from([(0, 2), (1, 3)]))];
        let corridors = vec![Corridor::new(HashMap::from([(0, 2), (1, 3)]))];
        let idx = ProblemIndex::build(&orders, &corridors, 2, 1, 10);

        assert_eq!(idx.units_per_order, vec![5]);
        assert_eq!(idx.orders_with_item[0], vec![0]);
        assert_eq!(idx.orders_with_item[1], vec![0]);
        assert_eq!(idx.corridors_with_item[0], vec![0]);
        assert_eq!(idx.corridors_with_item[1], vec![0]);
    }

    #[test]
    fn ignores_items_beyond_declared_count() {
        let orders = vec![Order::new(HashMap::from([(5, 2)]))];
        let idx = ProblemIndex::build(&orders, &[], 1, 0, 10);
        assert!(idx.orders_with_item.iter().all(|v| v.is_empty()));
        assert_eq!(idx.units_per_order, vec![2]);
    }

    #[test]
    fn empty_instance_is_valid() {
        let idx = ProblemIndex::build(&[], &[], 0, 0, 0);
        assert_eq!(idx.n_orders, 0);
        assert_eq!(idx.n_corridors, 0);
    }
}
