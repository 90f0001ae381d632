//! `QueuedOrders`: orders that arrived while no robot or pod was available.
//!
//! # Layout
//!
//! One FIFO per item type plus the set of item types with a non-empty FIFO.
//! Order ids grow with arrival time, so the front of each FIFO is that
//! type's oldest order, and "first queued order whose item type has a free
//! pod" is the smallest front id among the eligible types.  A lookup costs
//! O(waiting item types) instead of a scan over every queued order.

use std::collections::{BTreeSet, VecDeque};

use rmfs_core::{ItemType, OrderId};

#[derive(Clone, Debug)]
pub struct QueuedOrders {
    by_item: Vec<VecDeque<OrderId>>,
    waiting: BTreeSet<ItemType>,
    len:     usize,
}

impl QueuedOrders {
    pub fn new(item_types: u16) -> Self {
        Self {
            by_item: vec![VecDeque::new(); item_types as usize],
            waiting: BTreeSet::new(),
            len:     0,
        }
    }

    /// Append an order.  Orders must be pushed in arrival order.
    pub fn push(&mut self, order: OrderId, item: ItemType) {
        let fifo = &mut self.by_item[item.index()];
        debug_assert!(fifo.back().is_none_or(|&last| last < order), "orders pushed out of arrival order");
        fifo.push_back(order);
        self.waiting.insert(item);
        self.len += 1;
    }

    /// Remove and return the earliest-arrived order whose item type passes
    /// `eligible`.
    pub fn pop_first_where(&mut self, mut eligible: impl FnMut(ItemType) -> bool) -> Option<(OrderId, ItemType)> {
        let (order, item) = self
            .waiting
            .iter()
            .filter(|&&item| eligible(item))
            .filter_map(|&item| self.by_item[item.index()].front().map(|&o| (o, item)))
            .min()?;

        let fifo = &mut self.by_item[item.index()];
        fifo.pop_front();
        if fifo.is_empty() {
            self.waiting.remove(&item);
        }
        self.len -= 1;
        Some((order, item))
    }

    /// Queued orders for one item type, oldest first.
    pub fn for_item(&self, item: ItemType) -> impl Iterator<Item = OrderId> + '_ {
        self.by_item[item.index()].iter().copied()
    }

    /// Every queued order, in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = OrderId> {
        let mut all: Vec<OrderId> = self.by_item.iter().flatten().copied().collect();
        all.sort_unstable();
        all.into_iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
