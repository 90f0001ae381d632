//! `EventQueue`: the pending-event set of a run.
//!
//! # Ordering contract
//!
//! [`pop`](EventQueue::pop) always returns the event with the smallest time.
//! Events with equal times come out in the order they were pushed: every push
//! is stamped with a monotonically increasing sequence number and the heap is
//! keyed by `(time, seq)`.  Handlers rely on this FIFO tie-break, so replaying
//! a seed reproduces the exact same event trace.
//!
//! # Performance note
//!
//! `BinaryHeap` gives O(log n) push and pop where n is the number of pending
//! events.  In steady state n is about one event per busy robot plus the next
//! order arrival, so the heap stays tiny even for week-long runs.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rmfs_core::SimTime;

use crate::{Event, EventKind};

/// An event plus its insertion stamp.
#[derive(Debug)]
struct Scheduled {
    seq:   u64,
    event: Event,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.event.time == other.event.time && self.seq == other.seq
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want the earliest first.
        other
            .event
            .time
            .cmp(&self.event.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A min-priority queue of events keyed by `(time, insertion order)`.
#[derive(Default)]
pub struct EventQueue {
    heap:     BinaryHeap<Scheduled>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to happen at `time`.
    pub fn push(&mut self, time: SimTime, kind: EventKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Scheduled { seq, event: Event::new(time, kind) });
    }

    /// Remove and return the earliest event (FIFO among equal times).
    pub fn pop(&mut self) -> Option<Event> {
        self.heap.pop().map(|s| s.event)
    }

    /// The earliest pending event without removing it.
    pub fn peek(&self) -> Option<&Event> {
        self.heap.peek().map(|s| &s.event)
    }

    /// Time of the earliest pending event, or `None` if empty.
    pub fn next_time(&self) -> Option<SimTime> {
        self.peek().map(|e| e.time)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total number of events ever pushed.
    pub fn pushed(&self) -> u64 {
        self.next_seq
    }

    /// Iterate pending events in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Event> + '_ {
        self.heap.iter().map(|s| &s.event)
    }
}
