//! `VacatedSlots`: slots emptied by lifted pods, waiting for a pod to be
//! stored back.
//!
//! Every lifted pod leaves exactly one slot behind, so while a robot carries a
//! pod the pool is never empty.  Which slot the pod goes back to depends on the
//! [`StoragePolicy`]:
//!
//! - `Random`: uniform over the pool (randomized storage).
//! - `Nearest`: closest slot to the robot under the run's [`DistanceMetric`],
//!   found through an R-tree (via `rstar`) that mirrors the pool.  The tree
//!   ranks by straight-line distance, which never exceeds the Manhattan
//!   distance, so the scan stops once the straight-line bound passes the best
//!   metric distance seen.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use rmfs_core::{DistanceMetric, Point, SimRng, SlotId, StoragePolicy};

use crate::FreeSet;

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a slot position with its id.
#[derive(Clone, Debug, PartialEq)]
struct SlotEntry {
    point: [f64; 2],
    id:    SlotId,
}

impl RTreeObject for SlotEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for SlotEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── VacatedSlots ──────────────────────────────────────────────────────────────

pub struct VacatedSlots {
    policy: StoragePolicy,
    metric: DistanceMetric,
    set:    FreeSet<SlotId>,
    /// Only maintained under `StoragePolicy::Nearest`.
    tree:   Option<RTree<SlotEntry>>,
}

impl VacatedSlots {
    /// Empty pool.  `metric` decides what "nearest" means under
    /// `StoragePolicy::Nearest`.
    pub fn new(policy: StoragePolicy, metric: DistanceMetric) -> Self {
        let tree = match policy {
            StoragePolicy::Random => None,
            StoragePolicy::Nearest => Some(RTree::new()),
        };
        Self { policy, metric, set: FreeSet::new(), tree }
    }

    #[inline]
    pub fn policy(&self) -> StoragePolicy {
        self.policy
    }

    #[inline]
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Add a freshly vacated slot.  Returns `false` if it was already pooled.
    pub fn insert(&mut self, id: SlotId, pos: Point) -> bool {
        if !self.set.insert(id) {
            return false;
        }
        if let Some(tree) = &mut self.tree {
            tree.insert(SlotEntry { point: pos.to_array(), id });
        }
        true
    }

    /// Pick and remove the storage destination for a robot standing at `from`.
    pub fn take(&mut self, from: Point, rng: &mut SimRng) -> Option<SlotId> {
        match &mut self.tree {
            None => self.set.take_random(rng),
            Some(tree) => {
                let mut best: Option<(f64, &SlotEntry)> = None;
                for (entry, d2) in tree.nearest_neighbor_iter_with_distance_2(&from.to_array()) {
                    if best.is_some_and(|(d, _)| d2.sqrt() > d) {
                        break;
                    }
                    let d = self.metric.distance(from, Point::new(entry.point[0], entry.point[1]));
                    if best.is_none_or(|(b, _)| d < b) {
                        best = Some((d, entry));
                    }
                }
                let entry = best?.1.clone();
                tree.remove(&entry);
                self.set.remove(entry.id);
                Some(entry.id)
            }
        }
    }

    #[inline]
    pub fn contains(&self, id: SlotId) -> bool {
        self.set.contains(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.set.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.set.iter()
    }
}
