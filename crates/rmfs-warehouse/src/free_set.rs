//! `FreeSet`: a dense indexed set with O(1) insert, remove, and uniform
//! random choice.
//!
//! Members live in a packed `Vec`; an `FxHashMap` maps each member to its
//! slot in that `Vec`, so memory follows the member count rather than the id
//! range.  Removal swaps the last member into the hole.  Iteration order is
//! therefore an implementation detail, but it is a deterministic function of
//! the insert/remove history, which is all that reproducible sampling needs.

use std::collections::hash_map::Entry;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use rmfs_core::SimRng;

#[derive(Clone, Debug)]
pub struct FreeSet<I> {
    members:  Vec<I>,
    position: FxHashMap<I, usize>,
}

impl<I: Copy + Eq + Hash> Default for FreeSet<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Copy + Eq + Hash> FreeSet<I> {
    pub fn new() -> Self {
        Self { members: Vec::new(), position: FxHashMap::default() }
    }

    /// Empty set with room for `capacity` members.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut position = FxHashMap::default();
        position.reserve(capacity);
        Self { members: Vec::with_capacity(capacity), position }
    }

    /// Insert `id`; returns `false` if it was already present.
    pub fn insert(&mut self, id: I) -> bool {
        match self.position.entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(self.members.len());
                self.members.push(id);
                true
            }
        }
    }

    /// Remove `id`; returns `false` if it was absent.
    pub fn remove(&mut self, id: I) -> bool {
        let Some(pos) = self.position.remove(&id) else {
            return false;
        };
        self.members.swap_remove(pos);
        if let Some(&moved) = self.members.get(pos) {
            self.position.insert(moved, pos);
        }
        true
    }

    #[inline]
    pub fn contains(&self, id: I) -> bool {
        self.position.contains_key(&id)
    }

    /// Uniformly random member, or `None` if empty.
    pub fn choose(&self, rng: &mut SimRng) -> Option<I> {
        rng.choose_index(self.members.len()).map(|i| self.members[i])
    }

    /// Remove and return a uniformly random member.
    pub fn take_random(&mut self, rng: &mut SimRng) -> Option<I> {
        let id = self.choose(rng)?;
        self.remove(id);
        Some(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = I> + '_ {
        self.members.iter().copied()
    }
}
