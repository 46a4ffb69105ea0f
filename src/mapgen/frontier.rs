//! Per-player growth frontiers.
//!
//! A frontier is the set of unowned cells 4-adjacent to a player's
//! territory. It supports O(1) insert, remove, and uniform random choice.

use rustc_hash::FxHashMap;

use crate::core::GameRng;

/// Set of row-major cell indices with uniform sampling.
#[derive(Clone, Debug, Default)]
pub struct Frontier {
    items: Vec<usize>,
    slots: FxHashMap<usize, usize>,
}

impl Frontier {
    /// Create an empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cells in the frontier.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the player cannot grow.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `index` is in the frontier.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.slots.contains_key(&index)
    }

    /// Add a cell. Returns false if it was already present.
    pub fn insert(&mut self, index: usize) -> bool {
        if self.slots.contains_key(&index) {
            return false;
        }
        self.slots.insert(index, self.items.len());
        self.items.push(index);
        true
    }

    /// Remove a cell. Returns false if it was absent.
    pub fn remove(&mut self, index: usize) -> bool {
        let Some(slot) = self.slots.remove(&index) else {
            return false;
        };
        self.items.swap_remove(slot);
        if let Some(&moved) = self.items.get(slot) {
            self.slots.insert(moved, slot);
        }
        true
    }

    /// Pick a cell uniformly at random.
    pub fn choose(&self, rng: &mut GameRng) -> Option<usize> {
        rng.choose(&self.items).copied()
    }
}
