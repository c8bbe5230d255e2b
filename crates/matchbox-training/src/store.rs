use std::collections::{HashMap, hash_map::Entry};

use matchbox_engine::{Board, BoardIndex};

use crate::weights::WeightVector;

/// Initial bead count for each empty cell of a freshly created matchbox.
pub const DEFAULT_INITIAL_WEIGHT: u32 = 1;

/// Table of matchboxes keyed by board index.
///
/// Boxes are created lazily: the first [`WeightStore::lookup`] of an index
/// inserts [`WeightVector::default_for`] the decoded board. Entries are only
/// removed by [`WeightStore::reset`].
///
/// # Example
///
/// ```
/// use matchbox_engine::Board;
/// use matchbox_training::WeightStore;
///
/// let mut store = WeightStore::new();
/// let weights = *store.lookup(Board::EMPTY.index());
/// assert_eq!(weights.total(), 9);
/// assert_eq!(store.len(), 1);
///
/// store.reset();
/// assert!(store.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct WeightStore {
    boxes: HashMap<BoardIndex, WeightVector>,
    initial_weight: u32,
}

impl Default for WeightStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WeightStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_initial_weight(DEFAULT_INITIAL_WEIGHT)
    }

    /// Creates an empty store whose new boxes hold `initial_weight` beads per empty cell.
    ///
    /// # Panics
    ///
    /// Panics if `initial_weight` is zero.
    #[must_use]
    pub fn with_initial_weight(initial_weight: u32) -> Self {
        assert!(initial_weight > 0, "initial weight must be positive");
        Self {
            boxes: HashMap::new(),
            initial_weight,
        }
    }

    #[must_use]
    pub fn initial_weight(&self) -> u32 {
        self.initial_weight
    }

    /// Returns the box for `index`, creating the default box on first access.
    pub fn lookup(&mut self, index: BoardIndex) -> &mut WeightVector {
        match self.boxes.entry(index) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let board = Board::from_index(index);
                let weights = WeightVector::default_for(&board, self.initial_weight);
                log::trace!("new matchbox for index {index}: {weights:?}");
                entry.insert(weights)
            }
        }
    }

    /// Returns the box for `index` without creating it.
    #[must_use]
    pub fn get(&self, index: BoardIndex) -> Option<&WeightVector> {
        self.boxes.get(&index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Iterates over all boxes in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (BoardIndex, &WeightVector)> {
        let mut entries: Vec<_> = self.boxes.iter().map(|(&i, w)| (i, w)).collect();
        entries.sort_unstable_by_key(|(i, _)| *i);
        entries.into_iter()
    }

    /// Removes every box.
    pub fn reset(&mut self) {
        self.boxes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(s: &str) -> BoardIndex {
        s.parse::<Board>().unwrap().index()
    }

    #[test]
    fn test_lookup_creates_default() {
        let mut store = WeightStore::with_initial_weight(4);
        assert!(store.get(index("XO  X   O")).is_none());

        let weights = *store.lookup(index("XO  X   O"));
        assert_eq!(weights.as_array(), &[0, 0, 4, 4, 0, 4, 4, 4, 0]);
        assert_eq!(store.get(index("XO  X   O")), Some(&weights));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_lookup_returns_stored_box() {
        let mut store = WeightStore::new();
        let i = index("X        ");
        store.lookup(i).reward(4);
        assert_eq!(store.lookup(i).get(4), 2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_reset_clears_learning() {
        let mut store = WeightStore::new();
        let i = index("X        ");
        store.lookup(i).reward(4);
        store.lookup(Board::EMPTY.index());
        assert_eq!(store.len(), 2);

        store.reset();
        assert!(store.is_empty());
        assert_eq!(store.lookup(i).get(4), 1);
    }

    #[test]
    fn test_iter_sorted() {
        let mut store = WeightStore::new();
        for s in ["X        ", "         ", "    X    "] {
            store.lookup(index(s));
        }
        let indices: Vec<_> = store.iter().map(|(i, _)| i.value()).collect();
        assert_eq!(indices, [0, 162, 13_122]);
    }

    #[test]
    #[should_panic(expected = "initial weight must be positive")]
    fn test_zero_initial_weight_rejected() {
        let _ = WeightStore::with_initial_weight(0);
    }
}
