//! Weight vectors ("matchboxes") and weighted cell selection.
//!
//! A [`WeightVector`] holds one non-negative bead count per board cell. The
//! matchbox agent picks a cell with probability proportional to its count, and
//! the learning engine adds or removes single beads after each decisive game.
//!
//! # Operations
//!
//! - **Initialization**: [`WeightVector::default_for`] gives every empty cell the
//!   same initial weight and every occupied cell zero
//! - **Selection**: [`WeightVector::pick`] samples a cell by weight
//! - **Adjustment**: [`WeightVector::reward`] and [`WeightVector::penalize`] move a
//!   single cell by one bead, never emptying the box
//!
//! # Invariants
//!
//! - Occupied cells start at zero and learning only touches cells that were
//!   legal moves, so an occupied cell is never selected
//! - A box whose total weight is exactly 1 is never adjusted, so the total never
//!   drops to zero through learning

use matchbox_engine::{Board, CELL_COUNT};
use rand::{
    Rng,
    distr::{Distribution, weighted::WeightedIndex},
};
use serde::{Deserialize, Serialize};

/// Returned by [`WeightVector::pick`] when every weight is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no selectable cell: every weight in the matchbox is zero")]
pub struct NoSelectableCell;

/// Outcome of a single learning adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    /// The cell gained a bead.
    Rewarded,
    /// The cell lost a bead.
    Penalized,
    /// The box was left unchanged (last bead, or the cell was already empty).
    Skipped,
}

/// Per-cell selection weights for one board position.
///
/// # Example
///
/// ```
/// use matchbox_engine::Board;
/// use matchbox_training::weights::WeightVector;
///
/// let board: Board = "XO  X   O".parse().unwrap();
/// let weights = WeightVector::default_for(&board, 3);
/// assert_eq!(weights.as_array(), &[0, 0, 3, 3, 0, 3, 3, 3, 0]);
/// assert_eq!(weights.total(), 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightVector([u32; CELL_COUNT]);

impl WeightVector {
    #[must_use]
    pub const fn new(weights: [u32; CELL_COUNT]) -> Self {
        Self(weights)
    }

    /// Creates the initial box for `board`: `initial_weight` for empty cells,
    /// zero for occupied ones.
    #[must_use]
    pub fn default_for(board: &Board, initial_weight: u32) -> Self {
        let mut weights = [0; CELL_COUNT];
        for (w, cell) in weights.iter_mut().zip(board.cells()) {
            if cell.is_empty() {
                *w = initial_weight;
            }
        }
        Self(weights)
    }

    #[must_use]
    pub fn as_array(&self) -> &[u32; CELL_COUNT] {
        &self.0
    }

    #[must_use]
    pub fn get(&self, cell: usize) -> u32 {
        self.0[cell]
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.iter().copied().map(u64::from).sum()
    }

    /// Adds one bead to `cell`, unless the box holds exactly one bead.
    pub fn reward(&mut self, cell: usize) -> Adjustment {
        if self.total() == 1 {
            return Adjustment::Skipped;
        }
        self.0[cell] = self.0[cell].saturating_add(1);
        Adjustment::Rewarded
    }

    /// Removes one bead from `cell`, unless the box holds exactly one bead or
    /// `cell` has none left.
    pub fn penalize(&mut self, cell: usize) -> Adjustment {
        if self.total() == 1 || self.0[cell] == 0 {
            return Adjustment::Skipped;
        }
        self.0[cell] -= 1;
        Adjustment::Penalized
    }

    /// Samples a cell with probability proportional to its weight.
    ///
    /// Cells with zero weight are never returned.
    pub fn pick<R>(&self, rng: &mut R) -> Result<usize, NoSelectableCell>
    where
        R: Rng + ?Sized,
    {
        if self.total() == 0 {
            return Err(NoSelectableCell);
        }
        let dist = WeightedIndex::new(self.0.iter().copied().map(u64::from))
            .map_err(|_| NoSelectableCell)?;
        Ok(dist.sample(rng))
    }
}
