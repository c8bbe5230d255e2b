//! Dihedral symmetries of the board.
//!
//! Every board has up to 8 geometric variants: 0–3 quarter turns clockwise, each
//! optionally followed by a horizontal mirror. Positions that differ only by such a
//! transform play identically, so they share one canonical representative: the
//! variant with the largest [`BoardIndex`].

use super::{
    BOARD_SIZE, CELL_COUNT,
    board::{Board, BoardIndex},
};

impl Board {
    /// Rotates the board 90° clockwise.
    ///
    /// Output cell `(row, col)` is input cell `(2 - col, row)`.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let mut rotated = Board::EMPTY;
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                rotated.set(
                    row * BOARD_SIZE + col,
                    self.at(BOARD_SIZE - 1 - col, row),
                );
            }
        }
        rotated
    }

    /// Mirrors the board horizontally.
    ///
    /// Output cell `(row, col)` is input cell `(row, 2 - col)`.
    #[must_use]
    pub fn flipped(&self) -> Self {
        let mut flipped = Board::EMPTY;
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                flipped.set(
                    row * BOARD_SIZE + col,
                    self.at(row, BOARD_SIZE - 1 - col),
                );
            }
        }
        flipped
    }

    /// Finds the canonical orientation of this board.
    ///
    /// Variants are enumerated with the flip state in the outer loop and the
    /// rotation count in the inner loop (see [`Symmetry::ALL`]). Only a strictly
    /// greater index replaces the current best, so on ties the variant reached
    /// with fewer transforms wins.
    ///
    /// # Example
    ///
    /// ```
    /// use matchbox_engine::Board;
    ///
    /// let board: Board = "  X      ".parse().unwrap();
    /// let canonical = board.canonical();
    /// assert_eq!(canonical.board, "X        ".parse().unwrap());
    /// assert_eq!(canonical.symmetry.rotations(), 3);
    /// assert!(!canonical.symmetry.is_flipped());
    /// ```
    #[must_use]
    pub fn canonical(&self) -> Canonical {
        let mut best = Canonical {
            board: *self,
            index: self.index(),
            symmetry: Symmetry::IDENTITY,
        };
        for symmetry in Symmetry::ALL {
            let board = symmetry.apply(self);
            let index = board.index();
            if index > best.index {
                best = Canonical {
                    board,
                    index,
                    symmetry,
                };
            }
        }
        best
    }
}

/// Result of [`Board::canonical`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canonical {
    /// The canonical variant.
    pub board: Board,
    /// Index of [`Self::board`].
    pub index: BoardIndex,
    /// Transform that maps the original board onto [`Self::board`].
    pub symmetry: Symmetry,
}

/// A board transform: `rotations` quarter turns clockwise, then an optional
/// horizontal flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Symmetry {
    rotations: u8,
    flipped: bool,
}

impl Symmetry {
    pub const IDENTITY: Self = Self {
        rotations: 0,
        flipped: false,
    };

    /// All 8 transforms in canonicalization order: flip state outer, rotations inner.
    #[expect(clippy::cast_possible_truncation)]
    pub const ALL: [Self; 8] = {
        let mut all = [Self::IDENTITY; 8];
        let mut i = 0;
        while i < 8 {
            all[i] = Self {
                rotations: (i % 4) as u8,
                flipped: i >= 4,
            };
            i += 1;
        }
        all
    };

    /// Creates a transform; `rotations` is taken modulo 4.
    #[must_use]
    pub const fn new(rotations: u8, flipped: bool) -> Self {
        Self {
            rotations: rotations % 4,
            flipped,
        }
    }

    #[must_use]
    pub const fn rotations(self) -> u8 {
        self.rotations
    }

    #[must_use]
    pub const fn is_flipped(self) -> bool {
        self.flipped
    }

    /// Number of flips applied (0 or 1).
    #[must_use]
    pub fn flips(self) -> u8 {
        u8::from(self.flipped)
    }

    #[must_use]
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    /// Returns a new board with this transform applied.
    #[must_use]
    pub fn apply(self, board: &Board) -> Board {
        let mut out = *board;
        for _ in 0..self.rotations {
            out = out.rotated();
        }
        if self.flipped {
            out = out.flipped();
        }
        out
    }

    /// Maps a cell position of the original board to its position on the
    /// transformed board.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is not below [`CELL_COUNT`].
    #[must_use]
    pub fn map_cell(self, cell: usize) -> usize {
        assert!(cell < CELL_COUNT, "cell {cell} is out of range");
        let (mut row, mut col) = (cell / BOARD_SIZE, cell % BOARD_SIZE);
        for _ in 0..self.rotations {
            (row, col) = (col, BOARD_SIZE - 1 - row);
        }
        if self.flipped {
            col = BOARD_SIZE - 1 - col;
        }
        row * BOARD_SIZE + col
    }
}
