//! Win, draw and move legality rules.

use crate::{
    MoveError,
    core::{Board, CELL_COUNT, Cell, Player},
};

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Number of marks X has placed when the board is full under alternating play.
const FULL_BOARD_X_COUNT: usize = 5;

impl Board {
    /// Returns `true` if `player` occupies every cell of any row, column or diagonal.
    #[must_use]
    pub fn is_winner(&self, player: Player) -> bool {
        LINES
            .iter()
            .any(|line| line.iter().all(|&c| self.cell(c) == Cell::Mark(player)))
    }

    /// Returns the player holding a complete line, checking X first.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        Player::ALL.into_iter().find(|&p| self.is_winner(p))
    }

    /// Returns `true` if nobody has won and X has placed its fifth mark.
    ///
    /// Draw detection is tied to X's mark count rather than to an empty-cell
    /// check, so it only agrees with "board full" for boards reached by
    /// alternating play with X first.
    #[must_use]
    pub fn is_cats_game(&self) -> bool {
        self.winner().is_none() && self.count(Player::X) == FULL_BOARD_X_COUNT
    }

    /// Player whose turn it is, or `None` if the mark counts are not reachable by
    /// alternating play.
    #[must_use]
    pub fn next_player(&self) -> Option<Player> {
        let x = self.count(Player::X);
        let o = self.count(Player::O);
        if x == o {
            Some(Player::X)
        } else if x == o + 1 {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Checks whether `player` may mark `cell`.
    ///
    /// Turn parity is checked first, then the range of `cell`, then occupancy.
    ///
    /// # Example
    ///
    /// ```
    /// use matchbox_engine::{Board, MoveError, Player};
    ///
    /// let board: Board = "X O X   O".parse().unwrap();
    /// assert_eq!(board.validate_move(Player::O, 0), Err(MoveError::WrongTurn));
    /// assert_eq!(board.validate_move(Player::X, 10), Err(MoveError::OutOfRange));
    /// assert_eq!(board.validate_move(Player::X, 2), Err(MoveError::Occupied));
    /// assert_eq!(board.validate_move(Player::X, 1), Ok(()));
    /// ```
    pub fn validate_move(&self, player: Player, cell: usize) -> Result<(), MoveError> {
        if self.next_player() != Some(player) {
            return Err(MoveError::WrongTurn);
        }
        if cell >= CELL_COUNT {
            return Err(MoveError::OutOfRange);
        }
        if !self.cell(cell).is_empty() {
            return Err(MoveError::Occupied);
        }
        Ok(())
    }

    /// Writes `player` into `cell` in place.
    ///
    /// No validation is performed; callers are expected to have received `Ok`
    /// from [`Board::validate_move`] first.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is not below [`CELL_COUNT`].
    pub fn place(&mut self, player: Player, cell: usize) {
        self.set(cell, Cell::Mark(player));
    }
}
