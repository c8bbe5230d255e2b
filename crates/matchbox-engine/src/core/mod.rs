pub use self::{board::*, symmetry::*};

pub(crate) mod board;
pub(crate) mod symmetry;

/// Number of rows (and columns) of the board.
pub const BOARD_SIZE: usize = 3;
/// Number of cells of the board, addressed row-major as `row * 3 + col`.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;
