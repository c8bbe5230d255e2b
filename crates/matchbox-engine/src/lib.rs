pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Reason a move was rejected by [`Board::validate_move`].
///
/// Checks run in declaration order: turn parity first, then range, then occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    #[display("it is not this player's turn")]
    WrongTurn,
    #[display("cell is outside the board")]
    OutOfRange,
    #[display("cell is already occupied")]
    Occupied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlayError {
    #[display("invalid move: {_0}")]
    InvalidMove(MoveError),
    #[display("game is already over")]
    GameOver,
}

impl From<MoveError> for PlayError {
    fn from(err: MoveError) -> Self {
        Self::InvalidMove(err)
    }
}
