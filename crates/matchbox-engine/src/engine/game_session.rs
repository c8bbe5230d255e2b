use crate::{
    PlayError,
    core::{Board, Player},
};

use super::move_log::LogEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    InProgress,
    Won(Player),
    Draw,
}

/// A single game from the empty board to a terminal state.
///
/// After every accepted move the board is replaced by its canonical orientation,
/// so positions reached through different but symmetric move orders share one
/// [`BoardIndex`](crate::BoardIndex). The session records the move log lines
/// (`I`, `M`, `R`, `F`, `W`, `C`) consumed by the learning engine.
///
/// # Example
///
/// ```
/// use matchbox_engine::{GameSession, Player, SessionState};
///
/// let mut session = GameSession::new();
/// // moves that hit occupied cells are rejected and skipped
/// for cell in [4, 0, 8, 2, 1, 7, 6] {
///     if session.state().is_in_progress() {
///         let _ = session.play(cell);
///     }
/// }
/// assert!(!session.log().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    to_move: Player,
    state: SessionState,
    log: Vec<LogEntry>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Board::EMPTY,
            to_move: Player::X,
            state: SessionState::InProgress,
            log: vec![],
        }
    }

    /// Current board, always in canonical orientation.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player who makes the next move (or made the last one, once the game is over).
    #[must_use]
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Move log lines recorded so far.
    #[must_use]
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    #[must_use]
    pub fn into_log(self) -> Vec<LogEntry> {
        self.log
    }

    /// Plays `cell` for the player to move.
    ///
    /// On error nothing is recorded and the session is unchanged.
    pub fn play(&mut self, cell: usize) -> Result<SessionState, PlayError> {
        if !self.state.is_in_progress() {
            return Err(PlayError::GameOver);
        }
        let player = self.to_move;
        self.board.validate_move(player, cell)?;

        self.log.push(LogEntry::Index(self.board.index()));
        self.log.push(LogEntry::Move { player, cell });
        self.board.place(player, cell);

        let canonical = self.board.canonical();
        let symmetry = canonical.symmetry;
        if symmetry.rotations() > 0 {
            self.log.push(LogEntry::Rotations(symmetry.rotations()));
        }
        if symmetry.is_flipped() {
            self.log.push(LogEntry::Flips(symmetry.flips()));
        }
        self.board = canonical.board;
        log::debug!(
            "{player} played {cell}, canonical index {} ({symmetry:?})",
            canonical.index
        );

        if self.board.is_winner(player) {
            self.state = SessionState::Won(player);
            self.log.push(LogEntry::Win(player));
        } else if self.board.is_cats_game() {
            self.state = SessionState::Draw;
            self.log.push(LogEntry::Draw);
        } else {
            self.to_move = player.other();
        }
        Ok(self.state)
    }
}

#[cfg(test)]
mod tests {
    use crate::{BoardIndex, MoveError};

    use super::*;

    fn play_all(session: &mut GameSession, cells: &[usize]) {
        for &cell in cells {
            session.play(cell).unwrap();
        }
    }

    #[test]
    fn test_first_move_logged() {
        let mut session = GameSession::new();
        // a corner move is canonicalized into the top-left corner
        let state = session.play(8).unwrap();
        assert_eq!(state, SessionState::InProgress);
        assert_eq!(session.board(), &"X        ".parse().unwrap());
        assert_eq!(session.to_move(), Player::O);
        assert_eq!(
            session.log(),
            &[
                LogEntry::Index(BoardIndex::default()),
                LogEntry::Move {
                    player: Player::X,
                    cell: 8
                },
                LogEntry::Rotations(2),
            ]
        );
    }

    #[test]
    fn test_center_move_needs_no_transform() {
        let mut session = GameSession::new();
        session.play(4).unwrap();
        assert_eq!(session.log().len(), 2);
    }

    #[test]
    fn test_invalid_move_leaves_session_untouched() {
        let mut session = GameSession::new();
        session.play(4).unwrap();
        let before = session.clone();

        assert_eq!(
            session.play(4),
            Err(PlayError::InvalidMove(MoveError::Occupied))
        );
        assert_eq!(
            session.play(9),
            Err(PlayError::InvalidMove(MoveError::OutOfRange))
        );
        assert_eq!(session.board(), before.board());
        assert_eq!(session.log(), before.log());
        assert_eq!(session.to_move(), Player::O);
    }

    #[test]
    fn test_win_ends_session() {
        let mut session = GameSession::new();
        play_all(&mut session, &[4, 1]);
        assert_eq!(session.board(), &" O  X    ".parse().unwrap());
        play_all(&mut session, &[0, 3]);
        assert_eq!(session.board(), &"XO OX    ".parse().unwrap());

        let state = session.play(8).unwrap();
        assert_eq!(state, SessionState::Won(Player::X));
        assert!(session.state().is_won());
        assert_eq!(session.to_move(), Player::X);
        assert_eq!(session.log().last(), Some(&LogEntry::Win(Player::X)));
        assert_eq!(session.play(2), Err(PlayError::GameOver));
    }

    #[test]
    fn test_draw_ends_session() {
        let mut session = GameSession::new();
        play_all(&mut session, &[0, 1, 2, 3, 4, 6]);
        assert_eq!(session.board(), &"XOXOX O  ".parse().unwrap());

        // the board is turned three times to reach its canonical form
        session.play(5).unwrap();
        assert_eq!(session.board(), &"XX OX XOO".parse().unwrap());
        assert_eq!(session.log()[session.log().len() - 1], LogEntry::Rotations(3));

        play_all(&mut session, &[2, 5]);
        assert_eq!(session.state(), SessionState::Draw);
        assert_eq!(session.board(), &"XXOOXXXOO".parse().unwrap());
        assert_eq!(session.log().last(), Some(&LogEntry::Draw));
        assert_eq!(session.log().len(), 9 * 2 + 1 + 1);
    }

    #[test]
    fn test_log_indices_are_canonical() {
        let mut session = GameSession::new();
        play_all(&mut session, &[0, 4, 8]);
        for entry in session.log() {
            if let LogEntry::Index(index) = entry {
                let board = Board::from_index(*index);
                assert_eq!(board.canonical().index, *index, "{board:?}");
            }
        }
    }
}
