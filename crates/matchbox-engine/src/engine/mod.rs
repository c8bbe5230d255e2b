//! Game rules and session management.
//!
//! This module builds the playable game on top of the [`core`](crate::core) data
//! structures:
//!
//! - [`rules`] - Win, draw and move legality checks on a [`Board`](crate::Board)
//! - [`GameSession`] - A single game from the empty board to a terminal state
//! - [`LogEntry`] - One line of the textual move log a session produces
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] (X moves first on an empty board)
//! 2. Submit moves with [`GameSession::play`]; invalid moves are rejected and the
//!    session is left untouched
//! 3. After each move the board is replaced by its canonical orientation
//! 4. The session ends when the mover completes a line or X has placed its fifth mark
//!
//! # Example
//!
//! ```
//! use matchbox_engine::{GameSession, Player, SessionState};
//!
//! let mut session = GameSession::new();
//! for cell in [4, 0, 8] {
//!     session.play(cell).unwrap();
//! }
//! assert_eq!(session.to_move(), Player::O);
//! assert_eq!(session.state(), SessionState::InProgress);
//! ```

pub use self::{game_session::*, move_log::*};

mod game_session;
mod move_log;
pub mod rules;
