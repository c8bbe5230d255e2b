//! Computer-versus-computer games between two matchbox agents sharing one store.
//!
//! Both sides draw from the same [`WeightStore`], so a single self-play run
//! trains the boxes for X's positions and O's positions at once.

use matchbox_engine::{GameSession, LogEntry, PlayError, Player, SessionState};
use rand::Rng;
use serde::Serialize;

use crate::{
    agent,
    learning::{self, LearningSummary, ParseGameLogError},
    store::WeightStore,
    weights::NoSelectableCell,
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SelfPlayError {
    #[display("agent could not move: {_0}")]
    NoSelectableCell(NoSelectableCell),
    #[display("agent picked an illegal move: {_0}")]
    InvalidMove(PlayError),
    #[display("recorded game could not be learned from: {_0}")]
    Learn(ParseGameLogError),
}

/// A finished game and its move log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedGame {
    pub state: SessionState,
    pub log: Vec<LogEntry>,
}

/// Win/draw tally of a self-play run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SelfPlayStats {
    pub games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
}

impl SelfPlayStats {
    fn record(&mut self, state: SessionState) {
        self.games += 1;
        match state {
            SessionState::Won(Player::X) => self.x_wins += 1,
            SessionState::Won(Player::O) => self.o_wins += 1,
            SessionState::Draw => self.draws += 1,
            SessionState::InProgress => {}
        }
    }
}

/// Plays one game where the matchbox agent moves for both sides.
///
/// The store is consulted (and boxes are created) but not adjusted.
pub fn play_game<R>(store: &mut WeightStore, rng: &mut R) -> Result<PlayedGame, SelfPlayError>
where
    R: Rng + ?Sized,
{
    let mut session = GameSession::new();
    let mut state = session.state();
    while state.is_in_progress() {
        let cell = agent::choose_move(store, session.board(), rng)?;
        state = session.play(cell)?;
    }
    Ok(PlayedGame {
        state,
        log: session.into_log(),
    })
}

/// Plays `games` games, learning from each one before starting the next.
///
/// Returns the tally, the combined learning counters and the concatenated move log.
pub fn self_play_and_learn<R>(
    store: &mut WeightStore,
    games: usize,
    rng: &mut R,
) -> Result<(SelfPlayStats, LearningSummary, Vec<LogEntry>), SelfPlayError>
where
    R: Rng + ?Sized,
{
    let mut stats = SelfPlayStats::default();
    let mut summary = LearningSummary::default();
    let mut log = vec![];
    for _ in 0..games {
        let game = play_game(store, rng)?;
        summary += learning::learn_from_games(store, &game.log)?;
        stats.record(game.state);
        log.extend(game.log);
    }
    log::info!(
        "self-play: {} games, X won {}, O won {}, {} draws, {} boxes",
        stats.games,
        stats.x_wins,
        stats.o_wins,
        stats.draws,
        store.len()
    );
    Ok((stats, summary, log))
}
