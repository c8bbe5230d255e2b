//! Credit assignment from recorded games.
//!
//! The learning engine replays a move log (see [`LogEntry`]) in two passes:
//!
//! 1. **Parse** - [`parse_game_log`] groups the flat line sequence into
//!    [`ParsedGame`]s, pairing every `M` line with the most recent `I` line of
//!    the same game. `R`/`F` lines are ignored.
//! 2. **Learn** - [`learn_from_games`] walks every decisive game and adjusts the
//!    box of each visited position: the winner's chosen cell gains a bead, the
//!    loser's chosen cell loses one. Drawn games are ignored.
//!
//! The whole log is parsed before any weight is touched, so a malformed log is
//! rejected as a unit and leaves the store unchanged.
//!
//! # Example
//!
//! ```
//! use matchbox_engine::parse_log_text;
//! use matchbox_training::{WeightStore, learning};
//!
//! let log = parse_log_text("I 0\nM X 4\nI 162\nM O 0\nW X\n").unwrap();
//! let mut store = WeightStore::new();
//! let summary = learning::learn_from_games(&mut store, &log).unwrap();
//! assert_eq!(summary.decisive_games, 1);
//! assert_eq!(summary.rewarded, 1);
//! assert_eq!(summary.penalized, 1);
//! ```

use matchbox_engine::{Board, BoardIndex, LogEntry, MoveError, Player};

use serde::Serialize;

use crate::{store::WeightStore, weights::Adjustment};

/// How a recorded game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameVerdict {
    Winner(Player),
    Draw,
}

/// A single recorded move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    /// Index of the board the move was made on.
    pub index: BoardIndex,
    pub player: Player,
    pub cell: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedGame {
    pub moves: Vec<MoveRecord>,
    pub verdict: GameVerdict,
}

/// Structural error in a move log.
///
/// `position` is the 0-based position of the offending entry in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseGameLogError {
    #[display("entry {position}: move has no preceding board index in its game")]
    MoveWithoutIndex { position: usize },
    #[display("entry {position}: move {player} {cell} is illegal on board {index}: {source}")]
    IllegalMove {
        position: usize,
        index: BoardIndex,
        player: Player,
        cell: usize,
        source: MoveError,
    },
    #[display("log ends inside a game that has no `W` or `C` line")]
    UnterminatedGame,
}

/// Groups a flat move log into games.
///
/// Every move is checked against the board decoded from its index, so a log
/// that names occupied cells or the wrong player is rejected.
pub fn parse_game_log(entries: &[LogEntry]) -> Result<Vec<ParsedGame>, ParseGameLogError> {
    let mut games = vec![];
    let mut moves = vec![];
    let mut current_index = None;
    let mut in_game = false;

    for (position, entry) in entries.iter().enumerate() {
        match *entry {
            LogEntry::Index(index) => {
                current_index = Some(index);
                in_game = true;
            }
            LogEntry::Move { player, cell } => {
                let index =
                    current_index.ok_or(ParseGameLogError::MoveWithoutIndex { position })?;
                Board::from_index(index)
                    .validate_move(player, cell)
                    .map_err(|source| ParseGameLogError::IllegalMove {
                        position,
                        index,
                        player,
                        cell,
                        source,
                    })?;
                moves.push(MoveRecord {
                    index,
                    player,
                    cell,
                });
            }
            LogEntry::Rotations(_) | LogEntry::Flips(_) => in_game = true,
            LogEntry::Win(player) => {
                games.push(ParsedGame {
                    moves: std::mem::take(&mut moves),
                    verdict: GameVerdict::Winner(player),
                });
                current_index = None;
                in_game = false;
            }
            LogEntry::Draw => {
                games.push(ParsedGame {
                    moves: std::mem::take(&mut moves),
                    verdict: GameVerdict::Draw,
                });
                current_index = None;
                in_game = false;
            }
        }
    }

    if in_game || !moves.is_empty() {
        return Err(ParseGameLogError::UnterminatedGame);
    }
    Ok(games)
}

/// Counters describing a learning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::AddAssign, Serialize)]
pub struct LearningSummary {
    /// Games replayed, decisive or not.
    pub games: usize,
    pub decisive_games: usize,
    pub draws: usize,
    /// Moves whose cell gained a bead.
    pub rewarded: usize,
    /// Moves whose cell lost a bead.
    pub penalized: usize,
    /// Moves of decisive games that left their box unchanged.
    pub skipped: usize,
}

/// Applies the credit-assignment rule for one game.
pub fn learn_from_game(store: &mut WeightStore, game: &ParsedGame) -> LearningSummary {
    let mut summary = LearningSummary {
        games: 1,
        ..LearningSummary::default()
    };
    let winner = match game.verdict {
        GameVerdict::Winner(winner) => winner,
        GameVerdict::Draw => {
            summary.draws = 1;
            return summary;
        }
    };
    summary.decisive_games = 1;

    for record in &game.moves {
        let weights = store.lookup(record.index);
        let adjustment = if record.player == winner {
            weights.reward(record.cell)
        } else {
            weights.penalize(record.cell)
        };
        match adjustment {
            Adjustment::Rewarded => summary.rewarded += 1,
            Adjustment::Penalized => summary.penalized += 1,
            Adjustment::Skipped => {
                log::debug!(
                    "box {} left unchanged for {} {} (weights {:?})",
                    record.index,
                    record.player,
                    record.cell,
                    weights.as_array()
                );
                summary.skipped += 1;
            }
        }
    }
    summary
}

/// Parses `entries` and learns from every game in it.
///
/// Nothing is learned if the log is malformed.
pub fn learn_from_games(
    store: &mut WeightStore,
    entries: &[LogEntry],
) -> Result<LearningSummary, ParseGameLogError> {
    let games = parse_game_log(entries)?;
    let mut summary = LearningSummary::default();
    for game in &games {
        summary += learn_from_game(store, game);
    }
    log::info!(
        "learned from {} games ({} decisive, {} draws): +{} / -{} beads, {} skipped",
        summary.games,
        summary.decisive_games,
        summary.draws,
        summary.rewarded,
        summary.penalized,
        summary.skipped
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use matchbox_engine::parse_log_text;
    use test_log::test;

    use super::*;

    fn index(s: &str) -> BoardIndex {
        s.parse::<Board>().unwrap().index()
    }

    fn entries(text: &str) -> Vec<LogEntry> {
        parse_log_text(text).unwrap()
    }

    // X: 4, O: 1, X: 0, O: 3, X: 8 (main diagonal)
    const X_WINS: &str = "\
I 0
M X 4
I 162
M O 1
I 2349
M X 0
I 15471
M O 3
I 15714
M X 8
W X
";

    const DRAW: &str = "\
I 0
M X 0
I 13122
M O 1
I 15309
M X 2
I 16767
M O 3
I 17010
M X 4
I 17172
M O 6
I 17181
M X 5
R 3
I 17923
M O 2
I 18652
M X 5
C
";

    #[test]
    fn test_parse_game_log() {
        let text = format!("{X_WINS}{DRAW}");
        let games = parse_game_log(&entries(&text)).unwrap();
        assert_eq!(games.len(), 2);

        assert_eq!(games[0].verdict, GameVerdict::Winner(Player::X));
        assert_eq!(games[0].moves.len(), 5);
        assert_eq!(
            games[0].moves[1],
            MoveRecord {
                index: index("    X    "),
                player: Player::O,
                cell: 1,
            }
        );

        assert_eq!(games[1].verdict, GameVerdict::Draw);
        assert_eq!(games[1].moves.len(), 9);
        assert_eq!(games[1].moves[7].index.value(), 17_923);
    }

    #[test]
    fn test_parse_empty_log() {
        assert_eq!(parse_game_log(&[]), Ok(vec![]));
    }

    #[test]
    fn test_parse_move_without_index() {
        assert_eq!(
            parse_game_log(&entries("M X 4\nW X\n")),
            Err(ParseGameLogError::MoveWithoutIndex { position: 0 })
        );
        // the index of a finished game does not carry over into the next one
        assert_eq!(
            parse_game_log(&entries("I 0\nM X 4\nW X\nM X 4\nW X\n")),
            Err(ParseGameLogError::MoveWithoutIndex { position: 3 })
        );
    }

    #[test]
    fn test_parse_unterminated_game() {
        assert_eq!(
            parse_game_log(&entries("I 0\nM X 4\nW X\nI 0\nM X 4\n")),
            Err(ParseGameLogError::UnterminatedGame)
        );
        assert_eq!(
            parse_game_log(&entries("I 0\n")),
            Err(ParseGameLogError::UnterminatedGame)
        );
    }

    #[test]
    fn test_parse_illegal_move() {
        // cell 4 is already taken on board 162
        let err = parse_game_log(&entries("I 162\nM O 4\nW O\n")).unwrap_err();
        assert!(matches!(
            err,
            ParseGameLogError::IllegalMove {
                position: 1,
                source: MoveError::Occupied,
                ..
            }
        ));
        // X cannot move twice in a row
        let err = parse_game_log(&entries("I 162\nM X 0\nW X\n")).unwrap_err();
        assert!(matches!(
            err,
            ParseGameLogError::IllegalMove {
                source: MoveError::WrongTurn,
                ..
            }
        ));
    }

    #[test]
    fn test_learn_from_decisive_game() {
        let mut store = WeightStore::with_initial_weight(3);
        let summary = learn_from_games(&mut store, &entries(X_WINS)).unwrap();
        assert_eq!(
            summary,
            LearningSummary {
                games: 1,
                decisive_games: 1,
                draws: 0,
                rewarded: 3,
                penalized: 2,
                skipped: 0,
            }
        );

        // winner's cells gained exactly one bead
        assert_eq!(store.get(index("         ")).unwrap().get(4), 4);
        assert_eq!(store.get(index(" O  X    ")).unwrap().get(0), 4);
        assert_eq!(store.get(index("XO OX    ")).unwrap().get(8), 4);
        // loser's cells lost exactly one bead
        assert_eq!(store.get(index("    X    ")).unwrap().get(1), 2);
        assert_eq!(store.get(index("XO  X    ")).unwrap().get(3), 2);
        // other cells untouched
        let box0 = store.get(index("         ")).unwrap();
        assert_eq!(box0.total(), 9 * 3 + 1);
    }

    #[test]
    fn test_learn_ignores_draws() {
        let mut store = WeightStore::new();
        let summary = learn_from_games(&mut store, &entries(DRAW)).unwrap();
        assert_eq!(summary.games, 1);
        assert_eq!(summary.draws, 1);
        assert_eq!(summary.rewarded + summary.penalized + summary.skipped, 0);
        assert!(store.is_empty(), "a drawn game must not create boxes");
    }

    #[test]
    fn test_learn_keeps_last_bead() {
        // X's only remaining option on this board is cell 8
        let text = "I 17376\nM X 8\nW O\n";
        let board = Board::from_index(BoardIndex::new(17_376).unwrap());
        assert_eq!(board, "XOXXOOOX ".parse().unwrap());
        assert_eq!(board.empty_cells().as_slice(), &[8]);

        let mut store = WeightStore::new();
        for _ in 0..3 {
            let summary = learn_from_games(&mut store, &entries(text)).unwrap();
            assert_eq!(summary.skipped, 1);
        }
        assert_eq!(store.get(board.index()).unwrap().total(), 1);
    }

    #[test]
    fn test_learn_repeated_losses_never_empty_box() {
        let mut store = WeightStore::new();
        // X loses from the empty board over and over with the same first move
        let text = "I 0\nM X 4\nI 162\nM O 0\nW O\n";
        for _ in 0..20 {
            learn_from_games(&mut store, &entries(text)).unwrap();
        }
        let first = store.get(BoardIndex::default()).unwrap();
        assert_eq!(first.get(4), 0);
        assert_eq!(first.total(), 8);
        assert_eq!(store.get(index("    X    ")).unwrap().get(0), 21);
    }

    #[test]
    fn test_malformed_log_learns_nothing() {
        let mut store = WeightStore::new();
        let text = format!("{X_WINS}I 0\nM X 4\n");
        assert_eq!(
            learn_from_games(&mut store, &entries(&text)),
            Err(ParseGameLogError::UnterminatedGame)
        );
        assert!(store.is_empty());
    }
}
