use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{BOARD_SIZE, CELL_COUNT};

/// One of the two sides of the game.
///
/// `X` always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Both players in turn order.
    pub const ALL: [Self; 2] = [Self::X, Self::O];

    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }

    /// Returns the single character representation of this player.
    ///
    /// # Examples
    ///
    /// ```
    /// use matchbox_engine::Player;
    ///
    /// assert_eq!(Player::X.as_char(), 'X');
    /// assert_eq!(Player::O.as_char(), 'O');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::X => 'X',
            Self::O => 'O',
        }
    }

    /// Parses a player from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use matchbox_engine::Player;
    ///
    /// assert_eq!(Player::from_char('O'), Some(Player::O));
    /// assert_eq!(Player::from_char('x'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'X' => Some(Self::X),
            'O' => Some(Self::O),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A single square of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Mark(Player),
}

impl Cell {
    pub const X: Self = Self::Mark(Player::X);
    pub const O: Self = Self::Mark(Player::O);

    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Base-3 digit used by the board index: empty is 0, `O` is 1, `X` is 2.
    #[must_use]
    pub const fn digit(self) -> u16 {
        match self {
            Cell::Empty => 0,
            Cell::Mark(Player::O) => 1,
            Cell::Mark(Player::X) => 2,
        }
    }

    const fn from_digit(digit: u16) -> Self {
        match digit {
            0 => Cell::Empty,
            1 => Cell::O,
            _ => Cell::X,
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Mark(player) => player.as_char(),
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            ' ' => Some(Cell::Empty),
            _ => match Player::from_char(c) {
                Some(player) => Some(Cell::Mark(player)),
                None => None,
            },
        }
    }
}

/// Unique base-3 encoding of a board's exact contents.
///
/// Cells are read row-major, most significant cell first, so the top-left cell
/// carries the weight `3^8`. Valid values are `0..3^9`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub struct BoardIndex(u16);

impl BoardIndex {
    /// Number of distinct indices (`3^9`).
    pub const COUNT: u16 = 19_683;

    /// Creates an index, returning `None` if `value` is not below [`Self::COUNT`].
    #[must_use]
    pub const fn new(value: u16) -> Option<Self> {
        if value < Self::COUNT {
            Some(Self(value))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Iterates over every index in `0..3^9`, including unreachable positions.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(Self)
    }
}

impl From<BoardIndex> for u16 {
    fn from(index: BoardIndex) -> Self {
        index.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("board index {value} is out of range (must be below {})", BoardIndex::COUNT)]
pub struct BoardIndexOutOfRange {
    pub value: u32,
}

impl TryFrom<u16> for BoardIndex {
    type Error = BoardIndexOutOfRange;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(BoardIndexOutOfRange {
            value: value.into(),
        })
    }
}

impl TryFrom<u32> for BoardIndex {
    type Error = BoardIndexOutOfRange;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or(BoardIndexOutOfRange { value })
    }
}

/// A 3×3 board.
///
/// Boards are plain values: every transform returns a new board, and the only
/// mutating operation is [`Board::place`].
///
/// # Text Forms
///
/// - [`FromStr`] and serde use the 9-character row-major string of `' '`, `'X'`
///   and `'O'` (e.g. `"XO  X   O"`)
/// - [`fmt::Display`] renders the grid shown to players
///
/// # Example
///
/// ```
/// use matchbox_engine::{Board, Cell};
///
/// let board: Board = "XO  X   O".parse().unwrap();
/// assert_eq!(board.at(1, 1), Cell::X);
/// assert_eq!(Board::from_index(board.index()), board);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    pub const EMPTY: Self = Self {
        cells: [Cell::Empty; CELL_COUNT],
    };

    #[must_use]
    pub const fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Returns the cell at row-major position `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is not below [`CELL_COUNT`].
    #[must_use]
    pub fn cell(&self, cell: usize) -> Cell {
        self.cells[cell]
    }

    #[must_use]
    pub fn at(&self, row: usize, col: usize) -> Cell {
        self.cells[row * BOARD_SIZE + col]
    }

    pub(crate) fn set(&mut self, cell: usize, value: Cell) {
        self.cells[cell] = value;
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(BOARD_SIZE)
    }

    /// Number of cells marked by `player`.
    #[must_use]
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|&&c| c == Cell::Mark(player))
            .count()
    }

    /// Row-major positions of the empty cells.
    #[must_use]
    pub fn empty_cells(&self) -> ArrayVec<usize, CELL_COUNT> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    /// Encodes the board as `result = result * 3 + digit(cell)` over the cells in
    /// row-major order.
    #[must_use]
    pub fn index(&self) -> BoardIndex {
        BoardIndex(
            self.cells
                .iter()
                .fold(0, |acc, cell| acc * 3 + cell.digit()),
        )
    }

    /// Decodes a board from its index; the exact inverse of [`Board::index`].
    #[must_use]
    pub fn from_index(index: BoardIndex) -> Self {
        let mut value = index.0;
        let mut cells = [Cell::Empty; CELL_COUNT];
        // least significant digit belongs to the last cell
        for cell in cells.iter_mut().rev() {
            *cell = Cell::from_digit(value % 3);
            value /= 3;
        }
        Self { cells }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
                writeln!(f, "-----------")?;
            }
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, "|")?;
                }
                write!(f, " {} ", cell.as_char())?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("expected {} cells, got {len}", CELL_COUNT)]
    InvalidLength { len: usize },
    #[display("invalid cell character {ch:?} at position {position}")]
    InvalidCell { ch: char, position: usize },
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != CELL_COUNT {
            return Err(ParseBoardError::InvalidLength { len });
        }
        let mut cells = [Cell::Empty; CELL_COUNT];
        for (position, (slot, ch)) in cells.iter_mut().zip(s.chars()).enumerate() {
            *slot = Cell::from_char(ch).ok_or(ParseBoardError::InvalidCell { ch, position })?;
        }
        Ok(Self { cells })
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s: String = self.cells.iter().map(|c| c.as_char()).collect();
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid board {s:?}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip_all_indices() {
        for index in BoardIndex::all() {
            let board = Board::from_index(index);
            assert_eq!(
                board.index(),
                index,
                "index {index} decoded to {board:?} which encodes differently",
            );
        }
    }

    #[test]
    fn test_board_round_trip() {
        for s in ["         ", "X        ", "XO  X   O", "XOXOXOOXO", "OOOOOOOOO"] {
            let board: Board = s.parse().unwrap();
            assert_eq!(Board::from_index(board.index()), board, "board {s:?}");
        }
    }

    #[test]
    fn test_index_digit_order() {
        assert_eq!(Board::EMPTY.index().value(), 0);
        // last cell is least significant
        assert_eq!("        O".parse::<Board>().unwrap().index().value(), 1);
        assert_eq!("        X".parse::<Board>().unwrap().index().value(), 2);
        assert_eq!("       O ".parse::<Board>().unwrap().index().value(), 3);
        // first cell is most significant
        assert_eq!("X        ".parse::<Board>().unwrap().index().value(), 2 * 6561);
        assert_eq!(
            "XXXXXXXXX".parse::<Board>().unwrap().index().value(),
            BoardIndex::COUNT - 1
        );
    }

    #[test]
    fn test_board_index_range() {
        assert_eq!(BoardIndex::new(0), Some(BoardIndex(0)));
        assert_eq!(BoardIndex::new(19_682), Some(BoardIndex(19_682)));
        assert_eq!(BoardIndex::new(19_683), None);
        assert!(BoardIndex::try_from(70_000_u32).is_err());
        assert_eq!(BoardIndex::all().count(), 19_683);
    }

    #[test]
    fn test_board_parse_errors() {
        assert_eq!(
            "XO".parse::<Board>(),
            Err(ParseBoardError::InvalidLength { len: 2 })
        );
        assert_eq!(
            "XO  Y   O".parse::<Board>(),
            Err(ParseBoardError::InvalidCell {
                ch: 'Y',
                position: 4
            })
        );
    }

    #[test]
    fn test_board_display() {
        let board: Board = "XO  X   O".parse().unwrap();
        let expected = " X | O |   \n-----------\n   | X |   \n-----------\n   |   | O ";
        assert_eq!(board.to_string(), expected);
    }

    #[test]
    fn test_board_serialization() {
        let board: Board = "XO  X   O".parse().unwrap();
        let serialized = serde_json::to_string(&board).unwrap();
        assert_eq!(serialized, "\"XO  X   O\"");
        let deserialized: Board = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, board);

        assert!(serde_json::from_str::<Board>("\"XO\"").is_err());
        assert!(serde_json::from_str::<BoardIndex>("19683").is_err());
        assert_eq!(
            serde_json::from_str::<BoardIndex>("42").unwrap(),
            BoardIndex(42)
        );
    }

    #[test]
    fn test_count_and_empty_cells() {
        let board: Board = "XO  X   O".parse().unwrap();
        assert_eq!(board.count(Player::X), 2);
        assert_eq!(board.count(Player::O), 2);
        assert_eq!(board.empty_cells().as_slice(), &[2, 3, 5, 6, 7]);
    }
}
