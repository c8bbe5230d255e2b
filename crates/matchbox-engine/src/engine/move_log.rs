use std::{fmt, num::ParseIntError, str::FromStr};

use crate::core::{BoardIndex, CELL_COUNT, Player};

/// One line of the textual move log.
///
/// | Line          | Meaning                                        |
/// |---------------|------------------------------------------------|
/// | `I <index>`   | index of the board before the next move        |
/// | `M <p> <cell>`| player `p` marked `cell` (0–8)                 |
/// | `R <n>`       | the board was rotated `n` times afterwards     |
/// | `F <n>`       | the board was flipped `n` times afterwards     |
/// | `W <p>`       | the game ended, `p` won                        |
/// | `C`           | the game ended in a draw                       |
///
/// # Example
///
/// ```
/// use matchbox_engine::{LogEntry, Player};
///
/// let entry: LogEntry = "M X 4".parse().unwrap();
/// assert_eq!(entry, LogEntry::Move { player: Player::X, cell: 4 });
/// assert_eq!(entry.to_string(), "M X 4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogEntry {
    Index(BoardIndex),
    Move { player: Player, cell: usize },
    Rotations(u8),
    Flips(u8),
    Win(Player),
    Draw,
}

impl LogEntry {
    #[must_use]
    pub const fn tag(&self) -> char {
        match self {
            LogEntry::Index(_) => 'I',
            LogEntry::Move { .. } => 'M',
            LogEntry::Rotations(_) => 'R',
            LogEntry::Flips(_) => 'F',
            LogEntry::Win(_) => 'W',
            LogEntry::Draw => 'C',
        }
    }

    /// Returns `true` for the lines that close a game (`W` and `C`).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, LogEntry::Win(_) | LogEntry::Draw)
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.tag();
        match self {
            LogEntry::Index(index) => write!(f, "{tag} {index}"),
            LogEntry::Move { player, cell } => write!(f, "{tag} {player} {cell}"),
            LogEntry::Rotations(n) | LogEntry::Flips(n) => write!(f, "{tag} {n}"),
            LogEntry::Win(player) => write!(f, "{tag} {player}"),
            LogEntry::Draw => write!(f, "{tag}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseLogEntryError {
    #[display("empty line")]
    Empty,
    #[display("unknown line tag `{tag}`")]
    UnknownTag { tag: String },
    #[display("`{tag}` line is missing its {field}")]
    MissingField { tag: char, field: &'static str },
    #[display("`{tag}` line has unexpected trailing field `{field}`")]
    TrailingField { tag: char, field: String },
    #[display("invalid {field} `{value}` in `{tag}` line: {source}")]
    InvalidNumber {
        tag: char,
        field: &'static str,
        value: String,
        source: ParseIntError,
    },
    #[display("invalid player `{value}` in `{tag}` line")]
    InvalidPlayer { tag: char, value: String },
    #[display("board index {value} is out of range")]
    IndexOutOfRange { value: u32 },
    #[display("cell {value} is out of range")]
    CellOutOfRange { value: usize },
}

struct Fields<'a> {
    tag: char,
    iter: std::str::SplitWhitespace<'a>,
}

impl<'a> Fields<'a> {
    fn field(&mut self, field: &'static str) -> Result<&'a str, ParseLogEntryError> {
        self.iter.next().ok_or(ParseLogEntryError::MissingField {
            tag: self.tag,
            field,
        })
    }

    fn number<T>(&mut self, field: &'static str) -> Result<T, ParseLogEntryError>
    where
        T: FromStr<Err = ParseIntError>,
    {
        let value = self.field(field)?;
        value
            .parse()
            .map_err(|source| ParseLogEntryError::InvalidNumber {
                tag: self.tag,
                field,
                value: value.to_owned(),
                source,
            })
    }

    fn player(&mut self) -> Result<Player, ParseLogEntryError> {
        let value = self.field("player")?;
        let mut chars = value.chars();
        match (chars.next().and_then(Player::from_char), chars.next()) {
            (Some(player), None) => Ok(player),
            _ => Err(ParseLogEntryError::InvalidPlayer {
                tag: self.tag,
                value: value.to_owned(),
            }),
        }
    }

    fn finish(mut self) -> Result<(), ParseLogEntryError> {
        match self.iter.next() {
            Some(field) => Err(ParseLogEntryError::TrailingField {
                tag: self.tag,
                field: field.to_owned(),
            }),
            None => Ok(()),
        }
    }
}

impl FromStr for LogEntry {
    type Err = ParseLogEntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut iter = s.split_whitespace();
        let tag_str = iter.next().ok_or(ParseLogEntryError::Empty)?;
        let mut chars = tag_str.chars();
        let tag = match (chars.next(), chars.next()) {
            (Some(tag), None) => tag,
            _ => {
                return Err(ParseLogEntryError::UnknownTag {
                    tag: tag_str.to_owned(),
                });
            }
        };
        let mut fields = Fields { tag, iter };

        let entry = match tag {
            'I' => {
                let value: u32 = fields.number("board index")?;
                let index = BoardIndex::try_from(value)
                    .map_err(|e| ParseLogEntryError::IndexOutOfRange { value: e.value })?;
                LogEntry::Index(index)
            }
            'M' => {
                let player = fields.player()?;
                let cell: usize = fields.number("cell")?;
                if cell >= CELL_COUNT {
                    return Err(ParseLogEntryError::CellOutOfRange { value: cell });
                }
                LogEntry::Move { player, cell }
            }
            'R' => LogEntry::Rotations(fields.number("rotation count")?),
            'F' => LogEntry::Flips(fields.number("flip count")?),
            'W' => LogEntry::Win(fields.player()?),
            'C' => LogEntry::Draw,
            _ => {
                return Err(ParseLogEntryError::UnknownTag {
                    tag: tag_str.to_owned(),
                });
            }
        };
        fields.finish()?;
        Ok(entry)
    }
}

/// Error from [`parse_log_text`], locating the offending line.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("line {line}: {source}")]
pub struct ParseLogTextError {
    /// 1-based line number.
    pub line: usize,
    pub source: ParseLogEntryError,
}

/// Parses a newline-separated move log, skipping blank lines.
pub fn parse_log_text(text: &str) -> Result<Vec<LogEntry>, ParseLogTextError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            line.parse()
                .map_err(|source| ParseLogTextError { line: i + 1, source })
        })
        .collect()
}

/// Formats entries one per line, each terminated by a newline.
#[must_use]
pub fn format_log_text(entries: &[LogEntry]) -> String {
    let mut text = String::new();
    for entry in entries {
        text.push_str(&entry.to_string());
        text.push('\n');
    }
    text
}
