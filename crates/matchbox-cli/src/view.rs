//! Console renderings of boards and matchboxes.
//!
//! All views share the board's grid layout: three centred 3-character squares
//! per row joined by `|`, rows separated by `-----------`.

use std::fmt::Write as _;

use matchbox_engine::{BOARD_SIZE, Board, Cell};
use matchbox_training::weights::WeightVector;

const ROW_SEPARATOR: &str = "-----------";

fn render_grid<F>(mut square: F) -> String
where
    F: FnMut(usize) -> String,
{
    let mut out = String::new();
    for row in 0..BOARD_SIZE {
        if row > 0 {
            out.push('\n');
            out.push_str(ROW_SEPARATOR);
            out.push('\n');
        }
        for col in 0..BOARD_SIZE {
            if col > 0 {
                out.push('|');
            }
            let _ = write!(out, "{:^3}", square(row * BOARD_SIZE + col));
        }
    }
    out
}

/// The board with every square labelled by its cell number.
pub fn render_numbering() -> String {
    render_grid(|cell| cell.to_string())
}

/// The board with every empty square replaced by its weight in `weights`.
pub fn render_matchbox(board: &Board, weights: &WeightVector) -> String {
    render_grid(|cell| match board.cell(cell) {
        Cell::Empty => weights.get(cell).to_string(),
        Cell::Mark(player) => player.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_numbering() {
        assert_eq!(
            render_numbering(),
            " 0 | 1 | 2 \n-----------\n 3 | 4 | 5 \n-----------\n 6 | 7 | 8 "
        );
    }

    #[test]
    fn test_render_matchbox_matches_board_layout() {
        let board: Board = "XO  X   O".parse().unwrap();
        let weights = WeightVector::new([0, 0, 3, 12, 0, 1, 0, 7, 0]);
        assert_eq!(
            render_matchbox(&board, &weights),
            " X | O | 3 \n-----------\n12 | X | 1 \n-----------\n 0 | 7 | O "
        );

        let fresh = WeightVector::default_for(&Board::EMPTY, 1);
        assert_eq!(render_matchbox(&Board::EMPTY, &fresh).matches(" 1 ").count(), 9);
    }

    #[test]
    fn test_render_board_grid_agrees_with_display() {
        let board: Board = "XO  X   O".parse().unwrap();
        let weights = WeightVector::new([0; 9]);
        let rendered = render_matchbox(&board, &weights).replace(" 0 ", "   ");
        assert_eq!(rendered, board.to_string());
    }
}
