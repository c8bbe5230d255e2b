use matchbox_engine::Board;
use rand::Rng;

use crate::{
    store::WeightStore,
    weights::{NoSelectableCell, WeightVector},
};

/// Picks the matchbox agent's move on `board`.
///
/// The board's box is looked up (and created on first use) by the board's exact
/// index, so callers that want symmetric positions to share a box pass a
/// canonical board, as [`GameSession`](matchbox_engine::GameSession) does.
pub fn choose_move<R>(
    store: &mut WeightStore,
    board: &Board,
    rng: &mut R,
) -> Result<usize, NoSelectableCell>
where
    R: Rng + ?Sized,
{
    let weights: &WeightVector = store.lookup(board.index());
    let cell = weights.pick(rng)?;
    log::debug!(
        "matchbox {} {:?} picked {cell}",
        board.index(),
        weights.as_array()
    );
    Ok(cell)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_choose_move_picks_empty_cell() {
        let mut store = WeightStore::new();
        let mut rng = Pcg32::seed_from_u64(1);
        let board: Board = "XO  X   O".parse().unwrap();
        for _ in 0..200 {
            let cell = choose_move(&mut store, &board, &mut rng).unwrap();
            assert!(board.cell(cell).is_empty(), "picked occupied cell {cell}");
        }
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_choose_move_follows_learned_weights() {
        let mut store = WeightStore::new();
        let mut rng = Pcg32::seed_from_u64(2);
        let board: Board = "XO  X   O".parse().unwrap();
        *store.lookup(board.index()) = WeightVector::new([0, 0, 0, 0, 0, 0, 0, 5, 0]);
        for _ in 0..50 {
            assert_eq!(choose_move(&mut store, &board, &mut rng), Ok(7));
        }
    }

    #[test]
    fn test_choose_move_on_empty_box() {
        let mut store = WeightStore::new();
        let mut rng = Pcg32::seed_from_u64(3);
        // a full board has no selectable cell
        let board: Board = "XOXXOOOXX".parse().unwrap();
        assert_eq!(
            choose_move(&mut store, &board, &mut rng),
            Err(NoSelectableCell)
        );
    }
}
