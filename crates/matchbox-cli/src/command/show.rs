use anyhow::Context as _;
use matchbox_engine::{Board, BoardIndex};

use crate::{command::StoreArg, view};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ShowArg {
    /// Board index (0-19682)
    index: u16,
    #[clap(flatten)]
    store: StoreArg,
}

pub(crate) fn run(arg: &ShowArg) -> anyhow::Result<()> {
    let ShowArg { index, store } = arg;

    let index = BoardIndex::try_from(*index).context("Invalid board index")?;
    let mut store = store.load()?;
    let board = Board::from_index(index);
    let canonical = board.canonical();

    println!("Index {index}:");
    println!("{board}");
    if canonical.index != index {
        println!();
        println!(
            "Canonical index {} ({} rotations{}):",
            canonical.index,
            canonical.symmetry.rotations(),
            if canonical.symmetry.is_flipped() {
                ", flipped"
            } else {
                ""
            }
        );
        println!("{}", canonical.board);
    }

    let learned = store.get(index).is_some();
    let weights = *store.lookup(index);
    println!();
    println!(
        "Matchbox ({}, {} beads):",
        if learned { "learned" } else { "default" },
        weights.total()
    );
    println!("{}", view::render_matchbox(&board, &weights));
    Ok(())
}
