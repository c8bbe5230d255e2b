use std::path::PathBuf;

use anyhow::Context as _;
use matchbox_training::self_play::{self, SelfPlayStats};

use crate::{command::StoreArg, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SelfPlayArg {
    /// Number of games to play
    #[arg(long, default_value_t = 1000)]
    games: usize,
    /// Seed for the agent's random choices
    #[arg(long)]
    seed: Option<u64>,
    /// Append the move log of every game to this file
    #[arg(long, value_name = "LOG")]
    log_file: Option<PathBuf>,
    #[clap(flatten)]
    store: StoreArg,
}

pub(crate) fn run(arg: &SelfPlayArg) -> anyhow::Result<()> {
    let SelfPlayArg {
        games,
        seed,
        log_file,
        store,
    } = arg;

    let mut store = store.load()?;
    let mut rng = util::build_rng(*seed);
    let (stats, summary, log) = self_play::self_play_and_learn(&mut store, *games, &mut rng)
        .context("Self-play failed")?;

    let SelfPlayStats {
        games,
        x_wins,
        o_wins,
        draws,
    } = stats;
    eprintln!("Self-play completed");
    eprintln!("  Games:      {games}");
    eprintln!("  X wins:     {x_wins} ({:.1}%)", percent(x_wins, games));
    eprintln!("  O wins:     {o_wins} ({:.1}%)", percent(o_wins, games));
    eprintln!("  Draws:      {draws} ({:.1}%)", percent(draws, games));
    eprintln!(
        "  Beads:      +{} / -{} ({} skipped)",
        summary.rewarded, summary.penalized, summary.skipped
    );
    eprintln!("  Matchboxes: {}", store.len());

    if let Some(path) = log_file {
        util::append_log_file(path, &log)?;
        eprintln!("Move log appended to {}", path.display());
    }
    Ok(())
}

#[expect(clippy::cast_precision_loss)]
fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 * 100.0 / total as f64
}
