use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use matchbox_training::{DEFAULT_INITIAL_WEIGHT, WeightStore, learning};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use crate::util;

use self::{play::PlayArg, self_play::SelfPlayArg, show::ShowArg, train::TrainArg};

mod play;
mod self_play;
mod show;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log verbosity (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: LevelFilter,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play games on the console against the matchbox agent or another human
    Play(#[clap(flatten)] PlayArg),
    /// Replay move log files into a fresh matchbox store
    Train(#[clap(flatten)] TrainArg),
    /// Let the matchbox agent play against itself, learning after each game
    SelfPlay(#[clap(flatten)] SelfPlayArg),
    /// Print a board index and its matchbox
    Show(#[clap(flatten)] ShowArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    TermLogger::init(
        args.log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Train(arg) => train::run(&arg)?,
        Mode::SelfPlay(arg) => self_play::run(&arg)?,
        Mode::Show(arg) => show::run(&arg)?,
    }
    Ok(())
}

/// Options shared by every command that plays from a matchbox store.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct StoreArg {
    /// Beads given to each empty cell of a new matchbox
    #[arg(
        long,
        default_value_t = DEFAULT_INITIAL_WEIGHT,
        value_parser = clap::value_parser!(u32).range(1..),
    )]
    initial_weight: u32,
    /// Move log files to learn from before starting (may be repeated)
    #[arg(long, value_name = "LOG")]
    learn_from: Vec<PathBuf>,
}

impl Default for StoreArg {
    fn default() -> Self {
        Self {
            initial_weight: DEFAULT_INITIAL_WEIGHT,
            learn_from: vec![],
        }
    }
}

impl StoreArg {
    pub(crate) fn load(&self) -> anyhow::Result<WeightStore> {
        let mut store = WeightStore::with_initial_weight(self.initial_weight);
        for path in &self.learn_from {
            let entries = util::read_log_file(path)?;
            let summary = learning::learn_from_games(&mut store, &entries).with_context(|| {
                format!("Failed to learn from move log file: {}", path.display())
            })?;
            log::info!(
                "learned {} games from {} ({} boxes in store)",
                summary.games,
                path.display(),
                store.len()
            );
        }
        Ok(store)
    }
}
