use std::path::PathBuf;

use anyhow::Context as _;
use matchbox_training::{
    DEFAULT_INITIAL_WEIGHT, WeightStore,
    learning::{self, LearningSummary},
};

use crate::{
    model::report::TrainingReport,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Move log files to replay, in order
    #[arg(required = true, value_name = "LOG")]
    logs: Vec<PathBuf>,
    /// Beads given to each empty cell of a new matchbox
    #[arg(
        long,
        default_value_t = DEFAULT_INITIAL_WEIGHT,
        value_parser = clap::value_parser!(u32).range(1..),
    )]
    initial_weight: u32,
    /// Write a JSON report of every learned matchbox
    #[arg(long)]
    report: bool,
    /// Report file path (stdout when omitted)
    #[arg(long, requires = "report")]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let TrainArg {
        logs,
        initial_weight,
        report,
        output,
    } = arg;

    let mut store = WeightStore::with_initial_weight(*initial_weight);
    let mut summary = LearningSummary::default();
    for path in logs {
        let entries = util::read_log_file(path)?;
        summary += learning::learn_from_games(&mut store, &entries)
            .with_context(|| format!("Failed to learn from move log file: {}", path.display()))?;
    }

    eprintln!("Training completed");
    eprintln!("  Logs:        {}", logs.len());
    eprintln!(
        "  Games:       {} ({} decisive, {} draws)",
        summary.games, summary.decisive_games, summary.draws
    );
    eprintln!("  Rewarded:    {}", summary.rewarded);
    eprintln!("  Penalized:   {}", summary.penalized);
    eprintln!("  Skipped:     {}", summary.skipped);
    eprintln!("  Matchboxes:  {}", store.len());

    if *report {
        let report = TrainingReport::new(logs.clone(), &store, summary);
        Output::save_json(&report, output.clone())?;
        if let Some(path) = output {
            eprintln!("Report saved to {}", path.display());
        }
    }
    Ok(())
}
