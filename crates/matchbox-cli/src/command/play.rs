use std::{
    io::{self, BufRead, Write as _},
    path::PathBuf,
};

use anyhow::{Context as _, bail};
use matchbox_engine::{GameSession, LogEntry, Player, SessionState};
use matchbox_training::{WeightStore, agent, learning};
use rand::Rng;

use crate::{command::StoreArg, util, view};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Number of human players: 0 (computer vs computer), 1 (human X vs computer O) or 2
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=2))]
    humans: u8,
    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: usize,
    /// Keep the matchboxes unchanged between games
    #[arg(long)]
    no_learn: bool,
    /// Append the played games to this move log file
    #[arg(long, value_name = "LOG")]
    log_file: Option<PathBuf>,
    /// Seed for the computer's random choices
    #[arg(long)]
    seed: Option<u64>,
    #[clap(flatten)]
    store: StoreArg,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            humans: 1,
            games: 1,
            no_learn: false,
            log_file: None,
            seed: None,
            store: StoreArg::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seat {
    Human,
    Computer,
}

#[derive(Debug, Clone, Copy)]
struct Seats {
    x: Seat,
    o: Seat,
}

impl Seats {
    fn for_humans(humans: u8) -> Self {
        match humans {
            0 => Self {
                x: Seat::Computer,
                o: Seat::Computer,
            },
            1 => Self {
                x: Seat::Human,
                o: Seat::Computer,
            },
            _ => Self {
                x: Seat::Human,
                o: Seat::Human,
            },
        }
    }

    fn get(self, player: Player) -> Seat {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        humans,
        games,
        no_learn,
        log_file,
        seed,
        store,
    } = arg;

    let mut store = store.load()?;
    let mut rng = util::build_rng(*seed);
    let seats = Seats::for_humans(*humans);
    let mut input = io::stdin().lock();

    println!("The board is numbered like this:");
    println!("{}", view::render_numbering());

    let mut log = vec![];
    for game in 1..=*games {
        println!();
        println!("Game {game} of {games}");
        let (_, entries) = play_game(&mut store, seats, &mut input, &mut rng)?;
        if !no_learn {
            learning::learn_from_games(&mut store, &entries)
                .context("Failed to learn from the finished game")?;
        }
        log.extend(entries);
    }

    if let Some(path) = log_file {
        util::append_log_file(path, &log)?;
        println!();
        println!("Games appended to {}", path.display());
    }
    Ok(())
}

fn play_game<B, R>(
    store: &mut WeightStore,
    seats: Seats,
    input: &mut B,
    rng: &mut R,
) -> anyhow::Result<(SessionState, Vec<LogEntry>)>
where
    B: BufRead,
    R: Rng + ?Sized,
{
    let mut session = GameSession::new();
    let mut state = session.state();
    while state.is_in_progress() {
        let player = session.to_move();
        let before = *session.board();
        let cell = match seats.get(player) {
            Seat::Human => loop {
                let cell = read_move(input, player)?;
                match before.validate_move(player, cell) {
                    Ok(()) => break cell,
                    Err(e) => println!("Cell {cell} can't be played: {e}"),
                }
            },
            Seat::Computer => {
                let cell = agent::choose_move(store, &before, rng)
                    .context("The computer could not find a move")?;
                println!("The computer has chosen {cell}.");
                cell
            }
        };

        state = session
            .play(cell)
            .with_context(|| format!("Move {cell} by {player} was rejected"))?;

        let mut placed = before;
        placed.place(player, cell);
        println!("{placed}");
        let symmetry = placed.canonical().symmetry;
        if !symmetry.is_identity() {
            if symmetry.rotations() > 0 {
                println!("Rotate {} times", symmetry.rotations());
            }
            if symmetry.is_flipped() {
                println!("Flip horizontally");
            }
            println!("{}", session.board());
        }
    }

    match state {
        SessionState::Won(player) => println!("{player} is the winner!"),
        SessionState::Draw => println!("No winner! Cat's game."),
        SessionState::InProgress => {}
    }
    Ok((state, session.into_log()))
}

/// Prompts `player` until a cell number is entered.
fn read_move<B>(input: &mut B, player: Player) -> anyhow::Result<usize>
where
    B: BufRead,
{
    loop {
        print!("Tell me your move, {player}: ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            bail!("input closed before {player} made a move");
        }
        match line.trim().parse() {
            Ok(cell) => return Ok(cell),
            Err(_) => println!("`{}` is not a cell number", line.trim()),
        }
    }
}
