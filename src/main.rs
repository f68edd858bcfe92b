//! Onitama-Rust: self-play and inspection front end.
//!
//! ## Usage
//!
//! - `onitama-rust` - Show a demo
//! - `onitama-rust play` - Play a full match between two strategies
//! - `onitama-rust inspect` - Rank the opening moves by heuristic value

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};

use onitama_rust::card::{Card, find_card, standard_deck};
use onitama_rust::constants::{DEFAULT_DEPTH, DEFAULT_ITERATIONS};
use onitama_rust::eval::score_player;
use onitama_rust::export::{write_csv_header, write_csv_row, write_dot};
use onitama_rust::game::Match;
use onitama_rust::mcts::Tree;
use onitama_rust::state::{BoardState, create_initial_state, deal};
use onitama_rust::strategy::Strategy;

/// Onitama-Rust: rules engine with random, greedy, negamax and MCTS players
#[derive(Parser)]
#[command(name = "onitama-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log search details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a full self-play match
    Play(PlayArgs),
    /// List the moves of the opening position ranked by utility
    Inspect(DealArgs),
    /// Run a simple demo of the engine
    Demo,
}

#[derive(Args)]
struct DealArgs {
    /// RNG seed for the deal and the strategies
    #[arg(long)]
    seed: Option<u64>,

    /// Five card names: two for player 1, two for player 2, one floating
    #[arg(long, value_delimiter = ',')]
    cards: Vec<String>,
}

#[derive(Args)]
struct PlayArgs {
    #[command(flatten)]
    deal: DealArgs,

    /// Strategy for player 1
    #[arg(long, value_enum, default_value_t = StrategyKind::Mcts)]
    player1: StrategyKind,

    /// Strategy for player 2
    #[arg(long, value_enum, default_value_t = StrategyKind::Utility)]
    player2: StrategyKind,

    /// MCTS iterations per move
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,

    /// Negamax depth
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: u32,

    /// Stop after this many plies
    #[arg(long)]
    max_plies: Option<usize>,

    /// Write a per-move CSV log
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write a Graphviz dump of the search tree
    #[arg(long)]
    dot: Option<PathBuf>,
}

#[derive(Copy, Clone, ValueEnum)]
enum StrategyKind {
    Random,
    Utility,
    Negamax,
    ParallelNegamax,
    Mcts,
}

impl StrategyKind {
    fn with_budget(self, iterations: usize, depth: u32) -> Strategy {
        match self {
            StrategyKind::Random => Strategy::Random,
            StrategyKind::Utility => Strategy::Utility,
            StrategyKind::Negamax => Strategy::Negamax { depth },
            StrategyKind::ParallelNegamax => Strategy::ParallelNegamax { depth },
            StrategyKind::Mcts => Strategy::Mcts { iterations },
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Some(Commands::Play(args)) => run_play(args),
        Some(Commands::Inspect(args)) => run_inspect(args),
        Some(Commands::Demo) | None => run_demo(),
    }
}

fn make_rng(seed: Option<u64>) -> fastrand::Rng {
    match seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    }
}

fn opening(args: &DealArgs, rng: &mut fastrand::Rng) -> Result<BoardState> {
    if args.cards.is_empty() {
        return deal(&standard_deck(), rng).context("dealing the standard deck");
    }
    if args.cards.len() != 5 {
        bail!("--cards needs exactly 5 names, got {}", args.cards.len());
    }
    let cards = args
        .cards
        .iter()
        .map(|name| find_card(name).with_context(|| format!("unknown card {name:?}")))
        .collect::<Result<Vec<Card>>>()?;
    create_initial_state([cards[0], cards[1]], [cards[2], cards[3]], cards[4])
        .context("building the opening position")
}

fn run_play(args: PlayArgs) -> Result<()> {
    let mut rng = make_rng(args.deal.seed);
    let state = opening(&args.deal, &mut rng)?;
    print!("{}", state.render());

    let player1 = args.player1.with_budget(args.iterations, args.depth);
    let player2 = args.player2.with_budget(args.iterations, args.depth);
    let mut game = Match::new(state, player1, player2);
    if let Some(m) = args.max_plies {
        game = game.with_max_plies(m);
    }

    let mut csv = match &args.csv {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let mut w = BufWriter::new(file);
            write_csv_header(&mut w)?;
            Some(w)
        }
        None => None,
    };

    loop {
        let node = game.current();
        let next = game.step(&mut rng);
        if let Some(w) = csv.as_mut() {
            write_csv_row(w, game.tree(), node, next)?;
        }
        match next {
            Some(id) => {
                let state = game.tree().node(id).state();
                println!("ply {}: {}", game.plies(), state);
            }
            None => break,
        }
    }
    if let Some(mut w) = csv {
        w.flush()?;
    }

    if let Some(path) = &args.dot {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut w = BufWriter::new(file);
        write_dot(&mut w, game.tree(), game.tree().root(), game.current())?;
        w.flush()?;
    }

    let result = game.result();
    print!("{}", result.final_state.render());
    println!("Player {} wins after {} plies", result.winner, result.plies);
    Ok(())
}

fn run_inspect(args: DealArgs) -> Result<()> {
    let mut rng = make_rng(args.seed);
    let state = opening(&args, &mut rng)?;
    print!("{}", state.render());

    let mut tree = Tree::new(state);
    let root = tree.root();
    tree.expand(root);
    for c in tree.children_by_utility(root) {
        let child = tree.node(c).state();
        println!(
            "{}\t{}\t{}",
            child.army1,
            child.army2,
            score_player(child, state.player)
        );
    }
    Ok(())
}

fn run_demo() -> Result<()> {
    println!("Onitama-Rust: Onitama MCTS Engine\n");

    let mut rng = fastrand::Rng::with_seed(1);
    let state = deal(&standard_deck(), &mut rng)?;
    println!("=== Opening ===");
    print!("{}", state.render());

    println!("\n=== MCTS Demo ===");
    let mut tree = Tree::new(state);
    let root = tree.root();
    println!("Running 500 MCTS iterations...");
    let Some(best) = tree.search(root, 500, &mut rng) else {
        println!("No legal move");
        return Ok(());
    };
    let node = tree.node(best);
    println!("Best move: {}", node.state());
    println!(
        "Visits: {}, win rate for player {}: {:.1}%",
        node.visit_count(),
        state.player,
        node.win_ratio(state.player) * 100.0
    );
    println!("Tree size: {} nodes", tree.len());
    Ok(())
}
