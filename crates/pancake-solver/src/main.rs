//! CLI entry point for the pancake solver.
//!
//! Usage:
//!   pancake-solver solve [--size <n> | --values <list>] [options]
//!   pancake-solver bench [--min-size <n>] [--max-size <n>] [options]
//!
//! Options:
//!   --strategy <s>          breadth, depth, random, heuristic-a, heuristic-b, best-first
//!   --heuristic <h>         inversions, fixed-points, gaps (best-first only)
//!   --seed <n>              Seed for puzzle generation and random search
//!   --max-iterations <n>    Random walks before giving up (default: 10000)
//!   --max-walk-steps <n>    Moves per random walk (default: unbounded)
//!
//! Results are printed as JSON on stdout; logs go to stderr (see RUST_LOG).

use clap::{Parser, Subcommand};
use rand::Rng;
use serde::Serialize;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use pancake_solver::{
    move_between, seeded_rng, solve, Heuristic, PancakeError, SolverConfig, SolverResult, State,
    Strategy, DEFAULT_MAX_ITERATIONS,
};

#[derive(Parser)]
#[command(name = "pancake-solver")]
#[command(about = "Search strategies for the pancake sorting puzzle")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve one puzzle and print the move sequence
    Solve {
        /// Number of pancakes in a random puzzle
        #[arg(long, default_value = "7", conflicts_with = "values")]
        size: usize,

        /// Explicit puzzle, e.g. "3,1,2"
        #[arg(long, value_delimiter = ',')]
        values: Option<Vec<u32>>,

        /// Search strategy
        #[arg(long, value_enum, default_value = "breadth")]
        strategy: Strategy,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Time strategies over a range of puzzle sizes
    Bench {
        /// Smallest puzzle size
        #[arg(long, default_value = "5")]
        min_size: usize,

        /// Largest puzzle size
        #[arg(long, default_value = "10")]
        max_size: usize,

        /// Strategies to time (repeatable)
        #[arg(long = "strategy", value_enum, default_values = ["breadth", "depth", "random"])]
        strategies: Vec<Strategy>,

        #[command(flatten)]
        search: SearchArgs,
    },
}

#[derive(clap::Args)]
struct SearchArgs {
    /// Heuristic for the best-first strategy
    #[arg(long, value_enum, default_value = "gaps")]
    heuristic: Heuristic,

    /// Seed for puzzle generation and random search
    #[arg(long)]
    seed: Option<u64>,

    /// Random walks before the random strategy gives up
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Moves per random walk before it is abandoned
    #[arg(long)]
    max_walk_steps: Option<usize>,
}

impl SearchArgs {
    fn config(&self, strategy: Strategy, seed: u64) -> SolverConfig {
        SolverConfig {
            strategy,
            heuristic: self.heuristic,
            max_iterations: self.max_iterations,
            max_walk_steps: self.max_walk_steps,
            seed: Some(seed),
        }
    }
}

/// Output format for a single solve
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    strategy: Strategy,
    initial: Vec<u32>,
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    goal: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    steps: Option<Vec<StepOutput>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<usize>,
    states_explored: usize,
    states_generated: usize,
    trials: usize,
    seed: u64,
    time_elapsed_secs: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StepOutput {
    step: usize,
    /// Reversal index that produced this state (absent for the root)
    #[serde(skip_serializing_if = "Option::is_none")]
    reversed_from: Option<usize>,
    values: Vec<u32>,
}

/// Output format for one benchmark run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BenchOutput {
    size: usize,
    strategy: Strategy,
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<usize>,
    states_explored: usize,
    time_elapsed_secs: f64,
}

fn main() {
    init_logging();

    let cli = Cli::parse();

    let code = match run(cli.command) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            eprintln!("Error: {}", e);
            2
        }
    };
    std::process::exit(code);
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run a command, returning whether every puzzle was solved
fn run(command: Commands) -> Result<bool, PancakeError> {
    match command {
        Commands::Solve {
            size,
            values,
            strategy,
            search,
        } => {
            let (mut rng, seed) = seeded_rng(search.seed);
            let root = match values {
                Some(values) => State::from_values(&values)?,
                None if size == 0 => return Err(PancakeError::EmptyPuzzle),
                None => State::random(size, &mut rng),
            };

            let result = solve(&root, &search.config(strategy, seed));
            let output = format_result(&root, &result);
            print_json(&output, true)?;
            Ok(result.found)
        }

        Commands::Bench {
            min_size,
            max_size,
            strategies,
            search,
        } => {
            if min_size == 0 || min_size > max_size {
                return Err(PancakeError::InvalidSizeRange {
                    min: min_size,
                    max: max_size,
                });
            }

            let (mut rng, _) = seeded_rng(search.seed);
            let mut all_found = true;
            for size in min_size..=max_size {
                for &strategy in &strategies {
                    let root = State::random(size, &mut rng);
                    let config = search.config(strategy, rng.random());
                    let result = solve(&root, &config);
                    all_found &= result.found;

                    let output = BenchOutput {
                        size,
                        strategy,
                        found: result.found,
                        moves: result.moves(),
                        states_explored: result.states_explored,
                        time_elapsed_secs: result.time_elapsed.as_secs_f64(),
                    };
                    print_json(&output, false)?;
                }
            }
            Ok(all_found)
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), PancakeError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    println!("{}", rendered?);
    Ok(())
}

fn format_result(root: &State, result: &SolverResult) -> SolveOutput {
    let steps = result.path.as_ref().map(|path| {
        path.iter()
            .enumerate()
            .map(|(i, state)| StepOutput {
                step: i + 1,
                reversed_from: (i > 0)
                    .then(|| move_between(&path[i - 1], state))
                    .flatten(),
                values: state.values().to_vec(),
            })
            .collect()
    });

    SolveOutput {
        strategy: result.strategy,
        initial: root.values().to_vec(),
        found: result.found,
        goal: result.goal.as_ref().map(|g| g.values().to_vec()),
        steps,
        moves: result.moves(),
        states_explored: result.states_explored,
        states_generated: result.states_generated,
        trials: result.trials,
        seed: result.seed,
        time_elapsed_secs: result.time_elapsed.as_secs_f64(),
    }
}
