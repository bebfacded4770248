//! # Boggle Solver
//!
//! Boggle is a word game played on a grid of lettered dice, usually 4×4. Each
//! player races to find words traced through chains of adjacent dice, where
//! adjacency includes the diagonals and no die may be used twice in the same
//! word. The "Q" die reads "Qu", so that it can actually be used.
//!
//! This program finds every word on a board. Via command line options, the
//! user can specify the dictionary to use, then either solve a board given on
//! the command line (or a random one), or interact with the program via a
//! text-based user interface (TUI) to enter a board and browse its solutions.

mod app;
mod tui;

use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, trace};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use app::App;
use boggle_solver::{
	board::{Board, DuplicatePolicy},
	dictionary::Dictionary,
	solver::{Solver, Strategy, DEFAULT_RANGE_CUTOFF},
	sort::{ranked_words, sort_paths, SortOrder}
};
use tui::tui;

////////////////////////////////////////////////////////////////////////////////
//                           Command line options.                            //
////////////////////////////////////////////////////////////////////////////////

/// CLI for solving Boggle boards.
#[derive(Clone, Debug, Parser)]
#[command(version = "1.0", author = "Todd L Smith")]
struct Opts
{
	/// The path to the directory containing the dictionary files.
	#[arg(short = 'd', long, default_value = "dict")]
	directory: String,

	/// The name of the dictionary. This is the name shared by the text and
	/// binary files, sans the extension.
	#[arg(short = 'n', long, default_value = "english")]
	dictionary: String,

	/// The shortest word worth finding. Shorter dictionary words are dropped
	/// when the dictionary is loaded.
	#[arg(short = 'm', long, default_value = "3")]
	min_length: usize,

	#[command(subcommand)]
	command: Command
}

/// The subcommands of the CLI.
#[derive(Clone, Debug, Subcommand)]
enum Command
{
	/// Just generate the binary dictionary and exit.
	Generate,

	/// Solve a single board, printing the board to standard error and the
	/// solution to standard output.
	Solve {
		/// The board, as rows separated by `/`, e.g., `abcd/efgh/ijkl/mnop`.
		/// Within a row, either one letter per cell (`qu` is one cell) or
		/// whitespace-separated cells. Omit for a random board.
		board: Option<String>,

		/// The number of columns of a random board.
		#[arg(long, default_value = "4")]
		width: usize,

		/// The number of rows of a random board.
		#[arg(long, default_value = "4")]
		height: usize,

		/// The seed for a random board. Omit for a different board every time.
		#[arg(long)]
		seed: Option<u64>,

		/// How to rank the solution.
		#[arg(long, value_enum, default_value_t = SortArg::Score)]
		sort: SortArg,

		/// How to distribute the search.
		#[arg(long, value_enum, default_value_t = StrategyArg::ForkJoin)]
		strategy: StrategyArg,

		/// The range size below which the `ranges` strategy stops
		/// bisecting.
		#[arg(long, default_value_t = DEFAULT_RANGE_CUTOFF)]
		cutoff: usize,

		/// Run on a dedicated pool of this many worker threads, rather than
		/// one per core.
		#[arg(long)]
		threads: Option<usize>,

		/// Record a path again if it is found again.
		#[arg(long)]
		keep_duplicates: bool,

		/// Print every solution path, with its score and positions, rather
		/// than each distinct word once.
		#[arg(long)]
		paths: bool
	},

	/// Open the text-based user interface (TUI) for entering and solving a
	/// board. The solution will be written to standard output.
	Play {
		/// The number of columns.
		#[arg(long, default_value = "4")]
		width: usize,

		/// The number of rows.
		#[arg(long, default_value = "4")]
		height: usize,

		/// Suppress emission of the solution to standard output.
		#[arg(short = 'q', long)]
		quiet: bool
	}
}

/// The sort orders, as spelled on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortArg
{
	/// Highest score first.
	Score,

	/// Alphabetically.
	Alphabet
}

impl From<SortArg> for SortOrder
{
	fn from(arg: SortArg) -> Self
	{
		match arg
		{
			SortArg::Score => SortOrder::Score,
			SortArg::Alphabet => SortOrder::Alphabet
		}
	}
}

/// The search strategies, as spelled on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg
{
	/// One thread, depth-first.
	Sequential,

	/// A task per branch of the search.
	ForkJoin,

	/// Bisected ranges of start positions.
	Ranges
}

impl StrategyArg
{
	/// Resolve the strategy, using `cutoff` for [`Ranges`](Self::Ranges).
	fn resolve(self, cutoff: usize) -> Strategy
	{
		match self
		{
			Self::Sequential => Strategy::Sequential,
			Self::ForkJoin => Strategy::ForkJoin,
			Self::Ranges => Strategy::Ranges { cutoff }
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                               Main program.                                //
////////////////////////////////////////////////////////////////////////////////

/// Parse the command line options and execute the appropriate subcommand.
fn main()
{
	env_logger::init();

	// Parse the command line options.
	let opts = Opts::parse();
	debug!("Command line options: {:?}", opts);

	// Open the dictionary, creating the binary dictionary if necessary.
	let dictionary = Dictionary::open(
		&opts.directory,
		&opts.dictionary,
		opts.min_length
	)
		.unwrap_or_else(|e|
			panic!(
				"Failed to open dictionary: {}/{}.{}.dict or {0}/{1}.txt: {}",
				opts.directory,
				opts.dictionary,
				opts.min_length,
				e
			)
		);
	let dictionary = Arc::new(dictionary);

	// Execute the appropriate subcommand.
	match opts.command
	{
		Command::Generate =>
		{
			trace!("Exiting after generating binary dictionary");
		},
		Command::Solve {
			board,
			width,
			height,
			seed,
			sort,
			strategy,
			cutoff,
			threads,
			keep_duplicates,
			paths
		} =>
		{
			let board = match board
			{
				Some(text) => text.parse::<Board>()
					.unwrap_or_else(|e| panic!("Invalid board: {}: {}", text, e)),
				None =>
				{
					let seed = seed.unwrap_or_else(rand::random);
					debug!("Random board seed: {}", seed);
					let mut rng = ChaCha8Rng::seed_from_u64(seed);
					Board::random(width, height, &mut rng)
						.unwrap_or_else(|e| panic!("Invalid board: {}", e))
				}
			};
			let board = board.with_duplicate_policy(
				if keep_duplicates { DuplicatePolicy::Accept }
				else { DuplicatePolicy::Suppress }
			);
			let mut solver = Solver::new(dictionary)
				.with_strategy(strategy.resolve(cutoff));
			if let Some(threads) = threads
			{
				solver = solver.with_threads(threads)
					.unwrap_or_else(|e| panic!("Failed to start workers: {}", e));
			}
			eprint!("{}", board);
			solver.solve(&board);
			print_solution(&board, sort.into(), paths);
		},
		Command::Play { width, height, quiet } =>
		{
			trace!("Opening TUI");
			let app = App::new(Solver::new(dictionary), width, height)
				.unwrap_or_else(|e| panic!("Invalid board: {}", e));
			let solution = tui(|terminal| app.run(terminal))
				.unwrap_or_else(|e| panic!("Failed to drive TUI: {}", e));
			if !quiet
			{
				for word in solution
				{
					println!("{}", word);
				}
			}
		}
	}
}

/// Print the solution to standard output.
///
/// # Arguments
///
/// * `board` - The solved board.
/// * `order` - How to rank the solution.
/// * `paths` - Whether to print every path rather than every distinct word.
fn print_solution(board: &Board, order: SortOrder, paths: bool)
{
	let mut solutions = board.solutions();
	if paths
	{
		sort_paths(&mut solutions, order);
		for path in solutions
		{
			let positions = path.positions().iter()
				.map(ToString::to_string)
				.collect::<Vec<_>>()
				.join(" ");
			println!("{} {}", path, positions);
		}
	}
	else
	{
		for word in ranked_words(&solutions, order)
		{
			println!("{}", word);
		}
	}
}
