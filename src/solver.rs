//! # Solver
//!
//! Herein is the search engine for Boggle boards. From every cell whose glyph
//! begins some dictionary word, the solver walks the board depth-first,
//! recording each path that spells a word and abandoning each branch as soon
//! as its letters stop being a prefix of any word. This prefix pruning is what
//! keeps the search tractable: the raw number of simple paths on even a 4×4
//! board is astronomical.
//!
//! The walk can be distributed over a [rayon] work-stealing pool in two ways,
//! or run sequentially on the calling thread; see [`Strategy`]. Every strategy
//! finds the same solutions, differing only in how finely the work is split.

use std::{
	error::Error,
	fmt::{self, Display, Formatter},
	ops::Range,
	sync::Arc,
	time::Instant
};

use log::{debug, trace};
use rayon::{Scope, ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

use crate::{
	board::{Board, BoardError, Position},
	dictionary::Dictionary,
	path::SearchPath
};

/// The default number of start positions below which [`Strategy::Ranges`]
/// stops bisecting.
pub const DEFAULT_RANGE_CUTOFF: usize = 8;

////////////////////////////////////////////////////////////////////////////////
//                                Strategies.                                 //
////////////////////////////////////////////////////////////////////////////////

/// How the solver distributes the search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy
{
	/// Walk the board on the calling thread, using an explicit stack. This is
	/// the reference against which the parallel strategies are measured.
	Sequential,

	/// Spawn a task per start position. At every branching step, spawn all
	/// children but the last, and continue with the last child on the current
	/// worker. The number of live tasks is thus bounded by the branching of the
	/// search, not by the length of its paths.
	#[default]
	ForkJoin,

	/// Bisect the row-major range of start positions until a range holds at
	/// most `cutoff` positions, then search each such range sequentially on a
	/// single worker. Coarser than [`ForkJoin`](Self::ForkJoin), which pays
	/// off when the search from a single cell is cheap relative to scheduling
	/// a task.
	Ranges {
		/// The largest range that is searched without further bisection.
		cutoff: usize
	}
}

impl Strategy
{
	/// The [`Ranges`](Self::Ranges) strategy with the
	/// [default cutoff](DEFAULT_RANGE_CUTOFF).
	#[inline]
	pub const fn ranges() -> Self
	{
		Self::Ranges { cutoff: DEFAULT_RANGE_CUTOFF }
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                  Solver.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The Boggle solver. A solver owns a shared reference to its dictionary, so
/// it can solve any number of boards, from any number of threads.
#[derive(Debug)]
#[must_use]
pub struct Solver
{
	/// The dictionary to use for solving boards.
	dictionary: Arc<Dictionary>,

	/// How to distribute the search.
	strategy: Strategy,

	/// The dedicated worker pool, if any. Without one, parallel strategies use
	/// the global rayon pool.
	pool: Option<ThreadPool>
}

impl Solver
{
	/// Construct a new solver for the given dictionary, using the
	/// [default strategy](Strategy::ForkJoin) and the global worker pool.
	///
	/// # Arguments
	///
	/// * `dictionary` - The dictionary to use for solving boards.
	pub fn new(dictionary: Arc<Dictionary>) -> Self
	{
		Self { dictionary, strategy: Strategy::default(), pool: None }
	}

	/// Use the given strategy.
	#[inline]
	pub fn with_strategy(mut self, strategy: Strategy) -> Self
	{
		self.strategy = strategy;
		self
	}

	/// Run parallel strategies on a dedicated pool of the given number of
	/// worker threads, rather than on the global pool.
	///
	/// # Arguments
	///
	/// * `threads` - The number of worker threads.
	///
	/// # Errors
	///
	/// * [`SolverError::NoThreads`] if `threads` is zero.
	/// * [`SolverError::ThreadPool`] if the pool cannot be built.
	pub fn with_threads(mut self, threads: usize) -> Result<Self, SolverError>
	{
		if threads == 0
		{
			return Err(SolverError::NoThreads)
		}
		let pool = ThreadPoolBuilder::new()
			.num_threads(threads)
			.thread_name(|index| format!("boggle-worker-{}", index))
			.build()?;
		self.pool = Some(pool);
		Ok(self)
	}

	/// Get the dictionary.
	#[inline]
	#[must_use]
	pub fn dictionary(&self) -> &Dictionary { &self.dictionary }

	/// Get the strategy.
	#[inline]
	#[must_use]
	pub fn strategy(&self) -> Strategy { self.strategy }

	/// Find every dictionary word on the board, recording each solution path
	/// on the board itself. Returns once the search space is exhausted.
	///
	/// # Arguments
	///
	/// * `board` - The board to solve.
	pub fn solve(&self, board: &Board)
	{
		debug!(
			"solving {}×{} board with {:?}",
			board.width(),
			board.height(),
			self.strategy
		);
		let start_time = Instant::now();
		let before = board.solution_count();
		match &self.pool
		{
			Some(pool) => pool.install(|| self.run(board)),
			None => self.run(board)
		}
		debug!(
			"solved in {:?}: {} new solutions",
			start_time.elapsed(),
			board.solution_count() - before
		);
	}

	/// Find every dictionary word on the board that starts at the given
	/// position, searching sequentially on the calling thread.
	///
	/// # Arguments
	///
	/// * `board` - The board to solve.
	/// * `start` - The first position of every path.
	///
	/// # Errors
	///
	/// [`BoardError::OutOfBounds`] if `start` lies outside the board.
	pub fn solve_from(
		&self,
		board: &Board,
		start: Position
	) -> Result<(), BoardError>
	{
		if !board.contains(start)
		{
			return Err(BoardError::OutOfBounds(start))
		}
		self.search_from(board, start);
		Ok(())
	}
}

// Private implementation details.
impl Solver
{
	/// Dispatch to the configured strategy. Parallel strategies run on
	/// whichever pool is current.
	fn run(&self, board: &Board)
	{
		match self.strategy
		{
			Strategy::Sequential =>
			{
				for start in board.positions()
				{
					self.search_from(board, start);
				}
			}
			Strategy::ForkJoin => rayon::scope(|scope| {
				for start in board.positions()
				{
					if let Some(seed) = self.seed(board, start)
					{
						scope.spawn(move |scope| self.fork(scope, board, seed));
					}
				}
			}),
			Strategy::Ranges { cutoff } =>
				self.bisect(board, 0 .. board.len(), cutoff.max(1))
		}
	}

	/// Start a path at the given position, unless its glyph does not begin any
	/// word.
	fn seed(&self, board: &Board, start: Position) -> Option<SearchPath>
	{
		self.dictionary.contains_prefix(board.glyph(start).as_str())
			.then(|| SearchPath::start(board, start))
	}

	/// Perform one step of the search: record the path if it spells a word,
	/// and answer every extension of the path that is still a prefix of some
	/// word.
	///
	/// # Arguments
	///
	/// * `board` - The board being solved.
	/// * `path` - The path to expand.
	///
	/// # Returns
	///
	/// The surviving children of `path`, in neighbor order.
	fn expand(&self, board: &Board, path: &SearchPath) -> Vec<SearchPath>
	{
		if self.dictionary.contains_word(path.word())
		{
			trace!("found word: {}", path.word());
			board.push_solution(path.clone());
		}
		let mut candidate = String::with_capacity(path.word().len() + 2);
		board.adjacent(path.last())
			.filter(|&next| !path.contains(next))
			.filter(|&next| {
				candidate.clear();
				candidate.push_str(path.word());
				candidate.push_str(board.glyph(next).as_str());
				self.dictionary.contains_prefix(&candidate)
			})
			.map(|next| path.extended(board, next))
			.collect()
	}

	/// Exhaust the search from the given position, depth-first, using an
	/// explicit stack.
	fn search_from(&self, board: &Board, start: Position)
	{
		let Some(seed) = self.seed(board, start) else {
			trace!("no word begins at {}", start);
			return
		};
		let mut stack = vec![seed];
		while let Some(path) = stack.pop()
		{
			stack.extend(self.expand(board, &path));
		}
	}

	/// Exhaust the search below the given path, forking all children but the
	/// last at every step and continuing with the last child in place.
	fn fork<'scope>(
		&'scope self,
		scope: &Scope<'scope>,
		board: &'scope Board,
		path: SearchPath
	) {
		let mut path = path;
		loop
		{
			let mut children = self.expand(board, &path);
			let Some(last) = children.pop() else { return };
			for child in children
			{
				scope.spawn(move |scope| self.fork(scope, board, child));
			}
			path = last;
		}
	}

	/// Exhaust the search from every start position in the given row-major
	/// range, halving the range in parallel until it is no larger than
	/// `cutoff`.
	fn bisect(&self, board: &Board, range: Range<usize>, cutoff: usize)
	{
		if range.len() <= cutoff
		{
			for index in range
			{
				self.search_from(board, board.position_at(index));
			}
		}
		else
		{
			let middle = range.start + range.len() / 2;
			rayon::join(
				|| self.bisect(board, range.start .. middle, cutoff),
				|| self.bisect(board, middle .. range.end, cutoff)
			);
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                  Errors.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The complete enumeration of [`Solver`] errors.
#[derive(Debug)]
pub enum SolverError
{
	/// A dedicated pool was requested with no threads.
	NoThreads,

	/// The dedicated pool could not be built.
	ThreadPool(ThreadPoolBuildError)
}

impl Display for SolverError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::NoThreads =>
				write!(f, "worker pool needs at least one thread"),
			Self::ThreadPool(e) =>
				write!(f, "failed to build worker pool: {}", e)
		}
	}
}

impl Error for SolverError
{
	fn source(&self) -> Option<&(dyn Error + 'static)>
	{
		match self
		{
			Self::NoThreads => None,
			Self::ThreadPool(e) => Some(e)
		}
	}
}

impl From<ThreadPoolBuildError> for SolverError
{
	fn from(e: ThreadPoolBuildError) -> Self { Self::ThreadPool(e) }
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
