//! # Board
//!
//! Herein is the Boggle board: an immutable grid of [glyphs](Glyph), the
//! adjacency relation between its cells, and the sink that collects the
//! solutions found on it. The grid never changes after construction, so any
//! number of search tasks may read it at once. The solution sink is the only
//! mutable state, and every append to it is mutually exclusive.

use std::{
	collections::HashSet,
	error::Error,
	fmt::{self, Display, Formatter},
	str::FromStr,
	sync::{
		atomic::{AtomicU64, Ordering},
		Mutex, MutexGuard
	}
};

use log::trace;
use rand::Rng;

use crate::{glyph::Glyph, path::SearchPath};

////////////////////////////////////////////////////////////////////////////////
//                                 Positions.                                 //
////////////////////////////////////////////////////////////////////////////////

/// The coordinates of a cell. `x` is the column and `y` is the row; the origin
/// is the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position
{
	/// The column.
	pub x: usize,

	/// The row.
	pub y: usize
}

impl Position
{
	/// Construct a position from its column and row.
	#[inline]
	#[must_use]
	pub const fn new(x: usize, y: usize) -> Self { Self { x, y } }

	/// Check whether two positions are adjacent, i.e., they differ by at most
	/// one in each axis but are not the same position.
	#[inline]
	#[must_use]
	pub fn is_adjacent(&self, other: &Position) -> bool
	{
		self != other
			&& self.x.abs_diff(other.x) <= 1
			&& self.y.abs_diff(other.y) <= 1
	}
}

impl Display for Position
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		write!(f, "({}, {})", self.x, self.y)
	}
}

/// The eight directions, in the order that neighbors are reported: east, west,
/// south, north, southeast, northwest, southwest, northeast.
const DIRECTIONS: [(isize, isize); 8] = [
	(1, 0),
	(-1, 0),
	(0, 1),
	(0, -1),
	(1, 1),
	(-1, -1),
	(-1, 1),
	(1, -1)
];

////////////////////////////////////////////////////////////////////////////////
//                                   Board.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The process-wide source of board identities.
static NEXT_BOARD_ID: AtomicU64 = AtomicU64::new(0);

/// The identity of a [`Board`]. Every board receives a fresh identity when it
/// is constructed, and every [`SearchPath`] remembers the identity of the board
/// that it traverses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoardId(u64);

impl BoardId
{
	/// Allocate a fresh identity.
	fn next() -> Self
	{
		Self(NEXT_BOARD_ID.fetch_add(1, Ordering::Relaxed))
	}
}

/// A Boggle board: a `width`×`height` grid of glyphs, linearized in row-major
/// order, plus the solutions found on it so far.
#[derive(Debug)]
pub struct Board
{
	/// The identity of the board.
	id: BoardId,

	/// The number of columns.
	width: usize,

	/// The number of rows.
	height: usize,

	/// The glyphs, in row-major order.
	cells: Vec<Glyph>,

	/// The solutions found so far.
	solutions: SolutionSink
}

impl Board
{
	/// Construct a board from rows of tokens. Each token must be a valid
	/// [glyph](Glyph::parse).
	///
	/// # Arguments
	///
	/// * `rows` - The rows of the board, top to bottom.
	///
	/// # Returns
	///
	/// The requested board.
	///
	/// # Errors
	///
	/// * [`BoardError::EmptyBoard`] if there are no rows or no columns.
	/// * [`BoardError::RaggedRow`] if the rows differ in length.
	/// * [`BoardError::InvalidGlyph`] if any token is not a glyph.
	pub fn new<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<Self, BoardError>
	{
		let mut glyphs = Vec::with_capacity(rows.len());
		for (y, row) in rows.iter().enumerate()
		{
			let mut parsed = Vec::with_capacity(row.len());
			for (x, token) in row.iter().enumerate()
			{
				let token = token.as_ref();
				let glyph = Glyph::parse(token).ok_or_else(|| {
					BoardError::InvalidGlyph {
						row: y,
						column: x,
						token: token.to_string()
					}
				})?;
				parsed.push(glyph);
			}
			glyphs.push(parsed);
		}
		Self::from_glyphs(glyphs)
	}

	/// Construct a board from rows of glyphs.
	///
	/// # Arguments
	///
	/// * `rows` - The rows of the board, top to bottom.
	///
	/// # Returns
	///
	/// The requested board.
	///
	/// # Errors
	///
	/// * [`BoardError::EmptyBoard`] if there are no rows or no columns.
	/// * [`BoardError::RaggedRow`] if the rows differ in length.
	pub fn from_glyphs(rows: Vec<Vec<Glyph>>) -> Result<Self, BoardError>
	{
		let height = rows.len();
		let width = rows.first().map(Vec::len).unwrap_or(0);
		if width == 0 || height == 0
		{
			return Err(BoardError::EmptyBoard { width, height })
		}
		if let Some((row, actual)) = rows.iter()
			.map(Vec::len)
			.enumerate()
			.find(|&(_, len)| len != width)
		{
			return Err(BoardError::RaggedRow { row, expected: width, actual })
		}
		Ok(Self {
			id: BoardId::next(),
			width,
			height,
			cells: rows.into_iter().flatten().collect(),
			solutions: SolutionSink::default()
		})
	}

	/// Construct a board filled with random glyphs. See [`random_glyphs`].
	///
	/// # Arguments
	///
	/// * `width` - The number of columns.
	/// * `height` - The number of rows.
	/// * `rng` - The source of randomness.
	///
	/// # Returns
	///
	/// The random board.
	///
	/// # Errors
	///
	/// [`BoardError::EmptyBoard`] if either dimension is zero.
	pub fn random<R: Rng + ?Sized>(
		width: usize,
		height: usize,
		rng: &mut R
	) -> Result<Self, BoardError>
	{
		Self::from_glyphs(random_glyphs(width, height, rng)?)
	}

	/// Choose how the solution sink treats a path that it already holds. The
	/// default is [`DuplicatePolicy::Suppress`].
	#[inline]
	pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self
	{
		self.solutions.policy = policy;
		self
	}

	/// Get the duplicate policy of the solution sink.
	#[inline]
	#[must_use]
	pub fn duplicate_policy(&self) -> DuplicatePolicy { self.solutions.policy }

	/// Get the identity of the board.
	#[inline]
	#[must_use]
	pub fn id(&self) -> BoardId { self.id }

	/// Get the number of columns.
	#[inline]
	#[must_use]
	pub fn width(&self) -> usize { self.width }

	/// Get the number of rows.
	#[inline]
	#[must_use]
	pub fn height(&self) -> usize { self.height }

	/// Get the number of cells.
	#[inline]
	#[must_use]
	pub fn len(&self) -> usize { self.cells.len() }

	/// Boards always have at least one cell, so this is always `false`.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool { self.cells.is_empty() }

	/// Check whether the board contains the given position.
	#[inline]
	#[must_use]
	pub fn contains(&self, pos: Position) -> bool
	{
		pos.x < self.width && pos.y < self.height
	}

	/// Get an iterator over every position of the board, in row-major order.
	pub fn positions(&self) -> impl Iterator<Item = Position> + '_
	{
		(0 .. self.len()).map(|index| self.position_at(index))
	}

	/// Get the glyph at the given position.
	///
	/// # Errors
	///
	/// [`BoardError::OutOfBounds`] if the position lies outside the board.
	pub fn at(&self, pos: Position) -> Result<Glyph, BoardError>
	{
		if self.contains(pos)
		{
			Ok(self.glyph(pos))
		}
		else
		{
			Err(BoardError::OutOfBounds(pos))
		}
	}

	/// Get every position adjacent to the given one, in a fixed direction
	/// order. A position has eight neighbors, fewer at edges and corners.
	///
	/// # Errors
	///
	/// [`BoardError::OutOfBounds`] if the position lies outside the board.
	pub fn neighbors(&self, pos: Position) -> Result<Vec<Position>, BoardError>
	{
		if self.contains(pos)
		{
			Ok(self.adjacent(pos).collect())
		}
		else
		{
			Err(BoardError::OutOfBounds(pos))
		}
	}

	/// Record a solution. Whether a path that is already recorded is appended
	/// again depends on the [`DuplicatePolicy`].
	///
	/// # Arguments
	///
	/// * `path` - A path that spells a dictionary word on this board.
	///
	/// # Errors
	///
	/// [`BoardError::ForeignPath`] if the path belongs to another board.
	pub fn record_solution(&self, path: SearchPath) -> Result<(), BoardError>
	{
		if path.board_id() != self.id
		{
			return Err(BoardError::ForeignPath)
		}
		self.push_solution(path);
		Ok(())
	}

	/// Get the solutions found so far, in discovery order. Discovery order is
	/// not deterministic for parallel solves.
	#[must_use]
	pub fn solutions(&self) -> Vec<SearchPath>
	{
		self.solutions.lock().paths.clone()
	}

	/// Get the words of the solutions found so far, in discovery order.
	#[must_use]
	pub fn solution_words(&self) -> Vec<String>
	{
		self.solutions.lock().paths.iter()
			.map(|path| path.word().to_string())
			.collect()
	}

	/// Get the number of solutions found so far.
	#[must_use]
	pub fn solution_count(&self) -> usize
	{
		self.solutions.lock().paths.len()
	}
}

// Crate-private accessors, used by the search engine on positions that it has
// already bounded.
impl Board
{
	/// Get the glyph at a position known to lie on the board.
	#[inline]
	pub(crate) fn glyph(&self, pos: Position) -> Glyph
	{
		self.cells[pos.y * self.width + pos.x]
	}

	/// Get the position of the cell at the given row-major index.
	#[inline]
	pub(crate) fn position_at(&self, index: usize) -> Position
	{
		Position::new(index % self.width, index / self.width)
	}

	/// Get an iterator over the neighbors of a position known to lie on the
	/// board.
	pub(crate) fn adjacent(
		&self,
		pos: Position
	) -> impl Iterator<Item = Position> + '_
	{
		DIRECTIONS.iter().filter_map(move |&(dx, dy)| {
			let x = pos.x.checked_add_signed(dx)?;
			let y = pos.y.checked_add_signed(dy)?;
			let neighbor = Position::new(x, y);
			self.contains(neighbor).then_some(neighbor)
		})
	}

	/// Append a solution that is known to belong to this board.
	pub(crate) fn push_solution(&self, path: SearchPath)
	{
		let mut sink = self.solutions.lock();
		match self.solutions.policy
		{
			DuplicatePolicy::Suppress =>
			{
				if sink.seen.insert(path.positions().to_vec())
				{
					trace!("recorded: {}", path);
					sink.paths.push(path);
				}
				else
				{
					trace!("suppressed duplicate: {}", path);
				}
			}
			DuplicatePolicy::Accept =>
			{
				trace!("recorded: {}", path);
				sink.paths.push(path);
			}
		}
	}
}

impl FromStr for Board
{
	type Err = BoardError;

	/// Parse a board. Rows are separated by `/` or line breaks; blank rows are
	/// ignored. Within a row, cells are separated by whitespace, or, if the row
	/// contains no whitespace, each letter is a cell, with `qu` read as the
	/// digraph. So `"ca/rt"`, `"c a\nr t"`, and `"quit/set"` all parse.
	fn from_str(s: &str) -> Result<Self, Self::Err>
	{
		let rows = s
			.split(|c| c == '/' || c == '\n')
			.map(str::trim)
			.filter(|row| !row.is_empty())
			.map(tokenize_row)
			.collect::<Vec<_>>();
		Self::new(&rows)
	}
}

impl Display for Board
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		for row in self.cells.chunks(self.width)
		{
			for glyph in row
			{
				write!(f, "{} ", glyph)?;
			}
			writeln!(f)?;
		}
		Ok(())
	}
}

/// Split a row of board text into tokens.
fn tokenize_row(row: &str) -> Vec<String>
{
	if row.contains(char::is_whitespace)
	{
		return row.split_whitespace().map(str::to_string).collect()
	}
	let mut tokens = Vec::new();
	let mut chars = row.chars().peekable();
	while let Some(c) = chars.next()
	{
		let mut token = c.to_string();
		if c.eq_ignore_ascii_case(&'q')
		{
			if let Some(&u) = chars.peek()
			{
				if u.eq_ignore_ascii_case(&'u')
				{
					token.push(u);
					chars.next();
				}
			}
		}
		tokens.push(token);
	}
	tokens
}

/// Generate the rows of a random board. Every cell receives a letter chosen
/// uniformly from `a` through `z`, with `q` promoted to `Qu`. The result
/// depends only on the arguments, so a seeded `rng` yields a reproducible
/// board.
///
/// # Arguments
///
/// * `width` - The number of columns.
/// * `height` - The number of rows.
/// * `rng` - The source of randomness.
///
/// # Returns
///
/// The rows of the board, top to bottom.
///
/// # Errors
///
/// [`BoardError::EmptyBoard`] if either dimension is zero.
pub fn random_glyphs<R: Rng + ?Sized>(
	width: usize,
	height: usize,
	rng: &mut R
) -> Result<Vec<Vec<Glyph>>, BoardError>
{
	if width == 0 || height == 0
	{
		return Err(BoardError::EmptyBoard { width, height })
	}
	let rows = (0 .. height)
		.map(|_| {
			(0 .. width)
				.filter_map(|_| Glyph::from_letter(rng.random_range('a' ..= 'z')))
				.collect()
		})
		.collect();
	Ok(rows)
}

////////////////////////////////////////////////////////////////////////////////
//                               Solution sink.                               //
////////////////////////////////////////////////////////////////////////////////

/// How the solution sink treats a path that it already holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy
{
	/// Drop a path whose positions exactly match a recorded path. Distinct
	/// paths that spell the same word are all kept.
	#[default]
	Suppress,

	/// Append every path, leaving any deduplication to the consumer.
	Accept
}

/// The append-only log of solutions, shared by every search task working on
/// the board.
#[derive(Debug, Default)]
struct SolutionSink
{
	/// The duplicate policy. Fixed before any search starts.
	policy: DuplicatePolicy,

	/// The guarded log.
	state: Mutex<SinkState>
}

/// The content of the [`SolutionSink`].
#[derive(Debug, Default)]
struct SinkState
{
	/// The solutions, in discovery order.
	paths: Vec<SearchPath>,

	/// The positions of every recorded path. Only maintained under
	/// [`DuplicatePolicy::Suppress`].
	seen: HashSet<Vec<Position>>
}

impl SolutionSink
{
	/// Lock the sink. A panic in another search task cannot leave the log
	/// half-written, since a push is a single operation, so a poisoned lock is
	/// simply recovered.
	fn lock(&self) -> MutexGuard<'_, SinkState>
	{
		self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                  Errors.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The complete enumeration of [`Board`] errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardError
{
	/// The board has no rows or no columns.
	EmptyBoard { width: usize, height: usize },

	/// A row differs in length from the first row.
	RaggedRow { row: usize, expected: usize, actual: usize },

	/// A token is neither a letter nor `Qu`.
	InvalidGlyph { row: usize, column: usize, token: String },

	/// The position lies outside the board.
	OutOfBounds(Position),

	/// The path was created on another board.
	ForeignPath
}

impl Display for BoardError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::EmptyBoard { width, height } => write!(
				f,
				"board must have at least one row and one column, not {}×{}",
				width,
				height
			),
			Self::RaggedRow { row, expected, actual } => write!(
				f,
				"row {} has {} cells, but the first row has {}",
				row,
				actual,
				expected
			),
			Self::InvalidGlyph { row, column, token } => write!(
				f,
				"invalid glyph {:?} at row {}, column {}: \
					expected a letter other than Q, or Qu",
				token,
				row,
				column
			),
			Self::OutOfBounds(pos) =>
				write!(f, "position {} is outside the board", pos),
			Self::ForeignPath =>
				write!(f, "path does not belong to this board")
		}
	}
}

impl Error for BoardError {}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use std::collections::HashSet;

	use rand::SeedableRng;
	use rand_chacha::ChaCha8Rng;

	use crate::{
		board::{random_glyphs, Board, BoardError, DuplicatePolicy, Position},
		path::SearchPath
	};

	/// The 3×3 board `abc/def/ghi`.
	fn alphabet_board() -> Board
	{
		"abc/def/ghi".parse().unwrap()
	}

	/// Boards parse from compact and spaced text alike, and display in the
	/// same layout.
	#[test]
	fn test_parse_and_display()
	{
		let board = alphabet_board();
		assert_eq!(board.width(), 3);
		assert_eq!(board.height(), 3);
		assert_eq!(board.to_string(), "A B C \nD E F \nG H I \n");

		let spaced: Board = "a b c\nd e f\ng h i\n".parse().unwrap();
		assert_eq!(spaced.to_string(), board.to_string());

		let digraph: Board = "quit/set".parse().unwrap();
		assert_eq!(digraph.width(), 3);
		assert_eq!(digraph.to_string(), "Qu I T \nS E T \n");
	}

	/// Construction fails fast on malformed input.
	#[test]
	fn test_configuration_errors()
	{
		let empty: Vec<Vec<&str>> = vec![];
		assert_eq!(
			Board::new(&empty).unwrap_err(),
			BoardError::EmptyBoard { width: 0, height: 0 }
		);
		let no_columns: Vec<Vec<&str>> = vec![vec![]];
		assert_eq!(
			Board::new(&no_columns).unwrap_err(),
			BoardError::EmptyBoard { width: 0, height: 1 }
		);
		assert_eq!(
			Board::new(&[vec!["A", "B"], vec!["C"]]).unwrap_err(),
			BoardError::RaggedRow { row: 1, expected: 2, actual: 1 }
		);
		assert_eq!(
			Board::new(&[vec!["A", "Q"]]).unwrap_err(),
			BoardError::InvalidGlyph { row: 0, column: 1, token: "Q".into() }
		);
		assert_eq!(
			"ab/c?".parse::<Board>().unwrap_err(),
			BoardError::InvalidGlyph { row: 1, column: 1, token: "?".into() }
		);
	}

	/// Lookups beyond the edges fail rather than clamp.
	#[test]
	fn test_at()
	{
		let board = alphabet_board();
		assert_eq!(board.at(Position::new(0, 0)).unwrap().as_str(), "a");
		assert_eq!(board.at(Position::new(2, 0)).unwrap().as_str(), "c");
		assert_eq!(board.at(Position::new(0, 2)).unwrap().as_str(), "g");
		assert_eq!(
			board.at(Position::new(3, 0)),
			Err(BoardError::OutOfBounds(Position::new(3, 0)))
		);
		assert_eq!(
			board.at(Position::new(0, 3)),
			Err(BoardError::OutOfBounds(Position::new(0, 3)))
		);
	}

	/// Corners have three neighbors, edges five, and interior cells eight,
	/// reported in a fixed direction order.
	#[test]
	fn test_neighbors()
	{
		let board = alphabet_board();
		assert_eq!(
			board.neighbors(Position::new(1, 1)).unwrap(),
			vec![
				Position::new(2, 1),
				Position::new(0, 1),
				Position::new(1, 2),
				Position::new(1, 0),
				Position::new(2, 2),
				Position::new(0, 0),
				Position::new(0, 2),
				Position::new(2, 0)
			]
		);
		assert_eq!(
			board.neighbors(Position::new(0, 0)).unwrap(),
			vec![Position::new(1, 0), Position::new(0, 1), Position::new(1, 1)]
		);
		assert_eq!(board.neighbors(Position::new(1, 0)).unwrap().len(), 5);
		assert_eq!(
			board.neighbors(Position::new(5, 5)),
			Err(BoardError::OutOfBounds(Position::new(5, 5)))
		);
		// Neighbors agree with the adjacency relation.
		for pos in board.positions()
		{
			let neighbors =
				board.neighbors(pos).unwrap().into_iter().collect::<HashSet<_>>();
			for other in board.positions()
			{
				assert_eq!(neighbors.contains(&other), pos.is_adjacent(&other));
			}
		}
		let single: Board = "a".parse().unwrap();
		assert!(single.neighbors(Position::new(0, 0)).unwrap().is_empty());
	}

	/// A duplicate path is dropped under the default policy, and kept under
	/// [`DuplicatePolicy::Accept`].
	#[test]
	fn test_record_solution_policies()
	{
		let board = alphabet_board();
		let path = SearchPath::new(&board, Position::new(0, 0)).unwrap();
		board.record_solution(path.clone()).unwrap();
		board.record_solution(path.clone()).unwrap();
		assert_eq!(board.solution_count(), 1);
		// Another path spelling a different word is kept.
		let other = path.extend(&board, Position::new(1, 0)).unwrap();
		board.record_solution(other).unwrap();
		assert_eq!(board.solution_words(), vec!["a", "ab"]);

		let board = alphabet_board()
			.with_duplicate_policy(DuplicatePolicy::Accept);
		let path = SearchPath::new(&board, Position::new(0, 0)).unwrap();
		board.record_solution(path.clone()).unwrap();
		board.record_solution(path).unwrap();
		assert_eq!(board.solution_count(), 2);
	}

	/// A board rejects paths created on another board, even an identical one.
	#[test]
	fn test_record_foreign_path()
	{
		let board = alphabet_board();
		let twin = alphabet_board();
		let path = SearchPath::new(&twin, Position::new(0, 0)).unwrap();
		assert_eq!(board.record_solution(path), Err(BoardError::ForeignPath));
		assert_eq!(board.solution_count(), 0);
	}

	/// Random boards contain only glyphs, have the requested shape, and depend
	/// only on the seed.
	#[test]
	fn test_random()
	{
		let mut rng = ChaCha8Rng::seed_from_u64(7);
		let rows = random_glyphs(5, 3, &mut rng).unwrap();
		assert_eq!(rows.len(), 3);
		assert!(rows.iter().all(|row| row.len() == 5));
		for glyph in rows.iter().flatten()
		{
			let s = glyph.as_str();
			assert!(s == "qu" || (s.len() == 1 && s != "q"), "{}", s);
		}
		let again = random_glyphs(5, 3, &mut ChaCha8Rng::seed_from_u64(7))
			.unwrap();
		assert_eq!(rows, again);

		let board = Board::random(4, 4, &mut rng).unwrap();
		assert_eq!(board.len(), 16);
		assert_eq!(
			random_glyphs(0, 3, &mut rng).unwrap_err(),
			BoardError::EmptyBoard { width: 0, height: 3 }
		);
	}

	/// Every board is distinct, even with identical glyphs.
	#[test]
	fn test_identity()
	{
		assert_ne!(alphabet_board().id(), alphabet_board().id());
	}
}
