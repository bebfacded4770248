//! # Search paths
//!
//! A search path is a walk over a [`Board`] that never revisits a cell and
//! only ever steps to an adjacent cell. It carries the word that it spells and
//! its score. Paths grow by copy-and-extend: extending a path yields a new path
//! and leaves the original untouched, so sibling branches of a parallel search
//! can each own their own path without any synchronization.

use std::{
	error::Error,
	fmt::{self, Display, Formatter}
};

use crate::board::{Board, BoardId, Position};

////////////////////////////////////////////////////////////////////////////////
//                               Search paths.                                //
////////////////////////////////////////////////////////////////////////////////

/// An ordered, duplicate-free sequence of adjacent positions on a specific
/// [`Board`], plus the lowercase word that those positions spell and the score
/// of that word.
///
/// The score is flat: a single cell scores `0`, and every further cell adds
/// `1`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct SearchPath
{
	/// The identity of the board that the path traverses.
	board: BoardId,

	/// The positions visited, in order.
	positions: Vec<Position>,

	/// The word spelled by the path, in lowercase.
	word: String,

	/// The score of the word.
	score: u32
}

impl SearchPath
{
	/// Start a new path at the given position.
	///
	/// # Arguments
	///
	/// * `board` - The board to traverse.
	/// * `start` - The first position of the path.
	///
	/// # Returns
	///
	/// A single-cell path with score `0`.
	///
	/// # Errors
	///
	/// [`PathError::OutOfBounds`] if `start` lies outside the board.
	pub fn new(board: &Board, start: Position) -> Result<Self, PathError>
	{
		if !board.contains(start)
		{
			return Err(PathError::OutOfBounds(start))
		}
		Ok(Self::start(board, start))
	}

	/// Extend the path by one position, producing a new path.
	///
	/// # Arguments
	///
	/// * `board` - The board that the path traverses.
	/// * `next` - The position to append.
	///
	/// # Returns
	///
	/// A copy of this path with `next` appended, one point more valuable.
	///
	/// # Errors
	///
	/// * [`PathError::ForeignBoard`] if the path belongs to another board.
	/// * [`PathError::OutOfBounds`] if `next` lies outside the board.
	/// * [`PathError::Revisit`] if the path already visits `next`.
	/// * [`PathError::NotAdjacent`] if `next` is not adjacent to the last
	///   position of the path.
	pub fn extend(&self, board: &Board, next: Position) -> Result<Self, PathError>
	{
		if self.board != board.id()
		{
			return Err(PathError::ForeignBoard)
		}
		if !board.contains(next)
		{
			return Err(PathError::OutOfBounds(next))
		}
		if self.contains(next)
		{
			return Err(PathError::Revisit(next))
		}
		let last = self.last();
		if !last.is_adjacent(&next)
		{
			return Err(PathError::NotAdjacent { from: last, to: next })
		}
		Ok(self.extended(board, next))
	}

	/// Get the identity of the board that the path traverses.
	#[inline]
	#[must_use]
	pub fn board_id(&self) -> BoardId { self.board }

	/// Get the positions of the path, in order.
	#[inline]
	#[must_use]
	pub fn positions(&self) -> &[Position] { &self.positions }

	/// Get the last position of the path.
	#[inline]
	#[must_use]
	pub fn last(&self) -> Position
	{
		// A path always holds at least its starting position.
		self.positions[self.positions.len() - 1]
	}

	/// Get the number of cells visited.
	#[inline]
	#[must_use]
	pub fn len(&self) -> usize { self.positions.len() }

	/// Paths always visit at least one cell, so this is always `false`.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool { self.positions.is_empty() }

	/// Check whether the path visits the given position.
	#[inline]
	#[must_use]
	pub fn contains(&self, pos: Position) -> bool
	{
		self.positions.contains(&pos)
	}

	/// Get the word spelled by the path, in lowercase.
	#[inline]
	#[must_use]
	pub fn word(&self) -> &str { &self.word }

	/// Get the score of the path.
	#[inline]
	#[must_use]
	pub fn score(&self) -> u32 { self.score }
}

// Unchecked constructors for the search engine, which only ever starts on
// board positions and steps to unvisited neighbors.
impl SearchPath
{
	/// Start a path at a position known to lie on the board.
	pub(crate) fn start(board: &Board, start: Position) -> Self
	{
		Self {
			board: board.id(),
			positions: vec![start],
			word: board.glyph(start).as_str().to_string(),
			score: 0
		}
	}

	/// Extend the path by a position known to be an unvisited neighbor of its
	/// last position.
	pub(crate) fn extended(&self, board: &Board, next: Position) -> Self
	{
		let glyph = board.glyph(next);
		let mut positions = Vec::with_capacity(self.positions.len() + 1);
		positions.extend_from_slice(&self.positions);
		positions.push(next);
		let mut word =
			String::with_capacity(self.word.len() + glyph.as_str().len());
		word.push_str(&self.word);
		word.push_str(glyph.as_str());
		Self { board: self.board, positions, word, score: self.score + 1 }
	}
}

impl Display for SearchPath
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		write!(f, "{} ({})", self.word, self.score)
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                  Errors.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The complete enumeration of [`SearchPath`] errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathError
{
	/// The position lies outside the board.
	OutOfBounds(Position),

	/// The path already visits the position.
	Revisit(Position),

	/// The position is not adjacent to the end of the path.
	NotAdjacent { from: Position, to: Position },

	/// The path was created on another board.
	ForeignBoard
}

impl Display for PathError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::OutOfBounds(pos) =>
				write!(f, "position {} is outside the board", pos),
			Self::Revisit(pos) =>
				write!(f, "path already visits position {}", pos),
			Self::NotAdjacent { from, to } =>
				write!(f, "position {} is not adjacent to {}", to, from),
			Self::ForeignBoard =>
				write!(f, "path belongs to another board")
		}
	}
}

impl Error for PathError {}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use crate::{
		board::{Board, Position},
		path::{PathError, SearchPath}
	};

	/// The 3×3 board `abc/def/ghi`.
	fn alphabet_board() -> Board
	{
		"abc/def/ghi".parse().unwrap()
	}

	/// Extending a path appends the glyph, bumps the score, and leaves the
	/// original path alone.
	#[test]
	fn test_extend()
	{
		let board = alphabet_board();
		let start = SearchPath::new(&board, Position::new(1, 1)).unwrap();
		assert_eq!(start.word(), "e");
		assert_eq!(start.score(), 0);
		assert_eq!(start.len(), 1);
		assert_eq!(start.last(), Position::new(1, 1));

		let two = start.extend(&board, Position::new(0, 0)).unwrap();
		let three = two.extend(&board, Position::new(1, 0)).unwrap();
		assert_eq!(three.word(), "eab");
		assert_eq!(three.score(), 2);
		assert_eq!(
			three.positions(),
			&[Position::new(1, 1), Position::new(0, 0), Position::new(1, 0)]
		);
		assert_eq!(three.to_string(), "eab (2)");

		// The originals are untouched.
		assert_eq!(start.word(), "e");
		assert_eq!(two.word(), "ea");
		assert_eq!(two.score(), 1);
	}

	/// The digraph contributes both of its letters to the word, but only one
	/// point to the score.
	#[test]
	fn test_digraph()
	{
		let board: Board = "quit".parse().unwrap();
		let path = SearchPath::new(&board, Position::new(0, 0)).unwrap()
			.extend(&board, Position::new(1, 0)).unwrap()
			.extend(&board, Position::new(2, 0)).unwrap();
		assert_eq!(path.word(), "quit");
		assert_eq!(path.len(), 3);
		assert_eq!(path.score(), 2);
	}

	/// Every violation of the path invariants is reported.
	#[test]
	fn test_extend_errors()
	{
		let board = alphabet_board();
		assert_eq!(
			SearchPath::new(&board, Position::new(3, 3)),
			Err(PathError::OutOfBounds(Position::new(3, 3)))
		);
		let path = SearchPath::new(&board, Position::new(0, 0)).unwrap()
			.extend(&board, Position::new(1, 1)).unwrap();
		assert_eq!(
			path.extend(&board, Position::new(0, 0)),
			Err(PathError::Revisit(Position::new(0, 0)))
		);
		assert_eq!(
			path.extend(&board, Position::new(1, 1)),
			Err(PathError::Revisit(Position::new(1, 1)))
		);
		assert_eq!(
			path.extend(&board, Position::new(2, 3)),
			Err(PathError::OutOfBounds(Position::new(2, 3)))
		);
		let far = SearchPath::new(&board, Position::new(0, 0)).unwrap();
		assert_eq!(
			far.extend(&board, Position::new(2, 0)),
			Err(PathError::NotAdjacent {
				from: Position::new(0, 0),
				to: Position::new(2, 0)
			})
		);
		let twin = alphabet_board();
		assert_eq!(
			far.extend(&twin, Position::new(1, 0)),
			Err(PathError::ForeignBoard)
		);
	}
}
