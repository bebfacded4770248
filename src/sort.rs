//! # Sort orders
//!
//! The solver records solutions in whatever order its workers happen to find
//! them. Presentation wants them ranked.

use std::{
	cmp::Ordering,
	collections::HashSet,
	fmt::{self, Display, Formatter}
};

use crate::path::SearchPath;

/// How to rank solutions for presentation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortOrder
{
	/// Highest score first; ties broken alphabetically.
	#[default]
	Score,

	/// Alphabetically by word.
	Alphabet
}

impl SortOrder
{
	/// Compare two solutions according to this order. Solutions that spell the
	/// same word with the same score are ordered by their positions, so that
	/// the order is total.
	#[must_use]
	pub fn compare(&self, a: &SearchPath, b: &SearchPath) -> Ordering
	{
		let primary = match self
		{
			Self::Score => b.score().cmp(&a.score())
				.then_with(|| a.word().cmp(b.word())),
			Self::Alphabet => a.word().cmp(b.word())
				.then_with(|| b.score().cmp(&a.score()))
		};
		primary.then_with(|| a.positions().cmp(b.positions()))
	}

	/// Answer the other order.
	#[inline]
	#[must_use]
	pub fn toggle(self) -> Self
	{
		match self
		{
			Self::Score => Self::Alphabet,
			Self::Alphabet => Self::Score
		}
	}
}

impl Display for SortOrder
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::Score => write!(f, "score"),
			Self::Alphabet => write!(f, "alphabet")
		}
	}
}

/// Sort the solutions in place.
pub fn sort_paths(paths: &mut [SearchPath], order: SortOrder)
{
	paths.sort_by(|a, b| order.compare(a, b));
}

/// Answer the distinct words among the solutions, ranked by the given order.
/// Each word appears once, at the rank of its best path.
#[must_use]
pub fn ranked_words(paths: &[SearchPath], order: SortOrder) -> Vec<String>
{
	let mut sorted = paths.iter().collect::<Vec<_>>();
	sorted.sort_by(|a, b| order.compare(a, b));
	let mut seen = HashSet::new();
	sorted.into_iter()
		.filter(|path| seen.insert(path.word()))
		.map(|path| path.word().to_string())
		.collect()
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use crate::{
		board::{Board, Position},
		path::SearchPath,
		sort::{ranked_words, sort_paths, SortOrder}
	};

	/// Spell a word on the board by following the given positions.
	fn walk(board: &Board, positions: &[(usize, usize)]) -> SearchPath
	{
		let (x, y) = positions[0];
		let mut path = SearchPath::new(board, Position::new(x, y)).unwrap();
		for &(x, y) in &positions[1 ..]
		{
			path = path.extend(board, Position::new(x, y)).unwrap();
		}
		path
	}

	/// Some solutions on `ca/rt`, in discovery order.
	fn solutions(board: &Board) -> Vec<SearchPath>
	{
		vec![
			walk(board, &[(0, 0), (1, 0), (1, 1)]),
			walk(board, &[(0, 0), (1, 0), (0, 1), (1, 1)]),
			walk(board, &[(1, 0), (0, 0), (1, 1)]),
			walk(board, &[(0, 0), (1, 0), (0, 1)])
		]
	}

	/// Score order puts the longest words first, breaking ties alphabetically.
	#[test]
	fn test_score_order()
	{
		let board: Board = "ca/rt".parse().unwrap();
		let mut paths = solutions(&board);
		sort_paths(&mut paths, SortOrder::Score);
		let words = paths.iter().map(|p| p.word()).collect::<Vec<_>>();
		assert_eq!(words, vec!["cart", "act", "car", "cat"]);
	}

	/// Alphabet order ignores the score.
	#[test]
	fn test_alphabet_order()
	{
		let board: Board = "ca/rt".parse().unwrap();
		let mut paths = solutions(&board);
		sort_paths(&mut paths, SortOrder::Alphabet);
		let words = paths.iter().map(|p| p.word()).collect::<Vec<_>>();
		assert_eq!(words, vec!["act", "car", "cart", "cat"]);
	}

	/// Ranked words appear once each, however many paths spell them.
	#[test]
	fn test_ranked_words()
	{
		let board: Board = "aa/ba".parse().unwrap();
		let paths = vec![
			walk(&board, &[(0, 0), (0, 1)]),
			walk(&board, &[(1, 0), (0, 1)]),
			walk(&board, &[(0, 1), (1, 1)]),
			walk(&board, &[(0, 1), (0, 0), (1, 0)])
		];
		assert_eq!(
			ranked_words(&paths, SortOrder::Score),
			vec!["baa", "ab", "ba"]
		);
		assert_eq!(
			ranked_words(&paths, SortOrder::Alphabet),
			vec!["ab", "ba", "baa"]
		);
	}

	/// Toggling flips between the two orders.
	#[test]
	fn test_toggle()
	{
		assert_eq!(SortOrder::default(), SortOrder::Score);
		assert_eq!(SortOrder::Score.toggle(), SortOrder::Alphabet);
		assert_eq!(SortOrder::Alphabet.toggle(), SortOrder::Score);
		assert_eq!(SortOrder::Alphabet.to_string(), "alphabet");
	}
}
