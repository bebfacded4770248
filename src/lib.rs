//! # Boggle Solver
//!
//! Boggle is a word game played on a grid of lettered dice. Players race to
//! trace words through chains of adjacent cells, horizontally, vertically, or
//! diagonally, using each cell at most once per word. One face of a die reads
//! "Qu" rather than a lone "Q".
//!
//! This library finds every dictionary word on a board. The
//! [dictionary](dictionary::Dictionary) is a prefix tree, so that the
//! [solver](solver::Solver) can abandon a walk as soon as its letters cannot
//! begin any word. The walk itself is distributed across a [rayon] pool.
//! Solutions accumulate on the [board](board::Board) as
//! [search paths](path::SearchPath), ready to be [ranked](sort::SortOrder).

pub mod board;
pub mod dictionary;
pub mod glyph;
pub mod path;
pub mod solver;
pub mod sort;
