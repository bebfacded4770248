//! # Glyphs
//!
//! A glyph is the content of a single board cell: one letter, or the digraph
//! "Qu", which takes the place of a lone "Q" as on a physical Boggle die.

use std::fmt::{self, Display, Formatter};

use fixedstr::str8;

/// A single board cell token. Stored in lowercase, so that the glyphs along a
/// path concatenate directly into a dictionary lookup key. Displayed
/// capitalized, e.g., `A` or `Qu`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct Glyph(str8);

impl Glyph
{
	/// Parse a glyph from a board token, ignoring case and surrounding
	/// whitespace. A single letter other than `q` is accepted, as is the
	/// digraph `qu`. A lone `q` is rejected.
	///
	/// # Arguments
	///
	/// * `token` - The token to parse.
	///
	/// # Returns
	///
	/// The glyph, or `None` if the token is not a valid glyph.
	pub fn parse(token: &str) -> Option<Self>
	{
		let token = token.trim().to_ascii_lowercase();
		match token.as_str()
		{
			"qu" => Some(Self(str8::from("qu"))),
			"q" => None,
			_ =>
			{
				let mut chars = token.chars();
				match (chars.next(), chars.next())
				{
					(Some(c), None) if c.is_ascii_alphabetic() =>
						Some(Self(str8::from(token.as_str()))),
					_ => None
				}
			}
		}
	}

	/// Promote a letter to a glyph. Unlike [`parse`](Self::parse), this
	/// accepts `q` and promotes it to `Qu`; random generation and interactive
	/// entry deal in letters rather than tokens.
	///
	/// # Arguments
	///
	/// * `letter` - The letter to promote.
	///
	/// # Returns
	///
	/// The glyph, or `None` if `letter` is not an ASCII letter.
	pub fn from_letter(letter: char) -> Option<Self>
	{
		match letter.to_ascii_lowercase()
		{
			'q' => Some(Self(str8::from("qu"))),
			c if c.is_ascii_lowercase() =>
				Some(Self(str8::from(c.to_string().as_str()))),
			_ => None
		}
	}

	/// Get the lowercase letters of the glyph.
	#[inline]
	#[must_use]
	pub fn as_str(&self) -> &str
	{
		self.0.as_str()
	}
}

impl Display for Glyph
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		let mut chars = self.as_str().chars();
		if let Some(first) = chars.next()
		{
			write!(f, "{}", first.to_ascii_uppercase())?;
		}
		write!(f, "{}", chars.as_str())
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
