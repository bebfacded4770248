//! # Dictionary
//!
//! Herein is support for dictionary construction and lookup. The solver runs
//! every query against a [`Dictionary`], which is a prefix tree of lowercase
//! words. Construction happens once, before any search begins; afterwards the
//! dictionary is only read, so it can be shared freely between worker threads.

use std::{
	borrow::Cow,
	fs::{self, File},
	io::{self, BufRead, BufReader, ErrorKind},
	path::Path
};

use log::{debug, trace, warn};
use pfx::PrefixTreeSet;
use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////
//                                Definitions.                                //
////////////////////////////////////////////////////////////////////////////////

/// A dictionary is a [`PrefixTreeSet`] of lowercase words. All insertions and
/// lookups are case-insensitive.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct Dictionary(PrefixTreeSet<String>);

impl Dictionary
{
	/// Construct an empty dictionary. Same as [`Default::default`].
	#[inline]
	pub fn new() -> Self { Self(Default::default()) }

	/// Check if the dictionary is empty.
	///
	/// # Returns
	///
	/// `true` if the dictionary is empty, `false` otherwise.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool { self.0.is_empty() }

	/// Insert a word into the dictionary. Inserting the same word twice has no
	/// further effect.
	///
	/// # Arguments
	///
	/// * `word` - The word to insert, in any case.
	pub fn insert(&mut self, word: &str)
	{
		self.0.insert(lowercase(word).into_owned());
	}

	/// Check if the dictionary contains the given word.
	///
	/// # Arguments
	///
	/// * `word` - The word to check.
	///
	/// # Returns
	///
	/// `true` if the dictionary contains the word, `false` otherwise.
	#[must_use]
	pub fn contains_word(&self, word: &str) -> bool
	{
		let word = lowercase(word);
		self.0.contains(&*word)
	}

	/// Check if the dictionary contains a word that begins with the given
	/// prefix. A complete word counts as a prefix of itself, and the empty
	/// string is a prefix of everything, even of an empty dictionary.
	///
	/// # Arguments
	///
	/// * `prefix` - The prefix to check.
	///
	/// # Returns
	///
	/// `true` if some word in the dictionary begins with `prefix`, `false`
	/// otherwise.
	#[must_use]
	pub fn contains_prefix(&self, prefix: &str) -> bool
	{
		if prefix.is_empty()
		{
			return true
		}
		let prefix = lowercase(prefix);
		self.0.contains_prefix(&*prefix) || self.0.contains(&*prefix)
	}

	/// Populate the dictionary with the given words, skipping any word with
	/// fewer than `min_length` letters. Words are measured in characters, so
	/// "quit" has four letters even though it only needs three cells.
	///
	/// # Arguments
	///
	/// * `words` - The intended content of the dictionary.
	/// * `min_length` - The minimum length of an admissible word.
	pub fn populate<T: AsRef<str>>(&mut self, words: &[T], min_length: usize)
	{
		for word in words
		{
			let word = word.as_ref();
			if word.chars().count() >= min_length
			{
				self.insert(word);
			}
		}
	}

	/// Open a dictionary with the given name. Only the specified directory will
	/// be searched. `name` denotes the word list, sans the extension. If a
	/// binary dictionary for the requested minimum length
	/// (`<name>.<min_length>.dict`) exists _and_ is newer than the word list
	/// (`<name>.txt`), it will be read; otherwise, the word list will be read
	/// and a binary dictionary will be written to speed up future reads.
	///
	/// # Arguments
	///
	/// * `dir` - The directory to search.
	/// * `name` - The name of the dictionary file.
	/// * `min_length` - The minimum length of an admissible word.
	///
	/// # Returns
	///
	/// A dictionary containing the admissible words from the file.
	///
	/// # Errors
	///
	/// * If the word list cannot be opened or read, an error is returned.
	/// * If the binary dictionary contains invalid data, an
	///   [`ErrorKind::InvalidData`] is returned.
	pub fn open<T: AsRef<Path>>(
		dir: T,
		name: &str,
		min_length: usize
	) -> Result<Self, io::Error>
	{
		let dict_path =
			dir.as_ref().join(format!("{}.{}.dict", name, min_length));
		let txt_path = dir.as_ref().join(format!("{}.txt", name));
		// Use the binary dictionary only if it is strictly newer than the word
		// list. Any failure to obtain either modification time (including a
		// missing binary dictionary) falls back to the word list.
		let binary_is_fresh = dict_path
			.metadata()
			.and_then(|m| m.modified())
			.and_then(|dict_time| {
				txt_path
					.metadata()
					.and_then(|m| m.modified())
					.map(|txt_time| dict_time > txt_time)
			})
			.unwrap_or(false);
		if binary_is_fresh
		{
			let dictionary = Self::deserialize_from_file(&dict_path)?;
			trace!("Read binary dictionary: {}", dict_path.display());
			return Ok(dictionary)
		}
		let dictionary = Self::read_from_file(&txt_path, min_length)?;
		trace!("Read text dictionary: {}", txt_path.display());
		match dictionary.serialize_to_file(&dict_path)
		{
			Ok(_) => debug!("Wrote binary dictionary: {}", dict_path.display()),
			Err(e) => warn!(
				"Failed to write binary dictionary: {}: {}",
				dict_path.display(),
				e
			)
		}
		Ok(dictionary)
	}

	/// Construct a dictionary from the contents of the given file. Each
	/// non-blank line in the file is considered a single word; surrounding
	/// whitespace is ignored.
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	/// * `min_length` - The minimum length of an admissible word.
	///
	/// # Returns
	///
	/// A dictionary containing the admissible words from the file.
	///
	/// # Errors
	///
	/// If the file cannot be opened or read, an error is returned.
	pub fn read_from_file<T: AsRef<Path>>(
		path: T,
		min_length: usize
	) -> Result<Self, io::Error>
	{
		let file = File::open(path)?;
		let reader = BufReader::new(file);
		let mut words = Vec::new();
		for line in reader.lines()
		{
			let line = line?;
			let word = line.trim();
			if !word.is_empty()
			{
				words.push(word.to_string());
			}
		}
		let mut dictionary = Self::new();
		dictionary.populate(&words, min_length);
		Ok(dictionary)
	}

	/// Deserialize a dictionary from the given file. The file must contain a
	/// serialized dictionary in [`bincode`](bincode) format.
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	///
	/// # Returns
	///
	/// A dictionary deserialized from the file.
	///
	/// # Errors
	///
	/// * If the file cannot be opened or read, an error is returned.
	/// * If the file contains invalid data, an [`ErrorKind::InvalidData`] is
	///   returned.
	pub fn deserialize_from_file<T: AsRef<Path>>(
		path: T
	) -> Result<Self, io::Error>
	{
		let content = fs::read(path)?;
		bincode::deserialize(&content)
			.map_err(|e| io::Error::new(ErrorKind::InvalidData, e))
	}

	/// Serialize the dictionary to the given file, in [`bincode`](bincode)
	/// format.
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	///
	/// # Errors
	///
	/// * If the file cannot be created or written, an error is returned.
	/// * If the dictionary cannot be encoded, an [`ErrorKind::InvalidData`] is
	///   returned.
	pub fn serialize_to_file<T: AsRef<Path>>(
		&self,
		path: T
	) -> Result<(), io::Error>
	{
		let content = bincode::serialize(self)
			.map_err(|e| io::Error::new(ErrorKind::InvalidData, e))?;
		fs::write(path, content)
	}
}

/// Lowercase the given text, borrowing it when it is already lowercase.
#[inline]
fn lowercase(text: &str) -> Cow<'_, str>
{
	if text.chars().any(char::is_uppercase)
	{
		Cow::Owned(text.to_lowercase())
	}
	else
	{
		Cow::Borrowed(text)
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use std::{fs, io::Write, thread, time::Duration};

	use crate::dictionary::Dictionary;
	use tempfile::{tempdir, NamedTempFile};

	/// Write the given lines to a fresh temporary file.
	fn word_list(lines: &[&str]) -> NamedTempFile
	{
		let mut file = NamedTempFile::new().unwrap();
		for line in lines
		{
			writeln!(file, "{}", line).unwrap();
		}
		file
	}

	/// An empty dictionary knows no words, but the empty string is still a
	/// prefix.
	#[test]
	fn test_empty()
	{
		let dictionary = Dictionary::new();
		assert!(dictionary.is_empty());
		assert!(dictionary.contains_prefix(""));
		assert!(!dictionary.contains_word(""));
		for c in 'a' ..= 'z'
		{
			assert!(!dictionary.contains_prefix(&c.to_string()));
			assert!(!dictionary.contains_word(&c.to_string()));
		}
	}

	/// Test basic functionality of [`Dictionary`]:
	///
	/// * [`Dictionary::insert`]
	/// * [`Dictionary::contains_word`]
	/// * [`Dictionary::contains_prefix`]
	#[test]
	fn test_insert()
	{
		let mut dictionary = Dictionary::new();
		dictionary.insert("california");
		assert!(!dictionary.is_empty());
		assert!(dictionary.contains_word("california"));
		assert!(!dictionary.contains_word("californ"));
		for i in 1 ..= "california".len()
		{
			assert!(dictionary.contains_prefix(&"california"[..i]));
		}
		assert!(!dictionary.contains_prefix("ali"));
		assert!(!dictionary.contains_prefix("californias"));

		// Inserting again changes nothing.
		let before = dictionary.clone();
		dictionary.insert("california");
		assert_eq!(dictionary, before);
	}

	/// Lookups and insertions ignore case.
	#[test]
	fn test_case_insensitive()
	{
		let mut dictionary = Dictionary::new();
		dictionary.insert("calIforNia");
		assert!(dictionary.contains_word("CaliforniA"));
		assert!(dictionary.contains_word("california"));
		assert!(dictionary.contains_prefix("CALi"));
	}

	/// Words that share a stem, or that are stems of one another, are all
	/// recognized.
	#[test]
	fn test_overlapping_words()
	{
		let mut dictionary = Dictionary::new();
		dictionary.populate(&["california", "call", "calamari"], 0);
		for prefix in ["cal", "call", "cala", "cali", "california", "calamari"]
		{
			assert!(dictionary.contains_prefix(prefix), "{}", prefix);
		}
		assert!(!dictionary.contains_word("cal"));

		let mut dictionary = Dictionary::new();
		dictionary.populate(&["alphabet", "alpha"], 0);
		assert!(dictionary.contains_word("alpha"));
		assert!(dictionary.contains_word("alphabet"));
		assert!(dictionary.contains_prefix("alph"));
		assert!(dictionary.contains_prefix("alpha"));
		assert!(dictionary.contains_prefix("alphab"));
		assert!(!dictionary.contains_word("alphab"));
	}

	/// Short words are dropped at construction time.
	#[test]
	fn test_populate_min_length()
	{
		let mut dictionary = Dictionary::new();
		dictionary.populate(&["a", "an", "ant", "ante"], 3);
		assert!(!dictionary.contains_word("a"));
		assert!(!dictionary.contains_word("an"));
		assert!(dictionary.contains_word("ant"));
		assert!(dictionary.contains_word("ante"));
		// The dropped words are still prefixes of the surviving ones.
		assert!(dictionary.contains_prefix("an"));
	}

	/// Test reading a dictionary from a word list:
	///
	/// * [`Dictionary::read_from_file`]
	#[test]
	fn test_read_from_file()
	{
		let file = word_list(&["Apple", "  banana  ", "", "fig", "kiwi"]);
		let dictionary = Dictionary::read_from_file(file.path(), 4).unwrap();
		assert!(dictionary.contains_word("apple"));
		assert!(dictionary.contains_word("banana"));
		assert!(dictionary.contains_word("kiwi"));
		assert!(!dictionary.contains_word("fig"));
		assert!(!dictionary.contains_word(""));
	}

	/// A missing word list is an I/O error.
	#[test]
	fn test_read_missing_file()
	{
		let dir = tempdir().unwrap();
		let result =
			Dictionary::read_from_file(dir.path().join("missing.txt"), 1);
		assert!(result.is_err());
	}

	/// Test serializing and deserializing a dictionary:
	///
	/// * [`Dictionary::serialize_to_file`]
	/// * [`Dictionary::deserialize_from_file`]
	#[test]
	fn test_serialize_to_file()
	{
		let mut dictionary = Dictionary::new();
		dictionary.populate(&["hello", "world", "help"], 1);
		let file = NamedTempFile::new().unwrap();
		dictionary.serialize_to_file(file.path()).unwrap();
		let deserialized =
			Dictionary::deserialize_from_file(file.path()).unwrap();
		assert_eq!(dictionary, deserialized);
	}

	/// Garbage in a binary dictionary is reported as invalid data.
	#[test]
	fn test_deserialize_garbage()
	{
		let file = NamedTempFile::new().unwrap();
		fs::write(file.path(), [0xffu8; 3]).unwrap();
		let error = Dictionary::deserialize_from_file(file.path()).unwrap_err();
		assert_eq!(error.kind(), std::io::ErrorKind::InvalidData);
	}

	/// Opening a dictionary writes a binary cache per minimum length, and a
	/// later open reads the same content back.
	#[test]
	fn test_open()
	{
		let dir = tempdir().unwrap();
		fs::write(dir.path().join("words.txt"), "ox\ncat\ncart\n").unwrap();
		// Ensure that the binary dictionary ends up strictly newer than the
		// word list, even on file systems with coarse timestamps.
		thread::sleep(Duration::from_millis(20));
		let first = Dictionary::open(dir.path(), "words", 3).unwrap();
		assert!(dir.path().join("words.3.dict").exists());
		assert!(first.contains_word("cat"));
		assert!(!first.contains_word("ox"));
		let second = Dictionary::open(dir.path(), "words", 3).unwrap();
		assert_eq!(first, second);
		let all = Dictionary::open(dir.path(), "words", 1).unwrap();
		assert!(all.contains_word("ox"));
		assert!(dir.path().join("words.1.dict").exists());
	}
}
