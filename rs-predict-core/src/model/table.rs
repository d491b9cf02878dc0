use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NgramError, Result};
use crate::io::{read_lines, write_lines};
use super::metrics::OrderMetrics;

/// Joins the words of an n-gram into its lookup key.
///
/// Example: `["the", "cat"]` → `"the cat"`
pub fn ngram_key(words: &[&str]) -> String {
	words.join(" ")
}

/// Frequency table for a single n-gram order.
///
/// Maps an n-gram key to the number of times it was observed and remembers
/// the order in which keys were first observed. That order is the scan order
/// used by every argmax search, which makes tie-breaking reproducible, and it
/// survives persistence.
///
/// # Invariants
/// - Keys are unique
/// - Every stored count is >= 1 (an absent key means a count of 0)
/// - `positions[key]` is the index of `key` in `entries`
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(try_from = "Vec<(String, u64)>", into = "Vec<(String, u64)>")]
pub struct FrequencyTable {
	/// `(key, count)` pairs in first-observed order.
	entries: Vec<(String, u64)>,
	/// Key → index into `entries`.
	positions: HashMap<String, usize>,
}

impl FrequencyTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one more occurrence of `key`.
	///
	/// - If the key already exists, its count is increased.
	/// - Otherwise, it is appended with an initial count of 1.
	pub(crate) fn increment(&mut self, key: &str) {
		self.add(key, 1);
	}

	fn add(&mut self, key: &str, count: u64) {
		match self.positions.get(key) {
			Some(&position) => self.entries[position].1 += count,
			None => {
				self.positions.insert(key.to_owned(), self.entries.len());
				self.entries.push((key.to_owned(), count));
			}
		}
	}

	/// Returns the count of `key`, 0 if it was never observed.
	pub fn get(&self, key: &str) -> u64 {
		self.positions.get(key).map_or(0, |&position| self.entries[position].1)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.positions.contains_key(key)
	}

	/// Number of distinct keys.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Sum of all counts.
	pub fn total(&self) -> u64 {
		self.entries.iter().map(|(_, count)| count).sum()
	}

	/// Total and distinct-key count of this table.
	pub fn metrics(&self) -> OrderMetrics {
		OrderMetrics::new(self.total(), self.len() as u64)
	}

	/// Iterates over `(key, count)` pairs in first-observed order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
		self.entries.iter().map(|(key, count)| (key.as_str(), *count))
	}

	/// Parses consolidated `ngram,count` lines.
	///
	/// The count is taken after the last comma, so keys may contain commas.
	/// Blank lines are skipped and a key seen twice has its counts summed.
	///
	/// # Errors
	/// Returns `MalformedCounts` (with a 1-based line number) when a line has
	/// no comma, an empty key, or a count that is not a positive integer.
	pub fn parse_counts<I, S>(lines: I) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut table = Self::new();
		for (index, line) in lines.into_iter().enumerate() {
			let line = line.as_ref().trim();
			if line.is_empty() {
				continue;
			}
			let malformed = |reason: &str| NgramError::MalformedCounts { line: index + 1, reason: reason.to_owned() };

			let (key, count) = line.rsplit_once(',').ok_or_else(|| malformed("missing ',' separator"))?;
			let key = key.trim();
			if key.is_empty() {
				return Err(malformed("empty n-gram"));
			}
			let count: u64 = count.trim().parse().map_err(|_| malformed("count is not an integer"))?;
			if count == 0 {
				return Err(malformed("count must be >= 1"));
			}
			table.add(key, count);
		}
		Ok(table)
	}

	/// Reads a consolidated `ngram,count` file (see `parse_counts`).
	pub fn read_counts<P: AsRef<Path>>(path: P) -> Result<Self> {
		let lines = read_lines(path)?;
		Self::parse_counts(lines)
	}

	/// Writes the table as `ngram,count` lines, in first-observed order.
	pub fn write_counts<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		write_lines(path, self.iter().map(|(key, count)| format!("{key},{count}")))?;
		Ok(())
	}
}

impl PartialEq for FrequencyTable {
	fn eq(&self, other: &Self) -> bool {
		// `positions` is derived from `entries`
		self.entries == other.entries
	}
}

impl Eq for FrequencyTable {}

impl TryFrom<Vec<(String, u64)>> for FrequencyTable {
	type Error = String;

	fn try_from(entries: Vec<(String, u64)>) -> std::result::Result<Self, Self::Error> {
		let mut positions = HashMap::with_capacity(entries.len());
		for (position, (key, count)) in entries.iter().enumerate() {
			if *count == 0 {
				return Err(format!("n-gram '{key}' has a zero count"));
			}
			if positions.insert(key.clone(), position).is_some() {
				return Err(format!("n-gram '{key}' is stored twice"));
			}
		}
		Ok(Self { entries, positions })
	}
}

impl From<FrequencyTable> for Vec<(String, u64)> {
	fn from(table: FrequencyTable) -> Self {
		table.entries
	}
}
